//! Products Data

use rust_decimal::Decimal;

use crate::domain::products::records::{ProductRecord, ProductUuid};

/// Default page size for product listings.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Most products a single batch lookup may name.
pub const MAX_BATCH_SIZE: usize = 100;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
    pub price: Decimal,
    pub stock: u32,
    pub category: String,
    pub brand: String,
}

/// Product listing filters and pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,

    /// Case-insensitive substring match on the product name.
    pub name: Option<String>,

    /// `Some(true)` keeps products with stock, `Some(false)` only sold-out ones.
    pub in_stock: Option<bool>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            name: None,
            in_stock: None,
        }
    }
}

impl ProductQuery {
    /// Build a query from optional caller input, clamping page and limit into range.
    #[must_use]
    pub fn new(
        page: Option<u32>,
        limit: Option<u32>,
        name: Option<String>,
        in_stock: Option<bool>,
    ) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            name: name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            in_stock,
        }
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.limit)
    }

    /// `ILIKE` pattern for the name filter with wildcard characters escaped.
    #[must_use]
    pub fn name_pattern(&self) -> Option<String> {
        self.name.as_ref().map(|name| {
            let mut pattern = String::with_capacity(name.len() + 2);

            pattern.push('%');

            for ch in name.chars() {
                if matches!(ch, '%' | '_' | '\\') {
                    pattern.push('\\');
                }

                pattern.push(ch);
            }

            pattern.push('%');
            pattern
        })
    }
}

/// One page of products.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<ProductRecord>,

    /// Number of products matching the filters across all pages.
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl ProductPage {
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.limit.max(1)))
    }
}
