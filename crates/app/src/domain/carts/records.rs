//! Cart Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::{money, products::records::ProductUuid, users::records::UserUuid};

/// A user's cart.
#[derive(Debug, Clone)]
pub struct CartRecord {
    /// Owner of the cart.
    pub user_uuid: UserUuid,

    /// Bumped on every mutation; checkout compares against it.
    pub version: i64,

    /// Lines in the order they were first added.
    pub lines: Vec<CartLineRecord>,

    pub updated_at: Timestamp,
}

impl CartRecord {
    /// Sum of `price * quantity` across all lines, or `None` on overflow.
    #[must_use]
    pub fn subtotal(&self) -> Option<Decimal> {
        money::sum_line_totals(self.lines.iter().map(|line| (line.price, line.quantity)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A single product entry with catalog data frozen at add time.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineRecord {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_image: String,
    pub quantity: u32,

    /// Unit price when the product was first added.
    pub price: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
