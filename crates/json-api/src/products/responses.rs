//! Product Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::{money::format_amount, products::records::ProductRecord};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: Uuid,

    pub name: String,

    pub description: String,

    /// Image URLs, main image first
    pub images: Vec<String>,

    /// Unit price with two decimal places
    pub price: String,

    /// Units available
    pub stock: u32,

    pub category: String,

    pub brand: String,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            id: product.uuid.into(),
            name: product.name,
            description: product.description,
            images: product.images,
            price: format_amount(product.price),
            stock: product.stock,
            category: product.category,
            brand: product.brand,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}
