//! Cart Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::{
    carts::records::{CartLineRecord, CartRecord},
    money::format_amount,
};

/// The caller's cart.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Lines in the order they were first added
    pub cart: Vec<CartLineResponse>,

    /// Changes on every mutation of the cart
    pub version: i64,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        Self {
            cart: cart.lines.into_iter().map(CartLineResponse::from).collect(),
            version: cart.version,
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartLineResponse {
    pub product_id: Uuid,

    /// Product name when the line was added
    pub product_name: String,

    /// Main product image when the line was added
    pub product_image: String,

    pub quantity: u32,

    /// Unit price when the line was added
    pub price: String,
}

impl From<CartLineRecord> for CartLineResponse {
    fn from(line: CartLineRecord) -> Self {
        Self {
            product_id: line.product_uuid.into(),
            product_name: line.product_name,
            product_image: line.product_image,
            quantity: line.quantity,
            price: format_amount(line.price),
        }
    }
}
