//! Order Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::{
    money::format_amount,
    orders::records::{OrderLineRecord, OrderRecord, ShippingAddress},
};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,

    /// Purchased lines, frozen at checkout
    pub products: Vec<OrderLineResponse>,

    /// Sum of price times quantity at checkout
    pub total_price: String,
    pub order_status: String,
    pub shipping_address: ShippingAddressResponse,
    pub payment_method: String,
    pub shipping_method: String,
    pub use_shipping_as_billing: bool,
    pub newsletter_subscribed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            id: order.uuid.into(),
            user_id: order.user_uuid.into(),
            email: order.email,
            first_name: order.first_name,
            last_name: order.last_name,
            products: order.lines.into_iter().map(Into::into).collect(),
            total_price: format_amount(order.total_price),
            order_status: order.status.to_string(),
            shipping_address: order.shipping_address.into(),
            payment_method: order.payment_method.to_string(),
            shipping_method: order.shipping_method.to_string(),
            use_shipping_as_billing: order.use_shipping_as_billing,
            newsletter_subscribed: order.newsletter_subscribed,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderLineResponse {
    pub product_id: Uuid,
    pub product_name: String,
    pub product_image: String,
    pub quantity: u32,
    pub price: String,
}

impl From<OrderLineRecord> for OrderLineResponse {
    fn from(line: OrderLineRecord) -> Self {
        Self {
            product_id: line.product_uuid.into(),
            product_name: line.product_name,
            product_image: line.product_image,
            quantity: line.quantity,
            price: format_amount(line.price),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShippingAddressResponse {
    pub street_address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl From<ShippingAddress> for ShippingAddressResponse {
    fn from(address: ShippingAddress) -> Self {
        Self {
            street_address: address.street_address,
            apartment: address.apartment,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            country: address.country,
        }
    }
}

/// Single order envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderEnvelope {
    pub order: OrderResponse,
}

/// Order list envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Newest first
    pub orders: Vec<OrderResponse>,
}
