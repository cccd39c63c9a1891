//! Order Requests

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use bazaar_app::domain::orders::{
    data::{CheckoutDetails, ShippingAddressDraft},
    records::{OrderUuid, PaymentMethod, ShippingMethod},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) enum PaymentMethodRequest {
    CreditCard,
    Paypal,
    BankTransfer,
}

impl From<PaymentMethodRequest> for PaymentMethod {
    fn from(method: PaymentMethodRequest) -> Self {
        match method {
            PaymentMethodRequest::CreditCard => Self::CreditCard,
            PaymentMethodRequest::Paypal => Self::Paypal,
            PaymentMethodRequest::BankTransfer => Self::BankTransfer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) enum ShippingMethodRequest {
    Domestic,
    International,
}

impl From<ShippingMethodRequest> for ShippingMethod {
    fn from(method: ShippingMethodRequest) -> Self {
        match method {
            ShippingMethodRequest::Domestic => Self::Domestic,
            ShippingMethodRequest::International => Self::International,
        }
    }
}

/// Shipping address as submitted. Completeness is checked at checkout.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShippingAddressRequest {
    pub street_address: Option<String>,
    pub apartment: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl From<ShippingAddressRequest> for ShippingAddressDraft {
    fn from(address: ShippingAddressRequest) -> Self {
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

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,

    #[serde(default)]
    pub shipping_address: Option<ShippingAddressRequest>,
    pub payment_method: PaymentMethodRequest,
    pub shipping_method: ShippingMethodRequest,

    #[serde(default)]
    pub use_shipping_as_billing: bool,

    #[serde(default)]
    pub newsletter_subscribed: bool,
}

impl From<CreateOrderRequest> for CheckoutDetails {
    fn from(request: CreateOrderRequest) -> Self {
        Self {
            uuid: OrderUuid::new(),
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            shipping_address: request.shipping_address.unwrap_or_default().into(),
            payment_method: request.payment_method.into(),
            shipping_method: request.shipping_method.into(),
            use_shipping_as_billing: request.use_shipping_as_billing,
            newsletter_subscribed: request.newsletter_subscribed,
        }
    }
}

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateOrderStatusRequest {
    /// One of `pending`, `paid`, `shipped`, `completed`, `cancelled`
    pub order_status: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn method_names_match_the_wire_spelling() -> TestResult {
        let payment: PaymentMethodRequest = serde_json::from_value(json!("bankTransfer"))?;
        let shipping: ShippingMethodRequest = serde_json::from_value(json!("international"))?;

        assert_eq!(PaymentMethod::from(payment).as_str(), "bankTransfer");
        assert_eq!(ShippingMethod::from(shipping).as_str(), "international");
        assert!(
            serde_json::from_value::<PaymentMethodRequest>(json!("cash")).is_err(),
            "unknown payment methods should be rejected"
        );

        Ok(())
    }

    #[test]
    fn missing_address_becomes_empty_draft() -> TestResult {
        let request: CreateOrderRequest = serde_json::from_value(json!({
            "email": "ada@example.com",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "paymentMethod": "paypal",
            "shippingMethod": "domestic"
        }))?;

        let details = CheckoutDetails::from(request);

        assert_eq!(details.shipping_address, ShippingAddressDraft::default());
        assert!(!details.use_shipping_as_billing, "flag should default to false");

        Ok(())
    }
}
