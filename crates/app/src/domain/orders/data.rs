//! Order Data

use rust_decimal::Decimal;

use crate::domain::{
    carts::records::CartLineRecord,
    money,
    orders::{
        errors::OrdersServiceError,
        records::{
            OrderLineRecord, OrderStatus, OrderUuid, PaymentMethod, ShippingAddress,
            ShippingMethod,
        },
    },
    users::records::UserUuid,
};

/// Shipping address as submitted at checkout; any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingAddressDraft {
    pub street_address: Option<String>,
    pub apartment: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl ShippingAddressDraft {
    /// Require every field except the apartment. Blank values count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::IncompleteAddress`] naming the first missing field.
    pub fn complete(self) -> Result<ShippingAddress, OrdersServiceError> {
        Ok(ShippingAddress {
            street_address: required("streetAddress", self.street_address)?,
            apartment: self
                .apartment
                .map(|apartment| apartment.trim().to_string())
                .filter(|apartment| !apartment.is_empty()),
            city: required("city", self.city)?,
            state: required("state", self.state)?,
            postal_code: required("postalCode", self.postal_code)?,
            country: required("country", self.country)?,
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, OrdersServiceError> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(OrdersServiceError::IncompleteAddress(field))
}

/// Checkout input supplied by the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutDetails {
    pub uuid: OrderUuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub shipping_address: ShippingAddressDraft,
    pub payment_method: PaymentMethod,
    pub shipping_method: ShippingMethod,
    pub use_shipping_as_billing: bool,
    pub newsletter_subscribed: bool,
}

/// A validated order ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub lines: Vec<OrderLineRecord>,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub shipping_method: ShippingMethod,
    pub use_shipping_as_billing: bool,
    pub newsletter_subscribed: bool,
}

impl NewOrder {
    /// Price the cart and freeze its lines into an order.
    ///
    /// Lines are copied verbatim, using their snapshotted prices.
    ///
    /// # Errors
    ///
    /// - [`OrdersServiceError::EmptyCart`] when there are no lines.
    /// - [`OrdersServiceError::IncompleteAddress`] when the address is missing a field.
    /// - [`OrdersServiceError::TotalOverflow`] when the total does not fit.
    pub fn from_cart(
        user: UserUuid,
        details: CheckoutDetails,
        cart: &[CartLineRecord],
    ) -> Result<Self, OrdersServiceError> {
        if cart.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let shipping_address = details.shipping_address.complete()?;

        let total_price =
            money::sum_line_totals(cart.iter().map(|line| (line.price, line.quantity)))
                .filter(|total| *total <= money::MAX_ORDER_TOTAL)
                .ok_or(OrdersServiceError::TotalOverflow)?;

        let lines = cart
            .iter()
            .map(|line| OrderLineRecord {
                product_uuid: line.product_uuid,
                product_name: line.product_name.clone(),
                product_image: line.product_image.clone(),
                quantity: line.quantity,
                price: line.price,
            })
            .collect();

        Ok(Self {
            uuid: details.uuid,
            user_uuid: user,
            email: details.email,
            first_name: details.first_name,
            last_name: details.last_name,
            lines,
            total_price,
            status: OrderStatus::Pending,
            shipping_address,
            payment_method: details.payment_method,
            shipping_method: details.shipping_method,
            use_shipping_as_billing: details.use_shipping_as_billing,
            newsletter_subscribed: details.newsletter_subscribed,
        })
    }
}
