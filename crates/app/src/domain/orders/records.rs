//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// A name that does not match any variant of an order enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

macro_rules! named_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant::new($kind, value)),
                }
            }
        }
    };
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Completed,
    Cancelled,
}

named_enum!(OrderStatus, "order status", {
    Pending => "pending",
    Paid => "paid",
    Shipped => "shipped",
    Completed => "completed",
    Cancelled => "cancelled",
});

/// A status as named by a caller. Only checked once the order and its owner are known.
pub type RequestedStatus = Result<OrderStatus, UnknownVariant>;

impl OrderStatus {
    /// Forward-only pipeline. Staying in the current status is always allowed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Pending | Self::Paid | Self::Cancelled)
                | (Self::Paid, Self::Paid | Self::Shipped | Self::Cancelled)
                | (Self::Shipped, Self::Shipped | Self::Completed)
                | (Self::Completed, Self::Completed)
                | (Self::Cancelled, Self::Cancelled)
        )
    }

    /// No further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
    BankTransfer,
}

named_enum!(PaymentMethod, "payment method", {
    CreditCard => "creditCard",
    Paypal => "paypal",
    BankTransfer => "bankTransfer",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingMethod {
    Domestic,
    International,
}

named_enum!(ShippingMethod, "shipping method", {
    Domestic => "domestic",
    International => "international",
});

/// A complete shipping address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingAddress {
    pub street_address: String,
    pub apartment: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// One purchased product, frozen at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineRecord {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_image: String,
    pub quantity: u32,
    pub price: Decimal,
}

/// Order Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,

    /// Owner; the only user allowed to change the status.
    pub user_uuid: UserUuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub lines: Vec<OrderLineRecord>,

    /// Sum of `price * quantity` over the lines at checkout. Never recomputed.
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub shipping_method: ShippingMethod,
    pub use_shipping_as_billing: bool,
    pub newsletter_subscribed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
