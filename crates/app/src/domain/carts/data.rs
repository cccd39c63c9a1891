//! Cart Data

use std::{fmt, str::FromStr};

use crate::domain::{
    carts::{errors::CartsServiceError, records::CartLineRecord},
    products::records::ProductUuid,
};

/// Largest quantity a single line can hold.
pub const MAX_LINE_QUANTITY: u32 = i32::MAX.unsigned_abs();

/// How a cart upsert treats the quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    /// Set the line to the supplied quantity.
    Update,

    /// Add one to the line, creating it with quantity 1.
    Increment,
}

impl CartAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Update => "UPDATE",
            Self::Increment => "INCREMENT",
        }
    }
}

impl fmt::Display for CartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown cart action name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCartAction;

impl fmt::Display for InvalidCartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("action must be either UPDATE or INCREMENT")
    }
}

impl std::error::Error for InvalidCartAction {}

impl FromStr for CartAction {
    type Err = InvalidCartAction;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "UPDATE" => Ok(Self::Update),
            "INCREMENT" => Ok(Self::Increment),
            _ => Err(InvalidCartAction),
        }
    }
}

/// Cart line upsert request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineUpsert {
    pub product_uuid: ProductUuid,
    pub action: CartAction,

    /// Required for [`CartAction::Update`], ignored for increments.
    pub quantity: Option<i64>,
}

/// What an upsert does to the stored cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertPlan {
    /// Add a new line snapshotting the catalog product.
    Insert { quantity: u32 },

    /// Overwrite the quantity of the existing line.
    SetQuantity { quantity: u32 },
}

/// Decide how an upsert applies given the current line for the product, if any.
///
/// # Errors
///
/// Returns [`CartsServiceError::InvalidQuantity`] when an update carries no
/// positive quantity or a quantity would exceed [`MAX_LINE_QUANTITY`].
pub fn plan_upsert(
    existing: Option<&CartLineRecord>,
    action: CartAction,
    quantity: Option<i64>,
) -> Result<UpsertPlan, CartsServiceError> {
    match (action, existing) {
        (CartAction::Update, Some(_)) => Ok(UpsertPlan::SetQuantity {
            quantity: positive_quantity(quantity)?,
        }),
        (CartAction::Update, None) => Ok(UpsertPlan::Insert {
            quantity: positive_quantity(quantity)?,
        }),
        (CartAction::Increment, Some(line)) => line
            .quantity
            .checked_add(1)
            .filter(|quantity| *quantity <= MAX_LINE_QUANTITY)
            .map(|quantity| UpsertPlan::SetQuantity { quantity })
            .ok_or(CartsServiceError::InvalidQuantity),
        (CartAction::Increment, None) => Ok(UpsertPlan::Insert { quantity: 1 }),
    }
}

fn positive_quantity(quantity: Option<i64>) -> Result<u32, CartsServiceError> {
    quantity
        .and_then(|quantity| u32::try_from(quantity).ok())
        .filter(|quantity| (1..=MAX_LINE_QUANTITY).contains(quantity))
        .ok_or(CartsServiceError::InvalidQuantity)
}
