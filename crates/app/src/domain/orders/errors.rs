//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::orders::records::{OrderStatus, UnknownVariant};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("user not found")]
    UserNotFound,

    #[error("order belongs to another user")]
    Forbidden,

    #[error("cart is empty")]
    EmptyCart,

    #[error("shipping address is missing {0}")]
    IncompleteAddress(&'static str),

    #[error("invalid order status")]
    InvalidStatus(#[source] UnknownVariant),

    #[error("order cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("order total is too large")]
    TotalOverflow,

    /// The cart version moved between reading it and draining it.
    ///
    /// Checkout reads the version under the cart's row lock, so this only
    /// surfaces if the cart row is written without taking that lock.
    #[error("cart changed during checkout")]
    CartChanged,

    #[error("invalid order data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::UserNotFound,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::UniqueViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
