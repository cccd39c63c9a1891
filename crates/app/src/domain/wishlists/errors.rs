//! Wishlists service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WishlistsServiceError {
    #[error("user not found")]
    NotFound,

    #[error("product already in wishlist")]
    AlreadyExists,

    #[error("product not found")]
    ProductNotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for WishlistsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::ProductNotFound,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation | ErrorKind::Other | _)
            | None => Self::Sql(error),
        }
    }
}
