//! Wishlist Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::wishlists::WishlistsServiceError;

pub(crate) fn into_status_error(error: WishlistsServiceError) -> StatusError {
    match error {
        WishlistsServiceError::NotFound => StatusError::not_found().brief("User not found"),
        WishlistsServiceError::ProductNotFound => {
            StatusError::not_found().brief("Product not found")
        }
        WishlistsServiceError::AlreadyExists => {
            StatusError::bad_request().brief("Product already in wishlist")
        }
        WishlistsServiceError::Sql(source) => {
            error!("wishlist storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
