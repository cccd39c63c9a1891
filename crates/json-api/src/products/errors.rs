//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product query")
        }
        ProductsServiceError::Sql(source) => {
            error!("failed to load products: {source}");

            StatusError::internal_server_error()
        }
    }
}
