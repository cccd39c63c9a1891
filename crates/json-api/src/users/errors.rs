//! User Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::AlreadyExists => StatusError::conflict().brief("User already exists"),
        UsersServiceError::InvalidData => StatusError::bad_request().brief("Invalid user data"),
        UsersServiceError::Sql(source) => {
            error!("failed to load user: {source}");

            StatusError::internal_server_error()
        }
    }
}
