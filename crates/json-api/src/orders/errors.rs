//! Order Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use bazaar_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::UserNotFound => StatusError::not_found().brief("User not found"),
        OrdersServiceError::Forbidden => {
            StatusError::forbidden().brief("You are not allowed to update this order")
        }
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        OrdersServiceError::IncompleteAddress(field) => StatusError::bad_request()
            .brief(format!("Shipping address is missing {field}")),
        OrdersServiceError::InvalidStatus(_) => {
            StatusError::bad_request().brief("Invalid order status")
        }
        OrdersServiceError::InvalidTransition { from, to } => StatusError::bad_request()
            .brief(format!("Order status cannot change from {from} to {to}")),
        OrdersServiceError::TotalOverflow => {
            StatusError::bad_request().brief("Order total is too large")
        }
        OrdersServiceError::InvalidData => StatusError::bad_request().brief("Invalid order data"),
        OrdersServiceError::CartChanged => {
            warn!("cart changed during checkout");

            StatusError::conflict().brief("Cart changed during checkout, please retry")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
