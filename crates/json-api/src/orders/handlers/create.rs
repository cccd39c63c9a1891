//! Create Order Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use bazaar_app::domain::orders::data::CheckoutDetails;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, requests::CreateOrderRequest, responses::OrderEnvelope},
    state::State,
};

/// Create Order Handler
///
/// Turns the caller's cart into a pending order and empties the cart.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or incomplete address"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::CONFLICT, description = "Cart changed during checkout"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let details = CheckoutDetails::from(json.into_inner());

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("order_uuid", tracing::field::display(details.uuid));

    let order = state
        .app
        .orders
        .create_order(user, details)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(
        total_price = %order.total_price,
        lines = order.lines.len(),
        "created order"
    );

    Ok(Json(OrderEnvelope {
        order: order.into(),
    }))
}
