//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use bazaar_app::domain::orders::records::OrderStatus;

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error, requests::UpdateOrderStatusRequest, responses::OrderEnvelope,
    },
    state::State,
};

/// Update Order Status Handler
///
/// Only the owner may move an order along its lifecycle. An unknown status
/// is reported after the order and its owner have been checked.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid status or transition"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(order, json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty,
        order_status = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let order = order.into_inner();

    let requested = json.into_inner().order_status;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("order_uuid", tracing::field::display(order));
    span.record("order_status", requested.as_str());

    let status = requested.parse::<OrderStatus>();

    let order = state
        .app
        .orders
        .update_order_status(user, order.into(), status)
        .await
        .map_err(into_status_error)?;

    tracing::info!(order_uuid = %order.uuid, status = %order.status, "updated order status");

    Ok(Json(OrderEnvelope {
        order: order.into(),
    }))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::orders::{
        MockOrdersService, OrdersServiceError,
        records::{OrderUuid, UnknownVariant},
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, make_order, orders_service};

    use super::*;

    fn make_service(repo: MockOrdersService) -> Service {
        orders_service(
            repo,
            Router::with_path("orders/{order}/status").put(handler),
        )
    }

    fn strict(repo: &mut MockOrdersService) {
        repo.expect_list_orders().never();
        repo.expect_create_order().never();
    }

    #[tokio::test]
    async fn test_update_status_returns_order() -> TestResult {
        let mut repo = MockOrdersService::new();
        let uuid = OrderUuid::new();

        repo.expect_update_order_status()
            .once()
            .withf(move |caller, order, status| {
                *caller == TEST_USER_UUID && *order == uuid && *status == Ok(OrderStatus::Paid)
            })
            .return_once(move |_, _, _| Ok(make_order(uuid, OrderStatus::Paid)));

        strict(&mut repo);

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "orderStatus": "paid" }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrderEnvelope = res.take_json().await?;

        assert_eq!(body.order.order_status, "paid");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let mut repo = MockOrdersService::new();

        repo.expect_update_order_status()
            .once()
            .withf(|_, _, status| {
                status
                    .as_ref()
                    .is_err_and(|unknown| unknown.value == "refunded")
            })
            .return_once(|_, _, _| {
                Err(OrdersServiceError::InvalidStatus(UnknownVariant {
                    kind: "order status",
                    value: "refunded".to_string(),
                }))
            });

        strict(&mut repo);

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "orderStatus": "refunded" }))
        .send(&make_service(repo))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_other_users_order_returns_403() -> TestResult {
        let mut repo = MockOrdersService::new();

        repo.expect_update_order_status()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::Forbidden));

        strict(&mut repo);

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "orderStatus": "cancelled" }))
        .send(&make_service(repo))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_on_other_users_order_returns_403() -> TestResult {
        let mut repo = MockOrdersService::new();

        repo.expect_update_order_status()
            .once()
            .withf(|_, _, status| status.is_err())
            .return_once(|_, _, _| Err(OrdersServiceError::Forbidden));

        strict(&mut repo);

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "orderStatus": "refunded" }))
        .send(&make_service(repo))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_on_missing_order_returns_404() -> TestResult {
        let mut repo = MockOrdersService::new();

        repo.expect_update_order_status()
            .once()
            .withf(|_, _, status| status.is_err())
            .return_once(|_, _, _| Err(OrdersServiceError::NotFound));

        strict(&mut repo);

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "orderStatus": "refunded" }))
        .send(&make_service(repo))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_order_returns_404() -> TestResult {
        let mut repo = MockOrdersService::new();

        repo.expect_update_order_status()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::NotFound));

        strict(&mut repo);

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "orderStatus": "paid" }))
        .send(&make_service(repo))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_backwards_transition_returns_400() -> TestResult {
        let mut repo = MockOrdersService::new();

        repo.expect_update_order_status()
            .once()
            .return_once(|_, _, _| {
                Err(OrdersServiceError::InvalidTransition {
                    from: OrderStatus::Completed,
                    to: OrderStatus::Pending,
                })
            });

        strict(&mut repo);

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "orderStatus": "pending" }))
        .send(&make_service(repo))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
