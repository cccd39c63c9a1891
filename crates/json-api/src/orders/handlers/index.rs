//! Order Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrdersResponse},
    state::State,
};

/// Order Index Handler
///
/// Lists the caller's orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders of the caller"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::orders::{
        MockOrdersService, OrdersServiceError,
        records::{OrderStatus, OrderUuid},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, make_order, orders_service};

    use super::*;

    fn make_service(repo: MockOrdersService) -> Service {
        orders_service(repo, Router::with_path("orders").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_orders_in_service_order() -> TestResult {
        let mut repo = MockOrdersService::new();
        let newer = OrderUuid::new();
        let older = OrderUuid::new();
        let orders = vec![
            make_order(newer, OrderStatus::Paid),
            make_order(older, OrderStatus::Pending),
        ];

        repo.expect_list_orders()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |_| Ok(orders));

        repo.expect_create_order().never();
        repo.expect_update_order_status().never();

        let mut res = TestClient::get("http://example.com/orders")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrdersResponse = res.take_json().await?;

        assert_eq!(
            body.orders
                .iter()
                .map(|order| (order.id, order.order_status.as_str()))
                .collect::<Vec<_>>(),
            vec![(newer.into_uuid(), "paid"), (older.into_uuid(), "pending")]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_without_orders_returns_empty_list() -> TestResult {
        let mut repo = MockOrdersService::new();

        repo.expect_list_orders()
            .once()
            .return_once(|_| Ok(Vec::new()));

        repo.expect_create_order().never();
        repo.expect_update_order_status().never();

        let mut res = TestClient::get("http://example.com/orders")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrdersResponse = res.take_json().await?;

        assert!(body.orders.is_empty(), "no orders expected");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_failure_returns_500() -> TestResult {
        let mut repo = MockOrdersService::new();

        repo.expect_list_orders()
            .once()
            .return_once(|_| Err(OrdersServiceError::Sql(sqlx::Error::PoolTimedOut)));

        repo.expect_create_order().never();
        repo.expect_update_order_status().never();

        let res = TestClient::get("http://example.com/orders")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
