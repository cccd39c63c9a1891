//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    users::cart::{errors::into_status_error, responses::CartResponse},
};

/// Clear Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Empty cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.clear",
    skip(depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let cart = state
        .app
        .carts
        .clear_cart(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::carts::{CartsServiceError, MockCartsService};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::Value;
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, carts_service, make_cart};

    use super::*;

    fn make_service(repo: MockCartsService) -> Service {
        carts_service(repo, Router::with_path("users/cart").delete(handler))
    }

    #[tokio::test]
    async fn test_clear_returns_empty_cart() -> TestResult {
        let mut repo = MockCartsService::new();

        repo.expect_clear_cart()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(make_cart(7, Vec::new())));

        repo.expect_get_cart().never();
        repo.expect_upsert_cart_line().never();
        repo.expect_remove_cart_line().never();

        let mut res = TestClient::delete("http://example.com/users/cart")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Value = res.take_json().await?;

        assert_eq!(body.get("cart"), Some(&Value::Array(Vec::new())));

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_missing_user_returns_404() -> TestResult {
        let mut repo = MockCartsService::new();

        repo.expect_clear_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        repo.expect_get_cart().never();
        repo.expect_upsert_cart_line().never();
        repo.expect_remove_cart_line().never();

        let res = TestClient::delete("http://example.com/users/cart")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
