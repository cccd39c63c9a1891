//! Remove Cart Line Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    users::cart::{errors::into_status_error, responses::CartResponse},
};

/// Remove Cart Line Handler
///
/// Removes every line for the product. Products not in the cart are ignored.
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Line",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.remove",
    skip(product, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let product = product.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(product));

    let cart = state
        .app
        .carts
        .remove_cart_line(user, product.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        products::records::ProductUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, carts_service, make_cart};

    use super::*;

    fn make_service(repo: MockCartsService) -> Service {
        carts_service(repo, Router::with_path("users/cart/{product}").delete(handler))
    }

    #[tokio::test]
    async fn test_remove_absent_product_returns_cart() -> TestResult {
        let mut repo = MockCartsService::new();
        let product = ProductUuid::new();

        repo.expect_remove_cart_line()
            .once()
            .withf(move |user, p| *user == TEST_USER_UUID && *p == product)
            .return_once(|_, _| Ok(make_cart(3, Vec::new())));

        repo.expect_get_cart().never();
        repo.expect_upsert_cart_line().never();
        repo.expect_clear_cart().never();

        let mut res = TestClient::delete(format!("http://example.com/users/cart/{product}"))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartResponse = res.take_json().await?;

        assert!(body.cart.is_empty(), "cart should be empty");

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_missing_user_returns_404() -> TestResult {
        let mut repo = MockCartsService::new();

        repo.expect_remove_cart_line()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        repo.expect_get_cart().never();
        repo.expect_upsert_cart_line().never();
        repo.expect_clear_cart().never();

        let res = TestClient::delete(format!(
            "http://example.com/users/cart/{}",
            ProductUuid::new()
        ))
        .send(&make_service(repo))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
