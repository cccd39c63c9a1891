//! Upsert Cart Line Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::carts::data::{CartAction, CartLineUpsert};

use crate::{
    extensions::*,
    state::State,
    users::cart::{errors::into_status_error, responses::CartResponse},
};

/// Upsert Cart Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpsertCartLineRequest {
    pub product_id: Uuid,

    /// `UPDATE` sets the quantity, `INCREMENT` adds one
    pub action_type: String,

    /// Required for `UPDATE`
    pub quantity: Option<i64>,
}

impl UpsertCartLineRequest {
    fn into_upsert(self) -> Result<CartLineUpsert, StatusError> {
        let action = self
            .action_type
            .parse::<CartAction>()
            .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

        Ok(CartLineUpsert {
            product_uuid: self.product_id.into(),
            action,
            quantity: self.quantity,
        })
    }
}

/// Upsert Cart Line Handler
///
/// Adds a product to the cart or changes its quantity.
#[endpoint(
    tags("cart"),
    summary = "Add or Update Cart Line",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid actionType or quantity"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "User or product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.upsert",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        action = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpsertCartLineRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let upsert = json.into_inner().into_upsert()?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(upsert.product_uuid));
    span.record("action", tracing::field::display(upsert.action));

    let cart = state
        .app
        .carts
        .upsert_cart_line(user, upsert)
        .await
        .map_err(into_status_error)?;

    tracing::info!(version = cart.version, lines = cart.lines.len(), "upserted cart line");

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        products::records::ProductUuid,
    };
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, carts_service, make_cart, make_cart_line};

    use super::*;

    fn make_service(repo: MockCartsService) -> Service {
        carts_service(repo, Router::with_path("users/cart").post(handler))
    }

    fn strict(repo: &mut MockCartsService) {
        repo.expect_get_cart().never();
        repo.expect_remove_cart_line().never();
        repo.expect_clear_cart().never();
    }

    #[tokio::test]
    async fn test_increment_forwards_upsert() -> TestResult {
        let mut repo = MockCartsService::new();
        let product = ProductUuid::new();
        let cart = make_cart(1, vec![make_cart_line(product, Decimal::new(10, 0), 1)]);

        repo.expect_upsert_cart_line()
            .once()
            .withf(move |user, upsert| {
                *user == TEST_USER_UUID
                    && upsert.product_uuid == product
                    && upsert.action == CartAction::Increment
                    && upsert.quantity.is_none()
            })
            .return_once(move |_, _| Ok(cart));

        strict(&mut repo);

        let mut res = TestClient::post("http://example.com/users/cart")
            .json(&json!({
                "productId": product.into_uuid(),
                "actionType": "INCREMENT",
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartResponse = res.take_json().await?;

        assert_eq!(body.cart.first().map(|line| line.quantity), Some(1));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_forwards_quantity() -> TestResult {
        let mut repo = MockCartsService::new();
        let product = ProductUuid::new();
        let cart = make_cart(2, vec![make_cart_line(product, Decimal::new(10, 0), 5)]);

        repo.expect_upsert_cart_line()
            .once()
            .withf(move |_, upsert| {
                upsert.action == CartAction::Update && upsert.quantity == Some(5)
            })
            .return_once(move |_, _| Ok(cart));

        strict(&mut repo);

        let res = TestClient::post("http://example.com/users/cart")
            .json(&json!({
                "productId": product.into_uuid(),
                "actionType": "UPDATE",
                "quantity": 5,
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_action_returns_400() -> TestResult {
        let mut repo = MockCartsService::new();

        repo.expect_upsert_cart_line().never();
        strict(&mut repo);

        let res = TestClient::post("http://example.com/users/cart")
            .json(&json!({
                "productId": ProductUuid::new().into_uuid(),
                "actionType": "DECREMENT",
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_quantity_returns_400() -> TestResult {
        let mut repo = MockCartsService::new();

        repo.expect_upsert_cart_line()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidQuantity));

        strict(&mut repo);

        let res = TestClient::post("http://example.com/users/cart")
            .json(&json!({
                "productId": ProductUuid::new().into_uuid(),
                "actionType": "UPDATE",
                "quantity": 0,
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_product_returns_404() -> TestResult {
        let mut repo = MockCartsService::new();

        repo.expect_upsert_cart_line()
            .once()
            .return_once(|_, _| Err(CartsServiceError::ProductNotFound));

        strict(&mut repo);

        let res = TestClient::post("http://example.com/users/cart")
            .json(&json!({
                "productId": ProductUuid::new().into_uuid(),
                "actionType": "INCREMENT",
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_product_id_returns_400() -> TestResult {
        let mut repo = MockCartsService::new();

        repo.expect_upsert_cart_line().never();
        strict(&mut repo);

        let res = TestClient::post("http://example.com/users/cart")
            .json(&json!({
                "productId": "camera",
                "actionType": "INCREMENT",
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
