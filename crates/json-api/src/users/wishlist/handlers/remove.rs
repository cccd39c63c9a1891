//! Remove From Wishlist Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    users::wishlist::{errors::into_status_error, responses::WishlistResponse},
};

/// Remove From Wishlist Handler
///
/// Products not on the wishlist are ignored.
#[endpoint(
    tags("wishlist"),
    summary = "Remove Product from Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated wishlist"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "wishlist.remove",
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
) -> Result<Json<WishlistResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let product = product.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(product));

    let wishlist = state
        .app
        .wishlists
        .remove_from_wishlist(user, product.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(wishlist.into()))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::{
        products::records::ProductUuid,
        wishlists::{MockWishlistsService, WishlistsServiceError},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, make_wishlist, wishlists_service};

    use super::*;

    fn make_service(repo: MockWishlistsService) -> Service {
        wishlists_service(
            repo,
            Router::with_path("users/wishlist/{product}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_remove_returns_remaining_products() -> TestResult {
        let mut repo = MockWishlistsService::new();
        let removed = ProductUuid::new();
        let kept = ProductUuid::new();

        repo.expect_remove_from_wishlist()
            .once()
            .withf(move |user, p| *user == TEST_USER_UUID && *p == removed)
            .return_once(move |_, _| Ok(make_wishlist(&[kept])));

        repo.expect_get_wishlist().never();
        repo.expect_add_to_wishlist().never();

        let mut res = TestClient::delete(format!("http://example.com/users/wishlist/{removed}"))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: WishlistResponse = res.take_json().await?;

        assert_eq!(body.wishlist, vec![kept.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_missing_user_returns_404() -> TestResult {
        let mut repo = MockWishlistsService::new();

        repo.expect_remove_from_wishlist()
            .once()
            .return_once(|_, _| Err(WishlistsServiceError::NotFound));

        repo.expect_get_wishlist().never();
        repo.expect_add_to_wishlist().never();

        let res = TestClient::delete(format!(
            "http://example.com/users/wishlist/{}",
            ProductUuid::new()
        ))
        .send(&make_service(repo))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
