//! Add To Wishlist Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    users::wishlist::{errors::into_status_error, responses::WishlistResponse},
};

/// Add To Wishlist Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddToWishlistRequest {
    pub product_id: Uuid,
}

/// Add To Wishlist Handler
#[endpoint(
    tags("wishlist"),
    summary = "Add Product to Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated wishlist"),
        (status_code = StatusCode::BAD_REQUEST, description = "Product already in wishlist"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "User or product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "wishlist.add",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddToWishlistRequest>,
    depot: &mut Depot,
) -> Result<Json<WishlistResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let product = json.into_inner().product_id;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(product));

    let wishlist = state
        .app
        .wishlists
        .add_to_wishlist(user, product.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(items = wishlist.items.len(), "added product to wishlist");

    Ok(Json(wishlist.into()))
}
