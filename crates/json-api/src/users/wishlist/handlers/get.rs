//! Get Wishlist Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    users::wishlist::{errors::into_status_error, responses::WishlistResponse},
};

/// Get Wishlist Handler
#[endpoint(
    tags("wishlist"),
    summary = "Get Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Wishlist of the caller"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<WishlistResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let wishlist = state
        .app
        .wishlists
        .get_wishlist(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(wishlist.into()))
}
