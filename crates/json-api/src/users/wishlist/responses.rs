//! Wishlist Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::wishlists::records::WishlistRecord;

/// The caller's wishlist.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistResponse {
    /// Product ids in the order they were added
    pub wishlist: Vec<Uuid>,
}

impl From<WishlistRecord> for WishlistResponse {
    fn from(wishlist: WishlistRecord) -> Self {
        Self {
            wishlist: wishlist.product_uuids().map(Into::into).collect(),
        }
    }
}
