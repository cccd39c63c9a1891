//! Wishlist Records

use jiff::Timestamp;

use crate::domain::{products::records::ProductUuid, users::records::UserUuid};

/// A user's wishlist, in the order products were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistRecord {
    pub user_uuid: UserUuid,
    pub items: Vec<WishlistItemRecord>,
}

impl WishlistRecord {
    /// Product ids in insertion order.
    pub fn product_uuids(&self) -> impl Iterator<Item = ProductUuid> + '_ {
        self.items.iter().map(|item| item.product_uuid)
    }

    #[must_use]
    pub fn contains(&self, product: ProductUuid) -> bool {
        self.product_uuids().any(|uuid| uuid == product)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WishlistItemRecord {
    pub product_uuid: ProductUuid,
    pub created_at: Timestamp,
}
