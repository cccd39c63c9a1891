//! Wishlists service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        products::records::ProductUuid,
        users::{PgUsersRepository, records::UserUuid},
        wishlists::{
            errors::WishlistsServiceError, records::WishlistRecord,
            repository::PgWishlistsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgWishlistsService {
    db: Db,
    repository: PgWishlistsRepository,
    users_repository: PgUsersRepository,
}

impl PgWishlistsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgWishlistsRepository::new(),
            users_repository: PgUsersRepository::new(),
        }
    }

    async fn ensure_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<(), WishlistsServiceError> {
        if self.users_repository.user_exists(tx, user).await? {
            Ok(())
        } else {
            Err(WishlistsServiceError::NotFound)
        }
    }

    async fn load(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<WishlistRecord, WishlistsServiceError> {
        let items = self.repository.get_wishlist_items(tx, user).await?;

        Ok(WishlistRecord {
            user_uuid: user,
            items,
        })
    }
}

#[async_trait]
impl WishlistsService for PgWishlistsService {
    async fn get_wishlist(&self, user: UserUuid) -> Result<WishlistRecord, WishlistsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.ensure_user(&mut tx, user).await?;

        let wishlist = self.load(&mut tx, user).await?;

        tx.commit().await?;

        Ok(wishlist)
    }

    async fn add_to_wishlist(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<WishlistRecord, WishlistsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.ensure_user(&mut tx, user).await?;

        let inserted = self
            .repository
            .add_wishlist_item(&mut tx, user, product)
            .await?;

        if inserted == 0 {
            return Err(WishlistsServiceError::AlreadyExists);
        }

        let wishlist = self.load(&mut tx, user).await?;

        tx.commit().await?;

        Ok(wishlist)
    }

    async fn remove_from_wishlist(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<WishlistRecord, WishlistsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.ensure_user(&mut tx, user).await?;

        self.repository
            .delete_wishlist_item(&mut tx, user, product)
            .await?;

        let wishlist = self.load(&mut tx, user).await?;

        tx.commit().await?;

        Ok(wishlist)
    }
}

#[automock]
#[async_trait]
/// Wishlist operations for the authenticated user.
pub trait WishlistsService: Send + Sync {
    /// Retrieve the user's wishlist.
    async fn get_wishlist(&self, user: UserUuid) -> Result<WishlistRecord, WishlistsServiceError>;

    /// Append a product; fails when it is already present.
    async fn add_to_wishlist(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<WishlistRecord, WishlistsServiceError>;

    /// Remove a product. Absent products are a no-op.
    async fn remove_from_wishlist(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<WishlistRecord, WishlistsServiceError>;
}
