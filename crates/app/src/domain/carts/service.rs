//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartLineUpsert, UpsertPlan, plan_upsert},
            errors::CartsServiceError,
            records::CartRecord,
            repositories::{PgCartLinesRepository, PgCartsRepository},
        },
        products::{PgProductsRepository, records::ProductUuid},
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    lines_repository: PgCartLinesRepository,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            lines_repository: PgCartLinesRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }

    /// Bump the version when something changed, then reload the full cart.
    async fn finish(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        version: i64,
        changed: bool,
    ) -> Result<CartRecord, CartsServiceError> {
        let header = if changed {
            self.carts_repository
                .bump_version(tx, user, version)
                .await?
                .ok_or(CartsServiceError::NotFound)?
        } else {
            self.carts_repository
                .get_cart(tx, user)
                .await?
                .ok_or(CartsServiceError::NotFound)?
        };

        let lines = self.lines_repository.get_cart_lines(tx, user).await?;

        Ok(CartRecord {
            user_uuid: header.user_uuid,
            version: header.version,
            lines,
            updated_at: header.updated_at,
        })
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let header = self
            .carts_repository
            .get_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let cart = self.finish(&mut tx, user, header.version, false).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn upsert_cart_line(
        &self,
        user: UserUuid,
        upsert: CartLineUpsert,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let header = self
            .carts_repository
            .lock_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let product = self
            .products_repository
            .get_product(&mut tx, upsert.product_uuid)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        let existing = self
            .lines_repository
            .find_cart_line(&mut tx, user, product.uuid)
            .await?;

        match plan_upsert(existing.as_ref(), upsert.action, upsert.quantity)? {
            UpsertPlan::Insert { quantity } => {
                self.lines_repository
                    .create_cart_line(&mut tx, user, &product, quantity)
                    .await?;
            }
            UpsertPlan::SetQuantity { quantity } => {
                self.lines_repository
                    .set_cart_line_quantity(&mut tx, user, product.uuid, quantity)
                    .await?;
            }
        }

        let cart = self.finish(&mut tx, user, header.version, true).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_cart_line(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let header = self
            .carts_repository
            .lock_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let rows_affected = self
            .lines_repository
            .delete_cart_line(&mut tx, user, product)
            .await?;

        let cart = self
            .finish(&mut tx, user, header.version, rows_affected > 0)
            .await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let header = self
            .carts_repository
            .lock_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let rows_affected = self.lines_repository.clear_cart_lines(&mut tx, user).await?;

        let cart = self
            .finish(&mut tx, user, header.version, rows_affected > 0)
            .await?;

        tx.commit().await?;

        Ok(cart)
    }
}

#[automock]
#[async_trait]
/// Cart operations for the authenticated user.
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart.
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Add a product or change its quantity, returning the updated cart.
    async fn upsert_cart_line(
        &self,
        user: UserUuid,
        upsert: CartLineUpsert,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove every line for the product. Absent products are a no-op.
    async fn remove_cart_line(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Empty the cart.
    async fn clear_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;
}
