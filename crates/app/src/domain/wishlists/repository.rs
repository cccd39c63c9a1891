//! Wishlists Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    products::records::ProductUuid, users::records::UserUuid,
    wishlists::records::WishlistItemRecord,
};

const GET_WISHLIST_ITEMS_SQL: &str = include_str!("sql/get_wishlist_items.sql");
const ADD_WISHLIST_ITEM_SQL: &str = include_str!("sql/add_wishlist_item.sql");
const DELETE_WISHLIST_ITEM_SQL: &str = include_str!("sql/delete_wishlist_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgWishlistsRepository;

impl PgWishlistsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_wishlist_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<WishlistItemRecord>, sqlx::Error> {
        query_as::<Postgres, WishlistItemRecord>(GET_WISHLIST_ITEMS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Returns the number of rows inserted; zero when the product was already present.
    pub(crate) async fn add_wishlist_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let result = query(ADD_WISHLIST_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }

    pub(crate) async fn delete_wishlist_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let result = query(DELETE_WISHLIST_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }
}

impl<'r> FromRow<'r, PgRow> for WishlistItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
