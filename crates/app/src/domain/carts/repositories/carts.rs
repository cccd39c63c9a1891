//! Carts Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::users::records::UserUuid;

const LOCK_CART_SQL: &str = include_str!("../sql/lock_cart.sql");
const GET_CART_SQL: &str = include_str!("../sql/get_cart.sql");
const BUMP_CART_VERSION_SQL: &str = include_str!("../sql/bump_cart_version.sql");

/// The cart row without its lines.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CartHeader {
    pub(crate) user_uuid: UserUuid,
    pub(crate) version: i64,
    pub(crate) updated_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Row-lock the user's cart for the rest of the transaction.
    pub(crate) async fn lock_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<CartHeader>, sqlx::Error> {
        query_as::<Postgres, CartHeader>(LOCK_CART_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<CartHeader>, sqlx::Error> {
        query_as::<Postgres, CartHeader>(GET_CART_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Compare-and-swap the version stamp. `None` means another writer got there first.
    pub(crate) async fn bump_version(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        expected_version: i64,
    ) -> Result<Option<CartHeader>, sqlx::Error> {
        query_as::<Postgres, CartHeader>(BUMP_CART_VERSION_SQL)
            .bind(user.into_uuid())
            .bind(expected_version)
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CartHeader {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            version: row.try_get("version")?,
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
