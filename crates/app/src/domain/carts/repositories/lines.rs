//! Cart Lines Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    carts::records::CartLineRecord,
    products::records::{ProductRecord, ProductUuid},
    users::records::UserUuid,
};

const GET_CART_LINES_SQL: &str = include_str!("../sql/get_cart_lines.sql");
const FIND_CART_LINE_SQL: &str = include_str!("../sql/find_cart_line.sql");
const CREATE_CART_LINE_SQL: &str = include_str!("../sql/create_cart_line.sql");
const SET_CART_LINE_QUANTITY_SQL: &str = include_str!("../sql/set_cart_line_quantity.sql");
const DELETE_CART_LINE_SQL: &str = include_str!("../sql/delete_cart_line.sql");
const CLEAR_CART_LINES_SQL: &str = include_str!("../sql/clear_cart_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartLinesRepository;

impl PgCartLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(GET_CART_LINES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_cart_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<Option<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(FIND_CART_LINE_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Insert a line, snapshotting the product's current name, image, and price.
    pub(crate) async fn create_cart_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: &ProductRecord,
        quantity: u32,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_CART_LINE_SQL)
            .bind(user.into_uuid())
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(product.primary_image())
            .bind(encode_quantity(quantity)?)
            .bind(product.price)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn set_cart_line_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_CART_LINE_QUANTITY_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .bind(encode_quantity(quantity)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_LINE_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_LINES_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn encode_quantity(quantity: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

impl<'r> FromRow<'r, PgRow> for CartLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity_i32: i32 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            product_image: row.try_get("product_image")?,
            quantity,
            price: row.try_get("price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
