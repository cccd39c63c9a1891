//! Order Lines Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    orders::records::{OrderLineRecord, OrderUuid},
    products::records::ProductUuid,
};

const CREATE_ORDER_LINE_SQL: &str = include_str!("../sql/create_order_line.sql");
const GET_ORDER_LINES_SQL: &str = include_str!("../sql/get_order_lines.sql");

/// A stored line tagged with the order it belongs to.
#[derive(Debug, Clone)]
pub(crate) struct OrderLineRow {
    pub(crate) order_uuid: OrderUuid,
    pub(crate) line: OrderLineRecord,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderLinesRepository;

impl PgOrderLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert lines keeping their order via an explicit position.
    pub(crate) async fn create_order_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        lines: &[OrderLineRecord],
    ) -> Result<(), sqlx::Error> {
        for (position, line) in lines.iter().enumerate() {
            let position =
                i32::try_from(position).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
            let quantity =
                i32::try_from(line.quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

            query(CREATE_ORDER_LINE_SQL)
                .bind(order.into_uuid())
                .bind(position)
                .bind(line.product_uuid.into_uuid())
                .bind(&line.product_name)
                .bind(&line.product_image)
                .bind(quantity)
                .bind(line.price)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    /// Lines for every given order, grouped by order and in position order.
    pub(crate) async fn get_order_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderLineRow>, sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().map(|order| order.into_uuid()).collect();

        query_as::<Postgres, OrderLineRow>(GET_ORDER_LINES_SQL)
            .bind(uuids.as_slice())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLineRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity_i32: i32 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            line: OrderLineRecord {
                product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
                product_name: row.try_get("product_name")?,
                product_image: row.try_get("product_image")?,
                quantity,
                price: row.try_get("price")?,
            },
        })
    }
}
