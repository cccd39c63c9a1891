//! Orders Repository

use std::str::FromStr;

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    orders::{
        data::NewOrder,
        records::{
            OrderLineRecord, OrderRecord, OrderStatus, OrderUuid, PaymentMethod, ShippingAddress,
            ShippingMethod,
        },
    },
    users::records::UserUuid,
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("../sql/lock_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const SET_ORDER_STATUS_SQL: &str = include_str!("../sql/set_order_status.sql");

/// An order row without its lines.
#[derive(Debug, Clone)]
pub(crate) struct OrderRow {
    uuid: OrderUuid,
    user_uuid: UserUuid,
    email: String,
    first_name: String,
    last_name: String,
    total_price: Decimal,
    status: OrderStatus,
    shipping_address: ShippingAddress,
    payment_method: PaymentMethod,
    shipping_method: ShippingMethod,
    use_shipping_as_billing: bool,
    newsletter_subscribed: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl OrderRow {
    pub(crate) fn uuid(&self) -> OrderUuid {
        self.uuid
    }

    pub(crate) fn user_uuid(&self) -> UserUuid {
        self.user_uuid
    }

    pub(crate) fn status(&self) -> OrderStatus {
        self.status
    }

    pub(crate) fn into_record(self, lines: Vec<OrderLineRecord>) -> OrderRecord {
        OrderRecord {
            uuid: self.uuid,
            user_uuid: self.user_uuid,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            lines,
            total_price: self.total_price,
            status: self.status,
            shipping_address: self.shipping_address,
            payment_method: self.payment_method,
            shipping_method: self.shipping_method,
            use_shipping_as_billing: self.use_shipping_as_billing,
            newsletter_subscribed: self.newsletter_subscribed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
    ) -> Result<OrderRow, sqlx::Error> {
        let address = &order.shipping_address;

        query_as::<Postgres, OrderRow>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.user_uuid.into_uuid())
            .bind(&order.email)
            .bind(&order.first_name)
            .bind(&order.last_name)
            .bind(order.total_price)
            .bind(order.status.as_str())
            .bind(&address.street_address)
            .bind(address.apartment.as_deref())
            .bind(&address.city)
            .bind(&address.state)
            .bind(&address.postal_code)
            .bind(&address.country)
            .bind(order.payment_method.as_str())
            .bind(order.shipping_method.as_str())
            .bind(order.use_shipping_as_billing)
            .bind(order.newsletter_subscribed)
            .fetch_one(&mut **tx)
            .await
    }

    /// Row-lock an order for a status change.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Option<OrderRow>, sqlx::Error> {
        query_as::<Postgres, OrderRow>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Newest first.
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRow>, sqlx::Error> {
        query_as::<Postgres, OrderRow>(LIST_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn set_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRow, sqlx::Error> {
        query_as::<Postgres, OrderRow>(SET_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

fn decode_enum<T>(row: &PgRow, column: &str) -> sqlx::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value: String = row.try_get(column)?;

    value.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            email: row.try_get("email")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            total_price: row.try_get("total_price")?,
            status: decode_enum(row, "order_status")?,
            shipping_address: ShippingAddress {
                street_address: row.try_get("street_address")?,
                apartment: row.try_get("apartment")?,
                city: row.try_get("city")?,
                state: row.try_get("state")?,
                postal_code: row.try_get("postal_code")?,
                country: row.try_get("country")?,
            },
            payment_method: decode_enum(row, "payment_method")?,
            shipping_method: decode_enum(row, "shipping_method")?,
            use_shipping_as_billing: row.try_get("use_shipping_as_billing")?,
            newsletter_subscribed: row.try_get("newsletter_subscribed")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
