//! Orders service.

use std::collections::HashMap;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        carts::{PgCartLinesRepository, PgCartsRepository},
        orders::{
            data::{CheckoutDetails, NewOrder},
            errors::OrdersServiceError,
            records::{OrderLineRecord, OrderRecord, OrderUuid, RequestedStatus},
            repositories::{PgOrderLinesRepository, PgOrdersRepository},
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    lines_repository: PgOrderLinesRepository,
    carts_repository: PgCartsRepository,
    cart_lines_repository: PgCartLinesRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            lines_repository: PgOrderLinesRepository::new(),
            carts_repository: PgCartsRepository::new(),
            cart_lines_repository: PgCartLinesRepository::new(),
        }
    }

    async fn lines_by_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<HashMap<OrderUuid, Vec<OrderLineRecord>>, OrdersServiceError> {
        let rows = self.lines_repository.get_order_lines(tx, orders).await?;

        let mut grouped: HashMap<OrderUuid, Vec<OrderLineRecord>> = HashMap::new();

        for row in rows {
            grouped.entry(row.order_uuid).or_default().push(row.line);
        }

        Ok(grouped)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows = self.orders_repository.list_orders(&mut tx, user).await?;

        let uuids: Vec<OrderUuid> = rows.iter().map(|row| row.uuid()).collect();

        let mut lines = self.lines_by_order(&mut tx, &uuids).await?;

        tx.commit().await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let order_lines = lines.remove(&row.uuid()).unwrap_or_default();

                row.into_record(order_lines)
            })
            .collect())
    }

    async fn create_order(
        &self,
        user: UserUuid,
        details: CheckoutDetails,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self
            .carts_repository
            .lock_cart(&mut tx, user)
            .await?
            .ok_or(OrdersServiceError::UserNotFound)?;

        let cart_lines = self
            .cart_lines_repository
            .get_cart_lines(&mut tx, user)
            .await?;

        let order = NewOrder::from_cart(user, details, &cart_lines)?;

        let row = self.orders_repository.create_order(&mut tx, &order).await?;

        self.lines_repository
            .create_order_lines(&mut tx, row.uuid(), &order.lines)
            .await?;

        self.cart_lines_repository
            .clear_cart_lines(&mut tx, user)
            .await?;

        // Compare-and-swap against the version read under the lock.
        self.carts_repository
            .bump_version(&mut tx, user, cart.version)
            .await?
            .ok_or(OrdersServiceError::CartChanged)?;

        tx.commit().await?;

        debug!(order = %row.uuid(), total = %order.total_price, "order created");

        Ok(row.into_record(order.lines))
    }

    async fn update_order_status(
        &self,
        caller: UserUuid,
        order: OrderUuid,
        status: RequestedStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let current = self
            .orders_repository
            .lock_order(&mut tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        if current.user_uuid() != caller {
            return Err(OrdersServiceError::Forbidden);
        }

        let status = status.map_err(OrdersServiceError::InvalidStatus)?;

        let from = current.status();

        if !from.can_transition_to(status) {
            return Err(OrdersServiceError::InvalidTransition { from, to: status });
        }

        let row = if from == status {
            current
        } else {
            self.orders_repository
                .set_order_status(&mut tx, order, status)
                .await?
        };

        let lines = self
            .lines_by_order(&mut tx, &[order])
            .await?
            .remove(&order)
            .unwrap_or_default();

        tx.commit().await?;

        Ok(row.into_record(lines))
    }
}

#[automock]
#[async_trait]
/// Checkout and order lifecycle.
pub trait OrdersService: Send + Sync {
    /// All orders placed by the user, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Convert the user's cart into a pending order and drain the cart atomically.
    async fn create_order(
        &self,
        user: UserUuid,
        details: CheckoutDetails,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Move an order owned by `caller` to a new status.
    ///
    /// A missing order wins over a foreign one, which wins over an unknown status.
    async fn update_order_status(
        &self,
        caller: UserUuid,
        order: OrderUuid,
        status: RequestedStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
