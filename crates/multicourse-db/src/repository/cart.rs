//! # Cart DAO
//!
//! Cart lines keyed by menu item id.
//!
//! ## Invariant
//! `count >= 1` is enforced by a CHECK constraint; callers validate first,
//! the constraint is the last line.
//!
//! Every successful write bumps [`Table::Cart`] so observers of
//! [`CartDao::order_items`] re-query.

use multicourse_core::{CartItem, MenuItem, Money, OrderItem};
use sqlx::SqlitePool;
use tracing::debug;

use crate::changes::{ChangeFeed, Table};
use crate::error::DbResult;

#[derive(Debug, sqlx::FromRow)]
struct CartItemRow {
    item_id: String,
    count: i64,
    price: i64,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        CartItem::new(row.item_id, row.count, Money::from_minor(row.price))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    count: i64,
    line_price: i64,
    id: String,
    name: String,
    price: i64,
    description: Option<String>,
    image_url: Option<String>,
    category_id: String,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        OrderItem {
            menu_item: MenuItem {
                id: row.id,
                name: row.name,
                price: Money::from_minor(row.price),
                description: row.description,
                image_url: row.image_url,
                category_id: row.category_id,
            },
            count: row.count,
            price: Money::from_minor(row.line_price),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CartDao {
    pool: SqlitePool,
    changes: ChangeFeed,
}

impl CartDao {
    pub fn new(pool: SqlitePool, changes: ChangeFeed) -> Self {
        CartDao { pool, changes }
    }

    /// Cart lines in the order they were added.
    pub async fn items(&self) -> DbResult<Vec<CartItem>> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            "SELECT item_id, count, price FROM cart_items ORDER BY added_at, item_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(CartItem::from).collect())
    }

    pub async fn get(&self, item_id: &str) -> DbResult<Option<CartItem>> {
        let row = sqlx::query_as::<_, CartItemRow>(
            "SELECT item_id, count, price FROM cart_items WHERE item_id = ?1",
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(CartItem::from))
    }

    /// Number of distinct lines.
    pub async fn line_count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart_items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Adds `count` units; an existing line is merged by summing counts and
    /// takes the newest unit price.
    pub async fn add(&self, item_id: &str, count: i64, price: Money) -> DbResult<()> {
        debug!(item_id, count, "Adding to cart");
        sqlx::query(
            r#"
            INSERT INTO cart_items (item_id, count, price) VALUES (?1, ?2, ?3)
            ON CONFLICT (item_id) DO UPDATE SET count = count + excluded.count,
                                                price = excluded.price
            "#,
        )
        .bind(item_id)
        .bind(count)
        .bind(price.minor())
        .execute(&self.pool)
        .await?;

        self.changes.bump(Table::Cart);
        Ok(())
    }

    /// Sets the quantity of an existing line. Returns false if no such line.
    pub async fn set_count(&self, item_id: &str, count: i64) -> DbResult<bool> {
        debug!(item_id, count, "Updating cart line");
        let result = sqlx::query("UPDATE cart_items SET count = ?2 WHERE item_id = ?1")
            .bind(item_id)
            .bind(count)
            .execute(&self.pool)
            .await?;

        let updated = result.rows_affected() > 0;
        if updated {
            self.changes.bump(Table::Cart);
        }
        Ok(updated)
    }

    pub async fn remove(&self, item_id: &str) -> DbResult<bool> {
        debug!(item_id, "Removing from cart");
        let result = sqlx::query("DELETE FROM cart_items WHERE item_id = ?1")
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            self.changes.bump(Table::Cart);
        }
        Ok(removed)
    }

    pub async fn clear(&self) -> DbResult<()> {
        debug!("Clearing cart");
        sqlx::query("DELETE FROM cart_items")
            .execute(&self.pool)
            .await?;
        self.changes.bump(Table::Cart);
        Ok(())
    }

    /// Cart lines joined with their menu items.
    ///
    /// Lines whose menu item no longer exists are omitted.
    pub async fn order_items(&self) -> DbResult<Vec<OrderItem>> {
        let rows = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT c.count, c.price AS line_price,
                   m.id, m.name, m.price, m.description, m.image_url, m.category_id
            FROM cart_items c
            INNER JOIN menu_items m ON m.id = c.item_id
            ORDER BY c.added_at, c.item_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(OrderItem::from).collect())
    }
}
