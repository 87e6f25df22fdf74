//! # Catalog DAO
//!
//! Categories plus the wholesale replacement performed by a sync.
//!
//! ## Replace Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   SINGLE TRANSACTION                                    │
//! │                                                                         │
//! │  1. DELETE FROM menu_items; DELETE FROM categories                      │
//! │  2. INSERT every category and menu item from the snapshot               │
//! │  3. UPSERT restaurant_info (id = 1), about_info (id = 1)                │
//! │                                                                         │
//! │  COMMIT ← readers never observe a half-synced menu                      │
//! │  bump(Catalog)                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart lines and favourites are left alone. Lines whose item vanished from
//! the menu simply drop out of joined queries.

use multicourse_core::{Category, RestaurantData};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::changes::{ChangeFeed, Table};
use crate::error::DbResult;

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    sort_order: i64,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            sort_order: row.sort_order,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogDao {
    pool: SqlitePool,
    changes: ChangeFeed,
}

impl CatalogDao {
    pub fn new(pool: SqlitePool, changes: ChangeFeed) -> Self {
        CatalogDao { pool, changes }
    }

    /// All categories in display order.
    pub async fn categories(&self) -> DbResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, sort_order FROM categories ORDER BY sort_order, name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Categories that contain at least one menu item, in display order.
    pub async fn non_empty_categories(&self) -> DbResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT c.id, c.name, c.sort_order
            FROM categories c
            WHERE EXISTS (SELECT 1 FROM menu_items m WHERE m.category_id = c.id)
            ORDER BY c.sort_order, c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Replaces the whole catalog with `data` in one transaction.
    pub async fn replace(&self, data: &RestaurantData) -> DbResult<()> {
        info!(
            categories = data.categories.len(),
            items = data.menu.len(),
            "Replacing catalog"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM menu_items")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM categories")
            .execute(&mut *tx)
            .await?;

        for category in &data.categories {
            sqlx::query("INSERT INTO categories (id, name, sort_order) VALUES (?1, ?2, ?3)")
                .bind(&category.id)
                .bind(&category.name)
                .bind(category.sort_order)
                .execute(&mut *tx)
                .await?;
        }

        for item in &data.menu {
            sqlx::query(
                r#"
                INSERT INTO menu_items (id, name, price, description, image_url, category_id)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(&item.id)
            .bind(&item.name)
            .bind(item.price.minor())
            .bind(&item.description)
            .bind(&item.image_url)
            .bind(&item.category_id)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO restaurant_info (id, can_order, currency) VALUES (1, ?1, ?2)
            ON CONFLICT (id) DO UPDATE SET can_order = excluded.can_order,
                                           currency = excluded.currency
            "#,
        )
        .bind(data.info.can_order)
        .bind(&data.info.currency)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO about_info (id, address, phone, latitude, longitude)
            VALUES (1, ?1, ?2, ?3, ?4)
            ON CONFLICT (id) DO UPDATE SET address = excluded.address,
                                           phone = excluded.phone,
                                           latitude = excluded.latitude,
                                           longitude = excluded.longitude
            "#,
        )
        .bind(&data.about.address)
        .bind(&data.about.phone)
        .bind(data.about.latitude)
        .bind(data.about.longitude)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!("Catalog replaced");

        self.changes.bump(Table::Catalog);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{catalog, test_db};
    use multicourse_core::{Category, Money};

    #[tokio::test]
    async fn test_replace_populates_every_table() {
        let db = test_db().await;
        db.catalog().replace(&catalog()).await.unwrap();

        let categories = db.catalog().categories().await.unwrap();
        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Pizza", "Drinks", "Desserts"]);

        let info = db.restaurant().info().await.unwrap().unwrap();
        assert!(info.can_order);
        assert_eq!(info.currency, "UAH");

        let about = db.restaurant().about().await.unwrap().unwrap();
        assert_eq!(about.phone, "+380671234567");
        assert_eq!(db.changes().version(Table::Catalog), 1);
    }

    #[tokio::test]
    async fn test_non_empty_categories_skip_empty_ones() {
        let db = test_db().await;
        db.catalog().replace(&catalog()).await.unwrap();

        let categories = db.catalog().non_empty_categories().await.unwrap();
        let ids: Vec<_> = categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["pizza", "drinks"]);
    }

    #[tokio::test]
    async fn test_replace_keeps_cart_lines() {
        let db = test_db().await;
        db.catalog().replace(&catalog()).await.unwrap();
        db.cart()
            .add("cola", 2, Money::from_minor(4500))
            .await
            .unwrap();

        let mut next = catalog();
        next.categories.push(Category {
            id: "salads".into(),
            name: "Salads".into(),
            sort_order: 9,
        });
        db.catalog().replace(&next).await.unwrap();

        assert_eq!(db.cart().items().await.unwrap().len(), 1);
        assert_eq!(db.catalog().categories().await.unwrap().len(), 4);
    }
}
