//! Favourite menu items.

use multicourse_core::MenuItem;
use sqlx::SqlitePool;
use tracing::debug;

use super::menu::MenuItemRow;
use crate::changes::{ChangeFeed, Table};
use crate::error::DbResult;

#[derive(Debug, Clone)]
pub struct FavouriteDao {
    pool: SqlitePool,
    changes: ChangeFeed,
}

impl FavouriteDao {
    pub fn new(pool: SqlitePool, changes: ChangeFeed) -> Self {
        FavouriteDao { pool, changes }
    }

    /// Idempotent.
    pub async fn add(&self, item_id: &str) -> DbResult<()> {
        debug!(item_id, "Adding favourite");
        sqlx::query("INSERT INTO favourites (item_id) VALUES (?1) ON CONFLICT (item_id) DO NOTHING")
            .bind(item_id)
            .execute(&self.pool)
            .await?;
        self.changes.bump(Table::Favourites);
        Ok(())
    }

    pub async fn remove(&self, item_id: &str) -> DbResult<()> {
        debug!(item_id, "Removing favourite");
        sqlx::query("DELETE FROM favourites WHERE item_id = ?1")
            .bind(item_id)
            .execute(&self.pool)
            .await?;
        self.changes.bump(Table::Favourites);
        Ok(())
    }

    pub async fn contains(&self, item_id: &str) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM favourites WHERE item_id = ?1")
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    /// Favourite menu items, oldest first. Items missing from the menu are
    /// skipped.
    pub async fn menu_items(&self) -> DbResult<Vec<MenuItem>> {
        let rows = sqlx::query_as::<_, MenuItemRow>(
            r#"
            SELECT m.id, m.name, m.price, m.description, m.image_url, m.category_id
            FROM favourites f
            INNER JOIN menu_items m ON m.id = f.item_id
            ORDER BY f.added_at, f.item_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(MenuItem::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_support::{catalog, test_db};

    #[tokio::test]
    async fn test_toggle_membership() {
        let db = test_db().await;
        db.catalog().replace(&catalog()).await.unwrap();
        let favourites = db.favourites();

        favourites.add("pepperoni").await.unwrap();
        favourites.add("pepperoni").await.unwrap();
        assert!(favourites.contains("pepperoni").await.unwrap());

        let items = favourites.menu_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Pepperoni");

        favourites.remove("pepperoni").await.unwrap();
        assert!(!favourites.contains("pepperoni").await.unwrap());
        assert!(favourites.menu_items().await.unwrap().is_empty());
    }
}
