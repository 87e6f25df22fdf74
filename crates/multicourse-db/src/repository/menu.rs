//! # Menu DAO
//!
//! Read access to menu items. Writes happen only through
//! [`CatalogDao::replace`](super::catalog::CatalogDao::replace).
//!
//! ## FTS5 Search
//! ```text
//! User types: "pep mar"
//!      │
//!      ▼
//! name : "pep"* AND name : "mar"*     ← every token is a quoted prefix
//!      │
//!      ▼
//! menu_items_fts ⋈ menu_items ON rowid, ordered by rank
//! ```

use multicourse_core::{MenuItem, Money};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Row shape of `menu_items`.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MenuItemRow {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: String,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            name: row.name,
            price: Money::from_minor(row.price),
            description: row.description,
            image_url: row.image_url,
            category_id: row.category_id,
        }
    }
}

const SELECT_COLUMNS: &str =
    "SELECT m.id, m.name, m.price, m.description, m.image_url, m.category_id FROM menu_items m";

/// Turns free text into an FTS5 expression that cannot break MATCH syntax.
fn fts_name_query(query: &str) -> Option<String> {
    let terms: Vec<String> = query
        .split_whitespace()
        .map(|t| format!("name : \"{}\"*", t.replace('"', "\"\"")))
        .collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" AND "))
    }
}

#[derive(Debug, Clone)]
pub struct MenuDao {
    pool: SqlitePool,
}

impl MenuDao {
    pub fn new(pool: SqlitePool) -> Self {
        MenuDao { pool }
    }

    /// Whole menu, by name.
    pub async fn all(&self) -> DbResult<Vec<MenuItem>> {
        let rows = sqlx::query_as::<_, MenuItemRow>(&format!("{SELECT_COLUMNS} ORDER BY m.name"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    pub async fn by_category(&self, category_id: &str) -> DbResult<Vec<MenuItem>> {
        debug!(category_id, "Loading menu for category");
        let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
            "{SELECT_COLUMNS} WHERE m.category_id = ?1 ORDER BY m.name"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    /// ## Errors
    /// `DbError::NotFound` with entity `MenuItem` when the id is unknown.
    pub async fn by_id(&self, id: &str) -> DbResult<MenuItem> {
        sqlx::query_as::<_, MenuItemRow>(&format!("{SELECT_COLUMNS} WHERE m.id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(MenuItem::from)
            .ok_or_else(|| DbError::not_found("MenuItem", id))
    }

    /// Prefix search over item names. Blank queries return nothing.
    pub async fn search_by_name(&self, query: &str, limit: u32) -> DbResult<Vec<MenuItem>> {
        let Some(fts_query) = fts_name_query(query) else {
            return Ok(Vec::new());
        };

        debug!(query = %query, fts = %fts_query, "Searching menu");

        let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
            "{SELECT_COLUMNS} \
             INNER JOIN menu_items_fts ON m.rowid = menu_items_fts.rowid \
             WHERE menu_items_fts MATCH ?1 \
             ORDER BY menu_items_fts.rank \
             LIMIT ?2"
        ))
        .bind(&fts_query)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Search returned menu items");
        Ok(rows.into_iter().map(MenuItem::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{catalog, menu_item, test_db};

    #[test]
    fn test_fts_query_quotes_terms() {
        assert_eq!(fts_name_query("  "), None);
        assert_eq!(
            fts_name_query("pep mar").unwrap(),
            "name : \"pep\"* AND name : \"mar\"*"
        );
        assert_eq!(
            fts_name_query("4\"cheese").unwrap(),
            "name : \"4\"\"cheese\"*"
        );
    }

    #[tokio::test]
    async fn test_by_category_and_by_id() {
        let db = test_db().await;
        db.catalog().replace(&catalog()).await.unwrap();

        let pizzas = db.menu().by_category("pizza").await.unwrap();
        assert_eq!(pizzas.len(), 2);
        assert_eq!(pizzas[0].name, "Margherita");

        let item = db.menu().by_id("cola").await.unwrap();
        assert_eq!(item.price, Money::from_minor(4500));

        let missing = db.menu().by_id("nope").await.unwrap_err();
        assert!(matches!(missing, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_search_by_name_prefix() {
        let db = test_db().await;
        db.catalog().replace(&catalog()).await.unwrap();

        let found = db.menu().search_by_name("pep", 20).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "pepperoni");

        // Description text is not searched.
        let found = db.menu().search_by_name("tomato", 20).await.unwrap();
        assert!(found.is_empty());

        assert!(db.menu().search_by_name("", 20).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_follows_catalog_replace() {
        let db = test_db().await;
        db.catalog().replace(&catalog()).await.unwrap();

        let mut next = catalog();
        next.menu = vec![menu_item("calzone", "Calzone", "pizza", 21000)];
        db.catalog().replace(&next).await.unwrap();

        assert!(db.menu().search_by_name("pep", 20).await.unwrap().is_empty());
        assert_eq!(db.menu().search_by_name("calz", 20).await.unwrap().len(), 1);
        assert_eq!(db.menu().all().await.unwrap().len(), 1);
    }
}
