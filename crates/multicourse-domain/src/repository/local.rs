//! Repositories backed only by local SQLite storage.

use async_trait::async_trait;
use multicourse_core::{
    CartItem, Category, CoreResult, MenuItem, OrderItem, PriceCurrency,
};
use multicourse_db::{Database, Table};

use super::{CartRepository, Changes, FavouriteRepository, MenuRepository};

/// Cap on full-text search results.
const SEARCH_LIMIT: u32 = 50;

// =============================================================================
// Cart
// =============================================================================

#[derive(Debug, Clone)]
pub struct SqliteCartRepository {
    db: Database,
}

impl SqliteCartRepository {
    pub fn new(db: Database) -> Self {
        SqliteCartRepository { db }
    }
}

#[async_trait]
impl CartRepository for SqliteCartRepository {
    async fn cart_items(&self) -> CoreResult<Vec<CartItem>> {
        Ok(self.db.cart().items().await?)
    }

    async fn cart_item(&self, item_id: &str) -> CoreResult<Option<CartItem>> {
        Ok(self.db.cart().get(item_id).await?)
    }

    async fn line_count(&self) -> CoreResult<usize> {
        let count = self.db.cart().line_count().await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn add(&self, item: &CartItem) -> CoreResult<()> {
        Ok(self
            .db
            .cart()
            .add(&item.item_id, item.count, item.price)
            .await?)
    }

    async fn update_count(&self, item_id: &str, count: i64) -> CoreResult<bool> {
        Ok(self.db.cart().set_count(item_id, count).await?)
    }

    async fn remove(&self, item_id: &str) -> CoreResult<bool> {
        Ok(self.db.cart().remove(item_id).await?)
    }

    async fn clear(&self) -> CoreResult<()> {
        Ok(self.db.cart().clear().await?)
    }

    async fn order_items(&self) -> CoreResult<Vec<OrderItem>> {
        Ok(self.db.cart().order_items().await?)
    }

    fn observe(&self) -> Changes {
        self.db.changes().subscribe(Table::Cart)
    }
}

// =============================================================================
// Favourites
// =============================================================================

#[derive(Debug, Clone)]
pub struct SqliteFavouriteRepository {
    db: Database,
}

impl SqliteFavouriteRepository {
    pub fn new(db: Database) -> Self {
        SqliteFavouriteRepository { db }
    }
}

#[async_trait]
impl FavouriteRepository for SqliteFavouriteRepository {
    async fn add(&self, item_id: &str) -> CoreResult<()> {
        Ok(self.db.favourites().add(item_id).await?)
    }

    async fn remove(&self, item_id: &str) -> CoreResult<()> {
        Ok(self.db.favourites().remove(item_id).await?)
    }

    async fn is_favourite(&self, item_id: &str) -> CoreResult<bool> {
        Ok(self.db.favourites().contains(item_id).await?)
    }

    async fn favourite_items(&self) -> CoreResult<Vec<MenuItem>> {
        Ok(self.db.favourites().menu_items().await?)
    }

    fn observe(&self) -> Changes {
        self.db.changes().subscribe(Table::Favourites)
    }
}

// =============================================================================
// Menu
// =============================================================================

#[derive(Debug, Clone)]
pub struct SqliteMenuRepository {
    db: Database,
}

impl SqliteMenuRepository {
    pub fn new(db: Database) -> Self {
        SqliteMenuRepository { db }
    }
}

#[async_trait]
impl MenuRepository for SqliteMenuRepository {
    async fn categories(&self) -> CoreResult<Vec<Category>> {
        Ok(self.db.catalog().non_empty_categories().await?)
    }

    async fn menu_by_category(&self, category_id: &str) -> CoreResult<Vec<MenuItem>> {
        Ok(self.db.menu().by_category(category_id).await?)
    }

    async fn menu_list(&self) -> CoreResult<Vec<MenuItem>> {
        Ok(self.db.menu().all().await?)
    }

    async fn search_by_name(&self, query: &str) -> CoreResult<Vec<MenuItem>> {
        Ok(self.db.menu().search_by_name(query, SEARCH_LIMIT).await?)
    }

    async fn menu_item(&self, id: &str) -> CoreResult<MenuItem> {
        Ok(self.db.menu().by_id(id).await?)
    }

    /// Currency of the last known restaurant status; empty before first sync.
    async fn price_currency(&self) -> CoreResult<PriceCurrency> {
        let info = self.db.restaurant().info().await?.unwrap_or_default();
        Ok(PriceCurrency {
            name: info.currency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multicourse_core::{
        AboutInfo, CoreError, Money, RestaurantData, RestaurantInfo,
    };
    use multicourse_db::DbConfig;

    async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let item = |id: &str, name: &str, category: &str, price: i64| MenuItem {
            id: id.into(),
            name: name.into(),
            price: Money::from_minor(price),
            description: None,
            image_url: None,
            category_id: category.into(),
        };
        let data = RestaurantData {
            categories: vec![
                Category {
                    id: "pizza".into(),
                    name: "Pizza".into(),
                    sort_order: 1,
                },
                Category {
                    id: "empty".into(),
                    name: "Soon".into(),
                    sort_order: 2,
                },
            ],
            menu: vec![
                item("margherita", "Margherita", "pizza", 18950),
                item("pepperoni", "Pepperoni", "pizza", 21900),
            ],
            about: AboutInfo::default(),
            info: RestaurantInfo {
                can_order: true,
                currency: "UAH".into(),
            },
        };
        db.catalog().replace(&data).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_menu_repository_reads_catalog() {
        let menu = SqliteMenuRepository::new(seeded_db().await);

        let categories = menu.categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, "pizza");

        assert_eq!(menu.price_currency().await.unwrap().name, "UAH");
        assert_eq!(menu.search_by_name("pep").await.unwrap()[0].id, "pepperoni");

        let err = menu.menu_item("calzone").await.unwrap_err();
        assert_eq!(err, CoreError::MenuItemNotFound("calzone".into()));
    }

    #[tokio::test]
    async fn test_cart_repository_notifies_observers() {
        let cart = SqliteCartRepository::new(seeded_db().await);
        let mut changes = cart.observe();

        cart.add(&CartItem::new("margherita", 2, Money::from_minor(18950)))
            .await
            .unwrap();

        changes.changed().await.unwrap();
        let items = cart.order_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].menu_item.name, "Margherita");
        assert_eq!(cart.line_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_favourite_repository_round_trip() {
        let favourites = SqliteFavouriteRepository::new(seeded_db().await);

        favourites.add("pepperoni").await.unwrap();
        assert!(favourites.is_favourite("pepperoni").await.unwrap());
        assert_eq!(favourites.favourite_items().await.unwrap().len(), 1);

        favourites.remove("pepperoni").await.unwrap();
        assert!(!favourites.is_favourite("pepperoni").await.unwrap());
    }
}
