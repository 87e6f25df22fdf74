//! Favourite list use cases.

use std::sync::Arc;

use multicourse_core::{CoreResult, MenuItem};

use crate::repository::{Changes, FavouriteRepository};

#[derive(Clone)]
pub struct AddToFavouriteUseCase {
    favourites: Arc<dyn FavouriteRepository>,
}

impl AddToFavouriteUseCase {
    pub fn new(favourites: Arc<dyn FavouriteRepository>) -> Self {
        AddToFavouriteUseCase { favourites }
    }

    pub async fn execute(&self, item_id: &str) -> CoreResult<()> {
        self.favourites.add(item_id).await
    }
}

#[derive(Clone)]
pub struct RemoveFromFavouriteUseCase {
    favourites: Arc<dyn FavouriteRepository>,
}

impl RemoveFromFavouriteUseCase {
    pub fn new(favourites: Arc<dyn FavouriteRepository>) -> Self {
        RemoveFromFavouriteUseCase { favourites }
    }

    pub async fn execute(&self, item_id: &str) -> CoreResult<()> {
        self.favourites.remove(item_id).await
    }
}

#[derive(Clone)]
pub struct CheckIsFavouriteUseCase {
    favourites: Arc<dyn FavouriteRepository>,
}

impl CheckIsFavouriteUseCase {
    pub fn new(favourites: Arc<dyn FavouriteRepository>) -> Self {
        CheckIsFavouriteUseCase { favourites }
    }

    pub async fn execute(&self, item_id: &str) -> CoreResult<bool> {
        self.favourites.is_favourite(item_id).await
    }
}

/// Favourite menu items plus a change subscription.
#[derive(Clone)]
pub struct GetFavouriteMenuItemsUseCase {
    favourites: Arc<dyn FavouriteRepository>,
}

impl GetFavouriteMenuItemsUseCase {
    pub fn new(favourites: Arc<dyn FavouriteRepository>) -> Self {
        GetFavouriteMenuItemsUseCase { favourites }
    }

    pub async fn execute(&self) -> CoreResult<Vec<MenuItem>> {
        self.favourites.favourite_items().await
    }

    pub fn subscribe(&self) -> Changes {
        self.favourites.observe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeRepositories;

    #[tokio::test]
    async fn test_add_then_list_wakes_subscribers() {
        let fakes = FakeRepositories::new();
        let list = GetFavouriteMenuItemsUseCase::new(fakes.favourites());
        let mut changes = list.subscribe();

        AddToFavouriteUseCase::new(fakes.favourites())
            .execute("cola")
            .await
            .unwrap();

        changes.changed().await.unwrap();
        let items = list.execute().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Cola 0.5");

        let check = CheckIsFavouriteUseCase::new(fakes.favourites());
        assert!(check.execute("cola").await.unwrap());

        RemoveFromFavouriteUseCase::new(fakes.favourites())
            .execute("cola")
            .await
            .unwrap();
        assert!(!check.execute("cola").await.unwrap());
    }
}
