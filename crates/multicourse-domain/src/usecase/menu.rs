//! Menu browsing use cases. All read the local catalog.

use std::sync::Arc;

use multicourse_core::{AboutInfo, Category, CoreResult, MenuItem, PriceCurrency};

use crate::repository::{MenuRepository, RestaurantRepository};

/// Non-empty categories in display order.
#[derive(Clone)]
pub struct GetMenuCategoriesUseCase {
    menu: Arc<dyn MenuRepository>,
}

impl GetMenuCategoriesUseCase {
    pub fn new(menu: Arc<dyn MenuRepository>) -> Self {
        GetMenuCategoriesUseCase { menu }
    }

    pub async fn execute(&self) -> CoreResult<Vec<Category>> {
        self.menu.categories().await
    }
}

#[derive(Clone)]
pub struct GetMenuByCategoryIdUseCase {
    menu: Arc<dyn MenuRepository>,
}

impl GetMenuByCategoryIdUseCase {
    pub fn new(menu: Arc<dyn MenuRepository>) -> Self {
        GetMenuByCategoryIdUseCase { menu }
    }

    pub async fn execute(&self, category_id: &str) -> CoreResult<Vec<MenuItem>> {
        self.menu.menu_by_category(category_id).await
    }
}

#[derive(Clone)]
pub struct GetMenuListUseCase {
    menu: Arc<dyn MenuRepository>,
}

impl GetMenuListUseCase {
    pub fn new(menu: Arc<dyn MenuRepository>) -> Self {
        GetMenuListUseCase { menu }
    }

    pub async fn execute(&self) -> CoreResult<Vec<MenuItem>> {
        self.menu.menu_list().await
    }
}

/// Prefix search over item names.
#[derive(Clone)]
pub struct GetMenuItemsByNameUseCase {
    menu: Arc<dyn MenuRepository>,
}

impl GetMenuItemsByNameUseCase {
    pub fn new(menu: Arc<dyn MenuRepository>) -> Self {
        GetMenuItemsByNameUseCase { menu }
    }

    pub async fn execute(&self, name: &str) -> CoreResult<Vec<MenuItem>> {
        self.menu.search_by_name(name).await
    }
}

#[derive(Clone)]
pub struct GetMenuItemByIdUseCase {
    menu: Arc<dyn MenuRepository>,
}

impl GetMenuItemByIdUseCase {
    pub fn new(menu: Arc<dyn MenuRepository>) -> Self {
        GetMenuItemByIdUseCase { menu }
    }

    pub async fn execute(&self, id: &str) -> CoreResult<MenuItem> {
        self.menu.menu_item(id).await
    }
}

#[derive(Clone)]
pub struct GetPriceCurrencyUseCase {
    menu: Arc<dyn MenuRepository>,
}

impl GetPriceCurrencyUseCase {
    pub fn new(menu: Arc<dyn MenuRepository>) -> Self {
        GetPriceCurrencyUseCase { menu }
    }

    pub async fn execute(&self) -> CoreResult<PriceCurrency> {
        self.menu.price_currency().await
    }
}

#[derive(Clone)]
pub struct GetAboutInfoUseCase {
    restaurant: Arc<dyn RestaurantRepository>,
}

impl GetAboutInfoUseCase {
    pub fn new(restaurant: Arc<dyn RestaurantRepository>) -> Self {
        GetAboutInfoUseCase { restaurant }
    }

    pub async fn execute(&self) -> CoreResult<AboutInfo> {
        self.restaurant.about_info().await
    }
}
