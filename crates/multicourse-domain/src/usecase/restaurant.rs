//! Catalog synchronization.

use std::sync::Arc;

use multicourse_core::CoreResult;

use crate::repository::RestaurantRepository;

/// Pulls the restaurant snapshot and replaces the local catalog.
#[derive(Clone)]
pub struct SyncDataUseCase {
    restaurant: Arc<dyn RestaurantRepository>,
}

impl SyncDataUseCase {
    pub fn new(restaurant: Arc<dyn RestaurantRepository>) -> Self {
        SyncDataUseCase { restaurant }
    }

    pub async fn execute(&self) -> CoreResult<()> {
        self.restaurant.sync().await
    }
}
