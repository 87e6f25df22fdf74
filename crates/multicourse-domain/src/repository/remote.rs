//! Repositories that talk to the restaurant backend, with local storage
//! where state must survive a restart.

use async_trait::async_trait;
use multicourse_api::ApiClient;
use multicourse_core::{
    AboutInfo, Address, CoreResult, CreateOrderParams, CreatedOrderInfo, DeliveryAddressInfo,
    DeliveryCost, DeliveryInfo, RestaurantInfo,
};
use multicourse_db::repository::preferences::{
    CUSTOMER_COMMENT_KEY, DONT_CALL_ME_KEY, PENDING_ORDER_GUID_KEY,
};
use multicourse_db::Database;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{DeliveryRepository, OrderRepository, RestaurantRepository};

// =============================================================================
// Order
// =============================================================================

/// Order-scoped preferences live in SQLite; submission goes to the backend.
#[derive(Debug, Clone)]
pub struct RemoteOrderRepository {
    api: ApiClient,
    db: Database,
}

impl RemoteOrderRepository {
    pub fn new(api: ApiClient, db: Database) -> Self {
        RemoteOrderRepository { api, db }
    }
}

#[async_trait]
impl OrderRepository for RemoteOrderRepository {
    async fn customer_comment(&self) -> CoreResult<String> {
        let comment = self.db.preferences().get(CUSTOMER_COMMENT_KEY).await?;
        Ok(comment.unwrap_or_default())
    }

    async fn save_customer_comment(&self, comment: &str) -> CoreResult<()> {
        Ok(self
            .db
            .preferences()
            .set(CUSTOMER_COMMENT_KEY, comment)
            .await?)
    }

    async fn dont_call_me(&self) -> CoreResult<bool> {
        let flag = self.db.preferences().get_bool(DONT_CALL_ME_KEY).await?;
        Ok(flag.unwrap_or(false))
    }

    async fn set_dont_call_me(&self, value: bool) -> CoreResult<()> {
        Ok(self.db.preferences().set_bool(DONT_CALL_ME_KEY, value).await?)
    }

    async fn guid(&self) -> CoreResult<Uuid> {
        let prefs = self.db.preferences();

        if let Some(stored) = prefs.get(PENDING_ORDER_GUID_KEY).await? {
            match Uuid::parse_str(&stored) {
                Ok(guid) => return Ok(guid),
                Err(e) => warn!(error = %e, "Discarding unreadable pending order guid"),
            }
        }

        let guid = Uuid::new_v4();
        prefs
            .set(PENDING_ORDER_GUID_KEY, &guid.to_string())
            .await?;
        debug!(%guid, "Started new pending order");
        Ok(guid)
    }

    async fn create(&self, params: &CreateOrderParams) -> CoreResult<CreatedOrderInfo> {
        Ok(self.api.create_order(params).await?)
    }

    async fn clear(&self) -> CoreResult<()> {
        Ok(self
            .db
            .preferences()
            .remove_all(&[CUSTOMER_COMMENT_KEY, DONT_CALL_ME_KEY, PENDING_ORDER_GUID_KEY])
            .await?)
    }
}

// =============================================================================
// Delivery
// =============================================================================

#[derive(Debug, Clone)]
pub struct RemoteDeliveryRepository {
    api: ApiClient,
}

impl RemoteDeliveryRepository {
    pub fn new(api: ApiClient) -> Self {
        RemoteDeliveryRepository { api }
    }
}

#[async_trait]
impl DeliveryRepository for RemoteDeliveryRepository {
    async fn delivery_info(&self) -> CoreResult<DeliveryInfo> {
        Ok(self.api.delivery_status().await?)
    }

    async fn propose_addresses(&self, query: &str) -> CoreResult<Vec<Address>> {
        Ok(self.api.propose_addresses(query).await?)
    }

    async fn delivery_address_info(&self, address: &Address) -> CoreResult<DeliveryAddressInfo> {
        Ok(self.api.check_address(address).await?)
    }

    async fn delivery_cost(&self, address: &Address) -> CoreResult<DeliveryCost> {
        Ok(self.api.delivery_cost(address).await?)
    }
}

// =============================================================================
// Restaurant
// =============================================================================

#[derive(Debug, Clone)]
pub struct RemoteRestaurantRepository {
    api: ApiClient,
    db: Database,
}

impl RemoteRestaurantRepository {
    pub fn new(api: ApiClient, db: Database) -> Self {
        RemoteRestaurantRepository { api, db }
    }
}

#[async_trait]
impl RestaurantRepository for RemoteRestaurantRepository {
    async fn restaurant_info(&self) -> CoreResult<RestaurantInfo> {
        let info = self.api.restaurant_info().await?;
        self.db.restaurant().save_info(&info).await?;
        Ok(info)
    }

    async fn about_info(&self) -> CoreResult<AboutInfo> {
        Ok(self.db.restaurant().about().await?.unwrap_or_default())
    }

    async fn sync(&self) -> CoreResult<()> {
        let data = self.api.restaurant_data().await?;
        self.db.catalog().replace(&data).await?;
        info!(
            categories = data.categories.len(),
            items = data.menu.len(),
            "Catalog synchronized"
        );
        Ok(())
    }
}
