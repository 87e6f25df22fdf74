//! # Restaurant Backend Client
//!
//! ## Routes
//! ```text
//! GET  /api/restaurant                 → full catalog snapshot
//! GET  /api/restaurant/info            → { canOrder, currency }
//! GET  /api/delivery/status            → { isAvailable }
//! GET  /api/delivery/addresses?query=  → [{ id, street, city }]
//! POST /api/delivery/address/check     → { result }
//! POST /api/delivery/cost              → { value }
//! POST /api/orders                     → { result, redirectUrl? }
//! ```
//!
//! Every call is a single attempt; retrying is left to the user.

use multicourse_core::{
    Address, CreateOrderParams, CreatedOrderInfo, DeliveryAddressInfo, DeliveryCost,
    DeliveryInfo, RestaurantData, RestaurantInfo,
};
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ApiConfig;
use crate::dto::{
    AddressCheckDto, AddressDto, AddressRequest, CreateOrderRequest, CreatedOrderDto,
    DeliveryCostDto, DeliveryStatusDto, RestaurantDataDto, RestaurantInfoDto,
};
use crate::error::{ApiError, ApiResult};

const API_KEY_HEADER: &str = "X-Api-Key";
const USER_AGENT: &str = concat!("multicourse-client/", env!("CARGO_PKG_VERSION"));
/// Longest error body kept in [`ApiError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// HTTP client for the restaurant backend. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    api_key: Option<SecretString>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// ## Errors
    /// `ApiError::Config` if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        let mut base_url = config.base_url.clone();
        // `Url::join` replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(ApiClient {
            http,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key.expose_secret()),
            None => request,
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let response = self.authorize(self.http.get(url)).send().await?;
        Self::decode(response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.endpoint(path)?;
        let response = self.authorize(self.http.post(url).json(body)).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            warn!(status = status.as_u16(), "Backend returned error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    // =========================================================================
    // Restaurant
    // =========================================================================

    /// Full catalog snapshot for a sync.
    #[instrument(skip(self))]
    pub async fn restaurant_data(&self) -> ApiResult<RestaurantData> {
        let dto: RestaurantDataDto = self.get(self.endpoint("api/restaurant")?).await?;
        debug!(
            categories = dto.categories.len(),
            items = dto.menu.len(),
            "Fetched restaurant snapshot"
        );
        Ok(dto.into())
    }

    #[instrument(skip(self))]
    pub async fn restaurant_info(&self) -> ApiResult<RestaurantInfo> {
        let dto: RestaurantInfoDto = self.get(self.endpoint("api/restaurant/info")?).await?;
        Ok(dto.into())
    }

    // =========================================================================
    // Delivery
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn delivery_status(&self) -> ApiResult<DeliveryInfo> {
        let dto: DeliveryStatusDto = self.get(self.endpoint("api/delivery/status")?).await?;
        Ok(dto.into())
    }

    /// Address suggestions for free text typed by the user.
    #[instrument(skip(self))]
    pub async fn propose_addresses(&self, query: &str) -> ApiResult<Vec<Address>> {
        let mut url = self.endpoint("api/delivery/addresses")?;
        url.query_pairs_mut().append_pair("query", query);

        let dtos: Vec<AddressDto> = self.get(url).await?;
        debug!(count = dtos.len(), "Fetched address proposals");
        Ok(dtos.into_iter().map(Address::from).collect())
    }

    #[instrument(skip(self, address), fields(address_id = %address.id))]
    pub async fn check_address(&self, address: &Address) -> ApiResult<DeliveryAddressInfo> {
        let body = AddressRequest {
            address: address.into(),
        };
        let dto: AddressCheckDto = self.post("api/delivery/address/check", &body).await?;
        Ok(dto.into())
    }

    #[instrument(skip(self, address), fields(address_id = %address.id))]
    pub async fn delivery_cost(&self, address: &Address) -> ApiResult<DeliveryCost> {
        let body = AddressRequest {
            address: address.into(),
        };
        let dto: DeliveryCostDto = self.post("api/delivery/cost", &body).await?;
        Ok(dto.into())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Submits an order. A `result: false` answer is returned as data, not
    /// as an error.
    #[instrument(skip(self, params), fields(guid = %params.guid))]
    pub async fn create_order(&self, params: &CreateOrderParams) -> ApiResult<CreatedOrderInfo> {
        let body = CreateOrderRequest::from(params);
        let dto: CreatedOrderDto = self.post("api/orders", &body).await?;
        debug!(result = dto.result, "Order endpoint answered");
        Ok(dto.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_path_is_preserved() {
        let config = ApiConfig::new("https://example.com/v2").unwrap();
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint("api/orders").unwrap().as_str(),
            "https://example.com/v2/api/orders"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ApiConfig::new("https://example.com")
            .unwrap()
            .api_key(Some(SecretString::from("hunter2".to_string())));
        let client = ApiClient::new(&config).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2"));
    }
}
