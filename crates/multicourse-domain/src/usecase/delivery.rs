//! Delivery checks used by the contact form.

use std::sync::Arc;

use multicourse_core::validation::is_searchable_address_query;
use multicourse_core::{Address, CoreError, CoreResult, DeliveryCost};
use tracing::debug;

use crate::repository::{DeliveryRepository, RestaurantRepository};

/// Whether the delivery service is serving right now.
#[derive(Clone)]
pub struct CheckDeliveryAvailableUseCase {
    delivery: Arc<dyn DeliveryRepository>,
}

impl CheckDeliveryAvailableUseCase {
    pub fn new(delivery: Arc<dyn DeliveryRepository>) -> Self {
        CheckDeliveryAvailableUseCase { delivery }
    }

    pub async fn execute(&self) -> CoreResult<bool> {
        Ok(self.delivery.delivery_info().await?.is_available)
    }
}

/// Whether the restaurant accepts orders right now.
#[derive(Clone)]
pub struct CheckIsOrderAvailableUseCase {
    restaurant: Arc<dyn RestaurantRepository>,
}

impl CheckIsOrderAvailableUseCase {
    pub fn new(restaurant: Arc<dyn RestaurantRepository>) -> Self {
        CheckIsOrderAvailableUseCase { restaurant }
    }

    pub async fn execute(&self) -> CoreResult<bool> {
        Ok(self.restaurant.restaurant_info().await?.can_order)
    }
}

/// Address suggestions for text typed into the address field.
#[derive(Clone)]
pub struct GetProposedAddressUseCase {
    delivery: Arc<dyn DeliveryRepository>,
}

impl GetProposedAddressUseCase {
    pub fn new(delivery: Arc<dyn DeliveryRepository>) -> Self {
        GetProposedAddressUseCase { delivery }
    }

    /// Short queries return nothing without asking the provider.
    pub async fn execute(&self, query: &str) -> CoreResult<Vec<Address>> {
        if !is_searchable_address_query(query) {
            return Ok(Vec::new());
        }
        self.delivery.propose_addresses(query.trim()).await
    }
}

/// Confirms that a chosen address can be served.
#[derive(Clone)]
pub struct CanDeliverUseCase {
    delivery: Arc<dyn DeliveryRepository>,
}

impl CanDeliverUseCase {
    pub fn new(delivery: Arc<dyn DeliveryRepository>) -> Self {
        CanDeliverUseCase { delivery }
    }

    /// ## Errors
    /// - `MissingBuildingNumber` when the street has no digit (no network call)
    /// - `DeliveryUnavailable` when delivery is not serving
    /// - `AddressNotDeliverable` when the provider rejects the address
    pub async fn execute(&self, address: &Address) -> CoreResult<()> {
        if !address.has_building_number() {
            return Err(CoreError::MissingBuildingNumber);
        }
        if !self.delivery.delivery_info().await?.is_available {
            return Err(CoreError::DeliveryUnavailable);
        }
        if !self.delivery.delivery_address_info(address).await?.result {
            debug!(address_id = %address.id, "Provider rejected address");
            return Err(CoreError::AddressNotDeliverable);
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct GetDeliveryCostUseCase {
    delivery: Arc<dyn DeliveryRepository>,
}

impl GetDeliveryCostUseCase {
    pub fn new(delivery: Arc<dyn DeliveryRepository>) -> Self {
        GetDeliveryCostUseCase { delivery }
    }

    pub async fn execute(&self, address: &Address) -> CoreResult<DeliveryCost> {
        self.delivery.delivery_cost(address).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{address, FakeRepositories, CALL_CHECK_ADDRESS, CALL_DELIVERY_INFO};

    #[tokio::test]
    async fn test_short_query_skips_provider() {
        let fakes = FakeRepositories::new();
        fakes.state().proposals = vec![address("a1", "Shevchenka 1")];
        let propose = GetProposedAddressUseCase::new(fakes.delivery());

        assert!(propose.execute(" She ").await.unwrap().is_empty());
        assert!(fakes.calls().is_empty());

        assert_eq!(propose.execute("Shev").await.unwrap().len(), 1);
        assert_eq!(fakes.calls(), vec!["propose_addresses:Shev"]);
    }

    #[tokio::test]
    async fn test_can_deliver_requires_building_number() {
        let fakes = FakeRepositories::new();
        let can_deliver = CanDeliverUseCase::new(fakes.delivery());

        let err = can_deliver
            .execute(&address("a1", "Shevchenka St"))
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::MissingBuildingNumber);
        assert!(fakes.calls().is_empty());
    }

    #[tokio::test]
    async fn test_can_deliver_reports_rejected_address() {
        let fakes = FakeRepositories::new();
        fakes.state().address_deliverable = false;
        let can_deliver = CanDeliverUseCase::new(fakes.delivery());

        let err = can_deliver
            .execute(&address("a1", "Shevchenka St, 12"))
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::AddressNotDeliverable);
        assert_eq!(fakes.calls(), vec![CALL_DELIVERY_INFO, CALL_CHECK_ADDRESS]);
    }

    #[tokio::test]
    async fn test_can_deliver_when_delivery_is_down() {
        let fakes = FakeRepositories::new();
        fakes.state().delivery_available = false;
        let can_deliver = CanDeliverUseCase::new(fakes.delivery());

        let err = can_deliver
            .execute(&address("a1", "Shevchenka St, 12"))
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::DeliveryUnavailable);
        assert_eq!(fakes.calls(), vec![CALL_DELIVERY_INFO]);
    }
}
