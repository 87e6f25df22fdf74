//! Wire types and their conversions to domain models.
//!
//! Field names are camelCase on the wire. Unknown keys are ignored and
//! optional keys default, so additive backend changes never break decoding.

use multicourse_core::{
    AboutInfo, Address, Category, CreateOrderParams, CreatedOrderInfo, DeliveryAddressInfo,
    DeliveryCost, DeliveryInfo, MenuItem, Money, PaymentMethod, RestaurantData, RestaurantInfo,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// Restaurant
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sort_order: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDto {
    pub id: String,
    pub name: String,
    /// Minor units.
    pub price: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutDto {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantInfoDto {
    pub can_order: bool,
    #[serde(default)]
    pub currency: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDataDto {
    #[serde(default)]
    pub categories: Vec<CategoryDto>,
    #[serde(default)]
    pub menu: Vec<MenuItemDto>,
    #[serde(default)]
    pub about: AboutDto,
    pub info: RestaurantInfoDto,
}

impl From<CategoryDto> for Category {
    fn from(dto: CategoryDto) -> Self {
        Category {
            id: dto.id,
            name: dto.name,
            sort_order: dto.sort_order,
        }
    }
}

impl From<MenuItemDto> for MenuItem {
    fn from(dto: MenuItemDto) -> Self {
        MenuItem {
            id: dto.id,
            name: dto.name,
            price: Money::from_minor(dto.price),
            description: dto.description.filter(|d| !d.trim().is_empty()),
            image_url: dto.image_url.filter(|u| !u.trim().is_empty()),
            category_id: dto.category_id,
        }
    }
}

impl From<AboutDto> for AboutInfo {
    fn from(dto: AboutDto) -> Self {
        AboutInfo {
            address: dto.address,
            phone: dto.phone,
            latitude: dto.latitude,
            longitude: dto.longitude,
        }
    }
}

impl From<RestaurantInfoDto> for RestaurantInfo {
    fn from(dto: RestaurantInfoDto) -> Self {
        RestaurantInfo {
            can_order: dto.can_order,
            currency: dto.currency,
        }
    }
}

impl From<RestaurantDataDto> for RestaurantData {
    fn from(dto: RestaurantDataDto) -> Self {
        RestaurantData {
            categories: dto.categories.into_iter().map(Category::from).collect(),
            menu: dto.menu.into_iter().map(MenuItem::from).collect(),
            about: dto.about.into(),
            info: dto.info.into(),
        }
    }
}

// =============================================================================
// Delivery
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryStatusDto {
    pub is_available: bool,
}

impl From<DeliveryStatusDto> for DeliveryInfo {
    fn from(dto: DeliveryStatusDto) -> Self {
        DeliveryInfo {
            is_available: dto.is_available,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    pub id: String,
    pub street: String,
    #[serde(default)]
    pub city: String,
}

impl From<AddressDto> for Address {
    fn from(dto: AddressDto) -> Self {
        Address {
            id: dto.id,
            street: dto.street,
            city: dto.city,
        }
    }
}

impl From<&Address> for AddressDto {
    fn from(address: &Address) -> Self {
        AddressDto {
            id: address.id.clone(),
            street: address.street.clone(),
            city: address.city.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddressRequest {
    pub address: AddressDto,
}

#[derive(Debug, Deserialize)]
pub struct AddressCheckDto {
    pub result: bool,
}

impl From<AddressCheckDto> for DeliveryAddressInfo {
    fn from(dto: AddressCheckDto) -> Self {
        DeliveryAddressInfo { result: dto.result }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeliveryCostDto {
    /// Minor units.
    pub value: i64,
}

impl From<DeliveryCostDto> for DeliveryCost {
    fn from(dto: DeliveryCostDto) -> Self {
        DeliveryCost {
            value: Money::from_minor(dto.value),
        }
    }
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub guid: String,
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub address: AddressDto,
    pub payment_method: PaymentMethod,
    pub comment: String,
}

impl From<&CreateOrderParams> for CreateOrderRequest {
    fn from(params: &CreateOrderParams) -> Self {
        CreateOrderRequest {
            guid: params.guid.to_string(),
            name: params.order_info.name.clone(),
            phone: params.order_info.phone.clone(),
            email: params.order_info.email.clone(),
            address: AddressDto::from(&params.order_info.address),
            payment_method: params.payment_method,
            comment: params.comment.text.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrderDto {
    pub result: bool,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

impl From<CreatedOrderDto> for CreatedOrderInfo {
    fn from(dto: CreatedOrderDto) -> Self {
        CreatedOrderInfo {
            result: dto.result,
            redirect_url: dto.redirect_url.filter(|u| !u.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multicourse_core::{OrderComment, OrderInfo};
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_snapshot_ignores_unknown_keys() {
        let body = json!({
            "categories": [{"id": "pizza", "name": "Pizza", "icon": "🍕"}],
            "menu": [{
                "id": "m1", "name": "Margherita", "price": 18950,
                "categoryId": "pizza", "imageUrl": "", "weight": 450
            }],
            "info": {"canOrder": true},
            "promo": {"code": "SPRING"}
        });
        let data: RestaurantData = serde_json::from_value::<RestaurantDataDto>(body)
            .unwrap()
            .into();

        assert_eq!(data.categories[0].sort_order, 0);
        assert_eq!(data.menu[0].price, Money::from_minor(18950));
        assert_eq!(data.menu[0].image_url, None);
        assert!(data.info.can_order);
        assert_eq!(data.about, AboutInfo::default());
    }

    #[test]
    fn test_order_request_shape() {
        let guid = Uuid::new_v4();
        let params = CreateOrderParams {
            guid,
            order_info: OrderInfo {
                name: "Olena".into(),
                phone: "+380671234567".into(),
                email: None,
                address: Address {
                    id: "a-1".into(),
                    street: "Shevchenka 1".into(),
                    city: "Kyiv".into(),
                },
            },
            payment_method: PaymentMethod::Online,
            comment: OrderComment::compose("", true),
        };

        let value = serde_json::to_value(CreateOrderRequest::from(&params)).unwrap();
        assert_eq!(value["guid"], guid.to_string());
        assert_eq!(value["paymentMethod"], "online");
        assert_eq!(value["address"]["street"], "Shevchenka 1");
        assert!(value.get("email").is_none());
    }

    #[test]
    fn test_blank_redirect_is_none() {
        let dto: CreatedOrderDto =
            serde_json::from_value(json!({"result": true, "redirectUrl": " "})).unwrap();
        assert_eq!(CreatedOrderInfo::from(dto).redirect_url, None);
    }
}
