//! End-to-end: wiremock backend + in-memory SQLite behind the real
//! repositories.

use multicourse_api::{ApiClient, ApiConfig};
use multicourse_core::{Address, CartItem, CoreError, Money, OrderInfo, PaymentMethod};
use multicourse_db::{Database, DbConfig};
use multicourse_domain::usecase::{
    AddToCartUseCase, CreateOrderUseCase, GetMenuCategoriesUseCase, GetMenuItemsByNameUseCase,
    GetOrderItemsUseCase, GetPriceCurrencyUseCase, SaveCustomerCommentUseCase, SyncDataUseCase,
};
use multicourse_domain::repository::OrderRepository;
use multicourse_domain::Repositories;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup(mock_server: &MockServer) -> Repositories {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let api = ApiClient::new(&ApiConfig::new(&mock_server.uri()).unwrap()).unwrap();
    Repositories::new(db, api)
}

async fn mount_catalog(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/restaurant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "categories": [
                {"id": "pizza", "name": "Pizza", "sortOrder": 1},
                {"id": "salads", "name": "Salads", "sortOrder": 2}
            ],
            "menu": [
                {"id": "margherita", "name": "Margherita", "price": 18950, "categoryId": "pizza"},
                {"id": "pepperoni", "name": "Pepperoni", "price": 21900, "categoryId": "pizza"}
            ],
            "about": {"address": "1 Khreshchatyk St", "phone": "+380671234567"},
            "info": {"canOrder": true, "currency": "UAH"}
        })))
        .mount(mock_server)
        .await;
}

async fn mount_status(mock_server: &MockServer, can_order: bool) {
    Mock::given(method("GET"))
        .and(path("/api/restaurant/info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"canOrder": can_order, "currency": "UAH"})),
        )
        .mount(mock_server)
        .await;
}

fn order_info() -> OrderInfo {
    OrderInfo {
        name: "Olena".into(),
        phone: "+380671234567".into(),
        email: None,
        address: Address {
            id: "addr-7".into(),
            street: "Shevchenka St, 12".into(),
            city: "Kyiv".into(),
        },
    }
}

#[tokio::test]
async fn test_sync_populates_local_catalog() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;
    let repos = setup(&mock_server).await;

    SyncDataUseCase::new(repos.restaurant.clone())
        .execute()
        .await
        .unwrap();

    let categories = GetMenuCategoriesUseCase::new(repos.menu.clone())
        .execute()
        .await
        .unwrap();
    assert_eq!(categories.len(), 1, "empty categories are hidden");

    let found = GetMenuItemsByNameUseCase::new(repos.menu.clone())
        .execute("marg")
        .await
        .unwrap();
    assert_eq!(found[0].id, "margherita");

    let currency = GetPriceCurrencyUseCase::new(repos.menu.clone())
        .execute()
        .await
        .unwrap();
    assert_eq!(currency.name, "UAH");
}

#[tokio::test]
async fn test_order_flow_clears_cart_and_preferences() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;
    mount_status(&mock_server, true).await;

    Mock::given(method("GET"))
        .and(path("/api/delivery/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isAvailable": true})))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/delivery/address/check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": true})))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .and(body_partial_json(json!({"comment": "Ring twice", "paymentMethod": "cash"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let repos = setup(&mock_server).await;
    SyncDataUseCase::new(repos.restaurant.clone())
        .execute()
        .await
        .unwrap();
    AddToCartUseCase::new(repos.cart.clone())
        .execute(CartItem::new("margherita", 2, Money::from_minor(18950)))
        .await
        .unwrap();
    SaveCustomerCommentUseCase::new(repos.order.clone())
        .execute(&multicourse_core::OrderComment {
            text: "Ring twice".into(),
        })
        .await
        .unwrap();

    let create = CreateOrderUseCase::new(
        repos.restaurant.clone(),
        repos.delivery.clone(),
        repos.order.clone(),
        repos.cart.clone(),
    );
    let created = create
        .execute(order_info(), PaymentMethod::Cash)
        .await
        .unwrap();

    assert_eq!(created.redirect_url, None);
    let items = GetOrderItemsUseCase::new(repos.cart.clone())
        .execute()
        .await
        .unwrap();
    assert!(items.is_empty());
    assert_eq!(repos.order.customer_comment().await.unwrap(), "");
}

#[tokio::test]
async fn test_closed_restaurant_never_posts_order() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, false).await;

    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": true})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let repos = setup(&mock_server).await;
    let create = CreateOrderUseCase::new(
        repos.restaurant.clone(),
        repos.delivery.clone(),
        repos.order.clone(),
        repos.cart.clone(),
    );

    let err = create
        .execute(order_info(), PaymentMethod::Online)
        .await
        .unwrap_err();
    assert_eq!(err, CoreError::StoreNotAcceptingOrders);
}
