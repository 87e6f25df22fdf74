//! Integration tests for ApiClient using wiremock

use multicourse_api::{ApiClient, ApiConfig, ApiError};
use multicourse_core::{
    Address, CreateOrderParams, Money, OrderComment, OrderInfo, PaymentMethod,
};
use secrecy::SecretString;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_client(mock_server: &MockServer) -> ApiClient {
    let config = ApiConfig::new(&mock_server.uri()).unwrap();
    ApiClient::new(&config).unwrap()
}

fn address() -> Address {
    Address {
        id: "addr-7".into(),
        street: "Shevchenka St, 12".into(),
        city: "Kyiv".into(),
    }
}

#[tokio::test]
async fn test_restaurant_data_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/restaurant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "categories": [
                {"id": "pizza", "name": "Pizza", "sortOrder": 1},
                {"id": "drinks", "name": "Drinks", "sortOrder": 2}
            ],
            "menu": [
                {"id": "m1", "name": "Margherita", "price": 18950, "categoryId": "pizza"}
            ],
            "about": {"address": "1 Khreshchatyk St", "phone": "+380671234567",
                      "latitude": 50.45, "longitude": 30.52},
            "info": {"canOrder": true, "currency": "UAH"}
        })))
        .mount(&mock_server)
        .await;

    let data = create_client(&mock_server).restaurant_data().await.unwrap();

    assert_eq!(data.categories.len(), 2);
    assert_eq!(data.menu[0].price, Money::from_minor(18950));
    assert_eq!(data.about.phone, "+380671234567");
    assert_eq!(data.info.currency, "UAH");
}

#[tokio::test]
async fn test_api_key_header_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/delivery/status"))
        .and(header("X-Api-Key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isAvailable": false})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ApiConfig::new(&mock_server.uri())
        .unwrap()
        .api_key(Some(SecretString::from("test-api-key".to_string())));
    let client = ApiClient::new(&config).unwrap();

    let status = client.delivery_status().await.unwrap();
    assert!(!status.is_available);
}

#[tokio::test]
async fn test_propose_addresses_encodes_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/delivery/addresses"))
        .and(query_param("query", "Шевченка 1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a1", "street": "Шевченка 1", "city": "Київ"},
            {"id": "a2", "street": "Шевченка 10"}
        ])))
        .mount(&mock_server)
        .await;

    let proposals = create_client(&mock_server)
        .propose_addresses("Шевченка 1")
        .await
        .unwrap();

    assert_eq!(proposals.len(), 2);
    assert_eq!(proposals[1].city, "");
}

#[tokio::test]
async fn test_check_address_and_cost() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/delivery/address/check"))
        .and(body_partial_json(json!({"address": {"id": "addr-7"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": true})))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/delivery/cost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": 5000})))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    assert!(client.check_address(&address()).await.unwrap().result);
    assert_eq!(
        client.delivery_cost(&address()).await.unwrap().value,
        Money::from_minor(5000)
    );
}

#[tokio::test]
async fn test_create_order_passes_guid_and_redirect() {
    let mock_server = MockServer::start().await;
    let guid = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .and(body_partial_json(json!({
            "guid": guid.to_string(),
            "paymentMethod": "online",
            "comment": "Ring twice"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": true,
            "redirectUrl": "https://pay.example.com/checkout/42"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let params = CreateOrderParams {
        guid,
        order_info: OrderInfo {
            name: "Olena".into(),
            phone: "+380671234567".into(),
            email: Some("olena@example.com".into()),
            address: address(),
        },
        payment_method: PaymentMethod::Online,
        comment: OrderComment::compose("Ring twice", false),
    };

    let created = create_client(&mock_server)
        .create_order(&params)
        .await
        .unwrap();

    assert!(created.result);
    assert_eq!(
        created.redirect_url.as_deref(),
        Some("https://pay.example.com/checkout/42")
    );
}

#[tokio::test]
async fn test_create_order_failure_is_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": false})))
        .mount(&mock_server)
        .await;

    let params = CreateOrderParams {
        guid: Uuid::new_v4(),
        order_info: OrderInfo {
            name: "Olena".into(),
            phone: "0671234567".into(),
            email: None,
            address: address(),
        },
        payment_method: PaymentMethod::Cash,
        comment: OrderComment::default(),
    };

    let created = create_client(&mock_server)
        .create_order(&params)
        .await
        .unwrap();
    assert!(!created.result);
    assert_eq!(created.redirect_url, None);
}

#[tokio::test]
async fn test_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/restaurant/info"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let err = create_client(&mock_server)
        .restaurant_info()
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("Expected Status error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/restaurant/info"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = create_client(&mock_server)
        .restaurant_info()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let config = ApiConfig::new("http://127.0.0.1:9").unwrap();
    let client = ApiClient::new(&config).unwrap();

    let err = client.delivery_status().await.unwrap_err();
    assert!(err.is_network());
}
