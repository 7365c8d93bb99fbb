//! Integration tests for `FeedClient` using wiremock HTTP mocks.

use pricewatch_feed::{FeedClient, FeedError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(listing_url: &str) -> FeedClient {
    FeedClient::new(listing_url, 30, "Mozilla/5.0").expect("client construction should not fail")
}

#[tokio::test]
async fn fetch_listing_parses_products() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "products": [
            {
                "barcode": "111",
                "name_chi": "可樂",
                "price": { "value": 5.5 },
                "largeImage": "https://cdn.example.com/111.jpg"
            },
            {
                "name": "Sparkling Water",
                "price": { "value": 12.0 }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/listing.json"))
        .and(header("user-agent", "Mozilla/5.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/listing.json", server.uri()));
    let listing = client.fetch_listing().await.expect("should parse listing");

    assert_eq!(listing.products.len(), 2);
    assert_eq!(listing.products[0].barcode.as_deref(), Some("111"));
    assert_eq!(listing.products[1].name.as_deref(), Some("Sparkling Water"));
}

#[tokio::test]
async fn fetch_listing_non_200_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listing.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/listing.json", server.uri()));
    let err = client.fetch_listing().await.unwrap_err();

    assert!(
        matches!(err, FeedError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus(503), got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_listing_malformed_json_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listing.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/listing.json", server.uri()));
    let err = client.fetch_listing().await.unwrap_err();

    assert!(
        matches!(err, FeedError::Deserialize { .. }),
        "expected Deserialize error, got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_image_returns_bytes_on_200() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images/111.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF]))
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/listing.json", server.uri()));
    let bytes = client
        .fetch_image(&format!("{}/images/111.jpg", server.uri()))
        .await
        .expect("image fetch should not fail");

    assert_eq!(bytes.as_deref(), Some(&[0xFF, 0xD8, 0xFF][..]));
}

#[tokio::test]
async fn fetch_image_non_200_is_silent_skip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images/gone.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/listing.json", server.uri()));
    let bytes = client
        .fetch_image(&format!("{}/images/gone.jpg", server.uri()))
        .await
        .expect("non-200 image status should not be an error");

    assert!(bytes.is_none());
}
