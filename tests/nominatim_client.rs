use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zip_coords::domain::providers::{GeocodingError, GeocodingProvider};
use zip_coords::infrastructure::geocoding::NominatimClient;

const USER_AGENT: &str = "zip-coords-test/0.0";

fn client_for(server: &MockServer) -> NominatimClient {
    let http = NominatimClient::http_client(USER_AGENT, Duration::from_secs(5)).unwrap();
    NominatimClient::new(http, &server.uri()).unwrap()
}

#[tokio::test]
async fn test_search_sends_postcode_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("postalcode", "10001"))
        .and(query_param("country", "US"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"lat": "40.7484", "lon": "-73.9967"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).search_postcode("10001").await.unwrap();

    let coords = result.expect("expected a hit");
    assert_eq!(coords.zip, "10001");
    assert_eq!(coords.latitude, 40.7484);
    assert_eq!(coords.longitude, -73.9967);
}

#[tokio::test]
async fn test_search_empty_result_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = client_for(&server).search_postcode("00000").await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_search_upstream_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search_postcode("10001")
        .await
        .unwrap_err();

    assert!(matches!(err, GeocodingError::Request(_)));
}

#[tokio::test]
async fn test_search_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search_postcode("10001")
        .await
        .unwrap_err();

    assert!(matches!(err, GeocodingError::Parse(_)));
}

#[tokio::test]
async fn test_reverse_sends_lat_lon_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("lat", "40.7648"))
        .and(query_param("lon", "-73.9808"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "address": {
                "postcode": "10019",
                "city": "New York",
                "state": "New York",
                "ISO3166-2-lvl4": "US-NY"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let location = client_for(&server)
        .reverse(40.7648, -73.9808)
        .await
        .unwrap()
        .expect("expected an address");

    assert_eq!(location.zip.as_deref(), Some("10019"));
    assert_eq!(location.city.as_deref(), Some("New York"));
    assert_eq!(location.state_code.as_deref(), Some("NY"));
}

#[tokio::test]
async fn test_reverse_unable_to_geocode_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": "Unable to geocode"})),
        )
        .mount(&server)
        .await;

    let result = client_for(&server).reverse(0.0, 0.0).await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_reverse_upstream_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).reverse(40.7648, -73.9808).await.unwrap_err();

    assert!(matches!(err, GeocodingError::Request(_)));
}
