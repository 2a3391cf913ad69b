//! Integration tests for the market and weather blocks.

use daily_digest::api::ApiClient;
use daily_digest::blocks::market::{self, CryptoQuote};
use daily_digest::blocks::weather;
use daily_digest::models::CurrencyPair;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> ApiClient {
    ApiClient::new(None).expect("failed to build test ApiClient")
}

const BTC: CryptoQuote<'static> = CryptoQuote {
    id: "bitcoin",
    symbol: "BTC",
    vs: "usd",
};

#[tokio::test]
async fn market_block_degrades_each_line_independently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .and(query_param("from", "USD"))
        .and(query_param("to", "EUR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "amount": 1.0, "base": "USD", "date": "2025-05-06", "rates": {"EUR": 0.923456}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .and(query_param("to", "GBP"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    // Response without the requested currency.
    Mock::given(method("GET"))
        .and(path("/latest"))
        .and(query_param("to", "JPY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rates": {}})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .and(query_param("ids", "bitcoin"))
        .and(query_param("vs_currencies", "usd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bitcoin": {"usd": 67012.5}})))
        .mount(&server)
        .await;

    let api = client();
    let pairs = vec![
        CurrencyPair::new("USD", "EUR"),
        CurrencyPair::new("USD", "GBP"),
        CurrencyPair::new("USD", "JPY"),
    ];
    let block = market::market_block(&api, &server.uri(), &pairs, &server.uri(), &BTC).await;

    assert!(!block.is_degraded());
    assert_eq!(
        block.render(),
        "### 💱 Market Snapshot\n\
         - USD/EUR: 0.9235\n\
         - USD/GBP: _Failed to fetch._\n\
         - USD/JPY: _Failed to fetch._\n\
         - BTC/USD: $67,013"
    );
}

#[tokio::test]
async fn market_block_crypto_failure_keeps_rates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rates": {"CHF": 0.94}})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let api = client();
    let pairs = vec![CurrencyPair::new("EUR", "CHF")];
    let block = market::market_block(&api, &server.uri(), &pairs, &server.uri(), &BTC).await;

    assert_eq!(
        block.render(),
        "### 💱 Market Snapshot\n- EUR/CHF: 0.9400\n- BTC/USD: _Failed to fetch._"
    );
}

#[tokio::test]
async fn weather_block_renders_current_and_today() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "52.52"))
        .and(query_param("longitude", "13.41"))
        .and(query_param("current_weather", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_weather": {"temperature": 18.4, "windspeed": 11.2, "weathercode": 2, "time": "2025-05-06T12:00"},
            "daily": {
                "time": ["2025-05-06"],
                "temperature_2m_max": [21.3],
                "temperature_2m_min": [9.8],
                "precipitation_sum": [1.4]
            }
        })))
        .mount(&server)
        .await;

    let api = client();
    let url = format!("{}/v1/forecast", server.uri());
    let block = weather::weather_block(&api, &url, 52.52, 13.41).await;

    assert_eq!(
        block.render(),
        "### 🌤️ Weather\n\
         - Now: **18.4°C**, wind 11.2 km/h (partly cloudy)\n\
         - Today: 9.8°C – 21.3°C, precipitation 1.4 mm"
    );
}

#[tokio::test]
async fn weather_block_without_current_conditions_degrades() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "daily": {"temperature_2m_max": [21.3], "temperature_2m_min": [9.8], "precipitation_sum": [0.0]}
        })))
        .mount(&server)
        .await;

    let api = client();
    let url = format!("{}/v1/forecast", server.uri());
    let block = weather::weather_block(&api, &url, 52.52, 13.41).await;

    assert!(block.is_degraded());
    assert_eq!(block.render(), "### 🌤️ Weather\n_Failed to fetch._");
}
