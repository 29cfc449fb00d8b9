use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use std::fs;
use tower::ServiceExt;
use tracing::info;

use fxrates::api::{AppState, build_app};
use fxrates::core::{Converter, CurrencyRate, RateTable};

mod test_utils {
    use super::*;

    pub fn app() -> axum::Router {
        build_app(AppState::new(Converter::default()), None)
    }

    pub async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.expect("request failed");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request");
        send(app, request).await
    }

    pub async fn post_json(app: axum::Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid request");
        send(app, request).await
    }
}

use test_utils::{app, get, post_json};

const REQUIRED_MESSAGE: &str = "Amount, from currency, and to currency are required";

#[test_log::test(tokio::test)]
async fn test_list_currencies() {
    let (status, body) = get(app(), "/api/currencies").await;
    info!(?body, "Currencies response");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        body["currencies"],
        json!([
            "USD", "EUR", "GBP", "JPY", "INR", "CAD", "AUD", "CHF", "CNY", "AED", "PKR", "BDT",
            "LKR", "NPR"
        ])
    );
}

#[test_log::test(tokio::test)]
async fn test_convert_usd_to_eur() {
    let (status, body) = post_json(
        app(),
        "/api/convert",
        r#"{"amount": 100, "from": "USD", "to": "EUR"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "originalAmount": 100.0,
            "fromCurrency": "USD",
            "toCurrency": "EUR",
            "convertedAmount": 85.0,
            "exchangeRate": 0.85
        })
    );
}

#[test_log::test(tokio::test)]
async fn test_convert_eur_to_usd() {
    let (status, body) = post_json(
        app(),
        "/api/convert",
        r#"{"amount": 100, "from": "EUR", "to": "USD"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["convertedAmount"], 117.65);
    assert_eq!(body["exchangeRate"], 1.1765);
}

#[test_log::test(tokio::test)]
async fn test_convert_accepts_numeric_string_amount() {
    let (status, body) = post_json(
        app(),
        "/api/convert",
        r#"{"amount": "250.5", "from": "USD", "to": "INR"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["originalAmount"], 250.5);
    assert_eq!(body["convertedAmount"], 18662.25);
}

#[test_log::test(tokio::test)]
async fn test_convert_missing_fields() {
    let cases = [
        r#"{"amount": 100, "to": "EUR"}"#,
        r#"{"from": "USD", "to": "EUR"}"#,
        r#"{"amount": 100, "from": "USD"}"#,
        r#"{"amount": 100, "from": "", "to": "EUR"}"#,
        r#"{"amount": null, "from": "USD", "to": "EUR"}"#,
        r#"{}"#,
    ];
    for case in cases {
        let (status, body) = post_json(app(), "/api/convert", case).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{case}");
        assert_eq!(
            body,
            json!({"success": false, "message": REQUIRED_MESSAGE}),
            "{case}"
        );
    }
}

#[test_log::test(tokio::test)]
async fn test_convert_rejects_unparseable_amount_and_body() {
    let cases = [
        r#"{"amount": "abc", "from": "USD", "to": "EUR"}"#,
        r#"{"amount": true, "from": "USD", "to": "EUR"}"#,
        r#"{"amount": 1, "from": 5, "to": "EUR"}"#,
        "not json",
    ];
    for case in cases {
        let (status, body) = post_json(app(), "/api/convert", case).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{case}");
        assert_eq!(body["success"], false, "{case}");
        assert_eq!(body["message"], REQUIRED_MESSAGE, "{case}");
    }
}

#[test_log::test(tokio::test)]
async fn test_convert_invalid_currency() {
    let (status, body) = post_json(
        app(),
        "/api/convert",
        r#"{"amount": 100, "from": "USD", "to": "XYZ"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"success": false, "message": "Invalid currency code"})
    );

    let (status, _) = post_json(
        app(),
        "/api/convert",
        r#"{"amount": 100, "from": "usd", "to": "EUR"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_convert_negative_amount_passes_through() {
    let (status, body) = post_json(
        app(),
        "/api/convert",
        r#"{"amount": -10, "from": "USD", "to": "JPY"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["convertedAmount"], -1100.0);
}

#[test_log::test(tokio::test)]
async fn test_convert_overflow_is_internal_error() {
    let (status, body) = post_json(
        app(),
        "/api/convert",
        r#"{"amount": 1e308, "from": "USD", "to": "LKR"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"success": false, "message": "Internal server error"})
    );
}

#[test_log::test(tokio::test)]
async fn test_convert_amount_beyond_decimal_range() {
    let (status, body) = post_json(
        app(),
        "/api/convert",
        r#"{"amount": 1e30, "from": "USD", "to": "EUR"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["originalAmount"], 1e30);
    assert_eq!(body["convertedAmount"], 8.5e29);
    assert_eq!(body["exchangeRate"], 0.85);
}

#[test_log::test(tokio::test)]
async fn test_rate_lookup() {
    let (status, body) = get(app(), "/api/rate/USD/JPY").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "from": "USD", "to": "JPY", "rate": 110.0})
    );

    let (_, body) = get(app(), "/api/rate/EUR/USD").await;
    assert_eq!(body["rate"], 1.1765);
}

#[test_log::test(tokio::test)]
async fn test_rate_invalid_currency() {
    for uri in ["/api/rate/XYZ/USD", "/api/rate/USD/XYZ", "/api/rate/usd/EUR"] {
        let (status, body) = get(app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(
            body,
            json!({"success": false, "message": "Invalid currency code"}),
            "{uri}"
        );
    }
}

#[test_log::test(tokio::test)]
async fn test_health_and_not_found() {
    let (status, body) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "status": "ok"}));

    let (status, body) = get(app(), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[test_log::test(tokio::test)]
async fn test_cors_preflight_allows_any_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/convert")
        .header("origin", "http://example.com")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[test_log::test(tokio::test)]
async fn test_custom_rate_table() {
    let table = RateTable::new(
        "EUR",
        vec![
            CurrencyRate {
                code: "EUR".to_string(),
                rate: 1.0,
            },
            CurrencyRate {
                code: "SEK".to_string(),
                rate: 11.5,
            },
        ],
    )
    .expect("valid table");
    let app = build_app(AppState::new(Converter::new(table)), None);

    let (_, body) = get(app.clone(), "/api/currencies").await;
    assert_eq!(body["currencies"], json!(["EUR", "SEK"]));

    let (status, body) = post_json(
        app,
        "/api/convert",
        r#"{"amount": 10, "from": "EUR", "to": "SEK"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["convertedAmount"], 115.0);
}

#[test_log::test(tokio::test)]
async fn test_static_files_fallback() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    fs::write(dir.path().join("index.html"), "<h1>Currency Converter</h1>").unwrap();
    let app = build_app(AppState::new(Converter::default()), Some(dir.path()));

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("Currency Converter"));

    // API routes still take priority
    let (status, _) = get(app, "/api/rate/USD/EUR").await;
    assert_eq!(status, StatusCode::OK);
}

#[test_log::test(tokio::test)]
async fn test_cli_commands_with_config_file() {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = r#"
        base_currency: "USD"
        rates:
          - code: "USD"
            rate: 1.0
          - code: "EUR"
            rate: 0.9
    "#;
    fs::write(config_file.path(), config_content).expect("Failed to write config file");
    let path = config_file.path().to_str().unwrap();

    let result = fxrates::run_command(
        fxrates::AppCommand::Convert {
            amount: "10".to_string(),
            from: "USD".to_string(),
            to: "EUR".to_string(),
        },
        Some(path),
    )
    .await;
    assert!(result.is_ok(), "convert failed with: {:?}", result.err());

    let result = fxrates::run_command(
        fxrates::AppCommand::Rate {
            from: "USD".to_string(),
            to: "JPY".to_string(),
        },
        Some(path),
    )
    .await;
    assert!(result.is_err(), "JPY is not in the configured table");

    let result = fxrates::run_command(fxrates::AppCommand::Currencies, Some(path)).await;
    assert!(result.is_ok());
}
