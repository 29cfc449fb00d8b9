use super::AppState;
use super::response::{CurrencyList, Failure, Health, Success};
use crate::core::{ConversionRequest, ConversionResult, ConvertError, RateQuote};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::debug;

pub async fn health() -> Json<Success<Health>> {
    Json(Success::new(Health {
        status: "ok".to_string(),
    }))
}

pub async fn list_currencies(State(state): State<AppState>) -> Json<Success<CurrencyList>> {
    debug!("Listing currencies");
    Json(Success::new(CurrencyList {
        currencies: state.converter.currencies(),
    }))
}

/// A body that is not valid JSON, or whose fields have the wrong JSON types,
/// is treated the same as one with missing fields.
pub async fn convert(
    State(state): State<AppState>,
    payload: Result<Json<ConversionRequest>, JsonRejection>,
) -> Result<Json<Success<ConversionResult>>, ConvertError> {
    // A non-string `from`/`to` (e.g. `"from": 5`) is a validation error here,
    // not an invalid currency: only strings are ever looked up in the table.
    let Json(request) =
        payload.map_err(|rejection| ConvertError::Validation(rejection.body_text()))?;
    debug!(?request, "Convert request");

    let result = state.converter.convert(&request)?;
    Ok(Json(Success::new(result)))
}

pub async fn rate(
    State(state): State<AppState>,
    Path((from, to)): Path<(String, String)>,
) -> Result<Json<Success<RateQuote>>, ConvertError> {
    debug!(%from, %to, "Rate request");
    let quote = state.converter.rate_of(&from, &to)?;
    Ok(Json(Success::new(quote)))
}

pub async fn not_found() -> (StatusCode, Json<Failure>) {
    (StatusCode::NOT_FOUND, Json(Failure::new("Not found")))
}
