use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use skyfare_core::{DateRangeCriteria, SearchCriteria, ServicePayload};

use crate::{error::AppError, state::AppState};

// ============================================================================
// Response Types
// ============================================================================

/// Success envelope shared by every flight endpoint.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub success: bool,
    pub message: &'static str,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionaries: Option<Value>,
}

impl Envelope {
    fn new(message: &'static str, payload: ServicePayload) -> Self {
        Self {
            success: true,
            message,
            data: payload.data,
            meta: payload.meta,
            dictionaries: payload.dictionaries,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/flights/search", post(search_flights))
        .route("/api/v1/flights/cheapest-dates", post(search_cheapest_dates))
        .route("/api/v1/flights/airport/{iata_code}", get(get_airport_info))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/flights/search
async fn search_flights(
    State(state): State<AppState>,
    payload: Result<Json<SearchCriteria>, JsonRejection>,
) -> Result<Json<Envelope>, AppError> {
    let Json(criteria) = payload?;

    let payload = state
        .flights
        .search_flight_offers(&criteria)
        .await?;

    let mut envelope = Envelope::new("flight search completed", payload);
    envelope.meta.get_or_insert_with(|| json!({}));
    envelope.dictionaries.get_or_insert_with(|| json!({}));
    Ok(Json(envelope))
}

/// POST /api/v1/flights/cheapest-dates
async fn search_cheapest_dates(
    State(state): State<AppState>,
    payload: Result<Json<DateRangeCriteria>, JsonRejection>,
) -> Result<Json<Envelope>, AppError> {
    let Json(criteria) = payload?;

    let payload = state
        .flights
        .search_cheapest_dates(&criteria)
        .await?;

    let mut envelope = Envelope::new("cheapest date search completed", payload);
    envelope.meta.get_or_insert_with(|| json!({}));
    Ok(Json(envelope))
}

/// GET /api/v1/flights/airport/{iata_code}
async fn get_airport_info(
    State(state): State<AppState>,
    Path(iata_code): Path<String>,
) -> Result<Json<Envelope>, AppError> {
    let payload = state
        .flights
        .get_airport_info(&iata_code.to_uppercase())
        .await?;

    Ok(Json(Envelope::new("airport lookup completed", payload)))
}
