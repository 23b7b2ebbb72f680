pub mod appointments;
pub mod health;
pub mod slots;

use std::sync::Arc;

use axum::routing::{delete, get, put};
use axum::Router;
use chrono::NaiveDate;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::errors::AppError;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health::health))
        .route(
            "/api/available-slots",
            get(slots::list_available_slots).post(slots::create_slot),
        )
        .route("/api/available-slots/:id", delete(slots::delete_slot))
        .route(
            "/api/appointments",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route("/api/appointments/:id", get(appointments::get_appointment))
        .route(
            "/api/appointments/:id/cancel",
            put(appointments::cancel_appointment),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// An absent or blank `date` means every date.
fn parse_date_filter(raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw.map(str::trim).filter(|d| !d.is_empty()) {
        None => Ok(None),
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("invalid date: {d}"))),
    }
}
