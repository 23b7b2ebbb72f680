use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{NewSlot, Slot};
use crate::services::slots;
use crate::state::AppState;

use super::{parse_date_filter, DateQuery};

// GET /api/available-slots
pub async fn list_available_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<Slot>>, AppError> {
    let date = parse_date_filter(query.date.as_deref())?;

    let slots = {
        let db = state.conn()?;
        queries::list_available_slots(&db, date)?
    };

    Ok(Json(slots))
}

// POST /api/available-slots
pub async fn create_slot(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewSlot>, JsonRejection>,
) -> Result<(StatusCode, Json<Slot>), AppError> {
    let Json(body) = body?;

    let slot = {
        let db = state.conn()?;
        slots::create_slot(&db, &body)?
    };

    Ok((StatusCode::CREATED, Json(slot)))
}

// DELETE /api/available-slots/:id
pub async fn delete_slot(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    {
        let db = state.conn()?;
        slots::delete_slot(&db, &id)?;
    }

    Ok(Json(serde_json::json!({"message": "Slot deleted successfully"})))
}
