use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Appointment, NewAppointment};
use crate::services::booking;
use crate::state::AppState;

use super::{parse_date_filter, DateQuery};

// GET /api/appointments
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let date = parse_date_filter(query.date.as_deref())?;

    let appointments = {
        let db = state.conn()?;
        queries::list_appointments(&db, date)?
    };

    Ok(Json(appointments))
}

// POST /api/appointments
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewAppointment>, JsonRejection>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let Json(body) = body?;

    if body.client_name.trim().is_empty() || body.whatsapp.trim().is_empty() {
        return Err(AppError::BadRequest(
            "client_name and whatsapp are required".to_string(),
        ));
    }

    let appointment = {
        let mut db = state.conn()?;
        booking::book_slot(&mut db, &body)?
    };

    Ok((StatusCode::CREATED, Json(appointment)))
}

// GET /api/appointments/:id
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = {
        let db = state.conn()?;
        queries::get_appointment(&db, &id)?
    };

    appointment
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))
}

// PUT /api/appointments/:id/cancel
pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    {
        let mut db = state.conn()?;
        booking::cancel_appointment(&mut db, &id)?;
    }

    Ok(Json(
        serde_json::json!({"message": "Appointment cancelled successfully"}),
    ))
}
