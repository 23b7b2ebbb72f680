use rusqlite::Connection;

use crate::db::queries;
use crate::models::{Appointment, AppointmentStatus, NewAppointment, RecordId};

#[derive(Debug)]
pub enum BookingError {
    SlotUnavailable,
    AlreadyBooked,
    NotFound,
    Storage(anyhow::Error),
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingError::SlotUnavailable => write!(f, "Selected slot is not available"),
            BookingError::AlreadyBooked => write!(f, "This slot is already booked"),
            BookingError::NotFound => write!(f, "Appointment not found"),
            BookingError::Storage(e) => write!(f, "storage error: {e}"),
        }
    }
}

impl From<anyhow::Error> for BookingError {
    fn from(e: anyhow::Error) -> Self {
        BookingError::Storage(e)
    }
}

impl From<rusqlite::Error> for BookingError {
    fn from(e: rusqlite::Error) -> Self {
        BookingError::Storage(e.into())
    }
}

/// Books a slot: the slot must exist and be open, and nobody else may hold it.
/// The appointment insert and the slot update commit together.
pub fn book_slot(conn: &mut Connection, req: &NewAppointment) -> Result<Appointment, BookingError> {
    let slot_id = req.slot_id.to_string();
    let tx = conn.transaction()?;

    let slot = queries::get_slot(&tx, &slot_id)?
        .filter(|s| s.is_available)
        .ok_or(BookingError::SlotUnavailable)?;

    if queries::active_appointment_for_slot(&tx, &slot_id)?.is_some() {
        return Err(BookingError::AlreadyBooked);
    }

    let appointment = Appointment {
        id: RecordId::new_uuid(),
        slot_id: slot.id.clone(),
        client_name: req.client_name.trim().to_string(),
        whatsapp: req.whatsapp.trim().to_string(),
        notes: req
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
        date: req.date,
        time: req.time.clone(),
        status: AppointmentStatus::Confirmed,
        created_at: Some(queries::now()),
    };

    queries::insert_appointment(&tx, &appointment)?;
    queries::set_slot_available(&tx, &slot_id, false)?;
    tx.commit()?;

    tracing::info!(
        appointment_id = %appointment.id,
        slot_id = %slot.id,
        client = %appointment.client_name,
        date = %appointment.date,
        time = %appointment.time,
        "new appointment created"
    );

    Ok(appointment)
}

/// Cancels an appointment and reopens its slot.
///
/// Cancelling twice is a no-op; the slot may already belong to someone else.
pub fn cancel_appointment(conn: &mut Connection, id: &str) -> Result<(), BookingError> {
    let tx = conn.transaction()?;

    let appointment = queries::get_appointment(&tx, id)?.ok_or(BookingError::NotFound)?;
    if appointment.status == AppointmentStatus::Cancelled {
        tracing::debug!(appointment_id = id, "appointment already cancelled");
        return Ok(());
    }

    queries::update_appointment_status(&tx, id, AppointmentStatus::Cancelled)?;
    queries::set_slot_available(&tx, &appointment.slot_id.to_string(), true)?;
    tx.commit()?;

    tracing::info!(appointment_id = id, slot_id = %appointment.slot_id, "appointment cancelled");

    Ok(())
}
