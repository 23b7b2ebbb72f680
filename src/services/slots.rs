use rusqlite::Connection;

use crate::db::queries;
use crate::models::slot::parse_slot_time;
use crate::models::{NewSlot, RecordId, Slot};

#[derive(Debug)]
pub enum SlotError {
    Duplicate,
    InvalidTime(String),
    HasAppointments,
    NotFound,
    Storage(anyhow::Error),
}

impl std::fmt::Display for SlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotError::Duplicate => write!(f, "Slot already exists for this date and time"),
            SlotError::InvalidTime(time) => write!(f, "Invalid slot time: {time}"),
            SlotError::HasAppointments => {
                write!(f, "Cannot delete slot with existing appointments")
            }
            SlotError::NotFound => write!(f, "Slot not found"),
            SlotError::Storage(e) => write!(f, "storage error: {e}"),
        }
    }
}

impl From<anyhow::Error> for SlotError {
    fn from(e: anyhow::Error) -> Self {
        SlotError::Storage(e)
    }
}

pub fn create_slot(conn: &Connection, req: &NewSlot) -> Result<Slot, SlotError> {
    // Stored as HH:MM so "09:00" and "09:00:00" collide.
    let time = parse_slot_time(&req.time)
        .ok_or_else(|| SlotError::InvalidTime(req.time.clone()))?
        .format("%H:%M")
        .to_string();

    if queries::find_slot_at(conn, req.date, &time)?.is_some() {
        return Err(SlotError::Duplicate);
    }

    let slot = Slot {
        id: RecordId::new_uuid(),
        date: req.date,
        time,
        slot_type: req.slot_type,
        is_available: true,
        created_at: Some(queries::now()),
    };
    queries::insert_slot(conn, &slot)?;

    tracing::info!(slot_id = %slot.id, date = %slot.date, time = %slot.time, "slot created");

    Ok(slot)
}

/// Removes a slot unless someone holds it.
pub fn delete_slot(conn: &Connection, id: &str) -> Result<(), SlotError> {
    if queries::active_appointment_for_slot(conn, id)?.is_some() {
        return Err(SlotError::HasAppointments);
    }

    if !queries::delete_slot(conn, id)? {
        return Err(SlotError::NotFound);
    }

    tracing::info!(slot_id = id, "slot deleted");
    Ok(())
}
