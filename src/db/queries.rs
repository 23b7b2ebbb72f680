use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime, Timelike, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{Appointment, AppointmentStatus, RecordId, Slot, SlotType};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Listing endpoints never return more than this many rows.
pub const LIST_LIMIT: i64 = 100;

pub fn now() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    // Stored with second precision; truncate so the in-memory value matches a reload.
    now.with_nanosecond(0).unwrap_or(now)
}

// ── Slots ──

const SLOT_COLUMNS: &str = "id, date, time, type, is_available, created_at";

pub fn insert_slot(conn: &Connection, slot: &Slot) -> anyhow::Result<()> {
    let created_at = slot
        .created_at
        .unwrap_or_else(now)
        .format(TIMESTAMP_FORMAT)
        .to_string();

    conn.execute(
        "INSERT INTO available_slots (id, date, time, type, is_available, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            slot.id.to_string(),
            slot.date.format(DATE_FORMAT).to_string(),
            slot.time,
            slot.slot_type.as_str(),
            slot.is_available as i32,
            created_at,
        ],
    )?;
    Ok(())
}

pub fn get_slot(conn: &Connection, id: &str) -> anyhow::Result<Option<Slot>> {
    let result = conn
        .query_row(
            &format!("SELECT {SLOT_COLUMNS} FROM available_slots WHERE id = ?1"),
            params![id],
            |row| Ok(parse_slot_row(row)),
        )
        .optional()?;

    result.transpose()
}

pub fn find_slot_at(conn: &Connection, date: NaiveDate, time: &str) -> anyhow::Result<Option<Slot>> {
    let result = conn
        .query_row(
            &format!("SELECT {SLOT_COLUMNS} FROM available_slots WHERE date = ?1 AND time = ?2"),
            params![date.format(DATE_FORMAT).to_string(), time],
            |row| Ok(parse_slot_row(row)),
        )
        .optional()?;

    result.transpose()
}

/// Available slots, for one date or every date, ordered by time.
pub fn list_available_slots(conn: &Connection, date: Option<NaiveDate>) -> anyhow::Result<Vec<Slot>> {
    let date = date.map(|d| d.format(DATE_FORMAT).to_string());
    let mut stmt = conn.prepare(&format!(
        "SELECT {SLOT_COLUMNS} FROM available_slots
         WHERE is_available = 1 AND (?1 IS NULL OR date = ?1)
         ORDER BY date ASC, time ASC LIMIT ?2"
    ))?;

    let rows = stmt.query_map(params![date, LIST_LIMIT], |row| Ok(parse_slot_row(row)))?;

    let mut slots = vec![];
    for row in rows {
        slots.push(row??);
    }
    Ok(slots)
}

pub fn set_slot_available(conn: &Connection, id: &str, available: bool) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE available_slots SET is_available = ?1 WHERE id = ?2",
        params![available as i32, id],
    )?;
    Ok(count > 0)
}

pub fn delete_slot(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM available_slots WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

fn parse_slot_row(row: &rusqlite::Row) -> anyhow::Result<Slot> {
    let id: String = row.get(0)?;
    let date_str: String = row.get(1)?;
    let time: String = row.get(2)?;
    let type_str: String = row.get(3)?;
    let is_available: bool = row.get::<_, i32>(4)? != 0;
    let created_at_str: String = row.get(5)?;

    let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
        .with_context(|| format!("invalid slot date in database: {date_str}"))?;
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, TIMESTAMP_FORMAT).ok();

    Ok(Slot {
        id: RecordId::Text(id),
        date,
        time,
        slot_type: SlotType::parse(&type_str),
        is_available,
        created_at,
    })
}

// ── Appointments ──

const APPOINTMENT_COLUMNS: &str =
    "id, slot_id, client_name, whatsapp, notes, date, time, status, created_at";

pub fn insert_appointment(conn: &Connection, appt: &Appointment) -> anyhow::Result<()> {
    let created_at = appt
        .created_at
        .unwrap_or_else(now)
        .format(TIMESTAMP_FORMAT)
        .to_string();

    conn.execute(
        "INSERT INTO appointments (id, slot_id, client_name, whatsapp, notes, date, time, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            appt.id.to_string(),
            appt.slot_id.to_string(),
            appt.client_name,
            appt.whatsapp,
            appt.notes,
            appt.date.format(DATE_FORMAT).to_string(),
            appt.time,
            appt.status.as_str(),
            created_at,
        ],
    )?;
    Ok(())
}

pub fn get_appointment(conn: &Connection, id: &str) -> anyhow::Result<Option<Appointment>> {
    let result = conn
        .query_row(
            &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?1"),
            params![id],
            |row| Ok(parse_appointment_row(row)),
        )
        .optional()?;

    result.transpose()
}

/// The appointment currently holding a slot, ignoring cancelled ones.
pub fn active_appointment_for_slot(
    conn: &Connection,
    slot_id: &str,
) -> anyhow::Result<Option<Appointment>> {
    let result = conn
        .query_row(
            &format!(
                "SELECT {APPOINTMENT_COLUMNS} FROM appointments
                 WHERE slot_id = ?1 AND status != 'cancelled'"
            ),
            params![slot_id],
            |row| Ok(parse_appointment_row(row)),
        )
        .optional()?;

    result.transpose()
}

pub fn list_appointments(
    conn: &Connection,
    date: Option<NaiveDate>,
) -> anyhow::Result<Vec<Appointment>> {
    let date = date.map(|d| d.format(DATE_FORMAT).to_string());
    let mut stmt = conn.prepare(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments
         WHERE (?1 IS NULL OR date = ?1)
         ORDER BY date ASC, time ASC LIMIT ?2"
    ))?;

    let rows = stmt.query_map(params![date, LIST_LIMIT], |row| {
        Ok(parse_appointment_row(row))
    })?;

    let mut appointments = vec![];
    for row in rows {
        appointments.push(row??);
    }
    Ok(appointments)
}

pub fn update_appointment_status(
    conn: &Connection,
    id: &str,
    status: AppointmentStatus,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE appointments SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(count > 0)
}

fn parse_appointment_row(row: &rusqlite::Row) -> anyhow::Result<Appointment> {
    let id: String = row.get(0)?;
    let slot_id: String = row.get(1)?;
    let client_name: String = row.get(2)?;
    let whatsapp: String = row.get(3)?;
    let notes: Option<String> = row.get(4)?;
    let date_str: String = row.get(5)?;
    let time: String = row.get(6)?;
    let status_str: String = row.get(7)?;
    let created_at_str: String = row.get(8)?;

    let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
        .with_context(|| format!("invalid appointment date in database: {date_str}"))?;
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, TIMESTAMP_FORMAT).ok();

    Ok(Appointment {
        id: RecordId::Text(id),
        slot_id: RecordId::Text(slot_id),
        client_name,
        whatsapp,
        notes,
        date,
        time,
        status: AppointmentStatus::parse(&status_str),
        created_at,
    })
}
