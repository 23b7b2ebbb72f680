use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Slot {
    pub id: RecordId,
    pub date: NaiveDate,
    pub time: String,
    #[serde(rename = "type", default)]
    pub slot_type: SlotType,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

fn default_available() -> bool {
    true
}

impl Slot {
    /// Button label: the slot time as `HH:MM`.
    pub fn label(&self) -> String {
        time_label(&self.time)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SlotType {
    #[default]
    Appointment,
    Event,
}

impl SlotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotType::Appointment => "appointment",
            SlotType::Event => "event",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "event" => SlotType::Event,
            _ => SlotType::Appointment,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSlot {
    pub date: NaiveDate,
    pub time: String,
    #[serde(rename = "type", default)]
    pub slot_type: SlotType,
}

/// Accepts `HH:MM` and `HH:MM:SS`.
pub fn parse_slot_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

pub fn time_label(s: &str) -> String {
    match parse_slot_time(s) {
        Some(t) => t.format("%H:%M").to_string(),
        None => s.to_string(),
    }
}
