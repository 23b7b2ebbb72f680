use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::slot::time_label;
use super::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: RecordId,
    #[serde(default)]
    pub slot_id: RecordId,
    pub client_name: String,
    pub whatsapp: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl Appointment {
    pub fn time_label(&self) -> String {
        time_label(&self.time)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "cancelled" => AppointmentStatus::Cancelled,
            "completed" => AppointmentStatus::Completed,
            _ => AppointmentStatus::Confirmed,
        }
    }
}

/// Body of `POST /api/appointments`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAppointment {
    pub slot_id: RecordId,
    pub client_name: String,
    pub whatsapp: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub time: String,
}
