pub mod http;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{Appointment, NewAppointment, NewSlot, Slot};

pub use http::HttpSchedulingClient;

/// The four calls the console makes against the scheduling service.
#[async_trait]
pub trait SchedulingApi: Send + Sync {
    async fn list_slots(&self, date: NaiveDate) -> anyhow::Result<Vec<Slot>>;

    async fn list_appointments(&self, date: NaiveDate) -> anyhow::Result<Vec<Appointment>>;

    async fn create_appointment(&self, req: &NewAppointment) -> anyhow::Result<Appointment>;

    async fn create_slot(&self, req: &NewSlot) -> anyhow::Result<Slot>;
}
