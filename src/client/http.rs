use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;

use super::SchedulingApi;
use crate::handlers::health::HealthResponse;
use crate::models::{Appointment, NewAppointment, NewSlot, Slot};

pub struct HttpSchedulingClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSchedulingClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn health(&self) -> anyhow::Result<HealthResponse> {
        self.client
            .get(self.url("/api/health"))
            .send()
            .await
            .context("failed to reach scheduling API")?
            .error_for_status()
            .context("health check failed")?
            .json()
            .await
            .context("failed to parse health response")
    }

    pub async fn get_appointment(&self, id: &str) -> anyhow::Result<Appointment> {
        self.client
            .get(self.url(&format!("/api/appointments/{id}")))
            .send()
            .await
            .context("failed to fetch appointment")?
            .error_for_status()
            .context("scheduling API returned error")?
            .json()
            .await
            .context("failed to parse appointment")
    }

    pub async fn cancel_appointment(&self, id: &str) -> anyhow::Result<()> {
        self.client
            .put(self.url(&format!("/api/appointments/{id}/cancel")))
            .send()
            .await
            .context("failed to cancel appointment")?
            .error_for_status()
            .context("scheduling API returned error")?;
        Ok(())
    }

    pub async fn delete_slot(&self, id: &str) -> anyhow::Result<()> {
        self.client
            .delete(self.url(&format!("/api/available-slots/{id}")))
            .send()
            .await
            .context("failed to delete slot")?
            .error_for_status()
            .context("scheduling API returned error")?;
        Ok(())
    }
}

#[async_trait]
impl SchedulingApi for HttpSchedulingClient {
    async fn list_slots(&self, date: NaiveDate) -> anyhow::Result<Vec<Slot>> {
        self.client
            .get(self.url("/api/available-slots"))
            .query(&[("date", date.format("%Y-%m-%d").to_string())])
            .send()
            .await
            .context("failed to fetch available slots")?
            .error_for_status()
            .context("scheduling API returned error")?
            .json()
            .await
            .context("failed to parse available slots")
    }

    async fn list_appointments(&self, date: NaiveDate) -> anyhow::Result<Vec<Appointment>> {
        self.client
            .get(self.url("/api/appointments"))
            .query(&[("date", date.format("%Y-%m-%d").to_string())])
            .send()
            .await
            .context("failed to fetch appointments")?
            .error_for_status()
            .context("scheduling API returned error")?
            .json()
            .await
            .context("failed to parse appointments")
    }

    async fn create_appointment(&self, req: &NewAppointment) -> anyhow::Result<Appointment> {
        self.client
            .post(self.url("/api/appointments"))
            .json(req)
            .send()
            .await
            .context("failed to create appointment")?
            .error_for_status()
            .context("scheduling API rejected appointment")?
            .json()
            .await
            .context("failed to parse created appointment")
    }

    async fn create_slot(&self, req: &NewSlot) -> anyhow::Result<Slot> {
        self.client
            .post(self.url("/api/available-slots"))
            .json(req)
            .send()
            .await
            .context("failed to create slot")?
            .error_for_status()
            .context("scheduling API rejected slot")?
            .json()
            .await
            .context("failed to parse created slot")
    }
}
