// src/client/mod.rs
//! Typed HTTP client for the portal. Reads go through a small query cache
//! keyed by request path; every mutation invalidates the keys it makes stale.

use std::time::Duration;

use chrono::NaiveDate;
use dashmap::DashMap;
use reqwest::{Method, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::{
    analytics::{DoctorDashboard, WellnessOverview, WellnessSummary},
    models::{
        Appointment, DoctorAvailability, Employee, EmployeeWellnessMetrics, InsertAppointment,
        InsertDoctorAvailability, InsertEmployee, InsertEmployeeWellnessMetrics,
    },
};

pub mod editor;

pub use editor::AvailabilityEditor;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

pub fn availability_key(doctor_id: i64) -> String {
    format!("/api/doctor/{doctor_id}/availability")
}

pub fn metrics_key(employee_id: i64, days: usize) -> String {
    format!("/api/employees/{employee_id}/wellness-metrics?days={days}")
}

pub fn appointments_key(doctor_id: Option<i64>) -> String {
    match doctor_id {
        Some(d) => format!("/api/appointments?doctorId={d}"),
        None => "/api/appointments".to_string(),
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    cache: DashMap<String, serde_json::Value>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: DashMap::new(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode(resp: Response) -> Result<serde_json::Value, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await?);
        }
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
        };
        Err(ClientError::Api { status: status.as_u16(), message })
    }

    /// Cached GET. `key` is the request path including its query string.
    pub async fn query<T: DeserializeOwned>(&self, key: &str) -> Result<T, ClientError> {
        if let Some(hit) = self.cache.get(key) {
            return Ok(serde_json::from_value(hit.value().clone())?);
        }

        let resp = self.http.get(self.url(key)).send().await?;
        let value = Self::decode(resp).await?;
        self.cache.insert(key.to_string(), value.clone());
        Ok(serde_json::from_value(value)?)
    }

    async fn mutate<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self.http.request(method, self.url(path)).json(body).send().await?;
        let value = Self::decode(resp).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn invalidate(&self, key: &str) {
        self.cache.remove(key);
    }

    pub fn invalidate_prefix(&self, prefix: &str) {
        self.cache.retain(|key, _| !key.starts_with(prefix));
    }

    pub fn is_cached(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    // ── doctor portal ───────────────────────────────────────

    pub async fn doctor_availability(&self, doctor_id: i64) -> Result<Vec<DoctorAvailability>, ClientError> {
        self.query(&availability_key(doctor_id)).await
    }

    pub async fn update_doctor_availability(
        &self,
        doctor_id: i64,
        rows: &[InsertDoctorAvailability],
    ) -> Result<Vec<DoctorAvailability>, ClientError> {
        let saved = self
            .mutate(Method::PUT, &availability_key(doctor_id), rows)
            .await?;
        self.invalidate(&availability_key(doctor_id));
        self.invalidate_prefix(&format!("/api/doctor/{doctor_id}/dashboard"));
        Ok(saved)
    }

    pub async fn doctor_dashboard(&self, doctor_id: i64, date: NaiveDate) -> Result<DoctorDashboard, ClientError> {
        self.query(&format!("/api/doctor/{doctor_id}/dashboard?date={date}")).await
    }

    pub async fn appointments(&self, doctor_id: Option<i64>) -> Result<Vec<Appointment>, ClientError> {
        self.query(&appointments_key(doctor_id)).await
    }

    pub async fn create_appointment(&self, appointment: &InsertAppointment) -> Result<Appointment, ClientError> {
        let created: Appointment = self.mutate(Method::POST, "/api/appointments", appointment).await?;
        self.invalidate_prefix("/api/appointments");
        self.invalidate_prefix(&format!("/api/doctor/{}/dashboard", created.doctor_id));
        Ok(created)
    }

    // ── HR portal ───────────────────────────────────────────

    pub async fn employees(&self) -> Result<Vec<Employee>, ClientError> {
        self.query("/api/employees").await
    }

    pub async fn employee(&self, id: i64) -> Result<Employee, ClientError> {
        self.query(&format!("/api/employees/{id}")).await
    }

    pub async fn create_employee(&self, employee: &InsertEmployee) -> Result<Employee, ClientError> {
        let created = self.mutate(Method::POST, "/api/employees", employee).await?;
        self.invalidate("/api/employees");
        self.invalidate_prefix("/api/analytics/");
        Ok(created)
    }

    pub async fn wellness_metrics(&self, employee_id: i64, days: usize) -> Result<Vec<EmployeeWellnessMetrics>, ClientError> {
        self.query(&metrics_key(employee_id, days)).await
    }

    pub async fn record_wellness_metrics(
        &self,
        employee_id: i64,
        metrics: &InsertEmployeeWellnessMetrics,
    ) -> Result<EmployeeWellnessMetrics, ClientError> {
        let path = format!("/api/employees/{employee_id}/wellness-metrics");
        let created = self.mutate(Method::POST, &path, metrics).await?;
        self.invalidate_prefix(&format!("/api/employees/{employee_id}/wellness-"));
        self.invalidate_prefix("/api/analytics/");
        Ok(created)
    }

    pub async fn wellness_summary(&self, employee_id: i64, days: usize) -> Result<WellnessSummary, ClientError> {
        self.query(&format!("/api/employees/{employee_id}/wellness-summary?days={days}")).await
    }

    pub async fn wellness_overview(&self, days: usize) -> Result<WellnessOverview, ClientError> {
        self.query(&format!("/api/analytics/wellness?days={days}")).await
    }
}
