// src/models/mod.rs

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const DEFAULT_APPOINTMENT_MINUTES: i32 = 50;
pub const DEFAULT_METRICS_WINDOW: usize = 30;

// ───────────────────────────────────────
// Users
// ───────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,         // sha256 hex
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InsertUser {
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(length(min = 8))]
    pub password: String,
}

// ───────────────────────────────────────
// Doctor availability (weekly pattern)
// ───────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DoctorAvailability {
    pub id: i64,
    pub doctor_id: i64,
    pub day_of_week: i32,         // 0-6 (Sunday-Saturday)
    pub start_time: String,       // "09:00"
    pub end_time: String,         // "17:00"
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertDoctorAvailability {
    #[validate(range(min = 1))]
    pub doctor_id: i64,
    #[validate(range(min = 0, max = 6))]
    pub day_of_week: i32,
    #[validate(custom(function = "validate_clock_time"))]
    pub start_time: String,
    #[validate(custom(function = "validate_clock_time"))]
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

/// Body of the bulk weekly update. Validates every row.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityBatch(pub Vec<InsertDoctorAvailability>);

impl Validate for AvailabilityBatch {
    fn validate(&self) -> Result<(), validator::ValidationErrors> {
        for row in &self.0 {
            row.validate()?;
        }
        Ok(())
    }
}

/// Accepts 24h `HH:MM` only.
pub fn validate_clock_time(value: &str) -> Result<(), ValidationError> {
    if value.len() == 5 && NaiveTime::parse_from_str(value, "%H:%M").is_ok() {
        return Ok(());
    }
    let mut err = ValidationError::new("clock_time");
    err.message = Some(format!("'{value}' is not a HH:MM time").into());
    Err(err)
}

/// Parses an already validated `HH:MM` string.
pub fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

// ───────────────────────────────────────
// Employees & wellness metrics (HR side)
// ───────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub join_date: DateTime<Utc>,
    pub manager_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InsertEmployee {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub department: String,
    #[validate(length(min = 1))]
    pub position: String,
    pub join_date: DateTime<Utc>,
    #[serde(default)]
    pub manager_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeWellnessMetrics {
    pub id: i64,
    pub employee_id: i64,
    pub date: DateTime<Utc>,
    pub stress_level: Option<i32>,       // 1-10
    pub sleep_quality: Option<i32>,      // 1-10
    pub mood_rating: Option<i32>,        // 1-10
    pub work_life_balance: Option<i32>,  // 1-10
    pub productivity_score: Option<i32>, // 1-10
    pub engagement_level: Option<i32>,   // 1-10
    pub session_count: i32,
    pub session_duration: i32,           // minutes
}

/// `employeeId` always comes from the path, so any body value (and a client
/// `date`) is ignored when reading.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct InsertEmployeeWellnessMetrics {
    #[serde(skip_deserializing)]
    pub employee_id: i64,
    #[validate(range(min = 1, max = 10))]
    pub stress_level: Option<i32>,
    #[validate(range(min = 1, max = 10))]
    pub sleep_quality: Option<i32>,
    #[validate(range(min = 1, max = 10))]
    pub mood_rating: Option<i32>,
    #[validate(range(min = 1, max = 10))]
    pub work_life_balance: Option<i32>,
    #[validate(range(min = 1, max = 10))]
    pub productivity_score: Option<i32>,
    #[validate(range(min = 1, max = 10))]
    pub engagement_level: Option<i32>,
    #[validate(range(min = 0))]
    pub session_count: Option<i32>,
    #[validate(range(min = 0))]
    pub session_duration: Option<i32>,
}

// ───────────────────────────────────────
// Appointments
// ───────────────────────────────────────
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub doctor_id: i64,
    pub patient_id: i64,
    pub appointment_date: DateTime<Utc>,
    pub duration: i32,            // minutes
    pub status: AppointmentStatus,
    #[serde(rename = "type")]
    pub kind: String,             // consultation | therapy | follow-up
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InsertAppointment {
    #[validate(range(min = 1))]
    pub doctor_id: i64,
    #[validate(range(min = 1))]
    pub patient_id: i64,
    pub appointment_date: DateTime<Utc>,
    #[serde(default)]
    #[validate(range(min = 1, max = 480))]
    pub duration: Option<i32>,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub kind: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn slot(day: i32, start: &str, end: &str) -> InsertDoctorAvailability {
        InsertDoctorAvailability {
            doctor_id: 1,
            day_of_week: day,
            start_time: start.into(),
            end_time: end.into(),
            is_available: Some(true),
        }
    }

    #[test]
    fn clock_time_accepts_only_hh_mm() {
        assert!(validate_clock_time("09:00").is_ok());
        assert!(validate_clock_time("23:59").is_ok());
        assert!(validate_clock_time("9:00").is_err());
        assert!(validate_clock_time("24:00").is_err());
        assert!(validate_clock_time("09:00:00").is_err());
        assert!(validate_clock_time("noon").is_err());
    }

    #[test]
    fn availability_batch_rejects_any_bad_row() {
        let ok = AvailabilityBatch(vec![slot(1, "09:00", "17:00"), slot(6, "10:00", "12:00")]);
        assert!(ok.validate().is_ok());

        let bad_day = AvailabilityBatch(vec![slot(1, "09:00", "17:00"), slot(7, "09:00", "17:00")]);
        assert!(bad_day.validate().is_err());

        let bad_time = AvailabilityBatch(vec![slot(2, "9am", "17:00")]);
        assert!(bad_time.validate().is_err());
    }

    #[test]
    fn wellness_insert_ignores_client_date_and_bounds_ratings() {
        let parsed: InsertEmployeeWellnessMetrics = serde_json::from_value(json!({
            "date": "2001-01-01T00:00:00Z",
            "stressLevel": 4,
            "moodRating": 8
        }))
        .unwrap();
        assert_eq!(parsed.stress_level, Some(4));
        assert_eq!(parsed.sleep_quality, None);
        assert!(parsed.validate().is_ok());

        let out_of_range = InsertEmployeeWellnessMetrics {
            mood_rating: Some(11),
            ..Default::default()
        };
        assert!(out_of_range.validate().is_err());
    }

    #[test]
    fn appointment_requires_type() {
        let missing = serde_json::from_value::<InsertAppointment>(json!({
            "doctorId": 1,
            "patientId": 2,
            "appointmentDate": "2026-10-20T09:00:00Z"
        }));
        assert!(missing.is_err());

        let parsed: InsertAppointment = serde_json::from_value(json!({
            "doctorId": 1,
            "patientId": 2,
            "appointmentDate": "2026-10-20T09:00:00Z",
            "type": "therapy",
            "status": "completed"
        }))
        .unwrap();
        assert_eq!(parsed.status, Some(AppointmentStatus::Completed));
        assert_eq!(parsed.duration, None);
    }

    #[test]
    fn user_password_is_never_serialized() {
        let user = User { id: 1, username: "dr.kim".into(), password: "abc".into() };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value, json!({"id": 1, "username": "dr.kim"}));
    }
}
