// src/routes/appointments.rs

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use super::extract::ValidatedJson;
use crate::{
    error::ApiResult,
    models::{Appointment, InsertAppointment},
    AppState,
};

#[derive(Deserialize)]
pub struct ListQ {
    #[serde(rename = "doctorId")]
    pub doctor_id: Option<i64>,
}

pub async fn list_appointments(
    State(state): State<AppState>,
    query: Result<Query<ListQ>, QueryRejection>,
) -> ApiResult<Json<Vec<Appointment>>> {
    let Query(q) = query?;
    Ok(Json(state.storage.get_appointments(q.doctor_id).await?))
}

pub async fn create_appointment(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<InsertAppointment>,
) -> ApiResult<Json<Appointment>> {
    let row = state.storage.create_appointment(body).await?;
    tracing::info!(
        appointment_id = row.id,
        doctor_id = row.doctor_id,
        at = %row.appointment_date,
        "appointment booked"
    );
    Ok(Json(row))
}
