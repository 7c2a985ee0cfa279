// src/routes/availability.rs

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use super::extract::ValidatedJson;
use crate::{
    error::{ApiError, ApiResult},
    models::{AvailabilityBatch, DoctorAvailability},
    AppState,
};

/// GET /api/doctor/:doctorId/availability
pub async fn get_availability(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<DoctorAvailability>>> {
    let Path(doctor_id) = path?;
    let rows = state.storage.get_doctor_availability(doctor_id).await?;
    Ok(Json(rows))
}

/// PUT /api/doctor/:doctorId/availability
///
/// Whole-week replace: the doctor's previous rows are dropped and the body is
/// stored under fresh ids. Every row must name the doctor in the path.
pub async fn replace_availability(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    ValidatedJson(AvailabilityBatch(items)): ValidatedJson<AvailabilityBatch>,
) -> ApiResult<Json<Vec<DoctorAvailability>>> {
    let Path(doctor_id) = path?;

    if let Some(row) = items.iter().find(|it| it.doctor_id != doctor_id) {
        return Err(ApiError::Validation(format!(
            "doctorId {} does not match doctor {doctor_id} in the path",
            row.doctor_id
        )));
    }

    let rows = state.storage.update_doctor_availability(doctor_id, items).await?;
    tracing::info!(doctor_id, rows = rows.len(), "weekly availability replaced");
    Ok(Json(rows))
}
