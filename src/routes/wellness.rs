// src/routes/wellness.rs

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use super::{extract::ValidatedJson, DaysQ};
use crate::{
    analytics::{self, WellnessSummary},
    error::{ApiError, ApiResult},
    models::{EmployeeWellnessMetrics, InsertEmployeeWellnessMetrics},
    AppState,
};

/// GET /api/employees/:employeeId/wellness-metrics?days=N
pub async fn list_metrics(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<DaysQ>, QueryRejection>,
) -> ApiResult<Json<Vec<EmployeeWellnessMetrics>>> {
    let Path(employee_id) = path?;
    let Query(q) = query?;
    let rows = state
        .storage
        .get_employee_wellness_metrics(employee_id, q.window())
        .await?;
    Ok(Json(rows))
}

/// POST /api/employees/:employeeId/wellness-metrics
///
/// The path id wins over any `employeeId` in the body and the record is
/// stamped with the server clock.
pub async fn record_metrics(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    ValidatedJson(mut body): ValidatedJson<InsertEmployeeWellnessMetrics>,
) -> ApiResult<Json<EmployeeWellnessMetrics>> {
    let Path(employee_id) = path?;
    body.employee_id = employee_id;
    let row = state.storage.create_employee_wellness_metrics(body).await?;
    tracing::info!(employee_id, metrics_id = row.id, "wellness metrics recorded");
    Ok(Json(row))
}

/// GET /api/employees/:employeeId/wellness-summary?days=N
pub async fn summary(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<DaysQ>, QueryRejection>,
) -> ApiResult<Json<WellnessSummary>> {
    let Path(employee_id) = path?;
    let Query(q) = query?;

    if state.storage.get_employee(employee_id).await?.is_none() {
        return Err(ApiError::NotFound("Employee not found".into()));
    }
    let rows = state
        .storage
        .get_employee_wellness_metrics(employee_id, q.window())
        .await?;
    Ok(Json(analytics::summarize(employee_id, &rows)))
}
