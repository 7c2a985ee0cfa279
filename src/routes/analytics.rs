// src/routes/analytics.rs

use std::collections::HashMap;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use super::DaysQ;
use crate::{
    analytics::{self, DoctorDashboard, WellnessOverview},
    error::ApiResult,
    AppState,
};

/// GET /api/analytics/wellness?days=N: HR dashboard cards.
pub async fn wellness_overview(
    State(state): State<AppState>,
    query: Result<Query<DaysQ>, QueryRejection>,
) -> ApiResult<Json<WellnessOverview>> {
    let Query(q) = query?;
    let employees = state.storage.get_all_employees().await?;

    let mut metrics = HashMap::with_capacity(employees.len());
    for e in &employees {
        let rows = state.storage.get_employee_wellness_metrics(e.id, q.window()).await?;
        metrics.insert(e.id, rows);
    }

    Ok(Json(analytics::overview(&employees, &metrics)))
}

#[derive(Deserialize)]
pub struct DashboardQ {
    pub date: Option<NaiveDate>,
}

/// GET /api/doctor/:doctorId/dashboard?date=YYYY-MM-DD (defaults to today, UTC)
pub async fn doctor_dashboard(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<DashboardQ>, QueryRejection>,
) -> ApiResult<Json<DoctorDashboard>> {
    let Path(doctor_id) = path?;
    let Query(q) = query?;
    let date = q.date.unwrap_or_else(|| Utc::now().date_naive());

    let appointments = state.storage.get_appointments(Some(doctor_id)).await?;
    let availability = state.storage.get_doctor_availability(doctor_id).await?;
    Ok(Json(analytics::doctor_dashboard(doctor_id, date, &appointments, &availability)))
}
