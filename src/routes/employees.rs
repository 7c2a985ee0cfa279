// src/routes/employees.rs

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use super::extract::ValidatedJson;
use crate::{
    error::{ApiError, ApiResult},
    models::{Employee, InsertEmployee},
    AppState,
};

pub async fn list_employees(State(state): State<AppState>) -> ApiResult<Json<Vec<Employee>>> {
    Ok(Json(state.storage.get_all_employees().await?))
}

pub async fn get_employee(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Employee>> {
    let Path(id) = path?;
    state
        .storage
        .get_employee(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Employee not found".into()))
}

/// POST /api/employees: email must be unused (case-insensitive).
pub async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<InsertEmployee>,
) -> ApiResult<Json<Employee>> {
    let taken = state
        .storage
        .get_all_employees()
        .await?
        .iter()
        .any(|e| e.email.eq_ignore_ascii_case(&body.email));
    if taken {
        return Err(ApiError::Validation(format!("email {} is already in use", body.email)));
    }

    if let Some(manager_id) = body.manager_id {
        if state.storage.get_employee(manager_id).await?.is_none() {
            return Err(ApiError::Validation(format!("manager {manager_id} does not exist")));
        }
    }

    let employee = state.storage.create_employee(body).await?;
    tracing::info!(employee_id = employee.id, department = %employee.department, "employee created");
    Ok(Json(employee))
}
