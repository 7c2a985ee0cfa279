// src/lib.rs
//! Wellness scheduling & analytics API: doctor availability, employees,
//! wellness metrics and appointments over a volatile in-memory store, plus a
//! typed client with the availability editor used by the doctor portal.

use std::sync::Arc;

use axum::{
    body::Body,
    http::Request,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod analytics;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod storage;

use storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self { storage: Arc::new(storage) }
    }
}

pub fn app(state: AppState) -> Router {
    // Very permissive CORS for local dev (tighten for prod)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
        tracing::info_span!(
            "request",
            id = %uuid::Uuid::new_v4(),
            method = %req.method(),
            uri = %req.uri(),
        )
    });

    Router::new()
        // health
        .route("/health", get(routes::health::health))
        // doctor portal
        .route(
            "/api/doctor/:doctor_id/availability",
            get(routes::availability::get_availability)
                .put(routes::availability::replace_availability),
        )
        .route(
            "/api/doctor/:doctor_id/dashboard",
            get(routes::analytics::doctor_dashboard),
        )
        // employees
        .route(
            "/api/employees",
            get(routes::employees::list_employees).post(routes::employees::create_employee),
        )
        .route("/api/employees/:employee_id", get(routes::employees::get_employee))
        // wellness metrics
        .route(
            "/api/employees/:employee_id/wellness-metrics",
            get(routes::wellness::list_metrics).post(routes::wellness::record_metrics),
        )
        .route(
            "/api/employees/:employee_id/wellness-summary",
            get(routes::wellness::summary),
        )
        .route("/api/analytics/wellness", get(routes::analytics::wellness_overview))
        // appointments
        .route(
            "/api/appointments",
            get(routes::appointments::list_appointments)
                .post(routes::appointments::create_appointment),
        )
        // users
        .route("/api/users", post(routes::users::create_user))
        .route("/api/users/:user_id", get(routes::users::get_user))
        // state & middleware
        .with_state(state)
        .layer(cors)
        .layer(trace)
}
