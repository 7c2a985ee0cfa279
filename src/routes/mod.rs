use serde::Deserialize;

use crate::models::DEFAULT_METRICS_WINDOW;

pub mod analytics;
pub mod appointments;
pub mod availability;
pub mod employees;
pub mod extract;
pub mod health;
pub mod users;
pub mod wellness;

/// `?days=N` window over the newest-first metric list.
#[derive(Debug, Deserialize)]
pub struct DaysQ {
    pub days: Option<usize>,
}

impl DaysQ {
    pub fn window(&self) -> usize {
        self.days.unwrap_or(DEFAULT_METRICS_WINDOW)
    }
}
