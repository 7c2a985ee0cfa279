// src/storage/seed.rs
//! Demo data for local runs: five employees with a month of daily check-ins.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use rand::Rng;

use super::MemStorage;
use crate::models::{Employee, EmployeeWellnessMetrics};

const SAMPLE_EMPLOYEES: [(&str, &str, &str, &str, (i32, u32, u32)); 5] = [
    ("Sarah Johnson", "sarah.johnson@company.com", "Engineering", "Senior Developer", (2023, 1, 15)),
    ("Michael Chen", "michael.chen@company.com", "Marketing", "Marketing Manager", (2022, 8, 20)),
    ("Emily Davis", "emily.davis@company.com", "HR", "HR Specialist", (2023, 3, 10)),
    ("David Rodriguez", "david.rodriguez@company.com", "Engineering", "Frontend Developer", (2023, 6, 1)),
    ("Lisa Wang", "lisa.wang@company.com", "Design", "UX Designer", (2022, 11, 30)),
];

const SAMPLE_DAYS: i64 = 30;

impl MemStorage {
    pub fn with_sample_data() -> Self {
        let storage = Self::new();
        let mut rng = rand::thread_rng();
        let now = Utc::now();

        for (name, email, department, position, (y, m, d)) in SAMPLE_EMPLOYEES {
            let id = Self::next_id(&storage.employee_counter);
            let join_date = NaiveDate::from_ymd_opt(y, m, d)
                .and_then(|day| day.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive))
                .unwrap_or(now);
            storage.employees.insert(
                id,
                Employee {
                    id,
                    name: name.to_string(),
                    email: email.to_string(),
                    department: department.to_string(),
                    position: position.to_string(),
                    join_date,
                    manager_id: None,
                },
            );

            // index 0 is today, so the list is already newest first
            let metrics: Vec<EmployeeWellnessMetrics> = (0..SAMPLE_DAYS)
                .map(|days_ago| EmployeeWellnessMetrics {
                    id: Self::next_id(&storage.metrics_counter),
                    employee_id: id,
                    date: now - Duration::days(days_ago),
                    stress_level: Some(rng.gen_range(3..=6)),
                    sleep_quality: Some(rng.gen_range(6..=8)),
                    mood_rating: Some(rng.gen_range(6..=8)),
                    work_life_balance: Some(rng.gen_range(5..=8)),
                    productivity_score: Some(rng.gen_range(7..=9)),
                    engagement_level: Some(rng.gen_range(6..=8)),
                    session_count: rng.gen_range(0..=2),
                    session_duration: rng.gen_range(15..60),
                })
                .collect();
            storage.wellness_metrics.insert(id, metrics);
        }

        tracing::debug!(employees = SAMPLE_EMPLOYEES.len(), "seeded sample data");
        storage
    }
}
