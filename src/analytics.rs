// src/analytics.rs
//! Aggregations behind the dashboard cards (HR overview, per-employee
//! summary, doctor dashboard). Pure functions over already loaded rows.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    parse_clock_time, Appointment, AppointmentStatus, DoctorAvailability, Employee,
    EmployeeWellnessMetrics,
};

/// Score change between the newer and older half that counts as movement.
const TREND_THRESHOLD: f64 = 0.25;
/// Average stress above this marks an employee as high stress.
const HIGH_STRESS_THRESHOLD: f64 = 6.0;
/// Department engagement (percent) below this is flagged.
const LOW_ENGAGEMENT_PERCENT: u32 = 50;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingAverages {
    pub stress_level: Option<f64>,
    pub sleep_quality: Option<f64>,
    pub mood_rating: Option<f64>,
    pub work_life_balance: Option<f64>,
    pub productivity_score: Option<f64>,
    pub engagement_level: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WellnessSummary {
    pub employee_id: i64,
    pub record_count: usize,
    pub averages: RatingAverages,
    pub wellness_score: Option<f64>,
    pub total_sessions: i64,
    pub total_session_minutes: i64,
    pub trend: Trend,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentWellness {
    pub department: String,
    pub employee_count: usize,
    pub wellness_score: Option<f64>,
    /// Percent of the department with at least one session in the window.
    pub engagement: u32,
    pub trend: Trend,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

/// A department needing intervention; `count` is the number of employees affected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRisk {
    pub department: String,
    pub issue: String,
    pub level: RiskLevel,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WellnessOverview {
    pub total_employees: usize,
    pub engagement_rate: u32,
    pub average_wellness_score: Option<f64>,
    pub departments: Vec<DepartmentWellness>,
    /// Most severe first.
    pub risks: Vec<DepartmentRisk>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDashboard {
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub appointments_today: usize,
    pub todays_schedule: Vec<Appointment>,
    pub upcoming_appointments: usize,
    pub active_patients: usize,
    pub completed_sessions: usize,
    pub weekly_available_hours: f64,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Mean of the present ratings; stress counts inverted (high stress, low score).
pub fn record_score(m: &EmployeeWellnessMetrics) -> Option<f64> {
    let ratings = [
        m.stress_level.map(|s| 11 - s),
        m.sleep_quality,
        m.mood_rating,
        m.work_life_balance,
        m.productivity_score,
        m.engagement_level,
    ];
    mean(ratings.into_iter().flatten().map(f64::from))
}

/// Newer-half mean minus older-half mean. `records` are newest first.
pub fn score_delta(records: &[EmployeeWellnessMetrics]) -> Option<f64> {
    let scored: Vec<f64> = records.iter().filter_map(record_score).collect();
    if scored.len() < 2 {
        return None;
    }
    let (newer, older) = scored.split_at(scored.len() / 2);
    Some(mean(newer.iter().copied())? - mean(older.iter().copied())?)
}

pub fn trend_from_delta(delta: Option<f64>) -> Trend {
    match delta {
        Some(d) if d > TREND_THRESHOLD => Trend::Up,
        Some(d) if d < -TREND_THRESHOLD => Trend::Down,
        _ => Trend::Stable,
    }
}

fn is_engaged(records: &[EmployeeWellnessMetrics]) -> bool {
    records.iter().any(|r| r.session_count > 0)
}

fn is_high_stress(records: &[EmployeeWellnessMetrics]) -> bool {
    mean(records.iter().filter_map(|r| r.stress_level).map(f64::from))
        .is_some_and(|avg| avg > HIGH_STRESS_THRESHOLD)
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 * 100.0) / whole as f64).round() as u32
}

pub fn summarize(employee_id: i64, records: &[EmployeeWellnessMetrics]) -> WellnessSummary {
    let avg = |pick: fn(&EmployeeWellnessMetrics) -> Option<i32>| {
        mean(records.iter().filter_map(pick).map(f64::from)).map(round1)
    };

    WellnessSummary {
        employee_id,
        record_count: records.len(),
        averages: RatingAverages {
            stress_level: avg(|m| m.stress_level),
            sleep_quality: avg(|m| m.sleep_quality),
            mood_rating: avg(|m| m.mood_rating),
            work_life_balance: avg(|m| m.work_life_balance),
            productivity_score: avg(|m| m.productivity_score),
            engagement_level: avg(|m| m.engagement_level),
        },
        wellness_score: mean(records.iter().filter_map(record_score)).map(round1),
        total_sessions: records.iter().map(|r| i64::from(r.session_count)).sum(),
        total_session_minutes: records.iter().map(|r| i64::from(r.session_duration)).sum(),
        trend: trend_from_delta(score_delta(records)),
    }
}

/// HR overview. `metrics` maps employee id to its newest-first window.
pub fn overview(
    employees: &[Employee],
    metrics: &HashMap<i64, Vec<EmployeeWellnessMetrics>>,
) -> WellnessOverview {
    let empty: &[EmployeeWellnessMetrics] = &[];
    let window = |id: i64| metrics.get(&id).map(Vec::as_slice).unwrap_or(empty);

    let mut by_department: BTreeMap<&str, Vec<&Employee>> = BTreeMap::new();
    for e in employees {
        by_department.entry(e.department.as_str()).or_default().push(e);
    }

    let mut risks: Vec<DepartmentRisk> = Vec::new();
    let departments = by_department
        .into_iter()
        .map(|(department, members)| {
            let engaged = members.iter().filter(|e| is_engaged(window(e.id))).count();
            let engagement = percent(engaged, members.len());

            let stressed = members.iter().filter(|e| is_high_stress(window(e.id))).count();
            if stressed > 0 {
                let level = match percent(stressed, members.len()) {
                    p if p >= 50 => RiskLevel::High,
                    p if p >= 25 => RiskLevel::Medium,
                    _ => RiskLevel::Low,
                };
                risks.push(DepartmentRisk {
                    department: department.to_string(),
                    issue: format!("High stress indicators ({stressed} employees)"),
                    level,
                    count: stressed,
                });
            }
            if engagement < LOW_ENGAGEMENT_PERCENT {
                let level = if engagement < LOW_ENGAGEMENT_PERCENT / 2 {
                    RiskLevel::High
                } else {
                    RiskLevel::Medium
                };
                risks.push(DepartmentRisk {
                    department: department.to_string(),
                    issue: "Low engagement rates".into(),
                    level,
                    count: members.len() - engaged,
                });
            }

            let score = mean(
                members
                    .iter()
                    .filter_map(|e| mean(window(e.id).iter().filter_map(record_score))),
            );
            let delta = mean(members.iter().filter_map(|e| score_delta(window(e.id))));
            DepartmentWellness {
                department: department.to_string(),
                employee_count: members.len(),
                wellness_score: score.map(round1),
                engagement,
                trend: trend_from_delta(delta),
            }
        })
        .collect();
    risks.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.department.cmp(&b.department)));

    let engaged = employees.iter().filter(|e| is_engaged(window(e.id))).count();
    let average = mean(
        employees
            .iter()
            .filter_map(|e| mean(window(e.id).iter().filter_map(record_score))),
    );

    WellnessOverview {
        total_employees: employees.len(),
        engagement_rate: percent(engaged, employees.len()),
        average_wellness_score: average.map(round1),
        departments,
        risks,
    }
}

/// Weekly hours across available rows; rows whose end is not after start count zero.
pub fn weekly_available_hours(rows: &[DoctorAvailability]) -> f64 {
    let minutes: i64 = rows
        .iter()
        .filter(|r| r.is_available)
        .filter_map(|r| Some((parse_clock_time(&r.start_time)?, parse_clock_time(&r.end_time)?)))
        .map(|(start, end)| (end - start).num_minutes().max(0))
        .sum();
    round1(minutes as f64 / 60.0)
}

/// `appointments` must already be limited to `doctor_id`.
pub fn doctor_dashboard(
    doctor_id: i64,
    date: NaiveDate,
    appointments: &[Appointment],
    availability: &[DoctorAvailability],
) -> DoctorDashboard {
    let mut todays_schedule: Vec<Appointment> = appointments
        .iter()
        .filter(|a| a.appointment_date.date_naive() == date)
        .cloned()
        .collect();
    todays_schedule.sort_by_key(|a| a.appointment_date);

    let upcoming = appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Scheduled && a.appointment_date.date_naive() > date)
        .count();
    let active_patients: HashSet<i64> = appointments
        .iter()
        .filter(|a| a.status != AppointmentStatus::Cancelled)
        .map(|a| a.patient_id)
        .collect();
    let completed = appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Completed)
        .count();

    DoctorDashboard {
        doctor_id,
        date,
        appointments_today: todays_schedule.len(),
        todays_schedule,
        upcoming_appointments: upcoming,
        active_patients: active_patients.len(),
        completed_sessions: completed,
        weekly_available_hours: weekly_available_hours(availability),
    }
}
