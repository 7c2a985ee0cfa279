// src/storage/memory.rs
//! Volatile in-process store. Ids come from per-entity counters starting at 1
//! and are never reused.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use super::Storage;
use crate::models::{
    Appointment, DoctorAvailability, Employee, EmployeeWellnessMetrics, InsertAppointment,
    InsertDoctorAvailability, InsertEmployee, InsertEmployeeWellnessMetrics, InsertUser, User,
    DEFAULT_APPOINTMENT_MINUTES,
};

pub struct MemStorage {
    pub(super) users: DashMap<i64, User>,
    pub(super) doctor_availabilities: DashMap<i64, Vec<DoctorAvailability>>,
    pub(super) employees: DashMap<i64, Employee>,
    /// Newest record first.
    pub(super) wellness_metrics: DashMap<i64, Vec<EmployeeWellnessMetrics>>,
    pub(super) appointments: DashMap<i64, Appointment>,
    pub(super) user_counter: AtomicI64,
    pub(super) availability_counter: AtomicI64,
    pub(super) employee_counter: AtomicI64,
    pub(super) metrics_counter: AtomicI64,
    pub(super) appointment_counter: AtomicI64,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            doctor_availabilities: DashMap::new(),
            employees: DashMap::new(),
            wellness_metrics: DashMap::new(),
            appointments: DashMap::new(),
            user_counter: AtomicI64::new(1),
            availability_counter: AtomicI64::new(1),
            employee_counter: AtomicI64::new(1),
            metrics_counter: AtomicI64::new(1),
            appointment_counter: AtomicI64::new(1),
        }
    }

    pub(super) fn next_id(counter: &AtomicI64) -> i64 {
        counter.fetch_add(1, Ordering::SeqCst)
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_user(&self, id: i64) -> anyhow::Result<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn get_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.value().clone()))
    }

    async fn create_user(&self, user: InsertUser) -> anyhow::Result<User> {
        let id = Self::next_id(&self.user_counter);
        let user = User { id, username: user.username, password: user.password };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_doctor_availability(&self, doctor_id: i64) -> anyhow::Result<Vec<DoctorAvailability>> {
        Ok(self
            .doctor_availabilities
            .get(&doctor_id)
            .map(|rows| rows.clone())
            .unwrap_or_default())
    }

    async fn update_doctor_availability(
        &self,
        doctor_id: i64,
        availability: Vec<InsertDoctorAvailability>,
    ) -> anyhow::Result<Vec<DoctorAvailability>> {
        let now = Utc::now();
        let rows: Vec<DoctorAvailability> = availability
            .into_iter()
            .map(|a| DoctorAvailability {
                id: Self::next_id(&self.availability_counter),
                doctor_id: a.doctor_id,
                day_of_week: a.day_of_week,
                start_time: a.start_time,
                end_time: a.end_time,
                is_available: a.is_available.unwrap_or(true),
                created_at: now,
                updated_at: now,
            })
            .collect();

        self.doctor_availabilities.insert(doctor_id, rows.clone());
        Ok(rows)
    }

    async fn get_all_employees(&self) -> anyhow::Result<Vec<Employee>> {
        let mut rows: Vec<Employee> = self.employees.iter().map(|e| e.value().clone()).collect();
        rows.sort_by_key(|e| e.id);
        Ok(rows)
    }

    async fn get_employee(&self, id: i64) -> anyhow::Result<Option<Employee>> {
        Ok(self.employees.get(&id).map(|e| e.clone()))
    }

    async fn create_employee(&self, employee: InsertEmployee) -> anyhow::Result<Employee> {
        let id = Self::next_id(&self.employee_counter);
        let employee = Employee {
            id,
            name: employee.name,
            email: employee.email,
            department: employee.department,
            position: employee.position,
            join_date: employee.join_date,
            manager_id: employee.manager_id,
        };
        self.employees.insert(id, employee.clone());
        Ok(employee)
    }

    async fn get_employee_wellness_metrics(
        &self,
        employee_id: i64,
        days: usize,
    ) -> anyhow::Result<Vec<EmployeeWellnessMetrics>> {
        Ok(self
            .wellness_metrics
            .get(&employee_id)
            .map(|rows| rows.iter().take(days).cloned().collect())
            .unwrap_or_default())
    }

    async fn create_employee_wellness_metrics(
        &self,
        metrics: InsertEmployeeWellnessMetrics,
    ) -> anyhow::Result<EmployeeWellnessMetrics> {
        let row = EmployeeWellnessMetrics {
            id: Self::next_id(&self.metrics_counter),
            employee_id: metrics.employee_id,
            date: Utc::now(),
            stress_level: metrics.stress_level,
            sleep_quality: metrics.sleep_quality,
            mood_rating: metrics.mood_rating,
            work_life_balance: metrics.work_life_balance,
            productivity_score: metrics.productivity_score,
            engagement_level: metrics.engagement_level,
            session_count: metrics.session_count.unwrap_or(0),
            session_duration: metrics.session_duration.unwrap_or(0),
        };

        self.wellness_metrics
            .entry(metrics.employee_id)
            .or_default()
            .insert(0, row.clone());
        Ok(row)
    }

    async fn get_appointments(&self, doctor_id: Option<i64>) -> anyhow::Result<Vec<Appointment>> {
        let mut rows: Vec<Appointment> = self
            .appointments
            .iter()
            .filter(|a| doctor_id.map_or(true, |d| a.doctor_id == d))
            .map(|a| a.value().clone())
            .collect();
        rows.sort_by_key(|a| a.id);
        Ok(rows)
    }

    async fn create_appointment(&self, appointment: InsertAppointment) -> anyhow::Result<Appointment> {
        let id = Self::next_id(&self.appointment_counter);
        let appointment = Appointment {
            id,
            doctor_id: appointment.doctor_id,
            patient_id: appointment.patient_id,
            appointment_date: appointment.appointment_date,
            duration: appointment.duration.unwrap_or(DEFAULT_APPOINTMENT_MINUTES),
            status: appointment.status.unwrap_or_default(),
            kind: appointment.kind,
            notes: appointment.notes,
        };
        self.appointments.insert(id, appointment.clone());
        Ok(appointment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus;
    use chrono::TimeZone;

    fn slot(doctor_id: i64, day: i32) -> InsertDoctorAvailability {
        InsertDoctorAvailability {
            doctor_id,
            day_of_week: day,
            start_time: "09:00".into(),
            end_time: "17:00".into(),
            is_available: None,
        }
    }

    fn appointment(doctor_id: i64) -> InsertAppointment {
        InsertAppointment {
            doctor_id,
            patient_id: 7,
            appointment_date: Utc.with_ymd_and_hms(2026, 10, 20, 9, 0, 0).unwrap(),
            duration: None,
            status: None,
            kind: "consultation".into(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn weekly_update_replaces_previous_rows() {
        let store = MemStorage::new();
        let first = store
            .update_doctor_availability(1, (0..7).map(|d| slot(1, d)).collect())
            .await
            .unwrap();
        assert_eq!(first.len(), 7);

        let second = store
            .update_doctor_availability(1, vec![slot(1, 1), slot(1, 2)])
            .await
            .unwrap();
        let stored = store.get_doctor_availability(1).await.unwrap();
        assert_eq!(stored, second);
        assert_eq!(stored.len(), 2);
        // ids are never reused across replacements
        assert!(stored.iter().all(|r| r.id > 7));
        assert!(stored.iter().all(|r| r.is_available));
    }

    #[tokio::test]
    async fn availability_is_scoped_per_doctor() {
        let store = MemStorage::new();
        store.update_doctor_availability(1, vec![slot(1, 1)]).await.unwrap();
        store.update_doctor_availability(2, vec![slot(2, 3), slot(2, 4)]).await.unwrap();
        store.update_doctor_availability(1, vec![]).await.unwrap();

        assert!(store.get_doctor_availability(1).await.unwrap().is_empty());
        assert_eq!(store.get_doctor_availability(2).await.unwrap().len(), 2);
        assert!(store.get_doctor_availability(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn metrics_are_prepended_and_stamped_with_now() {
        let store = MemStorage::new();
        let before = Utc::now();
        for mood in 1..=4 {
            store
                .create_employee_wellness_metrics(InsertEmployeeWellnessMetrics {
                    employee_id: 3,
                    mood_rating: Some(mood),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let rows = store.get_employee_wellness_metrics(3, 30).await.unwrap();
        let moods: Vec<_> = rows.iter().map(|r| r.mood_rating).collect();
        assert_eq!(moods, vec![Some(4), Some(3), Some(2), Some(1)]);
        assert!(rows.iter().all(|r| r.date >= before));
        assert!(rows.iter().all(|r| r.session_count == 0 && r.session_duration == 0));

        let limited = store.get_employee_wellness_metrics(3, 2).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].mood_rating, Some(4));
    }

    #[tokio::test]
    async fn appointments_get_defaults_and_filter_by_doctor() {
        let store = MemStorage::new();
        let created = store.create_appointment(appointment(1)).await.unwrap();
        assert_eq!(created.duration, DEFAULT_APPOINTMENT_MINUTES);
        assert_eq!(created.status, AppointmentStatus::Scheduled);
        assert_eq!(created.notes, None);

        store.create_appointment(appointment(2)).await.unwrap();
        store.create_appointment(appointment(1)).await.unwrap();

        let all = store.get_appointments(None).await.unwrap();
        assert_eq!(all.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        let mine = store.get_appointments(Some(1)).await.unwrap();
        assert_eq!(mine.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[tokio::test]
    async fn users_are_found_by_username() {
        let store = MemStorage::new();
        let user = store
            .create_user(InsertUser { username: "hr.lead".into(), password: "digest".into() })
            .await
            .unwrap();
        assert_eq!(user.id, 1);

        let found = store.get_user_by_username("hr.lead").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(store.get_user_by_username("nobody").await.unwrap().is_none());
        assert!(store.get_user(2).await.unwrap().is_none());
    }
}
