// src/storage/mod.rs
//! Storage seam. Handlers only see `dyn Storage`; the binary wires in the
//! volatile `MemStorage`.

use async_trait::async_trait;

use crate::models::{
    Appointment, DoctorAvailability, Employee, EmployeeWellnessMetrics, InsertAppointment,
    InsertDoctorAvailability, InsertEmployee, InsertEmployeeWellnessMetrics, InsertUser, User,
};

mod memory;
mod seed;

pub use memory::MemStorage;

#[async_trait]
pub trait Storage: Send + Sync {
    // Users
    async fn get_user(&self, id: i64) -> anyhow::Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
    async fn create_user(&self, user: InsertUser) -> anyhow::Result<User>;

    // Doctor availability
    async fn get_doctor_availability(&self, doctor_id: i64) -> anyhow::Result<Vec<DoctorAvailability>>;
    /// Discards every previous row of `doctor_id` and stores `availability`
    /// under freshly minted ids.
    async fn update_doctor_availability(
        &self,
        doctor_id: i64,
        availability: Vec<InsertDoctorAvailability>,
    ) -> anyhow::Result<Vec<DoctorAvailability>>;

    // Employees
    async fn get_all_employees(&self) -> anyhow::Result<Vec<Employee>>;
    async fn get_employee(&self, id: i64) -> anyhow::Result<Option<Employee>>;
    async fn create_employee(&self, employee: InsertEmployee) -> anyhow::Result<Employee>;

    // Wellness metrics
    /// Newest first, at most `days` records.
    async fn get_employee_wellness_metrics(
        &self,
        employee_id: i64,
        days: usize,
    ) -> anyhow::Result<Vec<EmployeeWellnessMetrics>>;
    async fn create_employee_wellness_metrics(
        &self,
        metrics: InsertEmployeeWellnessMetrics,
    ) -> anyhow::Result<EmployeeWellnessMetrics>;

    // Appointments
    async fn get_appointments(&self, doctor_id: Option<i64>) -> anyhow::Result<Vec<Appointment>>;
    async fn create_appointment(&self, appointment: InsertAppointment) -> anyhow::Result<Appointment>;
}
