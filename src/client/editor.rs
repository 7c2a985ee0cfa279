// src/client/editor.rs
//! Form state behind the doctor's availability screen: a fixed seven-day
//! pattern plus date-specific overrides. Saving submits the whole week.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use super::{ApiClient, ClientError};
use crate::models::{DoctorAvailability, InsertDoctorAvailability};

pub const DAYS_OF_WEEK: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];
pub const DEFAULT_START: &str = "09:00";
pub const DEFAULT_END: &str = "17:00";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("day index {0} is outside Sunday..Saturday")]
    DayOutOfRange(usize),

    #[error("no override for {0}")]
    NoOverride(NaiveDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAvailability {
    pub day_of_week: i32,
    pub is_available: bool,
    pub start_time: String,
    pub end_time: String,
}

impl DayAvailability {
    fn new(day_of_week: usize, is_available: bool) -> Self {
        Self {
            day_of_week: day_of_week as i32,
            is_available,
            start_time: DEFAULT_START.into(),
            end_time: DEFAULT_END.into(),
        }
    }

    pub fn day_name(&self) -> &'static str {
        usize::try_from(self.day_of_week)
            .ok()
            .and_then(|d| DAYS_OF_WEEK.get(d).copied())
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateOverride {
    pub date: NaiveDate,
    pub is_available: bool,
    pub start_time: String,
    pub end_time: String,
}

impl DateOverride {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            is_available: true,
            start_time: DEFAULT_START.into(),
            end_time: DEFAULT_END.into(),
        }
    }
}

/// What applies on a given calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveAvailability<'a> {
    pub is_available: bool,
    pub start_time: &'a str,
    pub end_time: &'a str,
    pub from_override: bool,
}

type Week = [DayAvailability; 7];

/// Monday to Friday, 09:00-17:00.
fn default_week() -> Week {
    std::array::from_fn(|day| DayAvailability::new(day, (1..=5).contains(&day)))
}

/// Days missing from `rows` come back unavailable; a later row for the same day wins.
fn week_from_rows(rows: &[DoctorAvailability]) -> Week {
    let mut week: Week = std::array::from_fn(|day| DayAvailability::new(day, false));
    for row in rows {
        let Ok(day) = usize::try_from(row.day_of_week) else { continue };
        if let Some(slot) = week.get_mut(day) {
            slot.is_available = row.is_available;
            slot.start_time = row.start_time.clone();
            slot.end_time = row.end_time.clone();
        }
    }
    week
}

#[derive(Debug, Clone)]
pub struct AvailabilityEditor {
    doctor_id: i64,
    weekly: Week,
    overrides: Vec<DateOverride>,
    server: Vec<DoctorAvailability>,
}

impl AvailabilityEditor {
    pub fn new(doctor_id: i64) -> Self {
        Self {
            doctor_id,
            weekly: default_week(),
            overrides: Vec::new(),
            server: Vec::new(),
        }
    }

    pub fn doctor_id(&self) -> i64 {
        self.doctor_id
    }

    pub fn weekly(&self) -> &[DayAvailability] {
        &self.weekly
    }

    /// Adopt server rows as both the baseline and the current form state.
    pub fn load(&mut self, rows: &[DoctorAvailability]) {
        self.server = rows.to_vec();
        self.weekly = self.baseline();
    }

    fn baseline(&self) -> Week {
        if self.server.is_empty() {
            default_week()
        } else {
            week_from_rows(&self.server)
        }
    }

    /// Throws away local weekly edits. A doctor with nothing saved keeps the form as is.
    pub fn reset(&mut self) {
        if !self.server.is_empty() {
            self.weekly = week_from_rows(&self.server);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.weekly != self.baseline()
    }

    fn day_mut(&mut self, day: usize) -> Result<&mut DayAvailability, EditorError> {
        self.weekly.get_mut(day).ok_or(EditorError::DayOutOfRange(day))
    }

    pub fn toggle_day(&mut self, day: usize, is_available: bool) -> Result<(), EditorError> {
        let doctor_id = self.doctor_id;
        let slot = self.day_mut(day)?;
        slot.is_available = is_available;
        tracing::trace!(doctor_id, day = slot.day_name(), is_available, "day toggled");
        Ok(())
    }

    pub fn set_time(&mut self, day: usize, field: TimeField, value: &str) -> Result<(), EditorError> {
        let slot = self.day_mut(day)?;
        match field {
            TimeField::Start => slot.start_time = value.to_string(),
            TimeField::End => slot.end_time = value.to_string(),
        }
        Ok(())
    }

    /// Resets an existing override for `date` to the default window, or appends one.
    pub fn add_override(&mut self, date: NaiveDate) {
        match self.overrides.iter_mut().find(|o| o.date == date) {
            Some(existing) => *existing = DateOverride::new(date),
            None => self.overrides.push(DateOverride::new(date)),
        }
    }

    fn override_mut(&mut self, date: NaiveDate) -> Result<&mut DateOverride, EditorError> {
        self.overrides
            .iter_mut()
            .find(|o| o.date == date)
            .ok_or(EditorError::NoOverride(date))
    }

    pub fn set_override_available(&mut self, date: NaiveDate, is_available: bool) -> Result<(), EditorError> {
        self.override_mut(date)?.is_available = is_available;
        Ok(())
    }

    pub fn set_override_time(&mut self, date: NaiveDate, field: TimeField, value: &str) -> Result<(), EditorError> {
        let o = self.override_mut(date)?;
        match field {
            TimeField::Start => o.start_time = value.to_string(),
            TimeField::End => o.end_time = value.to_string(),
        }
        Ok(())
    }

    pub fn remove_override(&mut self, date: NaiveDate) {
        self.overrides.retain(|o| o.date != date);
    }

    pub fn override_for(&self, date: NaiveDate) -> Option<&DateOverride> {
        self.overrides.iter().find(|o| o.date == date)
    }

    /// Overrides in calendar order.
    pub fn overrides(&self) -> Vec<&DateOverride> {
        let mut sorted: Vec<&DateOverride> = self.overrides.iter().collect();
        sorted.sort_by_key(|o| o.date);
        sorted
    }

    pub fn effective_for(&self, date: NaiveDate) -> EffectiveAvailability<'_> {
        if let Some(o) = self.override_for(date) {
            return EffectiveAvailability {
                is_available: o.is_available,
                start_time: &o.start_time,
                end_time: &o.end_time,
                from_override: true,
            };
        }
        let day = &self.weekly[date.weekday().num_days_from_sunday() as usize];
        EffectiveAvailability {
            is_available: day.is_available,
            start_time: &day.start_time,
            end_time: &day.end_time,
            from_override: false,
        }
    }

    /// All seven days, as sent to the bulk update.
    pub fn payload(&self) -> Vec<InsertDoctorAvailability> {
        self.weekly
            .iter()
            .map(|d| InsertDoctorAvailability {
                doctor_id: self.doctor_id,
                day_of_week: d.day_of_week,
                start_time: d.start_time.clone(),
                end_time: d.end_time.clone(),
                is_available: Some(d.is_available),
            })
            .collect()
    }

    pub async fn fetch(&mut self, client: &ApiClient) -> Result<(), ClientError> {
        let rows = client.doctor_availability(self.doctor_id).await?;
        self.load(&rows);
        Ok(())
    }

    /// Submits the full week; the server's reply becomes the new baseline.
    pub async fn save(&mut self, client: &ApiClient) -> Result<Vec<DoctorAvailability>, ClientError> {
        let rows = client
            .update_doctor_availability(self.doctor_id, &self.payload())
            .await?;
        self.load(&rows);
        tracing::debug!(doctor_id = self.doctor_id, rows = rows.len(), "availability saved");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(id: i64, day: i32, start: &str, end: &str, is_available: bool) -> DoctorAvailability {
        DoctorAvailability {
            id,
            doctor_id: 1,
            day_of_week: day,
            start_time: start.into(),
            end_time: end.into(),
            is_available,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn starts_with_weekday_defaults() {
        let editor = AvailabilityEditor::new(1);
        assert_eq!(editor.doctor_id(), 1);
        let names: Vec<&str> = editor.weekly().iter().map(DayAvailability::day_name).collect();
        assert_eq!(names, DAYS_OF_WEEK);
        let open: Vec<bool> = editor.weekly().iter().map(|d| d.is_available).collect();
        assert_eq!(open, vec![false, true, true, true, true, true, false]);
        assert!(editor.weekly().iter().all(|d| d.start_time == "09:00" && d.end_time == "17:00"));
        assert!(!editor.is_dirty());
    }

    #[test]
    fn edits_touch_only_the_indexed_day() {
        let mut editor = AvailabilityEditor::new(1);
        editor.toggle_day(6, true).unwrap();
        editor.set_time(6, TimeField::Start, "10:00").unwrap();
        editor.set_time(6, TimeField::End, "14:00").unwrap();

        let sat = &editor.weekly()[6];
        assert!(sat.is_available);
        assert_eq!((sat.start_time.as_str(), sat.end_time.as_str()), ("10:00", "14:00"));
        assert_eq!(editor.weekly()[5], DayAvailability::new(5, true));
        assert!(editor.is_dirty());

        assert_eq!(editor.toggle_day(7, true), Err(EditorError::DayOutOfRange(7)));
    }

    #[test]
    fn adding_an_existing_override_resets_it() {
        let mut editor = AvailabilityEditor::new(1);
        let day = date(2026, 12, 24);
        editor.add_override(day);
        editor.set_override_available(day, false).unwrap();
        editor.set_override_time(day, TimeField::End, "12:00").unwrap();

        editor.add_override(day);
        assert_eq!(editor.overrides().len(), 1);
        assert_eq!(editor.override_for(day), Some(&DateOverride::new(day)));
    }

    #[test]
    fn overrides_are_listed_by_date_and_removable() {
        let mut editor = AvailabilityEditor::new(1);
        editor.add_override(date(2026, 12, 31));
        editor.add_override(date(2026, 11, 2));
        editor.add_override(date(2026, 12, 1));

        let dates: Vec<_> = editor.overrides().iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![date(2026, 11, 2), date(2026, 12, 1), date(2026, 12, 31)]);

        editor.remove_override(date(2026, 12, 1));
        assert_eq!(editor.overrides().len(), 2);
        assert_eq!(
            editor.set_override_available(date(2026, 12, 1), true),
            Err(EditorError::NoOverride(date(2026, 12, 1)))
        );
    }

    #[test]
    fn override_beats_weekly_pattern() {
        let mut editor = AvailabilityEditor::new(1);
        // 2026-10-19 is a Monday
        let monday = date(2026, 10, 19);
        let weekly = editor.effective_for(monday);
        assert!(weekly.is_available && !weekly.from_override);

        editor.add_override(monday);
        editor.set_override_available(monday, false).unwrap();
        let overridden = editor.effective_for(monday);
        assert!(!overridden.is_available && overridden.from_override);

        let sunday = editor.effective_for(date(2026, 10, 18));
        assert!(!sunday.is_available);
    }

    #[test]
    fn load_rebuilds_week_and_reset_restores_it() {
        let mut editor = AvailabilityEditor::new(1);
        editor.load(&[row(10, 1, "08:00", "12:00", true), row(11, 3, "13:00", "18:00", true)]);

        let open: Vec<bool> = editor.weekly().iter().map(|d| d.is_available).collect();
        assert_eq!(open, vec![false, true, false, true, false, false, false]);
        assert_eq!(editor.weekly()[1].start_time, "08:00");

        editor.toggle_day(1, false).unwrap();
        assert!(editor.is_dirty());
        editor.reset();
        assert!(!editor.is_dirty());
        assert!(editor.weekly()[1].is_available);
    }

    #[test]
    fn reset_without_server_state_keeps_edits() {
        let mut editor = AvailabilityEditor::new(1);
        editor.load(&[]);
        editor.toggle_day(0, true).unwrap();
        editor.reset();
        assert!(editor.weekly()[0].is_available);
    }

    #[test]
    fn payload_is_the_full_week() {
        let mut editor = AvailabilityEditor::new(9);
        editor.toggle_day(3, false).unwrap();
        let payload = editor.payload();
        assert_eq!(payload.len(), 7);
        assert!(payload.iter().all(|p| p.doctor_id == 9));
        assert_eq!(payload.iter().map(|p| p.day_of_week).collect::<Vec<_>>(), (0..7).collect::<Vec<_>>());
        assert_eq!(payload[3].is_available, Some(false));
        assert_eq!(payload[2].is_available, Some(true));
    }
}
