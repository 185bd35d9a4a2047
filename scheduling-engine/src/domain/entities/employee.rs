use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{time, DayOfWeek, ScheduleError, ScheduleResult};

/// An employee on the roster. The name is the stable identity across the
/// whole pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub name: String,
    pub hourly_rate: f64,
    pub min_weekly_hours: f64,
    /// Desired per-shift bounds. Carried on the record; the solver applies
    /// the store-wide configuration values.
    pub min_shift_hours: f64,
    pub max_shift_hours: f64,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    /// Explicit minor override; `true` wins over the DOB derivation.
    #[serde(default)]
    pub is_minor: bool,
}

impl Employee {
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.name.trim().is_empty() {
            return Err(ScheduleError::InvalidInput(
                "employee name must not be empty".to_string(),
            ));
        }
        if self.hourly_rate < 0.0 || !self.hourly_rate.is_finite() {
            return Err(ScheduleError::InvalidInput(format!(
                "employee {} has a negative hourly rate",
                self.name
            )));
        }
        Ok(())
    }

    /// Age in whole years on `as_of`, when a date of birth is known.
    pub fn age_on(&self, as_of: NaiveDate) -> Option<u32> {
        use chrono::Datelike;
        let dob = self.date_of_birth?;
        let mut age = as_of.year() - dob.year();
        if (as_of.month(), as_of.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        Some(age.max(0) as u32)
    }

    /// Minor status: the explicit flag, or the DOB-derived age measured
    /// against the jurisdiction's threshold.
    pub fn is_minor_on(&self, as_of: NaiveDate, age_threshold: u32) -> bool {
        if self.is_minor {
            return true;
        }
        match self.age_on(as_of) {
            Some(age) => age < age_threshold,
            None => false,
        }
    }
}

/// One availability window for one weekday. A period is available iff it
/// lies entirely inside some slot for that day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailabilitySlot {
    pub employee_name: String,
    pub day_of_week: DayOfWeek,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`; `24:00` closes out the day.
    pub end_time: String,
}

impl AvailabilitySlot {
    pub fn validate(&self) -> ScheduleResult<()> {
        let start = time::parse_hhmm(&self.start_time)?;
        let end = time::parse_hhmm(&self.end_time)?;
        if end <= start {
            return Err(ScheduleError::InvalidInput(format!(
                "availability slot for {} on {} ends at or before its start ({} - {})",
                self.employee_name, self.day_of_week, self.start_time, self.end_time
            )));
        }
        Ok(())
    }
}
