use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use compliance::Violation;
use serde::{Deserialize, Serialize};
use shared::ScheduleError;

use super::day::{DayScheduleSummary, EmployeeDaySchedule};
use crate::domain::solver::SolverStatus;

/// The final weekly schedule: day schedules, summaries, cost totals, and
/// the compliance findings attached by post-validation. Round-trips through
/// JSON without loss.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyResult {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub store_name: String,
    pub generated_at: DateTime<Utc>,
    pub schedules: Vec<EmployeeDaySchedule>,
    pub daily_summaries: Vec<DayScheduleSummary>,
    pub total_weekly_cost: f64,
    pub status: SolverStatus,
    #[serde(default)]
    pub total_dummy_worker_cost: f64,
    #[serde(default)]
    pub total_short_shift_penalty: f64,
    #[serde(default)]
    pub has_warnings: bool,
    #[serde(default)]
    pub compliance_violations: Vec<Violation>,
    pub is_compliant: bool,
    #[serde(default)]
    pub employee_weekly_hours: BTreeMap<String, f64>,
    #[serde(default)]
    pub overtime_hours: BTreeMap<String, f64>,
}

impl WeeklyResult {
    pub fn error_count(&self) -> usize {
        self.compliance_violations
            .iter()
            .filter(|v| v.severity == compliance::ViolationSeverity::Error)
            .count()
    }

    /// The enforce-mode conflict, when blocking violations were found. The
    /// schedule itself stays available for inspection either way.
    pub fn compliance_error(&self) -> Option<ScheduleError> {
        let error_count = self.error_count();
        (error_count > 0).then_some(ScheduleError::ComplianceConflict { error_count })
    }
}
