use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use shared::{time, DayOfWeek, ScheduleResult};

use crate::rules::ComplianceRules;

/// Kinds of compliance violations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationType {
    MinorCurfew,
    MinorEarlyStart,
    MinorDailyHours,
    MinorWeeklyHours,
    RestViolation,
    DailyOvertime,
    WeeklyOvertime,
    MealBreakRequired,
    RestBreakRequired,
    PredictiveNotice,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViolationSeverity {
    /// Blocks scheduling in enforce mode.
    Error,
    /// Flags but allows scheduling.
    Warning,
}

/// A single compliance violation. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Violation {
    pub rule_type: ViolationType,
    pub severity: ViolationSeverity,
    /// Employee name, or `"ALL"` for schedule-wide findings.
    pub employee_name: String,
    pub date: Option<NaiveDate>,
    pub message: String,
    pub details: BTreeMap<String, serde_json::Value>,
}

/// Validation mode for the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceMode {
    Off,
    #[default]
    Warn,
    Enforce,
}

impl std::str::FromStr for ComplianceMode {
    type Err = shared::ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(ComplianceMode::Off),
            "warn" => Ok(ComplianceMode::Warn),
            "enforce" => Ok(ComplianceMode::Enforce),
            other => Err(shared::ScheduleError::InvalidInput(format!(
                "unknown compliance mode: {other:?}"
            ))),
        }
    }
}

impl ComplianceMode {
    /// Severity of minor and rest findings under this mode. Overtime, break
    /// and notice findings stay warnings in every mode.
    pub fn blocking_severity(&self) -> ViolationSeverity {
        match self {
            ComplianceMode::Enforce => ViolationSeverity::Error,
            _ => ViolationSeverity::Warning,
        }
    }
}

/// Compliance-relevant employee information.
#[derive(Debug, Clone)]
pub struct EmployeeProfile {
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub is_minor: bool,
    pub hourly_rate: f64,
}

/// One worked shift, as seen by the validators.
#[derive(Debug, Clone)]
pub struct ShiftInfo {
    pub employee_name: String,
    pub date: NaiveDate,
    pub day_of_week: DayOfWeek,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`; `24:00` denotes the end of the day.
    pub end_time: String,
    pub total_hours: f64,
    pub periods: Vec<usize>,
}

impl ShiftInfo {
    pub fn start_datetime(&self) -> ScheduleResult<NaiveDateTime> {
        time::clock_on_date(self.date, &self.start_time)
    }

    pub fn end_datetime(&self) -> ScheduleResult<NaiveDateTime> {
        time::clock_on_date(self.date, &self.end_time)
    }
}

/// Per-validator enable flags.
#[derive(Debug, Clone, Copy)]
pub struct ValidatorToggles {
    pub minor_restrictions: bool,
    pub rest_between_shifts: bool,
    pub overtime_tracking: bool,
    pub break_compliance: bool,
    pub predictive_scheduling: bool,
}

impl Default for ValidatorToggles {
    fn default() -> Self {
        Self {
            minor_restrictions: true,
            rest_between_shifts: true,
            overtime_tracking: true,
            break_compliance: true,
            predictive_scheduling: true,
        }
    }
}

/// Read-only context shared by all validators.
#[derive(Debug, Clone)]
pub struct ComplianceContext {
    pub rules: ComplianceRules,
    pub employees: BTreeMap<String, EmployeeProfile>,
    pub shifts: Vec<ShiftInfo>,
    /// Shifts from the day before the schedule range, for rest validation.
    pub previous_day_shifts: Vec<ShiftInfo>,
    pub schedule_start_date: Option<NaiveDate>,
    pub published_at: Option<NaiveDate>,
    pub toggles: ValidatorToggles,
    pub mode: ComplianceMode,
}

/// Accumulated validation output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub violations: Vec<Violation>,
    pub is_compliant: bool,
    pub employee_weekly_hours: BTreeMap<String, f64>,
    pub overtime_hours: BTreeMap<String, f64>,
}

impl ComplianceReport {
    pub fn new() -> Self {
        Self {
            is_compliant: true,
            ..Default::default()
        }
    }

    pub fn add_violation(&mut self, violation: Violation) {
        if violation.severity == ViolationSeverity::Error {
            self.is_compliant = false;
        }
        self.violations.push(violation);
    }

    pub fn error_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == ViolationSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == ViolationSeverity::Warning)
            .count()
    }
}

/// Round to one decimal place, matching the reported hour figures.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
