use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::DayOfWeek;

use super::period::{ShiftPeriod, UnfilledPeriod};

/// One employee's composed day: the ordered period grid plus derived shift
/// boundaries. Scheduled periods always form a single contiguous block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployeeDaySchedule {
    pub employee_name: String,
    pub day_of_week: DayOfWeek,
    pub date: NaiveDate,
    pub periods: Vec<ShiftPeriod>,
    /// Scheduled period count × 0.5; break periods count (hours paid).
    pub total_hours: f64,
    pub shift_start: Option<String>,
    pub shift_end: Option<String>,
    pub is_short_shift: bool,
}

impl EmployeeDaySchedule {
    /// Indices of the scheduled periods, in ascending order.
    pub fn scheduled_periods(&self) -> Vec<usize> {
        self.periods
            .iter()
            .filter(|p| p.scheduled)
            .map(|p| p.period_index)
            .collect()
    }
}

/// Per-day rollup for reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayScheduleSummary {
    pub day_of_week: DayOfWeek,
    pub date: NaiveDate,
    /// The day's solver objective.
    pub total_cost: f64,
    pub employees_scheduled: usize,
    pub total_labor_hours: f64,
    #[serde(default)]
    pub unfilled_periods: Vec<UnfilledPeriod>,
    #[serde(default)]
    pub dummy_worker_cost: f64,
}
