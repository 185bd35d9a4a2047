use std::collections::BTreeSet;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::time::PERIOD_MINUTES;
use shared::{DayOfWeek, ScheduleError, ScheduleResult};

/// Available solver backends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SolverKind {
    Microlp,
    CoinCbc,
    Highs,
}

impl SolverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverKind::Microlp => "microlp",
            SolverKind::CoinCbc => "coin-cbc",
            SolverKind::Highs => "highs",
        }
    }
}

impl std::str::FromStr for SolverKind {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "microlp" => Ok(SolverKind::Microlp),
            "coin-cbc" | "coin_cbc" | "cbc" => Ok(SolverKind::CoinCbc),
            "highs" => Ok(SolverKind::Highs),
            other => Err(ScheduleError::InvalidInput(format!(
                "unknown solver backend: {other:?}"
            ))),
        }
    }
}

/// Solver result status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SolverStatus {
    Optimal,
    Suboptimal,
    Infeasible,
    Error,
}

/// Configuration parameters for the solver.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub dummy_worker_cost: f64,
    pub short_shift_penalty: f64,
    pub min_shift_hours: f64,
    pub max_daily_hours: f64,
    pub meal_break_enabled: bool,
    pub meal_break_threshold_hours: f64,
    pub meal_break_duration_periods: u32,
    pub time_limit: Option<Duration>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            dummy_worker_cost: 100.0,
            short_shift_penalty: 50.0,
            min_shift_hours: 3.0,
            max_daily_hours: 11.0,
            meal_break_enabled: true,
            meal_break_threshold_hours: 5.0,
            meal_break_duration_periods: 1,
            time_limit: None,
        }
    }
}

impl SolverConfig {
    pub fn maximum_periods(&self) -> usize {
        (self.max_daily_hours * 2.0) as usize
    }

    pub fn min_shift_periods(&self) -> usize {
        (self.min_shift_hours * 2.0) as usize
    }

    pub fn meal_break_threshold_periods(&self) -> usize {
        (self.meal_break_threshold_hours * 2.0) as usize
    }
}

/// Input data for one day's scheduling problem. Availability is already
/// masked; locked pairs override it.
#[derive(Debug, Clone)]
pub struct ScheduleProblem {
    pub date: NaiveDate,
    pub day_of_week: DayOfWeek,
    /// Stable employee order; all per-employee vectors align to it.
    pub employees: Vec<String>,
    pub num_periods: usize,
    /// Minutes from midnight of period 0.
    pub open_minutes: u32,
    pub availability: Vec<Vec<bool>>,
    pub hourly_rates: Vec<f64>,
    pub minimum_workers: Vec<u32>,
    /// `(employee index, period index)` pairs forced to 1.
    pub locked_periods: BTreeSet<(usize, usize)>,
    pub employee_is_minor: Vec<bool>,
    pub minor_curfew_period: Option<usize>,
    pub minor_earliest_period: Option<usize>,
}

impl ScheduleProblem {
    /// Start of period `index` as minutes from midnight.
    pub fn period_start(&self, index: usize) -> u32 {
        self.open_minutes + PERIOD_MINUTES * index as u32
    }

    pub fn validate(&self) -> ScheduleResult<()> {
        let n = self.employees.len();
        if self.availability.len() != n
            || self.hourly_rates.len() != n
            || self.employee_is_minor.len() != n
        {
            return Err(ScheduleError::InvalidInput(
                "schedule problem employee vectors are misaligned".to_string(),
            ));
        }
        if self.availability.iter().any(|a| a.len() != self.num_periods) {
            return Err(ScheduleError::InvalidInput(
                "availability mask length does not match the period grid".to_string(),
            ));
        }
        if self.minimum_workers.len() != self.num_periods {
            return Err(ScheduleError::InvalidInput(
                "minimum workers length does not match the period grid".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result from a solver run. Assignment data is only meaningful when
/// `status` is optimal or suboptimal.
#[derive(Debug, Clone)]
pub struct SolverResult {
    pub status: SolverStatus,
    pub objective_value: f64,
    /// `[employee][period]` assignment matrix.
    pub schedule_matrix: Vec<Vec<bool>>,
    /// Dummy worker count per period.
    pub dummy_values: Vec<f64>,
    /// Short-shift penalty hours per employee.
    pub short_shift_hours: Vec<f64>,
    /// Meal break period indices per employee.
    pub break_periods: Vec<Vec<usize>>,
    pub solve_time: Duration,
}

impl SolverResult {
    pub fn failed(status: SolverStatus, solve_time: Duration) -> Self {
        Self {
            status,
            objective_value: f64::INFINITY,
            schedule_matrix: Vec::new(),
            dummy_values: Vec::new(),
            short_shift_hours: Vec::new(),
            break_periods: Vec::new(),
            solve_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_kind_parsing() {
        assert_eq!("microlp".parse::<SolverKind>().unwrap(), SolverKind::Microlp);
        assert_eq!("cbc".parse::<SolverKind>().unwrap(), SolverKind::CoinCbc);
        assert_eq!("HiGHS".parse::<SolverKind>().unwrap(), SolverKind::Highs);
        assert!("gurobi".parse::<SolverKind>().is_err());
    }

    #[test]
    fn test_config_period_conversions() {
        let config = SolverConfig::default();
        assert_eq!(config.maximum_periods(), 22);
        assert_eq!(config.min_shift_periods(), 6);
        assert_eq!(config.meal_break_threshold_periods(), 10);
    }

    #[test]
    fn test_problem_validation_catches_misalignment() {
        let problem = ScheduleProblem {
            date: NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
            day_of_week: DayOfWeek::Monday,
            employees: vec!["Alex".to_string()],
            num_periods: 4,
            open_minutes: 480,
            availability: vec![vec![true; 3]],
            hourly_rates: vec![15.0],
            minimum_workers: vec![1; 4],
            locked_periods: BTreeSet::new(),
            employee_is_minor: vec![false],
            minor_curfew_period: None,
            minor_earliest_period: None,
        };
        assert!(problem.validate().is_err());
    }
}
