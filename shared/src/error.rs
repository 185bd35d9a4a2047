use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Schedule is infeasible for {date}. Check locked shifts and availability.")]
    Infeasible {
        date: NaiveDate,
        /// Path of the model dump written for this day, when diagnostics are
        /// enabled.
        diagnostic: Option<String>,
    },

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Schedule has {error_count} blocking compliance violation(s)")]
    ComplianceConflict { error_count: usize },
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
