use serde::{Deserialize, Serialize};

/// One half-hour period of one employee's day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShiftPeriod {
    pub period_index: usize,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`; `24:00` for the last period of a midnight close.
    pub end_time: String,
    pub scheduled: bool,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub is_break: bool,
}

/// A period whose staffing floor was met by dummy workers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnfilledPeriod {
    pub period_index: usize,
    pub start_time: String,
    pub end_time: String,
    pub workers_needed: u32,
}
