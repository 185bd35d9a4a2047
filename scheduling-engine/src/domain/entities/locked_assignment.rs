use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Periods forced on for one employee on one date. Locks override the
/// availability mask; compliance conflicts they cause are surfaced by the
/// post-validators instead of being rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LockedAssignment {
    pub employee_name: String,
    pub date: NaiveDate,
    pub periods: Vec<usize>,
}
