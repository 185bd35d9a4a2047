//! Availability pre-filters.
//!
//! These run before the solver and express hard restrictions as zeroed
//! availability, so that feasibility stays cheap. The post-validators in
//! [`crate::validators`] re-check the same rules on the composed schedule;
//! the two sides read the same [`crate::rules::ComplianceRules`] values.

use std::collections::{BTreeMap, BTreeSet};

use shared::{time, ScheduleResult};

/// Zero out periods a minor may not work: any period starting before
/// `earliest_start` or at/after `curfew_end`. Non-minors pass through.
///
/// Returns `(curfew_period, earliest_period)`: the index of the first
/// period at or after each boundary, `None` when the boundary lies outside
/// the day.
pub fn minor_availability_filter(
    availability: &mut BTreeMap<String, Vec<bool>>,
    is_minor: &BTreeMap<String, bool>,
    period_starts: &[u32],
    curfew_end: &str,
    earliest_start: &str,
) -> ScheduleResult<(Option<usize>, Option<usize>)> {
    let curfew = time::parse_hhmm(curfew_end)?;
    let earliest = time::parse_hhmm(earliest_start)?;

    let curfew_period = period_starts.iter().position(|&start| start >= curfew);
    let earliest_period = period_starts.iter().position(|&start| start >= earliest);

    for (employee, mask) in availability.iter_mut() {
        if !is_minor.get(employee).copied().unwrap_or(false) {
            continue;
        }
        for (idx, available) in mask.iter_mut().enumerate() {
            let before_earliest = earliest_period.map_or(false, |p| idx < p);
            let after_curfew = curfew_period.map_or(false, |p| idx >= p);
            if before_earliest || after_curfew {
                *available = false;
            }
        }
    }

    Ok((curfew_period, earliest_period))
}

/// Periods blocked by the rest-between-shifts rule, per employee.
///
/// For an employee who ended the previous day at `end`, the earliest
/// allowed start on the current day is `end + min_rest_hours − 24:00`.
/// When that bound is at or past the current day's end the whole day is
/// blocked; when it is at or before midnight nothing is.
pub fn rest_blocked_periods(
    previous_day_end_times: &BTreeMap<String, String>,
    period_starts: &[u32],
    min_rest_hours: f64,
) -> ScheduleResult<BTreeMap<String, BTreeSet<usize>>> {
    let rest_minutes = (min_rest_hours * 60.0).round() as i64;
    let mut blocked_periods = BTreeMap::new();

    for (employee, end_time) in previous_day_end_times {
        if end_time.is_empty() {
            continue;
        }

        let end_minutes = time::parse_hhmm(end_time)? as i64;
        let earliest_allowed = end_minutes + rest_minutes - i64::from(time::DAY_MINUTES);
        if earliest_allowed <= 0 {
            continue;
        }

        let blocked: BTreeSet<usize> = period_starts
            .iter()
            .enumerate()
            .filter(|(_, &start)| i64::from(start) < earliest_allowed)
            .map(|(idx, _)| idx)
            .collect();

        if !blocked.is_empty() {
            blocked_periods.insert(employee.clone(), blocked);
        }
    }

    Ok(blocked_periods)
}
