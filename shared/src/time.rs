//! Wall-clock helpers for the half-hour period grid.
//!
//! Times inside a store day are handled as minutes from midnight so that the
//! day-end bound `24:00` stays representable. Period `i` of a day spans
//! `[open + 30i, open + 30(i+1))`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{ScheduleError, ScheduleResult};

/// Length of one scheduling period.
pub const PERIOD_MINUTES: u32 = 30;

/// Minutes in a full day; also the `24:00` end-of-day bound.
pub const DAY_MINUTES: u32 = 24 * 60;

/// Parse an `HH:MM` string into minutes from midnight. `24:00` is accepted
/// as the end-of-day bound.
pub fn parse_hhmm(value: &str) -> ScheduleResult<u32> {
    let invalid = || ScheduleError::InvalidInput(format!("invalid HH:MM time: {value:?}"));

    let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;

    if minutes > 59 || hours > 24 || (hours == 24 && minutes != 0) {
        return Err(invalid());
    }

    Ok(hours * 60 + minutes)
}

/// Format minutes from midnight as `HH:MM`; 1440 formats as `24:00`.
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Start of period `index` as minutes from midnight.
pub fn period_start_minutes(open_minutes: u32, index: usize) -> u32 {
    open_minutes + PERIOD_MINUTES * index as u32
}

/// Start of period `index` as an `HH:MM` string.
pub fn period_to_time(open_minutes: u32, index: usize) -> String {
    format_minutes(period_start_minutes(open_minutes, index))
}

/// Number of whole periods between open and close. A close at or before the
/// open time is treated as 24:00.
pub fn period_count(open_minutes: u32, close_minutes: u32) -> usize {
    let close = if close_minutes <= open_minutes {
        DAY_MINUTES
    } else {
        close_minutes
    };
    ((close - open_minutes) / PERIOD_MINUTES) as usize
}

/// Combine a date with an `HH:MM` clock string. `24:00` maps to midnight of
/// the following day so that shift-gap arithmetic stays monotonic.
pub fn clock_on_date(date: NaiveDate, value: &str) -> ScheduleResult<NaiveDateTime> {
    let minutes = parse_hhmm(value)?;
    let (date, minutes) = if minutes == DAY_MINUTES {
        (date.succ_opt().ok_or_else(|| {
            ScheduleError::InvalidInput(format!("date out of range: {date}"))
        })?, 0)
    } else {
        (date, minutes)
    };

    let time = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
        .ok_or_else(|| ScheduleError::InvalidInput(format!("invalid HH:MM time: {value:?}")))?;
    Ok(date.and_time(time))
}
