use serde::{Deserialize, Serialize};
use shared::{time, DayOfWeek, DayType, ScheduleError, ScheduleResult};

/// A minimum-staffing interval. Applies to every day of the matching
/// day type; the first interval containing a period's start supplies its
/// floor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffingRequirement {
    pub day_type: DayType,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`; `24:00` closes out the day.
    pub end_time: String,
    pub min_staff: u32,
}

impl StaffingRequirement {
    pub fn validate(&self) -> ScheduleResult<()> {
        let start = time::parse_hhmm(&self.start_time)?;
        let end = time::parse_hhmm(&self.end_time)?;
        if end <= start {
            return Err(ScheduleError::InvalidInput(format!(
                "staffing requirement ends at or before its start ({} - {})",
                self.start_time, self.end_time
            )));
        }
        Ok(())
    }
}

/// One day of store opening hours.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreDay {
    pub day_of_week: DayOfWeek,
    /// `HH:MM`
    pub open_time: String,
    /// `HH:MM`; a close at or before the open is treated as 24:00.
    pub close_time: String,
}

impl StoreDay {
    pub fn open_minutes(&self) -> ScheduleResult<u32> {
        time::parse_hhmm(&self.open_time)
    }

    pub fn close_minutes(&self) -> ScheduleResult<u32> {
        let open = time::parse_hhmm(&self.open_time)?;
        let close = time::parse_hhmm(&self.close_time)?;
        Ok(if close <= open { time::DAY_MINUTES } else { close })
    }

    /// Number of half-hour periods in this store day.
    pub fn num_periods(&self) -> ScheduleResult<usize> {
        Ok(time::period_count(self.open_minutes()?, time::parse_hhmm(&self.close_time)?))
    }
}

/// The store record: opening hours per weekday, jurisdiction tag, and
/// staffing-requirement intervals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Store {
    pub store_name: String,
    pub jurisdiction: String,
    pub days: Vec<StoreDay>,
    #[serde(default)]
    pub staffing_requirements: Vec<StaffingRequirement>,
}

impl Store {
    pub fn day(&self, day_of_week: DayOfWeek) -> Option<&StoreDay> {
        self.days.iter().find(|d| d.day_of_week == day_of_week)
    }

    pub fn validate(&self) -> ScheduleResult<()> {
        for day in &self.days {
            day.open_minutes()?;
            day.close_minutes()?;
        }
        validate_no_overlap(&self.staffing_requirements)?;
        Ok(())
    }
}

/// Requirement intervals within one day type may not overlap.
pub fn validate_no_overlap(requirements: &[StaffingRequirement]) -> ScheduleResult<()> {
    for requirement in requirements {
        requirement.validate()?;
    }

    for day_type in [DayType::Weekday, DayType::Weekend] {
        let mut intervals: Vec<(u32, u32)> = requirements
            .iter()
            .filter(|r| r.day_type == day_type)
            .map(|r| {
                Ok((
                    time::parse_hhmm(&r.start_time)?,
                    time::parse_hhmm(&r.end_time)?,
                ))
            })
            .collect::<ScheduleResult<_>>()?;
        intervals.sort();

        for pair in intervals.windows(2) {
            if pair[1].0 < pair[0].1 {
                return Err(ScheduleError::InvalidInput(format!(
                    "overlapping {day_type:?} staffing requirements: [{}, {}) and [{}, {})",
                    time::format_minutes(pair[0].0),
                    time::format_minutes(pair[0].1),
                    time::format_minutes(pair[1].0),
                    time::format_minutes(pair[1].1),
                )));
            }
        }
    }

    Ok(())
}
