//! Problem Assembler: materializes one day's [`ScheduleProblem`] from the
//! masked availability, staffing requirements, and locked assignments.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use shared::{time, DayOfWeek, DayType, ScheduleError, ScheduleResult};

use super::availability::DayMasks;
use crate::domain::entities::{Employee, LockedAssignment, StaffingRequirement};
use crate::domain::solver::ScheduleProblem;

/// Built-in staffing floors used when no requirement intervals are
/// configured, indexed by period from open.
const DEFAULT_STAFFING_WEEKDAY: [u32; 25] = [
    2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 4, 3, 3, 3, 3, 3, 3, 2, 2,
];
const DEFAULT_STAFFING_WEEKEND: [u32; 23] = [
    2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 3, 3, 3, 3, 3, 3, 2, 2,
];

pub struct ProblemAssembler {
    default_min_staff: u32,
}

impl ProblemAssembler {
    pub fn new(default_min_staff: u32) -> Self {
        Self { default_min_staff }
    }

    /// Per-period staffing floor. The first requirement interval of the
    /// matching day type containing a period's start supplies its floor;
    /// gaps fall back to the default. With no intervals at all, the
    /// built-in tables apply, resized to the day's grid.
    pub fn minimum_workers(
        &self,
        day_of_week: DayOfWeek,
        open_minutes: u32,
        num_periods: usize,
        requirements: &[StaffingRequirement],
    ) -> ScheduleResult<Vec<u32>> {
        let day_type = day_of_week.day_type();

        if requirements.is_empty() {
            let table: &[u32] = match day_type {
                DayType::Weekend => &DEFAULT_STAFFING_WEEKEND,
                DayType::Weekday => &DEFAULT_STAFFING_WEEKDAY,
            };
            return Ok((0..num_periods)
                .map(|i| table.get(i).copied().unwrap_or(self.default_min_staff))
                .collect());
        }

        let relevant: Vec<(u32, u32, u32)> = requirements
            .iter()
            .filter(|r| r.day_type == day_type)
            .map(|r| {
                Ok((
                    time::parse_hhmm(&r.start_time)?,
                    time::parse_hhmm(&r.end_time)?,
                    r.min_staff,
                ))
            })
            .collect::<ScheduleResult<_>>()?;

        let mut minimum_workers = Vec::with_capacity(num_periods);
        for period in 0..num_periods {
            let start = time::period_start_minutes(open_minutes, period);
            let floor = relevant
                .iter()
                .find(|(req_start, req_end, _)| *req_start <= start && start < *req_end)
                .map(|(_, _, min_staff)| *min_staff)
                .unwrap_or(self.default_min_staff);
            minimum_workers.push(floor);
        }

        Ok(minimum_workers)
    }

    /// Build the day's problem. Locks outside the day's grid, or naming
    /// employees without availability rows today, are dropped with a log
    /// line.
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        &self,
        date: NaiveDate,
        day_of_week: DayOfWeek,
        open_minutes: u32,
        num_periods: usize,
        masks: &DayMasks,
        employees: &[Employee],
        locked_shifts: &[LockedAssignment],
        requirements: &[StaffingRequirement],
    ) -> ScheduleResult<ScheduleProblem> {
        let names: Vec<String> = masks.availability.keys().cloned().collect();

        let mut availability = Vec::with_capacity(names.len());
        let mut hourly_rates = Vec::with_capacity(names.len());
        let mut employee_is_minor = Vec::with_capacity(names.len());
        for name in &names {
            availability.push(masks.availability[name].clone());
            let employee = employees.iter().find(|e| &e.name == name).ok_or_else(|| {
                ScheduleError::InvalidInput(format!(
                    "availability references unknown employee {name:?}"
                ))
            })?;
            hourly_rates.push(employee.hourly_rate);
            employee_is_minor.push(masks.is_minor.get(name).copied().unwrap_or(false));
        }

        let mut locked_periods = BTreeSet::new();
        for lock in locked_shifts.iter().filter(|l| l.date == date) {
            let Some(employee_index) = names.iter().position(|n| n == &lock.employee_name) else {
                tracing::warn!(
                    employee = %lock.employee_name,
                    %date,
                    "locked shift for employee without availability today; dropped"
                );
                continue;
            };
            let mut kept = Vec::new();
            for &period in &lock.periods {
                if period < num_periods {
                    locked_periods.insert((employee_index, period));
                    kept.push(period);
                } else {
                    tracing::debug!(
                        employee = %lock.employee_name,
                        period,
                        num_periods,
                        "locked period outside the day; dropped"
                    );
                }
            }
            if !kept.is_empty() {
                tracing::info!(employee = %lock.employee_name, %date, periods = ?kept, "locked shift");
            }
        }

        let problem = ScheduleProblem {
            date,
            day_of_week,
            employees: names,
            num_periods,
            open_minutes,
            availability,
            hourly_rates,
            minimum_workers: self.minimum_workers(
                day_of_week,
                open_minutes,
                num_periods,
                requirements,
            )?,
            locked_periods,
            employee_is_minor,
            minor_curfew_period: masks.minor_curfew_period,
            minor_earliest_period: masks.minor_earliest_period,
        };
        problem.validate()?;
        Ok(problem)
    }
}
