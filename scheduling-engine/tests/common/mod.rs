//! Shared builders for the pipeline integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;
use compliance::{ComplianceRules, RuleStore, ViolationType};
use shared::{DayOfWeek, DayType};

use scheduling_engine::{
    AvailabilitySlot, Employee, EmployeeDaySchedule, RunParameters, ScheduleInputs,
    StaffingRequirement, Store, StoreDay, WeeklyResult,
};

/// 2025-01-20, a Monday.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()
}

pub fn employee(name: &str, rate: f64) -> Employee {
    Employee {
        name: name.to_string(),
        hourly_rate: rate,
        min_weekly_hours: 0.0,
        min_shift_hours: 3.0,
        max_shift_hours: 8.0,
        date_of_birth: None,
        is_minor: false,
    }
}

pub fn minor(name: &str, rate: f64) -> Employee {
    Employee {
        is_minor: true,
        ..employee(name, rate)
    }
}

pub fn slot(name: &str, day: DayOfWeek, start: &str, end: &str) -> AvailabilitySlot {
    AvailabilitySlot {
        employee_name: name.to_string(),
        day_of_week: day,
        start_time: start.to_string(),
        end_time: end.to_string(),
    }
}

/// A store open on Mondays only.
pub fn monday_store(open: &str, close: &str) -> Store {
    Store {
        store_name: "Maple Street".to_string(),
        jurisdiction: "DEFAULT".to_string(),
        days: vec![StoreDay {
            day_of_week: DayOfWeek::Monday,
            open_time: open.to_string(),
            close_time: close.to_string(),
        }],
        staffing_requirements: Vec::new(),
    }
}

/// DEFAULT rules with solver meal breaks turned off, so staffing assertions
/// stay exact.
pub fn rules_no_breaks() -> RuleStore {
    let mut store = RuleStore::new();
    store
        .insert(ComplianceRules {
            meal_break_enabled: false,
            ..ComplianceRules::default()
        })
        .unwrap();
    store
}

pub fn rule_store_with(rules: ComplianceRules) -> RuleStore {
    let mut store = RuleStore::new();
    store.insert(rules).unwrap();
    store
}

pub fn inputs(
    store: Store,
    employees: Vec<Employee>,
    availability: Vec<AvailabilitySlot>,
    rule_store: RuleStore,
) -> ScheduleInputs {
    ScheduleInputs {
        store,
        employees,
        availability,
        rule_store,
    }
}

/// A single weekday requirement interval covering `[start, end)`.
pub fn weekday_floor(start: &str, end: &str, min_staff: u32) -> StaffingRequirement {
    StaffingRequirement {
        day_type: DayType::Weekday,
        start_time: start.to_string(),
        end_time: end.to_string(),
        min_staff,
    }
}

pub fn single_day_params(date: NaiveDate) -> RunParameters {
    let mut params = RunParameters::new(date, date);
    // Pin the publication date so predictive-notice findings are stable.
    params.published_at = Some(date - chrono::Duration::days(30));
    params
}

pub fn day_schedule<'a>(result: &'a WeeklyResult, name: &str) -> &'a EmployeeDaySchedule {
    result
        .schedules
        .iter()
        .find(|s| s.employee_name == name)
        .unwrap_or_else(|| panic!("no schedule for {name}"))
}

pub fn violations_of(result: &WeeklyResult, rule_type: ViolationType) -> Vec<&compliance::Violation> {
    result
        .compliance_violations
        .iter()
        .filter(|v| v.rule_type == rule_type)
        .collect()
}

/// Assert the scheduled periods form at most one contiguous block.
pub fn assert_contiguous(schedule: &EmployeeDaySchedule) {
    let periods = schedule.scheduled_periods();
    for pair in periods.windows(2) {
        assert_eq!(
            pair[1],
            pair[0] + 1,
            "{} has a split shift: {periods:?}",
            schedule.employee_name
        );
    }
}

/// Scheduled headcount per period for one day, breaks excluded.
pub fn effective_staffing(result: &WeeklyResult, date: NaiveDate, num_periods: usize) -> Vec<i64> {
    let mut staffed = vec![0i64; num_periods];
    for schedule in result.schedules.iter().filter(|s| s.date == date) {
        for period in &schedule.periods {
            if period.scheduled && !period.is_break {
                staffed[period.period_index] += 1;
            }
        }
    }
    staffed
}
