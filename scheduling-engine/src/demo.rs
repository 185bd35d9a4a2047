//! Demo data: a small store week and roster for the runnable binary and
//! integration tests.

use chrono::NaiveDate;
use compliance::RuleStore;
use shared::{DayOfWeek, DayType};

use crate::domain::entities::{AvailabilitySlot, Employee, StaffingRequirement, Store, StoreDay};
use crate::domain::services::ScheduleInputs;

const WEEK: [DayOfWeek; 7] = [
    DayOfWeek::Monday,
    DayOfWeek::Tuesday,
    DayOfWeek::Wednesday,
    DayOfWeek::Thursday,
    DayOfWeek::Friday,
    DayOfWeek::Saturday,
    DayOfWeek::Sunday,
];

fn employee(
    name: &str,
    rate: f64,
    min_weekly: f64,
    dob: Option<&str>,
) -> Employee {
    Employee {
        name: name.to_string(),
        hourly_rate: rate,
        min_weekly_hours: min_weekly,
        min_shift_hours: 3.0,
        max_shift_hours: 8.0,
        date_of_birth: dob.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
        is_minor: false,
    }
}

fn slot(name: &str, day: DayOfWeek, start: &str, end: &str) -> AvailabilitySlot {
    AvailabilitySlot {
        employee_name: name.to_string(),
        day_of_week: day,
        start_time: start.to_string(),
        end_time: end.to_string(),
    }
}

/// A week of inputs for the Maple Street store: five adults and one minor,
/// mixed availability, and explicit staffing intervals.
pub fn demo_inputs() -> ScheduleInputs {
    let days = WEEK
        .iter()
        .map(|&day_of_week| StoreDay {
            day_of_week,
            open_time: "08:00".to_string(),
            close_time: "22:00".to_string(),
        })
        .collect();

    let staffing_requirements = vec![
        StaffingRequirement {
            day_type: DayType::Weekday,
            start_time: "08:00".to_string(),
            end_time: "11:00".to_string(),
            min_staff: 2,
        },
        StaffingRequirement {
            day_type: DayType::Weekday,
            start_time: "11:00".to_string(),
            end_time: "18:00".to_string(),
            min_staff: 3,
        },
        StaffingRequirement {
            day_type: DayType::Weekday,
            start_time: "18:00".to_string(),
            end_time: "22:00".to_string(),
            min_staff: 2,
        },
        StaffingRequirement {
            day_type: DayType::Weekend,
            start_time: "08:00".to_string(),
            end_time: "22:00".to_string(),
            min_staff: 3,
        },
    ];

    let employees = vec![
        employee("Avery", 16.5, 32.0, None),
        employee("Blake", 15.0, 32.0, None),
        employee("Carmen", 14.0, 24.0, None),
        employee("Dana", 12.5, 12.0, Some("2008-06-15")),
        employee("Eli", 13.0, 20.0, None),
    ];

    let mut availability = Vec::new();
    for &day in &WEEK {
        availability.push(slot("Avery", day, "08:00", "17:00"));
        availability.push(slot("Blake", day, "12:00", "22:00"));
        availability.push(slot("Carmen", day, "08:00", "22:00"));
    }
    for &day in &[DayOfWeek::Monday, DayOfWeek::Wednesday, DayOfWeek::Friday] {
        availability.push(slot("Dana", day, "15:00", "22:00"));
    }
    for &day in &[DayOfWeek::Saturday, DayOfWeek::Sunday] {
        availability.push(slot("Dana", day, "08:00", "22:00"));
        availability.push(slot("Eli", day, "08:00", "22:00"));
    }
    for &day in &[DayOfWeek::Tuesday, DayOfWeek::Thursday] {
        availability.push(slot("Eli", day, "08:00", "16:00"));
    }

    ScheduleInputs {
        store: Store {
            store_name: "Maple Street".to_string(),
            jurisdiction: "DEFAULT".to_string(),
            days,
            staffing_requirements,
        },
        employees,
        availability,
        rule_store: RuleStore::with_builtin(),
    }
}
