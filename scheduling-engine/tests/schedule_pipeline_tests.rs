//! End-to-end pipeline tests over the reference backend.
#![cfg(feature = "microlp")]

mod common;

use chrono::Duration;
use common::*;
use compliance::{ComplianceMode, ComplianceRules, ViolationType};
use shared::DayOfWeek;

use scheduling_engine::{
    LockedAssignment, PreviousShift, SchedulePipeline, SolverConfig, SolverStatus,
};

#[test]
fn test_basic_feasible_day() {
    // Three employees, fully available over 14 periods, staffing floors
    // between 1 and 2. No breaks, no compliance.
    let store = monday_store("08:00", "15:00");
    let employees = vec![
        employee("Avery", 10.0),
        employee("Blake", 15.0),
        employee("Carmen", 16.0),
    ];
    let availability = employees
        .iter()
        .map(|e| slot(&e.name, DayOfWeek::Monday, "08:00", "15:00"))
        .collect();

    let pipeline = SchedulePipeline::new(
        inputs(store, employees, availability, rules_no_breaks()),
        SolverConfig::default(),
    );

    let mut params = single_day_params(monday());
    params.compliance.mode = ComplianceMode::Off;
    // Floors per period: [1,1,1,2,2,2,1,1,1,2,1,1,1,1].
    params.staffing_overrides = Some(vec![
        weekday_floor("08:00", "09:30", 1),
        weekday_floor("09:30", "11:00", 2),
        weekday_floor("11:00", "12:30", 1),
        weekday_floor("12:30", "13:00", 2),
        weekday_floor("13:00", "15:00", 1),
    ]);

    let result = pipeline.generate(&params).unwrap();

    assert_eq!(result.status, SolverStatus::Optimal);
    assert!(result.total_weekly_cost.is_finite());
    assert_eq!(result.schedules.len(), 3);

    // Staffing floors met at every period past open-prep, with no dummies.
    let expected_floor = [1, 1, 1, 2, 2, 2, 1, 1, 1, 2, 1, 1, 1, 1];
    let staffed = effective_staffing(&result, monday(), 14);
    for t in 1..14 {
        assert!(
            staffed[t] >= expected_floor[t],
            "period {t}: {} staffed, floor {}",
            staffed[t],
            expected_floor[t]
        );
    }
    assert!(result.daily_summaries[0].unfilled_periods.is_empty());
    assert!(!result.has_warnings);

    for schedule in &result.schedules {
        assert_contiguous(schedule);
    }
}

#[test]
fn test_availability_respected_with_split_slots() {
    // Two disjoint windows force the solver to pick one contiguous block
    // inside one of them.
    let store = monday_store("08:00", "15:00");
    let employees = vec![employee("Avery", 10.0), employee("Blake", 12.0)];
    let availability = vec![
        slot("Avery", DayOfWeek::Monday, "08:00", "10:00"),
        slot("Avery", DayOfWeek::Monday, "12:00", "15:00"),
        slot("Blake", DayOfWeek::Monday, "08:00", "15:00"),
    ];

    let pipeline = SchedulePipeline::new(
        inputs(store, employees, availability, rules_no_breaks()),
        SolverConfig::default(),
    );
    let mut params = single_day_params(monday());
    params.compliance.mode = ComplianceMode::Off;
    params.staffing_overrides = Some(vec![weekday_floor("08:00", "15:00", 1)]);

    let result = pipeline.generate(&params).unwrap();

    let avery = day_schedule(&result, "Avery");
    assert_contiguous(avery);
    for period in avery.periods.iter().filter(|p| p.scheduled) {
        let in_morning = period.period_index < 4;
        let in_afternoon = (8..14).contains(&period.period_index);
        assert!(
            in_morning || in_afternoon,
            "Avery scheduled outside availability at period {}",
            period.period_index
        );
    }
}

#[test]
fn test_locks_are_honored_and_override_availability() {
    let store = monday_store("08:00", "15:00");
    let employees = vec![employee("Avery", 10.0), employee("Blake", 12.0)];
    let availability = vec![
        // Avery is only available in the afternoon; the lock forces a
        // morning assignment anyway.
        slot("Avery", DayOfWeek::Monday, "12:00", "15:00"),
        slot("Blake", DayOfWeek::Monday, "08:00", "15:00"),
    ];

    let pipeline = SchedulePipeline::new(
        inputs(store, employees, availability, rules_no_breaks()),
        SolverConfig::default(),
    );
    let mut params = single_day_params(monday());
    params.compliance.mode = ComplianceMode::Off;
    params.staffing_overrides = Some(vec![weekday_floor("08:00", "15:00", 1)]);
    params.locked_shifts = vec![LockedAssignment {
        employee_name: "Avery".to_string(),
        date: monday(),
        periods: vec![1, 2, 3],
    }];

    let result = pipeline.generate(&params).unwrap();
    let avery = day_schedule(&result, "Avery");
    for t in [1, 2, 3] {
        assert!(avery.periods[t].scheduled, "locked period {t} not scheduled");
        assert!(avery.periods[t].is_locked);
    }
}

#[test]
fn test_minor_curfew_prefilter() {
    // A 17-year-old available 06:00-23:00; curfew 22:00. If nobody else can
    // work past 22:00 the floor is met by dummies and no curfew violation
    // is emitted, because the minor was never scheduled past curfew.
    let store = monday_store("06:00", "23:00");
    let employees = vec![minor("Dana", 12.5), employee("Avery", 16.5)];
    let availability = vec![
        slot("Dana", DayOfWeek::Monday, "06:00", "23:00"),
        slot("Avery", DayOfWeek::Monday, "06:00", "22:00"),
    ];

    let pipeline = SchedulePipeline::new(
        inputs(store, employees, availability, rules_no_breaks()),
        SolverConfig::default(),
    );
    let mut params = single_day_params(monday());
    params.staffing_overrides = Some(vec![weekday_floor("06:00", "23:00", 1)]);

    let result = pipeline.generate(&params).unwrap();

    // Curfew 22:00 is period 32 of a 06:00 open.
    let dana = day_schedule(&result, "Dana");
    assert!(dana
        .scheduled_periods()
        .iter()
        .all(|&t| t < 32), "minor scheduled past curfew");

    let unfilled: Vec<usize> = result.daily_summaries[0]
        .unfilled_periods
        .iter()
        .map(|u| u.period_index)
        .collect();
    assert_eq!(unfilled, vec![32, 33]);
    assert!(result.has_warnings);

    assert!(violations_of(&result, ViolationType::MinorCurfew).is_empty());
}

#[test]
fn test_clopening_prefilter_blocks_early_start() {
    // Ended Sunday 23:00 with a 10h rest rule: Monday periods before 09:00
    // are masked off, and the composed week carries no rest violation.
    let store = monday_store("06:00", "23:00");
    let employees = vec![employee("Avery", 15.0)];
    let availability = vec![slot("Avery", DayOfWeek::Monday, "06:00", "14:00")];
    let rule_store = rule_store_with(ComplianceRules {
        min_rest_hours: 10.0,
        meal_break_enabled: false,
        ..ComplianceRules::default()
    });

    let pipeline = SchedulePipeline::new(
        inputs(store, employees, availability, rule_store),
        SolverConfig::default(),
    );
    let mut params = single_day_params(monday());
    params.staffing_overrides = Some(vec![weekday_floor("06:00", "23:00", 1)]);
    params.previous_day_shifts = vec![PreviousShift {
        employee_name: "Avery".to_string(),
        date: monday() - Duration::days(1),
        start_time: "15:00".to_string(),
        end_time: "23:00".to_string(),
        total_hours: 8.0,
    }];

    let result = pipeline.generate(&params).unwrap();

    let avery = day_schedule(&result, "Avery");
    // 09:00 is period 6 of a 06:00 open.
    assert!(avery.scheduled_periods().iter().all(|&t| t >= 6));
    assert!(avery.total_hours > 0.0);
    assert!(violations_of(&result, ViolationType::RestViolation).is_empty());
}

#[test]
fn test_locked_clopening_keeps_lock_and_flags_violation() {
    // Locking the blocked 06:00 start is a user override: it round-trips
    // into the schedule and the validator reports the ~7h rest gap.
    let store = monday_store("06:00", "23:00");
    let employees = vec![employee("Avery", 15.0)];
    let availability = vec![slot("Avery", DayOfWeek::Monday, "06:00", "14:00")];
    let rule_store = rule_store_with(ComplianceRules {
        min_rest_hours: 10.0,
        meal_break_enabled: false,
        ..ComplianceRules::default()
    });

    let pipeline = SchedulePipeline::new(
        inputs(store, employees, availability, rule_store),
        SolverConfig::default(),
    );
    let mut params = single_day_params(monday());
    params.staffing_overrides = Some(vec![weekday_floor("06:00", "23:00", 1)]);
    params.previous_day_shifts = vec![PreviousShift {
        employee_name: "Avery".to_string(),
        date: monday() - Duration::days(1),
        start_time: "15:00".to_string(),
        end_time: "23:00".to_string(),
        total_hours: 8.0,
    }];
    params.locked_shifts = vec![LockedAssignment {
        employee_name: "Avery".to_string(),
        date: monday(),
        periods: vec![0, 1, 2, 3],
    }];

    let result = pipeline.generate(&params).unwrap();

    let avery = day_schedule(&result, "Avery");
    assert!(avery.periods[0].scheduled);
    assert_eq!(avery.shift_start.as_deref(), Some("06:00"));

    let rest = violations_of(&result, ViolationType::RestViolation);
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].details["rest_hours"], serde_json::json!(7.0));
}

#[test]
fn test_enforce_mode_flags_conflict_but_returns_schedule() {
    let store = monday_store("06:00", "23:00");
    let employees = vec![employee("Avery", 15.0)];
    let availability = vec![slot("Avery", DayOfWeek::Monday, "06:00", "14:00")];
    let rule_store = rule_store_with(ComplianceRules {
        min_rest_hours: 10.0,
        meal_break_enabled: false,
        ..ComplianceRules::default()
    });

    let pipeline = SchedulePipeline::new(
        inputs(store, employees, availability, rule_store),
        SolverConfig::default(),
    );
    let mut params = single_day_params(monday());
    params.compliance.mode = ComplianceMode::Enforce;
    params.staffing_overrides = Some(vec![weekday_floor("06:00", "23:00", 1)]);
    params.previous_day_shifts = vec![PreviousShift {
        employee_name: "Avery".to_string(),
        date: monday() - Duration::days(1),
        start_time: "15:00".to_string(),
        end_time: "23:00".to_string(),
        total_hours: 8.0,
    }];
    params.locked_shifts = vec![LockedAssignment {
        employee_name: "Avery".to_string(),
        date: monday(),
        periods: vec![0, 1, 2],
    }];

    let result = pipeline.generate(&params).unwrap();
    assert!(!result.is_compliant);
    assert!(result.error_count() > 0);
    assert!(matches!(
        result.compliance_error(),
        Some(shared::ScheduleError::ComplianceConflict { .. })
    ));
}

#[test]
fn test_california_daily_overtime() {
    // One locked 06:00-19:00 shift (13h) under CA rules: one DAILY_OVERTIME
    // finding with 5h of excess.
    let mut store = monday_store("06:00", "22:00");
    store.jurisdiction = "CA".to_string();
    let employees = vec![employee("Avery", 15.0)];
    let availability = vec![slot("Avery", DayOfWeek::Monday, "06:00", "22:00")];

    let config = SolverConfig {
        max_daily_hours: 14.0,
        ..SolverConfig::default()
    };
    let pipeline = SchedulePipeline::new(
        inputs(store, employees, availability, compliance::RuleStore::with_builtin()),
        config,
    );
    let mut params = single_day_params(monday());
    params.staffing_overrides = Some(vec![weekday_floor("06:00", "22:00", 0)]);
    params.locked_shifts = vec![LockedAssignment {
        employee_name: "Avery".to_string(),
        date: monday(),
        periods: (0..26).collect(),
    }];

    let result = pipeline.generate(&params).unwrap();

    let avery = day_schedule(&result, "Avery");
    assert_eq!(avery.total_hours, 13.0);

    let daily = violations_of(&result, ViolationType::DailyOvertime);
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0].details["overtime_hours"], serde_json::json!(5.0));
}

#[test]
fn test_meal_break_scheduled_interior() {
    // A forced 09:00-15:00 shift (6h) with the default 5h meal threshold:
    // exactly one interior break period, hours counted as paid.
    let store = monday_store("09:00", "15:00");
    let employees = vec![employee("Avery", 15.0)];
    let availability = vec![slot("Avery", DayOfWeek::Monday, "09:00", "15:00")];

    let pipeline = SchedulePipeline::new(
        inputs(
            store,
            employees,
            availability,
            compliance::RuleStore::with_builtin(),
        ),
        SolverConfig::default(),
    );
    let mut params = single_day_params(monday());
    params.staffing_overrides = Some(vec![weekday_floor("09:00", "15:00", 1)]);
    params.locked_shifts = vec![LockedAssignment {
        employee_name: "Avery".to_string(),
        date: monday(),
        periods: (0..12).collect(),
    }];

    let result = pipeline.generate(&params).unwrap();

    let avery = day_schedule(&result, "Avery");
    assert_eq!(avery.total_hours, 6.0);

    let breaks: Vec<usize> = avery
        .periods
        .iter()
        .filter(|p| p.is_break)
        .map(|p| p.period_index)
        .collect();
    assert_eq!(breaks.len(), 1, "expected exactly one break, got {breaks:?}");
    let break_period = breaks[0];
    assert!(break_period > 0 && break_period < 11, "break not interior");
    // The break period stays scheduled (hours paid).
    assert!(avery.periods[break_period].scheduled);

    assert_eq!(violations_of(&result, ViolationType::MealBreakRequired).len(), 1);
}

#[test]
fn test_predictive_notice_shortfall() {
    let store = monday_store("08:00", "15:00");
    let employees = vec![employee("Avery", 15.0)];
    let availability = vec![slot("Avery", DayOfWeek::Monday, "08:00", "15:00")];

    let pipeline = SchedulePipeline::new(
        inputs(store, employees, availability, rules_no_breaks()),
        SolverConfig::default(),
    );
    let mut params = single_day_params(monday());
    params.published_at = Some(monday() - Duration::days(7));

    let result = pipeline.generate(&params).unwrap();

    let notice = violations_of(&result, ViolationType::PredictiveNotice);
    assert_eq!(notice.len(), 1);
    assert_eq!(notice[0].employee_name, "ALL");
    assert_eq!(notice[0].details["actual_notice_days"], serde_json::json!(7));
    assert_eq!(notice[0].details["days_short"], serde_json::json!(7));
}

#[test]
fn test_short_shift_penalty_matches_deficit() {
    // Only one hour of availability beyond the open-prep period: the shift
    // comes up short of the 3h minimum and the penalty equals the deficit
    // times the configured rate.
    let store = monday_store("08:00", "10:00");
    let employees = vec![employee("Avery", 15.0)];
    let availability = vec![slot("Avery", DayOfWeek::Monday, "08:00", "10:00")];

    let pipeline = SchedulePipeline::new(
        inputs(store, employees, availability, rules_no_breaks()),
        SolverConfig::default(),
    );
    let mut params = single_day_params(monday());
    params.compliance.mode = ComplianceMode::Off;
    params.staffing_overrides = Some(vec![weekday_floor("08:00", "10:00", 1)]);

    let result = pipeline.generate(&params).unwrap();

    let avery = day_schedule(&result, "Avery");
    assert_eq!(avery.total_hours, 2.0);
    assert!(avery.is_short_shift);
    // (3.0 - 2.0) hours deficit at 50 per hour.
    assert!((result.total_short_shift_penalty - 50.0).abs() < 1e-6);
    assert!(result.has_warnings);
}

#[test]
fn test_repeated_runs_agree() {
    let store = monday_store("08:00", "15:00");
    let employees = vec![
        employee("Avery", 10.0),
        employee("Blake", 15.0),
        employee("Carmen", 16.0),
    ];
    let availability = employees
        .iter()
        .map(|e| slot(&e.name, DayOfWeek::Monday, "08:00", "15:00"))
        .collect();

    let pipeline = SchedulePipeline::new(
        inputs(store, employees, availability, rules_no_breaks()),
        SolverConfig::default(),
    );
    let params = single_day_params(monday());

    let first = pipeline.generate(&params).unwrap();
    let second = pipeline.generate(&params).unwrap();

    assert_eq!(first.total_weekly_cost, second.total_weekly_cost);
    assert_eq!(first.compliance_violations, second.compliance_violations);
    assert_eq!(first.schedules, second.schedules);
    assert_eq!(first.daily_summaries, second.daily_summaries);
}

#[test]
fn test_weekly_result_survives_json_round_trip() {
    let store = monday_store("08:00", "15:00");
    let employees = vec![employee("Avery", 15.0)];
    let availability = vec![slot("Avery", DayOfWeek::Monday, "08:00", "15:00")];

    let pipeline = SchedulePipeline::new(
        inputs(store, employees, availability, rules_no_breaks()),
        SolverConfig::default(),
    );
    let result = pipeline.generate(&single_day_params(monday())).unwrap();

    let json = serde_json::to_string(&result).unwrap();
    let back: scheduling_engine::WeeklyResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn test_days_without_store_hours_are_skipped() {
    let store = monday_store("08:00", "15:00");
    let employees = vec![employee("Avery", 15.0)];
    let availability = vec![slot("Avery", DayOfWeek::Monday, "08:00", "15:00")];

    let pipeline = SchedulePipeline::new(
        inputs(store, employees, availability, rules_no_breaks()),
        SolverConfig::default(),
    );
    // Monday through Sunday; the store only opens Mondays.
    let mut params = single_day_params(monday());
    params.end_date = monday() + Duration::days(6);

    let result = pipeline.generate(&params).unwrap();
    assert_eq!(result.daily_summaries.len(), 1);
    assert!(result.schedules.iter().all(|s| s.date == monday()));
}
