use std::collections::BTreeMap;

use serde_json::json;
use shared::{time, ScheduleResult};

use super::Validator;
use crate::types::{round1, ComplianceContext, ComplianceReport, Violation, ViolationType};

/// Curfew, earliest-start, and daily/weekly hour limits for minors.
pub struct MinorRestrictionsValidator;

impl Validator for MinorRestrictionsValidator {
    fn validate(
        &self,
        context: &ComplianceContext,
        report: &mut ComplianceReport,
    ) -> ScheduleResult<()> {
        if !context.toggles.minor_restrictions {
            return Ok(());
        }

        let rules = &context.rules;
        let severity = context.mode.blocking_severity();
        let curfew = time::parse_hhmm(&rules.minor_curfew_end)?;
        let earliest = time::parse_hhmm(&rules.minor_earliest_start)?;

        let mut shifts_by_employee: BTreeMap<&str, Vec<_>> = BTreeMap::new();
        for shift in &context.shifts {
            if shift.total_hours > 0.0 {
                shifts_by_employee
                    .entry(shift.employee_name.as_str())
                    .or_default()
                    .push(shift);
            }
        }

        for (name, shifts) in shifts_by_employee {
            let is_minor = context
                .employees
                .get(name)
                .map(|e| e.is_minor)
                .unwrap_or(false);
            if !is_minor {
                continue;
            }

            let mut weekly_hours = 0.0;

            for shift in shifts {
                if time::parse_hhmm(&shift.end_time)? > curfew {
                    report.add_violation(Violation {
                        rule_type: ViolationType::MinorCurfew,
                        severity,
                        employee_name: name.to_string(),
                        date: Some(shift.date),
                        message: format!(
                            "Minor {name} scheduled to work until {}, past curfew of {}",
                            shift.end_time, rules.minor_curfew_end
                        ),
                        details: BTreeMap::from([
                            ("shift_end".to_string(), json!(shift.end_time)),
                            ("curfew".to_string(), json!(rules.minor_curfew_end)),
                        ]),
                    });
                }

                if time::parse_hhmm(&shift.start_time)? < earliest {
                    report.add_violation(Violation {
                        rule_type: ViolationType::MinorEarlyStart,
                        severity,
                        employee_name: name.to_string(),
                        date: Some(shift.date),
                        message: format!(
                            "Minor {name} scheduled to start at {}, before allowed time of {}",
                            shift.start_time, rules.minor_earliest_start
                        ),
                        details: BTreeMap::from([
                            ("shift_start".to_string(), json!(shift.start_time)),
                            (
                                "earliest_allowed".to_string(),
                                json!(rules.minor_earliest_start),
                            ),
                        ]),
                    });
                }

                if shift.total_hours > rules.minor_max_daily_hours {
                    report.add_violation(Violation {
                        rule_type: ViolationType::MinorDailyHours,
                        severity,
                        employee_name: name.to_string(),
                        date: Some(shift.date),
                        message: format!(
                            "Minor {name} scheduled for {}h on {}, exceeds max of {}h",
                            shift.total_hours, shift.date, rules.minor_max_daily_hours
                        ),
                        details: BTreeMap::from([
                            ("hours_scheduled".to_string(), json!(shift.total_hours)),
                            ("max_allowed".to_string(), json!(rules.minor_max_daily_hours)),
                        ]),
                    });
                }

                weekly_hours += shift.total_hours;
            }

            if weekly_hours > rules.minor_max_weekly_hours {
                report.add_violation(Violation {
                    rule_type: ViolationType::MinorWeeklyHours,
                    severity,
                    employee_name: name.to_string(),
                    date: None,
                    message: format!(
                        "Minor {name} scheduled for {}h this week, exceeds max of {}h",
                        round1(weekly_hours),
                        rules.minor_max_weekly_hours
                    ),
                    details: BTreeMap::from([
                        ("hours_scheduled".to_string(), json!(round1(weekly_hours))),
                        ("max_allowed".to_string(), json!(rules.minor_max_weekly_hours)),
                    ]),
                });
            }
        }

        Ok(())
    }
}
