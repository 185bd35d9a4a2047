use std::collections::BTreeMap;

use serde_json::json;
use shared::ScheduleResult;

use super::Validator;
use crate::types::{round1, ComplianceContext, ComplianceReport, Violation, ViolationType};

/// Minimum rest between consecutive shifts (anti-clopening). The previous
/// day's shifts are considered so the first day of the range is covered.
pub struct RestBetweenShiftsValidator;

impl Validator for RestBetweenShiftsValidator {
    fn validate(
        &self,
        context: &ComplianceContext,
        report: &mut ComplianceReport,
    ) -> ScheduleResult<()> {
        if !context.toggles.rest_between_shifts {
            return Ok(());
        }

        let rules = &context.rules;
        let severity = context.mode.blocking_severity();

        let mut shifts_by_employee: BTreeMap<&str, Vec<_>> = BTreeMap::new();
        for shift in context.previous_day_shifts.iter().chain(&context.shifts) {
            if shift.total_hours > 0.0 {
                shifts_by_employee
                    .entry(shift.employee_name.as_str())
                    .or_default()
                    .push(shift);
            }
        }

        for (name, mut shifts) in shifts_by_employee {
            shifts.sort_by(|a, b| {
                (a.date, a.start_time.as_str()).cmp(&(b.date, b.start_time.as_str()))
            });

            for pair in shifts.windows(2) {
                let (prev, curr) = (pair[0], pair[1]);
                let prev_end = prev.end_datetime()?;
                let curr_start = curr.start_datetime()?;

                let rest_hours = (curr_start - prev_end).num_minutes() as f64 / 60.0;
                if rest_hours < rules.min_rest_hours {
                    report.add_violation(Violation {
                        rule_type: ViolationType::RestViolation,
                        severity,
                        employee_name: name.to_string(),
                        date: Some(curr.date),
                        message: format!(
                            "{name} has only {:.1}h rest between shifts (min {}h required). \
                             Previous shift ended {} on {}, next starts {} on {}",
                            rest_hours,
                            rules.min_rest_hours,
                            prev.end_time,
                            prev.date,
                            curr.start_time,
                            curr.date
                        ),
                        details: BTreeMap::from([
                            ("rest_hours".to_string(), json!(round1(rest_hours))),
                            ("min_required".to_string(), json!(rules.min_rest_hours)),
                            ("previous_shift_end".to_string(), json!(prev.end_time)),
                            ("previous_shift_date".to_string(), json!(prev.date.to_string())),
                            ("current_shift_start".to_string(), json!(curr.start_time)),
                        ]),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ComplianceRules;
    use crate::types::{ComplianceMode, ViolationSeverity};
    use crate::validators::test_support::{context, employee, shift};

    fn run(ctx: &ComplianceContext) -> ComplianceReport {
        let mut report = ComplianceReport::new();
        RestBetweenShiftsValidator.validate(ctx, &mut report).unwrap();
        report
    }

    #[test]
    fn test_no_violation_with_adequate_rest() {
        let ctx = context(
            ComplianceRules::default(),
            vec![employee("Alex", false)],
            vec![
                shift("Alex", "2025-01-20", "09:00", "17:00", 8.0),
                shift("Alex", "2025-01-21", "09:00", "17:00", 8.0),
            ],
        );
        assert!(run(&ctx).violations.is_empty());
    }

    #[test]
    fn test_clopening_scenario() {
        // Closes at 23:00, opens at 06:00 next day: 7h rest against a
        // minimum of 8.
        let ctx = context(
            ComplianceRules::default(),
            vec![employee("Alex", false)],
            vec![
                shift("Alex", "2025-01-20", "15:00", "23:00", 8.0),
                shift("Alex", "2025-01-21", "06:00", "14:00", 8.0),
            ],
        );
        let report = run(&ctx);
        assert_eq!(report.violations.len(), 1);
        let violation = &report.violations[0];
        assert_eq!(violation.rule_type, ViolationType::RestViolation);
        assert_eq!(
            violation.date,
            Some(chrono::NaiveDate::from_ymd_opt(2025, 1, 21).unwrap())
        );
        assert_eq!(violation.details["rest_hours"], serde_json::json!(7.0));
    }

    #[test]
    fn test_previous_day_shift_is_considered() {
        let mut ctx = context(
            ComplianceRules::default(),
            vec![employee("Alex", false)],
            vec![shift("Alex", "2025-01-20", "06:00", "14:00", 8.0)],
        );
        ctx.previous_day_shifts = vec![shift("Alex", "2025-01-19", "15:00", "23:00", 8.0)];
        let report = run(&ctx);
        assert_eq!(report.violations.len(), 1);
    }

    #[test]
    fn test_exact_minimum_rest_no_violation() {
        let ctx = context(
            ComplianceRules::default(),
            vec![employee("Alex", false)],
            vec![
                shift("Alex", "2025-01-20", "14:00", "22:00", 8.0),
                shift("Alex", "2025-01-21", "06:00", "14:00", 8.0),
            ],
        );
        assert!(run(&ctx).violations.is_empty());
    }

    #[test]
    fn test_shift_ending_at_day_end() {
        // End recorded as 24:00; 6h to the next 06:00 start.
        let ctx = context(
            ComplianceRules::default(),
            vec![employee("Alex", false)],
            vec![
                shift("Alex", "2025-01-20", "18:00", "24:00", 6.0),
                shift("Alex", "2025-01-21", "06:00", "14:00", 8.0),
            ],
        );
        let report = run(&ctx);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].details["rest_hours"], serde_json::json!(6.0));
    }

    #[test]
    fn test_rest_monotone_in_min_rest_hours() {
        let shifts = vec![
            shift("Alex", "2025-01-20", "12:00", "22:00", 10.0),
            shift("Alex", "2025-01-21", "07:00", "15:00", 8.0),
        ];
        let mut counts = Vec::new();
        for min_rest in [6.0, 9.0, 12.0] {
            let rules = ComplianceRules {
                min_rest_hours: min_rest,
                ..ComplianceRules::default()
            };
            let ctx = context(rules, vec![employee("Alex", false)], shifts.clone());
            counts.push(run(&ctx).violations.len());
        }
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_enforce_mode_escalates_severity() {
        let mut ctx = context(
            ComplianceRules::default(),
            vec![employee("Alex", false)],
            vec![
                shift("Alex", "2025-01-20", "15:00", "23:00", 8.0),
                shift("Alex", "2025-01-21", "06:00", "14:00", 8.0),
            ],
        );
        ctx.mode = ComplianceMode::Enforce;
        let report = run(&ctx);
        assert_eq!(report.violations[0].severity, ViolationSeverity::Error);
    }

    #[test]
    fn test_disabled_validator_emits_nothing() {
        let mut ctx = context(
            ComplianceRules::default(),
            vec![employee("Alex", false)],
            vec![
                shift("Alex", "2025-01-20", "15:00", "23:00", 8.0),
                shift("Alex", "2025-01-21", "06:00", "14:00", 8.0),
            ],
        );
        ctx.toggles.rest_between_shifts = false;
        assert!(run(&ctx).violations.is_empty());
    }
}
