use std::collections::BTreeMap;

use serde_json::json;
use shared::ScheduleResult;

use super::Validator;
use crate::types::{
    round1, ComplianceContext, ComplianceReport, Violation, ViolationSeverity, ViolationType,
};

/// Daily and weekly overtime tracking. Findings are informational and stay
/// warnings in every mode; weekly totals and overtime hours are recorded on
/// the report for payroll reporting.
pub struct OvertimeValidator;

impl Validator for OvertimeValidator {
    fn validate(
        &self,
        context: &ComplianceContext,
        report: &mut ComplianceReport,
    ) -> ScheduleResult<()> {
        if !context.toggles.overtime_tracking {
            return Ok(());
        }

        let rules = &context.rules;
        let severity = ViolationSeverity::Warning;

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
            let mut weekly_hours = 0.0;
            let mut overtime_hours = 0.0;

            for shift in shifts {
                if let Some(threshold) = rules.daily_overtime_threshold {
                    if shift.total_hours > threshold {
                        let daily_ot = shift.total_hours - threshold;
                        overtime_hours += daily_ot;
                        report.add_violation(Violation {
                            rule_type: ViolationType::DailyOvertime,
                            severity,
                            employee_name: name.to_string(),
                            date: Some(shift.date),
                            message: format!(
                                "{name} working {}h on {}, {:.1}h daily overtime (threshold: {}h)",
                                shift.total_hours, shift.date, daily_ot, threshold
                            ),
                            details: BTreeMap::from([
                                ("daily_hours".to_string(), json!(shift.total_hours)),
                                ("threshold".to_string(), json!(threshold)),
                                ("overtime_hours".to_string(), json!(round1(daily_ot))),
                            ]),
                        });
                    }
                }

                weekly_hours += shift.total_hours;
            }

            report
                .employee_weekly_hours
                .insert(name.to_string(), round1(weekly_hours));

            if weekly_hours > rules.weekly_overtime_threshold {
                let weekly_ot = weekly_hours - rules.weekly_overtime_threshold;
                overtime_hours += weekly_ot;
                report.add_violation(Violation {
                    rule_type: ViolationType::WeeklyOvertime,
                    severity,
                    employee_name: name.to_string(),
                    date: None,
                    message: format!(
                        "{name} scheduled for {:.1}h this week, {:.1}h overtime (threshold: {}h)",
                        weekly_hours, weekly_ot, rules.weekly_overtime_threshold
                    ),
                    details: BTreeMap::from([
                        ("weekly_hours".to_string(), json!(round1(weekly_hours))),
                        ("threshold".to_string(), json!(rules.weekly_overtime_threshold)),
                        ("overtime_hours".to_string(), json!(round1(weekly_ot))),
                    ]),
                });
            }

            if overtime_hours > 0.0 {
                report
                    .overtime_hours
                    .insert(name.to_string(), round1(overtime_hours));
            }
        }

        Ok(())
    }
}
