use std::collections::BTreeMap;

use serde_json::json;
use shared::ScheduleResult;

use super::Validator;
use crate::types::{
    ComplianceContext, ComplianceReport, Violation, ViolationSeverity, ViolationType,
};

/// Meal and rest break advisories. Always warnings.
pub struct BreakComplianceValidator;

impl Validator for BreakComplianceValidator {
    fn validate(
        &self,
        context: &ComplianceContext,
        report: &mut ComplianceReport,
    ) -> ScheduleResult<()> {
        if !context.toggles.break_compliance {
            return Ok(());
        }

        let rules = &context.rules;
        let severity = ViolationSeverity::Warning;

        for shift in &context.shifts {
            if shift.total_hours <= 0.0 {
                continue;
            }
            let name = &shift.employee_name;

            if shift.total_hours > rules.meal_break_after_hours {
                report.add_violation(Violation {
                    rule_type: ViolationType::MealBreakRequired,
                    severity,
                    employee_name: name.clone(),
                    date: Some(shift.date),
                    message: format!(
                        "{name} working {}h on {} - requires {}min meal break (shifts > {}h)",
                        shift.total_hours,
                        shift.date,
                        rules.meal_break_duration_minutes,
                        rules.meal_break_after_hours
                    ),
                    details: BTreeMap::from([
                        ("shift_hours".to_string(), json!(shift.total_hours)),
                        ("break_threshold".to_string(), json!(rules.meal_break_after_hours)),
                        (
                            "break_duration".to_string(),
                            json!(rules.meal_break_duration_minutes),
                        ),
                    ]),
                });
            }

            if let Some(interval) = rules.rest_break_interval_hours {
                if interval > 0.0 && shift.total_hours >= interval {
                    let breaks_needed = (shift.total_hours / interval) as u32;
                    if breaks_needed > 0 {
                        report.add_violation(Violation {
                            rule_type: ViolationType::RestBreakRequired,
                            severity,
                            employee_name: name.clone(),
                            date: Some(shift.date),
                            message: format!(
                                "{name} working {}h on {} - entitled to {breaks_needed} x {}min \
                                 rest break(s)",
                                shift.total_hours, shift.date, rules.rest_break_duration_minutes
                            ),
                            details: BTreeMap::from([
                                ("shift_hours".to_string(), json!(shift.total_hours)),
                                ("break_interval".to_string(), json!(interval)),
                                ("breaks_needed".to_string(), json!(breaks_needed)),
                                (
                                    "break_duration".to_string(),
                                    json!(rules.rest_break_duration_minutes),
                                ),
                            ]),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}
