use std::collections::BTreeMap;

use serde_json::json;
use shared::ScheduleResult;

use super::Validator;
use crate::types::{
    ComplianceContext, ComplianceReport, Violation, ViolationSeverity, ViolationType,
};

/// Advance-notice (predictive scheduling) check. One schedule-wide finding,
/// attributed to `"ALL"` employees. Always a warning.
pub struct PredictiveSchedulingValidator;

impl Validator for PredictiveSchedulingValidator {
    fn validate(
        &self,
        context: &ComplianceContext,
        report: &mut ComplianceReport,
    ) -> ScheduleResult<()> {
        if !context.toggles.predictive_scheduling {
            return Ok(());
        }

        let rules = &context.rules;
        let (Some(start_date), Some(published_at)) =
            (context.schedule_start_date, context.published_at)
        else {
            return Ok(());
        };

        let required_publish_date =
            start_date - chrono::Duration::days(i64::from(rules.advance_notice_days));

        if published_at > required_publish_date {
            let days_short = (published_at - required_publish_date).num_days();
            let actual_notice_days = (start_date - published_at).num_days();

            report.add_violation(Violation {
                rule_type: ViolationType::PredictiveNotice,
                severity: ViolationSeverity::Warning,
                employee_name: "ALL".to_string(),
                date: None,
                message: format!(
                    "Schedule published with only {actual_notice_days} days notice (requires {} \
                     days). {days_short} days short of compliance.",
                    rules.advance_notice_days
                ),
                details: BTreeMap::from([
                    ("required_notice_days".to_string(), json!(rules.advance_notice_days)),
                    ("actual_notice_days".to_string(), json!(actual_notice_days)),
                    ("days_short".to_string(), json!(days_short)),
                    ("schedule_start".to_string(), json!(start_date.to_string())),
                    ("published_at".to_string(), json!(published_at.to_string())),
                ]),
            });
        }

        Ok(())
    }
}
