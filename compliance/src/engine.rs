use shared::ScheduleResult;

use crate::types::{ComplianceContext, ComplianceMode, ComplianceReport};
use crate::validators::{
    BreakComplianceValidator, MinorRestrictionsValidator, OvertimeValidator,
    PredictiveSchedulingValidator, RestBetweenShiftsValidator, Validator,
};

/// Runs all validators over a composed week and collects the findings.
pub struct ComplianceEngine {
    validators: Vec<Box<dyn Validator>>,
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplianceEngine {
    pub fn new() -> Self {
        Self {
            validators: vec![
                Box::new(MinorRestrictionsValidator),
                Box::new(RestBetweenShiftsValidator),
                Box::new(OvertimeValidator),
                Box::new(BreakComplianceValidator),
                Box::new(PredictiveSchedulingValidator),
            ],
        }
    }

    /// Run every enabled validator. Violation order is validator order,
    /// then each validator's own scan order.
    pub fn validate(&self, context: &ComplianceContext) -> ScheduleResult<ComplianceReport> {
        if context.mode == ComplianceMode::Off {
            return Ok(ComplianceReport::new());
        }

        let mut report = ComplianceReport::new();
        for validator in &self.validators {
            validator.validate(context, &mut report)?;
        }

        tracing::debug!(
            violations = report.violations.len(),
            errors = report.error_count(),
            "compliance validation finished"
        );

        Ok(report)
    }
}
