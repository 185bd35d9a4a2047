pub mod break_compliance;
pub mod minor_restrictions;
pub mod overtime;
pub mod predictive_scheduling;
pub mod rest_between_shifts;

use shared::ScheduleResult;

use crate::types::{ComplianceContext, ComplianceReport};

pub use break_compliance::BreakComplianceValidator;
pub use minor_restrictions::MinorRestrictionsValidator;
pub use overtime::OvertimeValidator;
pub use predictive_scheduling::PredictiveSchedulingValidator;
pub use rest_between_shifts::RestBetweenShiftsValidator;

/// A single compliance check over the composed week. Validators read the
/// context and append findings; they never mutate the schedule.
pub trait Validator: Send + Sync {
    /// Check the schedule and add any violations to the report.
    fn validate(
        &self,
        context: &ComplianceContext,
        report: &mut ComplianceReport,
    ) -> ScheduleResult<()>;
}
