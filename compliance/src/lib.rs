//! Labor-law compliance for generated schedules.
//!
//! Two halves, kept in lockstep: [`prefilter`] turns hard restrictions into
//! availability masks before the solver runs, and [`engine`] re-checks the
//! composed week afterwards, catching lock overrides and cross-day cases a
//! single-day model cannot see.

pub mod engine;
pub mod prefilter;
pub mod rules;
pub mod types;
pub mod validators;

// Re-export commonly used items
pub use engine::ComplianceEngine;
pub use rules::{ComplianceRules, RuleStore};
pub use types::{
    ComplianceContext, ComplianceMode, ComplianceReport, EmployeeProfile, ShiftInfo,
    ValidatorToggles, Violation, ViolationSeverity, ViolationType,
};
