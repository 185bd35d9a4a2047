//! Weekly schedule generation for a retail store: per-day MILP assignment
//! over a half-hour period grid, with labor-law compliance applied both as
//! solver pre-filters and as post-validation.

pub mod demo;
pub mod domain;
pub mod infrastructure;

pub use domain::entities::{
    AvailabilitySlot, Employee, LockedAssignment, StaffingRequirement, Store, StoreDay,
};
pub use domain::schedule::{
    DayScheduleSummary, EmployeeDaySchedule, ShiftPeriod, UnfilledPeriod, WeeklyResult,
};
pub use domain::services::{
    ComplianceOptions, PreviousShift, RunParameters, ScheduleInputs, SchedulePipeline,
};
pub use domain::solver::{
    create_backend, ScheduleProblem, SolverBackend, SolverConfig, SolverKind, SolverResult,
    SolverStatus,
};
