pub mod day;
pub mod period;
pub mod weekly;

pub use day::{DayScheduleSummary, EmployeeDaySchedule};
pub use period::{ShiftPeriod, UnfilledPeriod};
pub use weekly::WeeklyResult;
