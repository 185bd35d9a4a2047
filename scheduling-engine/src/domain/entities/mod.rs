pub mod employee;
pub mod locked_assignment;
pub mod store;

pub use employee::{AvailabilitySlot, Employee};
pub use locked_assignment::LockedAssignment;
pub use store::{StaffingRequirement, Store, StoreDay};
