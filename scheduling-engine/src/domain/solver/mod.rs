//! Solver facade over the MILP modelling layer. The formulation is shared;
//! backends plug in the concrete solver and are interchangeable up to
//! solver tolerance.

pub mod backend;
pub mod backends;
pub(crate) mod formulation;
pub(crate) mod lp_writer;
pub mod types;

pub use backend::{create_backend, SolverBackend};
pub use types::{ScheduleProblem, SolverConfig, SolverKind, SolverResult, SolverStatus};
