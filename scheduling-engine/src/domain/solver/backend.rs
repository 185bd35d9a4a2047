use std::path::Path;

use good_lp::ResolutionError;
use shared::{ScheduleError, ScheduleResult};

use super::lp_writer;
use super::types::{ScheduleProblem, SolverConfig, SolverKind, SolverResult, SolverStatus};

/// A pluggable day solver. `solve` never panics on solver trouble; failures
/// are reported through [`SolverStatus`].
pub trait SolverBackend {
    fn name(&self) -> &'static str;

    /// Solve one day. A fresh model is built per call.
    fn solve(&mut self, problem: &ScheduleProblem, config: &SolverConfig) -> SolverResult;

    /// Write the most recently solved model in LP format, for debugging.
    fn write_model(&self, path: &Path) -> ScheduleResult<()>;

    /// Write an infeasibility diagnostic. None of the available backends
    /// compute a native IIS, so the LP model is written instead.
    fn compute_iis(&self, path: &Path) -> ScheduleResult<()>;
}

/// Factory for solver backends. Selecting a backend whose feature was not
/// compiled in is an input error.
pub fn create_backend(kind: SolverKind) -> ScheduleResult<Box<dyn SolverBackend>> {
    match kind {
        #[cfg(feature = "microlp")]
        SolverKind::Microlp => Ok(Box::new(super::backends::MicrolpBackend::new())),
        #[cfg(feature = "coin-cbc")]
        SolverKind::CoinCbc => Ok(Box::new(super::backends::CoinCbcBackend::new())),
        #[cfg(feature = "highs")]
        SolverKind::Highs => Ok(Box::new(super::backends::HighsBackend::new())),
        #[allow(unreachable_patterns)]
        other => Err(ScheduleError::InvalidInput(format!(
            "solver backend {:?} is not compiled in; enable the matching cargo feature",
            other.as_str()
        ))),
    }
}

/// Centralized mapping from the modelling layer's failure states.
pub(crate) fn status_from_resolution_error(error: &ResolutionError) -> SolverStatus {
    match error {
        ResolutionError::Infeasible => SolverStatus::Infeasible,
        _ => SolverStatus::Error,
    }
}

/// The inputs of the last solved model, retained so the debugging
/// operations can re-render it on demand.
pub(crate) struct ModelSnapshot {
    problem: ScheduleProblem,
    config: SolverConfig,
}

impl ModelSnapshot {
    pub(crate) fn new(problem: &ScheduleProblem, config: &SolverConfig) -> Self {
        Self {
            problem: problem.clone(),
            config: config.clone(),
        }
    }

    pub(crate) fn write_lp(&self, path: &Path) -> ScheduleResult<()> {
        let text = lp_writer::render_lp(&self.problem, &self.config);
        std::fs::write(path, text).map_err(|e| {
            ScheduleError::Solver(format!("failed to write model to {}: {e}", path.display()))
        })
    }
}

/// Shared `write_model` body.
pub(crate) fn dump_model(snapshot: Option<&ModelSnapshot>, path: &Path) -> ScheduleResult<()> {
    match snapshot {
        Some(snapshot) => snapshot.write_lp(path),
        None => Err(ScheduleError::Solver(
            "no model to write; solve has not been called".to_string(),
        )),
    }
}

/// Shared `compute_iis` body for backends without native IIS support.
pub(crate) fn dump_iis_fallback(
    backend: &str,
    snapshot: Option<&ModelSnapshot>,
    path: &Path,
) -> ScheduleResult<()> {
    tracing::warn!(backend, "IIS computation not supported; writing LP model instead");
    dump_model(snapshot, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_from_resolution_error(&ResolutionError::Infeasible),
            SolverStatus::Infeasible
        );
        assert_eq!(
            status_from_resolution_error(&ResolutionError::Unbounded),
            SolverStatus::Error
        );
    }

    #[cfg(feature = "microlp")]
    #[test]
    fn test_create_default_backend() {
        let backend = create_backend(SolverKind::Microlp).unwrap();
        assert_eq!(backend.name(), "microlp");
    }
}
