//! Pure-Rust backend over `microlp`. Always available; the reference
//! backend for tests and the default selection.

use std::path::Path;
use std::time::Instant;

use good_lp::SolverModel;
use shared::ScheduleResult;

use crate::domain::solver::backend::{
    dump_iis_fallback, dump_model, status_from_resolution_error, ModelSnapshot, SolverBackend,
};
use crate::domain::solver::formulation::{build_model, extract_result};
use crate::domain::solver::types::{ScheduleProblem, SolverConfig, SolverResult, SolverStatus};

/// Cost coefficients are rounded to integer hundredths, keeping the
/// simplex/branch-and-bound arithmetic on cent-exact values. The objective
/// is de-scaled on extraction.
const COST_SCALE: f64 = 100.0;

pub struct MicrolpBackend {
    snapshot: Option<ModelSnapshot>,
}

impl MicrolpBackend {
    pub fn new() -> Self {
        Self { snapshot: None }
    }
}

impl Default for MicrolpBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverBackend for MicrolpBackend {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&mut self, problem: &ScheduleProblem, config: &SolverConfig) -> SolverResult {
        let started = Instant::now();
        self.snapshot = Some(ModelSnapshot::new(problem, config));

        if config.time_limit.is_some() {
            tracing::debug!("microlp has no time limit support; limit ignored");
        }

        let model = build_model(problem, config, COST_SCALE);
        let mut solver = model
            .variables
            .minimise(model.objective)
            .using(good_lp::microlp);
        for constraint in model.constraints {
            solver = solver.with(constraint);
        }

        match solver.solve() {
            Ok(solution) => extract_result(
                problem,
                config,
                &model.vars,
                &solution,
                SolverStatus::Optimal,
                started.elapsed(),
            ),
            Err(error) => {
                tracing::error!(%error, "microlp solve failed");
                SolverResult::failed(status_from_resolution_error(&error), started.elapsed())
            }
        }
    }

    fn write_model(&self, path: &Path) -> ScheduleResult<()> {
        dump_model(self.snapshot.as_ref(), path)
    }

    fn compute_iis(&self, path: &Path) -> ScheduleResult<()> {
        dump_iis_fallback(self.name(), self.snapshot.as_ref(), path)
    }
}
