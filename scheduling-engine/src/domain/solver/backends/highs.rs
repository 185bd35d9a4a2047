//! HiGHS backend, built from source through `highs-sys`; select with the
//! `highs` cargo feature.

use std::path::Path;
use std::time::Instant;

use good_lp::SolverModel;
use shared::ScheduleResult;

use crate::domain::solver::backend::{
    dump_iis_fallback, dump_model, status_from_resolution_error, ModelSnapshot, SolverBackend,
};
use crate::domain::solver::formulation::{build_model, extract_result};
use crate::domain::solver::types::{ScheduleProblem, SolverConfig, SolverResult, SolverStatus};

pub struct HighsBackend {
    snapshot: Option<ModelSnapshot>,
}

impl HighsBackend {
    pub fn new() -> Self {
        Self { snapshot: None }
    }
}

impl Default for HighsBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverBackend for HighsBackend {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve(&mut self, problem: &ScheduleProblem, config: &SolverConfig) -> SolverResult {
        let started = Instant::now();
        self.snapshot = Some(ModelSnapshot::new(problem, config));

        if config.time_limit.is_some() {
            tracing::debug!("time limit not wired for the highs backend; limit ignored");
        }

        let model = build_model(problem, config, 1.0);
        let mut solver = model
            .variables
            .minimise(model.objective)
            .using(good_lp::highs);
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
                tracing::error!(%error, "highs solve failed");
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
