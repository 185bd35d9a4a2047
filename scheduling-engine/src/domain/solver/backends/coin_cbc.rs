//! CBC backend. Needs the CoinOR CBC native library at build time; select
//! with the `coin-cbc` cargo feature.

use std::path::Path;
use std::time::Instant;

use good_lp::SolverModel;
use shared::ScheduleResult;

use crate::domain::solver::backend::{
    dump_iis_fallback, dump_model, status_from_resolution_error, ModelSnapshot, SolverBackend,
};
use crate::domain::solver::formulation::{build_model, extract_result};
use crate::domain::solver::types::{ScheduleProblem, SolverConfig, SolverResult, SolverStatus};

pub struct CoinCbcBackend {
    snapshot: Option<ModelSnapshot>,
}

impl CoinCbcBackend {
    pub fn new() -> Self {
        Self { snapshot: None }
    }
}

impl Default for CoinCbcBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverBackend for CoinCbcBackend {
    fn name(&self) -> &'static str {
        "coin-cbc"
    }

    fn solve(&mut self, problem: &ScheduleProblem, config: &SolverConfig) -> SolverResult {
        let started = Instant::now();
        self.snapshot = Some(ModelSnapshot::new(problem, config));

        let model = build_model(problem, config, 1.0);
        let mut solver = model
            .variables
            .minimise(model.objective)
            .using(good_lp::coin_cbc);
        for constraint in model.constraints {
            solver = solver.with(constraint);
        }
        if let Some(limit) = config.time_limit {
            solver.set_parameter("sec", &limit.as_secs().to_string());
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
                tracing::error!(%error, "coin-cbc solve failed");
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
