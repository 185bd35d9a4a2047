//! Day Result Composer: turns the raw assignment matrix into per-employee
//! day schedules and the day's summary.

use shared::time;

use crate::domain::schedule::{DayScheduleSummary, EmployeeDaySchedule, ShiftPeriod, UnfilledPeriod};
use crate::domain::solver::{ScheduleProblem, SolverResult};

pub struct DayComposer {
    min_shift_hours: f64,
    dummy_worker_cost: f64,
    short_shift_penalty: f64,
}

impl DayComposer {
    pub fn new(min_shift_hours: f64, dummy_worker_cost: f64, short_shift_penalty: f64) -> Self {
        Self {
            min_shift_hours,
            dummy_worker_cost,
            short_shift_penalty,
        }
    }

    pub fn compose(
        &self,
        problem: &ScheduleProblem,
        result: &SolverResult,
    ) -> (Vec<EmployeeDaySchedule>, DayScheduleSummary) {
        let open = problem.open_minutes;
        let mut schedules = Vec::with_capacity(problem.employees.len());

        for (e, name) in problem.employees.iter().enumerate() {
            let mut periods = Vec::with_capacity(problem.num_periods);
            let mut scheduled_indices = Vec::new();

            for t in 0..problem.num_periods {
                let scheduled = result.schedule_matrix[e][t];
                let period = ShiftPeriod {
                    period_index: t,
                    start_time: time::period_to_time(open, t),
                    end_time: time::period_to_time(open, t + 1),
                    scheduled,
                    is_locked: problem.locked_periods.contains(&(e, t)),
                    is_break: result.break_periods[e].contains(&t),
                };
                if scheduled {
                    scheduled_indices.push(t);
                }
                periods.push(period);
            }

            let total_hours = scheduled_indices.len() as f64 * 0.5;
            let shift_start = scheduled_indices
                .first()
                .map(|&t| time::period_to_time(open, t));
            let shift_end = scheduled_indices
                .last()
                .map(|&t| time::period_to_time(open, t + 1));
            let is_short_shift = total_hours > 0.0 && total_hours < self.min_shift_hours;

            schedules.push(EmployeeDaySchedule {
                employee_name: name.clone(),
                day_of_week: problem.day_of_week,
                date: problem.date,
                periods,
                total_hours,
                shift_start,
                shift_end,
                is_short_shift,
            });
        }

        let mut unfilled_periods = Vec::new();
        let mut dummy_worker_cost = 0.0;
        for (t, &dummy) in result.dummy_values.iter().enumerate() {
            if dummy > 0.5 {
                let workers_needed = dummy.round() as u32;
                dummy_worker_cost += f64::from(workers_needed) * self.dummy_worker_cost;
                unfilled_periods.push(UnfilledPeriod {
                    period_index: t,
                    start_time: time::period_to_time(open, t),
                    end_time: time::period_to_time(open, t + 1),
                    workers_needed,
                });
            }
        }

        let short_shift_cost = self.short_shift_cost(result);

        let employees_scheduled = schedules.iter().filter(|s| s.total_hours > 0.0).count();
        let total_labor_hours = schedules.iter().map(|s| s.total_hours).sum();

        tracing::info!(
            day = %problem.day_of_week,
            date = %problem.date,
            labor_cost = result.objective_value - dummy_worker_cost - short_shift_cost,
            employees_scheduled,
            "composed day schedule"
        );
        if dummy_worker_cost > 0.0 {
            tracing::warn!(
                penalty = dummy_worker_cost,
                periods = unfilled_periods.len(),
                "unfilled shifts penalty"
            );
        }
        if short_shift_cost > 0.0 {
            tracing::warn!(penalty = short_shift_cost, "short shift penalty");
        }

        let summary = DayScheduleSummary {
            day_of_week: problem.day_of_week,
            date: problem.date,
            total_cost: result.objective_value,
            employees_scheduled,
            total_labor_hours,
            unfilled_periods,
            dummy_worker_cost,
        };

        (schedules, summary)
    }

    /// Short-shift penalty cost for one day's solver result.
    pub fn short_shift_cost(&self, result: &SolverResult) -> f64 {
        result
            .short_shift_hours
            .iter()
            .filter(|&&hours| hours > 0.01)
            .map(|hours| hours * self.short_shift_penalty)
            .sum()
    }
}
