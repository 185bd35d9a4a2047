//! Shared MILP formulation for the daily scheduling problem.
//!
//! All backends solve the same model: binary assignment variables with a
//! single-contiguous-shift linearization, integer dummy workers for
//! understaffed periods, linear short-shift penalties, and optional interior
//! meal breaks. Backends differ only in the concrete solver they hand the
//! model to and in cost scaling.

use std::time::Duration;

use good_lp::{constraint, variable, variables, Constraint, Expression, ProblemVariables, Solution, Variable};

use super::types::{ScheduleProblem, SolverConfig, SolverResult, SolverStatus};

/// Big-M for the `shift_start = max(shift_change, 0)` linearization.
/// `shift_change` is bounded in `[-1, 1]`, so 2 suffices.
const BIG_M: f64 = 2.0;

/// Upper bound on dummy workers per period.
const MAX_DUMMY_WORKERS: f64 = 20.0;

/// Handles to the decision variables, used to read the solution back.
pub(crate) struct ModelVars {
    /// `s[e][t]`: employee `e` scheduled in period `t`.
    pub scheduled: Vec<Vec<Variable>>,
    /// `d[t]`: unfilled-slot workers in period `t`.
    pub dummy: Vec<Variable>,
    /// `short[e]`: short-shift penalty hours.
    pub short_shift: Vec<Variable>,
    /// `brk[e][t]`: employee on meal break; absent when breaks are disabled.
    pub on_break: Option<Vec<Vec<Variable>>>,
}

pub(crate) struct ShiftModel {
    pub variables: ProblemVariables,
    pub objective: Expression,
    pub constraints: Vec<Constraint>,
    pub vars: ModelVars,
}

/// Build the day model. `cost_scale > 1` rounds every cost coefficient to an
/// integer multiple of `1 / cost_scale`; the objective reported back to the
/// caller is always in unscaled currency.
pub(crate) fn build_model(
    problem: &ScheduleProblem,
    config: &SolverConfig,
    cost_scale: f64,
) -> ShiftModel {
    let employees = problem.employees.len();
    let periods = problem.num_periods;

    let scale = |cost: f64| {
        if cost_scale > 1.0 {
            (cost * cost_scale).round()
        } else {
            cost
        }
    };

    let mut vars = variables!();

    let scheduled: Vec<Vec<Variable>> = (0..employees)
        .map(|_| (0..periods).map(|_| vars.add(variable().binary())).collect())
        .collect();
    let shift_change: Vec<Vec<Variable>> = (0..employees)
        .map(|_| (0..periods).map(|_| vars.add(variable().clamp(-1.0, 1.0))).collect())
        .collect();
    let shift_start: Vec<Vec<Variable>> = (0..employees)
        .map(|_| (0..periods).map(|_| vars.add(variable().min(0.0))).collect())
        .collect();
    let start_indicator: Vec<Vec<Variable>> = (0..employees)
        .map(|_| (0..periods).map(|_| vars.add(variable().binary())).collect())
        .collect();
    let works: Vec<Variable> = (0..employees).map(|_| vars.add(variable().binary())).collect();
    let dummy: Vec<Variable> = (0..periods)
        .map(|_| vars.add(variable().integer().min(0.0).max(MAX_DUMMY_WORKERS)))
        .collect();
    let short_shift: Vec<Variable> =
        (0..employees).map(|_| vars.add(variable().min(0.0))).collect();

    let on_break: Option<Vec<Vec<Variable>>> = config.meal_break_enabled.then(|| {
        (0..employees)
            .map(|_| (0..periods).map(|_| vars.add(variable().binary())).collect())
            .collect()
    });
    let needs_break: Option<Vec<Variable>> = config
        .meal_break_enabled
        .then(|| (0..employees).map(|_| vars.add(variable().binary())).collect());

    // Objective: wages + unfilled-slot penalties + short-shift penalties.
    let mut objective = Expression::from(0.0);
    for e in 0..employees {
        let rate = scale(problem.hourly_rates[e]);
        for t in 0..periods {
            objective += rate * scheduled[e][t];
        }
    }
    for t in 0..periods {
        objective += scale(config.dummy_worker_cost) * dummy[t];
    }
    for e in 0..employees {
        objective += scale(config.short_shift_penalty) * short_shift[e];
    }

    let mut constraints: Vec<Constraint> = Vec::new();

    // Maximum daily hours per employee.
    let maximum_periods = config.maximum_periods() as f64;
    for e in 0..employees {
        let total: Expression = scheduled[e].iter().sum();
        constraints.push(constraint!(total <= maximum_periods));
    }

    // Minimum workers per period, skipping the open-prep period 0. Workers
    // on break do not count toward the floor.
    for t in 1..periods {
        let mut staffed = Expression::from(0.0);
        for e in 0..employees {
            staffed = staffed + scheduled[e][t];
            if let Some(on_break) = &on_break {
                staffed = staffed - on_break[e][t];
            }
        }
        staffed = staffed + dummy[t];
        constraints.push(constraint!(staffed >= problem.minimum_workers[t] as f64));
    }

    // Shift change tracking: change[e][t] = s[e][t] - s[e][t-1], with
    // s[e][-1] = 0.
    for e in 0..employees {
        for t in 0..periods {
            if t > 0 {
                constraints.push(constraint!(
                    shift_change[e][t] == scheduled[e][t] - scheduled[e][t - 1]
                ));
            } else {
                constraints.push(constraint!(shift_change[e][t] == scheduled[e][t]));
            }
        }
    }

    // Big-M linearization of shift_start = max(shift_change, 0):
    //   start >= change
    //   start <= change + M * (1 - z)
    //   start <= M * z
    for e in 0..employees {
        for t in 0..periods {
            if t > 0 {
                constraints.push(constraint!(shift_start[e][t] >= shift_change[e][t]));
                constraints.push(constraint!(
                    shift_start[e][t]
                        <= shift_change[e][t] + BIG_M - BIG_M * start_indicator[e][t]
                ));
                constraints.push(constraint!(
                    shift_start[e][t] <= BIG_M * start_indicator[e][t]
                ));
            } else {
                constraints.push(constraint!(shift_start[e][t] == scheduled[e][t]));
            }
        }
    }

    // At most one shift start per employee per day; with the availability
    // structure this forces a single contiguous block.
    for e in 0..employees {
        let starts: Expression = shift_start[e].iter().sum();
        constraints.push(constraint!(starts <= 1.0));
    }

    // Works indicator and short-shift penalty:
    //   short[e] >= min_shift_hours * works[e] - scheduled_hours[e]
    let min_shift_hours = config.min_shift_periods() as f64 * 0.5;
    for e in 0..employees {
        let total: Expression = scheduled[e].iter().sum();
        constraints.push(constraint!(total.clone() <= (periods as f64) * works[e]));
        constraints.push(constraint!(total.clone() >= works[e]));
        constraints.push(constraint!(
            short_shift[e] >= min_shift_hours * works[e] - total * 0.5
        ));
    }

    // Availability and locked periods. A lock forces the assignment on and
    // overrides the mask.
    for e in 0..employees {
        for t in 0..periods {
            if problem.locked_periods.contains(&(e, t)) {
                constraints.push(constraint!(scheduled[e][t] == 1.0));
            } else if !problem.availability[e][t] {
                constraints.push(constraint!(scheduled[e][t] == 0.0));
            }
        }
    }

    // Meal breaks: triggered by shifts longer than the threshold, must be
    // scheduled periods interior to the shift.
    if let (Some(on_break), Some(needs_break)) = (&on_break, &needs_break) {
        let threshold = config.meal_break_threshold_periods() as f64;
        let duration = f64::from(config.meal_break_duration_periods);
        let t_count = periods as f64;

        for e in 0..employees {
            let total: Expression = scheduled[e].iter().sum();
            constraints.push(constraint!(
                total.clone() - threshold <= t_count * needs_break[e]
            ));
            constraints.push(constraint!(
                total - threshold >= t_count * needs_break[e] + (1.0 - t_count)
            ));

            for t in 0..periods {
                constraints.push(constraint!(on_break[e][t] <= scheduled[e][t]));
            }

            let break_total: Expression = on_break[e].iter().sum();
            constraints.push(constraint!(break_total >= duration * needs_break[e]));

            for t in 0..periods {
                if t > 0 && t + 1 < periods {
                    constraints.push(constraint!(on_break[e][t] <= scheduled[e][t - 1]));
                    constraints.push(constraint!(on_break[e][t] <= scheduled[e][t + 1]));
                } else {
                    constraints.push(constraint!(on_break[e][t] == 0.0));
                }
            }
        }
    }

    ShiftModel {
        variables: vars,
        objective,
        constraints,
        vars: ModelVars {
            scheduled,
            dummy,
            short_shift,
            on_break,
        },
    }
}

/// Read a solution back into a [`SolverResult`]. The objective is recomputed
/// from the unscaled costs, which also de-scales integer-cost backends.
pub(crate) fn extract_result<S: Solution>(
    problem: &ScheduleProblem,
    config: &SolverConfig,
    vars: &ModelVars,
    solution: &S,
    status: SolverStatus,
    solve_time: Duration,
) -> SolverResult {
    let employees = problem.employees.len();
    let periods = problem.num_periods;

    let schedule_matrix: Vec<Vec<bool>> = (0..employees)
        .map(|e| (0..periods).map(|t| solution.value(vars.scheduled[e][t]) > 0.5).collect())
        .collect();

    let dummy_values: Vec<f64> = (0..periods).map(|t| solution.value(vars.dummy[t])).collect();

    let short_shift_hours: Vec<f64> = (0..employees)
        .map(|e| solution.value(vars.short_shift[e]).max(0.0))
        .collect();

    let break_periods: Vec<Vec<usize>> = match &vars.on_break {
        Some(on_break) => (0..employees)
            .map(|e| {
                (0..periods)
                    .filter(|&t| solution.value(on_break[e][t]) > 0.5)
                    .collect()
            })
            .collect(),
        None => vec![Vec::new(); employees],
    };

    let mut objective_value = 0.0;
    for e in 0..employees {
        let worked = schedule_matrix[e].iter().filter(|&&s| s).count() as f64;
        objective_value += problem.hourly_rates[e] * worked;
        objective_value += config.short_shift_penalty * short_shift_hours[e];
    }
    for t in 0..periods {
        objective_value += config.dummy_worker_cost * dummy_values[t].round();
    }

    SolverResult {
        status,
        objective_value,
        schedule_matrix,
        dummy_values,
        short_shift_hours,
        break_periods,
        solve_time,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;
    use shared::DayOfWeek;

    use super::*;

    fn tiny_problem() -> ScheduleProblem {
        ScheduleProblem {
            date: NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
            day_of_week: DayOfWeek::Monday,
            employees: vec!["Alex".to_string(), "Blake".to_string()],
            num_periods: 6,
            open_minutes: 480,
            availability: vec![vec![true; 6], vec![true; 6]],
            hourly_rates: vec![10.0, 12.0],
            minimum_workers: vec![1; 6],
            locked_periods: BTreeSet::new(),
            employee_is_minor: vec![false, false],
            minor_curfew_period: None,
            minor_earliest_period: None,
        }
    }

    #[test]
    fn test_break_variables_follow_config() {
        let problem = tiny_problem();

        let with_breaks = build_model(&problem, &SolverConfig::default(), 1.0);
        assert!(with_breaks.vars.on_break.is_some());

        let config = SolverConfig {
            meal_break_enabled: false,
            ..SolverConfig::default()
        };
        let without_breaks = build_model(&problem, &config, 1.0);
        assert!(without_breaks.vars.on_break.is_none());
    }

    #[test]
    fn test_constraint_count_scales_with_grid() {
        let problem = tiny_problem();
        let config = SolverConfig {
            meal_break_enabled: false,
            ..SolverConfig::default()
        };
        let model = build_model(&problem, &config, 1.0);

        // Per employee: 1 max-hours + 6 change + (1 + 5*3) start + 1
        // one-start + 3 works/short = 27; plus 5 staffing floors.
        assert_eq!(model.constraints.len(), 2 * 27 + 5);
    }
}
