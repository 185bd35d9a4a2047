//! CPLEX-LP rendering of the day model, used by the backends' debugging
//! operations. The rendered rows mirror `formulation::build_model`
//! one-for-one; employee names are replaced by indices (the legend is in
//! the header comment).

use std::fmt::Write;

use super::types::{ScheduleProblem, SolverConfig};

pub(crate) fn render_lp(problem: &ScheduleProblem, config: &SolverConfig) -> String {
    let employees = problem.employees.len();
    let periods = problem.num_periods;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "\\ shift_schedule {} ({})",
        problem.date, problem.day_of_week
    );
    for (e, name) in problem.employees.iter().enumerate() {
        let _ = writeln!(out, "\\ employee {e}: {name}");
    }

    out.push_str("Minimize\n obj:");
    for e in 0..employees {
        for t in 0..periods {
            let _ = write!(out, " + {} s_{e}_{t}", problem.hourly_rates[e]);
        }
    }
    for t in 0..periods {
        let _ = write!(out, " + {} dummy_{t}", config.dummy_worker_cost);
    }
    for e in 0..employees {
        let _ = write!(out, " + {} short_{e}", config.short_shift_penalty);
    }
    out.push('\n');

    out.push_str("Subject To\n");
    let maximum_periods = config.maximum_periods();
    for e in 0..employees {
        let _ = write!(out, " max_daily_hours_for_{e}:");
        for t in 0..periods {
            let _ = write!(out, " + s_{e}_{t}");
        }
        let _ = writeln!(out, " <= {maximum_periods}");
    }

    for t in 1..periods {
        let _ = write!(out, " min_workers_period_{t}:");
        for e in 0..employees {
            let _ = write!(out, " + s_{e}_{t}");
            if config.meal_break_enabled {
                let _ = write!(out, " - brk_{e}_{t}");
            }
        }
        let _ = writeln!(out, " + dummy_{t} >= {}", problem.minimum_workers[t]);
    }

    for e in 0..employees {
        for t in 0..periods {
            if t > 0 {
                let prev = t - 1;
                let _ = writeln!(
                    out,
                    " shift_change_{e}_{t}: w_{e}_{t} - s_{e}_{t} + s_{e}_{prev} = 0"
                );
                let _ = writeln!(out, " shift_start_lb_{e}_{t}: v_{e}_{t} - w_{e}_{t} >= 0");
                let _ = writeln!(
                    out,
                    " shift_start_ub1_{e}_{t}: v_{e}_{t} - w_{e}_{t} + 2 z_{e}_{t} <= 2"
                );
                let _ = writeln!(out, " shift_start_ub2_{e}_{t}: v_{e}_{t} - 2 z_{e}_{t} <= 0");
            } else {
                let _ = writeln!(out, " shift_change_init_{e}: w_{e}_0 - s_{e}_0 = 0");
                let _ = writeln!(out, " shift_start_init_{e}: v_{e}_0 - s_{e}_0 = 0");
            }
        }
    }

    for e in 0..employees {
        let _ = write!(out, " shift_start_max_{e}:");
        for t in 0..periods {
            let _ = write!(out, " + v_{e}_{t}");
        }
        out.push_str(" <= 1\n");
    }

    let min_shift_hours = config.min_shift_periods() as f64 * 0.5;
    for e in 0..employees {
        let _ = write!(out, " works_upper_{e}:");
        for t in 0..periods {
            let _ = write!(out, " + s_{e}_{t}");
        }
        let _ = writeln!(out, " - {periods} works_{e} <= 0");

        let _ = write!(out, " works_lower_{e}:");
        for t in 0..periods {
            let _ = write!(out, " + s_{e}_{t}");
        }
        let _ = writeln!(out, " - works_{e} >= 0");

        let _ = write!(out, " short_shift_penalty_{e}: short_{e} - {min_shift_hours} works_{e}");
        for t in 0..periods {
            let _ = write!(out, " + 0.5 s_{e}_{t}");
        }
        out.push_str(" >= 0\n");
    }

    for e in 0..employees {
        for t in 0..periods {
            if problem.locked_periods.contains(&(e, t)) {
                let _ = writeln!(out, " locked_{e}_{t}: s_{e}_{t} = 1");
            } else if !problem.availability[e][t] {
                let _ = writeln!(out, " availability_constraint_for_{e}_{t}: s_{e}_{t} = 0");
            }
        }
    }

    if config.meal_break_enabled {
        let threshold = config.meal_break_threshold_periods();
        let duration = config.meal_break_duration_periods;
        for e in 0..employees {
            let _ = write!(out, " needs_break_upper_{e}:");
            for t in 0..periods {
                let _ = write!(out, " + s_{e}_{t}");
            }
            let _ = writeln!(out, " - {periods} needs_break_{e} <= {threshold}");

            let _ = write!(out, " needs_break_lower_{e}:");
            for t in 0..periods {
                let _ = write!(out, " + s_{e}_{t}");
            }
            let _ = writeln!(
                out,
                " - {periods} needs_break_{e} >= {}",
                threshold as i64 + 1 - periods as i64
            );

            for t in 0..periods {
                let _ = writeln!(
                    out,
                    " break_requires_scheduled_{e}_{t}: brk_{e}_{t} - s_{e}_{t} <= 0"
                );
            }

            let _ = write!(out, " min_break_periods_{e}:");
            for t in 0..periods {
                let _ = write!(out, " + brk_{e}_{t}");
            }
            let _ = writeln!(out, " - {duration} needs_break_{e} >= 0");

            for t in 0..periods {
                if t > 0 && t + 1 < periods {
                    let (prev, next) = (t - 1, t + 1);
                    let _ = writeln!(
                        out,
                        " break_not_first_{e}_{t}: brk_{e}_{t} - s_{e}_{prev} <= 0"
                    );
                    let _ = writeln!(
                        out,
                        " break_not_last_{e}_{t}: brk_{e}_{t} - s_{e}_{next} <= 0"
                    );
                } else {
                    let _ = writeln!(out, " no_break_boundary_{e}_{t}: brk_{e}_{t} = 0");
                }
            }
        }
    }

    out.push_str("Bounds\n");
    for e in 0..employees {
        for t in 0..periods {
            let _ = writeln!(out, " -1 <= w_{e}_{t} <= 1");
        }
    }
    for t in 0..periods {
        let _ = writeln!(out, " 0 <= dummy_{t} <= 20");
    }

    out.push_str("Generals\n");
    for t in 0..periods {
        let _ = writeln!(out, " dummy_{t}");
    }

    out.push_str("Binaries\n");
    for e in 0..employees {
        for t in 0..periods {
            let _ = write!(out, " s_{e}_{t} z_{e}_{t}");
            if config.meal_break_enabled {
                let _ = write!(out, " brk_{e}_{t}");
            }
            out.push('\n');
        }
        let _ = write!(out, " works_{e}");
        if config.meal_break_enabled {
            let _ = write!(out, " needs_break_{e}");
        }
        out.push('\n');
    }

    out.push_str("End\n");
    out
}
