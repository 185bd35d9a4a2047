//! The schedule generation pipeline: a sequential pass over the date range,
//! one solver call per day, with previous-day end times feeding the next
//! day's rest filter and a compliance pass over the composed week.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use compliance::{
    ComplianceContext, ComplianceEngine, ComplianceMode, EmployeeProfile, RuleStore, ShiftInfo,
    ValidatorToggles,
};
use shared::{time, DayOfWeek, ScheduleError, ScheduleResult};
use uuid::Uuid;

use super::assembler::ProblemAssembler;
use super::availability::MaskBuilder;
use super::composer::DayComposer;
use crate::domain::entities::{
    AvailabilitySlot, Employee, LockedAssignment, StaffingRequirement, Store,
};
use crate::domain::schedule::{DayScheduleSummary, EmployeeDaySchedule, WeeklyResult};
use crate::domain::solver::{
    create_backend, SolverBackend, SolverConfig, SolverKind, SolverStatus,
};

/// Immutable inputs loaded from the external collaborators before a run.
#[derive(Debug, Clone)]
pub struct ScheduleInputs {
    pub store: Store,
    pub employees: Vec<Employee>,
    pub availability: Vec<AvailabilitySlot>,
    pub rule_store: RuleStore,
}

/// Compliance switches for one run.
#[derive(Debug, Clone)]
pub struct ComplianceOptions {
    pub mode: ComplianceMode,
    pub toggles: ValidatorToggles,
    /// Apply the minor and rest pre-filters to the solver input.
    pub enable_prefilter: bool,
}

impl Default for ComplianceOptions {
    fn default() -> Self {
        Self {
            mode: ComplianceMode::Warn,
            toggles: ValidatorToggles::default(),
            enable_prefilter: true,
        }
    }
}

/// A shift worked on the day before the range, used to seed the rest filter
/// and the rest validator when continuing a prior schedule.
#[derive(Debug, Clone)]
pub struct PreviousShift {
    pub employee_name: String,
    pub date: NaiveDate,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    pub total_hours: f64,
}

/// Caller-supplied parameters for one run.
#[derive(Debug, Clone)]
pub struct RunParameters {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub locked_shifts: Vec<LockedAssignment>,
    pub staffing_overrides: Option<Vec<StaffingRequirement>>,
    pub solver: SolverKind,
    pub compliance: ComplianceOptions,
    /// When the schedule was (or will be) published; defaults to today.
    pub published_at: Option<NaiveDate>,
    pub previous_day_shifts: Vec<PreviousShift>,
}

impl RunParameters {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            locked_shifts: Vec::new(),
            staffing_overrides: None,
            solver: SolverKind::Microlp,
            compliance: ComplianceOptions::default(),
            published_at: None,
            previous_day_shifts: Vec::new(),
        }
    }
}

pub struct SchedulePipeline {
    inputs: ScheduleInputs,
    solver_config: SolverConfig,
    default_min_staff: u32,
    /// Directory for LP/IIS dumps; disabled when unset.
    model_dump_dir: Option<PathBuf>,
    engine: ComplianceEngine,
}

impl SchedulePipeline {
    pub fn new(inputs: ScheduleInputs, solver_config: SolverConfig) -> Self {
        Self {
            inputs,
            solver_config,
            default_min_staff: 2,
            model_dump_dir: None,
            engine: ComplianceEngine::new(),
        }
    }

    pub fn with_default_min_staff(mut self, default_min_staff: u32) -> Self {
        self.default_min_staff = default_min_staff;
        self
    }

    pub fn with_model_dump_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.model_dump_dir = dir;
        self
    }

    /// Generate the schedule with the backend selected in the parameters.
    pub fn generate(&self, params: &RunParameters) -> ScheduleResult<WeeklyResult> {
        let mut backend = create_backend(params.solver)?;
        self.generate_with_backend(params, backend.as_mut())
    }

    /// Generate the schedule with a caller-supplied backend.
    pub fn generate_with_backend(
        &self,
        params: &RunParameters,
        backend: &mut dyn SolverBackend,
    ) -> ScheduleResult<WeeklyResult> {
        self.validate_inputs(params)?;

        let run_id = Uuid::new_v4();
        let store = &self.inputs.store;
        let rules = self.inputs.rule_store.lookup(&store.jurisdiction);
        rules.validate()?;

        // The solver's meal-break behavior follows the jurisdiction rules.
        let mut solver_config = self.solver_config.clone();
        solver_config.meal_break_enabled = rules.meal_break_enabled;
        solver_config.meal_break_threshold_hours = rules.meal_break_after_hours;
        solver_config.meal_break_duration_periods =
            (rules.meal_break_duration_minutes / time::PERIOD_MINUTES).max(1);

        tracing::info!(
            %run_id,
            store = %store.store_name,
            jurisdiction = %store.jurisdiction,
            backend = backend.name(),
            start = %params.start_date,
            end = %params.end_date,
            "starting schedule generation"
        );

        let minor_status: BTreeMap<String, bool> = self
            .inputs
            .employees
            .iter()
            .map(|e| {
                (
                    e.name.clone(),
                    e.is_minor_on(params.start_date, rules.minor_age_threshold),
                )
            })
            .collect();

        let mask_builder = MaskBuilder::new(&rules, params.compliance.enable_prefilter);
        let assembler = ProblemAssembler::new(self.default_min_staff);
        let composer = DayComposer::new(
            solver_config.min_shift_hours,
            solver_config.dummy_worker_cost,
            solver_config.short_shift_penalty,
        );

        let mut previous_day_end_times: BTreeMap<String, String> = params
            .previous_day_shifts
            .iter()
            .filter(|s| s.total_hours > 0.0)
            .map(|s| (s.employee_name.clone(), s.end_time.clone()))
            .collect();

        let mut all_schedules: Vec<EmployeeDaySchedule> = Vec::new();
        let mut daily_summaries: Vec<DayScheduleSummary> = Vec::new();
        let mut total_weekly_cost = 0.0;
        let mut total_dummy_cost = 0.0;
        let mut total_short_shift_cost = 0.0;
        let mut status = SolverStatus::Optimal;

        let mut current_date = params.start_date;
        while current_date <= params.end_date {
            let day_of_week = DayOfWeek::from_date(current_date);
            let Some(store_day) = store.day(day_of_week) else {
                tracing::debug!(%current_date, %day_of_week, "no store hours; skipping day");
                current_date = next_date(current_date)?;
                continue;
            };

            let open_minutes = store_day.open_minutes()?;
            let num_periods = store_day.num_periods()?;

            let masks = mask_builder.build(
                &self.inputs.availability,
                day_of_week,
                open_minutes,
                num_periods,
                &minor_status,
                &previous_day_end_times,
            )?;

            let requirements = params
                .staffing_overrides
                .as_deref()
                .unwrap_or(&store.staffing_requirements);
            let problem = assembler.assemble(
                current_date,
                day_of_week,
                open_minutes,
                num_periods,
                &masks,
                &self.inputs.employees,
                &params.locked_shifts,
                requirements,
            )?;

            let result = backend.solve(&problem, &solver_config);

            if let Some(dir) = &self.model_dump_dir {
                let path = dir.join(format!("scheduler_{current_date}.lp"));
                if let Err(error) = backend.write_model(&path) {
                    tracing::warn!(%error, "failed to write model dump");
                }
            }

            match result.status {
                SolverStatus::Infeasible => {
                    tracing::error!(%current_date, "model infeasible; computing IIS");
                    let diagnostic = self.model_dump_dir.as_ref().and_then(|dir| {
                        let path = dir.join(format!("infeasible_{current_date}.ilp"));
                        backend
                            .compute_iis(&path)
                            .map(|_| path.display().to_string())
                            .ok()
                    });
                    return Err(ScheduleError::Infeasible {
                        date: current_date,
                        diagnostic,
                    });
                }
                SolverStatus::Error => {
                    return Err(ScheduleError::Solver(format!(
                        "solver failed for {day_of_week} {current_date}"
                    )));
                }
                SolverStatus::Suboptimal => status = SolverStatus::Suboptimal,
                SolverStatus::Optimal => {}
            }

            let (day_schedules, day_summary) = composer.compose(&problem, &result);

            previous_day_end_times = day_schedules
                .iter()
                .filter(|s| s.total_hours > 0.0)
                .filter_map(|s| {
                    s.shift_end
                        .as_ref()
                        .map(|end| (s.employee_name.clone(), end.clone()))
                })
                .collect();

            total_weekly_cost += result.objective_value;
            total_dummy_cost += day_summary.dummy_worker_cost;
            total_short_shift_cost += composer.short_shift_cost(&result);
            all_schedules.extend(day_schedules);
            daily_summaries.push(day_summary);

            current_date = next_date(current_date)?;
        }

        let report = self.engine.validate(&self.build_compliance_context(
            params,
            &rules,
            &minor_status,
            &all_schedules,
        ))?;

        if !report.is_compliant {
            tracing::warn!(
                errors = report.error_count(),
                "schedule violates blocking compliance rules"
            );
        }

        let has_warnings = total_dummy_cost > 0.0 || total_short_shift_cost > 0.0;
        let is_compliant = report.is_compliant;

        Ok(WeeklyResult {
            start_date: params.start_date,
            end_date: params.end_date,
            store_name: store.store_name.clone(),
            generated_at: Utc::now(),
            schedules: all_schedules,
            daily_summaries,
            total_weekly_cost,
            status,
            total_dummy_worker_cost: total_dummy_cost,
            total_short_shift_penalty: total_short_shift_cost,
            has_warnings,
            compliance_violations: report.violations,
            is_compliant,
            employee_weekly_hours: report.employee_weekly_hours,
            overtime_hours: report.overtime_hours,
        })
    }

    fn build_compliance_context(
        &self,
        params: &RunParameters,
        rules: &compliance::ComplianceRules,
        minor_status: &BTreeMap<String, bool>,
        schedules: &[EmployeeDaySchedule],
    ) -> ComplianceContext {
        let employees: BTreeMap<String, EmployeeProfile> = self
            .inputs
            .employees
            .iter()
            .map(|e| {
                (
                    e.name.clone(),
                    EmployeeProfile {
                        name: e.name.clone(),
                        date_of_birth: e.date_of_birth,
                        is_minor: minor_status.get(&e.name).copied().unwrap_or(false),
                        hourly_rate: e.hourly_rate,
                    },
                )
            })
            .collect();

        let shifts: Vec<ShiftInfo> = schedules
            .iter()
            .filter(|s| s.total_hours > 0.0)
            .filter_map(|s| {
                let (start, end) = (s.shift_start.clone()?, s.shift_end.clone()?);
                Some(ShiftInfo {
                    employee_name: s.employee_name.clone(),
                    date: s.date,
                    day_of_week: s.day_of_week,
                    start_time: start,
                    end_time: end,
                    total_hours: s.total_hours,
                    periods: s.scheduled_periods(),
                })
            })
            .collect();

        let previous_day_shifts: Vec<ShiftInfo> = params
            .previous_day_shifts
            .iter()
            .filter(|s| s.total_hours > 0.0)
            .map(|s| ShiftInfo {
                employee_name: s.employee_name.clone(),
                date: s.date,
                day_of_week: DayOfWeek::from_date(s.date),
                start_time: s.start_time.clone(),
                end_time: s.end_time.clone(),
                total_hours: s.total_hours,
                periods: Vec::new(),
            })
            .collect();

        ComplianceContext {
            rules: rules.clone(),
            employees,
            shifts,
            previous_day_shifts,
            schedule_start_date: Some(params.start_date),
            published_at: params.published_at.or_else(|| Some(Utc::now().date_naive())),
            toggles: params.compliance.toggles,
            mode: params.compliance.mode,
        }
    }

    fn validate_inputs(&self, params: &RunParameters) -> ScheduleResult<()> {
        if params.end_date < params.start_date {
            return Err(ScheduleError::InvalidInput(format!(
                "end date {} is before start date {}",
                params.end_date, params.start_date
            )));
        }

        self.inputs.store.validate()?;

        let mut names: BTreeSet<&str> = BTreeSet::new();
        for employee in &self.inputs.employees {
            employee.validate()?;
            if !names.insert(employee.name.as_str()) {
                return Err(ScheduleError::InvalidInput(format!(
                    "duplicate employee name {:?}",
                    employee.name
                )));
            }
        }

        for slot in &self.inputs.availability {
            slot.validate()?;
            if !names.contains(slot.employee_name.as_str()) {
                return Err(ScheduleError::InvalidInput(format!(
                    "availability slot references unknown employee {:?}",
                    slot.employee_name
                )));
            }
        }

        if let Some(overrides) = &params.staffing_overrides {
            crate::domain::entities::store::validate_no_overlap(overrides)?;
        }

        for lock in &params.locked_shifts {
            if !names.contains(lock.employee_name.as_str()) {
                return Err(ScheduleError::InvalidInput(format!(
                    "locked shift references unknown employee {:?}",
                    lock.employee_name
                )));
            }
        }

        for shift in &params.previous_day_shifts {
            time::parse_hhmm(&shift.start_time)?;
            time::parse_hhmm(&shift.end_time)?;
        }

        Ok(())
    }
}

fn next_date(date: NaiveDate) -> ScheduleResult<NaiveDate> {
    date.succ_opt()
        .ok_or_else(|| ScheduleError::InvalidInput(format!("date out of range: {date}")))
}
