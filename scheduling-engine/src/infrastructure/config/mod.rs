use std::path::PathBuf;
use std::time::Duration;

use compliance::{ComplianceMode, ValidatorToggles};
use config::{Config, ConfigError, File};
use serde::Deserialize;
use shared::ScheduleResult;

use crate::domain::services::ComplianceOptions;
use crate::domain::solver::{SolverConfig, SolverKind};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub solver: SolverSettings,
    pub compliance: ComplianceSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SolverSettings {
    pub backend: String,
    pub time_limit_seconds: Option<u64>,
    pub dummy_worker_cost: f64,
    pub short_shift_penalty: f64,
    pub min_shift_hours: f64,
    pub max_daily_hours: f64,
    pub default_min_staff: u32,
    /// Directory for LP/IIS debug dumps; disabled when unset.
    pub model_dump_dir: Option<PathBuf>,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            backend: "microlp".to_string(),
            time_limit_seconds: None,
            dummy_worker_cost: 100.0,
            short_shift_penalty: 50.0,
            min_shift_hours: 3.0,
            max_daily_hours: 11.0,
            default_min_staff: 2,
            model_dump_dir: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ComplianceSettings {
    pub mode: String,
    pub enable_availability_filter: bool,
    pub enable_minor_restrictions: bool,
    pub enable_rest_between_shifts: bool,
    pub enable_overtime_tracking: bool,
    pub enable_break_compliance: bool,
    pub enable_predictive_scheduling: bool,
}

impl Default for ComplianceSettings {
    fn default() -> Self {
        Self {
            mode: "warn".to_string(),
            enable_availability_filter: true,
            enable_minor_restrictions: true,
            enable_rest_between_shifts: true,
            enable_overtime_tracking: true,
            enable_break_compliance: true,
            enable_predictive_scheduling: true,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

impl SolverSettings {
    pub fn backend_kind(&self) -> ScheduleResult<SolverKind> {
        self.backend.parse()
    }

    pub fn to_solver_config(&self) -> SolverConfig {
        SolverConfig {
            dummy_worker_cost: self.dummy_worker_cost,
            short_shift_penalty: self.short_shift_penalty,
            min_shift_hours: self.min_shift_hours,
            max_daily_hours: self.max_daily_hours,
            time_limit: self.time_limit_seconds.map(Duration::from_secs),
            ..SolverConfig::default()
        }
    }
}

impl ComplianceSettings {
    pub fn to_options(&self) -> ScheduleResult<ComplianceOptions> {
        Ok(ComplianceOptions {
            mode: self.mode.parse::<ComplianceMode>()?,
            toggles: ValidatorToggles {
                minor_restrictions: self.enable_minor_restrictions,
                rest_between_shifts: self.enable_rest_between_shifts,
                overtime_tracking: self.enable_overtime_tracking,
                break_compliance: self.enable_break_compliance,
                predictive_scheduling: self.enable_predictive_scheduling,
            },
            enable_prefilter: self.enable_availability_filter,
        })
    }
}
