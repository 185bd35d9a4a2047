use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared::{time, ScheduleError, ScheduleResult};

/// Jurisdiction tag carrying the documented fallback rule set.
pub const DEFAULT_JURISDICTION: &str = "DEFAULT";

/// Active compliance rules for one jurisdiction. Hour fields are
/// non-negative; clock fields are `HH:MM` strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComplianceRules {
    pub jurisdiction: String,

    // Rest between shifts
    pub min_rest_hours: f64,

    // Minor restrictions
    pub minor_max_daily_hours: f64,
    pub minor_max_weekly_hours: f64,
    pub minor_curfew_end: String,
    pub minor_earliest_start: String,
    pub minor_age_threshold: u32,

    // Overtime
    pub daily_overtime_threshold: Option<f64>,
    pub weekly_overtime_threshold: f64,

    // Breaks
    pub meal_break_enabled: bool,
    pub meal_break_after_hours: f64,
    pub meal_break_duration_minutes: u32,
    pub rest_break_interval_hours: Option<f64>,
    pub rest_break_duration_minutes: u32,

    // Predictive scheduling
    pub advance_notice_days: u32,
}

impl Default for ComplianceRules {
    fn default() -> Self {
        Self {
            jurisdiction: DEFAULT_JURISDICTION.to_string(),
            min_rest_hours: 8.0,
            minor_max_daily_hours: 8.0,
            minor_max_weekly_hours: 40.0,
            minor_curfew_end: "22:00".to_string(),
            minor_earliest_start: "06:00".to_string(),
            minor_age_threshold: 18,
            daily_overtime_threshold: None,
            weekly_overtime_threshold: 40.0,
            meal_break_enabled: true,
            meal_break_after_hours: 5.0,
            meal_break_duration_minutes: 30,
            rest_break_interval_hours: Some(4.0),
            rest_break_duration_minutes: 10,
            advance_notice_days: 14,
        }
    }
}

impl ComplianceRules {
    /// Check time strings and hour ranges. Run once when a rule set enters
    /// the store; lookups hand out references afterwards.
    pub fn validate(&self) -> ScheduleResult<()> {
        time::parse_hhmm(&self.minor_curfew_end)?;
        time::parse_hhmm(&self.minor_earliest_start)?;

        let hour_fields = [
            ("min_rest_hours", self.min_rest_hours),
            ("minor_max_daily_hours", self.minor_max_daily_hours),
            ("minor_max_weekly_hours", self.minor_max_weekly_hours),
            ("weekly_overtime_threshold", self.weekly_overtime_threshold),
            ("meal_break_after_hours", self.meal_break_after_hours),
        ];
        for (name, value) in hour_fields {
            if value < 0.0 || !value.is_finite() {
                return Err(ScheduleError::InvalidInput(format!(
                    "compliance rule {name} must be a non-negative number, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("daily_overtime_threshold", self.daily_overtime_threshold),
            ("rest_break_interval_hours", self.rest_break_interval_hours),
        ] {
            if let Some(value) = value {
                if value < 0.0 || !value.is_finite() {
                    return Err(ScheduleError::InvalidInput(format!(
                        "compliance rule {name} must be a non-negative number, got {value}"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Jurisdiction-keyed rule lookup. Pure reads after construction; the
/// `DEFAULT` entry backs any unknown tag.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    rules: BTreeMap<String, ComplianceRules>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the built-in rule sets: `DEFAULT` federal fallback, plus
    /// the CA and NY demonstration presets.
    pub fn with_builtin() -> Self {
        let mut store = Self::new();

        store.insert_unchecked(ComplianceRules::default());
        store.insert_unchecked(ComplianceRules {
            jurisdiction: "CA".to_string(),
            min_rest_hours: 10.0,
            daily_overtime_threshold: Some(8.0),
            ..ComplianceRules::default()
        });
        store.insert_unchecked(ComplianceRules {
            jurisdiction: "NY".to_string(),
            minor_curfew_end: "22:00".to_string(),
            rest_break_interval_hours: None,
            ..ComplianceRules::default()
        });

        store
    }

    /// Add or replace a rule set after validating it.
    pub fn insert(&mut self, rules: ComplianceRules) -> ScheduleResult<()> {
        rules.validate()?;
        self.insert_unchecked(rules);
        Ok(())
    }

    fn insert_unchecked(&mut self, rules: ComplianceRules) {
        self.rules.insert(rules.jurisdiction.clone(), rules);
    }

    /// Rules for `jurisdiction`, falling back to `DEFAULT`, falling back to
    /// the built-in federal defaults.
    pub fn lookup(&self, jurisdiction: &str) -> ComplianceRules {
        if let Some(rules) = self.rules.get(jurisdiction) {
            return rules.clone();
        }
        if let Some(rules) = self.rules.get(DEFAULT_JURISDICTION) {
            tracing::debug!(jurisdiction, "no rules for jurisdiction, using DEFAULT");
            return rules.clone();
        }
        ComplianceRules::default()
    }
}
