//! Availability Mask Builder.
//!
//! Produces the effective per-employee boolean vector for one day, with
//! every restriction expressible as "cannot work this period" already
//! applied. Filter order is fixed: raw slots, then minor restrictions, then
//! rest-between-shifts. Locks are applied later by the assembler and
//! override the mask.

use std::collections::BTreeMap;

use compliance::prefilter;
use compliance::ComplianceRules;
use shared::{time, DayOfWeek, ScheduleResult};

use crate::domain::entities::AvailabilitySlot;

/// The masked availability for one day. Only employees with at least one
/// slot on this weekday appear.
#[derive(Debug, Clone)]
pub struct DayMasks {
    pub availability: BTreeMap<String, Vec<bool>>,
    pub is_minor: BTreeMap<String, bool>,
    pub minor_curfew_period: Option<usize>,
    pub minor_earliest_period: Option<usize>,
}

pub struct MaskBuilder<'a> {
    rules: &'a ComplianceRules,
    compliance_enabled: bool,
}

impl<'a> MaskBuilder<'a> {
    pub fn new(rules: &'a ComplianceRules, compliance_enabled: bool) -> Self {
        Self {
            rules,
            compliance_enabled,
        }
    }

    pub fn build(
        &self,
        slots: &[AvailabilitySlot],
        day_of_week: DayOfWeek,
        open_minutes: u32,
        num_periods: usize,
        minor_status: &BTreeMap<String, bool>,
        previous_day_end_times: &BTreeMap<String, String>,
    ) -> ScheduleResult<DayMasks> {
        let period_starts: Vec<u32> = (0..num_periods)
            .map(|i| time::period_start_minutes(open_minutes, i))
            .collect();

        let mut availability = raw_masks(slots, day_of_week, &period_starts);

        let is_minor: BTreeMap<String, bool> = availability
            .keys()
            .map(|name| (name.clone(), minor_status.get(name).copied().unwrap_or(false)))
            .collect();

        if !self.compliance_enabled {
            return Ok(DayMasks {
                availability,
                is_minor,
                minor_curfew_period: None,
                minor_earliest_period: None,
            });
        }

        let (minor_curfew_period, minor_earliest_period) = prefilter::minor_availability_filter(
            &mut availability,
            &is_minor,
            &period_starts,
            &self.rules.minor_curfew_end,
            &self.rules.minor_earliest_start,
        )?;

        let minors_today: Vec<&String> =
            is_minor.iter().filter(|(_, &m)| m).map(|(n, _)| n).collect();
        if !minors_today.is_empty() {
            tracing::info!(?minors_today, day = %day_of_week, "minor employees on shift day");
            if let Some(curfew_period) = minor_curfew_period {
                tracing::info!(curfew_period, "minor curfew starts");
            }
        }

        let blocked = prefilter::rest_blocked_periods(
            previous_day_end_times,
            &period_starts,
            self.rules.min_rest_hours,
        )?;
        for (employee, periods) in blocked {
            if let Some(mask) = availability.get_mut(&employee) {
                for period in &periods {
                    if let Some(available) = mask.get_mut(*period) {
                        *available = false;
                    }
                }
                tracing::info!(
                    employee,
                    blocked = ?periods,
                    min_rest_hours = self.rules.min_rest_hours,
                    "rest constraint blocked periods"
                );
            }
        }

        Ok(DayMasks {
            availability,
            is_minor,
            minor_curfew_period,
            minor_earliest_period,
        })
    }
}

/// Mask from raw availability slots: a period is available iff it lies
/// entirely within some slot for the day.
fn raw_masks(
    slots: &[AvailabilitySlot],
    day_of_week: DayOfWeek,
    period_starts: &[u32],
) -> BTreeMap<String, Vec<bool>> {
    let mut masks: BTreeMap<String, Vec<bool>> = BTreeMap::new();

    for slot in slots.iter().filter(|s| s.day_of_week == day_of_week) {
        // Slots were validated before the run started.
        let (Ok(slot_start), Ok(slot_end)) = (
            time::parse_hhmm(&slot.start_time),
            time::parse_hhmm(&slot.end_time),
        ) else {
            continue;
        };

        let mask = masks
            .entry(slot.employee_name.clone())
            .or_insert_with(|| vec![false; period_starts.len()]);
        for (idx, &start) in period_starts.iter().enumerate() {
            if slot_start <= start && start + time::PERIOD_MINUTES <= slot_end {
                mask[idx] = true;
            }
        }
    }

    masks
}
