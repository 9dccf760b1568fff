//! Motor selection - resolving a torque/power requirement to a catalog motor

use std::cmp::Ordering;

use crate::core::catalog::MotorCatalog;
use crate::entities::motor::{MotorRecord, MotorSelection};

/// Upper bound for the power scan; ratings at or above it are never chosen
const POWER_SCAN_CEILING: f64 = 1.0e14;

/// Anything that can pick a motor for a joint requirement
///
/// The load engine only depends on this trait, so it can run against the CSV
/// catalog or against any fixed source (tests use stubs with known weights).
/// Implementations must be total: when nothing qualifies they return
/// [`MotorSelection::placeholder`] rather than an error.
pub trait MotorSelector {
    /// Choose the motor for `joint` given the torque (N·m) and power (W) it must supply
    fn select(&self, joint: usize, required_torque: f64, required_power: f64) -> MotorSelection;
}

/// Smallest power rating that still meets `required_power`
fn smallest_sufficient_power(records: &[MotorRecord], required_power: f64) -> Option<f64> {
    let mut max_p = POWER_SCAN_CEILING;
    for motor in records {
        if motor.power_rating_w < max_p && motor.power_rating_w >= required_power {
            max_p = motor.power_rating_w;
        }
    }
    (max_p < POWER_SCAN_CEILING).then_some(max_p)
}

/// First record with the greatest weight
fn heaviest<'a>(candidates: impl IntoIterator<Item = &'a MotorRecord>) -> Option<&'a MotorRecord> {
    candidates.into_iter().fold(None, |best, m| match best {
        Some(b) if m.weight_kg <= b.weight_kg => Some(b),
        _ => Some(m),
    })
}

/// Pick a record from `records` for the given requirement
///
/// 1. Among motors whose rating is the smallest one ≥ `required_power`,
///    take the heaviest.
/// 2. Failing that, among motors rated for at least `required_torque`,
///    take the one with the smallest `(power - required_power)`, heavier
///    first on ties.
pub fn choose(records: &[MotorRecord], required_torque: f64, required_power: f64) -> Option<&MotorRecord> {
    if let Some(max_p) = smallest_sufficient_power(records, required_power) {
        let exact = records.iter().filter(|m| m.power_rating_w == max_p);
        if let Some(best) = heaviest(exact) {
            return Some(best);
        }
    }

    let mut by_torque: Vec<&MotorRecord> = records
        .iter()
        .filter(|m| m.rated_torque_nm >= required_torque)
        .collect();

    // Stable sort keeps catalog order for full ties
    by_torque.sort_by(|a, b| {
        let da = a.power_rating_w - required_power;
        let db = b.power_rating_w - required_power;
        da.partial_cmp(&db)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.weight_kg.partial_cmp(&a.weight_kg).unwrap_or(Ordering::Equal))
    });
    by_torque.first().copied()
}

impl MotorSelector for MotorCatalog {
    fn select(&self, joint: usize, required_torque: f64, required_power: f64) -> MotorSelection {
        if let Some(reason) = self.unavailable_reason() {
            tracing::warn!(joint, %reason, "no catalog available for motor selection");
            return MotorSelection::placeholder(joint);
        }

        match choose(self.records(), required_torque, required_power) {
            Some(record) => {
                tracing::debug!(
                    joint,
                    model = %record.model_name,
                    power_w = record.power_rating_w,
                    weight_kg = record.weight_kg,
                    "selected motor"
                );
                MotorSelection::from_record(joint, record)
            }
            None => {
                tracing::warn!(
                    joint,
                    "no motor found for Motor {} with torque {:.3} N·m and power {:.3} W",
                    joint,
                    required_torque,
                    required_power
                );
                MotorSelection::placeholder(joint)
            }
        }
    }
}
