//! Static load propagation - per-joint torque, power and motor selection
//!
//! The arm is held fully extended and horizontal, which is the worst static
//! case for every joint. Each joint carries the payload, every link from its
//! own outward, and every motor strictly outward of it. Motor weights are not
//! inputs: they come from the motor selected for the outer joint moments
//! earlier in the same pass. That makes the calculation a chain from the
//! wrist (joint 6) to the base (joint 1):
//!
//! ```text
//! joint 6 ─► select motor 6 ─► joint 5 ─► select motor 5 ─► … ─► joint 1
//! ```
//!
//! The chain runs twice, once without and once with each joint's safety
//! factor. The two passes never share selections: a joint's SF load uses the
//! motors chosen for the SF loads of the outer joints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::selector::MotorSelector;
use crate::core::units::{cylinder_weight, shaft_power, GRAVITY};
use crate::entities::arm::{ArmSpec, BaseJointPolicy, JOINT_COUNT};
use crate::entities::motor::MotorSelection;

/// Which pass a load or selection belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Loads as computed
    Normal,
    /// Loads scaled by the joint's safety factor
    SafetyFactor,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Normal => write!(f, "normal"),
            Variant::SafetyFactor => write!(f, "safety_factor"),
        }
    }
}

/// Unscaled torque about a joint, split by source (N·m)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TorqueBreakdown {
    pub payload: f64,
    pub links: f64,
    pub motors: f64,
}

impl TorqueBreakdown {
    pub fn total(&self) -> f64 {
        self.payload + self.links + self.motors
    }
}

/// Torque and power requirement of one joint in one variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointLoad {
    /// Torque at the joint output (N·m)
    pub total_torque: f64,
    /// Torque at the motor shaft, before the gearbox (N·m)
    pub torque_before_reduction: f64,
    /// Shaft power (W)
    pub power: f64,
    /// Sources of the torque, before any safety factor
    pub breakdown: TorqueBreakdown,
}

/// Everything computed for one joint in one pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointResult {
    /// Joint number, 1 (base) to 6 (wrist)
    pub joint: usize,
    pub safety_factor: f64,
    pub normal: JointLoad,
    pub sf: JointLoad,
    pub motor: MotorSelection,
    pub motor_sf: MotorSelection,
}

impl JointResult {
    pub fn total_torque(&self) -> f64 {
        self.normal.total_torque
    }

    pub fn torque_before_reduction(&self) -> f64 {
        self.normal.torque_before_reduction
    }

    pub fn power(&self) -> f64 {
        self.normal.power
    }

    pub fn total_torque_sf(&self) -> f64 {
        self.sf.total_torque
    }

    pub fn torque_before_reduction_sf(&self) -> f64 {
        self.sf.torque_before_reduction
    }

    pub fn power_sf(&self) -> f64 {
        self.sf.power
    }

    /// Load for the given variant
    pub fn load(&self, variant: Variant) -> &JointLoad {
        match variant {
            Variant::Normal => &self.normal,
            Variant::SafetyFactor => &self.sf,
        }
    }

    /// Selected motor for the given variant
    pub fn selection(&self, variant: Variant) -> &MotorSelection {
        match variant {
            Variant::Normal => &self.motor,
            Variant::SafetyFactor => &self.motor_sf,
        }
    }
}

/// Aggregate figures across all joints of one variant
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VariantSummary {
    /// Sum of selected motor masses (kg)
    pub motor_mass: f64,
    /// Sum of selected motor prices
    pub price: f64,
    /// Joints for which no motor qualified
    pub unresolved: usize,
}

/// Result of one full calculation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmReport {
    pub title: String,
    pub generated: DateTime<Utc>,
    /// Joints ordered from the base (1) to the wrist (6)
    pub joints: Vec<JointResult>,
}

impl ArmReport {
    /// Result for joint `n` (1-based)
    pub fn joint(&self, n: usize) -> Option<&JointResult> {
        self.joints.iter().find(|j| j.joint == n)
    }

    /// Mass, cost and unresolved joints for one variant
    pub fn summary(&self, variant: Variant) -> VariantSummary {
        self.joints
            .iter()
            .map(|j| j.selection(variant))
            .fold(VariantSummary::default(), |mut acc, sel| {
                acc.motor_mass += sel.motor_weight;
                acc.price += sel.price;
                if sel.is_placeholder() {
                    acc.unresolved += 1;
                }
                acc
            })
    }
}

/// A joint already processed in the current pass
struct Resolved {
    load: JointLoad,
    motor: MotorSelection,
}

/// Unscaled torque about `joint` from everything outward of it
///
/// `resolved` must hold every joint greater than `joint` for the same variant.
fn torque_about(spec: &ArmSpec, joint: usize, resolved: &BTreeMap<usize, Resolved>) -> TorqueBreakdown {
    let pivot = spec.joint(joint).pivot_position;
    let density = spec.globals.link_density;

    let payload = GRAVITY * spec.globals.payload_mass * (spec.reach() - pivot);

    let links = (joint..=JOINT_COUNT)
        .map(|j| {
            let link = spec.link(j);
            cylinder_weight(density, link.radius, link.length) * (spec.link_center(j) - pivot)
        })
        .sum();

    let motors = (joint + 1..=JOINT_COUNT)
        .map(|j| {
            let mass = resolved.get(&j).map_or(0.0, |r| r.motor.motor_weight);
            GRAVITY * mass * (spec.motor_center(j) - pivot)
        })
        .sum();

    TorqueBreakdown {
        payload,
        links,
        motors,
    }
}

/// Apply gearing, speed and (for the SF variant) the safety factor
fn joint_load(spec: &ArmSpec, joint: usize, variant: Variant, breakdown: TorqueBreakdown) -> JointLoad {
    let drive = spec.joint(joint);
    let scale = match variant {
        Variant::Normal => 1.0,
        Variant::SafetyFactor => drive.safety_factor,
    };

    let unscaled = breakdown.total();
    let total_torque = unscaled * scale;
    let torque_before_reduction = if drive.reduction_ratio != 0 {
        unscaled / drive.reduction_ratio as f64 * scale
    } else {
        0.0
    };
    let power = shaft_power(torque_before_reduction, drive.rpm);

    JointLoad {
        total_torque,
        torque_before_reduction,
        power,
        breakdown,
    }
}

/// Run one variant from the wrist to the base
fn propagate<S: MotorSelector + ?Sized>(
    spec: &ArmSpec,
    selector: &S,
    variant: Variant,
) -> BTreeMap<usize, Resolved> {
    (1..=JOINT_COUNT)
        .rev()
        .fold(BTreeMap::new(), |mut resolved, joint| {
            let breakdown = match (joint, spec.base_joint, resolved.get(&2)) {
                (1, BaseJointPolicy::InheritNext, Some(next)) => next.load.breakdown,
                _ => torque_about(spec, joint, &resolved),
            };
            let load = joint_load(spec, joint, variant, breakdown);
            let motor = selector.select(joint, load.total_torque, load.power);

            tracing::debug!(
                %variant,
                joint,
                torque = load.total_torque,
                before_reduction = load.torque_before_reduction,
                power = load.power,
                motor = %motor.model_name,
                motor_kg = motor.motor_weight,
                "joint resolved"
            );

            resolved.insert(joint, Resolved { load, motor });
            resolved
        })
}

/// Compute loads and select motors for every joint, both variants
///
/// Never fails: joints whose requirement no motor meets carry the
/// placeholder selection, which contributes no weight further in.
pub fn compute_all<S: MotorSelector + ?Sized>(spec: &ArmSpec, selector: &S) -> ArmReport {
    let mut normal = propagate(spec, selector, Variant::Normal);
    let mut sf = propagate(spec, selector, Variant::SafetyFactor);

    let joints = (1..=JOINT_COUNT)
        .filter_map(|joint| {
            let n = normal.remove(&joint)?;
            let s = sf.remove(&joint)?;
            Some(JointResult {
                joint,
                safety_factor: spec.joint(joint).safety_factor,
                normal: n.load,
                sf: s.load,
                motor: n.motor,
                motor_sf: s.motor,
            })
        })
        .collect();

    ArmReport {
        title: spec.title.clone(),
        generated: Utc::now(),
        joints,
    }
}
