//! Arm design entity - link geometry, joint drives and the validated snapshot
//!
//! Two layers live here:
//!
//! - [`ArmDesign`] is the document users edit (YAML). Every numeric field is
//!   an [`InputValue`] so a stray `"abc"` or `-0.2` does not stop the file from
//!   loading.
//! - [`ArmSpec`] is what the load engine consumes: six links, six joints and
//!   the global parameters, all finite and non-negative, pivots resolved.
//!
//! [`ArmDesign::to_spec`] is the single boundary between the two.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::units::{nonnegative_or, parse_nonnegative_float, parse_nonnegative_int};

/// Number of joints (and links) in the arm
pub const JOINT_COUNT: usize = 6;

/// Default for any length, mass or density that fails to parse
const DEFAULT_MEASURE: f64 = 0.0;

/// Default safety factor when the input is unusable: no margin
const DEFAULT_SAFETY_FACTOR: f64 = 1.0;

/// Errors that make a design unusable (as opposed to merely defaulted)
#[derive(Debug, Error, Diagnostic)]
pub enum DesignError {
    #[error("arm design must have exactly {expected} links, found {found}")]
    #[diagnostic(code(armsizer::design::link_count), help("list links from the base (link 1) outward"))]
    LinkCount { expected: usize, found: usize },

    #[error("arm design must have exactly {expected} joints, found {found}")]
    #[diagnostic(code(armsizer::design::joint_count), help("list joints from the base (joint 1) outward"))]
    JointCount { expected: usize, found: usize },
}

/// A raw numeric input: a YAML number, free text, or anything else
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Number(f64),
    Text(String),
    /// Bools, lists and maps; always normalized to the default
    Other(serde_yml::Value),
}

impl InputValue {
    /// Normalize to a non-negative float
    pub fn to_float(&self, default: f64) -> f64 {
        match self {
            InputValue::Number(v) => nonnegative_or(*v, default),
            InputValue::Text(s) => parse_nonnegative_float(s, default),
            InputValue::Other(_) => default,
        }
    }

    /// Normalize to a non-negative integer
    pub fn to_int(&self, default: u32) -> u32 {
        match self {
            InputValue::Number(v) => parse_nonnegative_int(&v.to_string(), default),
            InputValue::Text(s) => parse_nonnegative_int(s, default),
            InputValue::Other(_) => default,
        }
    }
}

impl From<f64> for InputValue {
    fn from(v: f64) -> Self {
        InputValue::Number(v)
    }
}

impl From<u32> for InputValue {
    fn from(v: u32) -> Self {
        InputValue::Number(v as f64)
    }
}

impl From<&str> for InputValue {
    fn from(v: &str) -> Self {
        InputValue::Text(v.to_string())
    }
}

fn float_or(value: &Option<InputValue>, default: f64) -> f64 {
    value.as_ref().map_or(default, |v| v.to_float(default))
}

fn int_or(value: &Option<InputValue>, default: u32) -> u32 {
    value.as_ref().map_or(default, |v| v.to_int(default))
}

/// How joint pivot positions are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum PivotMode {
    /// Joint i sits at the start of link i: the sum of links 1..i-1
    #[default]
    Cumulative,
    /// Each joint's `pivot` field is used as given
    Explicit,
}

impl std::fmt::Display for PivotMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PivotMode::Cumulative => write!(f, "cumulative"),
            PivotMode::Explicit => write!(f, "explicit"),
        }
    }
}

/// How the base joint's load is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum BaseJointPolicy {
    /// Sum every distal load about the base pivot, like any other joint
    #[default]
    FirstPrinciples,
    /// Reuse joint 2's unscaled load, then apply the base drive's gearing
    /// and the base joint's own safety factor
    InheritNext,
}

impl std::fmt::Display for BaseJointPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BaseJointPolicy::FirstPrinciples => write!(f, "first_principles"),
            BaseJointPolicy::InheritNext => write!(f, "inherit_next"),
        }
    }
}

// ============================================================================
// Validated snapshot
// ============================================================================

/// Payload and material shared by the whole arm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalParams {
    /// End-effector payload (kg)
    pub payload_mass: f64,
    /// Link material density (kg/m³)
    pub link_density: f64,
}

/// A link modeled as a solid cylinder
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinkSpec {
    /// Length along the extended arm axis (m)
    pub length: f64,
    /// Cylinder radius (m)
    pub radius: f64,
}

/// A joint and the motor that drives it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointSpec {
    /// Joint axis position measured from the base (m)
    pub pivot_position: f64,
    /// Motor body length; its CoM sits at `pivot_position + body_length / 2` (m)
    pub body_length: f64,
    /// Motor speed (RPM)
    pub rpm: u32,
    /// Gear reduction between motor shaft and joint
    pub reduction_ratio: u32,
    /// Design margin applied in the SF variant
    pub safety_factor: f64,
}

impl Default for JointSpec {
    fn default() -> Self {
        Self {
            pivot_position: 0.0,
            body_length: 0.0,
            rpm: 0,
            reduction_ratio: 0,
            safety_factor: DEFAULT_SAFETY_FACTOR,
        }
    }
}

/// The validated configuration snapshot for one calculation pass
///
/// Joint and link numbers are 1-based throughout the public API: joint 1 is
/// the base, joint 6 the wrist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmSpec {
    pub title: String,
    pub globals: GlobalParams,
    pub links: [LinkSpec; JOINT_COUNT],
    pub joints: [JointSpec; JOINT_COUNT],
    pub pivot_mode: PivotMode,
    pub base_joint: BaseJointPolicy,
}

impl ArmSpec {
    /// Build an arm with explicit pivot positions taken from `joints`
    pub fn new(
        globals: GlobalParams,
        links: [LinkSpec; JOINT_COUNT],
        joints: [JointSpec; JOINT_COUNT],
    ) -> Self {
        Self {
            title: String::new(),
            globals,
            links,
            joints,
            pivot_mode: PivotMode::Explicit,
            base_joint: BaseJointPolicy::default(),
        }
    }

    /// Overwrite every pivot with the cumulative length of the links before it
    pub fn with_cumulative_pivots(mut self) -> Self {
        let mut position = 0.0;
        for (joint, link) in self.joints.iter_mut().zip(self.links.iter()) {
            joint.pivot_position = position;
            position += link.length;
        }
        self.pivot_mode = PivotMode::Cumulative;
        self
    }

    pub fn with_base_joint(mut self, policy: BaseJointPolicy) -> Self {
        self.base_joint = policy;
        self
    }

    /// Link `n` (1-based)
    pub fn link(&self, n: usize) -> &LinkSpec {
        &self.links[n - 1]
    }

    /// Joint `n` (1-based)
    pub fn joint(&self, n: usize) -> &JointSpec {
        &self.joints[n - 1]
    }

    /// Distance from the base to the far end of link `n`
    pub fn link_end(&self, n: usize) -> f64 {
        self.links[..n].iter().map(|l| l.length).sum()
    }

    /// Center of mass of link `n` along the arm axis
    pub fn link_center(&self, n: usize) -> f64 {
        self.link_end(n) - self.link(n).length / 2.0
    }

    /// Center of mass of motor `n` along the arm axis
    pub fn motor_center(&self, n: usize) -> f64 {
        let joint = self.joint(n);
        joint.pivot_position + joint.body_length / 2.0
    }

    /// End-effector position: the sum of all link lengths
    pub fn reach(&self) -> f64 {
        self.link_end(JOINT_COUNT)
    }
}

// ============================================================================
// Raw document
// ============================================================================

/// One link as written in the design file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<InputValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<InputValue>,
}

/// One joint as written in the design file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawJoint {
    /// Only read in `explicit` pivot mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<InputValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_length: Option<InputValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpm: Option<InputValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduction_ratio: Option<InputValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_factor: Option<InputValue>,
}

/// An arm design document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmDesign {
    /// Free-text name shown in reports
    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_mass: Option<InputValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_density: Option<InputValue>,

    #[serde(default)]
    pub pivot_mode: PivotMode,

    #[serde(default)]
    pub base_joint: BaseJointPolicy,

    /// Links from the base outward
    #[serde(default)]
    pub links: Vec<RawLink>,

    /// Joints from the base outward
    #[serde(default)]
    pub joints: Vec<RawJoint>,
}

impl Default for ArmDesign {
    /// The stock steel arm: 5 kg payload, 1.5 m reach, 3000 rpm drives at 50:1
    fn default() -> Self {
        let links = [
            (0.2, 0.04),
            (0.3, 0.035),
            (0.25, 0.03),
            (0.25, 0.025),
            (0.3, 0.025),
            (0.2, 0.02),
        ];
        let pivots = [0.0, 0.2, 0.5, 0.75, 1.0, 1.3];
        let bodies = [0.15, 0.12, 0.15, 0.12, 0.12, 0.1];

        Self {
            title: "Default 6-DOF arm".to_string(),
            payload_mass: Some(5.0.into()),
            link_density: Some(7850.0.into()),
            pivot_mode: PivotMode::Cumulative,
            base_joint: BaseJointPolicy::FirstPrinciples,
            links: links
                .iter()
                .map(|&(length, radius)| RawLink {
                    length: Some(length.into()),
                    radius: Some(radius.into()),
                })
                .collect(),
            joints: pivots
                .iter()
                .zip(bodies.iter())
                .map(|(&pivot, &body)| RawJoint {
                    pivot: Some(pivot.into()),
                    body_length: Some(body.into()),
                    rpm: Some(3000u32.into()),
                    reduction_ratio: Some(50u32.into()),
                    safety_factor: Some(1.5.into()),
                })
                .collect(),
        }
    }
}

impl ArmDesign {
    /// Normalize the document into an engine-ready snapshot
    ///
    /// Unusable numbers fall back to defaults silently; only a wrong number
    /// of links or joints is an error.
    pub fn to_spec(&self) -> Result<ArmSpec, DesignError> {
        if self.links.len() != JOINT_COUNT {
            return Err(DesignError::LinkCount {
                expected: JOINT_COUNT,
                found: self.links.len(),
            });
        }
        if self.joints.len() != JOINT_COUNT {
            return Err(DesignError::JointCount {
                expected: JOINT_COUNT,
                found: self.joints.len(),
            });
        }

        let globals = GlobalParams {
            payload_mass: float_or(&self.payload_mass, DEFAULT_MEASURE),
            link_density: float_or(&self.link_density, DEFAULT_MEASURE),
        };

        let mut links = [LinkSpec::default(); JOINT_COUNT];
        for (spec, raw) in links.iter_mut().zip(&self.links) {
            *spec = LinkSpec {
                length: float_or(&raw.length, DEFAULT_MEASURE),
                radius: float_or(&raw.radius, DEFAULT_MEASURE),
            };
        }

        let mut joints = [JointSpec::default(); JOINT_COUNT];
        for (spec, raw) in joints.iter_mut().zip(&self.joints) {
            *spec = JointSpec {
                pivot_position: float_or(&raw.pivot, DEFAULT_MEASURE),
                body_length: float_or(&raw.body_length, DEFAULT_MEASURE),
                rpm: int_or(&raw.rpm, 0),
                reduction_ratio: int_or(&raw.reduction_ratio, 0),
                safety_factor: float_or(&raw.safety_factor, DEFAULT_SAFETY_FACTOR),
            };
        }

        let spec = ArmSpec::new(globals, links, joints).with_base_joint(self.base_joint);
        let mut spec = match self.pivot_mode {
            PivotMode::Cumulative => spec.with_cumulative_pivots(),
            PivotMode::Explicit => spec,
        };
        spec.title = self.title.clone();
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_design_normalizes() {
        let spec = ArmDesign::default().to_spec().unwrap();
        assert_eq!(spec.globals.payload_mass, 5.0);
        assert_eq!(spec.globals.link_density, 7850.0);
        assert_eq!(spec.link(1).length, 0.2);
        assert_eq!(spec.joint(6).body_length, 0.1);
        assert_eq!(spec.joint(3).rpm, 3000);
        assert_eq!(spec.joint(3).reduction_ratio, 50);
        assert_eq!(spec.joint(1).safety_factor, 1.5);
        assert!((spec.reach() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_cumulative_pivots_follow_link_lengths() {
        let spec = ArmDesign::default().to_spec().unwrap();
        let expected = [0.0, 0.2, 0.5, 0.75, 1.0, 1.3];
        for (n, want) in expected.iter().enumerate() {
            let got = spec.joint(n + 1).pivot_position;
            assert!((got - want).abs() < 1e-12, "joint {} pivot {}", n + 1, got);
        }
    }

    #[test]
    fn test_explicit_pivots_are_kept() {
        let mut design = ArmDesign::default();
        design.pivot_mode = PivotMode::Explicit;
        design.joints[2].pivot = Some(0.55.into());
        let spec = design.to_spec().unwrap();
        assert_eq!(spec.joint(3).pivot_position, 0.55);
        assert_eq!(spec.pivot_mode, PivotMode::Explicit);
    }

    #[test]
    fn test_bad_inputs_fall_back_to_defaults() {
        let mut design = ArmDesign::default();
        design.payload_mass = Some("heavy".into());
        design.link_density = Some((-10.0).into());
        design.links[0].length = Some("0.35".into());
        design.joints[0].rpm = Some("3000.5".into());
        design.joints[0].safety_factor = Some("lots".into());
        design.joints[1].reduction_ratio = None;

        let spec = design.to_spec().unwrap();
        assert_eq!(spec.globals.payload_mass, 0.0);
        assert_eq!(spec.globals.link_density, 0.0);
        assert_eq!(spec.link(1).length, 0.35);
        assert_eq!(spec.joint(1).rpm, 0);
        assert_eq!(spec.joint(1).safety_factor, 1.0);
        assert_eq!(spec.joint(2).reduction_ratio, 0);
    }

    #[test]
    fn test_non_scalar_inputs_fall_back_to_defaults() {
        let yaml = r#"
payload_mass: true
link_density: { kg_per_m3: 2700 }
links:
  - { length: [0.3], radius: 0.02 }
  - {}
  - {}
  - {}
  - {}
  - {}
joints:
  - { rpm: [1], reduction_ratio: false, safety_factor: [2] }
  - {}
  - {}
  - {}
  - {}
  - {}
"#;
        let design: ArmDesign = serde_yml::from_str(yaml).unwrap();
        assert!(matches!(design.payload_mass, Some(InputValue::Other(_))));

        let spec = design.to_spec().unwrap();
        assert_eq!(spec.globals.payload_mass, 0.0);
        assert_eq!(spec.globals.link_density, 0.0);
        assert_eq!(spec.link(1).length, 0.0);
        assert_eq!(spec.link(1).radius, 0.02);
        assert_eq!(spec.joint(1).rpm, 0);
        assert_eq!(spec.joint(1).reduction_ratio, 0);
        assert_eq!(spec.joint(1).safety_factor, 1.0);
    }

    #[test]
    fn test_wrong_link_count_is_error() {
        let mut design = ArmDesign::default();
        design.links.pop();
        assert!(matches!(
            design.to_spec(),
            Err(DesignError::LinkCount { found: 5, .. })
        ));
    }

    #[test]
    fn test_wrong_joint_count_is_error() {
        let mut design = ArmDesign::default();
        design.joints.push(RawJoint::default());
        assert!(matches!(
            design.to_spec(),
            Err(DesignError::JointCount { found: 7, .. })
        ));
    }

    #[test]
    fn test_yaml_accepts_numbers_and_text() {
        let yaml = r#"
title: Mixed
payload_mass: "2.5"
link_density: 2700
pivot_mode: explicit
base_joint: inherit_next
links:
  - { length: 0.1, radius: 0.02 }
  - { length: "0.1", radius: 0.02 }
  - { length: 0.1 }
  - {}
  - { length: 0.1, radius: 0.02 }
  - { length: 0.1, radius: 0.02 }
joints:
  - { pivot: 0.0, rpm: 3000, reduction_ratio: 100, safety_factor: 2 }
  - { pivot: 0.1, rpm: "1500" }
  - {}
  - {}
  - {}
  - { pivot: 0.5, body_length: 0.05 }
"#;
        let design: ArmDesign = serde_yml::from_str(yaml).unwrap();
        let spec = design.to_spec().unwrap();
        assert_eq!(spec.title, "Mixed");
        assert_eq!(spec.globals.payload_mass, 2.5);
        assert_eq!(spec.globals.link_density, 2700.0);
        assert_eq!(spec.base_joint, BaseJointPolicy::InheritNext);
        assert_eq!(spec.link(2).length, 0.1);
        assert_eq!(spec.link(3).radius, 0.0);
        assert_eq!(spec.link(4).length, 0.0);
        assert_eq!(spec.joint(1).reduction_ratio, 100);
        assert_eq!(spec.joint(1).safety_factor, 2.0);
        assert_eq!(spec.joint(2).rpm, 1500);
        assert_eq!(spec.joint(3).safety_factor, 1.0);
        assert_eq!(spec.joint(6).pivot_position, 0.5);
    }

    #[test]
    fn test_link_and_motor_centers() {
        let spec = ArmDesign::default().to_spec().unwrap();
        // Link 2 spans 0.2..0.5
        assert!((spec.link_center(2) - 0.35).abs() < 1e-12);
        // Motor 6 pivot 1.3, body 0.1
        assert!((spec.motor_center(6) - 1.35).abs() < 1e-12);
    }
}
