//! Entity type definitions

pub mod arm;
pub mod motor;

pub use arm::{ArmDesign, ArmSpec, BaseJointPolicy, DesignError, PivotMode, JOINT_COUNT};
pub use motor::{MotorRecord, MotorSelection};
