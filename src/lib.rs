//! armsizer: static torque, power and motor sizing for 6-DOF arms
//!
//! Given link geometry, drive parameters and a motor catalog, computes the
//! worst-case (fully extended, horizontal) torque at each joint and picks a
//! catalog motor for it, feeding each chosen motor's weight back into the
//! loads of the joints closer to the base.

pub mod cli;
pub mod core;
pub mod entities;
pub mod templates;
pub mod yaml;
