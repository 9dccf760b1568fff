//! Motor entities - catalog records and per-joint selections

use serde::{Deserialize, Serialize};

/// Text used for every non-numeric field of a placeholder selection
pub const NOT_AVAILABLE: &str = "N/A";

/// One row of the motor catalog
///
/// Numeric fields come from unit-suffixed text in the catalog file and are
/// already parsed; cells that could not be parsed hold 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorRecord {
    /// Rated output power (W)
    pub power_rating_w: f64,

    /// Motor mass (kg)
    pub weight_kg: f64,

    /// Rated speed (RPM)
    pub rated_rpm: f64,

    /// Rated torque (N·m)
    pub rated_torque_nm: f64,

    /// Supply voltage (V)
    pub input_voltage: f64,

    /// Free-text voltage type (e.g. "AC", "DC")
    pub voltage_type: String,

    /// Manufacturer model name
    pub model_name: String,

    /// Mounting flange size (mm)
    pub flange_size_mm: f64,

    /// Manufacturer name
    pub company_name: String,

    /// Unit price
    #[serde(default)]
    pub price: f64,

    /// Datasheet or shop URL
    #[serde(default)]
    pub reference_link: String,
}

/// The motor chosen for one joint in one variant
///
/// A selection is either a copy of a catalog record's public fields or the
/// placeholder returned when nothing qualifies (see [`MotorSelection::placeholder`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorSelection {
    /// Display label, always `"Motor {joint}"`
    pub motor_label: String,
    pub power_rating: f64,
    pub flange_size: f64,
    pub voltage_type: String,
    pub model_name: String,
    pub company_name: String,
    pub price: f64,
    /// Mass (kg) fed back into the load of more proximal joints
    pub motor_weight: f64,
    pub rated_torque: f64,
    pub rated_rpm: f64,
    pub input_voltage: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reference_link: String,
}

impl MotorSelection {
    /// Label used for a joint's motor in every table and export
    pub fn label_for(joint: usize) -> String {
        format!("Motor {}", joint)
    }

    /// Selection returned when no catalog entry satisfies the requirement
    /// or the catalog itself is unusable
    pub fn placeholder(joint: usize) -> Self {
        Self {
            motor_label: Self::label_for(joint),
            power_rating: 0.0,
            flange_size: 0.0,
            voltage_type: NOT_AVAILABLE.to_string(),
            model_name: NOT_AVAILABLE.to_string(),
            company_name: NOT_AVAILABLE.to_string(),
            price: 0.0,
            motor_weight: 0.0,
            rated_torque: 0.0,
            rated_rpm: 0.0,
            input_voltage: 0.0,
            reference_link: String::new(),
        }
    }

    /// Build a selection for `joint` from a catalog record
    pub fn from_record(joint: usize, record: &MotorRecord) -> Self {
        Self {
            motor_label: Self::label_for(joint),
            power_rating: record.power_rating_w,
            flange_size: record.flange_size_mm,
            voltage_type: record.voltage_type.clone(),
            model_name: record.model_name.clone(),
            company_name: record.company_name.clone(),
            price: record.price,
            motor_weight: record.weight_kg,
            rated_torque: record.rated_torque_nm,
            rated_rpm: record.rated_rpm,
            input_voltage: record.input_voltage,
            reference_link: record.reference_link.clone(),
        }
    }

    /// True when this is the "no motor" placeholder
    pub fn is_placeholder(&self) -> bool {
        self.model_name == NOT_AVAILABLE && self.motor_weight == 0.0 && self.power_rating == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> MotorRecord {
        MotorRecord {
            power_rating_w: 200.0,
            weight_kg: 1.2,
            rated_rpm: 3000.0,
            rated_torque_nm: 0.64,
            input_voltage: 48.0,
            voltage_type: "DC".to_string(),
            model_name: "BLM-200".to_string(),
            flange_size_mm: 60.0,
            company_name: "Acme Drives".to_string(),
            price: 120.0,
            reference_link: "https://example.com/blm-200".to_string(),
        }
    }

    #[test]
    fn test_placeholder() {
        let p = MotorSelection::placeholder(4);
        assert_eq!(p.motor_label, "Motor 4");
        assert_eq!(p.model_name, "N/A");
        assert_eq!(p.motor_weight, 0.0);
        assert!(p.is_placeholder());
    }

    #[test]
    fn test_from_record_copies_fields() {
        let sel = MotorSelection::from_record(2, &record());
        assert_eq!(sel.motor_label, "Motor 2");
        assert_eq!(sel.power_rating, 200.0);
        assert_eq!(sel.motor_weight, 1.2);
        assert_eq!(sel.flange_size, 60.0);
        assert_eq!(sel.company_name, "Acme Drives");
        assert!(!sel.is_placeholder());
    }
}
