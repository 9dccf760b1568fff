//! Tabular views of an [`ArmReport`], shared by the terminal and CSV output

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::helpers::format_float;
use crate::core::load::{ArmReport, Variant};

pub const RESULTS_TITLE: &str = "Torque and Power Results";
pub const SPECS_TITLE: &str = "Motor Specifications";
pub const SPECS_SF_TITLE: &str = "Motor Specifications with Safety Factor";

const RESULT_HEADERS: [&str; 7] = [
    "Motor",
    "Total Torque (N⋅m)",
    "Total Torque with SF (N⋅m)",
    "Torque Before Reduction (N⋅m)",
    "Torque Before Reduction with SF (N⋅m)",
    "Power (W)",
    "Power with SF (W)",
];

const SPEC_HEADERS: [&str; 8] = [
    "Motor",
    "Power Rating (W)",
    "Flange Size (mm)",
    "Voltage Type",
    "Model Name",
    "Company Name",
    "Price ($)",
    "Motor Weight (kg)",
];

const BREAKDOWN_HEADERS: [&str; 6] = [
    "Motor",
    "Payload (N⋅m)",
    "Links (N⋅m)",
    "Motors (N⋅m)",
    "Sum (N⋅m)",
    "Safety Factor",
];

/// A titled grid of already-formatted cells
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Section {
    fn new(title: impl Into<String>, headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    /// Render as a terminal table
    pub fn render(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.headers.clone());
        for row in &self.rows {
            builder.push_record(row.clone());
        }
        let mut table = builder.build();
        table.with(Style::rounded());
        table.to_string()
    }
}

/// Torque and power of every joint, both variants side by side
pub fn results_section(report: &ArmReport, precision: usize) -> Section {
    let f = |v: f64| format_float(v, precision);
    let rows = report
        .joints
        .iter()
        .map(|j| {
            vec![
                j.motor.motor_label.clone(),
                f(j.total_torque()),
                f(j.total_torque_sf()),
                f(j.torque_before_reduction()),
                f(j.torque_before_reduction_sf()),
                f(j.power()),
                f(j.power_sf()),
            ]
        })
        .collect();
    Section::new(RESULTS_TITLE, &RESULT_HEADERS, rows)
}

/// Selected motors of one variant
pub fn specs_section(report: &ArmReport, variant: Variant, precision: usize) -> Section {
    let f = |v: f64| format_float(v, precision);
    let rows = report
        .joints
        .iter()
        .map(|j| {
            let m = j.selection(variant);
            vec![
                m.motor_label.clone(),
                f(m.power_rating),
                f(m.flange_size),
                m.voltage_type.clone(),
                m.model_name.clone(),
                m.company_name.clone(),
                f(m.price),
                f(m.motor_weight),
            ]
        })
        .collect();
    let title = match variant {
        Variant::Normal => SPECS_TITLE,
        Variant::SafetyFactor => SPECS_SF_TITLE,
    };
    Section::new(title, &SPEC_HEADERS, rows)
}

/// Where each joint's unscaled torque comes from
pub fn breakdown_section(report: &ArmReport, variant: Variant, precision: usize) -> Section {
    let f = |v: f64| format_float(v, precision);
    let rows = report
        .joints
        .iter()
        .map(|j| {
            let b = j.load(variant).breakdown;
            let sf = match variant {
                Variant::Normal => 1.0,
                Variant::SafetyFactor => j.safety_factor,
            };
            vec![
                j.motor.motor_label.clone(),
                f(b.payload),
                f(b.links),
                f(b.motors),
                f(b.total()),
                f(sf),
            ]
        })
        .collect();
    Section::new(format!("Torque Breakdown ({})", variant), &BREAKDOWN_HEADERS, rows)
}

/// The three standard sections, in display order
pub fn standard_sections(report: &ArmReport, precision: usize) -> [Section; 3] {
    [
        results_section(report, precision),
        specs_section(report, Variant::Normal, precision),
        specs_section(report, Variant::SafetyFactor, precision),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::MotorCatalog;
    use crate::core::load::compute_all;
    use crate::entities::arm::ArmDesign;

    fn report() -> ArmReport {
        let spec = ArmDesign::default().to_spec().unwrap();
        compute_all(&spec, &MotorCatalog::unavailable("test"))
    }

    #[test]
    fn test_standard_sections_shape() {
        let [results, specs, specs_sf] = standard_sections(&report(), 3);
        assert_eq!(results.title, "Torque and Power Results");
        assert_eq!(results.headers.len(), 7);
        assert_eq!(results.rows.len(), 6);
        assert_eq!(results.rows[0][0], "Motor 1");
        assert_eq!(specs.title, "Motor Specifications");
        assert_eq!(specs_sf.title, "Motor Specifications with Safety Factor");
        assert!(specs.rows.iter().all(|r| r.len() == 8 && r[4] == "N/A"));
    }

    #[test]
    fn test_precision_applies_to_cells() {
        let results = results_section(&report(), 1);
        let torque = &results.rows[5][1];
        let decimals = torque.split('.').nth(1).map_or(0, str::len);
        assert_eq!(decimals, 1);
    }

    #[test]
    fn test_render_contains_headers_and_labels() {
        let rendered = results_section(&report(), 3).render();
        assert!(rendered.contains("Power with SF (W)"));
        assert!(rendered.contains("Motor 6"));
    }

    #[test]
    fn test_breakdown_sums_to_total() {
        let r = report();
        let section = breakdown_section(&r, Variant::Normal, 6);
        let j6 = r.joint(6).unwrap();
        assert_eq!(section.rows[5][4], format_float(j6.total_torque(), 6));
    }
}
