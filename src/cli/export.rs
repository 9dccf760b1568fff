//! Results export as a sectioned CSV sheet
//!
//! Layout: for each section a title row, a header row and one row per joint,
//! with a blank line between sections.

use std::io::Write;
use std::path::Path;

use crate::cli::report::{standard_sections, Section};
use crate::core::load::ArmReport;

fn write_section<W: Write>(out: &mut W, section: &Section) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(out);
    wtr.write_record([section.title.as_str()])?;
    wtr.write_record(&section.headers)?;
    for row in &section.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the three standard sections to `out`
pub fn write_report_csv<W: Write>(report: &ArmReport, precision: usize, mut out: W) -> Result<(), csv::Error> {
    for (i, section) in standard_sections(report, precision).iter().enumerate() {
        if i > 0 {
            out.write_all(b"\n")?;
        }
        write_section(&mut out, section)?;
    }
    out.flush()?;
    Ok(())
}

/// Write the report to a CSV file, replacing it if present
pub fn export_report_csv(report: &ArmReport, precision: usize, path: &Path) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_report_csv(report, precision, std::io::BufWriter::new(file))?;
    tracing::info!(path = %path.display(), "exported results");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::MotorCatalog;
    use crate::core::load::compute_all;
    use crate::entities::arm::ArmDesign;

    fn exported() -> String {
        let spec = ArmDesign::default().to_spec().unwrap();
        let report = compute_all(&spec, &MotorCatalog::unavailable("test"));
        let mut buf = Vec::new();
        write_report_csv(&report, 3, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_three_sections_separated_by_blank_lines() {
        let text = exported();
        let blocks: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].starts_with("Torque and Power Results\n"));
        assert!(blocks[1].starts_with("Motor Specifications\n"));
        assert!(blocks[2].starts_with("Motor Specifications with Safety Factor\n"));
        for block in blocks {
            // title + header + six joints
            assert_eq!(block.trim_end().lines().count(), 8);
        }
    }

    #[test]
    fn test_rows_use_motor_labels_and_precision() {
        let text = exported();
        let row = text
            .lines()
            .find(|l| l.starts_with("Motor 6,"))
            .unwrap();
        let cells: Vec<&str> = row.split(',').collect();
        assert_eq!(cells.len(), 7);
        assert_eq!(cells[1].split('.').nth(1).map(str::len), Some(3));
    }

    #[test]
    fn test_placeholder_selection_exports_na() {
        let text = exported();
        assert!(text.contains("Motor 1,0.000,0.000,N/A,N/A,N/A,0.000,0.000"));
    }
}
