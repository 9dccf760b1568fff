//! Integration tests for `armsizer catalog` and `armsizer select`

mod common;

use common::{armsizer, run_json, setup_stock_project, write_catalog, write_file};
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Catalog Listing
// ============================================================================

#[test]
fn test_catalog_lists_stock_motors() {
    let tmp = setup_stock_project();

    armsizer()
        .current_dir(tmp.path())
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("MODEL"))
        .stdout(predicate::str::contains("BL-40-050"))
        .stdout(predicate::str::contains("HT-180-5K0"))
        .stdout(predicate::str::contains("13 of 13 motor(s) from motors.csv"));
}

#[test]
fn test_catalog_min_power_and_limit() {
    let tmp = setup_stock_project();

    let motors = run_json(armsizer().current_dir(tmp.path()).args([
        "catalog",
        "--min-power",
        "1000",
        "-o",
        "json",
    ]));
    let motors = motors.as_array().unwrap();
    assert_eq!(motors.len(), 6);
    assert!(motors
        .iter()
        .all(|m| m["power_rating_w"].as_f64().unwrap() >= 1000.0));

    let limited = run_json(
        armsizer()
            .current_dir(tmp.path())
            .args(["catalog", "--limit", "2", "-o", "json"]),
    );
    assert_eq!(limited.as_array().unwrap().len(), 2);
}

#[test]
fn test_catalog_csv_output() {
    let tmp = setup_stock_project();

    armsizer()
        .current_dir(tmp.path())
        .args(["catalog", "-n", "1", "-o", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("power_rating_w,weight_kg"))
        .stdout(predicate::str::contains("BL-40-050"));
}

#[test]
fn test_catalog_missing_file_is_error() {
    let tmp = TempDir::new().unwrap();

    armsizer()
        .current_dir(tmp.path())
        .arg("catalog")
        .assert()
        .failure()
        .stderr(predicate::str::contains("motor catalog not found"));
}

#[test]
fn test_catalog_missing_columns_is_error() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp, "motors.csv", "Model,Power\nX,100\n");

    armsizer()
        .current_dir(tmp.path())
        .arg("catalog")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing columns"));
}

#[test]
fn test_catalog_tolerates_bom_and_header_case() {
    let tmp = TempDir::new().unwrap();
    write_file(
        &tmp,
        "motors.csv",
        "\u{feff}POWER RATING (WATTS), weight (kg) ,Rated RPM,Rated Torque,Input Voltage,Voltage Type,MODEL,Flange Size,Company Name,Link\n\
         250w,1.0kg,3000,0.8nm,48,DC,Lowercase-Units,60MM,Co,\n",
    );

    let motors = run_json(armsizer().current_dir(tmp.path()).args(["catalog", "-o", "json"]));
    let m = &motors[0];
    assert_eq!(m["model_name"], "Lowercase-Units");
    assert_eq!(m["power_rating_w"].as_f64(), Some(250.0));
    assert_eq!(m["weight_kg"].as_f64(), Some(1.0));
    assert_eq!(m["rated_torque_nm"].as_f64(), Some(0.8));
    assert_eq!(m["flange_size_mm"].as_f64(), Some(60.0));
    assert_eq!(m["price"].as_f64(), Some(0.0));
}

// ============================================================================
// Single Selection
// ============================================================================

#[test]
fn test_select_single_sufficient_entry() {
    let tmp = TempDir::new().unwrap();
    write_catalog(&tmp, "motors.csv", &["100W,1Kg,3000,5Nm,48,DC,Only,40mm,Co,,10"]);

    armsizer()
        .current_dir(tmp.path())
        .args(["select", "--torque", "2", "--power", "50", "--joint", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Motor 6: Only"));
}

#[test]
fn test_select_prefers_heavier_at_equal_power() {
    let tmp = TempDir::new().unwrap();
    write_catalog(
        &tmp,
        "motors.csv",
        &[
            "200W,3.0Kg,3000,0.64Nm,48,DC,Light,60mm,Co,,100",
            "200W,5.0Kg,3000,0.64Nm,48,DC,Heavy,60mm,Co,,120",
        ],
    );

    let sel = run_json(armsizer().current_dir(tmp.path()).args([
        "select", "--torque", "0.1", "--power", "150", "-o", "json",
    ]));
    assert_eq!(sel["model_name"], "Heavy");
    assert_eq!(sel["motor_weight"].as_f64(), Some(5.0));
    assert_eq!(sel["motor_label"], "Motor 1");
}

#[test]
fn test_select_nothing_qualifies() {
    let tmp = TempDir::new().unwrap();
    write_catalog(
        &tmp,
        "motors.csv",
        &["50W,0.4Kg,3000,0.16Nm,24,DC,Tiny,40mm,Co,,50"],
    );

    armsizer()
        .current_dir(tmp.path())
        .args(["select", "--torque", "10", "--power", "500", "--joint", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No motor found for Motor 3"));

    let sel = run_json(armsizer().current_dir(tmp.path()).args([
        "select", "--torque", "10", "--power", "500", "-o", "json",
    ]));
    assert_eq!(sel["model_name"], "N/A");
    assert_eq!(sel["motor_weight"].as_f64(), Some(0.0));
}

#[test]
fn test_select_torque_fallback() {
    let tmp = TempDir::new().unwrap();
    write_catalog(
        &tmp,
        "motors.csv",
        &[
            "400W,2Kg,3000,0.5Nm,48,DC,Weak,60mm,Co,,1",
            "750W,3Kg,3000,8Nm,48,DC,Strong,80mm,Co,,1",
        ],
    );

    let sel = run_json(armsizer().current_dir(tmp.path()).args([
        "select", "--torque", "6", "--power", "5000", "-o", "json",
    ]));
    assert_eq!(sel["model_name"], "Strong");
}

#[test]
fn test_select_joint_out_of_range() {
    let tmp = setup_stock_project();

    armsizer()
        .current_dir(tmp.path())
        .args(["select", "--torque", "1", "--power", "1", "--joint", "7"])
        .assert()
        .failure();
}

#[test]
fn test_select_uses_catalog_flag() {
    let tmp = TempDir::new().unwrap();
    let path = write_catalog(&tmp, "elsewhere.csv", &["100W,1Kg,3000,5Nm,48,DC,Flagged,40mm,Co,,10"]);

    armsizer()
        .current_dir(tmp.path())
        .args(["select", "--torque", "1", "--power", "10", "--catalog"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Flagged"));
}
