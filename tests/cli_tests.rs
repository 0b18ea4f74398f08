//! CLI integration tests
//!
//! These tests run the binary, so they are built only with the `cli` feature.
#![cfg(feature = "cli")]

use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn gml_conformance_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_gml-conformance"))
}

fn write_document(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("gml-conformance-{}-{}.xml", std::process::id(), name));
    fs::write(&path, content).unwrap();
    path
}

const VALID: &str = r#"<gml:Point xmlns:gml="http://www.opengis.net/gml/3.2" gml:id="p1" srsName="urn:ogc:def:crs:EPSG::4326">
  <gml:pos>49.25 -123.1</gml:pos>
</gml:Point>"#;

const SWAPPED: &str = r#"<gml:Point xmlns:gml="http://www.opengis.net/gml/3.2" gml:id="p2" srsName="urn:ogc:def:crs:EPSG::4326">
  <gml:pos>-122.22 50.55</gml:pos>
</gml:Point>"#;

const THREE_D: &str = r#"<gml:Point xmlns:gml="http://www.opengis.net/gml/3.2" gml:id="p3" srsName="EPSG:4326">
  <gml:pos>49.25 -123.1 12.0</gml:pos>
</gml:Point>"#;

#[test]
fn test_cli_geometry_pass() {
    let file = write_document("valid", VALID);
    let output = Command::new(gml_conformance_bin())
        .args(["geometry", file.to_str().unwrap()])
        .output()
        .expect("failed to run binary");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["geometry"], "Point[@gml:id='p1']");
    assert_eq!(json[0]["reports"][0]["verdict"], "pass");
}

#[test]
fn test_cli_geometry_fail_exit_code() {
    let file = write_document("swapped", SWAPPED);
    let output = Command::new(gml_conformance_bin())
        .args(["geometry", file.to_str().unwrap()])
        .output()
        .expect("failed to run binary");
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("position_outside_valid_area"));
}

#[test]
fn test_cli_truncate_flag() {
    let file = write_document("three-d", THREE_D);
    let strict = Command::new(gml_conformance_bin())
        .args(["geometry", file.to_str().unwrap()])
        .output()
        .expect("failed to run binary");
    assert!(!strict.status.success());

    let lenient = Command::new(gml_conformance_bin())
        .args(["geometry", "--truncate", file.to_str().unwrap()])
        .output()
        .expect("failed to run binary");
    assert!(lenient.status.success());
}

#[test]
fn test_cli_missing_file() {
    let output = Command::new(gml_conformance_bin())
        .args(["geometry", "/nonexistent/file.xml"])
        .output()
        .expect("failed to run binary");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error"));
}

const MALFORMED: &str = r#"<gml:Point xmlns:gml="http://www.opengis.net/gml/3.2" gml:id="p4" srsName="EPSG:4326">
  <gml:pos>49.25 north</gml:pos>
</gml:Point>"#;

#[test]
fn test_cli_unreadable_geometry_fails() {
    let file = write_document("malformed", MALFORMED);
    let output = Command::new(gml_conformance_bin())
        .args(["geometry", file.to_str().unwrap()])
        .output()
        .expect("failed to run binary");
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["geometry"], "Point[@gml:id='p4']");
    assert!(json[0]["error"].is_string());
}
