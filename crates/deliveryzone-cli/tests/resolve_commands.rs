use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .canonicalize()
        .expect("fixtures directory present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("deliveryzone-cli");
    cmd.env("RUST_LOG", "error")
        .env_remove("DELIVERYZONE_CONFIG")
        .env_remove("DELIVERYZONE_GEOCODER_FIXTURE")
        .arg("--config")
        .arg(fixtures_dir().join("turin_delivery_settings.json"));
    cmd
}

#[test]
fn restaurant_location_resolves_to_centro() {
    cli()
        .args(["resolve", "--lat", "45.0703", "--lng", "7.6869"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zone Centro (centro)"))
        .stdout(predicate::str::contains("distance: 0.00 km"))
        .stdout(predicate::str::contains("fee: €2.00"))
        .stdout(predicate::str::contains("estimated time: 15-25 minutes"));
}

#[test]
fn seven_km_north_resolves_to_periferia() {
    cli()
        .args(["resolve", "--lat", "45.1360", "--lng", "7.6869"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zone Periferia (periferia)"))
        .stdout(predicate::str::contains("distance: 7.31 km"))
        .stdout(predicate::str::contains("fee: €5.00"));
}

#[test]
fn out_of_range_is_not_a_failure() {
    cli()
        .args(["resolve", "--lat", "45.2052", "--lng", "7.6869"])
        .assert()
        .success()
        .stdout(predicate::str::contains("out of range"))
        .stdout(predicate::str::contains("distance: 15.00 km"))
        .stdout(predicate::str::contains("furthest delivery: 10.00 km"));
}

#[test]
fn invalid_latitude_fails_with_friendly_message() {
    cli()
        .args(["resolve", "--lat", "200", "--lng", "7.6869"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid customer coordinate"))
        .stderr(predicate::str::contains("invalid latitude: 200"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn negative_coordinates_are_accepted() {
    cli()
        .args(["--format", "json", "resolve", "--lat", "-33.8688", "--lng", "151.2093"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"out_of_range\""));
}

#[test]
fn json_format_includes_quote() {
    let output = cli()
        .args(["--format", "json", "resolve", "--lat", "45.0703", "--lng", "7.6869"])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["status"], "matched");
    assert_eq!(value["zone"]["id"], "centro");
    assert_eq!(value["quote"]["formatted_fee"], "€2.00");
    assert_eq!(value["quote"]["currency"], "EUR");
}

#[test]
fn note_format_is_single_line() {
    cli()
        .args(["--format", "note", "resolve", "--lat", "45.1360", "--lng", "7.6869"])
        .assert()
        .success()
        .stdout("Periferia €5.00 35-50 minutes\n");
}

#[test]
fn address_is_resolved_through_geocoder_fixture() {
    cli()
        .args([
            "resolve",
            "--address",
            "piazza castello, torino",
            "--geocoder-fixture",
        ])
        .arg(fixtures_dir().join("turin_addresses.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("piazza castello, torino"))
        .stdout(predicate::str::contains("zone Centro (centro)"));
}

#[test]
fn unknown_address_fails() {
    cli()
        .args(["resolve", "--address", "Via Inesistente 99"])
        .env(
            "DELIVERYZONE_GEOCODER_FIXTURE",
            fixtures_dir().join("turin_addresses.json"),
        )
        .assert()
        .failure()
        .stderr(predicate::str::contains("no coordinates found"));
}

#[test]
fn resolve_requires_a_customer() {
    cli()
        .arg("resolve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn latitude_without_longitude_is_rejected() {
    cli()
        .args(["resolve", "--lat", "45.0"])
        .assert()
        .failure();
}
