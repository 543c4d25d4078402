use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/minimal_survey.json")
        .canonicalize()
        .expect("fixture survey present")
}

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("roadsafe-cli").expect("binary builds");
    cmd.env("RUST_LOG", "error")
        .arg("--survey")
        .arg(fixture_path());
    cmd
}

#[test]
fn route_between_node_ids_prints_each_hop() {
    let mut cmd = cli();
    cmd.arg("route").arg("--from").arg("h1").arg("--to").arg("h3");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Route (a-star): h1 -> h3"))
        .stdout(predicate::str::contains("- h2"))
        .stdout(predicate::str::contains("Total weighted distance: 200.0 m"));
}

#[test]
fn dijkstra_algorithm_is_supported() {
    let mut cmd = cli();
    cmd.arg("route")
        .arg("--from")
        .arg("h1")
        .arg("--to")
        .arg("h3")
        .arg("--algorithm")
        .arg("dijkstra");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Route (dijkstra):"));
}

#[test]
fn coordinate_endpoints_resolve_to_nodes() {
    let mut cmd = cli();
    cmd.arg("route")
        .arg("--from")
        .arg("40.446111,-74.005833")
        .arg("--to")
        .arg("h3");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("h1 -> h3"));
}

#[test]
fn json_output_carries_the_wire_fields() {
    let mut cmd = cli();
    cmd.arg("route")
        .arg("--from")
        .arg("h1")
        .arg("--to")
        .arg("h3")
        .arg("--json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"unreachable\": false"))
        .stdout(predicate::str::contains("\"path_coordinates\""));
}

#[test]
fn severity_hazard_reprices_the_route() {
    // Severity weighting does not block any segment, it only raises the
    // traversal cost; the plan still succeeds.
    let mut cmd = cli();
    cmd.arg("route")
        .arg("--from")
        .arg("h1")
        .arg("--to")
        .arg("h3")
        .arg("--severity-hazard");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Total weighted distance:"));
}

#[test]
fn unreachable_goal_reports_without_failing() {
    let mut cmd = cli();
    cmd.arg("route").arg("--from").arg("h1").arg("--to").arg("s9");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No route exists between h1 and s9."));
}

#[test]
fn unknown_node_error_is_friendly() {
    let mut cmd = cli();
    cmd.arg("route").arg("--from").arg("h1").arg("--to").arg("h9");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown node id: h9"))
        .stderr(predicate::str::contains("Did you mean"));
}

#[test]
fn nodes_lists_the_survey() {
    let mut cmd = cli();
    cmd.arg("nodes");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Surveyed nodes (5):"))
        .stdout(predicate::str::contains("- h1 (40.44"))
        .stdout(predicate::str::contains("- s9 (coordinate unrecorded)"));
}

#[test]
fn missing_survey_file_fails_with_context() {
    let temp = tempdir().expect("create temp dir");
    let missing = temp.path().join("absent.json");

    let mut cmd = Command::cargo_bin("roadsafe-cli").expect("binary builds");
    cmd.env("RUST_LOG", "error")
        .arg("--survey")
        .arg(&missing)
        .arg("nodes");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load survey"));
}

#[test]
fn malformed_survey_fails_with_context() {
    let temp = tempdir().expect("create temp dir");
    let path = temp.path().join("broken.json");
    fs::write(&path, "{ not json").expect("write fixture");

    let mut cmd = Command::cargo_bin("roadsafe-cli").expect("binary builds");
    cmd.env("RUST_LOG", "error")
        .arg("--survey")
        .arg(&path)
        .arg("nodes");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load survey"));
}
