//! Integration tests for the patina CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DOOR_SCENARIO: &str = r#"{
    "name": "signal door",
    "ticks": 30,
    "config": { "random_tick_speed": 0 },
    "world": {
        "cells": [
            { "pos": {"x": 0, "y": 0, "z": 0}, "block": {"door": {"level": "exposed", "half": "lower"}} },
            { "pos": {"x": 0, "y": 1, "z": 0}, "block": {"door": {"level": "exposed", "half": "upper"}} }
        ]
    },
    "timeline": [
        { "tick": 5, "action": "signal", "pos": {"x": 1, "y": 0, "z": 0}, "on": true },
        { "tick": 8, "action": "signal", "pos": {"x": 1, "y": 0, "z": 0}, "on": false }
    ]
}"#;

const LAVA_SCENARIO: &str = r#"{
    "ticks": 1,
    "config": { "random_tick_speed": 0, "fluid_interval": 1 },
    "world": {
        "cells": [ { "pos": {"x": 0, "y": 0, "z": 0}, "fluid": {"fluid": "water"} } ]
    },
    "generators": [ { "type": "other", "fluid": "water", "product": "lava" } ]
}"#;

const GENERATORS: &str = r#"[
    { "type": "self", "fluid": "water", "priority": 1 },
    { "type": "other", "fluid": "water", "product": "lava", "priority": 5 },
    { "type": "self", "fluid": "lava" }
]"#;

/// Write `contents` to `name` inside a fresh temp directory.
fn temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    (dir, path)
}

fn patina() -> Command {
    Command::cargo_bin("patina").unwrap()
}

// ---------------------------------------------------------------------------
// simulate
// ---------------------------------------------------------------------------

#[test]
fn simulate_reports_door_toggles() {
    let (_dir, path) = temp_file("door.json", DOOR_SCENARIO);
    patina()
        .args(["simulate", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("signal door")
                .and(predicate::str::contains("door_toggled"))
                .and(predicate::str::contains("exposed_iron_door"))
                .and(predicate::str::contains("Final tick: 30")),
        );
}

#[test]
fn simulate_verbose_lists_events() {
    let (_dir, path) = temp_file("door.json", DOOR_SCENARIO);
    patina()
        .args(["simulate", path.to_str().unwrap(), "--verbose"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Event Log")
                .and(predicate::str::contains("opened"))
                .and(predicate::str::contains("closed")),
        );
}

#[test]
fn simulate_ticks_override() {
    let (_dir, path) = temp_file("door.json", DOOR_SCENARIO);
    patina()
        .args(["simulate", path.to_str().unwrap(), "--ticks", "3"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Final tick: 3")
                .and(predicate::str::contains("door_toggled").not()),
        );
}

#[test]
fn simulate_json_outputs_event_array() {
    let (_dir, path) = temp_file("door.json", DOOR_SCENARIO);
    let output = patina()
        .args(["simulate", path.to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let events: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let toggles: Vec<_> = events
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["kind"] == "door_toggled")
        .map(|e| (e["tick"].as_u64().unwrap(), e["open"].as_bool().unwrap()))
        .collect();
    assert_eq!(toggles, vec![(5, true), (17, false)]);
}

#[test]
fn simulate_runs_fluid_generators() {
    let (_dir, path) = temp_file("lava.json", LAVA_SCENARIO);
    patina()
        .args(["simulate", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("lava")
                .and(predicate::str::contains("1 fluid cells spawned"))
                .and(predicate::str::contains("fluid_generated")),
        );
}

#[test]
fn simulate_names_scenario_after_file() {
    let (_dir, path) = temp_file("lava_pool.json", LAVA_SCENARIO);
    patina()
        .args(["simulate", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("'lava_pool'"));
}

#[test]
fn simulate_missing_file_fails() {
    patina()
        .args(["simulate", "/nonexistent/scenario.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn simulate_skips_unknown_generator() {
    let scenario = LAVA_SCENARIO.replace(
        r#""generators": ["#,
        r#""generators": [ { "type": "geyser", "fluid": "water" },"#,
    );
    let (_dir, path) = temp_file("geyser.json", &scenario);
    patina()
        .args(["simulate", path.to_str().unwrap()])
        .assert()
        .success()
        .stderr(
            predicate::str::contains("skipped generator #0")
                .and(predicate::str::contains("unknown fluid generator type: geyser")),
        )
        .stdout(predicate::str::contains("1 fluid cells spawned"));
}

#[test]
fn simulate_reports_door_effects() {
    let (_dir, path) = temp_file("door.json", DOOR_SCENARIO);
    patina()
        .args(["simulate", path.to_str().unwrap(), "--verbose"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Effects")
                .and(predicate::str::contains("iron_door_open"))
                .and(predicate::str::contains("1011"))
                .and(predicate::str::contains("iron_door_close"))
                .and(predicate::str::contains("1005"))
                .and(predicate::str::contains("block_open"))
                .and(predicate::str::contains("(0, 0, 0)")),
        );
}

#[test]
fn simulate_saves_final_world() {
    let (dir, path) = temp_file("lava.json", LAVA_SCENARIO);
    let out = dir.path().join("final.json");
    patina()
        .args(["simulate", path.to_str().unwrap(), "--save", out.to_str().unwrap()])
        .assert()
        .success();

    let layout: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let cells = layout["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 2);

    // the saved layout is itself a runnable world
    let rerun = format!(r#"{{ "ticks": 1, "world": {layout} }}"#);
    let (_rerun_dir, rerun_path) = temp_file("rerun.json", &rerun);
    patina()
        .args(["simulate", rerun_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("lava"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_accepts_valid_generators() {
    let (_dir, path) = temp_file("generators.json", GENERATORS);
    patina()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("3 generators for 2 fluids")
                .and(predicate::str::contains("other"))
                .and(predicate::str::contains("lava")),
        );
}

#[test]
fn check_rejects_invalid_record() {
    let (_dir, path) = temp_file(
        "generators.json",
        r#"[ { "type": "other", "fluid": "water", "product": "water" } ]"#,
    );
    patina()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("product must differ"));
}

#[test]
fn check_lists_every_rejected_record() {
    let (_dir, path) = temp_file(
        "generators.json",
        r#"[
            { "type": "self", "fluid": "water" },
            { "type": "geyser" },
            { "type": "other", "fluid": "lava", "product": "lava" }
        ]"#,
    );
    patina()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("record #1")
                .and(predicate::str::contains("geyser"))
                .and(predicate::str::contains("record #2"))
                .and(predicate::str::contains("2 of 3 generator records rejected")),
        );
}

#[test]
fn check_rejects_non_array() {
    let (_dir, path) = temp_file("generators.json", r#"{ "type": "self" }"#);
    patina()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a JSON array"));
}

// ---------------------------------------------------------------------------
// generators
// ---------------------------------------------------------------------------

#[test]
fn generators_lists_builtin_kinds() {
    patina()
        .arg("generators")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("self")
                .and(predicate::str::contains("other"))
                .and(predicate::str::contains("2 kinds")),
        );
}

// ---------------------------------------------------------------------------
// logging
// ---------------------------------------------------------------------------

#[test]
fn log_filter_enables_summary() {
    let (_dir, path) = temp_file("door.json", DOOR_SCENARIO);
    patina()
        .env("PATINA_LOG", "info")
        .args(["simulate", path.to_str().unwrap()])
        .assert()
        .success()
        .stderr(
            predicate::str::contains("running scenario")
                .and(predicate::str::contains("scenario finished")),
        );
}
