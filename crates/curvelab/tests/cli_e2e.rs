//! End-to-end tests for the curvelab binary.
//!
//! Only the headless subcommands are exercised; the interactive UI needs a
//! terminal.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

/// A command isolated from the user's environment and config directory.
#[allow(deprecated)]
fn curvelab_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("curvelab").unwrap();
    cmd.env_remove("NO_COLOR")
        .env_remove("CURVELAB_CONFIG")
        .env_remove("CURVELAB_LOG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// =============================================================================
// snapshot
// =============================================================================

mod snapshot {
    use super::*;

    #[test]
    fn test_default_frame() {
        let home = TempDir::new().unwrap();
        curvelab_cmd(&home)
            .arg("snapshot")
            .assert()
            .success()
            .stdout(predicate::str::contains("Curved Motion Visualizer"))
            .stdout(predicate::str::contains("1) Transform Curves"))
            .stdout(predicate::str::contains(
                "Curve Transformations (Translation + Stretching)",
            ))
            .stdout(predicate::str::contains("\x1b[").not());
    }

    #[test]
    fn test_motion_after_ticks() {
        let home = TempDir::new().unwrap();
        curvelab_cmd(&home)
            .args(["snapshot", "--page", "motion", "--ticks", "10"])
            .assert()
            .success()
            .stdout(predicate::str::contains("t=0.30"))
            .stdout(predicate::str::contains("Animating..."));
    }

    #[test]
    fn test_dt_flag_overrides_step() {
        let home = TempDir::new().unwrap();
        curvelab_cmd(&home)
            .args(["--dt", "0.1", "snapshot", "--page", "motion", "--ticks", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("t=0.10"));
    }

    #[test]
    fn test_frame_size() {
        let home = TempDir::new().unwrap();
        let output = curvelab_cmd(&home)
            .args(["snapshot", "--width", "80", "--height", "24"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert_eq!(stdout.lines().count(), 24);
    }

    #[test]
    fn test_force_color() {
        let home = TempDir::new().unwrap();
        curvelab_cmd(&home)
            .args(["--force-color", "snapshot"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\x1b["));
    }

    #[test]
    fn test_help_page() {
        let home = TempDir::new().unwrap();
        curvelab_cmd(&home)
            .args(["snapshot", "--page", "help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Controls on the plotting tabs"));
    }
}

// =============================================================================
// sample
// =============================================================================

mod sample {
    use super::*;

    #[test]
    fn test_motion_json() {
        let home = TempDir::new().unwrap();
        let output = curvelab_cmd(&home)
            .args(["sample", "--page", "motion"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["page"], "motion");
        assert_eq!(json["motion"]["readout"], "t=0.00   speed=2.000");
        assert_eq!(json["figure"]["arrows"][0]["label"], "velocity");
    }

    #[test]
    fn test_help_has_no_figure() {
        let home = TempDir::new().unwrap();
        curvelab_cmd(&home)
            .args(["sample", "--page", "help"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("sample failed"));
    }
}

// =============================================================================
// Configuration
// =============================================================================

mod config {
    use super::*;

    #[test]
    fn test_config_file_sets_initial_values() {
        let home = TempDir::new().unwrap();
        let file = config_file(
            "[ui]\npage = \"transform\"\n\n\
             [transform]\ncurve = \"hyperbola\"\nrange_min = -10.0\nrange_max = 10.0\n",
        );
        let output = curvelab_cmd(&home)
            .arg("--config")
            .arg(file.path())
            .arg("sample")
            .output()
            .unwrap();
        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["page"], "transform");
        assert_eq!(json["figure"]["x_limits"]["max"], 10.0);
    }

    #[test]
    fn test_default_location_is_read() {
        let home = TempDir::new().unwrap();
        let dir = home.path().join("curvelab");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), "[ui]\npage = \"motion\"\n").unwrap();
        curvelab_cmd(&home)
            .arg("snapshot")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Parametric Motion (Position, Velocity, Acceleration)",
            ));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let home = TempDir::new().unwrap();
        let file = config_file("[ui]\ntheme = \"dark\"\n");
        curvelab_cmd(&home)
            .arg("--config")
            .arg(file.path())
            .arg("snapshot")
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid configuration"));
    }

    #[test]
    fn test_empty_range_is_rejected() {
        let home = TempDir::new().unwrap();
        let file = config_file("[transform]\nrange_min = 5.0\nrange_max = 2.0\n");
        curvelab_cmd(&home)
            .arg("--config")
            .arg(file.path())
            .arg("snapshot")
            .assert()
            .failure()
            .stderr(predicate::str::contains("range"));
    }

    #[test]
    fn test_missing_explicit_config() {
        let home = TempDir::new().unwrap();
        curvelab_cmd(&home)
            .args(["--config", "/nonexistent/curvelab.toml", "snapshot"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("cannot read config file"));
    }
}

// =============================================================================
// Logging
// =============================================================================

#[test]
fn test_log_file_receives_events() {
    let home = TempDir::new().unwrap();
    let log = home.path().join("curvelab.log");
    curvelab_cmd(&home)
        .arg("-vv")
        .arg("--log-file")
        .arg(&log)
        .arg("snapshot")
        .assert()
        .success();
    let text = std::fs::read_to_string(&log).unwrap();
    assert!(text.contains("snapshot rendered"), "{text}");
}

#[test]
fn test_help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    curvelab_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("snapshot"))
        .stdout(predicate::str::contains("sample"));
}
