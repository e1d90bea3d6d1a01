//! Tests for loading simulation configuration from disk.

use std::fs;
use std::path::PathBuf;

use approx::assert_relative_eq;
use rstest::rstest;
use swarmblade::{DronePlugin, SimConfig};

fn write_config(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("swarmblade-{}-{name}.json", std::process::id()));
    fs::write(&path, body).expect("write config");
    path
}

#[rstest]
fn loads_partial_config_over_defaults() {
    let path = write_config(
        "partial",
        r#"{
            "drone": { "cruise_speed": { "min": 1.5, "max": 1.5 } },
            "tracker": { "settling_delay": 0.25 },
            "seed": 3
        }"#,
    );

    let config = SimConfig::load(&path).expect("config loads");
    fs::remove_file(&path).ok();

    assert_relative_eq!(config.drone.cruise_speed.min(), 1.5);
    assert_relative_eq!(config.drone.ascend_ceiling.max(), 2.5);
    assert_relative_eq!(config.tracker.settling_delay(), 0.25);
    assert_eq!(config.seed, Some(3));
    assert!(DronePlugin::from_config(&config).is_ok());
}

#[rstest]
#[case("inverted", r#"{ "drone": { "ascend_ceiling": { "min": 3.0, "max": 1.0 } } }"#)]
#[case("timestep", r#"{ "timestep": 0.0 }"#)]
#[case("endless-step", r#"{ "timestep": 1e30 }"#)]
#[case("wide", r#"{ "drone": { "cruise_speed": { "min": -3e38, "max": 3e38 } } }"#)]
#[case("malformed", "{ drone: ")]
fn rejects_invalid_config(#[case] name: &str, #[case] body: &str) {
    let path = write_config(name, body);
    let result = SimConfig::load(&path);
    fs::remove_file(&path).ok();
    assert!(result.is_err());
}

#[rstest]
fn missing_file_names_the_path() {
    let path = std::env::temp_dir().join("swarmblade-does-not-exist.json");
    let err = SimConfig::load(&path).expect_err("missing file");
    assert!(format!("{err:#}").contains("swarmblade-does-not-exist.json"));
}
