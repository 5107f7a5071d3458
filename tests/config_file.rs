use std::fs;
use std::path::PathBuf;

use relcalc::config::Config;

#[test]
fn explicit_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("relcalc.toml");
    fs::write(
        &path,
        r#"
[physics]
rest_mass_kg = 0.5

[scenario]
proper_time_years = 4.2

[sweep]
steps = 20

[output]
dir = "results"
metrics_csv = "sweep.csv"
"#,
    )
    .unwrap();

    let config = Config::load(Some(&path)).unwrap();

    assert_eq!(config.physics.rest_mass_kg, 0.5);
    assert_eq!(config.scenario.proper_time_years, 4.2);
    assert_eq!(config.scenario.proper_length_m, 100.0);
    assert_eq!(config.sweep.steps, 20);
    assert_eq!(
        config.output.metrics_csv_path(),
        PathBuf::from("results/sweep.csv")
    );
    assert_eq!(config.physical_params().unwrap().rest_mass_kg(), 0.5);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(Config::load(Some(&path)).is_err());
}

#[test]
fn invalid_physics_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("relcalc.toml");
    fs::write(&path, "[physics]\nrest_mass_kg = -2.0\n").unwrap();

    assert!(Config::load(Some(&path)).is_err());
}

#[test]
fn malformed_toml_is_rejected() {
    assert!(Config::parse("[sweep]\nsteps = \"many\"\n").is_err());
}
