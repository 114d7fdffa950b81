use retailtrack_core::config::{ConfigError, ENV_LOG_DIR, ENV_LOG_LEVEL};
use retailtrack_core::{
    builtin_fixtures, load_fixtures_from_path, CoreConfig, Desk, FixtureError, Repository,
    StoreError,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn builtin_dataset_fills_every_store() {
    let fixtures = builtin_fixtures().unwrap();
    assert_eq!(fixtures.record_count(), 43);
    assert!(fixtures.as_of.is_some());

    let desk = Desk::from_fixtures(fixtures.clone()).unwrap();
    assert_eq!(desk.branches.len(), fixtures.branches.len());
    assert_eq!(desk.field_configs.len(), 19);
    assert_eq!(desk.as_of(), fixtures.as_of);
    assert_eq!(
        desk.transactions.list(),
        fixtures.transactions.as_slice()
    );
}

#[test]
fn fixture_file_is_loaded_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("seed.json");
    fs::write(
        &path,
        r#"{
            "branches": [{
                "id": "00000000-0000-4000-8000-000000009001",
                "name": "Airport Kiosk",
                "code": "AK003",
                "address": "Terminal 2",
                "phone": "",
                "email": "",
                "manager": "",
                "status": "Active",
                "type": "Branch"
            }]
        }"#,
    )
    .unwrap();

    let fixtures = load_fixtures_from_path(&path).unwrap();
    assert_eq!(fixtures.record_count(), 1);
    assert!(fixtures.as_of.is_none());

    let desk = Desk::from_fixtures(fixtures).unwrap();
    assert_eq!(desk.branch_by_code("AK003").unwrap().name, "Airport Kiosk");
    assert!(desk.customers.is_empty());
}

#[test]
fn missing_fixture_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.json");
    let err = load_fixtures_from_path(&missing).unwrap_err();
    assert!(matches!(err, FixtureError::Io { ref path, .. } if *path == missing));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn duplicate_ids_in_fixtures_are_rejected() {
    let mut fixtures = builtin_fixtures().unwrap();
    let copy = fixtures.customers[0].clone();
    fixtures.customers.push(copy);

    let err = Desk::from_fixtures(fixtures).unwrap_err();
    assert!(matches!(
        err,
        FixtureError::Store(StoreError::DuplicateId {
            kind: "customer",
            ..
        })
    ));
}

#[test]
fn config_file_then_overrides() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("retailtrack.json");
    fs::write(
        &path,
        r#"{"log_level": "debug", "fixtures_path": "data/seed.json"}"#,
    )
    .unwrap();

    let config = CoreConfig::from_path(&path).unwrap();
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.fixtures_path, Some(PathBuf::from("data/seed.json")));
    assert!(config.log_dir.is_none());

    let logs = dir.path().join("logs");
    let overridden = config
        .with_overrides(|key| match key {
            ENV_LOG_LEVEL => Some("error".to_string()),
            ENV_LOG_DIR => Some(logs.display().to_string()),
            _ => None,
        })
        .unwrap();
    assert_eq!(overridden.log_level, "error");
    assert_eq!(overridden.log_dir, Some(logs));
    assert_eq!(
        overridden.fixtures_path,
        Some(PathBuf::from("data/seed.json"))
    );
}

#[test]
fn config_errors_are_typed() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(
        CoreConfig::from_path(&missing),
        Err(ConfigError::Io { .. })
    ));

    assert!(matches!(
        CoreConfig::from_json_str("{ not json"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        CoreConfig::from_json_str(r#"{"log_level": "verbose"}"#),
        Err(ConfigError::InvalidLogLevel(_))
    ));
}
