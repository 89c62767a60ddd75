// Integration tests for the rosterscout front end: shipped defaults, demo
// data files, and a full command run over them.

use std::path::{Path, PathBuf};

use rosterscout_cli::cli::Command;
use rosterscout_cli::commands::execute;
use rosterscout_cli::config::{self, DataPaths};
use rosterscout_cli::data;
use rosterscout_core::{PlayerId, RecommendSettings, ScoutService};

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn demo_paths() -> DataPaths {
    DataPaths {
        players: "data/players.json".into(),
        baseline: "data/baseline.json".into(),
    }
}

fn demo_roster() -> Vec<PlayerId> {
    (1..=9).collect()
}

/// Verify that defaults/scout.toml is valid TOML.
#[test]
fn default_config_is_valid_toml() {
    let content = std::fs::read_to_string(crate_root().join("defaults/scout.toml"))
        .expect("defaults/scout.toml should exist");
    let parsed: Result<toml::Value, _> = toml::from_str(&content);
    assert!(parsed.is_ok(), "defaults/scout.toml is not valid TOML: {:?}", parsed.err());
}

/// A fresh base directory gets its config copied from defaults on first load.
#[test]
fn first_run_copies_defaults() {
    let tmp = std::env::temp_dir().join("rosterscout_cli_first_run");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(tmp.join("defaults")).unwrap();
    std::fs::copy(
        crate_root().join("defaults/scout.toml"),
        tmp.join("defaults/scout.toml"),
    )
    .unwrap();

    let config = config::load_config(&tmp).expect("config should load after copying defaults");
    assert!(tmp.join("config/scout.toml").exists());
    assert_eq!(config.recommend, RecommendSettings::default());

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn demo_data_loads() {
    let source = data::load_source(&crate_root(), &demo_paths()).expect("demo data should load");
    assert_eq!(source.len(), 21);
}

#[test]
fn missing_data_file_is_reported() {
    let paths = DataPaths {
        players: "data/does-not-exist.json".into(),
        baseline: "data/baseline.json".into(),
    };
    let err = data::load_source(Path::new(env!("CARGO_MANIFEST_DIR")), &paths).unwrap_err();
    assert!(matches!(err, data::DataError::Io { .. }));
}

#[tokio::test]
async fn demo_recommendations_replace_left_fielder() {
    let source = data::load_source(&crate_root(), &demo_paths()).unwrap();
    let service = ScoutService::new(source, RecommendSettings::default());

    let recs = service.recommend_players(&demo_roster()).await.unwrap();
    let ids: Vec<PlayerId> = recs.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![100, 106, 101, 102, 103]);
    assert_eq!(recs[0].years_active, "2019-2024");
    assert!(recs.iter().all(|r| r.score > 0.0));
}

#[tokio::test]
async fn demo_weakness_command_renders_json() {
    let source = data::load_source(&crate_root(), &demo_paths()).unwrap();
    let service = ScoutService::new(source, RecommendSettings::default());

    let out = execute(&service, &Command::Weakness { ids: demo_roster() })
        .await
        .unwrap();
    let weakness = out["weakness"].as_object().expect("weakness should be an object");
    assert_eq!(weakness.len(), 5);
    assert!(out["total"].as_f64().unwrap() > 0.0);
}
