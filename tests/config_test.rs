//! Tests for config loading and how it flows into runs.

mod common;

use common::fixtures::palettes;
use common::TestApp;
use huespread::assets::{AssetLoader, EMBEDDED_CONFIG};
use huespread::models::AppConfig;
use serde_json::json;
use spread_engine::ColorSpace;
use std::fs;

#[test]
fn test_external_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "run:\n  colorSpace: oklch\n  nColsToAdd: 2\n  nOptimRuns: 3\ntuning:\n  penaltyWeight: 0\n",
    )
    .unwrap();

    let config = AppConfig::load_from_assets(&AssetLoader::new(Some(path)));

    assert_eq!(config.run.color_space, ColorSpace::Oklch);
    assert_eq!(config.run.n_cols_to_add, 2);
    assert_eq!(config.run.n_optim_runs, 3);
    assert_eq!(config.run.nm_iterations, 300);
    assert_eq!(config.tuning.penalty_weight, 0.0);
}

#[test]
fn test_broken_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "run: [this is not a mapping").unwrap();

    let config = AppConfig::load_from_assets(&AssetLoader::new(Some(path)));

    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_missing_config_file_uses_embedded() {
    let dir = tempfile::tempdir().unwrap();
    let loader = AssetLoader::new(Some(dir.path().join("missing.yaml")));

    assert_eq!(loader.read_config_string().unwrap(), EMBEDDED_CONFIG);
    assert_eq!(AppConfig::load_from_assets(&loader), AppConfig::default());
}

#[test]
fn test_init_writes_loadable_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("config.yaml");
    let loader = AssetLoader::new(Some(path.clone()));

    let report = loader.init(false).unwrap();

    assert_eq!(report.written, vec![path.display().to_string()]);
    let config = AppConfig::from_yaml(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[tokio::test]
async fn test_configured_defaults_apply_to_requests() {
    let yaml = "run:\n  colorSpace: lch\n  nColsToAdd: 3\n  nOptimRuns: 2\n  nmIterations: 30\n";
    let app = TestApp::with_config(AppConfig::from_yaml(yaml).unwrap());

    let report = app
        .optimize(&json!({"colors": palettes::BLUE_GREEN, "seed": 4}))
        .await;

    common::assert_valid_report(&report, 3);
    assert_eq!(report["colorSpace"], "lch");
    assert_eq!(report["completedRestarts"], 2);
}

#[tokio::test]
async fn test_request_overrides_configured_defaults() {
    let yaml = "run:\n  colorSpace: lch\n  nOptimRuns: 4\n  nmIterations: 30\n";
    let app = TestApp::with_config(AppConfig::from_yaml(yaml).unwrap());

    let report = app
        .optimize(&json!({
            "colors": palettes::BLUE_GREEN,
            "colorSpace": "hsl",
            "nOptimRuns": 1,
            "seed": 4,
        }))
        .await;

    assert_eq!(report["colorSpace"], "hsl");
    assert_eq!(report["completedRestarts"], 1);
}
