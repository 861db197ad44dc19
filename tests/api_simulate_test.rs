//! Tests for /api/simulate, /api/spaces and the health check.

mod common;

use axum::http::StatusCode;
use common::fixtures::palettes;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_simulate_all_states() {
    let app = TestApp::new();

    let response = app
        .post_value("/api/simulate", &json!({"colors": palettes::RED_GREEN}))
        .await;

    common::assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(json["colors"], json!(palettes::RED_GREEN));

    let states = json["states"].as_array().unwrap();
    let names: Vec<_> = states.iter().map(|s| s["state"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["none", "deutan", "protan", "tritan"]);

    assert_eq!(states[0]["colors"], json!(palettes::RED_GREEN));
    for state in states {
        let colors = state["colors"].as_array().unwrap();
        assert_eq!(colors.len(), 2);
        colors.iter().for_each(common::assert_hex_color);
    }
    assert_ne!(states[1]["colors"], states[0]["colors"]);
}

#[tokio::test]
async fn test_simulate_single_state() {
    let app = TestApp::new();

    let response = app
        .post_value(
            "/api/simulate",
            &json!({"text": "#808080 #FFFFFF", "state": "tritan"}),
        )
        .await;

    common::assert_ok(&response);
    let json: serde_json::Value = response.json();
    let states = json["states"].as_array().unwrap();
    assert_eq!(states.len(), 1);
    assert_eq!(states[0]["state"], "tritan");
    // Grays are fixed points of every simulation
    assert_eq!(states[0]["colors"], json!(["#808080", "#FFFFFF"]));
}

#[tokio::test]
async fn test_simulate_unknown_state() {
    let app = TestApp::new();

    let response = app
        .post_value(
            "/api/simulate",
            &json!({"colors": ["#000000"], "state": "achromat"}),
        )
        .await;

    common::assert_api_error(&response, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("achromat"));
}

#[tokio::test]
async fn test_simulate_without_colors() {
    let app = TestApp::new();

    let response = app.post_json("/api/simulate", "{}").await;

    common::assert_api_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_simulate_invalid_json() {
    let app = TestApp::new();

    let response = app.post_json("/api/simulate", r##"{"colors": "#000000"##).await;

    common::assert_api_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_simulate_wrong_field_type() {
    let app = TestApp::new();

    let response = app
        .post_value("/api/simulate", &json!({"colors": "#000000"}))
        .await;

    common::assert_api_error(&response, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("colors"), "{json}");
}

#[tokio::test]
async fn test_spaces() {
    let app = TestApp::new();

    let response = app.get("/api/spaces").await;

    common::assert_ok(&response);
    let spaces: Vec<serde_json::Value> = response.json();
    assert_eq!(spaces.len(), 5);

    let oklch = spaces.iter().find(|s| s["name"] == "oklch").unwrap();
    let channels = oklch["channels"].as_array().unwrap();
    assert_eq!(channels.len(), 3);
    assert_eq!(channels[0]["role"], "lightness");
    assert_eq!(
        channels.iter().filter(|c| c["circular"] == true).count(),
        1
    );
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    common::assert_ok(&response);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new();

    let response = app.get("/api/nope").await;

    common::assert_api_error(&response, StatusCode::NOT_FOUND);
}
