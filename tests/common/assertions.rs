//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert JSON response has expected status field
pub fn assert_json_status(response: &TestResponse, expected_status: u16) {
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected_status as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected_status,
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
}

/// Assert an error response: HTTP status and matching `{status, error}` body
pub fn assert_api_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    assert_json_status(response, expected.as_u16());
    let json: serde_json::Value = response.json();
    assert!(json["error"].is_string(), "Expected error message: {json}");
}

/// Assert a value is an uppercase `#RRGGBB` string
pub fn assert_hex_color(value: &serde_json::Value) {
    let s = value.as_str().unwrap_or_else(|| panic!("not a string: {value}"));
    assert_eq!(s.len(), 7, "bad hex color {s}");
    assert!(s.starts_with('#'), "bad hex color {s}");
    assert!(
        s[1..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)),
        "bad hex color {s}"
    );
}

/// Assert run report is structurally valid
pub fn assert_valid_report(report: &serde_json::Value, expected_new: usize) {
    let new_colors = report["newColors"].as_array().expect("newColors array");
    assert_eq!(new_colors.len(), expected_new);
    new_colors.iter().for_each(assert_hex_color);

    assert!(report["bestScore"].as_f64().is_some_and(f64::is_finite));
    let reason = report["convergenceReason"].as_str().expect("convergenceReason");
    assert!(
        reason == "converged (spread)" || reason == "max iterations",
        "unexpected convergence reason {reason}"
    );

    let progress: Vec<f64> = report["progressSequence"]
        .as_array()
        .expect("progressSequence array")
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect();
    for pair in progress.windows(2) {
        assert!(pair[1] <= pair[0], "progress increased: {progress:?}");
    }
    assert_eq!(
        progress.len() as u64,
        report["completedRestarts"].as_u64().unwrap()
    );

    for state in ["none", "deutan", "protan", "tritan"] {
        assert!(
            report["stateDistances"][state].is_number(),
            "missing state distance {state}"
        );
    }
}
