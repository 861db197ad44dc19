use axum::{extract::rejection::JsonRejection, response::Json, Json as JsonExtractor};
use serde::{Deserialize, Serialize};
use spread_engine::{simulate, CvdState, Srgb};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::parse_palette_list;

/// Order in which states are reported when none is requested
pub const REPORT_ORDER: [CvdState; 4] = [
    CvdState::None,
    CvdState::Deutan,
    CvdState::Protan,
    CvdState::Tritan,
];

/// Request body for color-vision simulation
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SimulateRequest {
    /// Colors as hex strings
    #[serde(default)]
    #[schema(example = json!(["#CC3311", "#009988"]))]
    pub colors: Vec<String>,

    /// Colors as pasted text
    #[serde(default)]
    pub text: Option<String>,

    /// Single state to simulate (none, deutan, protan, tritan); all when omitted
    #[serde(default)]
    pub state: Option<String>,
}

/// Colors as seen under one vision state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SimulatedState {
    #[schema(example = "deutan")]
    pub state: String,
    pub colors: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SimulateResponse {
    /// Input colors as uppercase hex
    pub colors: Vec<String>,
    pub states: Vec<SimulatedState>,
}

/// Simulate every color under each of `states`.
pub fn simulate_colors(colors: &[Srgb], states: &[CvdState]) -> Vec<SimulatedState> {
    states
        .iter()
        .map(|&state| SimulatedState {
            state: state.name().to_string(),
            colors: colors.iter().map(|&c| simulate(c, state).to_hex()).collect(),
        })
        .collect()
}

/// Show how colors look under color-vision deficiencies
#[utoipa::path(
    post,
    path = "/api/simulate",
    request_body = SimulateRequest,
    responses(
        (status = 200, description = "Simulated colors per state", body = SimulateResponse),
        (status = 400, description = "No valid colors or unknown state"),
    ),
    tag = "Simulation"
)]
pub async fn handle_simulate(
    payload: Result<JsonExtractor<SimulateRequest>, JsonRejection>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let JsonExtractor(request) = payload?;
    let states = match request.state.as_deref() {
        Some(name) => vec![name
            .parse::<CvdState>()
            .map_err(|e| ApiError::InvalidInput(e.to_string()))?],
        None => REPORT_ORDER.to_vec(),
    };

    let inputs: Vec<&str> = request
        .colors
        .iter()
        .map(String::as_str)
        .chain(request.text.as_deref())
        .collect();
    let parsed = parse_palette_list(&inputs);
    if parsed.colors.is_empty() {
        return Err(ApiError::InvalidInput(
            "no valid hex colors in request".to_string(),
        ));
    }

    Ok(Json(SimulateResponse {
        colors: parsed.hex(),
        states: simulate_colors(&parsed.colors, &states),
    }))
}
