use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    Json as JsonExtractor,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{RunOverrides, RunReport};
use crate::server::AppState;
use crate::services::parse_palette_list;

/// Request body for an optimization run
///
/// Colors may come as a list, as free-form text, or both. Every other field
/// overrides the configured default for this run only.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    /// Palette colors as hex strings
    #[serde(default)]
    #[schema(example = json!(["#4477AA", "#228833"]))]
    pub colors: Vec<String>,

    /// Palette as pasted text (any mix of whitespace, commas, semicolons)
    #[serde(default)]
    pub text: Option<String>,

    #[serde(flatten)]
    pub overrides: RunOverrides,
}

/// Response from a cancel request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CancelResponse {
    /// Number of in-flight runs that were asked to stop
    pub cancelled: usize,
}

/// Find new colors for a palette
///
/// Runs the optimizer with the configured defaults merged with the request's
/// overrides. The report is also kept as the last run.
#[utoipa::path(
    post,
    path = "/api/optimize",
    request_body = OptimizeRequest,
    responses(
        (status = 200, description = "Optimization finished (possibly cancelled)", body = RunReport),
        (status = 400, description = "No valid colors or invalid settings"),
        (status = 500, description = "Optimizer task failed"),
    ),
    tag = "Optimization"
)]
pub async fn handle_optimize(
    State(state): State<AppState>,
    payload: Result<JsonExtractor<OptimizeRequest>, JsonRejection>,
) -> Result<Json<RunReport>, ApiError> {
    let JsonExtractor(request) = payload?;
    let inputs: Vec<&str> = request
        .colors
        .iter()
        .map(String::as_str)
        .chain(request.text.as_deref())
        .collect();
    let parsed = parse_palette_list(&inputs);
    if !parsed.rejected.is_empty() {
        tracing::info!(rejected = ?parsed.rejected, "Dropped invalid palette entries");
    }
    let palette = parsed
        .into_palette()
        .map_err(|_| ApiError::InvalidInput("no valid hex colors in request".to_string()))?;

    let optimizer = state.optimizer.clone();
    let overrides = request.overrides;
    let report = tokio::task::spawn_blocking(move || {
        let run = optimizer.begin();
        optimizer.run(&palette, &overrides, run.flag())
    })
    .await
    .map_err(|e| ApiError::Internal(format!("optimizer task failed: {e}")))??;

    state.store.store(report.clone()).await;

    Ok(Json(report))
}

/// Report of the most recent run
#[utoipa::path(
    get,
    path = "/api/last",
    responses(
        (status = 200, description = "Last run report", body = RunReport),
        (status = 404, description = "No run has completed yet"),
    ),
    tag = "Optimization"
)]
pub async fn handle_last(State(state): State<AppState>) -> Result<Json<RunReport>, ApiError> {
    state.store.get().await.map(Json).ok_or(ApiError::NoRun)
}

/// Stop in-flight runs
///
/// Each run stops after its current restart and still returns its best
/// result so far, marked as cancelled.
#[utoipa::path(
    post,
    path = "/api/cancel",
    responses(
        (status = 200, description = "Cancellation requested", body = CancelResponse),
    ),
    tag = "Optimization"
)]
pub async fn handle_cancel(State(state): State<AppState>) -> Json<CancelResponse> {
    let cancelled = state.optimizer.cancel_all();
    tracing::info!(cancelled, "Cancellation requested");
    Json(CancelResponse { cancelled })
}
