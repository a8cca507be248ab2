use axum::{extract::rejection::JsonRejection, extract::State, Json};
use validator::Validate;

use crate::dto::{AnalysisResponse, MoodEntryRequest, MoodHistoryRequest};
use crate::error::AppResult;
use crate::models::mood::{MoodEntry, MoodHistory};
use crate::services::insight_policy::InsightPolicy;
use crate::AppState;

/// POST /api/v1/analyze_mood
pub async fn analyze_mood(
    State(state): State<AppState>,
    payload: Result<Json<MoodHistoryRequest>, JsonRejection>,
) -> AppResult<Json<AnalysisResponse>> {
    let Json(body) = payload?;
    body.validate()?;

    Ok(Json(run_analysis(&state, &MoodHistory::from(body))))
}

/// POST /api/v1/analyze_entry
///
/// Analyzes a lone entry as a one-entry history. No sample rows are made up
/// around it, so under the default policy this asks for more data.
pub async fn analyze_entry(
    State(state): State<AppState>,
    payload: Result<Json<MoodEntryRequest>, JsonRejection>,
) -> AppResult<Json<AnalysisResponse>> {
    let Json(body) = payload?;
    body.validate()?;

    let history = MoodHistory::new(vec![MoodEntry::from(body)]);
    Ok(Json(run_analysis(&state, &history)))
}

/// GET /api/v1/policy
pub async fn get_policy(State(state): State<AppState>) -> Json<InsightPolicy> {
    Json(state.calculator.policy().clone())
}

fn run_analysis(state: &AppState, history: &MoodHistory) -> AnalysisResponse {
    let result = state.calculator.analyze(history);

    tracing::debug!(
        entries = history.len(),
        correlation = result.correlation_score,
        band = ?result.band,
        status = ?result.status,
        "Mood history analyzed"
    );

    AnalysisResponse::new(result, state.calculator.policy().version)
}
