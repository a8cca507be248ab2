//! # MoodMate — Request/Response DTOs
//!
//! All API contract types in one module.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body
//! - `*Response` → serialized to client JSON
//! - All validation is expressed via `validator` derive macros
//! - Optional scale scores are `Option` so missing fields never fail parsing

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::mood::{MoodEntry, MoodHistory, OhqScore, PanasScore, ShsScore, WeeklyStatus};
use crate::services::insight_calculator::{AnalysisStatus, CorrelationBand, InsightResult};
use crate::services::insight_policy::PolicyVersion;

// ============================================================================
// Common
// ============================================================================

/// Static status message (root readiness probe)
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

// ============================================================================
// Analysis
// ============================================================================

/// One logged observation, as sent by the mobile app. The tags are part of
/// the contract and length-checked here; no insight rule reads them.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MoodEntryRequest {
    /// Emoji mood 1-5
    #[validate(range(min = 1, max = 5, message = "mood_score must be 1-5"))]
    pub mood_score: i32,

    #[validate(range(min = 0.0, max = 24.0, message = "hours_sleep must be 0-24"))]
    pub hours_sleep: f64,

    #[validate(length(max = 100, message = "social_tag must be under 100 characters"))]
    pub social_tag: String,

    #[validate(length(max = 100, message = "activity_type must be under 100 characters"))]
    pub activity_type: String,

    /// Daily SHS, 1.0-7.0
    #[validate(range(min = 1.0, max = 7.0, message = "shs_score must be 1.0-7.0"))]
    pub shs_score: Option<f64>,

    /// Weekly PANAS-SF positive affect, 5-25
    #[validate(range(min = 5, max = 25, message = "panas_pa must be 5-25"))]
    pub panas_pa: Option<i32>,

    /// Weekly PANAS-SF negative affect, 5-25
    #[validate(range(min = 5, max = 25, message = "panas_na must be 5-25"))]
    pub panas_na: Option<i32>,

    /// Monthly OHQ, 1.0-6.0
    #[validate(range(min = 1.0, max = 6.0, message = "ohq_score must be 1.0-6.0"))]
    pub ohq_score: Option<f64>,
}

/// POST /api/v1/analyze_mood
#[derive(Debug, Deserialize, Validate)]
pub struct MoodHistoryRequest {
    /// Oldest first; the last entry is the latest
    #[validate]
    pub history: Vec<MoodEntryRequest>,
}

impl From<MoodEntryRequest> for MoodEntry {
    fn from(req: MoodEntryRequest) -> Self {
        MoodEntry {
            mood_score: req.mood_score,
            hours_sleep: req.hours_sleep,
            shs_score: req.shs_score.map(ShsScore),
            panas_pa: req.panas_pa.map(PanasScore),
            panas_na: req.panas_na.map(PanasScore),
            ohq_score: req.ohq_score.map(OhqScore),
        }
    }
}

impl From<MoodHistoryRequest> for MoodHistory {
    fn from(req: MoodHistoryRequest) -> Self {
        MoodHistory::new(req.history.into_iter().map(MoodEntry::from).collect())
    }
}

/// Response for both analyze endpoints
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub insight_text: String,
    pub correlation_score: f64,
    pub latest_shs: Option<f64>,
    pub latest_ohq: Option<f64>,
    pub weekly_status: Option<WeeklyStatus>,
    pub band: Option<CorrelationBand>,
    pub status: AnalysisStatus,
    pub entries_needed: usize,
    pub policy_version: PolicyVersion,
}

impl AnalysisResponse {
    pub fn new(result: InsightResult, policy_version: PolicyVersion) -> Self {
        Self {
            insight_text: result.insight_text,
            correlation_score: result.correlation_score,
            latest_shs: result.latest_shs,
            latest_ohq: result.latest_ohq,
            weekly_status: result.weekly_status,
            band: result.band,
            status: result.status,
            entries_needed: result.entries_needed,
            policy_version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_missing_optionals_deserializes() {
        let json = r#"{"mood_score":4,"hours_sleep":7.5,"social_tag":"Alone","activity_type":"Reading"}"#;
        let req: MoodEntryRequest = serde_json::from_str(json).unwrap();
        assert!(req.shs_score.is_none());
        assert!(req.panas_pa.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_entry_unknown_fields_ignored() {
        let json = r#"{"mood_score":4,"hours_sleep":7.5,"social_tag":"Alone","activity_type":"Reading","emoji":"🙂"}"#;
        assert!(serde_json::from_str::<MoodEntryRequest>(json).is_ok());
    }

    #[test]
    fn test_entry_missing_required_field_fails() {
        let json = r#"{"mood_score":4,"social_tag":"Alone","activity_type":"Reading"}"#;
        assert!(serde_json::from_str::<MoodEntryRequest>(json).is_err());
    }

    #[test]
    fn test_out_of_range_values_fail_validation() {
        let json = r#"{"history":[
            {"mood_score":6,"hours_sleep":7.0,"social_tag":"Friends","activity_type":"Gym"},
            {"mood_score":3,"hours_sleep":-1.0,"social_tag":"Friends","activity_type":"Gym","panas_na":30}
        ]}"#;
        let req: MoodHistoryRequest = serde_json::from_str(json).unwrap();
        let errors = req.validate().unwrap_err().to_string();
        assert!(errors.contains("mood_score"));
        assert!(errors.contains("hours_sleep"));
        assert!(errors.contains("panas_na"));
    }

    #[test]
    fn test_tags_checked_only_on_request() {
        let long_tag = "x".repeat(101);
        let json = format!(
            r#"{{"mood_score":3,"hours_sleep":7.0,"social_tag":"{long_tag}","activity_type":"Gym"}}"#
        );
        let req: MoodEntryRequest = serde_json::from_str(&json).unwrap();
        let errors = req.validate().unwrap_err().to_string();
        assert!(errors.contains("social_tag"));

        let json = r#"{"mood_score":3,"hours_sleep":7.0,"social_tag":"Alone","activity_type":"Gym"}"#;
        let req: MoodEntryRequest = serde_json::from_str(json).unwrap();
        let entry = MoodEntry::from(req);
        assert_eq!(entry.mood_score, 3);
        assert_eq!(entry.hours_sleep, 7.0);
    }

    #[test]
    fn test_request_converts_to_history() {
        let json = r#"{"history":[
            {"mood_score":2,"hours_sleep":5.0,"social_tag":"Alone","activity_type":"Work"},
            {"mood_score":5,"hours_sleep":8.0,"social_tag":"Friends","activity_type":"Hike","shs_score":6.8,"panas_pa":20,"panas_na":8}
        ]}"#;
        let req: MoodHistoryRequest = serde_json::from_str(json).unwrap();
        let history = MoodHistory::from(req);
        assert_eq!(history.len(), 2);
        let latest = history.latest().unwrap();
        assert_eq!(latest.shs_score, Some(ShsScore(6.8)));
        assert!(latest.weekly_affect().unwrap().positive_leads());
    }

    #[test]
    fn test_response_serializes_nulls_and_enums() {
        let resp = AnalysisResponse {
            insight_text: "Log 1 more entry to see your analysis!".into(),
            correlation_score: 0.0,
            latest_shs: None,
            latest_ohq: None,
            weekly_status: Some(WeeklyStatus::Positive),
            band: Some(CorrelationBand::StrongPositive),
            status: AnalysisStatus::InsufficientData,
            entries_needed: 1,
            policy_version: PolicyVersion::Current,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json["latest_shs"].is_null());
        assert_eq!(json["weekly_status"], "Positive");
        assert_eq!(json["band"], "strong_positive");
        assert_eq!(json["status"], "insufficient_data");
        assert_eq!(json["policy_version"], "current");
    }
}
