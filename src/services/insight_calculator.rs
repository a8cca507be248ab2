//! # Insight Calculator
//!
//! Turns a mood history into a short natural-language insight:
//!
//! 1. Too little history → explicit insufficient-data result, nothing computed.
//! 2. Pearson correlation of mood score vs. hours slept across the history.
//! 3. Correlation band picks the base sentence.
//! 4. The latest entry alone adds SHS alignment, weekly affect and a
//!    mood-specific opener.

use serde::Serialize;

use crate::models::mood::{MoodEntry, MoodHistory, WeeklyStatus};
use crate::services::insight_policy::{InsightPolicy, LOW_MOOD_MAX, MAX_MOOD};
use crate::services::statistics::pearson;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationBand {
    StrongPositive,
    StrongNegative,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Complete,
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsightResult {
    pub insight_text: String,
    pub correlation_score: f64,
    pub band: Option<CorrelationBand>,
    pub latest_shs: Option<f64>,
    pub latest_ohq: Option<f64>,
    pub weekly_status: Option<WeeklyStatus>,
    pub status: AnalysisStatus,
    pub entries_needed: usize,
}

#[derive(Debug, Clone)]
pub struct InsightCalculator {
    policy: InsightPolicy,
}

impl InsightCalculator {
    pub fn new(policy: InsightPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &InsightPolicy {
        &self.policy
    }

    pub fn analyze(&self, history: &MoodHistory) -> InsightResult {
        let latest = match history.latest() {
            Some(latest) if history.len() >= self.policy.min_entries => latest,
            _ => return self.insufficient(history),
        };

        let correlation = pearson(&history.mood_scores(), &history.sleep_hours());
        let band = self.classify(correlation);

        let mut fragments: Vec<&'static str> = Vec::with_capacity(4);
        if self.policy.mood_prefix {
            fragments.extend(mood_sentence(latest.mood_score));
        }
        fragments.extend(self.alignment_sentence(latest));
        fragments.extend(latest.weekly_affect().map(|affect| {
            if affect.positive_leads() {
                "Your positive emotions are leading this week!"
            } else {
                "You've had a heavy emotional load this week."
            }
        }));

        let base = format!(
            "Sleep correlation: {}. {}",
            format_coefficient(correlation),
            band_sentence(band)
        );

        let mut insight_text = fragments.join(" ");
        if !insight_text.is_empty() {
            insight_text.push(' ');
        }
        insight_text.push_str(&base);

        InsightResult {
            insight_text: insight_text.trim().to_string(),
            correlation_score: correlation,
            band: Some(band),
            latest_shs: latest.shs_score.map(|s| s.0),
            latest_ohq: latest.ohq_score.map(|s| s.0),
            weekly_status: Some(WeeklyStatus::from_affect(latest.weekly_affect())),
            status: AnalysisStatus::Complete,
            entries_needed: 0,
        }
    }

    pub fn classify(&self, correlation: f64) -> CorrelationBand {
        if correlation > self.policy.strong_positive_threshold {
            CorrelationBand::StrongPositive
        } else if correlation < self.policy.strong_negative_threshold {
            CorrelationBand::StrongNegative
        } else {
            CorrelationBand::Weak
        }
    }

    fn insufficient(&self, history: &MoodHistory) -> InsightResult {
        let needed = self.policy.min_entries.saturating_sub(history.len()).max(1);
        let noun = if needed == 1 { "entry" } else { "entries" };
        let insight_text = if history.is_empty() {
            format!("Start logging to see your analysis! Log {needed} {noun} to unlock your first insight.")
        } else {
            format!("Log {needed} more {noun} to see your analysis!")
        };

        InsightResult {
            insight_text,
            correlation_score: 0.0,
            band: None,
            latest_shs: None,
            latest_ohq: None,
            weekly_status: None,
            status: AnalysisStatus::InsufficientData,
            entries_needed: needed,
        }
    }

    fn alignment_sentence(&self, latest: &MoodEntry) -> Option<&'static str> {
        let shs = latest.shs_score?;
        let gap = (latest.mood_percent() - shs.as_percent()).abs();
        Some(if gap < self.policy.alignment_tolerance_pct {
            "Your daily log strongly aligns with your happiness assessment."
        } else {
            "Your quick log differs from your assessment; you might be feeling complex emotions today."
        })
    }
}

fn mood_sentence(mood_score: i32) -> Option<&'static str> {
    match mood_score {
        s if s <= LOW_MOOD_MAX => Some("Sorry today feels tough. Be gentle with yourself."),
        MAX_MOOD => Some("You're having a great day!"),
        _ => None,
    }
}

fn band_sentence(band: CorrelationBand) -> &'static str {
    match band {
        CorrelationBand::StrongPositive => "Quality sleep is clearly boosting your mood.",
        CorrelationBand::StrongNegative => {
            "More sleep seems to go with lower mood for you, which may be worth reviewing."
        }
        CorrelationBand::Weak => "No clear link yet, so keep logging consistently.",
    }
}

fn format_coefficient(r: f64) -> String {
    let s = format!("{r:.2}");
    if s == "-0.00" {
        "0.00".to_string()
    } else {
        s
    }
}
