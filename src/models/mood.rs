use serde::Serialize;

/// Daily Subjective Happiness Scale reading (1.0 - 7.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShsScore(pub f64);

/// One half of a weekly PANAS-SF reading (5 - 25)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PanasScore(pub i32);

/// Monthly Oxford Happiness Questionnaire reading (1.0 - 6.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OhqScore(pub f64);

pub const EMOJI_SCALE_MAX: f64 = 5.0;
pub const SHS_SCALE_MAX: f64 = 7.0;

impl ShsScore {
    pub fn as_percent(self) -> f64 {
        self.0 / SHS_SCALE_MAX * 100.0
    }
}

/// Positive and negative affect for the week. Only exists when both halves
/// of the PANAS-SF were logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyAffect {
    pub positive: PanasScore,
    pub negative: PanasScore,
}

impl WeeklyAffect {
    pub fn positive_leads(&self) -> bool {
        self.positive > self.negative
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WeeklyStatus {
    Positive,
    Mixed,
}

impl WeeklyStatus {
    pub fn from_affect(affect: Option<WeeklyAffect>) -> Self {
        match affect {
            Some(a) if a.positive_leads() => WeeklyStatus::Positive,
            Some(_) | None => WeeklyStatus::Mixed,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoodEntry {
    pub mood_score: i32,
    pub hours_sleep: f64,
    pub shs_score: Option<ShsScore>,
    pub panas_pa: Option<PanasScore>,
    pub panas_na: Option<PanasScore>,
    pub ohq_score: Option<OhqScore>,
}

impl MoodEntry {
    /// Emoji mood on a 0-100 scale.
    pub fn mood_percent(&self) -> f64 {
        f64::from(self.mood_score) / EMOJI_SCALE_MAX * 100.0
    }

    pub fn weekly_affect(&self) -> Option<WeeklyAffect> {
        match (self.panas_pa, self.panas_na) {
            (Some(positive), Some(negative)) => Some(WeeklyAffect { positive, negative }),
            (Some(_), None) | (None, Some(_)) | (None, None) => None,
        }
    }
}

/// Chronologically ordered snapshot of a user's entries. The last entry is
/// the latest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoodHistory {
    entries: Vec<MoodEntry>,
}

impl MoodHistory {
    pub fn new(entries: Vec<MoodEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&MoodEntry> {
        self.entries.last()
    }

    pub fn mood_scores(&self) -> Vec<f64> {
        self.entries.iter().map(|e| f64::from(e.mood_score)).collect()
    }

    pub fn sleep_hours(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.hours_sleep).collect()
    }
}

impl From<Vec<MoodEntry>> for MoodHistory {
    fn from(entries: Vec<MoodEntry>) -> Self {
        Self::new(entries)
    }
}

#[cfg(test)]
pub(crate) fn entry(mood_score: i32, hours_sleep: f64) -> MoodEntry {
    MoodEntry {
        mood_score,
        hours_sleep,
        shs_score: None,
        panas_pa: None,
        panas_na: None,
        ohq_score: None,
    }
}
