//! Feedback Report - Output structure for message evaluation.
//!
//! Holds the three dimension scores plus the strengths and improvement hints
//! derived from them, localized to the language of the message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lexicon::{Dimension, Language};

/// At or above this a dimension is reported as a strength.
pub const STRENGTH_THRESHOLD: u8 = 70;

/// Below this a dimension is reported as needing improvement.
pub const IMPROVEMENT_THRESHOLD: u8 = 50;

/// The three dimension scores of one message, each in `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackScore {
    pub empathy: u8,
    pub clarity: u8,
    pub effectiveness: u8,
}

impl FeedbackScore {
    pub fn get(&self, dimension: Dimension) -> u8 {
        match dimension {
            Dimension::Empathy => self.empathy,
            Dimension::Clarity => self.clarity,
            Dimension::Effectiveness => self.effectiveness,
        }
    }

    /// Rounded mean of the three dimensions
    pub fn overall(&self) -> u8 {
        let sum = u32::from(self.empathy) + u32::from(self.clarity) + u32::from(self.effectiveness);
        // mean of three values <= 100 always fits in u8
        ((sum + 1) / 3) as u8
    }

    fn dimensions(&self) -> impl Iterator<Item = (Dimension, u8)> + '_ {
        [Dimension::Empathy, Dimension::Clarity, Dimension::Effectiveness]
            .into_iter()
            .map(move |d| (d, self.get(d)))
    }
}

fn strength_text(dimension: Dimension, language: Language) -> &'static str {
    let hebrew = matches!(language, Language::Hebrew | Language::Mixed);
    match (dimension, hebrew) {
        (Dimension::Empathy, false) => "You acknowledged the other person's feelings.",
        (Dimension::Empathy, true) => "הבעת הבנה לרגשות של הצד השני.",
        (Dimension::Clarity, false) => "Your message was clear and well structured.",
        (Dimension::Clarity, true) => "המסר שלך היה ברור ומאורגן.",
        (Dimension::Effectiveness, false) => "You proposed concrete next steps.",
        (Dimension::Effectiveness, true) => "הצעת צעדים מעשיים להמשך.",
    }
}

fn improvement_text(dimension: Dimension, language: Language) -> &'static str {
    let hebrew = matches!(language, Language::Hebrew | Language::Mixed);
    match (dimension, hebrew) {
        (Dimension::Empathy, false) => {
            "Try acknowledging how the other person feels before giving direction."
        }
        (Dimension::Empathy, true) => "נסו להכיר ברגשות של הצד השני לפני שמכוונים לפעולה.",
        (Dimension::Clarity, false) => "Organize your message into clear points and avoid filler words.",
        (Dimension::Clarity, true) => "חלקו את המסר לנקודות ברורות והימנעו ממילות מילוי.",
        (Dimension::Effectiveness, false) => "Commit to a specific action instead of hedging.",
        (Dimension::Effectiveness, true) => "הציעו פעולה מוגדרת במקום להסס.",
    }
}

/// Complete evaluation of one message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub scores: FeedbackScore,

    /// Rounded mean of the three scores
    pub overall: u8,

    /// Detected language of the message; drives the language of the hints
    pub language: Language,

    pub strengths: Vec<String>,

    pub improvements: Vec<String>,

    /// Processing time in microseconds
    pub processing_time_us: u64,

    pub evaluated_at: DateTime<Utc>,
}

impl FeedbackReport {
    /// Builds a report, deriving strengths and improvements from thresholds
    pub fn from_scores(scores: FeedbackScore, language: Language) -> Self {
        let mut strengths = Vec::new();
        let mut improvements = Vec::new();

        for (dimension, score) in scores.dimensions() {
            if score >= STRENGTH_THRESHOLD {
                strengths.push(strength_text(dimension, language).to_string());
            } else if score < IMPROVEMENT_THRESHOLD {
                improvements.push(improvement_text(dimension, language).to_string());
            }
        }

        Self {
            scores,
            overall: scores.overall(),
            language,
            strengths,
            improvements,
            processing_time_us: 0,
            evaluated_at: Utc::now(),
        }
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Empathy: {}, Clarity: {}, Effectiveness: {}, Overall: {}, Language: {}",
            self.scores.empathy,
            self.scores.clarity,
            self.scores.effectiveness,
            self.overall,
            self.language.code()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(empathy: u8, clarity: u8, effectiveness: u8) -> FeedbackScore {
        FeedbackScore {
            empathy,
            clarity,
            effectiveness,
        }
    }

    #[test]
    fn test_overall_is_rounded_mean() {
        assert_eq!(scores(50, 50, 50).overall(), 50);
        assert_eq!(scores(100, 100, 100).overall(), 100);
        assert_eq!(scores(0, 0, 0).overall(), 0);
        assert_eq!(scores(70, 70, 71).overall(), 70);
        assert_eq!(scores(70, 71, 71).overall(), 71);
    }

    #[test]
    fn test_thresholds() {
        let report = FeedbackReport::from_scores(scores(85, 49, 60), Language::English);
        assert_eq!(report.strengths.len(), 1);
        assert_eq!(report.improvements.len(), 1);
        assert!(report.strengths[0].contains("feelings"));
        assert!(report.improvements[0].contains("filler"));
    }

    #[test]
    fn test_boundaries() {
        let report = FeedbackReport::from_scores(scores(70, 50, 69), Language::English);
        assert_eq!(report.strengths.len(), 1);
        assert!(report.improvements.is_empty());
    }

    #[test]
    fn test_hebrew_hints() {
        let report = FeedbackReport::from_scores(scores(90, 20, 50), Language::Hebrew);
        assert_eq!(report.strengths, vec!["הבעת הבנה לרגשות של הצד השני."]);
        assert_eq!(report.improvements, vec!["חלקו את המסר לנקודות ברורות והימנעו ממילות מילוי."]);
    }

    #[test]
    fn test_summary() {
        let report = FeedbackReport::from_scores(scores(50, 50, 50), Language::Unknown);
        let summary = report.summary();
        assert!(summary.contains("Empathy: 50"));
        assert!(summary.contains("Language: unknown"));
    }
}
