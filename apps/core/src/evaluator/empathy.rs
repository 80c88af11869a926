//! Empathy scoring.
//!
//! Rewards validation, naming the other party's feelings and asking
//! questions; penalizes commanding language.

use super::lexicon::{Category, Dimension};
use super::normalizer::{normalize, NormalizedText};
use super::scorer::{capped_hits, clamp_score, CappedWeight, DimensionScorer, BASELINE};

const UNDERSTANDING: CappedWeight = CappedWeight::new(12, 36);
const EMOTIONAL_AWARENESS: CappedWeight = CappedWeight::new(8, 24);
const COMMAND: CappedWeight = CappedWeight::new(10, 40);
const QUESTION_BONUS: i32 = 5;

#[derive(Debug, Default, Clone, Copy)]
pub struct EmpathyScorer;

impl DimensionScorer for EmpathyScorer {
    fn dimension(&self) -> Dimension {
        Dimension::Empathy
    }

    fn score(&self, text: &NormalizedText) -> u8 {
        let question = if text.has_question { QUESTION_BONUS } else { 0 };

        let raw = BASELINE
            + capped_hits(Category::Understanding, UNDERSTANDING, text)
            + capped_hits(Category::EmotionalAwareness, EMOTIONAL_AWARENESS, text)
            + question
            - capped_hits(Category::Command, COMMAND, text);

        clamp_score(raw)
    }
}

/// Empathy score of a raw message, in `0..=100`.
pub fn calculate_empathy_score(text: &str) -> u8 {
    EmpathyScorer.score(&normalize(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empathetic_text_scores_high() {
        let score = calculate_empathy_score("I understand how you feel. This sounds really difficult.");
        assert!(score > 70, "got {}", score);
    }

    #[test]
    fn test_commanding_text_scores_low() {
        let score = calculate_empathy_score("You must do this now. You have to stop.");
        assert!(score < 60, "got {}", score);
    }

    #[test]
    fn test_neutral_text_is_baseline() {
        assert_eq!(calculate_empathy_score("The meeting is on Tuesday."), 50);
        assert_eq!(calculate_empathy_score(""), 50);
    }

    #[test]
    fn test_question_never_lowers_score() {
        let with = calculate_empathy_score("I understand. How are you feeling about it?");
        let without = calculate_empathy_score("I understand. You are feeling it.");
        assert!(with >= without);
        assert_eq!(with, without + 5);
    }

    #[test]
    fn test_command_penalty_is_capped() {
        let score = calculate_empathy_score(&"You must. ".repeat(100));
        assert_eq!(score, 10);
    }

    #[test]
    fn test_hebrew_empathy() {
        let warm = calculate_empathy_score("אני מבין, זה נשמע קשה. איך אתה מרגיש?");
        let cold = calculate_empathy_score("אתה חייב לעשות את זה מיד. תפסיק!");
        assert!(warm > 70, "got {}", warm);
        assert!(cold < 60, "got {}", cold);
    }

    #[test]
    fn test_hebrew_request_is_neutral() {
        // "I have a small request": בקשה is not ב + קשה
        assert_eq!(calculate_empathy_score("יש לי בקשה קטנה"), 50);
    }

    #[test]
    fn test_mixed_language_message() {
        let score = calculate_empathy_score("I understand, אני מבין");
        assert_eq!(score, 74);
    }
}
