//! Effectiveness scoring.
//!
//! Rewards action- and solution-oriented language. Hedges compound: the
//! k-th hedge costs `HEDGE_STEP * k`, so stacked uncertainty is punished
//! harder than the capped penalties of the other dimensions.

use super::lexicon::{Category, Dimension, Lexicon};
use super::normalizer::{normalize, NormalizedText};
use super::scorer::{capped_hits, clamp_score, CappedWeight, DimensionScorer, BASELINE};

const ACTION: CappedWeight = CappedWeight::new(10, 30);
const SOLUTION: CappedWeight = CappedWeight::new(10, 20);
const HEDGE_STEP: i64 = 6;

#[derive(Debug, Default, Clone, Copy)]
pub struct EffectivenessScorer;

impl EffectivenessScorer {
    /// Total penalty for `hedges` hedges: `HEDGE_STEP * (1 + 2 + ... + n)`.
    fn hedge_penalty(hedges: usize) -> i32 {
        let n = i64::try_from(hedges).unwrap_or(i64::MAX / 2);
        let total = (n.saturating_mul(n.saturating_add(1)) / 2).saturating_mul(HEDGE_STEP);
        i32::try_from(total).unwrap_or(i32::MAX)
    }
}

impl DimensionScorer for EffectivenessScorer {
    fn dimension(&self) -> Dimension {
        Dimension::Effectiveness
    }

    fn score(&self, text: &NormalizedText) -> u8 {
        let hedges = Lexicon::global().count(Category::Hedge, text);

        let raw = (BASELINE
            + capped_hits(Category::Action, ACTION, text)
            + capped_hits(Category::Solution, SOLUTION, text))
        .saturating_sub(Self::hedge_penalty(hedges));

        clamp_score(raw)
    }
}

/// Effectiveness score of a raw message, in `0..=100`.
pub fn calculate_effectiveness_score(text: &str) -> u8 {
    EffectivenessScorer.score(&normalize(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_language_scores_high() {
        let score = calculate_effectiveness_score(
            "Let's start with a clear plan. I suggest we fix the login issue first; here is a solution that will work.",
        );
        assert!(score > 60, "got {}", score);
    }

    #[test]
    fn test_stacked_hedges_score_low() {
        let score = calculate_effectiveness_score(
            "Maybe we could try something, perhaps later. I guess it seems that it might be possible that it works.",
        );
        assert!(score < 60, "got {}", score);
    }

    #[test]
    fn test_hedges_compound() {
        assert_eq!(EffectivenessScorer::hedge_penalty(0), 0);
        assert_eq!(EffectivenessScorer::hedge_penalty(1), 6);
        assert_eq!(EffectivenessScorer::hedge_penalty(2), 18);
        assert_eq!(EffectivenessScorer::hedge_penalty(3), 36);

        assert_eq!(calculate_effectiveness_score("Maybe."), 44);
        assert_eq!(calculate_effectiveness_score("Maybe, perhaps."), 32);
    }

    #[test]
    fn test_huge_hedge_count_does_not_overflow() {
        assert_eq!(EffectivenessScorer::hedge_penalty(usize::MAX), i32::MAX);
        let text = "maybe ".repeat(5_000);
        assert_eq!(calculate_effectiveness_score(&text), 0);
    }

    #[test]
    fn test_neutral_and_empty_are_baseline() {
        assert_eq!(calculate_effectiveness_score(""), 50);
        assert_eq!(calculate_effectiveness_score("The report is on the desk."), 50);
    }

    #[test]
    fn test_hebrew_effectiveness() {
        let decisive = calculate_effectiveness_score("נתחיל מהצעד הראשון. אני מציע פתרון שיעבוד.");
        let hesitant = calculate_effectiveness_score("אולי, כנראה, יכול להיות שזה לא בטוח");
        assert!(decisive > 60, "got {}", decisive);
        assert!(hesitant < 60, "got {}", hesitant);
    }
}
