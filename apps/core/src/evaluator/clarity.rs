//! Clarity scoring.
//!
//! Starts from a baseline derived from message length, then rewards
//! structure and concrete language and penalizes fillers, repetition and
//! run-on sentences. Every penalty is capped per category.

use super::lexicon::{Category, Dimension, Lexicon};
use super::normalizer::{normalize, NormalizedText};
use super::scorer::{capped_hits, clamp_score, CappedWeight, DimensionScorer};

const EMPTY_BASELINE: i32 = 20;
const TERSE_BASELINE: i32 = 35;
const BRIEF_BASELINE: i32 = 50;
const GOOD_BASELINE: i32 = 65;
const RAMBLING_BASELINE: i32 = 55;

/// Upper word bound (inclusive) of each length band.
const TERSE_MAX_WORDS: usize = 3;
const BRIEF_MAX_WORDS: usize = 7;
const GOOD_MAX_WORDS: usize = 150;

/// A message with this many list items is structured, not terse.
const LIST_MIN_ITEMS: usize = 2;

const STRUCTURE: CappedWeight = CappedWeight::new(7, 20);
const CONCRETE: CappedWeight = CappedWeight::new(6, 15);
const FILLER: CappedWeight = CappedWeight::new(5, 20);

const REPETITION_MIN_WORDS: usize = 20;
const REPETITION_MAX_DIVERSITY: f32 = 0.3;
const REPETITION_PENALTY: i32 = 15;

const RUN_ON_SENTENCE_WORDS: f32 = 35.0;
const RUN_ON_PENALTY: i32 = 5;

#[derive(Debug, Default, Clone, Copy)]
pub struct ClarityScorer;

impl ClarityScorer {
    fn length_baseline(word_count: usize) -> i32 {
        match word_count {
            0 => EMPTY_BASELINE,
            n if n <= TERSE_MAX_WORDS => TERSE_BASELINE,
            n if n <= BRIEF_MAX_WORDS => BRIEF_BASELINE,
            n if n <= GOOD_MAX_WORDS => GOOD_BASELINE,
            _ => RAMBLING_BASELINE,
        }
    }

    /// Short numbered lists start from the good-length baseline.
    fn baseline(text: &NormalizedText) -> i32 {
        if text.list_items >= LIST_MIN_ITEMS && text.word_count <= GOOD_MAX_WORDS {
            return GOOD_BASELINE;
        }
        Self::length_baseline(text.word_count)
    }
}

impl DimensionScorer for ClarityScorer {
    fn dimension(&self) -> Dimension {
        Dimension::Clarity
    }

    fn score(&self, text: &NormalizedText) -> u8 {
        let structure_hits = Lexicon::global().count(Category::Structure, text) + text.list_items;

        let repetition = if text.word_count >= REPETITION_MIN_WORDS
            && text.lexical_diversity() < REPETITION_MAX_DIVERSITY
        {
            REPETITION_PENALTY
        } else {
            0
        };

        let run_on = if text.avg_sentence_length() > RUN_ON_SENTENCE_WORDS {
            RUN_ON_PENALTY
        } else {
            0
        };

        let raw = Self::baseline(text)
            + STRUCTURE.apply(structure_hits)
            + capped_hits(Category::Concrete, CONCRETE, text)
            - capped_hits(Category::Filler, FILLER, text)
            - repetition
            - run_on;

        clamp_score(raw)
    }
}

/// Clarity score of a raw message, in `0..=100`.
pub fn calculate_clarity_score(text: &str) -> u8 {
    ClarityScorer.score(&normalize(text))
}
