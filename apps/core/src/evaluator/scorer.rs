//! Shared shape of the dimension scorers.

use super::lexicon::{Category, Dimension, Lexicon};
use super::normalizer::NormalizedText;

pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 100;

/// Neutral midpoint; scores are deviations from it, not accumulations from zero.
pub const BASELINE: i32 = 50;

/// A pure, deterministic scorer for one dimension.
///
/// Implementations must be total: every input, including empty and
/// adversarially long text, yields a score in `0..=100`.
pub trait DimensionScorer: Send + Sync {
    fn dimension(&self) -> Dimension;

    fn score(&self, text: &NormalizedText) -> u8;
}

/// Weight applied per lexicon hit, with a ceiling on the total contribution.
#[derive(Debug, Clone, Copy)]
pub struct CappedWeight {
    pub per_hit: i32,
    pub cap: i32,
}

impl CappedWeight {
    pub const fn new(per_hit: i32, cap: i32) -> Self {
        Self { per_hit, cap }
    }

    pub fn apply(&self, hits: usize) -> i32 {
        let hits = i32::try_from(hits).unwrap_or(i32::MAX);
        hits.saturating_mul(self.per_hit).min(self.cap)
    }
}

/// Capped contribution of `category` hits in `text`.
pub fn capped_hits(category: Category, weight: CappedWeight, text: &NormalizedText) -> i32 {
    weight.apply(Lexicon::global().count(category, text))
}

pub fn clamp_score(raw: i32) -> u8 {
    // clamped into 0..=100, so the cast cannot truncate
    raw.clamp(MIN_SCORE, MAX_SCORE) as u8
}
