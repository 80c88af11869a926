//! Message Evaluator - Main orchestrator for the evaluator module.
//!
//! Normalizes a message once and runs the three dimension scorers over it.
//! The scorers are independent of each other and share no state.

use std::time::Instant;
use tracing::{debug, instrument};

use super::clarity::ClarityScorer;
use super::effectiveness::EffectivenessScorer;
use super::empathy::EmpathyScorer;
use super::feedback::{FeedbackReport, FeedbackScore};
use super::normalizer::{detect_language, normalize};
use super::scorer::DimensionScorer;

/// Runs every dimension scorer over a message
#[derive(Debug, Default, Clone, Copy)]
pub struct MessageEvaluator {
    empathy: EmpathyScorer,
    clarity: ClarityScorer,
    effectiveness: EffectivenessScorer,
}

impl MessageEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores a message without building the full report
    pub fn score(&self, text: &str) -> FeedbackScore {
        let normalized = normalize(text);
        FeedbackScore {
            empathy: self.empathy.score(&normalized),
            clarity: self.clarity.score(&normalized),
            effectiveness: self.effectiveness.score(&normalized),
        }
    }

    /// Evaluates a message and produces a feedback report
    #[instrument(skip_all, fields(chars = text.chars().count()))]
    pub fn evaluate(&self, text: &str) -> FeedbackReport {
        let start = Instant::now();

        let scores = self.score(text);
        let mut report = FeedbackReport::from_scores(scores, detect_language(text));
        report.processing_time_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);

        debug!("Message evaluated: {}", report.summary());
        report
    }
}
