//! # Evaluator Module
//!
//! Rule-based, non-LLM scoring of simulator chat messages.
//! Scores each message on empathy, clarity and effectiveness (0-100).
//!
//! ## Components
//! - `lexicon`: Bilingual (Hebrew/English) word and phrase tables
//! - `normalizer`: Tokenization, sentence counting, question detection
//! - `scorer`: Shared scorer trait and weighting helpers
//! - `empathy`, `clarity`, `effectiveness`: Dimension scorers
//! - `feedback`: Output data structure
//! - `analyzer`: Main orchestrator

pub mod analyzer;
pub mod clarity;
pub mod effectiveness;
pub mod empathy;
pub mod feedback;
pub mod lexicon;
pub mod normalizer;
pub mod scorer;

pub use analyzer::MessageEvaluator;
pub use clarity::{calculate_clarity_score, ClarityScorer};
pub use effectiveness::{calculate_effectiveness_score, EffectivenessScorer};
pub use empathy::{calculate_empathy_score, EmpathyScorer};
pub use feedback::{FeedbackReport, FeedbackScore};
pub use lexicon::{Category, Dimension, Language, Lexicon, LexiconEntry, Polarity};
pub use normalizer::{detect_language, normalize, NormalizedText};
pub use scorer::DimensionScorer;
