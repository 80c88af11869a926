//! Text normalization shared by every scorer.
//!
//! Produces lowercased word tokens, sentence and word counts, question
//! detection and numbered-list markers in a single pass. Works on Hebrew and
//! English (and any mix of the two).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::lexicon::Language;

/// Characters that end a sentence.
const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?', '…', '׃', '؟'];

const QUESTION_MARKS: &[char] = &['?', '؟'];

/// Hebrew maqaf, which joins words the way a hyphen would.
const MAQAF: char = '\u{05BE}';

const INTERROGATIVES_EN: &[&str] = &["who", "what", "when", "where", "why", "how"];

const INTERROGATIVES_HE: &[&str] = &["מה", "איך", "למה", "מתי", "איפה", "מי", "האם"];

/// Normalized view of a message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedText {
    /// Lowercased word tokens with edge punctuation removed
    pub tokens: Vec<String>,
    /// Number of sentences delimited by terminal punctuation
    pub sentence_count: usize,
    /// Number of word tokens
    pub word_count: usize,
    /// Contains a question mark or opens with an interrogative
    pub has_question: bool,
    /// Number of numbered-list markers such as `1.` or `2)`
    pub list_items: usize,
}

impl NormalizedText {
    /// Ratio of unique tokens to total tokens (0.0 for empty text)
    pub fn lexical_diversity(&self) -> f32 {
        if self.tokens.is_empty() {
            return 0.0;
        }
        let unique: HashSet<&String> = self.tokens.iter().collect();
        unique.len() as f32 / self.tokens.len() as f32
    }

    /// Average number of words per sentence (0.0 for empty text)
    pub fn avg_sentence_length(&self) -> f32 {
        if self.sentence_count == 0 {
            return 0.0;
        }
        self.word_count as f32 / self.sentence_count as f32
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Niqqud and cantillation marks, which are dropped before tokenizing.
fn is_hebrew_mark(c: char) -> bool {
    matches!(c, '\u{0591}'..='\u{05BD}' | '\u{05BF}' | '\u{05C1}' | '\u{05C2}' | '\u{05C4}' | '\u{05C5}' | '\u{05C7}')
}

fn is_hebrew_letter(c: char) -> bool {
    matches!(c, '\u{05D0}'..='\u{05EA}')
}

/// Splits text into lowercased word tokens.
///
/// Edge punctuation is stripped but inner apostrophes and gershayim survive,
/// so `let's` and `צה"ל` stay single tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .filter(|c| !is_hebrew_mark(*c))
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' | '\u{05F3}' => '\'',
            '\u{05F4}' | '\u{201C}' | '\u{201D}' => '"',
            MAQAF => ' ',
            other => other,
        })
        .collect::<String>()
        .to_lowercase();

    cleaned
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(|word| word.to_string())
        .collect()
}

/// Counts sentences as non-empty runs between terminal punctuation.
fn count_sentences(text: &str) -> usize {
    text.split(|c: char| SENTENCE_TERMINATORS.contains(&c))
        .filter(|segment| segment.chars().any(|c| c.is_alphanumeric()))
        .count()
}

/// A numbered-list marker such as `2.` or `3)`.
struct ListMarker {
    number: u32,
    closing: char,
    /// At the start of a line or after a sentence end or colon.
    at_boundary: bool,
}

fn list_markers(text: &str) -> Vec<ListMarker> {
    let mut markers = Vec::new();
    for line in text.lines() {
        let mut prev: Option<&str> = None;
        for word in line.split_whitespace() {
            if let Some(closing) = word.chars().last().filter(|c| matches!(*c, '.' | ')')) {
                let digits = &word[..word.len() - closing.len_utf8()];
                let number = (digits.len() <= 2 && digits.chars().all(|c| c.is_ascii_digit()))
                    .then(|| digits.parse::<u32>().ok())
                    .flatten();
                if let Some(number) = number {
                    let at_boundary = prev
                        .map(|p| p.ends_with(|c: char| SENTENCE_TERMINATORS.contains(&c) || c == ':'))
                        .unwrap_or(true);
                    markers.push(ListMarker {
                        number,
                        closing,
                        at_boundary,
                    });
                }
            }
            prev = Some(word);
        }
    }
    markers
}

/// Counts numbered-list items.
///
/// A run of consecutively numbered markers (`1. … 2. … 3.`) counts in full
/// wherever it appears. A lone `1)` always counts; a lone `1.` only at the
/// start of a line or after a sentence/colon, so "it costs 5." is not a list.
fn count_list_items(text: &str) -> usize {
    let markers = list_markers(text);
    let mut count = 0;
    let mut start = 0;
    while start < markers.len() {
        let mut end = start + 1;
        while end < markers.len() && markers[end].number == markers[end - 1].number + 1 {
            end += 1;
        }
        let run = &markers[start..end];
        count += if run.len() >= 2 {
            run.len()
        } else {
            run.iter()
                .filter(|m| m.closing == ')' || m.at_boundary)
                .count()
        };
        start = end;
    }
    count
}

/// Normalizes `text` for scoring. Never fails; empty input yields zero counts.
pub fn normalize(text: &str) -> NormalizedText {
    let tokens = tokenize(text);
    let word_count = tokens.len();

    let opens_with_interrogative = tokens
        .first()
        .map(|first| {
            INTERROGATIVES_EN.contains(&first.as_str()) || INTERROGATIVES_HE.contains(&first.as_str())
        })
        .unwrap_or(false);
    let has_question = text.contains(QUESTION_MARKS) || opens_with_interrogative;

    NormalizedText {
        sentence_count: count_sentences(text),
        word_count,
        has_question,
        list_items: count_list_items(text),
        tokens,
    }
}

/// Detects the dominant script of a message.
///
/// A script must outweigh the other by more than 2x to win; otherwise the text
/// is `Mixed`.
pub fn detect_language(text: &str) -> Language {
    let hebrew = text.chars().filter(|c| is_hebrew_letter(*c)).count();
    let latin = text.chars().filter(|c| c.is_ascii_alphabetic()).count();

    match (hebrew, latin) {
        (0, 0) => Language::Unknown,
        (_, 0) => Language::Hebrew,
        (0, _) => Language::English,
        (h, l) if h > l * 2 => Language::Hebrew,
        (h, l) if l > h * 2 => Language::English,
        _ => Language::Mixed,
    }
}
