//! Bilingual lexicon tables used as scoring signals.
//!
//! Each entry is a word or phrase tagged with a language and a category; the
//! category determines which dimension it feeds and whether it rewards or
//! penalizes. Matching is done on normalized token windows, never on raw
//! substrings, so `like` does not fire inside `likely`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use super::normalizer::{tokenize, NormalizedText};

/// Language of a lexicon entry or of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Hebrew,
    English,
    Mixed,
    Unknown,
}

impl Language {
    /// Returns the language code
    pub fn code(&self) -> &'static str {
        match self {
            Language::Hebrew => "he",
            Language::English => "en",
            Language::Mixed => "mixed",
            Language::Unknown => "unknown",
        }
    }
}

/// Scored dimension of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Empathy,
    Clarity,
    Effectiveness,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Dimension::Empathy => "empathy",
            Dimension::Clarity => "clarity",
            Dimension::Effectiveness => "effectiveness",
        };
        write!(f, "{}", label)
    }
}

/// Whether a hit raises or lowers the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Reward,
    Penalty,
}

/// Lexicon category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Validation and understanding ("I understand")
    Understanding,
    /// Naming the other party's emotional state ("frustrated")
    EmotionalAwareness,
    /// Imperatives and pressure ("you must")
    Command,
    /// Ordinals and signposting ("first", "second")
    Structure,
    /// Concrete-language markers ("for example")
    Concrete,
    /// Filler words ("um", "you know")
    Filler,
    /// Action-oriented language ("let's")
    Action,
    /// Solution-focused language ("solution")
    Solution,
    /// Vague or hedging language ("maybe")
    Hedge,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Understanding,
        Category::EmotionalAwareness,
        Category::Command,
        Category::Structure,
        Category::Concrete,
        Category::Filler,
        Category::Action,
        Category::Solution,
        Category::Hedge,
    ];

    pub fn dimension(&self) -> Dimension {
        match self {
            Category::Understanding | Category::EmotionalAwareness | Category::Command => {
                Dimension::Empathy
            }
            Category::Structure | Category::Concrete | Category::Filler => Dimension::Clarity,
            Category::Action | Category::Solution | Category::Hedge => Dimension::Effectiveness,
        }
    }

    pub fn polarity(&self) -> Polarity {
        match self {
            Category::Command | Category::Filler | Category::Hedge => Polarity::Penalty,
            _ => Polarity::Reward,
        }
    }

    fn phrases(&self, language: Language) -> &'static [&'static str] {
        match (self, language) {
            (Category::Understanding, Language::English) => UNDERSTANDING_EN,
            (Category::Understanding, Language::Hebrew) => UNDERSTANDING_HE,
            (Category::EmotionalAwareness, Language::English) => EMOTION_EN,
            (Category::EmotionalAwareness, Language::Hebrew) => EMOTION_HE,
            (Category::Command, Language::English) => COMMAND_EN,
            (Category::Command, Language::Hebrew) => COMMAND_HE,
            (Category::Structure, Language::English) => STRUCTURE_EN,
            (Category::Structure, Language::Hebrew) => STRUCTURE_HE,
            (Category::Concrete, Language::English) => CONCRETE_EN,
            (Category::Concrete, Language::Hebrew) => CONCRETE_HE,
            (Category::Filler, Language::English) => FILLER_EN,
            (Category::Filler, Language::Hebrew) => FILLER_HE,
            (Category::Action, Language::English) => ACTION_EN,
            (Category::Action, Language::Hebrew) => ACTION_HE,
            (Category::Solution, Language::English) => SOLUTION_EN,
            (Category::Solution, Language::Hebrew) => SOLUTION_HE,
            (Category::Hedge, Language::English) => HEDGE_EN,
            (Category::Hedge, Language::Hebrew) => HEDGE_HE,
            (_, Language::Mixed | Language::Unknown) => &[],
        }
    }
}

// Phrases within a category must not contain one another, or a single
// occurrence would be counted twice.

const UNDERSTANDING_EN: &[&str] = &[
    "i understand",
    "that makes sense",
    "your feelings are valid",
    "i hear you",
    "i see what you mean",
    "how you feel",
    "this sounds",
    "that sounds",
    "i can imagine",
    "i'm sorry",
    "i am sorry",
    "thank you for sharing",
    "that's understandable",
    "it's understandable",
    "you're not alone",
];

const UNDERSTANDING_HE: &[&str] = &[
    "אני מבין",
    "אני מבינה",
    "זה נשמע קשה",
    "אני שומע אותך",
    "אני שומעת אותך",
    "זה הגיוני",
    "הרגשות שלך",
    "מובן לי",
    "אני מצטער",
    "אני מצטערת",
    "תודה ששיתפת",
    "אני יכול לדמיין",
    "אני יכולה לדמיין",
];

const EMOTION_EN: &[&str] = &[
    "frustrated",
    "frustrating",
    "worried",
    "anxious",
    "upset",
    "stressed",
    "overwhelmed",
    "scared",
    "afraid",
    "disappointed",
    "angry",
    "sad",
    "hurt",
    "difficult",
    "tough",
    "painful",
    "concerned",
    "emotions",
];

const EMOTION_HE: &[&str] = &[
    "מרגיש",
    "מרגישה",
    "מרגישים",
    "מתוסכל",
    "מתוסכלת",
    "מודאג",
    "מודאגת",
    "לחוץ",
    "לחוצה",
    "כועס",
    "כועסת",
    "עצוב",
    "עצובה",
    "פגוע",
    "פגועה",
    "קשה",
    "מפחד",
    "מפחדת",
    "מאוכזב",
    "מאוכזבת",
    "רגשות",
];

const COMMAND_EN: &[&str] = &[
    "must",
    "have to",
    "you need to",
    "you should",
    "do it",
    "do this",
    "immediately",
    "right now",
    "stop",
    "listen to me",
    "no excuses",
];

const COMMAND_HE: &[&str] = &[
    "תעשה",
    "תעשי",
    "חייב",
    "חייבת",
    "חייבים",
    "תפסיק",
    "תפסיקי",
    "מיד",
    "תקשיב לי",
    "תקשיבי לי",
    "בלי תירוצים",
];

const STRUCTURE_EN: &[&str] = &[
    "first",
    "firstly",
    "second",
    "secondly",
    "third",
    "thirdly",
    "fourth",
    "finally",
    "to summarize",
    "in summary",
];

const STRUCTURE_HE: &[&str] = &[
    "ראשית",
    "שנית",
    "שלישית",
    "רביעית",
    "לבסוף",
    "לסיכום",
    "קודם כל",
];

const CONCRETE_EN: &[&str] = &[
    "specifically",
    "for example",
    "for instance",
    "in particular",
    "such as",
    "exactly",
    "precisely",
    "e.g",
];

const CONCRETE_HE: &[&str] = &[
    "לדוגמה",
    "למשל",
    "ספציפית",
    "בפרט",
    "כלומר",
    "במדויק",
    "באופן ספציפי",
];

const FILLER_EN: &[&str] = &[
    "like",
    "um",
    "umm",
    "uh",
    "uhh",
    "er",
    "hmm",
    "you know",
    "basically",
    "kind of",
    "sort of",
    "literally",
    "whatever",
];

const FILLER_HE: &[&str] = &["כאילו", "אממ", "אמ", "אה", "נו", "יעני", "בקיצר", "כזה"];

const ACTION_EN: &[&str] = &[
    "let's",
    "let us",
    "i suggest",
    "i recommend",
    "i propose",
    "next we will",
    "next step",
    "action plan",
    "i will",
    "we can start",
    "start by",
    "how about we",
];

const ACTION_HE: &[&str] = &[
    "נעשה",
    "אציע",
    "נתחיל",
    "אני מציע",
    "אני מציעה",
    "הצעד הבא",
    "תוכנית פעולה",
    "נבדוק",
    "נקבע",
    "אטפל",
];

const SOLUTION_EN: &[&str] = &[
    "solution",
    "solutions",
    "solve",
    "resolve",
    "fix",
    "this approach will work",
    "workaround",
];

const SOLUTION_HE: &[&str] = &[
    "פתרון",
    "פתרונות",
    "לפתור",
    "נפתור",
    "הגישה הזו תעבוד",
    "זה יעבוד",
];

const HEDGE_EN: &[&str] = &[
    "maybe",
    "perhaps",
    "i guess",
    "might",
    "possible that",
    "seems",
    "probably",
    "possibly",
    "not sure",
    "could be",
    "i suppose",
    "hopefully",
];

const HEDGE_HE: &[&str] = &[
    "אולי",
    "נראה לי",
    "יכול להיות",
    "לא בטוח",
    "לא בטוחה",
    "כנראה",
    "אני מניח",
    "אני מניחה",
    "ייתכן",
    "מן הסתם",
];

/// Hebrew one-letter proclitics: and, the, that, in, to, from, as.
const HEBREW_PROCLITICS: &[char] = &['ו', 'ה', 'ש', 'ב', 'ל', 'מ', 'כ'];

/// Entries shorter than this never match through a stripped proclitic, so the
/// filler `אה` does not fire inside the name `לאה`.
const MIN_PROCLITIC_STEM: usize = 3;

/// Words that read as proclitic + lexicon entry but are unrelated words:
/// request (not "in hard"), makes difficult, to press, to charge, binding.
const HEBREW_HOMOGRAPHS: &[&str] = &["בקשה", "מקשה", "ללחוץ", "לחייב", "מחייב"];

/// A single static lexicon entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LexiconEntry {
    pub phrase: &'static str,
    pub language: Language,
    pub category: Category,
}

impl LexiconEntry {
    pub fn dimension(&self) -> Dimension {
        self.category.dimension()
    }

    pub fn polarity(&self) -> Polarity {
        self.category.polarity()
    }
}

/// Tokenized phrase ready for window matching
struct Phrase {
    language: Language,
    words: Vec<String>,
    char_lens: Vec<usize>,
}

impl Phrase {
    fn new(language: Language, phrase: &str) -> Self {
        let words = tokenize(phrase);
        let char_lens = words.iter().map(|w| w.chars().count()).collect();
        Self {
            language,
            words,
            char_lens,
        }
    }

    fn word_matches(&self, index: usize, token: &str) -> bool {
        let word = &self.words[index];
        if token == word {
            return true;
        }
        if self.language != Language::Hebrew
            || self.char_lens[index] < MIN_PROCLITIC_STEM
            || HEBREW_HOMOGRAPHS.contains(&token)
        {
            return false;
        }
        let mut chars = token.chars();
        match chars.next() {
            Some(first) if HEBREW_PROCLITICS.contains(&first) => chars.as_str() == word,
            _ => false,
        }
    }

    fn count_in(&self, tokens: &[String]) -> usize {
        let len = self.words.len();
        if len == 0 || tokens.len() < len {
            return 0;
        }
        tokens
            .windows(len)
            .filter(|window| {
                window
                    .iter()
                    .enumerate()
                    .all(|(i, token)| self.word_matches(i, token))
            })
            .count()
    }
}

/// Compiled lexicon, indexed by category
pub struct Lexicon {
    phrases: HashMap<Category, Vec<Phrase>>,
}

static LEXICON: LazyLock<Lexicon> = LazyLock::new(Lexicon::build);

impl Lexicon {
    /// Shared compiled lexicon
    pub fn global() -> &'static Lexicon {
        &LEXICON
    }

    fn build() -> Self {
        let phrases = Category::ALL
            .iter()
            .map(|category| {
                let compiled = [Language::English, Language::Hebrew]
                    .into_iter()
                    .flat_map(|language| {
                        category
                            .phrases(language)
                            .iter()
                            .map(move |phrase| Phrase::new(language, phrase))
                    })
                    .collect();
                (*category, compiled)
            })
            .collect();

        Self { phrases }
    }

    /// Number of occurrences of any phrase in `category`
    pub fn count(&self, category: Category, text: &NormalizedText) -> usize {
        self.phrases
            .get(&category)
            .map(|phrases| phrases.iter().map(|p| p.count_in(&text.tokens)).sum())
            .unwrap_or(0)
    }

    /// Iterates over every static entry
    pub fn entries() -> impl Iterator<Item = LexiconEntry> {
        Category::ALL.into_iter().flat_map(|category| {
            [Language::English, Language::Hebrew]
                .into_iter()
                .flat_map(move |language| {
                    category
                        .phrases(language)
                        .iter()
                        .map(move |phrase| LexiconEntry {
                            phrase: *phrase,
                            language,
                            category,
                        })
                })
        })
    }
}
