//! Message sanitization and integrity checks.
//!
//! Best-effort textual filtering of user input before it is scored, stored
//! or displayed: script/style blocks and HTML tags are removed, SQL statement
//! fragments are dropped, and the legitimate remainder is preserved. This is
//! a pattern filter, not an HTML or SQL parser.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::AppError;
use crate::models::IntegrityCheck;

/// Default maximum message length, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 1000;

// NOTE: expect() is acceptable for these literals; they are fixed at compile time
static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<\s*(?:script|style)\b[^>]*>.*?<\s*/\s*(?:script|style)\s*>")
        .expect("Invalid regex: script block")
});

static UNTERMINATED_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<\s*(?:script|style)\b.*$").expect("Invalid regex: unterminated script")
});

/// A bare tag (`<b>`, `</p >`, `<br/>`), a tag carrying at least one
/// `name=value` attribute, or a comment/doctype. `a <b or c> d` is left alone.
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?[a-z][a-z0-9-]*\s*/?>|<[a-z][a-z0-9-]*\s[^<>]*=[^<>]*>|<![^<>]*>")
        .expect("Invalid regex: html tag")
});

/// A `;`-delimited segment that opens with a SQL statement.
static SQL_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^\s*(?:drop\s+(?:table|database|schema|view|index)\s+(?:if\s+exists\s+)?[\w.`"\[\]]+\s*(?:cascade\s*)?(?:--.*)?$|delete\s+from\b|insert\s+into\b|update\s+\S+\s+set\b|truncate\s+table\b|alter\s+table\b|create\s+table\b|exec(?:ute)?\s+(?:sp_|xp_)\w*|union\s+(?:all\s+)?select\b|select\s+\*\s+from\b|grant\s+\w+(?:\s*,\s*\w+)*\s+on\b|shutdown(?:\s+with\s+nowait)?\s*$)"#,
    )
    .expect("Invalid regex: sql statement")
});

/// SQL fragments removed wherever they appear. A `tail` group, when present,
/// is put back so a following `;` or `--` comment stays in place.
static INLINE_SQL: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r#"(?i)\b(?:drop|truncate)\s+table\s+(?:if\s+exists\s+)?[\w.`"\[\]]+\s*(?P<tail>;|--|$)"#)
            .expect("Invalid regex: inline drop table"),
        Regex::new(r"(?i)\bunion\s+(?:all\s+)?select\b[^;\n]*").expect("Invalid regex: inline union select"),
        Regex::new(r"(?i)'\s*or\s+'?1'?\s*=\s*'?1'?").expect("Invalid regex: tautology"),
    ]
});

static SQL_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--[^\n]*").expect("Invalid regex: sql comment"));

static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("Invalid regex: horizontal space"));

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n+").expect("Invalid regex: blank lines"));

fn remove_control_chars(s: &str) -> String {
    s.replace("\r\n", "\n")
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

fn strip_markup(s: &str) -> String {
    let without_blocks = SCRIPT_BLOCK.replace_all(s, "");
    let without_openers = UNTERMINATED_SCRIPT.replace_all(&without_blocks, "");
    HTML_TAG.replace_all(&without_openers, "").into_owned()
}

/// Drops injected statements while keeping the text around them.
///
/// The first `;` segment is never dropped wholesale, so an ordinary sentence
/// such as "Update me when you can" survives; later segments that open with a
/// statement are removed.
fn strip_sql_injection(s: &str) -> String {
    let mut segments = s.split(';');
    let first = segments.next().unwrap_or("");

    let mut injected = false;
    let mut kept = vec![first];
    for segment in segments {
        if SQL_STATEMENT.is_match(segment) {
            injected = true;
        } else {
            kept.push(segment);
        }
    }

    let mut result = if injected {
        kept.into_iter()
            .filter(|segment| !segment.trim().is_empty())
            .collect::<Vec<_>>()
            .join(";")
    } else {
        s.to_string()
    };

    for pattern in INLINE_SQL.iter() {
        if pattern.is_match(&result) {
            injected = true;
            result = pattern.replace_all(&result, "${tail}").into_owned();
        }
    }

    if injected {
        result = SQL_COMMENT
            .replace_all(&result, "")
            .trim_matches(|c: char| c == ';' || c.is_whitespace())
            .to_string();
    }
    result
}

fn collapse_whitespace(s: &str) -> String {
    let single_spaced = HORIZONTAL_SPACE.replace_all(s, " ");
    let lines: Vec<&str> = single_spaced.lines().map(str::trim).collect();
    BLANK_LINES
        .replace_all(&lines.join("\n"), "\n\n")
        .trim()
        .to_string()
}

/// The infallible part of sanitization.
///
/// `sanitize` and the integrity check both go through this, so a displayed
/// message can be compared against the transformation of its original input.
pub fn sanitize_text(raw: &str) -> String {
    let cleaned = remove_control_chars(raw);
    let unmarked = strip_markup(&cleaned);
    let unsql = strip_sql_injection(&unmarked);
    collapse_whitespace(&unsql)
}

/// Validates and sanitizes a user message.
///
/// # Errors
///
/// - `EmptyMessage` if the trimmed input is empty, or sanitization leaves nothing
/// - `MessageTooLong` if the input has more than `max_len` characters
pub fn sanitize(raw: &str, max_len: usize) -> Result<String, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::EmptyMessage);
    }

    let actual = raw.chars().count();
    if actual > max_len {
        return Err(AppError::MessageTooLong {
            max: max_len,
            actual,
        });
    }

    let sanitized = sanitize_text(raw);
    if sanitized.is_empty() {
        return Err(AppError::EmptyMessage);
    }
    Ok(sanitized)
}

/// Fails with `Integrity` unless `content` is exactly what sanitizing
/// `original_content` produces.
pub fn validate_integrity(message: &IntegrityCheck) -> Result<(), AppError> {
    if message.content != sanitize_text(&message.original_content) {
        return Err(AppError::Integrity);
    }
    Ok(())
}
