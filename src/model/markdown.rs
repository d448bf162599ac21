// File: ./src/model/markdown.rs
//! Shared pieces of the Markdown task extractors: the output record, default
//! levels, clamping, hashtag handling and per-line classification.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_IMPORTANCE: u8 = 5;
pub const DEFAULT_URGENCY: u8 = 5;
pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 10;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#{1,6}\s+(.+)$").expect("valid heading regex"));
static CHECKLIST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*]\s+\[([ xX])\]\s+(.+)$").expect("valid checklist regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#([a-zA-Z0-9_]+)").expect("valid tag regex"));

/// A task as read from a Markdown document, before it gets an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownTask {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub importance: u8,
    pub urgency: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadlines: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalizado: Option<String>,
}

impl MarkdownTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            importance: DEFAULT_IMPORTANCE,
            urgency: DEFAULT_URGENCY,
            tags: None,
            deadlines: None,
            finalizado: None,
        }
    }
}

/// Constrains a parsed level to `MIN_LEVEL..=MAX_LEVEL`.
pub fn clamp_level(value: i64) -> u8 {
    // Bounded by MAX_LEVEL, so the cast cannot truncate.
    value.clamp(i64::from(MIN_LEVEL), i64::from(MAX_LEVEL)) as u8
}

/// Parses a run of ASCII digits. Runs too long for an i64 saturate; anything
/// that is not ASCII digits yields `None`.
pub(crate) fn parse_level_digits(digits: &str) -> Option<i64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse::<i64>().unwrap_or(i64::MAX))
}

/// Pulls every `#word` token out of `text`, in order of appearance.
///
/// Returns the text with the tokens removed, and the tag names without the `#`.
pub fn extract_tags(text: &str) -> (String, Vec<String>) {
    let tags = TAG_RE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect();
    let stripped = TAG_RE.replace_all(text, "").into_owned();
    (stripped, tags)
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Kind of a single physical line, evaluated in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Heading(&'a str),
    ChecklistItem { done: bool, text: &'a str },
    /// No colon and no leading `#`: may start a field block.
    TitleCandidate(&'a str),
    /// Any other non-blank line. Only meaningful inside an open field block.
    MetadataLine(&'a str),
}

impl<'a> Line<'a> {
    pub fn classify(raw: &'a str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Line::Blank;
        }
        if let Some(caps) = HEADING_RE.captures(trimmed)
            && let Some(text) = caps.get(1)
        {
            return Line::Heading(text.as_str().trim());
        }
        if let Some(caps) = CHECKLIST_RE.captures(raw.trim_end())
            && let (Some(mark), Some(text)) = (caps.get(1), caps.get(2))
        {
            return Line::ChecklistItem {
                done: mark.as_str().eq_ignore_ascii_case("x"),
                text: text.as_str().trim(),
            };
        }
        if !trimmed.contains(':') && !trimmed.starts_with('#') {
            return Line::TitleCandidate(trimmed);
        }
        Line::MetadataLine(trimmed)
    }
}

/// Splits `content` on `\n` and classifies each line.
///
/// Yields the trimmed line next to its classification.
pub fn classify_lines(content: &str) -> impl Iterator<Item = (&str, Line<'_>)> {
    content
        .split('\n')
        .map(|raw| (raw.trim(), Line::classify(raw)))
}
