// File: ./src/model/checklist.rs
//! Extractor for `- [ ] Title #tag importance:N urgency:M` lists.
use crate::model::markdown::{
    DEFAULT_IMPORTANCE, DEFAULT_URGENCY, Line, MarkdownTask, clamp_level, classify_lines,
    collapse_whitespace, extract_tags, parse_level_digits,
};
use once_cell::sync::Lazy;
use regex::Regex;

static IMPORTANCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)importance[:=]\s*([0-9]+)").expect("valid importance regex"));
static URGENCY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)urgency[:=]\s*([0-9]+)").expect("valid urgency regex"));

/// Extracts the open checklist items of a Markdown document.
///
/// Completed items (`[x]` / `[X]`) are skipped. The most recent heading is
/// used as the description when it differs from the item title.
pub fn extract_checklist_tasks(content: &str) -> Vec<MarkdownTask> {
    let mut tasks = Vec::new();
    let mut section: Option<&str> = None;

    for (_, line) in classify_lines(content) {
        match line {
            Line::Heading(text) => section = Some(text),
            Line::ChecklistItem { done: true, text } => {
                log::debug!("Skipping completed checklist item '{}'", text);
            }
            Line::ChecklistItem { done: false, text } => {
                if let Some(task) = parse_checklist_item(text, section) {
                    tasks.push(task);
                }
            }
            _ => {}
        }
    }

    log::debug!("Checklist extractor produced {} task(s)", tasks.len());
    tasks
}

fn parse_checklist_item(text: &str, section: Option<&str>) -> Option<MarkdownTask> {
    let (without_tags, tags) = extract_tags(text);

    let importance = find_level(&IMPORTANCE_RE, &without_tags, DEFAULT_IMPORTANCE);
    let urgency = find_level(&URGENCY_RE, &without_tags, DEFAULT_URGENCY);

    let stripped = IMPORTANCE_RE.replace_all(&without_tags, "");
    let stripped = URGENCY_RE.replace_all(&stripped, "");
    let title = collapse_whitespace(&stripped);

    if title.is_empty() {
        log::debug!("Dropping checklist item with empty title: '{}'", text);
        return None;
    }

    let description = section
        .filter(|heading| *heading != title)
        .map(str::to_string);

    Some(MarkdownTask {
        title,
        description,
        importance: clamp_level(importance),
        urgency: clamp_level(urgency),
        tags: (!tags.is_empty()).then_some(tags),
        deadlines: None,
        finalizado: None,
    })
}

fn find_level(re: &Regex, text: &str, default: u8) -> i64 {
    re.captures(text)
        .and_then(|caps| parse_level_digits(&caps[1]))
        .unwrap_or_else(|| i64::from(default))
}
