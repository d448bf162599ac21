// File: ./src/model/field_block.rs
//! Extractor for the field-block dialect:
//!
//! ```text
//! Call dentist
//! Urgente: Sim
//! Importante: Não
//! Status: ❶ Executar
//! Deadlines: 10/05/2024
//! Finalizado: Não
//! ```
//!
//! A title line opens a block, metadata lines fill it, and a blank line, a
//! different title line or the end of the document closes it. Blocks without
//! any recognized metadata are not tasks.
use crate::model::markdown::{
    Line, MarkdownTask, clamp_level, classify_lines, collapse_whitespace, extract_tags,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Level assigned by an affirmative `Importante:` / `Urgente:` answer.
pub const HIGH_LEVEL: u8 = 9;
/// Level assigned by a negative answer.
pub const LOW_LEVEL: u8 = 3;

/// Status glyph, then the (urgency, importance) it stands for.
pub const STATUS_GLYPHS: [(char, u8, u8); 4] = [
    ('❶', HIGH_LEVEL, HIGH_LEVEL),
    ('❷', LOW_LEVEL, HIGH_LEVEL),
    ('❸', HIGH_LEVEL, LOW_LEVEL),
    ('❹', LOW_LEVEL, LOW_LEVEL),
];

static IMPORTANTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^importante\s*:\s*(sim|não|nao|no|yes)\s*$").expect("valid importante regex")
});
static URGENTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^urgente\s*:\s*(sim|não|nao|no|yes)\s*$").expect("valid urgente regex")
});
static STATUS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^status\s*:\s*(.*)$").expect("valid status regex"));
static DEADLINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^deadlines\s*:\s*(.*)$").expect("valid deadlines regex"));
static FINALIZADO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^finalizado\s*:\s*(.*)$").expect("valid finalizado regex"));

/// Maps a status value to (urgency, importance) when it contains a known glyph.
pub fn status_levels(value: &str) -> Option<(u8, u8)> {
    STATUS_GLYPHS
        .iter()
        .find(|(glyph, _, _)| value.contains(*glyph))
        .map(|&(_, urgency, importance)| (urgency, importance))
}

fn answer_level(answer: &str) -> u8 {
    let answer = answer.to_lowercase();
    if answer == "sim" || answer == "yes" {
        HIGH_LEVEL
    } else {
        LOW_LEVEL
    }
}

struct Block {
    /// Title line as written, used to detect a repeated title.
    raw_title: String,
    task: MarkdownTask,
    description: Vec<String>,
    found_task_info: bool,
}

enum State {
    ScanningForTitle,
    AccumulatingBlock(Block),
}

impl Block {
    fn open(title_line: &str) -> Self {
        let (without_tags, tags) = extract_tags(title_line);
        let mut task = MarkdownTask::new(collapse_whitespace(&without_tags));
        task.tags = (!tags.is_empty()).then_some(tags);
        Self {
            raw_title: title_line.to_string(),
            task,
            description: Vec::new(),
            found_task_info: false,
        }
    }

    fn absorb(&mut self, line: &str) {
        if let Some(caps) = IMPORTANTE_RE.captures(line) {
            self.task.importance = answer_level(&caps[1]);
        } else if let Some(caps) = URGENTE_RE.captures(line) {
            self.task.urgency = answer_level(&caps[1]);
        } else if let Some(caps) = STATUS_RE.captures(line) {
            if let Some((urgency, importance)) = status_levels(&caps[1]) {
                self.task.urgency = urgency;
                self.task.importance = importance;
            }
        } else if let Some(caps) = DEADLINES_RE.captures(line) {
            self.task.deadlines = Some(caps[1].trim().to_string());
        } else if let Some(caps) = FINALIZADO_RE.captures(line) {
            self.task.finalizado = Some(caps[1].trim().to_string());
        } else {
            self.description.push(line.to_string());
            return;
        }
        self.found_task_info = true;
    }

    fn close_into(self, tasks: &mut Vec<MarkdownTask>) {
        if !self.found_task_info {
            log::debug!("Discarding '{}': no task metadata", self.raw_title);
            return;
        }
        let mut task = self.task;
        if task.title.is_empty() {
            log::debug!("Discarding block with empty title");
            return;
        }
        if !self.description.is_empty() {
            task.description = Some(self.description.join("\n"));
        }
        task.importance = clamp_level(i64::from(task.importance));
        task.urgency = clamp_level(i64::from(task.urgency));
        tasks.push(task);
    }
}

/// Extracts field-block tasks from a Markdown document.
///
/// Headings and checklist items never open a block; inside one they are kept
/// as description lines.
pub fn extract_field_block_tasks(content: &str) -> Vec<MarkdownTask> {
    let mut tasks = Vec::new();
    let mut state = State::ScanningForTitle;

    for (text, line) in classify_lines(content) {
        state = match (state, line) {
            (State::ScanningForTitle, Line::TitleCandidate(title)) => {
                State::AccumulatingBlock(Block::open(title))
            }
            (State::ScanningForTitle, _) => State::ScanningForTitle,
            (State::AccumulatingBlock(block), Line::Blank) => {
                block.close_into(&mut tasks);
                State::ScanningForTitle
            }
            (State::AccumulatingBlock(block), Line::TitleCandidate(title))
                if title != block.raw_title =>
            {
                block.close_into(&mut tasks);
                State::AccumulatingBlock(Block::open(title))
            }
            (State::AccumulatingBlock(mut block), _) => {
                block.absorb(text);
                State::AccumulatingBlock(block)
            }
        };
    }

    if let State::AccumulatingBlock(block) = state {
        block.close_into(&mut tasks);
    }

    log::debug!("Field-block extractor produced {} task(s)", tasks.len());
    tasks
}
