// File: ./src/model/item.rs
use crate::model::markdown::{MAX_LEVEL, MIN_LEVEL, MarkdownTask};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use strum::EnumIter;
use uuid::Uuid;

/// Levels at or above this count as "important" / "urgent".
pub const DEFAULT_QUADRANT_THRESHOLD: u8 = 6;

const DEADLINE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%Y-%m-%d"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    DoFirst,
    Schedule,
    Delegate,
    Eliminate,
}

impl Quadrant {
    pub fn classify(importance: u8, urgency: u8, threshold: u8) -> Self {
        let threshold = threshold.clamp(MIN_LEVEL, MAX_LEVEL);
        match (importance >= threshold, urgency >= threshold) {
            (true, true) => Quadrant::DoFirst,
            (true, false) => Quadrant::Schedule,
            (false, true) => Quadrant::Delegate,
            (false, false) => Quadrant::Eliminate,
        }
    }

    /// Accepts the short names used on the command line, and 1-4.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "do" | "do_first" | "do-first" | "1" => Some(Quadrant::DoFirst),
            "schedule" | "2" => Some(Quadrant::Schedule),
            "delegate" | "3" => Some(Quadrant::Delegate),
            "eliminate" | "4" => Some(Quadrant::Eliminate),
            _ => None,
        }
    }

    /// The glyph the field-block status line uses for this quadrant.
    pub fn status_glyph(&self) -> char {
        match self {
            Quadrant::DoFirst => '❶',
            Quadrant::Schedule => '❷',
            Quadrant::Delegate => '❸',
            Quadrant::Eliminate => '❹',
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quadrant::DoFirst => write!(f, "Do first"),
            Quadrant::Schedule => write!(f, "Schedule"),
            Quadrant::Delegate => write!(f, "Delegate"),
            Quadrant::Eliminate => write!(f, "Eliminate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub importance: u8,
    pub urgency: u8,
    pub quadrant: Quadrant,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    /// Deadline text as it was imported, kept when it could not be parsed.
    #[serde(default)]
    pub deadline_raw: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(title: &str, importance: u8, urgency: u8, quadrant_threshold: u8) -> Self {
        let now = Utc::now();
        let importance = importance.clamp(MIN_LEVEL, MAX_LEVEL);
        let urgency = urgency.clamp(MIN_LEVEL, MAX_LEVEL);
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: None,
            importance,
            urgency,
            quadrant: Quadrant::classify(importance, urgency, quadrant_threshold),
            tags: Vec::new(),
            deadline: None,
            deadline_raw: None,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builds an application task from an extracted record.
    pub fn from_markdown(md: MarkdownTask, quadrant_threshold: u8) -> Self {
        let mut task = Self::new(&md.title, md.importance, md.urgency, quadrant_threshold);
        task.description = md.description;
        task.tags = md.tags.unwrap_or_default();
        task.completed = md.finalizado.as_deref().is_some_and(is_affirmative);

        if let Some(raw) = md.deadlines.filter(|d| !d.trim().is_empty()) {
            task.deadline = parse_deadline(&raw);
            if task.deadline.is_none() {
                log::warn!("Could not parse deadline '{}' of '{}'", raw, task.title);
            }
            task.deadline_raw = Some(raw);
        }
        task
    }

    /// Listing order inside a quadrant: open before done, earliest deadline
    /// first, then the more important and more urgent, then by title.
    pub fn cmp_for_listing(&self, other: &Self) -> Ordering {
        self.completed
            .cmp(&other.completed)
            .then_with(|| match (self.deadline, other.deadline) {
                (Some(d1), Some(d2)) => d1.cmp(&d2),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| other.importance.cmp(&self.importance))
            .then_with(|| other.urgency.cmp(&self.urgency))
            .then_with(|| self.title.cmp(&other.title))
    }
}

/// Parses `dd/mm/yyyy`, falling back to ISO `yyyy-mm-dd`.
pub fn parse_deadline(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DEADLINE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// `Sim`, `yes`, `true` and `x` mark a finished task.
pub fn is_affirmative(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "sim" | "yes" | "true" | "x"
    )
}
