// File: ./src/import.rs
//! Markdown import: the policy around the extractors.
//!
//! The extractors never fail. This layer rejects files that are not Markdown,
//! reports read failures, picks the dialect the caller asked for and treats an
//! import that produced nothing as a user error.
use crate::config::Config;
use crate::model::{MarkdownTask, Task, extract_checklist_tasks, extract_field_block_tasks};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "markdown"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkdownDialect {
    /// `- [ ] Title #tag importance:N urgency:M`
    #[default]
    Checklist,
    /// Title line followed by `Urgente:` / `Importante:` / `Status:` lines.
    FieldBlock,
}

impl MarkdownDialect {
    pub fn extract(self, content: &str) -> Vec<MarkdownTask> {
        match self {
            MarkdownDialect::Checklist => extract_checklist_tasks(content),
            MarkdownDialect::FieldBlock => extract_field_block_tasks(content),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "checklist" => Some(MarkdownDialect::Checklist),
            "fields" | "field_block" | "field-block" => Some(MarkdownDialect::FieldBlock),
            _ => None,
        }
    }
}

impl fmt::Display for MarkdownDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkdownDialect::Checklist => write!(f, "checklist"),
            MarkdownDialect::FieldBlock => write!(f, "field block"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("'{}' is not a Markdown file (expected .md or .markdown)", .path.display())]
    UnsupportedFileType { path: PathBuf },

    #[error("could not read '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no tasks found: the file contains no tasks in the expected format")]
    NoTasksFound,
}

pub fn ensure_markdown_extension(path: &Path) -> Result<(), ImportError> {
    let is_markdown = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        });
    if is_markdown {
        Ok(())
    } else {
        Err(ImportError::UnsupportedFileType {
            path: path.to_path_buf(),
        })
    }
}

pub fn read_markdown_file(path: &Path) -> Result<String, ImportError> {
    fs::read_to_string(path).map_err(|source| ImportError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Runs the extractor for `dialect` and turns its records into tasks.
pub fn parse_markdown(
    content: &str,
    dialect: MarkdownDialect,
    config: &Config,
) -> Result<Vec<Task>, ImportError> {
    let tasks: Vec<Task> = dialect
        .extract(content)
        .into_iter()
        .map(|md| Task::from_markdown(md, config.quadrant_threshold))
        .collect();

    if tasks.is_empty() {
        return Err(ImportError::NoTasksFound);
    }
    Ok(tasks)
}

pub fn import_markdown_file(
    path: &Path,
    dialect: MarkdownDialect,
    config: &Config,
) -> Result<Vec<Task>, ImportError> {
    ensure_markdown_extension(path)?;
    let content = read_markdown_file(path)?;
    let tasks = parse_markdown(&content, dialect, config)?;
    log::info!(
        "Parsed {} task(s) from {} using the {} dialect",
        tasks.len(),
        path.display(),
        dialect
    );
    Ok(tasks)
}
