// File: ./src/model/display.rs
use crate::model::item::{Quadrant, Task};
use strum::IntoEnumIterator;

pub trait TaskDisplay {
    fn checkbox_symbol(&self) -> &'static str;
    /// Renders the task as a line the checklist extractor reads back.
    fn to_checklist_line(&self) -> String;
    fn format_levels(&self) -> String;
}

impl TaskDisplay for Task {
    fn checkbox_symbol(&self) -> &'static str {
        if self.completed { "[x]" } else { "[ ]" }
    }

    fn to_checklist_line(&self) -> String {
        let mut s = format!("- {} {}", self.checkbox_symbol(), self.title);
        for tag in &self.tags {
            s.push_str(&format!(" #{}", tag));
        }
        s.push_str(&format!(
            " importance:{} urgency:{}",
            self.importance, self.urgency
        ));
        s
    }

    fn format_levels(&self) -> String {
        let mut s = format!(
            "{} i{} u{}",
            self.quadrant.status_glyph(),
            self.importance,
            self.urgency
        );
        if let Some(d) = self.deadline {
            s.push_str(&format!(" due {}", d.format("%Y-%m-%d")));
        } else if let Some(raw) = &self.deadline_raw {
            s.push_str(&format!(" due {}", raw));
        }
        s
    }
}

/// Returns the tasks of one quadrant in listing order.
pub fn tasks_in_quadrant(tasks: &[Task], quadrant: Quadrant) -> Vec<&Task> {
    let mut selected: Vec<&Task> = tasks.iter().filter(|t| t.quadrant == quadrant).collect();
    selected.sort_by(|a, b| a.cmp_for_listing(b));
    selected
}

/// Writes the tasks as a Markdown checklist, one `##` section per non-empty
/// quadrant in matrix order.
pub fn export_markdown(tasks: &[Task]) -> String {
    let mut sections = Vec::new();
    for quadrant in Quadrant::iter() {
        let selected = tasks_in_quadrant(tasks, quadrant);
        if selected.is_empty() {
            continue;
        }
        let mut section = format!("## {}\n", quadrant);
        for task in selected {
            section.push_str(&task.to_checklist_line());
            section.push('\n');
        }
        sections.push(section);
    }
    sections.join("\n")
}
