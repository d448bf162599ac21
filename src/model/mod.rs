// File: ./src/model/mod.rs
pub mod checklist;
pub mod display;
pub mod field_block;
pub mod item;
pub mod markdown;

pub use checklist::extract_checklist_tasks;
pub use display::{TaskDisplay, export_markdown};
pub use field_block::extract_field_block_tasks;
pub use item::{Quadrant, Task};
pub use markdown::{DEFAULT_IMPORTANCE, DEFAULT_URGENCY, MarkdownTask};
