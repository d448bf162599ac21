use chrono::NaiveDate;
use eisen::config::Config;
use eisen::import::{MarkdownDialect, parse_markdown};
use eisen::model::item::{is_affirmative, parse_deadline};
use eisen::model::{Quadrant, Task, TaskDisplay, export_markdown, extract_checklist_tasks};

#[test]
fn test_quadrant_classification() {
    assert_eq!(Quadrant::classify(9, 9, 6), Quadrant::DoFirst);
    assert_eq!(Quadrant::classify(9, 3, 6), Quadrant::Schedule);
    assert_eq!(Quadrant::classify(3, 9, 6), Quadrant::Delegate);
    assert_eq!(Quadrant::classify(3, 3, 6), Quadrant::Eliminate);
    assert_eq!(Quadrant::classify(6, 5, 6), Quadrant::Schedule, "threshold is inclusive");
}

#[test]
fn test_status_glyphs_agree_with_quadrants() {
    use eisen::model::field_block::status_levels;

    for quadrant in [
        Quadrant::DoFirst,
        Quadrant::Schedule,
        Quadrant::Delegate,
        Quadrant::Eliminate,
    ] {
        let (urgency, importance) =
            status_levels(&quadrant.status_glyph().to_string()).expect("known glyph");
        assert_eq!(Quadrant::classify(importance, urgency, 6), quadrant);
    }
}

#[test]
fn test_quadrant_keys() {
    assert_eq!(Quadrant::from_key("do"), Some(Quadrant::DoFirst));
    assert_eq!(Quadrant::from_key("Schedule"), Some(Quadrant::Schedule));
    assert_eq!(Quadrant::from_key("3"), Some(Quadrant::Delegate));
    assert_eq!(Quadrant::from_key("later"), None);
}

#[test]
fn test_deadline_and_completion_helpers() {
    assert_eq!(parse_deadline("10/05/2024"), NaiveDate::from_ymd_opt(2024, 5, 10));
    assert_eq!(parse_deadline(" 2024-12-31 "), NaiveDate::from_ymd_opt(2024, 12, 31));
    assert_eq!(parse_deadline("31/02/2024"), None);
    assert!(is_affirmative("Sim"));
    assert!(is_affirmative(" YES "));
    assert!(!is_affirmative("Não"));
    assert!(!is_affirmative(""));
}

#[test]
fn test_new_task_clamps_and_classifies() {
    let task = Task::new("Shift", 12, 7, 6);
    assert_eq!(task.importance, 10);
    assert_eq!(task.quadrant, Quadrant::DoFirst);
}

#[test]
fn test_checklist_line_rendering() {
    let mut task = Task::new("Buy milk", 4, 8, 6);
    task.tags = vec!["errand".to_string()];
    assert_eq!(
        task.to_checklist_line(),
        "- [ ] Buy milk #errand importance:4 urgency:8"
    );
    task.completed = true;
    assert!(task.to_checklist_line().starts_with("- [x] "));
}

#[test]
fn test_level_summary_shows_glyph_and_deadline() {
    let mut task = Task::new("Report", 9, 3, 6);
    assert_eq!(task.format_levels(), "❷ i9 u3");
    task.deadline = NaiveDate::from_ymd_opt(2024, 5, 10);
    assert_eq!(task.format_levels(), "❷ i9 u3 due 2024-05-10");
}

#[test]
fn test_export_groups_by_quadrant_and_reimports() {
    let config = Config::default();
    let input = "\
- [ ] Later importance:8 urgency:2
- [ ] Now importance:9 urgency:9 #fire
- [ ] Someone else importance:2 urgency:9
";
    let mut tasks = parse_markdown(input, MarkdownDialect::Checklist, &config).unwrap();
    let mut done = Task::new("Old news", 9, 9, 6);
    done.completed = true;
    tasks.push(done);

    let exported = export_markdown(&tasks);
    let do_first = exported.find("## Do first").expect("do-first section");
    let schedule = exported.find("## Schedule").expect("schedule section");
    let delegate = exported.find("## Delegate").expect("delegate section");
    assert!(do_first < schedule && schedule < delegate);
    assert!(!exported.contains("## Eliminate"));

    let back = extract_checklist_tasks(&exported);
    assert_eq!(back.len(), 3, "completed task is not re-imported");
    let now = back.iter().find(|t| t.title == "Now").unwrap();
    assert_eq!(now.tags, Some(vec!["fire".to_string()]));
    assert_eq!((now.importance, now.urgency), (9, 9));
    assert_eq!(now.description.as_deref(), Some("Do first"));
}
