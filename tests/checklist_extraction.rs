// Tests for the `- [ ] Title #tag importance:N urgency:M` extractor.
use eisen::model::{DEFAULT_IMPORTANCE, DEFAULT_URGENCY, extract_checklist_tasks};

#[test]
fn test_clamps_and_extracts_tags() {
    let tasks = extract_checklist_tasks("- [ ] Buy milk #errand importance:12 urgency:0");

    assert_eq!(tasks.len(), 1);
    let t = &tasks[0];
    assert_eq!(t.title, "Buy milk");
    assert_eq!(t.tags, Some(vec!["errand".to_string()]));
    assert_eq!(t.importance, 10, "12 should clamp down to 10");
    assert_eq!(t.urgency, 1, "0 should clamp up to 1");
    assert_eq!(t.description, None);
    assert_eq!(t.deadlines, None);
    assert_eq!(t.finalizado, None);
}

#[test]
fn test_completed_items_are_dropped_and_heading_becomes_description() {
    let input = "# Work\n- [ ] Finish report importance:8 urgency:7\n- [x] Done already";
    let tasks = extract_checklist_tasks(input);

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Finish report");
    assert_eq!(tasks[0].importance, 8);
    assert_eq!(tasks[0].urgency, 7);
    assert_eq!(tasks[0].description, Some("Work".to_string()));
}

#[test]
fn test_uppercase_x_is_also_done() {
    let tasks = extract_checklist_tasks("- [X] Shipped\n* [ ] Still open");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Still open");
}

#[test]
fn test_defaults_when_no_metadata() {
    let tasks = extract_checklist_tasks("- [ ] Water plants");
    assert_eq!(tasks[0].importance, DEFAULT_IMPORTANCE);
    assert_eq!(tasks[0].urgency, DEFAULT_URGENCY);
    assert_eq!(tasks[0].tags, None, "no tags means the field is omitted");
}

#[test]
fn test_metadata_is_case_insensitive_and_accepts_equals() {
    let tasks = extract_checklist_tasks("- [ ] Pay rent URGENCY=9 Importance: 4");
    assert_eq!(tasks[0].title, "Pay rent");
    assert_eq!(tasks[0].urgency, 9);
    assert_eq!(tasks[0].importance, 4);
}

#[test]
fn test_heading_equal_to_title_is_not_a_description() {
    let input = "## Taxes\n- [ ] Taxes #admin";
    let tasks = extract_checklist_tasks(input);
    assert_eq!(tasks[0].title, "Taxes");
    assert_eq!(tasks[0].description, None);
}

#[test]
fn test_section_tracks_latest_heading() {
    let input = "\
# Home
- [ ] Fix sink
Some prose line that is ignored.

## Garden
  - [ ] Mow lawn #outside #weekly
";
    let tasks = extract_checklist_tasks(input);
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].description.as_deref(), Some("Home"));
    assert_eq!(tasks[1].title, "Mow lawn");
    assert_eq!(tasks[1].description.as_deref(), Some("Garden"));
    assert_eq!(
        tasks[1].tags,
        Some(vec!["outside".to_string(), "weekly".to_string()])
    );
}

#[test]
fn test_item_with_only_tags_and_metadata_is_skipped() {
    let tasks = extract_checklist_tasks("- [ ] #misc importance:3\n- [ ] Real task");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Real task");
}

#[test]
fn test_huge_numbers_clamp_instead_of_failing() {
    let tasks = extract_checklist_tasks("- [ ] Panic importance:99999999999999999999999");
    assert_eq!(tasks[0].importance, 10);
    assert_eq!(tasks[0].urgency, DEFAULT_URGENCY);
}

#[test]
fn test_non_ascii_digits_keep_defaults() {
    // Arabic-Indic three and fullwidth seven are not level numbers.
    let tasks = extract_checklist_tasks("- [ ] Pay rent importance:\u{0663} urgency:\u{FF17}");
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].title.starts_with("Pay rent"));
    assert_eq!(tasks[0].importance, DEFAULT_IMPORTANCE);
    assert_eq!(tasks[0].urgency, DEFAULT_URGENCY);

    let mixed = extract_checklist_tasks("- [ ] Mixed importance:7\u{0663}");
    assert_eq!(mixed[0].importance, 7, "only the ASCII prefix is read");
}

#[test]
fn test_crlf_and_plain_lines_are_tolerated() {
    let input = "Intro text\r\n- [ ] First\r\n- [ ] Second importance:2\r\n";
    let tasks = extract_checklist_tasks(input);
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].title, "First");
    assert_eq!(tasks[1].title, "Second");
    assert_eq!(tasks[1].importance, 2);
}

#[test]
fn test_field_block_input_yields_nothing() {
    let input = "Call dentist\nUrgente: Sim\nImportante: Não\n";
    assert!(extract_checklist_tasks(input).is_empty());
    assert!(extract_checklist_tasks("").is_empty());
}

#[test]
fn test_levels_always_in_range() {
    let input = "\
- [ ] a importance:0 urgency:0
- [ ] b importance:1 urgency:10
- [ ] c importance:11 urgency:500
- [ ] d importance:07 urgency:3
";
    for t in extract_checklist_tasks(input) {
        assert!((1..=10).contains(&t.importance), "{:?}", t);
        assert!((1..=10).contains(&t.urgency), "{:?}", t);
    }
}

#[test]
fn test_extraction_is_idempotent() {
    let input = "# Q\n- [ ] One #a importance:3\n- [x] Two\n- [ ] Three urgency:9";
    assert_eq!(extract_checklist_tasks(input), extract_checklist_tasks(input));
}
