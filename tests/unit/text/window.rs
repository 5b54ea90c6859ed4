use super::*;

fn check(lines: &[&str], cursor: usize, want: &[&str]) {
    assert_eq!(
        visible_window(lines, cursor),
        want,
        "lines {lines:?} at cursor {cursor}"
    );
}

#[test]
fn reveal_window_table() {
    check(&["hello world"], 3, &["hel"]);
    check(&["hello world"], 9, &["hello wor"]);
    check(&["hello", "world"], 9, &["hello", "worl"]);
    check(&["hello", "world", "again"], 12, &["world", "ag"]);
    check(&["hello", "world", "again"], 10, &["hello", "world"]);
    check(&["hello", "world", "again"], 15, &["world", "again"]);
    check(&["hello", "world", "again"], 20, &["world", "again"]);
    check(
        &["Test long text", "with other"],
        25,
        &["Test long text", "with other"],
    );
}

#[test]
fn cursor_zero_and_line_boundaries() {
    check(&["hello", "world"], 0, &[""]);
    check(&["hello", "world"], 5, &["hello"]);
    check(&["hello", "world"], 6, &["hello", "w"]);
}

#[test]
fn empty_inputs() {
    assert!(visible_window::<&str>(&[], 3).is_empty());
    check(&[""], 0, &[""]);
    check(&[""], 4, &[""]);
}

#[test]
fn never_more_than_two_lines() {
    let lines = ["a", "bb", "ccc", "dddd", "eeeee"];
    for cursor in 0..20 {
        let w = visible_window(&lines, cursor);
        assert!(!w.is_empty() && w.len() <= 2, "cursor {cursor}: {w:?}");
    }
}

#[test]
fn slices_by_character_not_byte() {
    check(&["ñandú", "café"], 2, &["ña"]);
    check(&["ñandú", "café"], 8, &["ñandú", "caf"]);
    assert_eq!(prefix_chars("über", 1), "ü");
    assert_eq!(prefix_chars("über", 10), "über");
    assert_eq!(prefix_chars("", 0), "");
}

#[test]
fn accepts_owned_lines() {
    let lines = vec!["hello".to_string(), "world".to_string()];
    assert_eq!(visible_window(lines.as_slice(), 7), vec!["hello", "wo"]);
}
