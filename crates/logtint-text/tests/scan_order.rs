//! Backward scanning visits exactly the matches a forward scan finds.
//!
//! For the severity and literal patterns, repeatedly calling
//! `find_previous` with the previously returned cursor must produce the
//! forward match list in reverse, then stop at a null cursor.

use logtint_text::{LineIndex, LineMatches, Pattern, TextBuffer, search_forward};
use proptest::prelude::*;

fn patterns() -> [Pattern; 2] {
    [
        Pattern::new(r"^.*?: ").unwrap(),
        Pattern::new(r#""[^"]*"|'[^']*'"#).unwrap(),
    ]
}

fn backward_ranges(buffer: &TextBuffer, pattern: &Pattern) -> Vec<std::ops::Range<usize>> {
    let mut cursor = buffer.cursor_at_end();
    let mut out = Vec::new();
    loop {
        cursor = buffer.find_previous(&cursor, pattern);
        match cursor.selection_range() {
            Some(range) => out.push(range),
            None => break,
        }
    }
    out
}

fn cached_ranges(buffer: &TextBuffer, pattern: &Pattern) -> Vec<std::ops::Range<usize>> {
    let mut cache = LineMatches::new();
    let mut cursor = buffer.cursor_at_end();
    let mut out = Vec::new();
    loop {
        cursor = buffer.find_previous_cached(&cursor, pattern, &mut cache);
        match cursor.selection_range() {
            Some(range) => out.push(range),
            None => break,
        }
    }
    out
}

#[test]
fn joined_stack_trace_scans_in_one_pass() {
    let frames: String = (0..5_000)
        .map(|idx| format!("at frame_{idx} (\"src/mod_{idx}.rs\") "))
        .collect();
    let text = format!("Error: panic {frames}\nNote: done\n");
    let buffer = TextBuffer::from(text.as_str());
    let [_, literal] = patterns();

    let mut cache = LineMatches::new();
    let mut cursor = buffer.cursor_at_end();
    let mut count = 0;
    loop {
        cursor = buffer.find_previous_cached(&cursor, &literal, &mut cache);
        if cursor.is_null() {
            break;
        }
        count += 1;
    }
    assert_eq!(count, 5_000);
    assert_eq!(cache.lines_searched(), 3);
}

#[test]
fn realistic_log_excerpt() {
    let text = "Note: Starting server on '127.0.0.1'\n\
                Debug: config \"copyq.conf\" loaded\n\
                Warning: retrying: attempt 2\n\
                Error: cannot open \"/tmp/x\": permission denied\n";
    let buffer = TextBuffer::from(text);
    let [severity, literal] = patterns();

    let labels: Vec<_> = backward_ranges(&buffer, &severity)
        .into_iter()
        .map(|r| &text[r])
        .collect();
    assert_eq!(labels, ["Error: ", "Warning: ", "Debug: ", "Note: "]);

    let literals: Vec<_> = backward_ranges(&buffer, &literal)
        .into_iter()
        .map(|r| &text[r])
        .collect();
    assert_eq!(literals, ["\"/tmp/x\"", "\"copyq.conf\"", "'127.0.0.1'"]);
}

proptest! {
    #[test]
    fn backward_is_reverse_of_forward(text in "[ab:\"' \n]{0,160}") {
        let buffer = TextBuffer::from(text.as_str());
        let lines = LineIndex::build(&text);
        for pattern in patterns() {
            let mut forward: Vec<_> = search_forward(&text, &lines, &pattern)
                .into_iter()
                .map(|r| r.range)
                .collect();
            forward.reverse();
            prop_assert_eq!(cached_ranges(&buffer, &pattern), forward.clone());
            prop_assert_eq!(backward_ranges(&buffer, &pattern), forward);
        }
    }
}
