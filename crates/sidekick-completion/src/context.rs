//! Cursor context extraction
//!
//! The prompt context is the window of lines above the cursor plus the
//! current line up to the cursor; the text after the cursor feeds the
//! duplicate-suppression rule.

use crate::types::Position;

/// Lines of history included above the cursor
const CONTEXT_LINES: usize = 15;

fn split_at_character(line: &str, character: u32) -> (&str, &str) {
    match line.char_indices().nth(character as usize) {
        Some((idx, _)) => line.split_at(idx),
        None => (line, ""),
    }
}

/// Extract the completion context ending at the cursor
pub fn extract_context(document_text: &str, position: Position) -> String {
    let lines: Vec<&str> = document_text.lines().collect();
    if lines.is_empty() {
        return String::new();
    }

    let cursor_line = (position.line as usize).min(lines.len() - 1);
    let start = cursor_line.saturating_sub(CONTEXT_LINES);

    let mut context = String::new();
    for line in &lines[start..cursor_line] {
        context.push_str(line);
        context.push('\n');
    }
    let (prefix, _) = split_at_character(lines[cursor_line], position.character);
    context.push_str(prefix);
    context
}

/// The remainder of the cursor's line after the cursor
pub fn text_after_cursor(document_text: &str, position: Position) -> &str {
    let line = document_text
        .lines()
        .nth(position.line as usize)
        .unwrap_or("");
    split_at_character(line, position.character).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_single_line() {
        let context = extract_context("console", Position::new(0, 4));
        assert_eq!(context, "cons");
    }

    #[test]
    fn test_context_includes_preceding_lines() {
        let text = "fn add(a: i32, b: i32) -> i32 {\n    a + b\n}";
        let context = extract_context(text, Position::new(1, 5));
        assert_eq!(context, "fn add(a: i32, b: i32) -> i32 {\n    a");
    }

    #[test]
    fn test_context_window_limit() {
        let text = (0..40).map(|i| format!("line{i}")).collect::<Vec<_>>().join("\n");
        let context = extract_context(&text, Position::new(39, 0));
        // 15 lines of history, none earlier
        assert!(context.starts_with("line24"));
        assert!(!context.contains("line23"));
    }

    #[test]
    fn test_context_empty_document() {
        assert_eq!(extract_context("", Position::new(0, 0)), "");
    }

    #[test]
    fn test_context_character_past_end() {
        assert_eq!(extract_context("ab", Position::new(0, 99)), "ab");
    }

    #[test]
    fn test_text_after_cursor() {
        assert_eq!(text_after_cursor("conse.log()", Position::new(0, 4)), "e.log()");
        assert_eq!(text_after_cursor("consol", Position::new(0, 6)), "");
    }

    #[test]
    fn test_multibyte_boundary() {
        // cursor positions count characters, not bytes
        let text = "héllo";
        assert_eq!(extract_context(text, Position::new(0, 2)), "hé");
        assert_eq!(text_after_cursor(text, Position::new(0, 2)), "llo");
    }
}
