//! Shared utility functions.

/// Single-line preview of `s`, at most `max_chars` characters.
///
/// Newlines and runs of whitespace collapse to single spaces; an ellipsis
/// marks truncation.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = flat.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_short_text_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
    }

    #[test]
    fn preview_collapses_whitespace() {
        assert_eq!(preview("a\n\n b\tc", 20), "a b c");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        assert_eq!(preview("hello world", 8), "hello...");
        assert_eq!(preview("あのねあのね", 5), "あの...");
    }

    #[test]
    fn preview_empty() {
        assert_eq!(preview("", 10), "");
    }
}
