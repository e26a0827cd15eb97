//! String helpers shared by the outer layers.

/// Shorten `s` to at most `max_len` bytes, ending in `...` when cut.
///
/// Never splits a UTF-8 character.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3).min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// Collapse runs of whitespace (newlines included) into single spaces.
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // Each CJK character is three bytes
        assert_eq!(truncate("你好世界", 12), "你好世界");
        assert_eq!(truncate("你好世界朋友", 12), "你好世...");
        assert_eq!(truncate("你好世界朋友", 10), "你好...");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("a\n  b\t c"), "a b c");
    }
}
