//! UTF-8–safe string truncation for log and terminal previews.
//!
//! Streamed translation text is full of multi-byte CJK characters, and
//! `&str[..n]` panics when `n` falls inside one. These helpers snap to the
//! nearest char boundary so previews never split a character.

/// Truncate a string to at most `max_bytes` bytes at a char boundary.
///
/// Returns the longest prefix of `s` whose byte length is ≤ `max_bytes`
/// and that does not split a multi-byte character.
#[inline]
#[must_use]
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    // `floor_char_boundary` is nightly-only, so implement it ourselves.
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Truncate `s` and append a suffix (e.g. `"…"`) if the original exceeds
/// `max_bytes`.
///
/// The returned string is at most `max_bytes` bytes long including the
/// suffix. If the string fits, it is returned as-is.
#[must_use]
pub fn truncate_with_suffix(s: &str, max_bytes: usize, suffix: &str) -> String {
    if s.len() <= max_bytes {
        return s.to_owned();
    }
    let body_budget = max_bytes.saturating_sub(suffix.len());
    let prefix = truncate_str(s, body_budget);
    format!("{prefix}{suffix}")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── truncate_str ─────────────────────────────────────────────────────

    #[test]
    fn ascii_within_limit() {
        assert_eq!(truncate_str("hello", 10), "hello");
    }

    #[test]
    fn ascii_truncated() {
        assert_eq!(truncate_str("hello world", 5), "hello");
    }

    #[test]
    fn cjk_boundary_snaps_back() {
        // Each CJK char is 3 bytes; a cut at byte 4 lands mid-char.
        assert_eq!(truncate_str("你好吗", 4), "你");
        assert_eq!(truncate_str("你好吗", 6), "你好");
    }

    #[test]
    fn zero_max() {
        assert_eq!(truncate_str("hello", 0), "");
    }

    // ── truncate_with_suffix ─────────────────────────────────────────────

    #[test]
    fn suffix_only_when_truncated() {
        assert_eq!(truncate_with_suffix("hello", 10, "..."), "hello");
        assert_eq!(truncate_with_suffix("hello world", 8, "..."), "hello...");
    }

    #[test]
    fn suffix_respects_char_boundaries() {
        let out = truncate_with_suffix("你好吗你好吗", 10, "...");
        assert!(out.len() <= 10);
        assert!(out.ends_with("..."));
    }
}
