//! Escape-aware scanning primitives.
//!
//! These operate on raw bytes of a UTF-8 buffer. Every byte of a multi-byte
//! character has its high bit set, so it can never be mistaken for the ASCII
//! structural characters scanned for here.

/// Find the end of a balanced `{...}` object starting at `start`.
///
/// `start` must point at a `{`. Returns the offset one past the balancing
/// `}`, or `None` if the buffer ends before balance reaches zero — an
/// incomplete object, not an error; the caller keeps the buffer and retries
/// after the next fragment.
///
/// Braces inside string literals are skipped, and escaped quotes do not
/// terminate a string.
#[must_use]
pub fn scan_object(buf: &str, start: usize) -> Option<usize> {
    let bytes = buf.as_bytes();
    debug_assert_eq!(bytes.get(start), Some(&b'{'));
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, &b) in bytes.iter().enumerate().skip(start) {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(offset + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Find the closing quote of a string literal opened at `open`.
///
/// `open` must point at the opening `"`. Returns the offset of the matching
/// unescaped closing `"`, or `None` if the buffer ends inside the string.
#[must_use]
pub fn scan_string(buf: &str, open: usize) -> Option<usize> {
    let bytes = buf.as_bytes();
    debug_assert_eq!(bytes.get(open), Some(&b'"'));
    let mut escaped = false;
    for (offset, &b) in bytes.iter().enumerate().skip(open + 1) {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'"' => return Some(offset),
            _ => {}
        }
    }
    None
}

/// Resolve standard JSON string escapes in a raw (quote-delimited) span.
///
/// Handles `\"`, `\\`, `\/`, `\n`, `\t`, `\r`, `\b`, `\f`, and `\uXXXX`
/// including surrogate pairs. Unrecognized escapes are kept literally rather
/// than dropped — the span feeds a preview, so lossy is worse than odd.
#[must_use]
pub fn unescape(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_owned();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 1..];
        let Some(esc) = rest.chars().next() else {
            // Trailing lone backslash.
            out.push('\\');
            return out;
        };
        rest = &rest[esc.len_utf8()..];
        match esc {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'u' => match decode_unicode(rest) {
                Some((ch, used)) => {
                    out.push(ch);
                    rest = &rest[used..];
                }
                None => out.push_str("\\u"),
            },
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode the hex payload of a `\uXXXX` escape, `s` starting just past `\u`.
///
/// Returns the decoded char and the number of bytes consumed from `s`: 4 for
/// a BMP code point, 10 when a high surrogate is followed by a `\uXXXX` low
/// surrogate.
fn decode_unicode(s: &str) -> Option<(char, usize)> {
    let high = u32::from_str_radix(s.get(..4)?, 16).ok()?;
    if (0xD800..0xDC00).contains(&high) {
        let low_hex = s.get(4..)?.strip_prefix("\\u")?;
        let low = u32::from_str_radix(low_hex.get(..4)?, 16).ok()?;
        if !(0xDC00..0xE000).contains(&low) {
            return None;
        }
        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        Some((char::from_u32(code)?, 10))
    } else {
        Some((char::from_u32(high)?, 4))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── scan_object ──────────────────────────────────────────────────────

    #[test]
    fn simple_object() {
        let buf = r#"{"en":"Hi."}"#;
        assert_eq!(scan_object(buf, 0), Some(buf.len()));
    }

    #[test]
    fn object_with_trailing_text() {
        let buf = r#"{"a":1},{"b":2}"#;
        assert_eq!(scan_object(buf, 0), Some(7));
        assert_eq!(scan_object(buf, 8), Some(buf.len()));
    }

    #[test]
    fn nested_objects() {
        let buf = r#"{"analysis":{"chunks":[{"en":"a"}]}}"#;
        assert_eq!(scan_object(buf, 0), Some(buf.len()));
    }

    #[test]
    fn brace_inside_string_is_skipped() {
        let buf = r#"{"zh":"左括号{右括号}"}"#;
        assert_eq!(scan_object(buf, 0), Some(buf.len()));
    }

    #[test]
    fn escaped_quote_does_not_close_string() {
        let buf = r#"{"en":"she said \"}\" loudly"}"#;
        assert_eq!(scan_object(buf, 0), Some(buf.len()));
    }

    #[test]
    fn incomplete_object_reports_none() {
        assert_eq!(scan_object(r#"{"en":"Hi.","zh":"#, 0), None);
        assert_eq!(scan_object(r#"{"en":"cut mid strin"#, 0), None);
    }

    #[test]
    fn multibyte_text_offsets_are_bytewise() {
        let buf = r#"{"zh":"你好。"}"#;
        assert_eq!(scan_object(buf, 0), Some(buf.len()));
    }

    // ── scan_string ──────────────────────────────────────────────────────

    #[test]
    fn string_close_offset() {
        let buf = r#""hello" rest"#;
        assert_eq!(scan_string(buf, 0), Some(6));
    }

    #[test]
    fn string_with_escaped_quote() {
        let buf = r#""a\"b""#;
        assert_eq!(scan_string(buf, 0), Some(buf.len() - 1));
    }

    #[test]
    fn unterminated_string_reports_none() {
        assert_eq!(scan_string(r#""never ends"#, 0), None);
    }

    // ── unescape ─────────────────────────────────────────────────────────

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(unescape("no escapes here"), "no escapes here");
    }

    #[test]
    fn standard_escapes_round_trip() {
        assert_eq!(unescape(r#"a\"b\\c\nd\te"#), "a\"b\\c\nd\te");
        assert_eq!(unescape(r"a\/b\rc"), "a/b\rc");
    }

    #[test]
    fn unicode_escape_bmp() {
        assert_eq!(unescape("\\u4f60\\u597d"), "你好");
    }

    #[test]
    fn unicode_escape_surrogate_pair() {
        assert_eq!(unescape("\\ud83e\\udd80"), "🦀");
    }

    #[test]
    fn malformed_unicode_kept_literally() {
        assert_eq!(unescape(r"\uZZZZ"), "\\uZZZZ");
        assert_eq!(unescape(r"\ud83e alone"), "\\ud83e alone");
    }

    #[test]
    fn unknown_escape_kept_literally() {
        assert_eq!(unescape(r"\q"), "\\q");
    }

    #[test]
    fn trailing_backslash_kept() {
        assert_eq!(unescape("abc\\"), "abc\\");
    }
}
