//! Chunked-body JSON extraction
//!
//! moOde answers with `Transfer-Encoding: chunked`. Rather than reassembling
//! chunks, the body is scanned line by line:
//!
//! ```text
//! 1a4\r\n                  <- chunk-size marker, skipped
//! {"state":"play",...}\r\n <- first complete JSON object, returned
//! 0\r\n                    <- chunk-size marker, skipped
//! \r\n                     <- blank, skipped
//! ```
//!
//! The JSON object must arrive as one complete line within one chunk. A
//! content line made only of hex digits is taken for a marker and skipped.

/// Check whether a body line parses as a base-16 integer
///
/// Accepts the same forms as a lenient integer parser: surrounding
/// whitespace, an optional sign, an optional `0x`/`0X` prefix and single
/// underscores between digits.
pub fn is_chunk_size_marker(line: &str) -> bool {
    let digits = line.trim();
    let digits = digits.strip_prefix(['+', '-']).unwrap_or(digits);
    let digits = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(rest) => rest.strip_prefix('_').unwrap_or(rest),
        None => digits,
    };

    let mut seen_digit = false;
    let mut last_was_digit = false;
    for c in digits.chars() {
        if c.is_ascii_hexdigit() {
            seen_digit = true;
            last_was_digit = true;
        } else if c == '_' && last_was_digit {
            last_was_digit = false;
        } else {
            return false;
        }
    }

    seen_digit && last_was_digit
}

/// Extract the JSON payload line from a chunked body
///
/// Returns the first non-blank, non-marker line that starts with `{` and
/// ends with `}`, or `None` if no line qualifies.
pub fn extract_json_line(body: &str) -> Option<&str> {
    body.split("\r\n")
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !is_chunk_size_marker(line))
        .find(|line| line.starts_with('{') && line.ends_with('}'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_marker_plain_hex() {
        assert!(is_chunk_size_marker("1a4"));
        assert!(is_chunk_size_marker("0"));
        assert!(is_chunk_size_marker("FFFF"));
        assert!(is_chunk_size_marker("  2b  "));
    }

    #[test]
    fn test_marker_lenient_forms() {
        assert!(is_chunk_size_marker("0x1f"));
        assert!(is_chunk_size_marker("0X1F"));
        assert!(is_chunk_size_marker("-10"));
        assert!(is_chunk_size_marker("+a"));
        assert!(is_chunk_size_marker("1_000"));
        assert!(is_chunk_size_marker("0x_ff"));
    }

    #[test]
    fn test_marker_rejects_non_hex() {
        assert!(!is_chunk_size_marker(""));
        assert!(!is_chunk_size_marker("0x"));
        assert!(!is_chunk_size_marker("1a4;ext=1"));
        assert!(!is_chunk_size_marker("1__0"));
        assert!(!is_chunk_size_marker("10_"));
        assert!(!is_chunk_size_marker("_10"));
        assert!(!is_chunk_size_marker("- 5"));
        assert!(!is_chunk_size_marker("{\"a\":1}"));
        assert!(!is_chunk_size_marker("playing"));
    }

    #[test]
    fn test_extract_typical_moode_body() {
        let body = "5c\r\n{\"state\":\"play\",\"title\":\"Song\"}\r\n0\r\n\r\n";
        assert_eq!(
            extract_json_line(body),
            Some("{\"state\":\"play\",\"title\":\"Song\"}")
        );
    }

    #[test]
    fn test_extract_first_match_wins() {
        let body = "a\r\n{\"n\":1}\r\nb\r\n{\"n\":2}\r\n0\r\n";
        assert_eq!(extract_json_line(body), Some("{\"n\":1}"));
    }

    #[test]
    fn test_extract_skips_whitespace_lines() {
        let body = "   \r\n\t\r\n{}\r\n";
        assert_eq!(extract_json_line(body), Some("{}"));
    }

    #[test]
    fn test_extract_requires_both_braces() {
        assert_eq!(extract_json_line("10\r\n{\"open\":1\r\n0\r\n"), None);
        assert_eq!(extract_json_line("10\r\n\"close\":1}\r\n0\r\n"), None);
        assert_eq!(extract_json_line(" {\"lead\":1}\r\n"), None);
        assert_eq!(extract_json_line(""), None);
    }

    #[test]
    fn test_extract_json_split_across_lines_is_not_reassembled() {
        let body = "8\r\n{\"a\":\r\n6\r\n\"b\"}\r\n0\r\n";
        assert_eq!(extract_json_line(body), None);
    }

    #[test]
    fn test_extract_lf_only_body_is_single_line() {
        // Only CRLF separates lines
        let body = "5\n{\"a\":1}\n0\n";
        assert_eq!(extract_json_line(body), None);
    }

    proptest! {
        #[test]
        fn prop_extract_ignores_surrounding_markers(
            before in proptest::collection::vec(0u32..0x10000, 0..6),
            after in proptest::collection::vec(0u32..0x10000, 0..6),
            value in "[a-zA-Z ]{0,24}",
        ) {
            let json = format!("{{\"title\":\"{}\"}}", value);
            let mut body = String::new();
            for size in &before {
                body.push_str(&format!("{:x}\r\n", size));
            }
            body.push_str(&json);
            body.push_str("\r\n");
            for size in &after {
                body.push_str(&format!("{:X}\r\n", size));
            }
            body.push_str("\r\n");

            prop_assert_eq!(extract_json_line(&body), Some(json.as_str()));
        }

        #[test]
        fn prop_extract_none_without_object_line(
            lines in proptest::collection::vec("[a-z0-9 \"{:]{0,16}", 0..8),
        ) {
            // Generated lines never end with '}'
            let body = lines.join("\r\n");
            prop_assert_eq!(extract_json_line(&body), None);
        }
    }
}
