//! Normalizing user-entered text for display and file names

/// Characters that cannot appear in a download filename
pub const UNSAFE_FILENAME_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Trimmed value, or `placeholder` when nothing is left
///
/// # Examples
/// ```
/// use report_text::safe_text;
/// assert_eq!(safe_text("  Alpha  ", "—"), "Alpha");
/// assert_eq!(safe_text("\n\t", "—"), "—");
/// ```
pub fn safe_text(value: &str, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Trim and collapse every whitespace run into a single space
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First `max` characters of `value`
pub fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Remove date separators (`-`, `/`, `.`) and whitespace
///
/// # Examples
/// ```
/// use report_text::strip_separators;
/// assert_eq!(strip_separators("2024-05-01"), "20240501");
/// assert_eq!(strip_separators("1447/01/01"), "14470101");
/// ```
pub fn strip_separators(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '-' | '/' | '.') && !c.is_whitespace())
        .collect()
}

/// Replace filesystem-unsafe and control characters with `replacement`
pub fn sanitize_filename(value: &str, replacement: char) -> String {
    value
        .chars()
        .map(|c| {
            if UNSAFE_FILENAME_CHARS.contains(&c) || c.is_control() {
                replacement
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_safe_text_keeps_inner_whitespace() {
        assert_eq!(safe_text(" a  b ", "—"), "a  b");
        assert_eq!(safe_text("", "—"), "—");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Alpha \t\n School  "), "Alpha School");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("ثانوية النور", 6), "ثانوية");
        assert_eq!(truncate_chars("abc", 18), "abc");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(
            sanitize_filename(r#"a\b/c:d*e?f"g<h>i|j"#, '-'),
            "a-b-c-d-e-f-g-h-i-j"
        );
        assert_eq!(sanitize_filename("tab\there", '_'), "tab_here");
        assert_eq!(sanitize_filename("ثانوية النور", '-'), "ثانوية النور");
    }
}
