//! Download filename for an exported report

use report_text::sanitize_filename;

/// Substitute for filesystem-unsafe characters
pub const UNSAFE_REPLACEMENT: char = '-';

/// `<label><school name>.pdf`
///
/// The school name is trimmed; an empty name falls back to `fallback`.
///
/// # Examples
/// ```
/// use report::artifact_filename;
///
/// assert_eq!(artifact_filename("Alpha/School: 2", "Report-", "report"), "Report-Alpha-School- 2.pdf");
/// assert_eq!(artifact_filename("  ", "Report-", "report"), "Report-report.pdf");
/// ```
pub fn artifact_filename(school_name: &str, label: &str, fallback: &str) -> String {
    let trimmed = school_name.trim();
    let base = if trimmed.is_empty() {
        fallback.trim()
    } else {
        trimmed
    };

    format!("{label}{}.pdf", sanitize_filename(base, UNSAFE_REPLACEMENT))
}
