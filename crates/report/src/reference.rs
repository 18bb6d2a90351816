//! Cosmetic reference code shown on each exported report

use report_text::{collapse_whitespace, strip_separators, truncate_chars};
use std::fmt;

/// Maximum characters taken from the school name
pub const SCHOOL_PART_MAX_CHARS: usize = 18;

/// Length of the random suffix
pub const SUFFIX_LEN: usize = 6;

/// Delimiter between code parts
pub const DELIMITER: &str = "-";

/// Display-only identifier: `date-school-SUFFIX`
///
/// Not unique and not meant for lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceCode(String);

impl ReferenceCode {
    /// Build a code from the school name, execution date and a suffix
    ///
    /// # Examples
    /// ```
    /// use report::ReferenceCode;
    ///
    /// let code = ReferenceCode::build("  Alpha   School ", "2024-05-01", "A1B2C3");
    /// assert_eq!(code.as_str(), "20240501-Alpha School-A1B2C3");
    ///
    /// assert_eq!(ReferenceCode::build("", "", "A1B2C3").as_str(), "A1B2C3");
    /// ```
    pub fn build(school_name: &str, execution_date: &str, suffix: &str) -> Self {
        let base = truncate_chars(&collapse_whitespace(school_name), SCHOOL_PART_MAX_CHARS);
        let date = strip_separators(execution_date);

        let code = [date.as_str(), base.as_str(), suffix]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(DELIMITER);

        Self(code)
    }

    /// Build a code with a fresh random suffix
    pub fn generate(school_name: &str, execution_date: &str) -> Self {
        Self::build(school_name, execution_date, &random_suffix())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Six uppercase hexadecimal characters from a v4 UUID
pub fn random_suffix() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    hex[..SUFFIX_LEN].to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_random_suffix_shape() {
        for _ in 0..32 {
            let suffix = random_suffix();
            assert_eq!(suffix.len(), SUFFIX_LEN);
            assert!(suffix
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        }
    }

    #[test]
    fn test_school_name_truncated() {
        let code = ReferenceCode::build("Northern Regional Secondary School", "", "ABCDEF");
        assert_eq!(code.as_str(), "Northern Regional -ABCDEF");
    }

    #[test]
    fn test_only_date() {
        let code = ReferenceCode::build("   ", "1447/01/01", "ABCDEF");
        assert_eq!(code.to_string(), "14470101-ABCDEF");
    }

    #[test]
    fn test_generate_ends_with_suffix() {
        let code = ReferenceCode::generate("Alpha School", "2024-05-01");
        let suffix = code.as_str().rsplit(DELIMITER).next().unwrap();
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(code.as_str().starts_with("20240501-Alpha School-"));
    }

    #[test]
    fn test_generate_with_empty_inputs_is_suffix_only() {
        let code = ReferenceCode::generate("", "");
        assert_eq!(code.as_str().len(), SUFFIX_LEN);
        assert!(!code.as_str().contains(DELIMITER));
    }
}
