//! Report Text - text handling for report templates
//!
//! This crate provides:
//! - Placeholder substitution for empty values
//! - Whitespace collapsing, character-safe truncation and separator stripping
//! - Filename sanitizing
//! - Localized long dates and timestamps (Arabic and English)
//!
//! # Example
//!
//! ```
//! use report_text::{safe_text, sanitize_filename, Locale, LocaleFormatter};
//!
//! assert_eq!(safe_text("   ", "—"), "—");
//! assert_eq!(sanitize_filename("a/b:c", '-'), "a-b-c");
//! assert_eq!(LocaleFormatter::new(Locale::English).date_long(2024, 5, 1), "May 01, 2024");
//! ```

mod formatter;
mod sanitize;

pub use formatter::{localize_digits, parse_iso_date, Locale, LocaleFormatter};
pub use sanitize::{
    collapse_whitespace, safe_text, sanitize_filename, strip_separators, truncate_chars,
    UNSAFE_FILENAME_CHARS,
};

use thiserror::Error;

/// Errors that can occur during text processing
#[derive(Debug, Error)]
pub enum TextError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type for text operations
pub type Result<T> = std::result::Result<T, TextError>;
