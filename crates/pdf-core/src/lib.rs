//! PDF Core - Single-page PDF composition
//!
//! This crate provides functionality for:
//! - Creating a fresh document with a configured page format and orientation
//! - Placing a PNG over the page, stretched or aspect-preserving
//! - Adding invisible URI link annotations
//! - Serializing the result, optionally compressed
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{ImageScaleMode, PageConfig, PdfDocument};
//!
//! let mut doc = PdfDocument::new(PageConfig::default());
//! let page = doc.add_blank_page()?;
//! doc.insert_image_fitted(&png_bytes, page, ImageScaleMode::FitBox)?;
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod image;
mod page;

pub use document::PdfDocument;
pub use image::{
    calculate_scaled_dimensions, center_in_box, get_dimensions, is_png, ImageDimensions,
    ImageScaleMode,
};
pub use page::{Orientation, PageConfig, PageFormat, Rect, Unit};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("Invalid link target: {0}")]
    InvalidLink(String),

    #[error("PDF parsing error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PdfError::InvalidPage(3, 1);
        assert_eq!(err.to_string(), "Invalid page number: 3 (document has 1 pages)");

        let err = PdfError::InvalidLink(String::new());
        assert!(err.to_string().starts_with("Invalid link target"));
    }
}
