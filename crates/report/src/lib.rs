//! Report - form-to-PDF export pipeline
//!
//! This crate provides:
//! - The form model (`FormInput`) and the traits the pipeline talks to
//!   (`FormSource`, `PreviewTemplate`, `Rasterizer`, `ArtifactStore`, `ExportView`)
//! - Template population with placeholder substitution and image slots
//! - Reference code and download filename generation
//! - PDF composition of the rasterized template (letterbox or stretch)
//! - `ReportExporter`, which owns the single live artifact handle
//!
//! # Example
//!
//! ```ignore
//! use report::{ExportConfig, ExportContext, ReportExporter};
//!
//! let config = ExportConfig::from_json(config_json)?;
//! let ctx = ExportContext { form, template, rasterizer, store, view };
//! let mut exporter = ReportExporter::new(ctx, config);
//! exporter.run().await;
//! ```

pub mod artifact;
pub mod compose;
pub mod config;
pub mod data_url;
mod exporter;
pub mod form;
pub mod memory;
pub mod naming;
pub mod populate;
pub mod qr;
pub mod raster;
pub mod reference;
pub mod template;
pub mod view;

pub use artifact::{Artifact, ArtifactStore};
pub use compose::{compose_pdf, web_address, PageFit};
pub use config::{ExportConfig, RasterConfig, TextConfig};
pub use exporter::{ExportContext, ExportOutcome, ReportExporter};
pub use form::{FileSelection, FormField, FormInput, FormSource, SelectedFile};
pub use memory::{MemoryArtifactStore, MemoryFile, MemoryTemplate};
pub use naming::artifact_filename;
pub use raster::{Bitmap, RasterOptions, Rasterizer};
pub use reference::ReferenceCode;
pub use template::{ImageSlot, PreviewTemplate, TextSlot, EVIDENCE_SLOTS};
pub use view::ExportView;

use thiserror::Error;

/// Errors that can occur during an export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to read file {0}")]
    FileRead(String),

    #[error("Invalid data URL: {0}")]
    DataUrl(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Rasterization failed: {0}")]
    Raster(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_error_converts() {
        let err: ExportError = pdf_core::PdfError::InvalidPage(2, 1).into();
        assert!(matches!(err, ExportError::Pdf(_)));
        assert!(err.to_string().starts_with("PDF error"));
    }
}
