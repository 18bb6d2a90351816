//! Export configuration
//!
//! Every field has a default, so `{}` is a complete configuration.
//!
//! ```json
//! {
//!   "raster": { "backgroundColor": "#0b1220", "scale": 2.2 },
//!   "page": { "orientation": "portrait", "unit": "mm", "format": "a4" },
//!   "pageFit": "letterbox",
//!   "linkOverlay": { "x": 150, "y": 250, "width": 40, "height": 40 },
//!   "text": { "placeholder": "—", "locale": "ar" },
//!   "barcodeFromLink": false
//! }
//! ```

use crate::compose::PageFit;
use crate::raster::RasterOptions;
use crate::Result;
use pdf_core::{PageConfig, Rect};
use report_text::Locale;
use serde::{Deserialize, Serialize};

const DEFAULT_PLACEHOLDER: &str = "—";

/// Rasterizer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RasterConfig {
    pub background_color: String,
    pub scale: f64,
    #[serde(rename = "useCORS")]
    pub use_cors: bool,
    pub logging: bool,
    /// Pass the template's scroll size as the window size
    pub explicit_window_size: bool,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            background_color: "#0b1220".to_string(),
            scale: 2.2,
            use_cors: true,
            logging: false,
            explicit_window_size: true,
        }
    }
}

impl RasterConfig {
    /// Rasterizer options for a template of the given scroll size
    pub fn options(&self, scroll_size: Option<(u32, u32)>) -> RasterOptions {
        let window = scroll_size.filter(|_| self.explicit_window_size);
        RasterOptions {
            background_color: self.background_color.clone(),
            scale: self.scale,
            use_cors: self.use_cors,
            logging: self.logging,
            window_width: window.map(|(w, _)| w),
            window_height: window.map(|(_, h)| h),
        }
    }
}

/// Text substitution and naming settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextConfig {
    /// Shown in place of empty fields; blank falls back to `—`
    pub placeholder: String,
    pub locale: Locale,
    /// Prefix of the download filename
    pub filename_label: String,
    /// Used when the school name is empty
    pub filename_fallback: String,
    /// Render `YYYY-MM-DD` execution dates as long localized dates
    pub localize_execution_date: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            locale: Locale::default(),
            filename_label: "تقرير-تنفيذ-".to_string(),
            filename_fallback: "report".to_string(),
            localize_execution_date: false,
        }
    }
}

impl TextConfig {
    /// Placeholder to substitute, never blank
    pub fn placeholder_text(&self) -> &str {
        if self.placeholder.trim().is_empty() {
            DEFAULT_PLACEHOLDER
        } else {
            &self.placeholder
        }
    }
}

/// Full exporter configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    pub raster: RasterConfig,
    pub page: PageConfig,
    pub page_fit: PageFit,
    /// Clickable region for the link field, in page units from the top-left
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_overlay: Option<Rect>,
    pub text: TextConfig,
    /// Render the link as a QR code when no barcode image is selected
    pub barcode_from_link: bool,
}

impl ExportConfig {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
