//! Compose the rasterized template into a single-page PDF

use crate::raster::Bitmap;
use crate::Result;
use pdf_core::{ImageScaleMode, PageConfig, PdfDocument, Rect};
use serde::{Deserialize, Serialize};

/// How the bitmap is placed on the page
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PageFit {
    /// Keep the aspect ratio and center; margins on the non-dominant axis
    #[default]
    Letterbox,
    /// Fill the page exactly
    Stretch,
}

impl From<PageFit> for ImageScaleMode {
    fn from(fit: PageFit) -> Self {
        match fit {
            PageFit::Letterbox => ImageScaleMode::FitBox,
            PageFit::Stretch => ImageScaleMode::Stretch,
        }
    }
}

/// Normalize `value` to a link target if it looks like a web address
///
/// Accepts `http://` and `https://` URLs and bare `www.` hosts, which are
/// promoted to `https://`.
pub fn web_address(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return None;
    }

    let lower = value.to_ascii_lowercase();
    for scheme in ["https://", "http://"] {
        if let Some(rest) = lower.strip_prefix(scheme) {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            return (!host.is_empty()).then(|| value.to_string());
        }
    }

    if lower.starts_with("www.") && lower.len() > 4 {
        return Some(format!("https://{value}"));
    }

    None
}

/// Build the one-page PDF for `bitmap`
///
/// `link` adds an invisible clickable rectangle (page units, top-left
/// origin) opening the given address.
pub fn compose_pdf(
    bitmap: &Bitmap,
    page: &PageConfig,
    fit: PageFit,
    link: Option<(Rect, &str)>,
) -> Result<Vec<u8>> {
    let mut doc = PdfDocument::new(*page);
    let page_number = doc.add_blank_page()?;

    let placed = doc.insert_image_fitted(&bitmap.png, page_number, fit.into())?;
    log::debug!(
        "placed {}x{} bitmap at ({:.2}, {:.2}) size {:.2}x{:.2} ({fit:?})",
        bitmap.width,
        bitmap.height,
        placed.x,
        placed.y,
        placed.width,
        placed.height
    );

    if let Some((rect, uri)) = link {
        doc.add_link(page_number, rect, uri)?;
    }

    Ok(doc.to_bytes()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_web_address() {
        assert_eq!(
            web_address(" https://example.com/qrcode "),
            Some("https://example.com/qrcode".to_string())
        );
        assert_eq!(
            web_address("HTTP://Example.com"),
            Some("HTTP://Example.com".to_string())
        );
        assert_eq!(
            web_address("www.example.com"),
            Some("https://www.example.com".to_string())
        );
    }

    #[test]
    fn test_not_web_address() {
        assert_eq!(web_address(""), None);
        assert_eq!(web_address("https://"), None);
        assert_eq!(web_address("https:///path"), None);
        assert_eq!(web_address("example.com"), None);
        assert_eq!(web_address("https://exa mple.com"), None);
        assert_eq!(web_address("javascript:alert(1)"), None);
        assert_eq!(web_address("www."), None);
    }

    #[test]
    fn test_page_fit_mapping() {
        assert_eq!(ImageScaleMode::from(PageFit::Letterbox), ImageScaleMode::FitBox);
        assert_eq!(ImageScaleMode::from(PageFit::Stretch), ImageScaleMode::Stretch);
    }
}
