//! Rasterization of the populated template

use crate::data_url;
use crate::{ExportError, Result};
use serde::Serialize;

/// Options handed to the rasterizer
///
/// Serializes to the option object `html2canvas` expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterOptions {
    /// CSS color painted behind the region
    pub background_color: String,

    /// Device pixel multiplier
    pub scale: f64,

    /// Load cross-origin images with CORS
    #[serde(rename = "useCORS")]
    pub use_cors: bool,

    /// Rasterizer console logging
    pub logging: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_width: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_height: Option<u32>,
}

/// A rendered PNG bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Bitmap {
    /// Wrap PNG bytes, reading the size from the header
    pub fn from_png(png: Vec<u8>) -> Result<Self> {
        if !pdf_core::is_png(&png) {
            return Err(ExportError::Raster("bitmap is not a PNG".to_string()));
        }

        let dims = pdf_core::get_dimensions(&png)?;
        if dims.width == 0 || dims.height == 0 {
            return Err(ExportError::Raster("bitmap is empty".to_string()));
        }

        Ok(Self {
            png,
            width: dims.width,
            height: dims.height,
        })
    }

    /// Decode a `data:image/png;base64,...` URI (canvas `toDataURL` output)
    pub fn from_data_url(url: &str) -> Result<Self> {
        let decoded = data_url::decode(url)?;
        Self::from_png(decoded.bytes)
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Turns the populated template region into a bitmap
#[allow(async_fn_in_trait)]
pub trait Rasterizer {
    async fn rasterize(&self, options: &RasterOptions) -> Result<Bitmap>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options() -> RasterOptions {
        RasterOptions {
            background_color: "#0b1220".to_string(),
            scale: 2.2,
            use_cors: true,
            logging: false,
            window_width: Some(794),
            window_height: None,
        }
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        image::DynamicImage::new_rgb8(width, height)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_options_serialize_like_html2canvas() {
        let value = serde_json::to_value(options()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "backgroundColor": "#0b1220",
                "scale": 2.2,
                "useCORS": true,
                "logging": false,
                "windowWidth": 794
            })
        );
    }

    #[test]
    fn test_bitmap_from_data_url() {
        let url = data_url::encode("image/png", &png(30, 20));
        let bitmap = Bitmap::from_data_url(&url).unwrap();
        assert_eq!((bitmap.width, bitmap.height), (30, 20));
        assert_eq!(bitmap.aspect_ratio(), 1.5);
    }

    #[test]
    fn test_bitmap_rejects_jpeg() {
        let jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
        assert!(matches!(Bitmap::from_png(jpeg), Err(ExportError::Raster(_))));
    }
}
