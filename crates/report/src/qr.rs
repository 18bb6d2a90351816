//! QR code images for the barcode slot

use crate::{ExportError, Result};
use image::Luma;
use qrcode::{EcLevel, QrCode};

/// Smallest rendered edge in pixels
pub const MIN_QR_SIZE: u32 = 140;

/// Render `data` as a QR code PNG (error correction level M)
pub fn generate_qr_png(data: &str) -> Result<Vec<u8>> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)
        .map_err(|e| ExportError::Image(e.to_string()))?;

    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(MIN_QR_SIZE, MIN_QR_SIZE)
        .build();

    let mut bytes: Vec<u8> = Vec::new();
    image::DynamicImage::ImageLuma8(image)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| ExportError::Image(e.to_string()))?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_png_dimensions() {
        let png = generate_qr_png("https://example.com/qrcode").unwrap();
        let dims = pdf_core::get_dimensions(&png).unwrap();
        assert!(dims.width >= MIN_QR_SIZE);
        assert_eq!(dims.width, dims.height);
    }

    #[test]
    fn test_qr_rejects_oversized_payload() {
        let data = "x".repeat(10_000);
        assert!(matches!(generate_qr_png(&data), Err(ExportError::Image(_))));
    }
}
