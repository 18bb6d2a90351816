//! Image handling for PDF documents

use crate::{PdfError, Result};
use image::{DynamicImage, ImageDecoder, ImageReader};
use lopdf::{Dictionary, Object, Stream};
use std::io::{Cursor, Write};

impl From<image::ImageError> for PdfError {
    fn from(err: image::ImageError) -> Self {
        PdfError::ImageError(err.to_string())
    }
}

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// How an image is sized into its target box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageScaleMode {
    /// Fill the box exactly, ignoring aspect ratio
    #[default]
    Stretch,
    /// Fit within bounding box, preserving aspect ratio
    FitBox,
}

/// Calculate display dimensions based on scaling mode
///
/// # Arguments
/// * `original_width` - Original image width in pixels
/// * `original_height` - Original image height in pixels
/// * `target_width` - Target width in points
/// * `target_height` - Target height in points
/// * `mode` - Scaling mode
///
/// # Returns
/// (actual_width, actual_height) in points
pub fn calculate_scaled_dimensions(
    original_width: u32,
    original_height: u32,
    target_width: f64,
    target_height: f64,
    mode: ImageScaleMode,
) -> (f64, f64) {
    if original_width == 0 || original_height == 0 {
        return (target_width, target_height);
    }

    let ow = original_width as f64;
    let oh = original_height as f64;

    match mode {
        ImageScaleMode::Stretch => (target_width, target_height),
        ImageScaleMode::FitBox => {
            let scale = (target_width / ow).min(target_height / oh);
            (ow * scale, oh * scale)
        }
    }
}

/// Offset that centers a `width` x `height` rectangle inside a box
///
/// Returns (x, y) relative to the box origin.
pub fn center_in_box(width: f64, height: f64, box_width: f64, box_height: f64) -> (f64, f64) {
    ((box_width - width) / 2.0, (box_height - height) / 2.0)
}

/// Whether `data` starts with the PNG signature
pub fn is_png(data: &[u8]) -> bool {
    data.starts_with(&PNG_SIGNATURE)
}

/// Image dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Read PNG width and height from the IHDR chunk without decoding pixels
pub fn get_dimensions(data: &[u8]) -> Result<ImageDimensions> {
    if !is_png(data) {
        return Err(PdfError::ImageError("Not a PNG image".to_string()));
    }
    if data.len() < 24 {
        return Err(PdfError::ImageError("PNG data too short".to_string()));
    }

    if &data[12..16] != b"IHDR" {
        return Err(PdfError::ImageError(
            "Invalid PNG: IHDR not found".to_string(),
        ));
    }

    Ok(ImageDimensions {
        width: u32::from_be_bytes([data[16], data[17], data[18], data[19]]),
        height: u32::from_be_bytes([data[20], data[21], data[22], data[23]]),
    })
}

/// Image XObject for PDF embedding
#[derive(Debug, Clone)]
pub struct ImageXObject {
    pub width: u32,
    pub height: u32,
    /// "DeviceRGB" or "DeviceGray"
    pub color_space: String,
    pub bits_per_component: u8,
    /// Flate-encoded sample data
    pub data: Vec<u8>,
}

impl ImageXObject {
    /// Create XObject from PNG data
    ///
    /// Samples are decoded, alpha is blended over white, and the result is
    /// re-encoded with FlateDecode.
    pub fn from_png(data: &[u8]) -> Result<Self> {
        let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
        let decoder = reader.into_decoder()?;

        let (width, height) = decoder.dimensions();
        let color_type = decoder.color_type();
        let image = DynamicImage::from_decoder(decoder)?;

        let (raw, color_space) = match color_type {
            image::ColorType::L8 | image::ColorType::L16 => {
                (image.to_luma8().into_raw(), "DeviceGray")
            }
            image::ColorType::La8 | image::ColorType::La16 => {
                let gray = image
                    .to_luma_alpha8()
                    .pixels()
                    .map(|p| blend_over_white(p[0], p[1]))
                    .collect();
                (gray, "DeviceGray")
            }
            image::ColorType::Rgba8 | image::ColorType::Rgba16 => {
                let rgba = image.to_rgba8();
                let mut rgb = Vec::with_capacity((width * height * 3) as usize);
                for p in rgba.pixels() {
                    rgb.extend_from_slice(&[
                        blend_over_white(p[0], p[3]),
                        blend_over_white(p[1], p[3]),
                        blend_over_white(p[2], p[3]),
                    ]);
                }
                (rgb, "DeviceRGB")
            }
            _ => (image.to_rgb8().into_raw(), "DeviceRGB"),
        };

        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&raw)?;
        let data = encoder.finish()?;

        Ok(Self {
            width,
            height,
            color_space: color_space.to_string(),
            bits_per_component: 8,
            data,
        })
    }

    /// Convert to lopdf Stream object
    pub fn to_pdf_stream(&self) -> Stream {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", self.width as i64);
        dict.set("Height", self.height as i64);
        dict.set(
            "ColorSpace",
            Object::Name(self.color_space.as_bytes().to_vec()),
        );
        dict.set("BitsPerComponent", self.bits_per_component as i64);
        dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
        dict.set("Length", self.data.len() as i64);

        // Already encoded; keep lopdf's compress pass away from it
        Stream::new(dict, self.data.clone()).with_compression(false)
    }
}

fn blend_over_white(value: u8, alpha: u8) -> u8 {
    let a = alpha as f32 / 255.0;
    (value as f32 * a + 255.0 * (1.0 - a)) as u8
}

/// Generate operators to draw image at position
///
/// `x`/`y` are the lower-left corner in PDF (bottom-origin) points.
pub fn generate_image_operators(
    image_name: &str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Vec<u8> {
    format!("q\n{width} 0 0 {height} {x} {y} cm\n/{image_name} Do\nQ\n").into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn png_bytes(img: DynamicImage) -> Vec<u8> {
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn test_is_png() {
        let jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
        assert!(!is_png(&jpeg));
        assert!(is_png(&PNG_SIGNATURE));
        assert!(!is_png(&PNG_SIGNATURE[..4]));
    }

    #[test]
    fn test_jpeg_has_no_dimensions() {
        let jpeg = vec![0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x64, 0x00, 0xC8];
        assert!(matches!(get_dimensions(&jpeg), Err(PdfError::ImageError(_))));
    }

    #[test]
    fn test_png_dimensions() {
        let png = png_bytes(DynamicImage::new_rgb8(150, 75));
        let dims = get_dimensions(&png).unwrap();
        assert_eq!(dims.width, 150);
        assert_eq!(dims.height, 75);
    }

    #[test]
    fn test_png_without_ihdr() {
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x0D]);
        data.extend_from_slice(b"NOTI");
        data.extend_from_slice(&[0u8; 8]);
        assert!(get_dimensions(&data).is_err());
    }

    #[test]
    fn test_xobject_from_rgba_png_blends_alpha() {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 0]));
        let xobject = ImageXObject::from_png(&png_bytes(DynamicImage::ImageRgba8(img))).unwrap();

        assert_eq!(xobject.width, 2);
        assert_eq!(xobject.color_space, "DeviceRGB");

        let stream = xobject.to_pdf_stream();
        let raw = stream.decompressed_content().unwrap();
        // Fully transparent black becomes white
        assert!(raw.iter().all(|&b| b == 255));
    }

    #[test]
    fn test_xobject_from_gray_png() {
        let png = png_bytes(DynamicImage::new_luma8(4, 3));
        let xobject = ImageXObject::from_png(&png).unwrap();
        assert_eq!(xobject.color_space, "DeviceGray");
        assert_eq!((xobject.width, xobject.height), (4, 3));
    }

    #[test]
    fn test_xobject_to_pdf_stream() {
        let xobject = ImageXObject {
            width: 100,
            height: 50,
            color_space: "DeviceRGB".to_string(),
            bits_per_component: 8,
            data: vec![1, 2, 3, 4, 5],
        };

        let stream = xobject.to_pdf_stream();
        let dict = &stream.dict;

        assert_eq!(dict.get(b"Subtype").unwrap().as_name().unwrap(), b"Image");
        assert_eq!(dict.get(b"Width").unwrap().as_i64().unwrap(), 100);
        assert_eq!(dict.get(b"Height").unwrap().as_i64().unwrap(), 50);
        assert_eq!(
            dict.get(b"Filter").unwrap().as_name().unwrap(),
            b"FlateDecode"
        );
        assert_eq!(stream.content, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_generate_image_operators() {
        let ops = String::from_utf8(generate_image_operators("Im1", 100.0, 200.0, 50.0, 75.0))
            .unwrap();
        assert_eq!(ops, "q\n50 0 0 75 100 200 cm\n/Im1 Do\nQ\n");
    }

    #[test]
    fn test_scaled_dimensions_stretch() {
        let (w, h) = calculate_scaled_dimensions(800, 600, 100.0, 200.0, ImageScaleMode::Stretch);
        assert_eq!((w, h), (100.0, 200.0));
    }

    #[test]
    fn test_scaled_dimensions_fit_box() {
        // Width-limited
        let (w, h) = calculate_scaled_dimensions(800, 600, 100.0, 200.0, ImageScaleMode::FitBox);
        assert_eq!((w, h), (100.0, 75.0));

        // Height-limited
        let (w, h) = calculate_scaled_dimensions(600, 800, 200.0, 100.0, ImageScaleMode::FitBox);
        assert_eq!((w, h), (75.0, 100.0));
    }

    #[test]
    fn test_scaled_dimensions_empty_image() {
        let (w, h) = calculate_scaled_dimensions(0, 0, 10.0, 20.0, ImageScaleMode::FitBox);
        assert_eq!((w, h), (10.0, 20.0));
    }

    #[test]
    fn test_center_in_box() {
        assert_eq!(center_in_box(100.0, 75.0, 100.0, 200.0), (0.0, 62.5));
        assert_eq!(center_in_box(10.0, 10.0, 10.0, 10.0), (0.0, 0.0));
    }
}
