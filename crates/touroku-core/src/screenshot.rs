//! Payment screenshot acceptance and client-side re-encoding.
//!
//! Stage 1 of the upload pipeline: decode the user's image, scale so
//! its longer edge is at most [`MAX_EDGE`] pixels (never upscale),
//! and re-encode as JPEG at a fixed quality. This shrinks the payload
//! and normalizes the format before anything leaves the browser.

use image::{DynamicImage, ImageEncoder};
use thiserror::Error;

/// Largest accepted source file, in bytes (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Longest edge of the re-encoded output, in pixels.
pub const MAX_EDGE: u32 = 1024;

/// Fixed JPEG quality for the re-encode.
pub const JPEG_QUALITY: u8 = 80;

/// File extensions accepted by the picker gate.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Errors from the acceptance gate or the re-encode.
///
/// The gate errors (`TooLarge`, `UnsupportedType`) render as field
/// errors on the screenshot input and cause no task transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreenshotError {
    #[error("File size must be less than 5MB")]
    TooLarge,

    #[error("Only PNG/JPG files are allowed")]
    UnsupportedType,

    /// The bytes did not decode as an image.
    #[error("could not read image: {0}")]
    Decode(String),

    /// JPEG encoding failed.
    #[error("JPEG encoding failed: {0}")]
    Encode(String),
}

/// Output of the re-encode stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedScreenshot {
    /// JPEG bytes ready for multipart upload.
    pub bytes: Vec<u8>,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

/// Synchronous acceptance gate, run before any decoding.
///
/// # Errors
///
/// [`ScreenshotError::TooLarge`] above [`MAX_UPLOAD_BYTES`];
/// [`ScreenshotError::UnsupportedType`] for anything but png/jpg/jpeg.
pub fn check_file(name: &str, len: usize) -> Result<(), ScreenshotError> {
    if len > MAX_UPLOAD_BYTES {
        return Err(ScreenshotError::TooLarge);
    }
    let allowed = name.rsplit_once('.').is_some_and(|(_, ext)| {
        ALLOWED_EXTENSIONS
            .iter()
            .any(|a| a.eq_ignore_ascii_case(ext))
    });
    if allowed {
        Ok(())
    } else {
        Err(ScreenshotError::UnsupportedType)
    }
}

/// Decode, downscale, and re-encode the screenshot.
///
/// Images whose longer edge already fits within [`MAX_EDGE`] keep
/// their exact dimensions; larger images are resized with a bilinear
/// filter so the longer edge equals [`MAX_EDGE`], aspect preserved.
///
/// # Errors
///
/// [`ScreenshotError::Decode`] if the bytes are not a decodable image.
/// [`ScreenshotError::Encode`] if JPEG encoding fails.
pub fn prepare(bytes: &[u8]) -> Result<CompressedScreenshot, ScreenshotError> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| ScreenshotError::Decode(e.to_string()))?;

    let scaled = downscale(&decoded);
    let rgb = scaled.to_rgb8();
    let (width, height) = (rgb.width(), rgb.height());

    let mut jpeg = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
    encoder
        .write_image(rgb.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| ScreenshotError::Encode(e.to_string()))?;

    Ok(CompressedScreenshot {
        bytes: jpeg,
        width,
        height,
    })
}

/// Scale so the longer edge is at most [`MAX_EDGE`]; never upscale.
fn downscale(image: &DynamicImage) -> DynamicImage {
    let long_axis = image.width().max(image.height());
    if long_axis <= MAX_EDGE {
        return image.clone();
    }
    image.resize(MAX_EDGE, MAX_EDGE, image::imageops::FilterType::Triangle)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn png_of(w: u32, h: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([64, 128, 192, 255]));
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();
        buf
    }

    #[test]
    fn gate_accepts_png_and_jpg_under_limit() {
        assert!(check_file("shot.png", 1024).is_ok());
        assert!(check_file("shot.JPG", MAX_UPLOAD_BYTES).is_ok());
        assert!(check_file("shot.jpeg", 1).is_ok());
    }

    #[test]
    fn gate_rejects_oversized_files() {
        assert_eq!(
            check_file("shot.png", MAX_UPLOAD_BYTES + 1),
            Err(ScreenshotError::TooLarge)
        );
    }

    #[test]
    fn gate_rejects_other_types() {
        for name in ["shot.gif", "shot.webp", "shot", "shot.pdf"] {
            assert_eq!(check_file(name, 10), Err(ScreenshotError::UnsupportedType));
        }
    }

    #[test]
    fn small_image_keeps_its_dimensions() {
        let out = prepare(&png_of(800, 600)).unwrap();
        assert_eq!((out.width, out.height), (800, 600));
    }

    #[test]
    fn exact_fit_is_not_resized() {
        let out = prepare(&png_of(1024, 400)).unwrap();
        assert_eq!((out.width, out.height), (1024, 400));
    }

    #[test]
    fn landscape_is_scaled_to_the_long_edge() {
        let out = prepare(&png_of(2000, 1000)).unwrap();
        assert_eq!((out.width, out.height), (1024, 512));
    }

    #[test]
    fn portrait_is_scaled_to_the_long_edge() {
        let out = prepare(&png_of(1000, 2000)).unwrap();
        assert_eq!((out.width, out.height), (512, 1024));
    }

    #[test]
    fn output_is_decodable_jpeg() {
        let out = prepare(&png_of(640, 480)).unwrap();
        let format = image::guess_format(&out.bytes).unwrap();
        assert_eq!(format, image::ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&out.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (640, 480));
    }

    #[test]
    fn corrupt_bytes_fail_to_decode() {
        assert!(matches!(
            prepare(&[0xFF, 0x00, 0x12]),
            Err(ScreenshotError::Decode(_))
        ));
    }
}
