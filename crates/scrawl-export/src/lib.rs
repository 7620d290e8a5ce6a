//! PNG export
//!
//! The last hop: a finished [`Canvas`] becomes PNG bytes via the `image`
//! crate's encoder. Encode failures are surfaced as [`ExportError`] with
//! the canvas geometry attached; they never abort the process.

use image::{ImageEncoder, RgbaImage};

use scrawl_core::{
    error::{ExportError, Result},
    Canvas,
};

/// Encode a canvas as a PNG byte stream
///
/// Returns a valid PNG with IHDR, IDAT, and IEND chunks.
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>> {
    // Guard the buffer shape before handing it to the encoder
    let expected = (canvas.width() as usize) * (canvas.height() as usize) * 4;
    if canvas.data().len() != expected {
        return Err(ExportError::EncodingFailed(format!(
            "buffer is {} bytes, expected {} for {}x{} RGBA",
            canvas.data().len(),
            expected,
            canvas.width(),
            canvas.height()
        ))
        .into());
    }

    let img: RgbaImage =
        image::ImageBuffer::from_raw(canvas.width(), canvas.height(), canvas.data().to_vec())
            .ok_or_else(|| {
                ExportError::EncodingFailed("failed to create image buffer from canvas".into())
            })?;

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );

    encoder
        .write_image(
            img.as_raw(),
            canvas.width(),
            canvas.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| {
            ExportError::EncodingFailed(format!(
                "PNG encoding failed for {}x{} canvas: {}",
                canvas.width(),
                canvas.height(),
                e
            ))
        })?;

    Ok(png_data)
}

/// The PNG file extension, for callers that build output paths
pub const EXTENSION: &str = "png";

/// The PNG MIME type, for callers serving the bytes over HTTP
pub const MIME_TYPE: &str = "image/png";
