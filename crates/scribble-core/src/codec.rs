//! PNG data-URL codec for in-memory rasters.

use crate::encoded::EncodedImage;
use crate::error::{Error, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

const PNG_MEDIA_TYPE: &str = "image/png";

/// Encode a raster losslessly as a `data:image/png;base64,` URL.
pub fn encode_png(pixels: &RgbaImage) -> Result<EncodedImage> {
    let mut bytes = Cursor::new(Vec::new());
    pixels.write_to(&mut bytes, ImageFormat::Png)?;
    let payload = STANDARD.encode(bytes.get_ref());
    log::trace!(
        "encoded {}x{} raster into {} base64 bytes",
        pixels.width(),
        pixels.height(),
        payload.len()
    );
    Ok(EncodedImage::from_parts(PNG_MEDIA_TYPE, &payload))
}

/// Decode an encoded image back into RGBA8 pixels at its native size.
pub fn decode(encoded: &EncodedImage) -> Result<RgbaImage> {
    let media_type = encoded.media_type();
    let format = ImageFormat::from_mime_type(media_type)
        .ok_or_else(|| Error::UnsupportedMediaType(media_type.to_string()))?;
    let bytes = STANDARD.decode(encoded.payload())?;
    let decoded = image::load_from_memory_with_format(&bytes, format)?;
    Ok(decoded.into_rgba8())
}
