use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

use crate::surface::Surface;

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

#[derive(Error, Debug)]
pub enum DataUrlError {
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("not an image data URL")]
    NotImage,

    #[error("data URL is not base64 encoded")]
    NotBase64,

    #[error("invalid base64 payload: {0}")]
    Payload(#[from] base64::DecodeError),
}

/// Encodes the surface as a lossless 8-bit RGB PNG wrapped in a data URL.
pub fn encode_png_data_url(surface: &Surface) -> Result<String, DataUrlError> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, surface.width(), surface.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(surface.as_rgb())?;
        writer.finish()?;
    }
    let mut url = String::with_capacity(PNG_DATA_URL_PREFIX.len() + bytes.len() * 4 / 3 + 4);
    url.push_str(PNG_DATA_URL_PREFIX);
    STANDARD.encode_string(&bytes, &mut url);
    Ok(url)
}

/// Extracts the raw bytes of a base64 `data:image/...` URL.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, DataUrlError> {
    let url = url.trim();
    if !url.starts_with("data:image") {
        return Err(DataUrlError::NotImage);
    }
    let (header, payload) = url.split_once(',').ok_or(DataUrlError::NotBase64)?;
    if !header.ends_with(";base64") {
        return Err(DataUrlError::NotBase64);
    }
    Ok(STANDARD.decode(payload)?)
}
