use image::GenericImageView;

use crate::ImageLoadError;

/// A fully decoded image, ready to be shown in its placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

/// Decodes the bytes to make sure the asset is displayable; the encoded
/// bytes are kept for the sink.
pub fn decode_image(url: &str, bytes: Vec<u8>) -> Result<LoadedImage, ImageLoadError> {
    let decoded =
        image::load_from_memory(&bytes).map_err(|err| ImageLoadError::Decode(err.to_string()))?;
    let (width, height) = decoded.dimensions();
    Ok(LoadedImage {
        url: url.to_string(),
        width,
        height,
        bytes,
    })
}
