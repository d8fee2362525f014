use std::io::Cursor;

use image::{ImageError, ImageReader, Limits, RgbaImage};

use super::{error::RenderError, surface::Rect};

/// A decoded photo ready to be drawn.
#[derive(Debug, Clone)]
pub struct Photo {
    image: RgbaImage,
}

impl Photo {
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.image
    }
}

/// Turns uploaded bytes into a [`Photo`].
pub trait PhotoDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<Photo, RenderError>;
}

/// Longest accepted photo side, in pixels.
pub const MAX_PHOTO_SIDE: u32 = 8192;
const MAX_PHOTO_ALLOC: u64 = 192 * 1024 * 1024;

/// Decodes any format the `image` crate was built with, rejecting photos
/// whose header declares more than [`MAX_PHOTO_SIDE`] on either side.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageDecoder;

impl PhotoDecoder for ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Photo, RenderError> {
        let mut reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| RenderError::Decode(ImageError::IoError(e)))?;
        let mut limits = Limits::default();
        limits.max_image_width = Some(MAX_PHOTO_SIDE);
        limits.max_image_height = Some(MAX_PHOTO_SIDE);
        limits.max_alloc = Some(MAX_PHOTO_ALLOC);
        reader.limits(limits);

        let decoded = reader.decode().map_err(RenderError::Decode)?;
        Ok(Photo::from_rgba(decoded.to_rgba8()))
    }
}

/// Largest rectangle with the source aspect ratio that fits in `region`,
/// centered on it. `None` for a source with no area.
pub fn fit_within(source_width: u32, source_height: u32, region: Rect) -> Option<Rect> {
    if source_width == 0 || source_height == 0 {
        return None;
    }
    let (sw, sh) = (source_width as f32, source_height as f32);
    let ratio = (region.width / sw).min(region.height / sh);
    let width = sw * ratio;
    let height = sh * ratio;
    Some(Rect::new(
        region.x + (region.width - width) / 2.0,
        region.y + (region.height - height) / 2.0,
        width,
        height,
    ))
}
