use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unsupported or corrupt photo: {0}")]
    Decode(image::ImageError),

    #[error("PNG encoding failed: {0}")]
    Encode(image::ImageError),
}
