//! Error types for the moondisc crate

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("texture error: {0}")]
    Texture(String),

    #[error("shader error: {0}")]
    Shader(String),
}
