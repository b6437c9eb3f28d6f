//! エラー型

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("control point length mismatch: {xs} xs vs {ys} ys")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("invalid region: {0}")]
    ParseRegion(String),

    #[error("invalid gradient: {0}")]
    ParseGradient(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("window error: {0}")]
    Window(#[from] minifb::Error),
}
