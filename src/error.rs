//! Errors of the fallible boundary operations
//!
//! Rendering itself never fails; degenerate geometry produces empty output.

use thiserror::Error;

/// Crate error
#[derive(Debug, Error)]
pub enum Error {
    /// Serialized path buffer shorter than its vertex count requires
    #[error("path buffer truncated: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },
    /// Serialized command word that is not a path command
    #[error("invalid path command word {0:#x}")]
    BadCommand(u32),
    /// Image encoding or decoding
    #[error("image: {0}")]
    Image(#[from] image::ImageError),
    /// Font loading or glyph decomposition
    #[error("font: {0}")]
    Font(String),
}
