use dq_core::CoreError;
use thiserror::Error;

/// Errors raised by the tile transforms.
#[derive(Error, Debug)]
pub enum TransformError {
    /// Overlay alpha outside [0.0, 1.0].
    #[error("Alpha hors de [0, 1] : {alpha}")]
    InvalidAlpha {
        /// The rejected alpha.
        alpha: f32,
    },

    /// Downsize received a non-square image.
    #[error("Image non carrée : {width}×{height}")]
    NotSquare {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Invalid color, dimensions or buffer.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The resize backend rejected a buffer.
    #[error("Buffer de resize invalide : {0}")]
    Buffer(#[from] fast_image_resize::ImageBufferError),

    /// The resize backend failed.
    #[error("Resize failed : {0}")]
    Resize(#[from] fast_image_resize::ResizeError),
}
