use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Color string that is neither hex, `rgb(...)`, nor a known name.
    #[error("Couleur invalide : {value:?}")]
    InvalidColor {
        /// The offending color string.
        value: String,
    },

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Pixel buffer does not hold exactly `width * height * 3` bytes.
    #[error("Buffer de {len} octets pour {width}×{height} RGB")]
    BufferLength {
        /// Actual buffer length.
        len: usize,
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// A layout table could not be parsed as CSV.
    #[error("CSV illisible : {0}")]
    Table(#[from] csv::Error),
}
