/// Image sources and tile transforms for the quilt builder (blank fill,
/// color overlay, square crop, downsize, JPEG I/O).

pub mod blank;
pub mod error;
pub mod image;
pub mod overlay;
pub mod resize;

pub use error::TransformError;
