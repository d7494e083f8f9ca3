use dq_core::CoreError;
use dq_core::color::parse_color;
use dq_core::frame::TileBuffer;

use crate::error::TransformError;

/// Crée une tuile unie de `width`×`height`, entièrement remplie de `color`.
///
/// # Errors
/// Returns an error if the color cannot be parsed or a dimension is zero.
///
/// # Example
/// ```
/// use dq_source::blank::create_blank_tile;
/// let tile = create_blank_tile("#ffffff", 100, 100).unwrap();
/// assert_eq!((tile.width, tile.height), (100, 100));
/// assert_eq!(tile.pixel(0, 0), (255, 255, 255));
/// ```
pub fn create_blank_tile(color: &str, width: u32, height: u32) -> Result<TileBuffer, TransformError> {
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidDimensions { width, height }.into());
    }
    let rgb = parse_color(color)?;
    Ok(TileBuffer::filled(width, height, rgb))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pixel_has_the_color() -> Result<(), TransformError> {
        let tile = create_blank_tile("navy", 7, 3)?;
        assert!(tile.data.chunks_exact(3).all(|p| p == [0, 0, 128]));
        Ok(())
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            create_blank_tile("#nope", 10, 10),
            Err(TransformError::Core(CoreError::InvalidColor { .. }))
        ));
        assert!(matches!(
            create_blank_tile("#000000", 0, 10),
            Err(TransformError::Core(CoreError::InvalidDimensions { .. }))
        ));
    }
}
