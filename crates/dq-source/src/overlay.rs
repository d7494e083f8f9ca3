use dq_core::color::parse_color;
use dq_core::frame::TileBuffer;

use crate::error::TransformError;

/// Mélange `content` sur un fond uni de `color`.
///
/// `alpha` = 0 → couleur pure, `alpha` = 1 → photo pure. Chaque canal vaut
/// `fond + (photo - fond) * alpha`, tronqué vers zéro.
///
/// # Errors
/// Returns an error if `alpha` is outside [0.0, 1.0] or `color` is invalid.
///
/// # Example
/// ```
/// use dq_core::frame::TileBuffer;
/// use dq_source::overlay::overlay_color;
/// let white = TileBuffer::filled(100, 100, (255, 255, 255));
/// let out = overlay_color(&white, "#000000", 0.5).unwrap();
/// assert_eq!(out.pixel(0, 0), (127, 127, 127));
/// ```
pub fn overlay_color(
    content: &TileBuffer,
    color: &str,
    alpha: f32,
) -> Result<TileBuffer, TransformError> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(TransformError::InvalidAlpha { alpha });
    }
    let (r, g, b) = parse_color(color)?;
    let base = [r, g, b];

    let data = content
        .data
        .chunks_exact(3)
        .flat_map(|px| {
            let mut out = [0u8; 3];
            for (o, (&fg, &bg)) in out.iter_mut().zip(px.iter().zip(base.iter())) {
                let bg = f32::from(bg);
                *o = (bg + (f32::from(fg) - bg) * alpha).clamp(0.0, 255.0) as u8;
            }
            out
        })
        .collect();

    Ok(TileBuffer::from_raw(content.width, content.height, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_extremes() -> Result<(), TransformError> {
        let photo = TileBuffer::filled(3, 2, (10, 200, 30));
        let pure_color = overlay_color(&photo, "#ff0000", 0.0)?;
        assert_eq!(pure_color, TileBuffer::filled(3, 2, (255, 0, 0)));
        let pure_photo = overlay_color(&photo, "#ff0000", 1.0)?;
        assert_eq!(pure_photo, photo);
        Ok(())
    }

    #[test]
    fn half_blend_truncates() -> Result<(), TransformError> {
        let black = TileBuffer::filled(1, 1, (0, 0, 0));
        let out = overlay_color(&black, "#ffffff", 0.5)?;
        assert_eq!(out.pixel(0, 0), (127, 127, 127));
        Ok(())
    }

    #[test]
    fn does_not_touch_input() -> Result<(), TransformError> {
        let photo = TileBuffer::filled(2, 2, (1, 2, 3));
        let before = photo.clone();
        let _ = overlay_color(&photo, "white", 0.3)?;
        assert_eq!(photo, before);
        Ok(())
    }

    #[test]
    fn rejects_out_of_range_alpha() {
        let photo = TileBuffer::new(1, 1);
        for alpha in [-0.1, 1.5, f32::NAN] {
            assert!(matches!(
                overlay_color(&photo, "#000000", alpha),
                Err(TransformError::InvalidAlpha { .. })
            ));
        }
        assert!(matches!(
            overlay_color(&photo, "mauve-ish", 0.5),
            Err(TransformError::Core(_))
        ));
    }
}
