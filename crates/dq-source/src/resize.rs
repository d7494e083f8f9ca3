use dq_core::frame::TileBuffer;
use fast_image_resize::images::{Image, ImageRef};
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};

use crate::error::TransformError;

/// Redimensionne `src` en `width`×`height` (Catmull-Rom, RGB 8 bits).
///
/// Rend une copie si la taille est déjà la bonne.
///
/// # Errors
/// Returns an error if a buffer does not match its dimensions or the resize fails.
///
/// # Example
/// ```
/// use dq_core::frame::TileBuffer;
/// use dq_source::resize::resize_tile;
/// let out = resize_tile(&TileBuffer::new(100, 100), 50, 50).unwrap();
/// assert_eq!((out.width, out.height), (50, 50));
/// ```
pub fn resize_tile(src: &TileBuffer, width: u32, height: u32) -> Result<TileBuffer, TransformError> {
    if src.width == width && src.height == height {
        return Ok(src.clone());
    }

    let src_image = ImageRef::new(src.width, src.height, &src.data, PixelType::U8x3)?;
    let mut dst_image = Image::new(width, height, PixelType::U8x3);

    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::CatmullRom));
    Resizer::new().resize(&src_image, &mut dst_image, Some(&options))?;

    Ok(TileBuffer::from_raw(width, height, dst_image.into_vec())?)
}

/// Recadre au carré centré, de côté min(largeur, hauteur).
///
/// L'excédent de l'axe long est partagé en deux ; s'il est impair, le bord
/// de fin (droite ou bas) perd le pixel de plus. Une image déjà carrée est
/// rendue telle quelle.
///
/// # Errors
/// Returns an error if the crop region cannot be extracted.
///
/// # Example
/// ```
/// use dq_core::frame::TileBuffer;
/// use dq_source::resize::square_tile;
/// let wide = TileBuffer::new(200, 100);
/// let sq = square_tile(&wide).unwrap();
/// assert_eq!((sq.width, sq.height), (100, 100));
/// ```
pub fn square_tile(content: &TileBuffer) -> Result<TileBuffer, TransformError> {
    let (w, h) = (content.width, content.height);
    if w == h {
        return Ok(content.clone());
    }
    let side = w.min(h);
    let lead = (w.max(h) - side) / 2;
    let cropped = if w > h {
        content.crop(lead, 0, side, side)?
    } else {
        content.crop(0, lead, side, side)?
    };
    Ok(cropped)
}

/// Réduit une image carrée à `dim`×`dim` si son côté dépasse `dim`,
/// sinon la rend inchangée.
///
/// # Errors
/// Returns [`TransformError::NotSquare`] for non-square input, or a resize error.
///
/// # Example
/// ```
/// use dq_core::frame::TileBuffer;
/// use dq_source::resize::downsize_tile;
/// let big = TileBuffer::new(300, 300);
/// assert_eq!(downsize_tile(&big, 100).unwrap().width, 100);
/// let small = TileBuffer::new(80, 80);
/// assert_eq!(downsize_tile(&small, 100).unwrap().width, 80);
/// ```
pub fn downsize_tile(content: &TileBuffer, dim: u32) -> Result<TileBuffer, TransformError> {
    if !content.is_square() {
        return Err(TransformError::NotSquare {
            width: content.width,
            height: content.height,
        });
    }
    if content.width <= dim {
        return Ok(content.clone());
    }
    resize_tile(content, dim, dim)
}
