use crate::color::Rgb;
use crate::error::CoreError;

/// Buffer de pixels d'une tuile.
///
/// Stocke les pixels en RGB row-major, 3 bytes par pixel.
///
/// # Example
/// ```
/// use dq_core::frame::TileBuffer;
/// let tile = TileBuffer::new(10, 10);
/// assert_eq!(tile.data.len(), 300);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBuffer {
    /// Pixels RGB, row-major, 3 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl TileBuffer {
    /// Crée un buffer noir aux dimensions données.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, (0, 0, 0))
    }

    /// Crée un buffer uniformément rempli de `color`.
    ///
    /// # Example
    /// ```
    /// use dq_core::frame::TileBuffer;
    /// let tile = TileBuffer::filled(2, 3, (255, 0, 0));
    /// assert_eq!(tile.pixel(1, 2), (255, 0, 0));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let (r, g, b) = color;
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * 3);
        for _ in 0..count {
            data.extend_from_slice(&[r, g, b]);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Wrap an existing RGB buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::BufferLength`] if `data` is not `width * height * 3` bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        if data.len() != width as usize * height as usize * 3 {
            return Err(CoreError::BufferLength {
                len: data.len(),
                width,
                height,
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Accès au pixel (x, y) → (r, g, b).
    #[inline]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        match self.data.get(idx..idx + 3) {
            Some(&[r, g, b]) => (r, g, b),
            _ => (0, 0, 0),
        }
    }

    /// True si largeur == hauteur.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Copie la région `width`×`height` dont le coin haut-gauche est (x, y).
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if the region leaves the buffer.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Self, CoreError> {
        let fits_x = x.checked_add(width).is_some_and(|r| r <= self.width);
        let fits_y = y.checked_add(height).is_some_and(|b| b <= self.height);
        if !fits_x || !fits_y {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        let stride = self.width as usize * 3;
        let row_len = width as usize * 3;
        let mut data = Vec::with_capacity(row_len * height as usize);
        for row in y as usize..(y + height) as usize {
            let start = row * stride + x as usize * 3;
            data.extend_from_slice(&self.data[start..start + row_len]);
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }
}
