use anyhow::Result;

use crate::frame::TileBuffer;

/// Ouvre une image source à partir du nom porté par la table des images.
///
/// Implémenté par : `DirImageLoader` (fichiers relatifs à un dossier source).
///
/// # Example
/// ```
/// use dq_core::traits::ImageLoader;
/// use dq_core::frame::TileBuffer;
///
/// struct Gray;
/// impl ImageLoader for Gray {
///     fn load(&self, _name: &str) -> anyhow::Result<TileBuffer> {
///         Ok(TileBuffer::filled(4, 4, (128, 128, 128)))
///     }
/// }
/// assert_eq!(Gray.load("any.jpg").unwrap().width, 4);
/// ```
pub trait ImageLoader {
    /// Décode l'image `name` en RGB.
    fn load(&self, name: &str) -> Result<TileBuffer>;
}

/// Reçoit chaque tuile produite, dès qu'elle est prête.
///
/// Implémenté par : `JpegDirSink` (un fichier JPEG par tuile).
pub trait TileSink {
    /// Persiste `tile` sous le nom `name` (ex. `row0-col1.jpg`).
    ///
    /// Écraser une tuile existante du même nom n'est pas une erreur.
    fn write_tile(&mut self, name: &str, tile: &TileBuffer) -> Result<()>;
}
