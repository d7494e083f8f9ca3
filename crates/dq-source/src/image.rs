use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dq_core::frame::TileBuffer;
use dq_core::traits::{ImageLoader, TileSink};
use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;

/// Charge une image depuis le disque, convertie en RGB.
///
/// # Errors
/// Returns an error if the image cannot be opened or decoded.
///
/// # Example
/// ```no_run
/// use dq_source::image::load_image;
/// use std::path::Path;
/// let tile = load_image(Path::new("photo.jpg")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<TileBuffer> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    log::debug!("{} : {width}×{height}", path.display());
    Ok(TileBuffer::from_raw(width, height, rgb.into_raw())?)
}

/// Encode une tuile en JPEG avec la qualité donnée [1, 100].
///
/// # Errors
/// Returns an error if the file cannot be created or encoding fails.
pub fn save_jpeg(tile: &TileBuffer, path: &Path, quality: u8) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Impossible de créer {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100))
        .encode(&tile.data, tile.width, tile.height, ExtendedColorType::Rgb8)
        .with_context(|| format!("Encodage JPEG échoué : {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

/// Écrit une tuile ; le format suit l'extension (`.jpg`/`.jpeg` → JPEG avec
/// `quality`, sinon le format déduit par `image`).
///
/// # Errors
/// Returns an error if the format is unknown or writing fails.
pub fn save_tile(tile: &TileBuffer, path: &Path, quality: u8) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    if ext == "jpg" || ext == "jpeg" {
        return save_jpeg(tile, path, quality);
    }
    let img = image::RgbImage::from_raw(tile.width, tile.height, tile.data.clone())
        .context("Buffer RGB incohérent")?;
    img.save(path)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))
}

/// Résout les noms de la table des images relativement à un dossier source.
#[derive(Clone, Debug)]
pub struct DirImageLoader {
    root: PathBuf,
}

impl DirImageLoader {
    /// Loader rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageLoader for DirImageLoader {
    fn load(&self, name: &str) -> Result<TileBuffer> {
        load_image(&self.root.join(name))
    }
}

/// Écrit chaque tuile en JPEG dans un dossier de destination existant.
#[derive(Clone, Debug)]
pub struct JpegDirSink {
    dir: PathBuf,
    quality: u8,
}

impl JpegDirSink {
    /// Sink writing into `dir` at JPEG `quality`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, quality: u8) -> Self {
        Self {
            dir: dir.into(),
            quality,
        }
    }
}

impl TileSink for JpegDirSink {
    fn write_tile(&mut self, name: &str, tile: &TileBuffer) -> Result<()> {
        save_jpeg(tile, &self.dir.join(name), self.quality)
    }
}
