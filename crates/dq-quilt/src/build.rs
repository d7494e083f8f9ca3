use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use dq_core::config::QuiltConfig;
use dq_core::manifest::Manifest;
use dq_core::table::{Matrix, load_color_table, load_image_table, load_weight_table};
use dq_source::image::{DirImageLoader, JpegDirSink};

use crate::assemble::{Layout, assemble};
use crate::error::QuiltError;

/// Dossier source par défaut des photos.
pub const DEFAULT_IMAGE_SRC: &str = ".";
/// Dossier de destination par défaut.
pub const DEFAULT_IMAGE_DST: &str = "quilt_data/";

/// Chemins d'une construction de quilt.
#[derive(Clone, Debug)]
pub struct BuildRequest {
    /// Table des couleurs (CSV).
    pub colors: PathBuf,
    /// Table des images (CSV).
    pub images: PathBuf,
    /// Table des poids (CSV), optionnelle.
    pub weights: Option<PathBuf>,
    /// Dossier d'où sont résolus les noms d'images.
    pub src: PathBuf,
    /// Dossier où sont écrits les tuiles et le manifeste.
    pub dst: PathBuf,
}

impl BuildRequest {
    /// Request with the default source and destination directories.
    #[must_use]
    pub fn new(colors: impl Into<PathBuf>, images: impl Into<PathBuf>) -> Self {
        Self {
            colors: colors.into(),
            images: images.into(),
            weights: None,
            src: PathBuf::from(DEFAULT_IMAGE_SRC),
            dst: PathBuf::from(DEFAULT_IMAGE_DST),
        }
    }
}

fn read_table<T>(
    path: &Path,
    parse: impl Fn(&str) -> Result<Matrix<T>, dq_core::CoreError>,
) -> Result<Matrix<T>, QuiltError> {
    let load = || -> anyhow::Result<Matrix<T>> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire {}", path.display()))?;
        Ok(parse(&text)?)
    };
    load().map_err(|source| QuiltError::Table {
        path: path.to_path_buf(),
        source,
    })
}

/// Charge les trois tables de `request` en mémoire.
///
/// # Errors
/// Returns [`QuiltError::Table`] if a table cannot be read or parsed.
pub fn read_layout(request: &BuildRequest) -> Result<Layout, QuiltError> {
    let colors = read_table(&request.colors, load_color_table)?;
    let images = read_table(&request.images, load_image_table)?;
    let weights = match &request.weights {
        Some(path) => Some(read_table(path, load_weight_table)?),
        None => None,
    };
    Ok(Layout {
        colors,
        images,
        weights,
    })
}

/// Crée le dossier de destination. S'il existe déjà, avertit et continue :
/// les tuiles existantes seront écrasées.
///
/// # Errors
/// Returns [`QuiltError::Destination`] if the directory cannot be created.
pub fn prepare_destination(dst: &Path) -> Result<(), QuiltError> {
    if dst.is_dir() {
        log::warn!("Le dossier de destination {} existe déjà", dst.display());
        return Ok(());
    }
    fs::create_dir_all(dst).map_err(|source| QuiltError::Destination {
        path: dst.to_path_buf(),
        source,
    })
}

/// Sérialise `manifest` dans `path`.
///
/// # Errors
/// Returns [`QuiltError::Manifest`] on serialization or I/O failure.
pub fn write_manifest(manifest: &Manifest, path: &Path) -> Result<(), QuiltError> {
    let write = || -> anyhow::Result<()> {
        let json = manifest.to_json().context("Sérialisation JSON")?;
        fs::write(path, json).with_context(|| format!("Impossible d'écrire {}", path.display()))?;
        Ok(())
    };
    write().map_err(|source| QuiltError::Manifest {
        path: path.to_path_buf(),
        source,
    })
}

/// Construit la quilt : tables → tuiles JPEG → manifeste, dans `request.dst`.
///
/// Le manifeste n'est écrit qu'une fois toutes les tuiles écrites. En cas
/// d'échec, les tuiles déjà produites restent sur le disque, sans manifeste.
///
/// # Errors
/// Returns the first [`QuiltError`] encountered.
pub fn run_build(request: &BuildRequest, config: &QuiltConfig) -> Result<Manifest, QuiltError> {
    let layout = read_layout(request)?;
    log::info!(
        "Tables chargées : {} lignes de couleurs, {} lignes d'images, poids {}",
        layout.colors.len(),
        layout.images.len(),
        if layout.weights.is_some() { "fournis" } else { "par défaut" }
    );

    prepare_destination(&request.dst)?;

    let loader = DirImageLoader::new(&request.src);
    let mut sink = JpegDirSink::new(&request.dst, config.jpeg_quality);
    let manifest = assemble(&layout, &loader, &mut sink, config)?.into_manifest();

    let meta_path = request.dst.join(&config.metadata_name);
    log::info!("Écriture du manifeste {}", meta_path.display());
    write_manifest(&manifest, &meta_path)?;

    log::info!(
        "Quilt {}×{} prête, {} cellules focusables",
        manifest.row_count,
        manifest.col_count,
        manifest.focusable_count()
    );
    Ok(manifest)
}
