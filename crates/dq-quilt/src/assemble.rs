//! Assembleur de grille.
//!
//! La table des couleurs fixe la forme : `row_count` = nombre de lignes,
//! `col_count` = longueur de la ligne 0. Les tables d'images et de poids sont
//! ramenées à cette forme (cellules manquantes = pas d'image, poids 1).
//! Les cellules sont traitées une à une en ordre row-major ; chaque tuile part
//! vers le sink dès qu'elle est prête.

use dq_core::config::QuiltConfig;
use dq_core::manifest::Manifest;
use dq_core::table::{DEFAULT_WEIGHT, Matrix, cell, conform};
use dq_core::traits::{ImageLoader, TileSink};

use crate::cell::process_cell;
use crate::error::QuiltError;

/// Les trois tables d'une quilt, telles que chargées.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    /// Couleur de chaque cellule. Forme de référence.
    pub colors: Matrix<String>,
    /// Nom d'image par cellule, `None` = tuile unie.
    pub images: Matrix<Option<String>>,
    /// Poids par cellule ; `None` si aucune table n'a été fournie.
    pub weights: Option<Matrix<u32>>,
}

impl Layout {
    /// Forme canonique (lignes, colonnes) de la grille.
    ///
    /// # Errors
    /// [`QuiltError::EmptyLayout`] if there is no cell, [`QuiltError::RaggedColors`]
    /// if a color row is shorter than row 0.
    pub fn shape(&self) -> Result<(usize, usize), QuiltError> {
        let cols = self.colors.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(QuiltError::EmptyLayout);
        }
        for (row, colors) in self.colors.iter().enumerate() {
            if colors.len() < cols {
                return Err(QuiltError::RaggedColors {
                    row,
                    len: colors.len(),
                    expected: cols,
                });
            }
        }
        Ok((self.colors.len(), cols))
    }

    /// Signale les lignes qui ne suivent pas la forme canonique.
    fn warn_ragged(&self, cols: usize) {
        for (row, colors) in self.colors.iter().enumerate() {
            if colors.len() > cols {
                log::warn!(
                    "Ligne {row} des couleurs : {} cellules, {} ignorées",
                    colors.len(),
                    colors.len() - cols
                );
            }
        }
        warn_table("images", self.images.iter().map(Vec::len), cols);
        if let Some(weights) = &self.weights {
            warn_table("poids", weights.iter().map(Vec::len), cols);
        }
    }
}

fn warn_table(name: &str, lens: impl Iterator<Item = usize>, cols: usize) {
    for (row, len) in lens.enumerate() {
        if len != cols {
            log::warn!("Table des {name}, ligne {row} : {len} cellules au lieu de {cols}");
        }
    }
}

/// Résultat de l'assemblage, avant sérialisation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assembly {
    /// Nombre de lignes.
    pub row_count: usize,
    /// Nombre de colonnes.
    pub col_count: usize,
    /// Nom de fichier de chaque tuile.
    pub paths: Matrix<String>,
    /// Poids de chaque cellule.
    pub weights: Matrix<u32>,
    /// Cellules contenant une photo.
    pub focusable: Matrix<bool>,
}

impl Assembly {
    /// Construit le manifeste correspondant.
    #[must_use]
    pub fn into_manifest(self) -> Manifest {
        Manifest::build(
            self.row_count,
            self.col_count,
            self.paths,
            self.weights,
            self.focusable,
        )
    }
}

/// Nom de fichier déterministe d'une tuile (indices à partir de 0).
///
/// # Example
/// ```
/// assert_eq!(dq_quilt::tile_name(2, 11), "row2-col11.jpg");
/// ```
#[must_use]
pub fn tile_name(row: usize, col: usize) -> String {
    format!("row{row}-col{col}.jpg")
}

/// Traite toutes les cellules et envoie chaque tuile vers `sink`.
///
/// S'arrête à la première erreur : les tuiles déjà écrites restent en place.
///
/// # Errors
/// Returns the first shape, pipeline or write error.
pub fn assemble(
    layout: &Layout,
    loader: &dyn ImageLoader,
    sink: &mut dyn TileSink,
    config: &QuiltConfig,
) -> Result<Assembly, QuiltError> {
    let (rows, cols) = layout.shape()?;
    layout.warn_ragged(cols);

    let mut paths = Vec::with_capacity(rows);
    let mut focusable = Vec::with_capacity(rows);

    for (r, color_row) in layout.colors.iter().enumerate() {
        let mut path_row = Vec::with_capacity(cols);
        let mut focus_row = Vec::with_capacity(cols);

        for (c, color) in color_row.iter().take(cols).enumerate() {
            let image = cell(&layout.images, r, c).and_then(Option::as_deref);
            let out = process_cell(color, image, loader, config)?;

            let name = tile_name(r, c);
            sink.write_tile(&name, &out.tile).map_err(|source| {
                log::error!("Écriture de {name} échouée : {source:#}");
                QuiltError::Write {
                    name: name.clone(),
                    source,
                }
            })?;
            log::debug!("({r}, {c}) → {name} (focusable : {})", out.focusable);

            path_row.push(name);
            focus_row.push(out.focusable);
        }

        paths.push(path_row);
        focusable.push(focus_row);
    }

    let weights = conform(
        layout.weights.as_deref().unwrap_or_default(),
        rows,
        cols,
        DEFAULT_WEIGHT,
    );

    Ok(Assembly {
        row_count: rows,
        col_count: cols,
        paths,
        weights,
        focusable,
    })
}
