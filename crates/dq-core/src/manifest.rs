use serde::{Deserialize, Serialize};

use crate::table::{DEFAULT_WEIGHT, Matrix, cell, conform};

/// Manifeste d'une quilt : forme de la grille, chemins des tuiles, poids et
/// cellules éligibles au focus.
///
/// C'est le contrat lu par le consommateur de sélection de focus.
/// `paths`, `weights` et `focusable` ont toujours `row_count` lignes de
/// `col_count` entrées.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Nombre de lignes de la grille.
    pub row_count: usize,
    /// Nombre de colonnes de la grille.
    pub col_count: usize,
    /// Nom de fichier de chaque tuile, relatif au dossier du manifeste.
    pub paths: Matrix<String>,
    /// Fréquence relative de focus de chaque cellule.
    pub weights: Matrix<u32>,
    /// True si la cellule contient une photo.
    pub focusable: Matrix<bool>,
}

/// One cell of a manifest, as seen by a focus-selection consumer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManifestCell<'a> {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
    /// Tile file name.
    pub path: &'a str,
    /// Selection weight.
    pub weight: u32,
    /// Whether the cell holds a photo.
    pub focusable: bool,
}

impl Manifest {
    /// Assemble le manifeste en ramenant chaque matrice à `row_count`×`col_count`.
    ///
    /// Les poids manquants valent 1, les cellules manquantes ne sont pas focusables.
    ///
    /// # Example
    /// ```
    /// use dq_core::manifest::Manifest;
    /// let m = Manifest::build(1, 2, vec![vec!["a.jpg".into(), "b.jpg".into()]], vec![], vec![vec![true]]);
    /// assert_eq!(m.weights, vec![vec![1, 1]]);
    /// assert_eq!(m.focusable, vec![vec![true, false]]);
    /// ```
    #[must_use]
    pub fn build(
        row_count: usize,
        col_count: usize,
        paths: Matrix<String>,
        weights: Matrix<u32>,
        focusable: Matrix<bool>,
    ) -> Self {
        Self {
            row_count,
            col_count,
            paths: conform(&paths, row_count, col_count, String::new()),
            weights: conform(&weights, row_count, col_count, DEFAULT_WEIGHT),
            focusable: conform(&focusable, row_count, col_count, false),
        }
    }

    /// Sérialise en JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Relit un manifeste JSON.
    ///
    /// # Errors
    /// Returns an error if `text` is not a manifest.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Nombre de cellules contenant une photo.
    #[must_use]
    pub fn focusable_count(&self) -> usize {
        self.focusable.iter().flatten().filter(|&&f| f).count()
    }

    /// Itère sur les cellules en ordre row-major.
    ///
    /// Un manifeste relu et mal formé saute les cellules incomplètes.
    pub fn cells(&self) -> impl Iterator<Item = ManifestCell<'_>> {
        (0..self.row_count).flat_map(move |row| {
            (0..self.col_count).filter_map(move |col| {
                Some(ManifestCell {
                    row,
                    col,
                    path: cell(&self.paths, row, col).map(String::as_str)?,
                    weight: *cell(&self.weights, row, col)?,
                    focusable: *cell(&self.focusable, row, col)?,
                })
            })
        })
    }
}
