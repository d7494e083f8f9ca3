use std::fmt;
use std::path::PathBuf;

use dq_source::TransformError;
use thiserror::Error;

/// Étape du pipeline photo d'une cellule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Mélange couleur/photo.
    Overlay,
    /// Recadrage carré.
    Square,
    /// Réduction à la dimension maximale.
    Downsize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Overlay => "overlay",
            Self::Square => "square",
            Self::Downsize => "downsize",
        })
    }
}

/// Errors that abort a quilt build.
#[derive(Error, Debug)]
pub enum QuiltError {
    /// A photo transform failed.
    #[error("Étape {stage} échouée pour {image}")]
    Stage {
        /// Failing stage.
        stage: Stage,
        /// File name from the image table.
        image: String,
        /// Underlying transform error.
        #[source]
        source: TransformError,
    },

    /// A photo could not be opened or decoded.
    #[error("Impossible de charger l'image {image}")]
    Load {
        /// File name from the image table.
        image: String,
        /// Underlying I/O or decode error.
        #[source]
        source: anyhow::Error,
    },

    /// A color-only tile could not be generated.
    #[error("Tuile unie impossible pour la couleur {color:?}")]
    Blank {
        /// Cell color.
        color: String,
        /// Underlying error.
        #[source]
        source: TransformError,
    },

    /// The color table has no cells.
    #[error("Table des couleurs vide")]
    EmptyLayout,

    /// A color row is shorter than row 0.
    #[error("Ligne {row} de la table des couleurs : {len} cellules, {expected} attendues")]
    RaggedColors {
        /// Row index.
        row: usize,
        /// Cells in that row.
        len: usize,
        /// Cells in row 0.
        expected: usize,
    },

    /// A layout table could not be read.
    #[error("Lecture de la table {path} échouée")]
    Table {
        /// Table path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: anyhow::Error,
    },

    /// The destination directory could not be created.
    #[error("Création du dossier {path} échouée")]
    Destination {
        /// Destination path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A tile could not be written.
    #[error("Écriture de la tuile {name} échouée")]
    Write {
        /// Tile file name.
        name: String,
        /// Underlying error.
        #[source]
        source: anyhow::Error,
    },

    /// The manifest could not be written.
    #[error("Écriture du manifeste {path} échouée")]
    Manifest {
        /// Manifest path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: anyhow::Error,
    },
}

impl QuiltError {
    /// Étape fautive, si l'erreur vient du pipeline photo.
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
