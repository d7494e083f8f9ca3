use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Nom du manifeste écrit dans le dossier de destination.
pub const METADATA_NAME: &str = "metadata.json";

/// Paramètres de construction d'une quilt.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use dq_core::config::QuiltConfig;
/// let config = QuiltConfig::default();
/// assert_eq!(config.tile_size, 100);
/// assert_eq!(config.max_dim, 1000);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct QuiltConfig {
    /// Côté des tuiles unies (pixels).
    pub tile_size: u32,
    /// Poids de la photo dans le mélange couleur/photo [0.0, 1.0].
    pub overlay_alpha: f32,
    /// Côté maximal d'une tuile photo après réduction.
    pub max_dim: u32,
    /// Qualité JPEG des tuiles [1, 100].
    pub jpeg_quality: u8,
    /// File name of the manifest inside the destination directory.
    pub metadata_name: String,
}

impl Default for QuiltConfig {
    fn default() -> Self {
        Self {
            tile_size: 100,
            overlay_alpha: 0.5,
            max_dim: 1000,
            jpeg_quality: 75,
            metadata_name: METADATA_NAME.to_string(),
        }
    }
}

impl QuiltConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization and CLI overrides.
    pub fn clamp_all(&mut self) {
        self.tile_size = self.tile_size.max(1);
        self.max_dim = self.max_dim.max(1);
        self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        self.overlay_alpha = if self.overlay_alpha.is_nan() {
            0.5
        } else {
            self.overlay_alpha.clamp(0.0, 1.0)
        };
        if self.metadata_name.trim().is_empty() {
            self.metadata_name = METADATA_NAME.to_string();
        }
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    quilt: Option<QuiltSection>,
}

/// Quilt section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct QuiltSection {
    tile_size: Option<u32>,
    overlay_alpha: Option<f32>,
    max_dim: Option<u32>,
    jpeg_quality: Option<u8>,
    metadata_name: Option<String>,
}

/// Parse un texte TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this schema.
///
/// # Example
/// ```
/// use dq_core::config::parse_config;
/// let config = parse_config("[quilt]\nmax_dim = 500\n").unwrap();
/// assert_eq!(config.max_dim, 500);
/// assert_eq!(config.tile_size, 100);
/// ```
pub fn parse_config(content: &str) -> Result<QuiltConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = QuiltConfig::default();
    if let Some(q) = file.quilt {
        if let Some(v) = q.tile_size {
            config.tile_size = v;
        }
        if let Some(v) = q.overlay_alpha {
            config.overlay_alpha = v;
        }
        if let Some(v) = q.max_dim {
            config.max_dim = v;
        }
        if let Some(v) = q.jpeg_quality {
            config.jpeg_quality = v;
        }
        if let Some(v) = q.metadata_name {
            config.metadata_name = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use dq_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("quilt.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<QuiltConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Config invalide : {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() -> Result<()> {
        assert_eq!(parse_config("")?, QuiltConfig::default());
        Ok(())
    }

    #[test]
    fn out_of_range_values_are_clamped() -> Result<()> {
        let config = parse_config(
            "[quilt]\noverlay_alpha = 1.7\ntile_size = 0\njpeg_quality = 0\nmetadata_name = \"\"\n",
        )?;
        assert!((config.overlay_alpha - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.tile_size, 1);
        assert_eq!(config.jpeg_quality, 1);
        assert_eq!(config.metadata_name, METADATA_NAME);
        Ok(())
    }

    #[test]
    fn load_from_disk() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("quilt.toml");
        std::fs::write(&path, "[quilt]\njpeg_quality = 90\n")?;
        assert_eq!(load_config(&path)?.jpeg_quality, 90);
        assert!(load_config(&dir.path().join("missing.toml")).is_err());
        Ok(())
    }

    #[test]
    fn unknown_type_is_an_error() {
        assert!(parse_config("[quilt]\nmax_dim = \"big\"\n").is_err());
    }
}
