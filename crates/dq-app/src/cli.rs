use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sortie par défaut des outils unitaires.
pub const DEFAULT_OUTPUT: &str = "output.jpg";

/// quilt — Digital quilt builder.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Fichier de configuration TOML (section [quilt]).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Sous-commandes.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a quilt from a layout defined by CSV files.
    Build(BuildArgs),
    /// Create a blank image filled with a solid color.
    Blank(BlankArgs),
    /// Create an overlay image using the given color as a base.
    Overlay(OverlayArgs),
    /// Square and downsize an image.
    Resize(ResizeArgs),
}

/// Arguments de `quilt build`.
#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    /// Path to the colors table.
    #[arg(value_name = "COLORS")]
    pub colors: PathBuf,

    /// Path to the images table.
    #[arg(value_name = "IMAGES")]
    pub images: PathBuf,

    /// Directory to load images from.
    #[arg(short, long, value_name = "DIR", default_value = dq_quilt::build::DEFAULT_IMAGE_SRC)]
    pub src: PathBuf,

    /// Directory to write tiles and the manifest to.
    #[arg(short, long, value_name = "DIR", default_value = dq_quilt::build::DEFAULT_IMAGE_DST)]
    pub dst: PathBuf,

    /// Path to the weights table.
    #[arg(short, long, value_name = "WEIGHTS")]
    pub weights: Option<PathBuf>,

    /// Overlay alpha [0, 1] (override config).
    #[arg(short, long)]
    pub alpha: Option<f32>,

    /// Maximum side of photo tiles (override config).
    #[arg(long, value_name = "DIM")]
    pub dim: Option<u32>,

    /// Side of color-only tiles (override config).
    #[arg(long, value_name = "N")]
    pub tile_size: Option<u32>,

    /// JPEG quality 1-100 (override config).
    #[arg(short, long)]
    pub quality: Option<u8>,
}

/// Arguments de `quilt blank`.
#[derive(clap::Args, Debug)]
pub struct BlankArgs {
    /// Fill color (hex, rgb(...), hsl(...), hsv(...) or CSS name).
    #[arg(value_name = "COLOR")]
    pub color: String,

    /// Side of the image (default: config tile_size).
    #[arg(long, value_name = "N")]
    pub size: Option<u32>,

    /// Path to the desired output file.
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
}

/// Arguments de `quilt overlay`.
#[derive(clap::Args, Debug)]
pub struct OverlayArgs {
    /// Path to the image to overlay.
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Transparency level for the overlay (default: config overlay_alpha).
    #[arg(short, long)]
    pub alpha: Option<f32>,

    /// Background color for the final image.
    #[arg(short, long, default_value = "#000000")]
    pub color: String,

    /// Path to the desired output file.
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
}

/// Arguments de `quilt resize`.
#[derive(clap::Args, Debug)]
pub struct ResizeArgs {
    /// Path to the image to resize.
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Desired square dimension (default: config max_dim).
    #[arg(short, long, value_name = "DIM")]
    pub dim: Option<u32>,

    /// Path to the desired output file.
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
}

impl BuildArgs {
    /// Applique les overrides CLI sur `config`.
    pub fn apply(&self, config: &mut dq_core::QuiltConfig) {
        if let Some(v) = self.alpha {
            config.overlay_alpha = v;
        }
        if let Some(v) = self.dim {
            config.max_dim = v;
        }
        if let Some(v) = self.tile_size {
            config.tile_size = v;
        }
        if let Some(v) = self.quality {
            config.jpeg_quality = v;
        }
    }

    /// Requête de construction correspondante.
    #[must_use]
    pub fn request(&self) -> dq_quilt::BuildRequest {
        dq_quilt::BuildRequest {
            colors: self.colors.clone(),
            images: self.images.clone(),
            weights: self.weights.clone(),
            src: self.src.clone(),
            dst: self.dst.clone(),
        }
    }
}
