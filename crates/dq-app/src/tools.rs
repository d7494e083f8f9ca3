//! Outils unitaires : une transformation, un fichier en sortie.

use anyhow::{Context, Result};
use dq_core::config::QuiltConfig;
use dq_source::blank::create_blank_tile;
use dq_source::image::{load_image, save_tile};
use dq_source::overlay::overlay_color;
use dq_source::resize::{downsize_tile, square_tile};

use crate::cli::{BlankArgs, OverlayArgs, ResizeArgs};

/// `quilt blank` : image carrée unie.
///
/// # Errors
/// Returns an error if the color is invalid or the file cannot be written.
pub fn run_blank(args: &BlankArgs, config: &QuiltConfig) -> Result<()> {
    let size = args.size.unwrap_or(config.tile_size);
    let tile = create_blank_tile(&args.color, size, size)
        .with_context(|| format!("Couleur {:?}", args.color))?;
    save_tile(&tile, &args.output, config.jpeg_quality)?;
    log::info!("{}×{} {} → {}", size, size, args.color, args.output.display());
    Ok(())
}

/// `quilt overlay` : mélange une photo sur un fond uni.
///
/// # Errors
/// Returns an error if loading, blending or writing fails.
pub fn run_overlay(args: &OverlayArgs, config: &QuiltConfig) -> Result<()> {
    let alpha = args.alpha.unwrap_or(config.overlay_alpha);
    let content = load_image(&args.image)?;
    let tile = overlay_color(&content, &args.color, alpha)
        .with_context(|| format!("Overlay de {}", args.image.display()))?;
    save_tile(&tile, &args.output, config.jpeg_quality)?;
    log::info!("{} → {}", args.image.display(), args.output.display());
    Ok(())
}

/// `quilt resize` : carré puis réduction.
///
/// # Errors
/// Returns an error if loading, resizing or writing fails.
pub fn run_resize(args: &ResizeArgs, config: &QuiltConfig) -> Result<()> {
    let dim = args.dim.unwrap_or(config.max_dim).max(1);
    let content = load_image(&args.image)?;
    let squared = square_tile(&content)
        .with_context(|| format!("Recadrage de {}", args.image.display()))?;
    let tile = downsize_tile(&squared, dim)
        .with_context(|| format!("Réduction de {}", args.image.display()))?;
    save_tile(&tile, &args.output, config.jpeg_quality)?;
    log::info!(
        "{} → {} ({}×{})",
        args.image.display(),
        args.output.display(),
        tile.width,
        tile.height
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_core::frame::TileBuffer;
    use std::path::PathBuf;

    #[test]
    fn blank_tool_writes_requested_size() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let output = dir.path().join("blank.png");
        let args = BlankArgs {
            color: "#ff0000".into(),
            size: Some(12),
            output: output.clone(),
        };
        run_blank(&args, &QuiltConfig::default())?;
        assert_eq!(load_image(&output)?, TileBuffer::filled(12, 12, (255, 0, 0)));
        Ok(())
    }

    #[test]
    fn resize_tool_squares_then_downsizes() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("wide.png");
        save_tile(&TileBuffer::filled(90, 30, (0, 0, 255)), &input, 90)?;
        let output = dir.path().join("out.png");
        let args = ResizeArgs {
            image: input,
            dim: Some(20),
            output: output.clone(),
        };
        run_resize(&args, &QuiltConfig::default())?;
        let out = load_image(&output)?;
        assert_eq!((out.width, out.height), (20, 20));
        Ok(())
    }

    #[test]
    fn overlay_tool_rejects_bad_alpha() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("in.png");
        save_tile(&TileBuffer::filled(4, 4, (255, 255, 255)), &input, 90)?;
        let args = OverlayArgs {
            image: input,
            alpha: Some(2.0),
            color: "#000000".into(),
            output: dir.path().join("out.png"),
        };
        assert!(run_overlay(&args, &QuiltConfig::default()).is_err());
        assert!(!PathBuf::from(&args.output).exists());
        Ok(())
    }
}
