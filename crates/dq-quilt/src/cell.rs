use dq_core::config::QuiltConfig;
use dq_core::frame::TileBuffer;
use dq_core::traits::ImageLoader;
use dq_source::TransformError;
use dq_source::blank::create_blank_tile;
use dq_source::overlay::overlay_color;
use dq_source::resize::{downsize_tile, square_tile};

use crate::error::{QuiltError, Stage};

/// Résultat du traitement d'une cellule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellOutput {
    /// Tuile finale.
    pub tile: TileBuffer,
    /// True si la cellule contient une photo.
    pub focusable: bool,
}

/// Produit la tuile d'une cellule.
///
/// Sans image : tuile unie `tile_size`×`tile_size` de `color`, non focusable.
/// Avec image : overlay couleur (alpha `overlay_alpha`) → carré → réduction à
/// `max_dim`, focusable. La première étape qui échoue est journalisée avec le
/// nom du fichier puis remontée ; rien n'est rattrapé.
///
/// # Errors
/// Returns [`QuiltError::Load`], [`QuiltError::Stage`] or [`QuiltError::Blank`].
///
/// # Example
/// ```
/// use dq_core::config::QuiltConfig;
/// use dq_core::frame::TileBuffer;
/// use dq_core::traits::ImageLoader;
/// use dq_quilt::cell::process_cell;
///
/// struct NoImages;
/// impl ImageLoader for NoImages {
///     fn load(&self, name: &str) -> anyhow::Result<TileBuffer> {
///         anyhow::bail!("no image {name}")
///     }
/// }
/// let out = process_cell("#ffffff", None, &NoImages, &QuiltConfig::default()).unwrap();
/// assert!(!out.focusable);
/// assert_eq!((out.tile.width, out.tile.height), (100, 100));
/// ```
pub fn process_cell(
    color: &str,
    image: Option<&str>,
    loader: &dyn ImageLoader,
    config: &QuiltConfig,
) -> Result<CellOutput, QuiltError> {
    let Some(image) = image.filter(|name| !name.is_empty()) else {
        let tile = create_blank_tile(color, config.tile_size, config.tile_size).map_err(
            |source| {
                log::error!("Tuile unie impossible pour {color:?} : {source}");
                QuiltError::Blank {
                    color: color.to_string(),
                    source,
                }
            },
        )?;
        return Ok(CellOutput {
            tile,
            focusable: false,
        });
    };

    let content = loader.load(image).map_err(|source| {
        log::error!("Impossible de charger {image} : {source:#}");
        QuiltError::Load {
            image: image.to_string(),
            source,
        }
    })?;

    let tile = stage(
        Stage::Overlay,
        image,
        overlay_color(&content, color, config.overlay_alpha),
    )?;
    let tile = stage(Stage::Square, image, square_tile(&tile))?;
    let tile = stage(Stage::Downsize, image, downsize_tile(&tile, config.max_dim))?;

    Ok(CellOutput {
        tile,
        focusable: true,
    })
}

/// Attribue l'échec éventuel d'une étape à `stage` et au fichier `image`.
fn stage<T>(stage: Stage, image: &str, result: Result<T, TransformError>) -> Result<T, QuiltError> {
    result.map_err(|source| {
        log::error!("Étape {stage} échouée pour {image} : {source}");
        QuiltError::Stage {
            stage,
            image: image.to_string(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use anyhow::Result;

    /// Loader en mémoire : toute image demandée est une photo unie.
    struct FakeLoader {
        width: u32,
        height: u32,
        calls: Cell<usize>,
    }

    impl FakeLoader {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                calls: Cell::new(0),
            }
        }
    }

    impl ImageLoader for FakeLoader {
        fn load(&self, name: &str) -> Result<TileBuffer> {
            self.calls.set(self.calls.get() + 1);
            if name == "missing.jpg" {
                anyhow::bail!("not found");
            }
            Ok(TileBuffer::filled(self.width, self.height, (255, 255, 255)))
        }
    }

    #[test]
    fn blank_cell_matches_generator() -> Result<()> {
        let loader = FakeLoader::new(10, 10);
        let config = QuiltConfig::default();
        let out = process_cell("#000000", None, &loader, &config)?;
        assert!(!out.focusable);
        assert_eq!(out.tile, create_blank_tile("#000000", 100, 100)?);
        assert_eq!(loader.calls.get(), 0);

        let empty = process_cell("#000000", Some(""), &loader, &config)?;
        assert_eq!(empty, out);
        Ok(())
    }

    #[test]
    fn photo_cell_runs_all_stages() -> Result<()> {
        let loader = FakeLoader::new(300, 200);
        let config = QuiltConfig {
            max_dim: 50,
            ..QuiltConfig::default()
        };
        let out = process_cell("#000000", Some("photo.jpg"), &loader, &config)?;
        assert!(out.focusable);
        assert_eq!((out.tile.width, out.tile.height), (50, 50));
        // white photo over black at alpha 0.5
        let (r, g, b) = out.tile.pixel(25, 25);
        assert!(r.abs_diff(127) <= 1 && g.abs_diff(127) <= 1 && b.abs_diff(127) <= 1);
        Ok(())
    }

    #[test]
    fn small_photo_is_only_squared() -> Result<()> {
        let loader = FakeLoader::new(40, 60);
        let out = process_cell("white", Some("p.jpg"), &loader, &QuiltConfig::default())?;
        assert_eq!((out.tile.width, out.tile.height), (40, 40));
        Ok(())
    }

    #[test]
    fn overlay_failure_is_attributed() {
        let loader = FakeLoader::new(10, 10);
        let err = process_cell("#zzzzzz", Some("photo.jpg"), &loader, &QuiltConfig::default());
        match err {
            Err(QuiltError::Stage { stage, image, .. }) => {
                assert_eq!(stage, Stage::Overlay);
                assert_eq!(image, "photo.jpg");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn load_failure_names_the_file() {
        let loader = FakeLoader::new(10, 10);
        let err = process_cell("#000000", Some("missing.jpg"), &loader, &QuiltConfig::default());
        assert!(matches!(err, Err(QuiltError::Load { ref image, .. }) if image == "missing.jpg"));
    }

    #[test]
    fn blank_fill_accepts_css_names_and_hsl() -> Result<()> {
        let loader = FakeLoader::new(10, 10);
        let config = QuiltConfig::default();
        for (color, rgb) in [
            ("darkblue", (0, 0, 139)),
            ("skyblue", (135, 206, 235)),
            ("forestgreen", (34, 139, 34)),
            ("hsl(0, 100%, 50%)", (255, 0, 0)),
        ] {
            let out = process_cell(color, None, &loader, &config)?;
            assert_eq!(out.tile.pixel(0, 0), rgb, "{color}");
        }
        Ok(())
    }

    #[test]
    fn bad_blank_color_is_fatal() {
        let loader = FakeLoader::new(10, 10);
        let err = process_cell("nope", None, &loader, &QuiltConfig::default());
        assert!(matches!(err, Err(QuiltError::Blank { .. })));
        assert_eq!(Stage::Downsize.to_string(), "downsize");
    }
}
