/// Configuration, types, and shared structures for the digital quilt builder.
///
/// This crate contains the layout tables, the manifest, the tile buffer and
/// the collaborator traits used across the quilt workspace.

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod manifest;
pub mod table;
pub mod traits;

pub use config::QuiltConfig;
pub use error::CoreError;
pub use frame::TileBuffer;
pub use manifest::Manifest;
pub use table::Matrix;

/// Re-exports pour accès par chemin sémantique.
pub mod layout {
    pub use crate::table::{
        Matrix, load_color_table, load_image_table, load_weight_table, parse_weight,
    };
}
