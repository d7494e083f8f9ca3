/// Quilt assembly: per-cell tile pipeline, grid assembler and the
/// end-to-end build that writes tiles and the manifest.

pub mod assemble;
pub mod build;
pub mod cell;
pub mod error;

pub use assemble::{Assembly, Layout, assemble, tile_name};
pub use build::{BuildRequest, run_build};
pub use cell::{CellOutput, process_cell};
pub use error::{QuiltError, Stage};
