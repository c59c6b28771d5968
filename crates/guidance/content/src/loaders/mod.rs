//! Loaders for labyrinth and tuning files.
//!
//! Each loader parses one file format into guidance-core types. Parse errors
//! carry the file path so a broken data directory is easy to track down.

pub mod config;
pub mod factory;
pub mod labyrinth;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use labyrinth::LabyrinthLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Reads a data file to a string.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
