//! Content factory resolving labyrinth and tuning files.

use std::path::{Path, PathBuf};

use guidance_core::GuidanceConfig;
use tracing::debug;

use crate::labyrinth::Labyrinth;
use crate::loaders::{ConfigLoader, LabyrinthLoader, LoadResult};

const BUNDLED_LABYRINTH: &str = include_str!("../../data/labyrinth.ron");
const BUNDLED_CONFIG: &str = include_str!("../../data/config.toml");

/// Loads guide content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── labyrinth.ron
/// ```
///
/// A missing `config.toml` falls back to [`GuidanceConfig::default`]; the
/// labyrinth file is required.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn load_labyrinth(&self) -> LoadResult<Labyrinth> {
        LabyrinthLoader::load(&self.data_dir.join("labyrinth.ron"))
    }

    pub fn load_config(&self) -> LoadResult<GuidanceConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(GuidanceConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// The labyrinth compiled into the crate.
    pub fn bundled_labyrinth() -> LoadResult<Labyrinth> {
        LabyrinthLoader::parse(BUNDLED_LABYRINTH)
            .map_err(|e| anyhow::anyhow!("Failed to parse bundled labyrinth: {}", e))
    }

    /// The tuning file compiled into the crate.
    pub fn bundled_config() -> LoadResult<GuidanceConfig> {
        ConfigLoader::parse(BUNDLED_CONFIG)
            .map_err(|e| anyhow::anyhow!("Failed to parse bundled config: {}", e))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_content_parses() {
        let labyrinth = ContentFactory::bundled_labyrinth().expect("bundled labyrinth");
        assert_eq!(labyrinth.start.as_str(), "Ancient Entrance");
        assert_eq!(labyrinth.graph.len(), 5);
        assert_eq!(labyrinth.graph.total_puzzles(), 4);
        assert_eq!(labyrinth.encounters.len(), 3);

        let config = ContentFactory::bundled_config().expect("bundled config");
        assert_eq!(config, GuidanceConfig::default());
    }
}
