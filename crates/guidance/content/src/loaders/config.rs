//! Guidance tuning loader.

use std::path::Path;

use guidance_core::GuidanceConfig;

use crate::loaders::{LoadResult, read_file};

/// Loads [`GuidanceConfig`] from TOML. Missing sections and fields keep
/// their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<GuidanceConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML at {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<GuidanceConfig> {
        let config: GuidanceConfig = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [search]
            max_nodes = 200

            [economy]
            starting_tokens = 5
            "#,
        )
        .expect("valid TOML");

        assert_eq!(config.search.max_nodes, 200);
        assert_eq!(config.search.max_depth, 50);
        assert_eq!(config.economy.starting_tokens, 5);
        assert_eq!(config.economy.explicit_cost, 10);
        assert_eq!(config.weights, guidance_core::HeuristicWeights::default());
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(ConfigLoader::parse("").unwrap(), GuidanceConfig::default());
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(ConfigLoader::parse("[search]\nmax_nodes = \"many\"").is_err());
    }
}
