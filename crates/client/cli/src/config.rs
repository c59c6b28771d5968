//! CLI runtime configuration.
use std::env;
use std::path::PathBuf;

use anyhow::Result;
use guidance_content::{ContentFactory, Labyrinth};
use guidance_core::GuidanceConfig;

/// Seed used when neither `--seed` nor `LUMOS_SEED` is given.
const DEFAULT_SEED: u64 = 0x4c55_4d4f_53;

/// Where content comes from and how sessions are seeded.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub data_dir: Option<PathBuf>,
    pub seed: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed: DEFAULT_SEED,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `LUMOS_DATA_DIR` - Directory holding `labyrinth.ron` and `config.toml`
    ///   (default: bundled content)
    /// - `LUMOS_SEED` - Session seed (default: fixed)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("LUMOS_DATA_DIR").ok().map(PathBuf::from);

        if let Some(seed) = read_env::<u64>("LUMOS_SEED") {
            config.seed = seed;
        }

        config
    }

    /// Command-line values take precedence over the environment.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, seed: Option<u64>) -> Self {
        if data_dir.is_some() {
            self.data_dir = data_dir;
        }
        if let Some(seed) = seed {
            self.seed = seed;
        }
        self
    }

    pub fn load_content(&self) -> Result<(Labyrinth, GuidanceConfig)> {
        match &self.data_dir {
            Some(dir) => {
                let factory = ContentFactory::new(dir.clone());
                tracing::info!("Loading content from {}", factory.data_dir().display());
                Ok((factory.load_labyrinth()?, factory.load_config()?))
            }
            None => Ok((
                ContentFactory::bundled_labyrinth()?,
                ContentFactory::bundled_config()?,
            )),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
