//! Labyrinth content and the loaders that read it.
//!
//! This crate holds everything the guide needs that is data rather than logic:
//! - Labyrinth layouts (locations, gates, puzzles, bosses) via RON
//! - Item rules (protective and healing items) via RON
//! - Random encounter tables via RON
//! - Per-room guidance text for each hint tier via RON
//! - Guidance tuning via TOML
//!
//! A default labyrinth and config are compiled in, so a session can start
//! without a data directory.

pub mod labyrinth;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use labyrinth::{Encounter, EncounterOption, ItemRules, Labyrinth};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LabyrinthLoader, LoadResult};
