//! Session controller for a labyrinth run.
//!
//! A [`Session`] owns the mutable world: the location graph, the player's
//! inventory and counters, and the hint economy ledger. It is the only place
//! that applies the graph's mutation hooks, and it does so strictly between
//! calls into the guidance core. Every operation reports what happened as a
//! list of [`SessionEvent`]s for the presentation layer.
pub mod combat;
pub mod encounter;
pub mod error;
pub mod event;
mod session;

pub use combat::{BossAction, BossFight};
pub use error::{Result, SessionError};
pub use event::SessionEvent;
pub use session::{Session, SessionStatus};
