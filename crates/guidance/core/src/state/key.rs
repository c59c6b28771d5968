//! Canonical search-state keys.
//!
//! The explored set of a search is keyed by a SHA-256 digest over an explicit
//! byte encoding of the state. Field order is fixed here, collections are
//! written in their sorted order, and every variable-length value is length
//! prefixed, so two equal states always produce the same key. Bump
//! [`StateKey::ENCODING_VERSION`] whenever the layout changes.

use std::fmt;

use sha2::{Digest, Sha256};

use super::GameStateSnapshot;

/// 32-byte digest identifying a search state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey([u8; 32]);

impl StateKey {
    pub const ENCODING_VERSION: u8 = 1;

    pub fn of(snapshot: &GameStateSnapshot, last_hint: Option<&str>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(encode(snapshot, last_hint));
        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateKey({})", self)
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // short form is enough for logs
        f.write_str(&hex::encode(&self.0[..8]))
    }
}

/// Writes the canonical byte layout of a search state.
fn encode(snapshot: &GameStateSnapshot, last_hint: Option<&str>) -> Vec<u8> {
    let mut out = Vec::with_capacity(256);
    out.push(StateKey::ENCODING_VERSION);

    put_str(&mut out, snapshot.location.as_str());

    put_len(&mut out, snapshot.inventory.len());
    for item in &snapshot.inventory {
        put_str(&mut out, item);
    }

    out.extend_from_slice(&snapshot.solved_puzzles.to_le_bytes());
    out.extend_from_slice(&snapshot.total_puzzles.to_le_bytes());
    out.extend_from_slice(&snapshot.turns.to_le_bytes());
    out.extend_from_slice(&snapshot.health.to_le_bytes());
    out.extend_from_slice(&snapshot.skipped_puzzles.to_le_bytes());

    put_len(&mut out, snapshot.hint_history.len());
    for hint in &snapshot.hint_history {
        put_str(&mut out, hint);
    }

    put_len(&mut out, snapshot.visits.len());
    for (location, count) in &snapshot.visits {
        put_str(&mut out, location.as_str());
        out.extend_from_slice(&count.to_le_bytes());
    }

    match last_hint {
        Some(hint) => {
            out.push(1);
            put_str(&mut out, hint);
        }
        None => out.push(0),
    }

    out
}

fn put_len(out: &mut Vec<u8>, len: usize) {
    out.extend_from_slice(&(len as u64).to_le_bytes());
}

fn put_str(out: &mut Vec<u8>, value: &str) {
    put_len(out, value.len());
    out.extend_from_slice(value.as_bytes());
}
