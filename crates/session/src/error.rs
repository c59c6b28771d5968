//! Errors surfaced by session operations.

use guidance_core::{ErrorSeverity, GuidanceError, GuidanceFault, LocationId};

use crate::session::SessionStatus;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Guidance(#[from] GuidanceError),

    #[error("{location} is locked, missing {}", .missing.join(", "))]
    Locked {
        location: LocationId,
        missing: Vec<String>,
    },

    #[error("{to} cannot be reached from {from} in one move")]
    NotAdjacent { from: LocationId, to: LocationId },

    #[error("there is no open puzzle at {0}")]
    NoPuzzle(LocationId),

    #[error("option {option} is out of range ({available} options)")]
    InvalidOption { option: usize, available: usize },

    #[error("there is no boss to fight at {0}")]
    NoBoss(LocationId),

    #[error("no encounter is pending")]
    NoEncounter,

    #[error("'{0}' cannot be used here")]
    ItemNotUsable(String),

    #[error("the session is over ({0})")]
    GameOver(SessionStatus),
}

impl GuidanceFault for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Guidance(err) => err.severity(),
            _ => ErrorSeverity::Rejected,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Guidance(err) => err.error_code(),
            Self::Locked { .. } => "LOCKED",
            Self::NotAdjacent { .. } => "NOT_ADJACENT",
            Self::NoPuzzle(_) => "NO_PUZZLE",
            Self::InvalidOption { .. } => "INVALID_OPTION",
            Self::NoBoss(_) => "NO_BOSS",
            Self::NoEncounter => "NO_ENCOUNTER",
            Self::ItemNotUsable(_) => "ITEM_NOT_USABLE",
            Self::GameOver(_) => "GAME_OVER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_lists_missing_items() {
        let err = SessionError::Locked {
            location: "Elemental Chambers".into(),
            missing: vec!["Crystal Shard".into(), "Shadow Essence".into()],
        };
        assert_eq!(
            err.to_string(),
            "Elemental Chambers is locked, missing Crystal Shard, Shadow Essence"
        );
        assert_eq!(err.severity(), ErrorSeverity::Rejected);
    }

    #[test]
    fn wrapped_core_error_keeps_its_classification() {
        let err = SessionError::from(GuidanceError::InsufficientResources {
            required: 5,
            available: 0,
        });
        assert!(err.severity().is_recoverable());
        assert_eq!(err.error_code(), "INSUFFICIENT_RESOURCES");
    }
}
