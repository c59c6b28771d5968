//! Errors raised by the guide.
//!
//! Every fallible core operation returns [`GuidanceError`]. Search exhaustion
//! has no variant: a search that hits a bound or empties its frontier returns
//! the fallback hint and reports the stop through [`crate::search::StopReason`].

use crate::graph::LocationId;

/// How a failed guidance call affects the running session.
///
/// The session controller keeps playing on `Recoverable` and `Rejected`
/// and ends the run on `Fatal`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The player can fix it through play, e.g. by earning score for a hint.
    Recoverable,
    /// The action does not fit the current world state (locked door, no
    /// puzzle here). Nothing changed; the same request will fail again.
    Rejected,
    /// Labyrinth data is inconsistent with the request.
    Fatal,
}

impl ErrorSeverity {
    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// True when the session cannot sensibly continue.
    pub const fn ends_session(self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Classification shared by every error the guide and the session raise.
pub trait GuidanceFault: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable upper-case code, e.g. `UNKNOWN_LOCATION`.
    fn error_code(&self) -> &'static str;
}

/// Errors detected while building a [`crate::graph::LocationGraph`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("location '{0}' is defined more than once")]
    DuplicateLocation(LocationId),

    #[error("location '{from}' has an edge to unknown location '{to}'")]
    DanglingEdge { from: LocationId, to: LocationId },
}

impl GuidanceFault for GraphError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateLocation(_) => "GRAPH_DUPLICATE_LOCATION",
            Self::DanglingEdge { .. } => "GRAPH_DANGLING_EDGE",
        }
    }
}

/// Errors surfaced by the guidance entry points.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GuidanceError {
    /// A snapshot or route endpoint names a location absent from the graph.
    #[error("unknown location '{0}'")]
    UnknownLocation(LocationId),

    /// The ledger cannot pay for the requested hint tier.
    #[error("insufficient resources: hint costs {required} points, {available} available")]
    InsufficientResources { required: u32, available: i32 },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl GuidanceFault for GuidanceError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownLocation(_) => ErrorSeverity::Fatal,
            Self::InsufficientResources { .. } => ErrorSeverity::Recoverable,
            Self::Graph(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownLocation(_) => "UNKNOWN_LOCATION",
            Self::InsufficientResources { .. } => "INSUFFICIENT_RESOURCES",
            Self::Graph(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_resources_is_recoverable() {
        let err = GuidanceError::InsufficientResources {
            required: 20,
            available: 4,
        };
        assert!(err.severity().is_recoverable());
        assert_eq!(err.error_code(), "INSUFFICIENT_RESOURCES");
        assert_eq!(
            err.to_string(),
            "insufficient resources: hint costs 20 points, 4 available"
        );
    }

    #[test]
    fn unknown_location_is_fatal() {
        let err = GuidanceError::UnknownLocation(LocationId::from("Nowhere"));
        assert!(err.severity().ends_session());
        assert!(!err.severity().is_recoverable());
        assert_eq!(err.severity().to_string(), "fatal");
    }
}
