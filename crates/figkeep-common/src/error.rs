//! Unified error types for the figkeep workspace.
//!
//! Only [`FigkeepError::InvalidArgument`] ever reaches a caller of the hold
//! loop; the other variants are produced by collaborators and capability
//! probes and are recovered inside the loop.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum FigkeepError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A caller-supplied value is outside its accepted set.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected value.
        message: String,
    },

    /// A platform facility needed by a best-effort feature is missing.
    #[error("{capability} unavailable: {reason}")]
    Unsupported {
        /// Short name of the missing capability.
        capability: &'static str,
        /// Why the probe failed.
        reason: String,
    },

    /// The windowing collaborator reported a failure.
    #[error("window system error: {message}")]
    Window {
        /// Description reported by the collaborator.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl FigkeepError {
    /// Builds an [`FigkeepError::Unsupported`] from any displayable cause.
    pub fn unsupported(capability: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::Unsupported {
            capability,
            reason: reason.to_string(),
        }
    }

    /// Builds a [`FigkeepError::Window`] from any displayable cause.
    pub fn window(message: impl std::fmt::Display) -> Self {
        Self::Window {
            message: message.to_string(),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, FigkeepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_names_the_capability() {
        let err = FigkeepError::unsupported("cbreak mode", "not a terminal");
        assert_eq!(err.to_string(), "cbreak mode unavailable: not a terminal");
    }

    #[test]
    fn serde_errors_convert() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: FigkeepError = source.into();
        assert!(matches!(err, FigkeepError::Serialization { .. }));
    }
}
