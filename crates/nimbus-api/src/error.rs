//! Boundary error type.
//!
//! Two failure shapes cross the authority boundary: the call never
//! completed (transport), or it completed and the authority said no
//! (rejection). Everything richer, like busy flags and local
//! validation, belongs to the application core, not here.

use serde::{Deserialize, Serialize};

/// Error returned by any [`NetworkApi`](crate::NetworkApi) operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ApiError {
    /// The round trip never completed (timeout, connectivity, TLS).
    #[error("transport failure: {message}")]
    Transport {
        /// Description of the transport failure
        message: String,
    },

    /// The authority returned a structured error.
    #[error("rejected by remote: {message}")]
    Rejected {
        /// The authority's error message
        message: String,
    },
}

impl ApiError {
    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a rejection error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Transport failures are worth retrying; rejections usually are not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message() {
        let err = ApiError::transport("connection reset");
        assert_eq!(err.to_string(), "transport failure: connection reset");

        let err = ApiError::rejected("name already taken");
        assert_eq!(err.to_string(), "rejected by remote: name already taken");
    }

    #[test]
    fn only_transport_is_transient() {
        assert!(ApiError::transport("timeout").is_transient());
        assert!(!ApiError::rejected("bad request").is_transient());
    }
}
