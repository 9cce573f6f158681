//! Categorized errors for the authentication flows.
//!
//! Four things can go wrong here: the caller re-entered a single-flight
//! operation, a local precondition failed before any network traffic,
//! the boundary call itself failed, or the authority answered with a
//! shape that matches no classification branch. Each gets its own
//! variant so frontends can route them to the right treatment.

use nimbus_api::ApiError;

/// Error produced by the login and network-setup flows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The operation is single-flight and one is already running.
    #[error("{operation} already in progress")]
    Busy {
        /// Human-readable operation name
        operation: &'static str,
    },

    /// A local precondition failed; no network call was made.
    #[error("invalid input: {message}")]
    Invalid {
        /// What was wrong with the input
        message: String,
    },

    /// The boundary call failed (transport) or was rejected (remote).
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The authority's response matched no known branch.
    #[error("unclassified response: {message}")]
    Unclassified {
        /// What was missing or contradictory in the response
        message: String,
    },
}

impl AuthError {
    /// Create a busy error for a named operation.
    pub fn busy(operation: &'static str) -> Self {
        Self::Busy { operation }
    }

    /// Create a local validation error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create an unclassified-response error.
    pub fn unclassified(message: impl Into<String>) -> Self {
        Self::Unclassified {
            message: message.into(),
        }
    }

    /// Whether retrying the same operation later could succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Busy { .. } => true,
            Self::Api(api) => api.is_transient(),
            Self::Invalid { .. } | Self::Unclassified { .. } => false,
        }
    }

    /// Generic message suitable for direct display.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Busy { .. } => "Hold on, the previous request is still running",
            Self::Invalid { .. } => "Check your input and try again",
            Self::Api(ApiError::Transport { .. }) => "Connection problem. Please try again later.",
            Self::Api(ApiError::Rejected { .. }) | Self::Unclassified { .. } => {
                "Something went wrong. Please try again later."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_display_names_the_operation() {
        let err = AuthError::busy("network creation");
        assert_eq!(err.to_string(), "network creation already in progress");
    }

    #[test]
    fn api_errors_pass_through_transparently() {
        let err = AuthError::from(ApiError::transport("timed out"));
        assert_eq!(err.to_string(), "transport failure: timed out");
        assert!(err.is_transient());
    }

    #[test]
    fn local_errors_are_not_transient() {
        assert!(!AuthError::invalid("form invalid").is_transient());
        assert!(!AuthError::unclassified("empty allowed-provider set").is_transient());
    }
}
