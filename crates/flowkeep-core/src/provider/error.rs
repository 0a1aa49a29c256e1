use std::fmt;

use thiserror::Error;

/// Message fragment the provider uses when a job flow id is unknown.
pub const JOB_FLOW_NOT_FOUND_SIGNAL: &str = "Specified job flow ID not valid";

/// Coarse classification of a provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// The job flow id is unknown to the provider.
    NotFound,
    /// The provider understood the request and refused it (validation, limits, auth).
    Rejected,
    /// The request did not complete (connection, timeout, malformed response).
    Transport,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProviderErrorKind::NotFound => "not found",
            ProviderErrorKind::Rejected => "rejected",
            ProviderErrorKind::Transport => "transport",
        })
    }
}

/// Failure reported by a [`super::JobFlowApi`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("provider error ({kind}): {message}")]
pub struct ProviderError {
    kind: ProviderErrorKind,
    message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::NotFound, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Rejected, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Transport, message)
    }

    pub fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// `true` when the error means "unknown job flow id".
    ///
    /// Bindings that cannot classify errors may report everything as
    /// [`ProviderErrorKind::Rejected`]; the provider's message is checked as well.
    pub fn is_not_found(&self) -> bool {
        self.kind == ProviderErrorKind::NotFound || self.message.contains(JOB_FLOW_NOT_FOUND_SIGNAL)
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_detected_by_kind_or_message() {
        assert!(ProviderError::not_found("gone").is_not_found());
        assert!(
            ProviderError::rejected("ValidationException: Specified job flow ID not valid").is_not_found()
        );
        assert!(!ProviderError::rejected("Throttling").is_not_found());
        assert!(!ProviderError::transport("connection reset").is_not_found());
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = ProviderError::transport("connection reset");
        assert_eq!(err.to_string(), "provider error (transport): connection reset");
    }
}
