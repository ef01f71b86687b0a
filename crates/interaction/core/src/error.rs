//! Common error infrastructure for interaction-core.
//!
//! Registration and transport failures are the only errors this crate
//! produces. Everything that can go wrong while a request is in flight is
//! classified by the runtime and degraded to "no observable effect"; the
//! severity taxonomy here lets both layers log those outcomes consistently.
//!
//! # Design Principles
//!
//! - **No exceptions across roles**: a failed check on the server never
//!   reaches the client as an error, it is dropped and logged
//! - **Severity Classification**: faults are categorized so callers pick the
//!   log level without matching on every variant

/// Severity level of a fault, used for categorization and logging.
///
/// - **Recoverable**: Expected races (object destroyed mid-flight, stale ids)
/// - **Validation**: Requests that fail an authority check
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Invariant violations that make further progress meaningless
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// Expected outcome of network races; nothing happened and nothing needs fixing.
    ///
    /// Examples: interactable despawned before the request arrived
    Recoverable,

    /// The request was well formed but not allowed.
    ///
    /// Examples: requester does not own the controller, target out of reach
    Validation,

    /// Unexpected state inconsistency.
    ///
    /// Examples: undecodable frame from a trusted transport
    Internal,

    /// Unrecoverable; an id space or invariant is exhausted.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this fault is an expected, benign outcome.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this fault may indicate a misbehaving peer.
    pub const fn is_suspicious(&self) -> bool {
        matches!(self, Self::Validation)
    }

    /// Returns true if this fault indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all interaction faults.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by whether the outcome is expected, not by impact
pub trait InteractionFault: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this fault.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this fault variant.
    ///
    /// Default implementation uses the type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised while building an interactable's registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("interactable id space exhausted")]
    InteractableIdsExhausted,

    #[error("interaction id space exhausted for this interactable")]
    InteractionIdsExhausted,
}

impl InteractionFault for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InteractableIdsExhausted => "INTERACTABLE_IDS_EXHAUSTED",
            Self::InteractionIdsExhausted => "INTERACTION_IDS_EXHAUSTED",
        }
    }
}

/// Local failure to hand a request to the transport.
///
/// Delivery is at-most-once: a request that was accepted may still be lost,
/// and one that was refused here is simply gone. Neither is retried.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("transport to server is closed")]
    Closed,

    #[error("transport to server is saturated")]
    Saturated,

    #[error("request could not be framed: {0}")]
    Framing(String),
}

impl InteractionFault for TransportError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Closed => ErrorSeverity::Internal,
            Self::Saturated => ErrorSeverity::Recoverable,
            Self::Framing(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Closed => "TRANSPORT_CLOSED",
            Self::Saturated => "TRANSPORT_SATURATED",
            Self::Framing(_) => "TRANSPORT_FRAMING",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_labels_match_display() {
        for severity in [
            ErrorSeverity::Recoverable,
            ErrorSeverity::Validation,
            ErrorSeverity::Internal,
            ErrorSeverity::Fatal,
        ] {
            assert_eq!(severity.as_str(), severity.to_string());
        }
    }

    #[test]
    fn registry_errors_are_fatal() {
        assert!(RegistryError::InteractionIdsExhausted.severity().is_internal());
        assert_eq!(
            RegistryError::InteractableIdsExhausted.error_code(),
            "INTERACTABLE_IDS_EXHAUSTED"
        );
    }
}
