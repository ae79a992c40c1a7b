//! Error types for the store client and the overlay layer.
//!
//! The overlay never retries and never catches store failures; they
//! propagate to whichever caller triggered the remote call.

use thiserror::Error;

/// Transport/protocol failure surface of the store client.
///
/// Any store call may fail with one of these. Purely local buffering
/// operations never produce them.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The remote store could not be reached.
    #[error("remote store unavailable: {reason}")]
    Unavailable { reason: String },

    /// The remote store replied with something the client could not handle.
    #[error("remote store protocol error: {message}")]
    Protocol { message: String },
}

impl StoreError {
    /// Convenience constructor for connectivity failures.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        StoreError::Unavailable {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for malformed-reply failures.
    pub fn protocol(message: impl Into<String>) -> Self {
        StoreError::Protocol {
            message: message.into(),
        }
    }
}

/// Errors raised by the cache directory and representatives.
#[derive(Debug, Error)]
pub enum CacheError {
    /// A raw value handed to `set` has no defined representative mapping.
    /// No partial state is written when this is raised.
    #[error("unsupported value type: {shape}")]
    UnsupportedValueType { shape: &'static str },

    /// A remote call made on behalf of the caller failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::unavailable("connection refused");
        assert_eq!(
            err.to_string(),
            "remote store unavailable: connection refused"
        );
    }

    #[test]
    fn test_cache_error_wraps_store_error() {
        let err: CacheError = StoreError::protocol("short reply").into();
        assert!(matches!(err, CacheError::Store(StoreError::Protocol { .. })));
    }
}
