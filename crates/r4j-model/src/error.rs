use thiserror::Error;

/// A failure raised by target code (a method, constructor or field accessor
/// body), in the host's `type: message` exception shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error_type}: {message}")]
pub struct TargetError {
    /// Fully-qualified name of the raised error type.
    pub error_type: String,
    pub message: String,
}

impl TargetError {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
        }
    }

    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Self::new("java.lang.IllegalArgumentException", message)
    }

    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::new("java.lang.IllegalStateException", message)
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new("java.lang.UnsupportedOperationException", message)
    }
}
