use std::fmt;

use r4j_model::TargetError;
use thiserror::Error;

/// When a fault happened relative to the underlying call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultPhase {
    /// Rejected before target code ran; the caller's request was wrong.
    Validation,
    /// Target code ran and failed.
    Execution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// The descriptor is the absent sentinel.
    Absent,
    /// An instance member was accessed without a receiver.
    MissingTarget,
    /// The receiver is not an instance of the declaring type.
    TargetMismatch,
    ArgumentCount,
    ArgumentType,
    /// Abstract methods, writes to final fields.
    IllegalAccess,
    /// Interfaces, abstract classes, enums and annotation types cannot be
    /// constructed.
    Instantiation,
    /// Target code returned a [`TargetError`].
    Raised,
    /// Target code panicked.
    Panicked,
}

impl FaultKind {
    pub fn phase(self) -> FaultPhase {
        match self {
            FaultKind::Raised | FaultKind::Panicked => FaultPhase::Execution,
            _ => FaultPhase::Validation,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FaultKind::Absent => "absent",
            FaultKind::MissingTarget => "missing-target",
            FaultKind::TargetMismatch => "target-mismatch",
            FaultKind::ArgumentCount => "argument-count",
            FaultKind::ArgumentType => "argument-type",
            FaultKind::IllegalAccess => "illegal-access",
            FaultKind::Instantiation => "instantiation",
            FaultKind::Raised => "raised",
            FaultKind::Panicked => "panicked",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contained failure of a get, set, call or construct.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} fault on `{signature}`: {message}")]
pub struct Fault {
    pub kind: FaultKind,
    /// Signature of the element that was accessed.
    pub signature: String,
    pub message: String,
    /// The error raised by target code, for [`FaultKind::Raised`].
    #[source]
    pub cause: Option<TargetError>,
}

impl Fault {
    pub fn new(kind: FaultKind, signature: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            signature: signature.into(),
            message: message.into(),
            cause: None,
        }
    }

    pub fn raised(signature: impl Into<String>, cause: TargetError) -> Self {
        Self {
            kind: FaultKind::Raised,
            signature: signature.into(),
            message: cause.to_string(),
            cause: Some(cause),
        }
    }

    pub fn phase(&self) -> FaultPhase {
        self.kind.phase()
    }

    pub fn is_validation(&self) -> bool {
        self.phase() == FaultPhase::Validation
    }

    pub fn is_execution(&self) -> bool {
        self.phase() == FaultPhase::Execution
    }

    pub fn target_error(&self) -> Option<&TargetError> {
        self.cause.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_split_validation_from_execution() {
        assert_eq!(FaultKind::ArgumentType.phase(), FaultPhase::Validation);
        assert_eq!(FaultKind::Absent.phase(), FaultPhase::Validation);
        assert_eq!(FaultKind::Panicked.phase(), FaultPhase::Execution);
    }

    #[test]
    fn raised_fault_keeps_cause() {
        let fault = Fault::raised("a.B#m():void", TargetError::illegal_state("closed"));
        assert!(fault.is_execution());
        assert_eq!(
            fault.to_string(),
            "raised fault on `a.B#m():void`: java.lang.IllegalStateException: closed"
        );
        assert_eq!(
            std::error::Error::source(&fault).map(ToString::to_string),
            Some("java.lang.IllegalStateException: closed".to_string())
        );
    }
}
