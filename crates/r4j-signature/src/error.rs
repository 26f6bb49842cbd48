use thiserror::Error;

use crate::key::ElementKind;

pub type Result<T> = std::result::Result<T, InvalidSignature>;

/// Malformed signature text.
///
/// This is the only failure the lookup layer lets escape to callers; it is
/// always reported at the parser boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid signature `{signature}`: {kind}")]
pub struct InvalidSignature {
    pub signature: String,
    pub kind: SignatureErrorKind,
}

impl InvalidSignature {
    pub(crate) fn new(signature: &str, kind: SignatureErrorKind) -> Self {
        Self {
            signature: signature.to_string(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureErrorKind {
    #[error("signature is empty")]
    Empty,
    #[error("annotation signatures must start with `@`")]
    MissingAnnotationPrefix,
    #[error("`{0}` is not a qualified name")]
    InvalidQualifiedName(String),
    #[error("`{0}` is not a valid member name")]
    InvalidMemberName(String),
    #[error("`{0}` is not a valid type name")]
    InvalidTypeName(String),
    #[error("unbalanced parentheses")]
    UnbalancedParens,
    #[error("empty entry in parameter list")]
    EmptyParameter,
    #[error("`...` is only allowed on the last parameter")]
    MisplacedVarargs,
    #[error("unexpected trailing input `{0}`")]
    TrailingInput(String),
    #[error("expected a {expected} signature, found a {found} signature")]
    KindMismatch {
        expected: ElementKind,
        found: ElementKind,
    },
}
