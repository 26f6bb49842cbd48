//! Signature grammar for type-system elements.
//!
//! A signature is the canonical text form of a class, field, method,
//! constructor or annotation reference:
//!
//! ```text
//! com.acme.User                                   class
//! com.acme.User#name:java.lang.String             field
//! com.acme.User#setName(java.lang.String):void    method
//! com.acme.User(java.lang.String, int)            constructor
//! @com.acme.Audited                               annotation
//! ```
//!
//! Parsing is purely textual. Resolving the names against loaded types is the
//! job of the reflection layer, so a signature can name types that are not
//! registered anywhere.
#![forbid(unsafe_code)]

mod error;
mod key;
mod parse;

pub use crate::error::{InvalidSignature, Result, SignatureErrorKind};
pub use crate::key::{ElementKey, ElementKind, CONSTRUCTOR_NAME};
pub use crate::parse::{is_qualified_name, parse, parse_annotation, parse_as};
