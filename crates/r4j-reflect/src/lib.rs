//! Descriptor-based reflection over an r4j [`TypeRegistry`].
//!
//! A [`Reflector`] turns names and signatures into descriptors:
//!
//! ```
//! use r4j_model::{MethodDef, TypeDef, TypeRegistry, Value};
//! use r4j_reflect::{Descriptor, Reflector};
//!
//! let registry = TypeRegistry::with_builtins().with_type(
//!     TypeDef::class("com.acme.Math").with_method(
//!         MethodDef::new("twice", ["int"], "int")
//!             .with_modifiers(r4j_model::Modifiers::PUBLIC | r4j_model::Modifiers::STATIC)
//!             .body(|_, args| Ok(Value::Int(args[0].as_int().unwrap_or(0) * 2))),
//!     ),
//! );
//! let reflector = Reflector::new(registry);
//!
//! let twice = reflector.class("com.acme.Math").method("twice", &["int"]);
//! assert!(twice.is_present());
//! assert_eq!(twice.invoke(None, &[Value::Int(21)]).into_value(), Some(Value::Int(42)));
//!
//! let missing = reflector.class("com.acme.Math").method("thrice", &["int"]);
//! assert!(!missing.is_present());
//! ```
//!
//! Single-element lookups never fail: a miss yields a descriptor whose
//! [`Descriptor::element`] is `None`. Bulk listings return empty vectors.
//! Invocations return an [`InvocationOutcome`] instead of propagating
//! faults. The only error that escapes is [`InvalidSignature`], raised when
//! signature text is malformed.
#![forbid(unsafe_code)]

pub mod alias;
mod context;
mod descriptor;
mod fault;
mod invoke;
mod outcome;
mod projection;
mod reflector;

pub use crate::alias::{AliasSpec, Aliased, MatchSource, Probe, Resolution};
pub use crate::descriptor::{
    AnnotatedDescriptor, ClassDescriptor, ConstructorDescriptor, Descriptor, ElementDescriptor,
    FieldDescriptor, MemberDescriptor, MethodDescriptor,
};
pub use crate::fault::{Fault, FaultKind, FaultPhase};
pub use crate::outcome::InvocationOutcome;
pub use crate::projection::{AnnotationDescriptor, AttributeValue};
pub use crate::reflector::Reflector;

pub use r4j_signature::{ElementKey, ElementKind, InvalidSignature};
