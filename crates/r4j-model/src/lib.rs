//! Host type system for r4j.
//!
//! Types, members and annotations are plain data records held in an immutable
//! [`TypeRegistry`]. Member bodies are ordinary closures, runtime objects are
//! [`Instance`]s with named field slots. The reflection layer reads this model;
//! it never mutates the metadata.
#![forbid(unsafe_code)]

mod annotation;
mod builtins;
mod def;
mod error;
pub mod markers;
mod modifiers;
mod registry;
mod value;

pub use crate::annotation::{Annotation, ConstValue, ElementValue};
pub use crate::builtins::{
    ANNOTATION, CHAR_SEQUENCE, COMPARABLE, NUMBER, OBJECT, SERIALIZABLE, STRING,
};
pub use crate::def::{
    AttributeDef, ConstructorBody, ConstructorDef, FieldDef, MethodBody, MethodDef, TypeDef,
    TypeKind,
};
pub use crate::error::TargetError;
pub use crate::modifiers::*;
pub use crate::registry::{TypeProvider, TypeRegistry};
pub use crate::value::{Instance, ObjectRef, Primitive, Value};
