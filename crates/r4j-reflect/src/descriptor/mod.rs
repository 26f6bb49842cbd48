//! Descriptors: read-only views over registered types and their members.
//!
//! Every descriptor is either present (it wraps a definition) or the absent
//! sentinel for the key that was looked up. Annotation views are computed on
//! first access and kept for the lifetime of the descriptor value.
mod class;
mod constructor;
mod field;
mod method;

use std::sync::Arc;

use r4j_model::markers::AnnotationType;
use r4j_model::{Modifiers, TypeDef};
use r4j_signature::{parse_annotation, ElementKey, ElementKind, InvalidSignature};

use crate::context::Context;
use crate::projection::{find_annotation, AnnotationDescriptor};

pub use self::class::ClassDescriptor;
pub use self::constructor::ConstructorDescriptor;
pub use self::field::FieldDescriptor;
pub use self::method::MethodDescriptor;

/// Common surface of every descriptor.
pub trait Descriptor {
    /// The wrapped definition.
    type Element;

    fn key(&self) -> &ElementKey;

    /// The wrapped definition; `None` for the absent sentinel.
    fn element(&self) -> Option<&Self::Element>;

    /// Member name, or the fully-qualified name for types.
    fn name(&self) -> &str {
        self.key().name()
    }

    fn signature(&self) -> String {
        self.key().to_signature()
    }

    fn is_present(&self) -> bool {
        self.element().is_some()
    }
}

/// Descriptors of elements that can carry annotations.
///
/// Only annotations whose type is registered are visible.
pub trait AnnotatedDescriptor: Descriptor {
    fn annotations(&self) -> &[AnnotationDescriptor];

    /// Look up an annotation by `@`-prefixed signature.
    fn annotation(&self, signature: &str) -> Result<AnnotationDescriptor, InvalidSignature> {
        let key = parse_annotation(signature)?;
        Ok(find_annotation(self.annotations(), key))
    }

    fn annotation_of<A: AnnotationType>(&self) -> AnnotationDescriptor
    where
        Self: Sized,
    {
        find_annotation(self.annotations(), ElementKey::annotation(A::NAME))
    }

    fn has_annotation(&self, signature: &str) -> Result<bool, InvalidSignature> {
        Ok(self.annotation(signature)?.is_present())
    }

    fn has_annotation_of<A: AnnotationType>(&self) -> bool
    where
        Self: Sized,
    {
        self.annotation_of::<A>().is_present()
    }
}

/// Fields, methods and constructors.
pub trait MemberDescriptor: AnnotatedDescriptor {
    fn declaring_class(&self) -> ClassDescriptor;

    /// Access flags; empty for the absent sentinel.
    fn modifiers(&self) -> Modifiers;

    fn is_public(&self) -> bool {
        self.modifiers().is_public()
    }

    fn is_protected(&self) -> bool {
        self.modifiers().is_protected()
    }

    fn is_private(&self) -> bool {
        self.modifiers().is_private()
    }

    fn is_package_private(&self) -> bool {
        self.is_present() && self.modifiers().is_package_private()
    }

    fn is_static(&self) -> bool {
        self.modifiers().is_static()
    }

    fn is_final(&self) -> bool {
        self.modifiers().is_final()
    }

    fn is_synthetic(&self) -> bool {
        self.modifiers().is_synthetic()
    }
}

/// Handle on the `index`-th member of one kind declared by `owner`.
#[derive(Clone)]
pub(crate) struct MemberRef {
    pub(crate) ctx: Context,
    pub(crate) owner: Arc<TypeDef>,
    pub(crate) index: usize,
}

impl MemberRef {
    fn declaring_class(&self) -> ClassDescriptor {
        ClassDescriptor::present(&self.ctx, self.owner.clone())
    }
}

/// Result of a signature lookup of any kind.
#[derive(Debug, Clone)]
pub enum ElementDescriptor {
    /// Class and annotation-type keys.
    Class(ClassDescriptor),
    Field(FieldDescriptor),
    Method(MethodDescriptor),
    Constructor(ConstructorDescriptor),
}

impl ElementDescriptor {
    pub(crate) fn absent(key: ElementKey) -> Self {
        match key.kind() {
            ElementKind::Class | ElementKind::Annotation => {
                ElementDescriptor::Class(ClassDescriptor::absent(key))
            }
            ElementKind::Field => ElementDescriptor::Field(FieldDescriptor::absent(key)),
            ElementKind::Method => ElementDescriptor::Method(MethodDescriptor::absent(key)),
            ElementKind::Constructor => {
                ElementDescriptor::Constructor(ConstructorDescriptor::absent(key))
            }
        }
    }

    pub fn key(&self) -> &ElementKey {
        match self {
            ElementDescriptor::Class(d) => d.key(),
            ElementDescriptor::Field(d) => d.key(),
            ElementDescriptor::Method(d) => d.key(),
            ElementDescriptor::Constructor(d) => d.key(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.key().kind()
    }

    pub fn name(&self) -> &str {
        self.key().name()
    }

    pub fn signature(&self) -> String {
        self.key().to_signature()
    }

    pub fn is_present(&self) -> bool {
        match self {
            ElementDescriptor::Class(d) => d.is_present(),
            ElementDescriptor::Field(d) => d.is_present(),
            ElementDescriptor::Method(d) => d.is_present(),
            ElementDescriptor::Constructor(d) => d.is_present(),
        }
    }

    pub fn annotations(&self) -> &[AnnotationDescriptor] {
        match self {
            ElementDescriptor::Class(d) => d.annotations(),
            ElementDescriptor::Field(d) => d.annotations(),
            ElementDescriptor::Method(d) => d.annotations(),
            ElementDescriptor::Constructor(d) => d.annotations(),
        }
    }

    pub fn into_class(self) -> Option<ClassDescriptor> {
        match self {
            ElementDescriptor::Class(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_field(self) -> Option<FieldDescriptor> {
        match self {
            ElementDescriptor::Field(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_method(self) -> Option<MethodDescriptor> {
        match self {
            ElementDescriptor::Method(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_constructor(self) -> Option<ConstructorDescriptor> {
        match self {
            ElementDescriptor::Constructor(d) => Some(d),
            _ => None,
        }
    }
}
