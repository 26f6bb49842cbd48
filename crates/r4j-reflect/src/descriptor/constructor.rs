use std::fmt;
use std::sync::OnceLock;

use r4j_model::{ConstructorDef, Modifiers, ObjectRef, Value};
use r4j_signature::ElementKey;

use crate::descriptor::{
    AnnotatedDescriptor, ClassDescriptor, Descriptor, MemberDescriptor, MemberRef,
};
use crate::invoke;
use crate::outcome::InvocationOutcome;
use crate::projection::{project_all, AnnotationDescriptor};

#[derive(Clone)]
pub struct ConstructorDescriptor {
    key: ElementKey,
    inner: Option<MemberRef>,
    annotations: OnceLock<Vec<AnnotationDescriptor>>,
}

impl ConstructorDescriptor {
    pub(crate) fn present(member: MemberRef, key: ElementKey) -> Self {
        Self {
            key,
            inner: Some(member),
            annotations: OnceLock::new(),
        }
    }

    pub(crate) fn absent(key: ElementKey) -> Self {
        Self {
            key,
            inner: None,
            annotations: OnceLock::new(),
        }
    }

    fn resolved(&self) -> Option<(&MemberRef, &ConstructorDef)> {
        let member = self.inner.as_ref()?;
        Some((member, member.owner.constructors.get(member.index)?))
    }

    pub fn parameter_types(&self) -> &[String] {
        match self.element() {
            Some(constructor) => constructor.params.as_slice(),
            None => self.key.params(),
        }
    }

    pub fn parameter_count(&self) -> usize {
        self.parameter_types().len()
    }

    pub fn is_varargs(&self) -> bool {
        self.element().is_some_and(ConstructorDef::is_varargs)
    }

    /// Create a new instance: fields start at their type defaults, then the
    /// constructor body runs.
    pub fn invoke(&self, args: &[Value]) -> InvocationOutcome<ObjectRef> {
        match self.resolved() {
            Some((member, constructor)) => {
                invoke::construct(&member.ctx, &self.key, &member.owner, constructor, args)
            }
            None => invoke::absent(&self.key),
        }
    }
}

impl Descriptor for ConstructorDescriptor {
    type Element = ConstructorDef;

    fn key(&self) -> &ElementKey {
        &self.key
    }

    fn element(&self) -> Option<&ConstructorDef> {
        self.resolved().map(|(_, constructor)| constructor)
    }
}

impl AnnotatedDescriptor for ConstructorDescriptor {
    fn annotations(&self) -> &[AnnotationDescriptor] {
        self.annotations.get_or_init(|| match self.resolved() {
            Some((member, constructor)) => project_all(&member.ctx, &constructor.annotations),
            None => Vec::new(),
        })
    }
}

impl MemberDescriptor for ConstructorDescriptor {
    fn declaring_class(&self) -> ClassDescriptor {
        match &self.inner {
            Some(member) => member.declaring_class(),
            None => ClassDescriptor::absent(ElementKey::class(self.key.owner())),
        }
    }

    fn modifiers(&self) -> Modifiers {
        self.element()
            .map_or(Modifiers::NONE, |constructor| constructor.modifiers)
    }
}

impl fmt::Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("key", &self.key.to_signature())
            .field("present", &self.is_present())
            .finish_non_exhaustive()
    }
}
