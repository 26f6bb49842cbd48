use std::fmt;
use std::sync::OnceLock;

use r4j_model::{FieldDef, Modifiers, ObjectRef, Value};
use r4j_signature::ElementKey;

use crate::descriptor::{
    AnnotatedDescriptor, ClassDescriptor, Descriptor, MemberDescriptor, MemberRef,
};
use crate::invoke;
use crate::outcome::InvocationOutcome;
use crate::projection::{project_all, AnnotationDescriptor};

#[derive(Clone)]
pub struct FieldDescriptor {
    key: ElementKey,
    inner: Option<MemberRef>,
    annotations: OnceLock<Vec<AnnotationDescriptor>>,
}

impl FieldDescriptor {
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

    fn resolved(&self) -> Option<(&MemberRef, &FieldDef)> {
        let member = self.inner.as_ref()?;
        Some((member, member.owner.fields.get(member.index)?))
    }

    /// Declared type, or the type named by the lookup signature.
    pub fn type_name(&self) -> Option<&str> {
        match self.element() {
            Some(field) => Some(field.type_name.as_str()),
            None => self.key.value_type(),
        }
    }

    pub fn is_volatile(&self) -> bool {
        self.modifiers().is_volatile()
    }

    pub fn is_transient(&self) -> bool {
        self.modifiers().is_transient()
    }

    /// Read the field. `target` is ignored for static fields.
    pub fn get(&self, target: Option<&ObjectRef>) -> InvocationOutcome<Value> {
        match self.resolved() {
            Some((member, field)) => {
                invoke::get_field(&member.ctx, &self.key, &member.owner, field, target)
            }
            None => invoke::absent(&self.key),
        }
    }

    /// Write the field, converting `value` to the declared type.
    pub fn set(&self, target: Option<&ObjectRef>, value: impl Into<Value>) -> InvocationOutcome<()> {
        match self.resolved() {
            Some((member, field)) => invoke::set_field(
                &member.ctx,
                &self.key,
                &member.owner,
                field,
                target,
                value.into(),
            ),
            None => invoke::absent(&self.key),
        }
    }
}

impl Descriptor for FieldDescriptor {
    type Element = FieldDef;

    fn key(&self) -> &ElementKey {
        &self.key
    }

    fn element(&self) -> Option<&FieldDef> {
        self.resolved().map(|(_, field)| field)
    }
}

impl AnnotatedDescriptor for FieldDescriptor {
    fn annotations(&self) -> &[AnnotationDescriptor] {
        self.annotations.get_or_init(|| match self.resolved() {
            Some((member, field)) => project_all(&member.ctx, &field.annotations),
            None => Vec::new(),
        })
    }
}

impl MemberDescriptor for FieldDescriptor {
    fn declaring_class(&self) -> ClassDescriptor {
        match &self.inner {
            Some(member) => member.declaring_class(),
            None => ClassDescriptor::absent(ElementKey::class(self.key.owner())),
        }
    }

    fn modifiers(&self) -> Modifiers {
        self.element().map_or(Modifiers::NONE, |field| field.modifiers)
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("key", &self.key.to_signature())
            .field("present", &self.is_present())
            .finish_non_exhaustive()
    }
}
