use std::fmt;
use std::sync::OnceLock;

use r4j_model::{MethodDef, Modifiers, ObjectRef, Value};
use r4j_signature::ElementKey;

use crate::descriptor::{
    AnnotatedDescriptor, ClassDescriptor, Descriptor, MemberDescriptor, MemberRef,
};
use crate::invoke;
use crate::outcome::InvocationOutcome;
use crate::projection::{project_all, AnnotationDescriptor};

#[derive(Clone)]
pub struct MethodDescriptor {
    key: ElementKey,
    inner: Option<MemberRef>,
    annotations: OnceLock<Vec<AnnotationDescriptor>>,
}

impl MethodDescriptor {
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

    fn resolved(&self) -> Option<(&MemberRef, &MethodDef)> {
        let member = self.inner.as_ref()?;
        Some((member, member.owner.methods.get(member.index)?))
    }

    pub fn return_type(&self) -> Option<&str> {
        match self.element() {
            Some(method) => Some(method.return_type.as_str()),
            None => self.key.value_type(),
        }
    }

    /// Parameter types; a trailing varargs parameter is reported as `T[]`.
    pub fn parameter_types(&self) -> &[String] {
        match self.element() {
            Some(method) => method.params.as_slice(),
            None => self.key.params(),
        }
    }

    pub fn parameter_count(&self) -> usize {
        self.parameter_types().len()
    }

    pub fn is_varargs(&self) -> bool {
        self.element().is_some_and(MethodDef::is_varargs)
    }

    /// True for methods declared abstract and for methods without a body.
    pub fn is_abstract(&self) -> bool {
        self.element().is_some_and(MethodDef::is_abstract)
    }

    pub fn is_synchronized(&self) -> bool {
        self.modifiers().is_synchronized()
    }

    pub fn is_native(&self) -> bool {
        self.modifiers().is_native()
    }

    pub fn is_bridge(&self) -> bool {
        self.modifiers().is_bridge()
    }

    /// Invoke the method. `target` is required for instance methods and
    /// ignored for static ones; instance calls dispatch on the target's
    /// runtime class.
    pub fn invoke(&self, target: Option<&ObjectRef>, args: &[Value]) -> InvocationOutcome<Value> {
        match self.resolved() {
            Some((member, method)) => {
                invoke::call_method(&member.ctx, &self.key, &member.owner, method, target, args)
            }
            None => invoke::absent(&self.key),
        }
    }
}

impl Descriptor for MethodDescriptor {
    type Element = MethodDef;

    fn key(&self) -> &ElementKey {
        &self.key
    }

    fn element(&self) -> Option<&MethodDef> {
        self.resolved().map(|(_, method)| method)
    }
}

impl AnnotatedDescriptor for MethodDescriptor {
    fn annotations(&self) -> &[AnnotationDescriptor] {
        self.annotations.get_or_init(|| match self.resolved() {
            Some((member, method)) => project_all(&member.ctx, &method.annotations),
            None => Vec::new(),
        })
    }
}

impl MemberDescriptor for MethodDescriptor {
    fn declaring_class(&self) -> ClassDescriptor {
        match &self.inner {
            Some(member) => member.declaring_class(),
            None => ClassDescriptor::absent(ElementKey::class(self.key.owner())),
        }
    }

    fn modifiers(&self) -> Modifiers {
        self.element().map_or(Modifiers::NONE, |method| method.modifiers)
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("key", &self.key.to_signature())
            .field("present", &self.is_present())
            .finish_non_exhaustive()
    }
}
