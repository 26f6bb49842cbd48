use std::fmt;
use std::sync::{Arc, OnceLock};

use r4j_model::{FieldDef, MethodDef, Modifiers, TypeDef, TypeKind, OBJECT};
use r4j_signature::{parse_as, ElementKey, ElementKind, InvalidSignature};

use crate::alias::{self, Aliased};
use crate::context::Context;
use crate::descriptor::{
    AnnotatedDescriptor, ConstructorDescriptor, Descriptor, ElementDescriptor, FieldDescriptor,
    MemberRef, MethodDescriptor,
};
use crate::projection::{project_all, AnnotationDescriptor};
use crate::reflector::Reflector;

#[derive(Clone)]
struct ClassRef {
    ctx: Context,
    def: Arc<TypeDef>,
}

/// Descriptor of a class, interface, enum, record or annotation type.
#[derive(Clone)]
pub struct ClassDescriptor {
    key: ElementKey,
    inner: Option<ClassRef>,
    annotations: OnceLock<Vec<AnnotationDescriptor>>,
}

impl ClassDescriptor {
    pub(crate) fn present(ctx: &Context, def: Arc<TypeDef>) -> Self {
        Self::present_as(ctx, def, ElementKind::Class)
    }

    /// `kind` is `Annotation` when the type was looked up through an
    /// `@`-signature.
    pub(crate) fn present_as(ctx: &Context, def: Arc<TypeDef>, kind: ElementKind) -> Self {
        let key = match kind {
            ElementKind::Annotation => ElementKey::annotation(def.name.as_str()),
            _ => ElementKey::class(def.name.as_str()),
        };
        Self {
            key,
            inner: Some(ClassRef {
                ctx: ctx.clone(),
                def,
            }),
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

    fn def(&self) -> Option<&TypeDef> {
        self.inner.as_ref().map(|class| &*class.def)
    }

    /// Fully-qualified name of the type, or of the looked-up name for the
    /// sentinel.
    fn owner_name(&self) -> &str {
        self.def().map_or(self.key.owner(), |def| def.name.as_str())
    }

    pub fn simple_name(&self) -> &str {
        let name = self.owner_name();
        name.rsplit('.').next().unwrap_or(name)
    }

    pub fn package_name(&self) -> &str {
        self.owner_name()
            .rsplit_once('.')
            .map_or("", |(package, _)| package)
    }

    pub fn kind(&self) -> Option<TypeKind> {
        self.def().map(|def| def.kind)
    }

    pub fn modifiers(&self) -> Modifiers {
        self.def().map_or(Modifiers::NONE, |def| def.modifiers)
    }

    /// True for interfaces and annotation types.
    pub fn is_interface(&self) -> bool {
        matches!(self.kind(), Some(TypeKind::Interface | TypeKind::Annotation))
    }

    pub fn is_enum(&self) -> bool {
        self.kind() == Some(TypeKind::Enum)
    }

    pub fn is_annotation(&self) -> bool {
        self.kind() == Some(TypeKind::Annotation)
    }

    pub fn is_record(&self) -> bool {
        self.kind() == Some(TypeKind::Record)
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers().is_abstract()
    }

    pub fn is_final(&self) -> bool {
        self.modifiers().is_final()
    }

    pub fn is_sealed(&self) -> bool {
        self.def().is_some_and(|def| def.sealed)
    }

    pub fn is_public(&self) -> bool {
        self.modifiers().is_public()
    }

    pub fn is_protected(&self) -> bool {
        self.modifiers().is_protected()
    }

    pub fn is_private(&self) -> bool {
        self.modifiers().is_private()
    }

    pub fn is_package_private(&self) -> bool {
        self.is_present() && self.modifiers().is_package_private()
    }

    /// The direct superclass. Absent when there is none or when it is not
    /// registered or ignored; the sentinel's key then names the declared
    /// superclass, or `java.lang.Object` when none is declared.
    pub fn superclass(&self) -> ClassDescriptor {
        let Some(class) = &self.inner else {
            return ClassDescriptor::absent(ElementKey::class(OBJECT));
        };
        let Some(name) = class.def.super_class.as_deref() else {
            return ClassDescriptor::absent(ElementKey::class(OBJECT));
        };
        match class.ctx.visible_type(name) {
            Some(def) => ClassDescriptor::present(&class.ctx, def),
            None => ClassDescriptor::absent(ElementKey::class(name)),
        }
    }

    /// Directly implemented interfaces that are registered and not ignored.
    pub fn interfaces(&self) -> Vec<ClassDescriptor> {
        let Some(class) = &self.inner else {
            return Vec::new();
        };
        class
            .def
            .interfaces
            .iter()
            .filter_map(|name| class.ctx.visible_type(name))
            .map(|def| ClassDescriptor::present(&class.ctx, def))
            .collect()
    }

    /// Whether this type is `other` or one of its subtypes.
    pub fn is_subtype_of(&self, other: &str) -> bool {
        match &self.inner {
            Some(class) => class.ctx.registry.is_subtype(&class.def.name, other),
            None => false,
        }
    }

    /// A declared field by real name or alias.
    pub fn field(&self, name: &str) -> FieldDescriptor {
        self.find_field(&ElementKey::field(self.owner_name(), name, None))
    }

    pub fn field_by_signature(&self, signature: &str) -> Result<FieldDescriptor, InvalidSignature> {
        let key = parse_as(signature, ElementKind::Field)?;
        Ok(self.find_field(&key))
    }

    /// Declared fields in declaration order, ignored ones left out.
    pub fn fields(&self) -> Vec<FieldDescriptor> {
        let Some(class) = &self.inner else {
            return Vec::new();
        };
        class
            .def
            .fields
            .iter()
            .enumerate()
            .filter(|(_, field)| !field.is_ignored())
            .map(|(index, field)| {
                FieldDescriptor::present(self.member_ref(class, index), field_key(&class.def, field))
            })
            .collect()
    }

    /// A declared method by real name or alias and exact parameter types.
    pub fn method(&self, name: &str, params: &[&str]) -> MethodDescriptor {
        self.find_method(&ElementKey::method(self.owner_name(), name, params, None))
    }

    pub fn method_by_signature(&self, signature: &str) -> Result<MethodDescriptor, InvalidSignature> {
        let key = parse_as(signature, ElementKind::Method)?;
        Ok(self.find_method(&key))
    }

    pub fn methods(&self) -> Vec<MethodDescriptor> {
        let Some(class) = &self.inner else {
            return Vec::new();
        };
        class
            .def
            .methods
            .iter()
            .enumerate()
            .filter(|(_, method)| !method.is_ignored())
            .map(|(index, method)| {
                MethodDescriptor::present(self.member_ref(class, index), method_key(&class.def, method))
            })
            .collect()
    }

    pub fn constructor(&self, params: &[&str]) -> ConstructorDescriptor {
        self.find_constructor(&ElementKey::constructor(self.owner_name(), params))
    }

    pub fn constructor_by_signature(
        &self,
        signature: &str,
    ) -> Result<ConstructorDescriptor, InvalidSignature> {
        let key = parse_as(signature, ElementKind::Constructor)?;
        Ok(self.find_constructor(&key))
    }

    pub fn constructors(&self) -> Vec<ConstructorDescriptor> {
        let Some(class) = &self.inner else {
            return Vec::new();
        };
        class
            .def
            .constructors
            .iter()
            .enumerate()
            .filter(|(_, constructor)| !constructor.is_ignored())
            .map(|(index, constructor)| {
                let key = ElementKey::constructor(class.def.name.as_str(), &constructor.params);
                ConstructorDescriptor::present(self.member_ref(class, index), key)
            })
            .collect()
    }

    /// Resolve a key against this type. Member keys must name this type as
    /// their owner (by real name or alias); type-level keys are resolved
    /// against the whole registry.
    pub fn describe(&self, key: &ElementKey) -> ElementDescriptor {
        match key.kind() {
            ElementKind::Field => ElementDescriptor::Field(self.find_field(key)),
            ElementKind::Method => ElementDescriptor::Method(self.find_method(key)),
            ElementKind::Constructor => ElementDescriptor::Constructor(self.find_constructor(key)),
            ElementKind::Class | ElementKind::Annotation => match &self.inner {
                Some(class) => Reflector::from_context(class.ctx.clone()).describe(key),
                None => ElementDescriptor::absent(key.clone()),
            },
        }
    }

    fn member_ref(&self, class: &ClassRef, index: usize) -> MemberRef {
        MemberRef {
            ctx: class.ctx.clone(),
            owner: class.def.clone(),
            index,
        }
    }

    /// The owning class when `key` belongs to it.
    fn owning_class(&self, key: &ElementKey) -> Option<&ClassRef> {
        let class = self.inner.as_ref()?;
        let owns = key.owner() == class.def.name
            || alias::resolve(std::iter::once(&*class.def), key.owner()).is_some();
        owns.then_some(class)
    }

    fn find_field(&self, key: &ElementKey) -> FieldDescriptor {
        let found = self.owning_class(key).and_then(|class| {
            let candidates: Vec<(usize, &FieldDef)> = class
                .def
                .fields
                .iter()
                .enumerate()
                .filter(|(_, field)| key.value_type().map_or(true, |ty| ty == field.type_name))
                .collect();
            let index = resolve_index(&candidates, key.name())?;
            let field = class.def.fields.get(index)?;
            Some(FieldDescriptor::present(
                self.member_ref(class, index),
                field_key(&class.def, field),
            ))
        });
        found.unwrap_or_else(|| {
            log_miss(key);
            FieldDescriptor::absent(key.clone())
        })
    }

    fn find_method(&self, key: &ElementKey) -> MethodDescriptor {
        let found = self.owning_class(key).and_then(|class| {
            let candidates: Vec<(usize, &MethodDef)> = class
                .def
                .methods
                .iter()
                .enumerate()
                .filter(|(_, method)| {
                    method.params.as_slice() == key.params()
                        && key.value_type().map_or(true, |ty| ty == method.return_type)
                })
                .collect();
            let index = resolve_index(&candidates, key.name())?;
            let method = class.def.methods.get(index)?;
            Some(MethodDescriptor::present(
                self.member_ref(class, index),
                method_key(&class.def, method),
            ))
        });
        found.unwrap_or_else(|| {
            log_miss(key);
            MethodDescriptor::absent(key.clone())
        })
    }

    fn find_constructor(&self, key: &ElementKey) -> ConstructorDescriptor {
        let found = self.owning_class(key).and_then(|class| {
            let candidates: Vec<_> = class
                .def
                .constructors
                .iter()
                .enumerate()
                .filter(|(_, constructor)| constructor.params.as_slice() == key.params())
                .collect();
            let index = resolve_index(&candidates, key.name())?;
            let constructor = class.def.constructors.get(index)?;
            Some(ConstructorDescriptor::present(
                self.member_ref(class, index),
                ElementKey::constructor(class.def.name.as_str(), &constructor.params),
            ))
        });
        found.unwrap_or_else(|| {
            log_miss(key);
            ConstructorDescriptor::absent(key.clone())
        })
    }
}

/// Alias-resolve `query` among pre-filtered candidates and map the match
/// back to its declaration index.
fn resolve_index<M: Aliased>(candidates: &[(usize, &M)], query: &str) -> Option<usize> {
    let found = alias::resolve(candidates.iter().map(|(_, member)| *member), query)?;
    candidates.get(found.index).map(|(index, _)| *index)
}

fn field_key(owner: &TypeDef, field: &FieldDef) -> ElementKey {
    ElementKey::field(owner.name.as_str(), field.name.as_str(), Some(field.type_name.as_str()))
}

fn method_key(owner: &TypeDef, method: &MethodDef) -> ElementKey {
    ElementKey::method(
        owner.name.as_str(),
        method.name.as_str(),
        &method.params,
        Some(method.return_type.as_str()),
    )
}

fn log_miss(key: &ElementKey) {
    tracing::debug!(target: "r4j.lookup", signature = %key, "no matching element");
}

impl Descriptor for ClassDescriptor {
    type Element = TypeDef;

    fn key(&self) -> &ElementKey {
        &self.key
    }

    fn element(&self) -> Option<&TypeDef> {
        self.def()
    }
}

impl AnnotatedDescriptor for ClassDescriptor {
    fn annotations(&self) -> &[AnnotationDescriptor] {
        self.annotations.get_or_init(|| match &self.inner {
            Some(class) => project_all(&class.ctx, &class.def.annotations),
            None => Vec::new(),
        })
    }
}

impl fmt::Debug for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDescriptor")
            .field("key", &self.key.to_signature())
            .field("present", &self.is_present())
            .finish_non_exhaustive()
    }
}
