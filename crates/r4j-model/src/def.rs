use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::annotation::{Annotation, ElementValue};
use crate::error::TargetError;
use crate::modifiers::{Modifiers, ACC_ABSTRACT, ACC_ANNOTATION, ACC_ENUM, ACC_INTERFACE, ACC_VARARGS};
use crate::value::{ObjectRef, Value};

/// Body of a method. The receiver is `None` for static methods.
pub type MethodBody =
    Arc<dyn Fn(Option<&ObjectRef>, &[Value]) -> Result<Value, TargetError> + Send + Sync>;

/// Body of a constructor, run against a freshly instantiated object.
pub type ConstructorBody = Arc<dyn Fn(&ObjectRef, &[Value]) -> Result<(), TargetError> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

/// A type definition as loaded into a [`crate::TypeRegistry`].
#[derive(Debug, Clone)]
pub struct TypeDef {
    /// Fully-qualified binary name (`com.acme.Outer$Inner`).
    pub name: String,
    pub kind: TypeKind,
    pub modifiers: Modifiers,
    pub sealed: bool,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub annotations: Vec<Annotation>,
    pub fields: Vec<FieldDef>,
    pub methods: Vec<MethodDef>,
    pub constructors: Vec<ConstructorDef>,
    /// Declared elements of an annotation type; empty for other kinds.
    pub attributes: Vec<AttributeDef>,
}

impl TypeDef {
    fn new(name: impl Into<String>, kind: TypeKind, modifiers: Modifiers) -> Self {
        Self {
            name: name.into(),
            kind,
            modifiers,
            sealed: false,
            super_class: None,
            interfaces: Vec::new(),
            annotations: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class, Modifiers::PUBLIC)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(
            name,
            TypeKind::Interface,
            Modifiers::PUBLIC.with(ACC_INTERFACE | ACC_ABSTRACT),
        )
    }

    pub fn annotation_type(name: impl Into<String>) -> Self {
        Self::new(
            name,
            TypeKind::Annotation,
            Modifiers::PUBLIC.with(ACC_INTERFACE | ACC_ABSTRACT | ACC_ANNOTATION),
        )
    }

    pub fn enum_type(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Enum, Modifiers::PUBLIC.with(ACC_ENUM))
    }

    pub fn record(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Record, Modifiers::PUBLIC | Modifiers::FINAL)
    }

    /// Replace the access flags. Kind-implied bits (interface, annotation,
    /// enum) are kept.
    pub fn with_modifiers(mut self, modifiers: impl Into<Modifiers>) -> Self {
        let implied = self.modifiers.bits() & (ACC_INTERFACE | ACC_ANNOTATION | ACC_ENUM);
        self.modifiers = modifiers.into().with(implied);
        self
    }

    pub fn sealed(mut self) -> Self {
        self.sealed = true;
        self
    }

    pub fn extends(mut self, super_class: impl Into<String>) -> Self {
        self.super_class = Some(super_class.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_constructor(mut self, constructor: ConstructorDef) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeDef) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Name after the last `.`; nested types keep their `$` segments.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Everything before the last `.`, empty for the default package.
    pub fn package_name(&self) -> &str {
        self.name.rsplit_once('.').map(|(pkg, _)| pkg).unwrap_or("")
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }
}

#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub type_name: String,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    /// Storage for static fields; unused for instance fields.
    storage: Arc<RwLock<Value>>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        let storage = Arc::new(RwLock::new(Value::default_for(&type_name)));
        Self {
            name: name.into(),
            type_name,
            modifiers: Modifiers::PRIVATE,
            annotations: Vec::new(),
            storage,
        }
    }

    pub fn with_modifiers(mut self, modifiers: impl Into<Modifiers>) -> Self {
        self.modifiers = modifiers.into();
        self
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Initial value of a static field.
    pub fn with_value(self, value: impl Into<Value>) -> Self {
        *self.storage.write() = value.into();
        self
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    pub fn static_value(&self) -> Value {
        self.storage.read().clone()
    }

    pub fn set_static_value(&self, value: Value) {
        *self.storage.write() = value;
    }
}

#[derive(Clone)]
pub struct MethodDef {
    pub name: String,
    /// Parameter type names; a trailing `T...` is stored as `T[]`.
    pub params: Vec<String>,
    pub return_type: String,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    /// `None` for abstract and native methods.
    pub body: Option<MethodBody>,
}

impl MethodDef {
    pub fn new<I, S>(name: impl Into<String>, params: I, return_type: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (params, varargs) = normalize_params(params);
        let modifiers = if varargs {
            Modifiers::PUBLIC.with(ACC_VARARGS)
        } else {
            Modifiers::PUBLIC
        };
        Self {
            name: name.into(),
            params,
            return_type: return_type.into(),
            modifiers,
            annotations: Vec::new(),
            body: None,
        }
    }

    /// Replace the access flags; a varargs parameter list keeps its flag.
    pub fn with_modifiers(mut self, modifiers: impl Into<Modifiers>) -> Self {
        let varargs = self.modifiers.bits() & ACC_VARARGS;
        self.modifiers = modifiers.into().with(varargs);
        self
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn body<F>(mut self, body: F) -> Self
    where
        F: Fn(Option<&ObjectRef>, &[Value]) -> Result<Value, TargetError> + Send + Sync + 'static,
    {
        self.body = Some(Arc::new(body));
        self
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    pub fn is_varargs(&self) -> bool {
        self.modifiers.is_varargs()
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract() || self.body.is_none()
    }
}

impl fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDef")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("return_type", &self.return_type)
            .field("modifiers", &self.modifiers)
            .field("annotations", &self.annotations)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

#[derive(Clone)]
pub struct ConstructorDef {
    pub params: Vec<String>,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    /// `None` leaves the blank instance as is.
    pub body: Option<ConstructorBody>,
}

impl ConstructorDef {
    pub fn new<I, S>(params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (params, varargs) = normalize_params(params);
        let modifiers = if varargs {
            Modifiers::PUBLIC.with(ACC_VARARGS)
        } else {
            Modifiers::PUBLIC
        };
        Self {
            params,
            modifiers,
            annotations: Vec::new(),
            body: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: impl Into<Modifiers>) -> Self {
        let varargs = self.modifiers.bits() & ACC_VARARGS;
        self.modifiers = modifiers.into().with(varargs);
        self
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn body<F>(mut self, body: F) -> Self
    where
        F: Fn(&ObjectRef, &[Value]) -> Result<(), TargetError> + Send + Sync + 'static,
    {
        self.body = Some(Arc::new(body));
        self
    }

    pub fn is_varargs(&self) -> bool {
        self.modifiers.is_varargs()
    }
}

impl fmt::Debug for ConstructorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDef")
            .field("params", &self.params)
            .field("modifiers", &self.modifiers)
            .field("annotations", &self.annotations)
            .finish_non_exhaustive()
    }
}

/// An element declared by an annotation type.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDef {
    pub name: String,
    pub type_name: String,
    pub default: Option<ElementValue>,
}

impl AttributeDef {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<ElementValue>) -> Self {
        self.default = Some(default.into());
        self
    }
}

fn normalize_params<I, S>(params: I) -> (Vec<String>, bool)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut varargs = false;
    let params = params
        .into_iter()
        .map(|param| {
            let param = param.as_ref().trim();
            match param.strip_suffix("...") {
                Some(component) => {
                    varargs = true;
                    format!("{component}[]")
                }
                None => param.to_string(),
            }
        })
        .collect();
    (params, varargs)
}
