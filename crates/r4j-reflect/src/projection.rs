//! Annotation views.
//!
//! An [`AnnotationDescriptor`] projects one annotation instance: its
//! attributes (explicit values merged over the declared defaults) and the
//! annotations on its annotation type. Meta-annotation graphs can be cyclic
//! (`@Documented` is itself `@Documented`), so every view remembers the
//! annotation types on the path from the root view. A view whose type already
//! appears on that path is still listed but does not expand any further.
use std::fmt;
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use r4j_model::markers::AnnotationType;
use r4j_model::{Annotation, ConstValue, ElementValue, TypeDef};
use r4j_signature::{parse_annotation, ElementKey, InvalidSignature};

use crate::context::Context;
use crate::descriptor::{ClassDescriptor, Descriptor};

/// A projected annotation element value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Boolean(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Enum { type_name: String, const_name: String },
    Class(String),
    Annotation(AnnotationDescriptor),
    Array(Vec<AttributeValue>),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            AttributeValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_annotation(&self) -> Option<&AnnotationDescriptor> {
        match self {
            AttributeValue::Annotation(annotation) => Some(annotation),
            _ => None,
        }
    }

    /// Strings of a string array, skipping anything else.
    pub fn strings(&self) -> Vec<&str> {
        self.as_array()
            .map(|values| values.iter().filter_map(AttributeValue::as_str).collect())
            .unwrap_or_default()
    }
}

struct Projection {
    ctx: Context,
    annotation: Annotation,
    type_def: Arc<TypeDef>,
    /// Annotation types from the root view down to this one, inclusive.
    path: Vec<String>,
    expand: bool,
    attributes: OnceLock<IndexMap<String, AttributeValue>>,
    meta: OnceLock<Vec<AnnotationDescriptor>>,
}

/// View over one annotation instance.
///
/// Equality compares the signature and the projected annotation data.
#[derive(Clone)]
pub struct AnnotationDescriptor {
    key: ElementKey,
    inner: Option<Arc<Projection>>,
}

impl AnnotationDescriptor {
    pub(crate) fn absent(key: ElementKey) -> Self {
        Self { key, inner: None }
    }

    /// Project `annotation` as a root view. Annotations of unregistered or
    /// ignored types project to the absent sentinel.
    pub(crate) fn project(ctx: &Context, annotation: &Annotation) -> Self {
        Self::project_on_path(ctx, annotation, &[])
    }

    fn project_on_path(ctx: &Context, annotation: &Annotation, parent_path: &[String]) -> Self {
        let key = ElementKey::annotation(annotation.type_name.as_str());
        let Some(type_def) = ctx.visible_type(&annotation.type_name) else {
            tracing::debug!(
                target: "r4j.projection",
                annotation = %annotation.type_name,
                "annotation type is not registered"
            );
            return Self::absent(key);
        };

        let expand = !parent_path.iter().any(|seen| *seen == type_def.name);
        let mut path = parent_path.to_vec();
        path.push(type_def.name.clone());
        Self {
            key,
            inner: Some(Arc::new(Projection {
                ctx: ctx.clone(),
                annotation: annotation.clone(),
                type_def,
                path,
                expand,
                attributes: OnceLock::new(),
                meta: OnceLock::new(),
            })),
        }
    }

    /// Fully-qualified name of the annotation type.
    pub fn type_name(&self) -> &str {
        self.key.owner()
    }

    /// The annotation type itself, as a class descriptor.
    pub fn annotation_type(&self) -> ClassDescriptor {
        match &self.inner {
            Some(projection) => ClassDescriptor::present(&projection.ctx, projection.type_def.clone()),
            None => ClassDescriptor::absent(ElementKey::class(self.key.owner())),
        }
    }

    /// Every declared attribute with its explicit or default value, in
    /// declaration order, followed by explicit values the type does not
    /// declare. Declared attributes with neither are left out.
    pub fn attributes(&self) -> &IndexMap<String, AttributeValue> {
        static EMPTY: OnceLock<IndexMap<String, AttributeValue>> = OnceLock::new();
        match &self.inner {
            Some(projection) => projection
                .attributes
                .get_or_init(|| project_attributes(projection)),
            None => EMPTY.get_or_init(IndexMap::new),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes().get(name)
    }

    /// Annotations on the annotation type, projected one level down.
    pub fn meta_annotations(&self) -> &[AnnotationDescriptor] {
        match &self.inner {
            Some(projection) => projection.meta.get_or_init(|| project_meta(projection)),
            None => &[],
        }
    }

    pub fn meta_annotation(&self, signature: &str) -> Result<AnnotationDescriptor, InvalidSignature> {
        let key = parse_annotation(signature)?;
        Ok(find_annotation(self.meta_annotations(), key))
    }

    pub fn meta_annotation_of<A: AnnotationType>(&self) -> AnnotationDescriptor {
        find_annotation(self.meta_annotations(), ElementKey::annotation(A::NAME))
    }

    pub fn has_meta_annotation(&self, signature: &str) -> Result<bool, InvalidSignature> {
        Ok(self.meta_annotation(signature)?.is_present())
    }

    pub fn has_meta_annotation_of<A: AnnotationType>(&self) -> bool {
        self.meta_annotation_of::<A>().is_present()
    }
}

impl Descriptor for AnnotationDescriptor {
    type Element = Annotation;

    fn key(&self) -> &ElementKey {
        &self.key
    }

    fn element(&self) -> Option<&Annotation> {
        self.inner.as_ref().map(|projection| &projection.annotation)
    }
}

impl PartialEq for AnnotationDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.element() == other.element()
    }
}

impl fmt::Debug for AnnotationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationDescriptor")
            .field("key", &self.key.to_signature())
            .field("annotation", &self.element())
            .finish_non_exhaustive()
    }
}

/// The first view with `key`'s type, or the absent sentinel.
pub(crate) fn find_annotation(views: &[AnnotationDescriptor], key: ElementKey) -> AnnotationDescriptor {
    views
        .iter()
        .find(|view| view.key == key)
        .cloned()
        .unwrap_or_else(|| AnnotationDescriptor::absent(key))
}

/// Root views for an element's annotations; unregistered types drop out.
pub(crate) fn project_all(ctx: &Context, annotations: &[Annotation]) -> Vec<AnnotationDescriptor> {
    annotations
        .iter()
        .map(|annotation| AnnotationDescriptor::project(ctx, annotation))
        .filter(|view| view.is_present())
        .collect()
}

fn project_meta(projection: &Projection) -> Vec<AnnotationDescriptor> {
    let depth = projection.path.len().saturating_sub(1);
    if !projection.expand || depth >= projection.ctx.config.projection.max_meta_depth {
        return Vec::new();
    }
    projection
        .type_def
        .annotations
        .iter()
        .map(|meta| AnnotationDescriptor::project_on_path(&projection.ctx, meta, &projection.path))
        .filter(|view| view.is_present())
        .collect()
}

fn project_attributes(projection: &Projection) -> IndexMap<String, AttributeValue> {
    let annotation = &projection.annotation;
    let mut attributes = IndexMap::new();
    for declared in &projection.type_def.attributes {
        let value = annotation
            .element(&declared.name)
            .or(declared.default.as_ref());
        if let Some(value) = value {
            attributes.insert(declared.name.clone(), project_value(&projection.ctx, value));
        }
    }
    for (name, value) in &annotation.elements {
        if !attributes.contains_key(name) {
            attributes.insert(name.clone(), project_value(&projection.ctx, value));
        }
    }
    attributes
}

fn project_value(ctx: &Context, value: &ElementValue) -> AttributeValue {
    match value {
        ElementValue::Const(constant) => match constant {
            ConstValue::Boolean(v) => AttributeValue::Boolean(*v),
            ConstValue::Char(v) => AttributeValue::Char(*v),
            ConstValue::Byte(v) => AttributeValue::Byte(*v),
            ConstValue::Short(v) => AttributeValue::Short(*v),
            ConstValue::Int(v) => AttributeValue::Int(*v),
            ConstValue::Long(v) => AttributeValue::Long(*v),
            ConstValue::Float(v) => AttributeValue::Float(*v),
            ConstValue::Double(v) => AttributeValue::Double(*v),
            ConstValue::String(v) => AttributeValue::String(v.clone()),
        },
        ElementValue::Enum {
            type_name,
            const_name,
        } => AttributeValue::Enum {
            type_name: type_name.clone(),
            const_name: const_name.clone(),
        },
        ElementValue::Class(name) => AttributeValue::Class(name.clone()),
        ElementValue::Annotation(nested) => {
            AttributeValue::Annotation(AnnotationDescriptor::project(ctx, nested))
        }
        ElementValue::Array(values) => {
            AttributeValue::Array(values.iter().map(|value| project_value(ctx, value)).collect())
        }
    }
}
