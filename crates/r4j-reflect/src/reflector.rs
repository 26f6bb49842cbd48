use std::sync::Arc;

use r4j_config::ReflectConfig;
use r4j_model::{Annotation, TypeKind, TypeRegistry};
use r4j_signature::{parse, parse_annotation, parse_as, ElementKey, ElementKind, InvalidSignature};

use crate::alias::Aliased;
use crate::context::Context;
use crate::descriptor::{ClassDescriptor, Descriptor, ElementDescriptor};
use crate::projection::AnnotationDescriptor;

/// Entry point: resolves names and signatures against one registry.
///
/// Cloning is cheap; clones share the registry and configuration.
#[derive(Debug, Clone)]
pub struct Reflector {
    ctx: Context,
}

impl Reflector {
    pub fn new(registry: TypeRegistry) -> Self {
        Self::with_config(registry, ReflectConfig::default())
    }

    pub fn with_config(registry: TypeRegistry, config: ReflectConfig) -> Self {
        Self::from_shared(Arc::new(registry), Arc::new(config))
    }

    pub fn from_shared(registry: Arc<TypeRegistry>, config: Arc<ReflectConfig>) -> Self {
        Self::from_context(Context::new(registry, config))
    }

    pub(crate) fn from_context(ctx: Context) -> Self {
        Self { ctx }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.ctx.registry
    }

    pub fn config(&self) -> &ReflectConfig {
        &self.ctx.config
    }

    /// A type by fully-qualified name or alias. Ignored and unregistered
    /// types yield the absent sentinel.
    pub fn class(&self, name: &str) -> ClassDescriptor {
        match self.ctx.resolve_type(name) {
            Some(def) => ClassDescriptor::present(&self.ctx, def),
            None => {
                tracing::debug!(target: "r4j.lookup", class = name, "no matching type");
                ClassDescriptor::absent(ElementKey::class(name))
            }
        }
    }

    pub fn class_by_signature(&self, signature: &str) -> Result<ClassDescriptor, InvalidSignature> {
        let key = parse_as(signature, ElementKind::Class)?;
        Ok(self.class(key.owner()))
    }

    /// Every registered type that is not ignored, in registration order.
    pub fn classes(&self) -> Vec<ClassDescriptor> {
        self.ctx
            .registry
            .types()
            .filter(|def| !def.is_ignored())
            .map(|def| ClassDescriptor::present(&self.ctx, def.clone()))
            .collect()
    }

    /// An annotation type by `@`-signature. Types of another kind yield
    /// the sentinel.
    pub fn annotation_type(&self, signature: &str) -> Result<ClassDescriptor, InvalidSignature> {
        let key = parse_annotation(signature)?;
        Ok(self.annotation_type_for(key))
    }

    /// Parse `signature` and describe what it names.
    pub fn lookup(&self, signature: &str) -> Result<ElementDescriptor, InvalidSignature> {
        let key = parse(signature)?;
        Ok(self.describe(&key))
    }

    pub fn describe(&self, key: &ElementKey) -> ElementDescriptor {
        match key.kind() {
            ElementKind::Class => ElementDescriptor::Class(self.class(key.owner())),
            ElementKind::Annotation => {
                ElementDescriptor::Class(self.annotation_type_for(key.clone()))
            }
            ElementKind::Field | ElementKind::Method | ElementKind::Constructor => {
                let owner = self.class(key.owner());
                if owner.is_present() {
                    owner.describe(key)
                } else {
                    ElementDescriptor::absent(key.clone())
                }
            }
        }
    }

    /// View an annotation instance that is not attached to a registered
    /// element.
    pub fn project(&self, annotation: &Annotation) -> AnnotationDescriptor {
        AnnotationDescriptor::project(&self.ctx, annotation)
    }

    fn annotation_type_for(&self, key: ElementKey) -> ClassDescriptor {
        match self.ctx.resolve_type(key.owner()) {
            Some(def) if def.kind == TypeKind::Annotation => {
                ClassDescriptor::present_as(&self.ctx, def, ElementKind::Annotation)
            }
            _ => {
                tracing::debug!(target: "r4j.lookup", signature = %key, "no matching annotation type");
                ClassDescriptor::absent(key)
            }
        }
    }
}
