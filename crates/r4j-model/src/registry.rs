use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::builtins::{builtin_types, ANNOTATION, OBJECT, SERIALIZABLE};
use crate::def::{TypeDef, TypeKind};
use crate::value::{Instance, ObjectRef, Primitive, Value};

/// Lookup of type definitions by binary name.
pub trait TypeProvider {
    fn lookup_type(&self, binary_name: &str) -> Option<Arc<TypeDef>>;
}

/// Insertion-ordered set of type definitions.
///
/// Registration happens up front; once the registry is shared (usually behind
/// an `Arc`) it is read-only. Definitions are handed out as `Arc<TypeDef>` so
/// descriptors can hold on to them cheaply.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: IndexMap<String, Arc<TypeDef>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with `java.lang.Object`, `String`, the boxed
    /// primitives, the `java.lang.annotation` bootstrap annotations and the
    /// r4j marker annotations.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for def in builtin_types() {
            registry.register(def);
        }
        registry
    }

    /// Insert or replace a definition. Returns the definition it replaced.
    pub fn register(&mut self, def: TypeDef) -> Option<Arc<TypeDef>> {
        let name = def.name.clone();
        let previous = self.types.insert(name.clone(), Arc::new(def));
        tracing::debug!(
            target: "r4j.model",
            type_name = %name,
            replaced = previous.is_some(),
            "registered type"
        );
        previous
    }

    pub fn with_type(mut self, def: TypeDef) -> Self {
        self.register(def);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<TypeDef>> {
        self.types.get(name)
    }

    /// A definition together with its registration position.
    pub fn get_full(&self, name: &str) -> Option<(usize, &Arc<TypeDef>)> {
        self.types.get_full(name).map(|(index, _, def)| (index, def))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// All definitions in registration order.
    pub fn types(&self) -> impl Iterator<Item = &Arc<TypeDef>> + '_ {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Direct supertypes of a registered type: superclass first, then
    /// interfaces in declaration order.
    pub fn direct_supertypes(&self, name: &str) -> Vec<String> {
        let Some(def) = self.types.get(name) else {
            return Vec::new();
        };
        let mut out: Vec<String> = def.super_class.iter().cloned().collect();
        out.extend(def.interfaces.iter().cloned());
        if def.kind == TypeKind::Annotation && !out.iter().any(|name| name == ANNOTATION) {
            out.push(ANNOTATION.to_string());
        }
        out
    }

    /// Reflexive, transitive subtype test over reference types and arrays.
    ///
    /// Inheritance cycles in malformed registries terminate; unregistered
    /// supertypes simply end their branch.
    pub fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        if sub == sup {
            return true;
        }
        if Primitive::from_name(sub).is_some() || Primitive::from_name(sup).is_some() {
            return false;
        }
        if sup == OBJECT {
            return true;
        }

        match (sub.strip_suffix("[]"), sup.strip_suffix("[]")) {
            (Some(sub_component), Some(sup_component)) => {
                return if Primitive::from_name(sub_component).is_some() {
                    sub_component == sup_component
                } else {
                    self.is_subtype(sub_component, sup_component)
                };
            }
            (Some(_), None) => return sup == SERIALIZABLE || sup == "java.lang.Cloneable",
            (None, Some(_)) => return false,
            (None, None) => {}
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([sub.to_string()]);
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.clone()) {
                continue;
            }
            for parent in self.direct_supertypes(&current) {
                if parent == sup {
                    return true;
                }
                queue.push_back(parent);
            }
        }
        false
    }

    /// Convert `value` for a slot of type `target`, applying widening
    /// primitive conversion, boxing and reference assignability.
    ///
    /// Returns `None` when the value is not assignable.
    pub fn coerce(&self, value: &Value, target: &str) -> Option<Value> {
        if let Some(primitive) = Primitive::from_name(target) {
            return value.widen(primitive);
        }
        let source = match value {
            Value::Null => return Some(Value::Null),
            other => match other.primitive() {
                Some(primitive) => primitive.boxed_name().to_string(),
                None => other.type_name(),
            },
        };
        self.is_subtype(&source, target).then(|| value.clone())
    }

    /// A blank instance of a registered class: every instance field of the
    /// class and its superclasses set to the zero value of its type.
    pub fn instantiate(&self, class_name: &str) -> Option<ObjectRef> {
        let def = self.types.get(class_name)?;

        let mut chain = vec![def.clone()];
        let mut seen = HashSet::from([def.name.clone()]);
        let mut next = def.super_class.clone();
        while let Some(name) = next {
            let Some(parent) = self.types.get(&name) else {
                break;
            };
            if !seen.insert(parent.name.clone()) {
                break;
            }
            next = parent.super_class.clone();
            chain.push(parent.clone());
        }

        let mut slots = IndexMap::new();
        for def in chain.iter().rev() {
            for field in def.fields.iter().filter(|field| !field.is_static()) {
                slots.insert(
                    (def.name.clone(), field.name.clone()),
                    Value::default_for(&field.type_name),
                );
            }
        }
        Some(Instance::with_slots(class_name, slots))
    }
}

impl TypeProvider for TypeRegistry {
    fn lookup_type(&self, binary_name: &str) -> Option<Arc<TypeDef>> {
        self.types.get(binary_name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::FieldDef;
    use crate::modifiers::Modifiers;

    #[test]
    fn register_replaces_in_place() {
        let mut registry = TypeRegistry::new()
            .with_type(TypeDef::class("a.A"))
            .with_type(TypeDef::class("a.B"));
        let previous = registry.register(TypeDef::class("a.A").extends("a.B"));
        assert!(previous.is_some());
        let names: Vec<&str> = registry.types().map(|def| def.name.as_str()).collect();
        assert_eq!(names, vec!["a.A", "a.B"]);
        assert_eq!(registry.get("a.A").and_then(|def| def.super_class.as_deref()), Some("a.B"));
    }

    #[test]
    fn subtype_walk_survives_cycles() {
        let registry = TypeRegistry::new()
            .with_type(TypeDef::class("a.A").extends("a.B"))
            .with_type(TypeDef::class("a.B").extends("a.A"));
        assert!(registry.is_subtype("a.A", "a.B"));
        assert!(!registry.is_subtype("a.A", "a.C"));
    }

    #[test]
    fn instantiate_collects_inherited_instance_fields() {
        let registry = TypeRegistry::new()
            .with_type(
                TypeDef::class("a.Base")
                    .with_field(FieldDef::new("id", "long"))
                    .with_field(FieldDef::new("COUNT", "int").with_modifiers(Modifiers::STATIC)),
            )
            .with_type(
                TypeDef::class("a.User")
                    .extends("a.Base")
                    .with_field(FieldDef::new("name", "java.lang.String")),
            );
        let user = registry.instantiate("a.User").unwrap();
        assert_eq!(user.class_name(), "a.User");
        assert_eq!(user.field_names(), vec!["id".to_string(), "name".to_string()]);
        assert_eq!(user.get("id"), Some(Value::Long(0)));
        assert_eq!(user.get("name"), Some(Value::Null));
        assert!(registry.instantiate("a.Missing").is_none());
    }

    #[test]
    fn instantiate_keeps_shadowed_fields_apart() {
        let registry = TypeRegistry::new()
            .with_type(TypeDef::class("a.Base").with_field(FieldDef::new("id", "int")))
            .with_type(
                TypeDef::class("a.Sub")
                    .extends("a.Base")
                    .with_field(FieldDef::new("id", "java.lang.String")),
            );
        let sub = registry.instantiate("a.Sub").unwrap();
        assert_eq!(sub.field_names(), vec!["id".to_string(), "id".to_string()]);
        assert_eq!(sub.get_declared("a.Base", "id"), Some(Value::Int(0)));
        assert_eq!(sub.get_declared("a.Sub", "id"), Some(Value::Null));
        assert_eq!(sub.get("id"), Some(Value::Null));
    }
}
