use std::sync::Arc;

use r4j_config::ReflectConfig;
use r4j_model::{TypeDef, TypeRegistry};

use crate::alias::{self, Aliased};

/// Shared state every descriptor carries: the registry it reads, the
/// configuration it runs under, and the registry's aliased types.
#[derive(Debug, Clone)]
pub(crate) struct Context {
    pub(crate) registry: Arc<TypeRegistry>,
    pub(crate) config: Arc<ReflectConfig>,
    /// Types carrying a non-empty alias spec, with their registry positions.
    aliased: Arc<[(usize, Arc<TypeDef>)]>,
}

impl Context {
    pub(crate) fn new(registry: Arc<TypeRegistry>, config: Arc<ReflectConfig>) -> Self {
        let aliased = registry
            .types()
            .enumerate()
            .filter(|(_, def)| def.alias_spec().is_some_and(|spec| !spec.is_empty()))
            .map(|(index, def)| (index, def.clone()))
            .collect();
        Self {
            registry,
            config,
            aliased,
        }
    }

    /// Alias-aware type lookup; ignored types never resolve.
    ///
    /// A type without aliases can only match its exact name, so the scan
    /// covers the aliased types plus the exact-name entry, in registry order.
    pub(crate) fn resolve_type(&self, name: &str) -> Option<Arc<TypeDef>> {
        let mut exact = self.registry.get_full(name);
        let mut candidates = Vec::with_capacity(self.aliased.len() + 1);
        for (index, def) in self.aliased.iter() {
            if let Some((position, exact_def)) = exact {
                if position <= *index {
                    if position < *index {
                        candidates.push(exact_def);
                    }
                    exact = None;
                }
            }
            candidates.push(def);
        }
        if let Some((_, exact_def)) = exact {
            candidates.push(exact_def);
        }
        alias::resolve(candidates, name).map(|found| found.member.clone())
    }

    /// A type by exact name, unless it is ignored.
    pub(crate) fn visible_type(&self, name: &str) -> Option<Arc<TypeDef>> {
        self.registry
            .get(name)
            .filter(|def| !def.is_ignored())
            .cloned()
    }
}
