//! Alias-aware name resolution over declared members.
//!
//! Candidates are tested in two passes: members whose [`AliasSpec`] is
//! primary first, then all others, each pass in declaration order. Within a
//! member the order depends on that member's own spec: a primary member is
//! tested alias names first, any other member real name first. Members marked
//! with the ignore marker never take part.
use std::sync::Arc;

use indexmap::IndexSet;
use r4j_model::markers::{self, ALIAS};
use r4j_model::{Annotation, ConstructorDef, ElementValue, FieldDef, MethodDef, TypeDef};
use r4j_signature::CONSTRUCTOR_NAME;

/// Alternative names attached to a declared member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasSpec {
    pub names: IndexSet<String>,
    pub primary: bool,
    pub case_sensitive: bool,
}

impl Default for AliasSpec {
    fn default() -> Self {
        Self {
            names: IndexSet::new(),
            primary: false,
            case_sensitive: true,
        }
    }
}

impl AliasSpec {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Marker-only specs carry no names and never affect resolution.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Read an alias marker annotation. Missing elements take the marker's
    /// declared defaults; a single string `value` counts as a one-element array.
    pub fn from_annotation(annotation: &Annotation) -> Option<AliasSpec> {
        if annotation.type_name != ALIAS {
            return None;
        }
        let mut spec = AliasSpec::default();
        match annotation.element("value") {
            Some(ElementValue::Array(values)) => {
                spec.names = values
                    .iter()
                    .filter_map(ElementValue::as_str)
                    .map(str::to_string)
                    .collect();
            }
            Some(value) => spec.names.extend(value.as_str().map(str::to_string)),
            None => {}
        }
        if let Some(primary) = annotation.element("primary").and_then(ElementValue::as_bool) {
            spec.primary = primary;
        }
        if let Some(case_sensitive) = annotation
            .element("caseSensitive")
            .and_then(ElementValue::as_bool)
        {
            spec.case_sensitive = case_sensitive;
        }
        Some(spec)
    }

    /// The first alias marker among `annotations`.
    pub fn from_annotations(annotations: &[Annotation]) -> Option<AliasSpec> {
        annotations.iter().find_map(AliasSpec::from_annotation)
    }

    fn matches(&self, candidate: &str, query: &str) -> bool {
        if self.case_sensitive {
            candidate == query
        } else {
            eq_ignore_case(candidate, query)
        }
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Something that can be looked up by name.
pub trait Aliased {
    fn real_name(&self) -> &str;

    fn annotations(&self) -> &[Annotation];

    fn alias_spec(&self) -> Option<AliasSpec> {
        AliasSpec::from_annotations(self.annotations())
    }

    fn is_ignored(&self) -> bool {
        markers::is_ignored(self.annotations())
    }
}

impl Aliased for TypeDef {
    fn real_name(&self) -> &str {
        &self.name
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl Aliased for FieldDef {
    fn real_name(&self) -> &str {
        &self.name
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl Aliased for MethodDef {
    fn real_name(&self) -> &str {
        &self.name
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl Aliased for ConstructorDef {
    fn real_name(&self) -> &str {
        CONSTRUCTOR_NAME
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl<T: Aliased + ?Sized> Aliased for Arc<T> {
    fn real_name(&self) -> &str {
        (**self).real_name()
    }

    fn annotations(&self) -> &[Annotation] {
        (**self).annotations()
    }
}

/// Which name of a member matched the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchSource {
    RealName,
    Alias(String),
}

/// One comparison made during resolution, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    /// Position of the member in the input sequence.
    pub index: usize,
    pub source: MatchSource,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'m, M: ?Sized> {
    /// Position of the member in the input sequence.
    pub index: usize,
    pub member: &'m M,
    pub source: MatchSource,
}

/// Find the member named `query`, by real name or alias.
pub fn resolve<'m, M, I>(members: I, query: &str) -> Option<Resolution<'m, M>>
where
    M: Aliased + ?Sized + 'm,
    I: IntoIterator<Item = &'m M>,
{
    resolve_inner(members, query, &mut |_| {})
}

/// Like [`resolve`], also returning every comparison made, in order.
pub fn resolve_with_probes<'m, M, I>(
    members: I,
    query: &str,
) -> (Option<Resolution<'m, M>>, Vec<Probe>)
where
    M: Aliased + ?Sized + 'm,
    I: IntoIterator<Item = &'m M>,
{
    let mut probes = Vec::new();
    let resolution = resolve_inner(members, query, &mut |probe| probes.push(probe));
    (resolution, probes)
}

fn resolve_inner<'m, M, I>(
    members: I,
    query: &str,
    record: &mut dyn FnMut(Probe),
) -> Option<Resolution<'m, M>>
where
    M: Aliased + ?Sized + 'm,
    I: IntoIterator<Item = &'m M>,
{
    let candidates: Vec<(usize, &'m M, Option<AliasSpec>)> = members
        .into_iter()
        .enumerate()
        .filter(|(_, member)| !member.is_ignored())
        .map(|(index, member)| {
            let spec = member.alias_spec().filter(|spec| !spec.is_empty());
            (index, member, spec)
        })
        .collect();

    for primary_pass in [true, false] {
        for (index, member, spec) in &candidates {
            let is_primary = spec.as_ref().is_some_and(|spec| spec.primary);
            if is_primary != primary_pass {
                continue;
            }
            let tested = test_member(*index, member.real_name(), spec.as_ref(), query, record);
            if let Some(source) = tested {
                tracing::trace!(
                    target: "r4j.alias",
                    query,
                    member = member.real_name(),
                    index = *index,
                    via_alias = matches!(source, MatchSource::Alias(_)),
                    "resolved"
                );
                return Some(Resolution {
                    index: *index,
                    member: *member,
                    source,
                });
            }
        }
    }
    None
}

fn test_member(
    index: usize,
    real_name: &str,
    spec: Option<&AliasSpec>,
    query: &str,
    record: &mut dyn FnMut(Probe),
) -> Option<MatchSource> {
    let Some(spec) = spec else {
        let matched = real_name == query;
        record(Probe {
            index,
            source: MatchSource::RealName,
            matched,
        });
        return matched.then_some(MatchSource::RealName);
    };

    let mut order: Vec<(MatchSource, &str)> = Vec::with_capacity(spec.names.len() + 1);
    let aliases = spec
        .names
        .iter()
        .map(|alias| (MatchSource::Alias(alias.clone()), alias.as_str()));
    if spec.primary {
        order.extend(aliases);
        order.push((MatchSource::RealName, real_name));
    } else {
        order.push((MatchSource::RealName, real_name));
        order.extend(aliases);
    }

    for (source, candidate) in order {
        let matched = spec.matches(candidate, query);
        record(Probe {
            index,
            source: source.clone(),
            matched,
        });
        if matched {
            return Some(source);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use r4j_model::markers::{Alias, Ignore};

    fn method(name: &str) -> MethodDef {
        MethodDef::new(name, Vec::<&str>::new(), "void")
    }

    #[test]
    fn spec_from_annotation_applies_defaults() {
        let spec = AliasSpec::from_annotation(&Alias::of(["a", "b", "a"])).unwrap();
        assert_eq!(spec.names.iter().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(!spec.primary);
        assert!(spec.case_sensitive);

        let single = Annotation::new(ALIAS).with("value", "solo");
        let spec = AliasSpec::from_annotation(&single).unwrap();
        assert_eq!(spec, AliasSpec::new(["solo"]));

        assert_eq!(AliasSpec::from_annotation(&Ignore::marker()), None);
    }

    #[test]
    fn exact_match_without_spec() {
        let members = [method("load"), method("save")];
        let found = resolve(&members, "save").unwrap();
        assert_eq!(found.index, 1);
        assert_eq!(found.source, MatchSource::RealName);
        assert!(resolve(&members, "SAVE").is_none());
    }

    #[test]
    fn empty_spec_does_not_change_matching() {
        let marker = Alias::primary(Vec::<String>::new()).with("caseSensitive", false);
        let members = [method("Load").annotated(marker)];
        assert!(resolve(&members, "load").is_none());
        assert!(resolve(&members, "Load").is_some());
    }

    #[test]
    fn case_insensitive_comparison_handles_non_ascii() {
        assert!(!eq_ignore_case("Straße", "STRASSE"));
        assert!(eq_ignore_case("ÉCOLE", "école"));
    }
}
