//! Marker annotations understood by the lookup layer, and the bootstrap
//! annotations of `java.lang.annotation`.
//!
//! Each marker is a unit type implementing [`AnnotationType`], which stands in
//! for a compile-time annotation class reference:
//!
//! ```
//! use r4j_model::markers::{Alias, AnnotationType};
//! assert_eq!(Alias::NAME, "r4j.annotation.Alias");
//! ```
use crate::annotation::{Annotation, ElementValue};

/// A compile-time handle on an annotation type.
pub trait AnnotationType {
    /// Fully-qualified name of the annotation type.
    const NAME: &'static str;
}

pub const ALIAS: &str = "r4j.annotation.Alias";
pub const IGNORE: &str = "r4j.annotation.Ignore";
pub const COMMENT: &str = "r4j.annotation.Comment";

pub const DOCUMENTED: &str = "java.lang.annotation.Documented";
pub const RETENTION: &str = "java.lang.annotation.Retention";
pub const TARGET: &str = "java.lang.annotation.Target";
pub const INHERITED: &str = "java.lang.annotation.Inherited";
pub const RETENTION_POLICY: &str = "java.lang.annotation.RetentionPolicy";
pub const ELEMENT_TYPE: &str = "java.lang.annotation.ElementType";

/// Alternative lookup names for a type or member.
///
/// Elements: `value: String[] = {}`, `primary: boolean = false`,
/// `caseSensitive: boolean = true`.
pub struct Alias;

/// Removes a type or member from lookups and bulk listings.
///
/// Elements: `reason: String = ""`.
pub struct Ignore;

/// Free-form note for tooling; never affects lookups.
///
/// Elements: `value: String`, `category: String = ""`.
pub struct Comment;

pub struct Documented;
pub struct Retention;
pub struct Target;
pub struct Inherited;

impl AnnotationType for Alias {
    const NAME: &'static str = ALIAS;
}

impl AnnotationType for Ignore {
    const NAME: &'static str = IGNORE;
}

impl AnnotationType for Comment {
    const NAME: &'static str = COMMENT;
}

impl AnnotationType for Documented {
    const NAME: &'static str = DOCUMENTED;
}

impl AnnotationType for Retention {
    const NAME: &'static str = RETENTION;
}

impl AnnotationType for Target {
    const NAME: &'static str = TARGET;
}

impl AnnotationType for Inherited {
    const NAME: &'static str = INHERITED;
}

impl Alias {
    pub fn of<I, S>(names: I) -> Annotation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Annotation::new(ALIAS).with("value", ElementValue::strings(names))
    }

    /// Aliases tested before the real name.
    pub fn primary<I, S>(names: I) -> Annotation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::of(names).with("primary", true)
    }

    pub fn case_insensitive<I, S>(names: I) -> Annotation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::of(names).with("caseSensitive", false)
    }
}

impl Ignore {
    pub fn marker() -> Annotation {
        Annotation::new(IGNORE)
    }

    pub fn because(reason: impl Into<String>) -> Annotation {
        Annotation::new(IGNORE).with("reason", reason.into())
    }
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Annotation {
        Annotation::new(COMMENT).with("value", text.into())
    }

    pub fn categorized(text: impl Into<String>, category: impl Into<String>) -> Annotation {
        Self::new(text).with("category", category.into())
    }
}

impl Documented {
    pub fn marker() -> Annotation {
        Annotation::new(DOCUMENTED)
    }
}

impl Inherited {
    pub fn marker() -> Annotation {
        Annotation::new(INHERITED)
    }
}

impl Retention {
    pub fn runtime() -> Annotation {
        Annotation::new(RETENTION).with(
            "value",
            ElementValue::enum_constant(RETENTION_POLICY, "RUNTIME"),
        )
    }
}

impl Target {
    /// `@Target` over the given `ElementType` constants.
    pub fn of(element_types: &[&str]) -> Annotation {
        Annotation::new(TARGET).with(
            "value",
            ElementValue::Array(
                element_types
                    .iter()
                    .map(|name| ElementValue::enum_constant(ELEMENT_TYPE, *name))
                    .collect(),
            ),
        )
    }
}

/// Whether any annotation in `annotations` is an [`Ignore`] marker.
pub fn is_ignored(annotations: &[Annotation]) -> bool {
    annotations
        .iter()
        .any(|annotation| annotation.type_name == IGNORE)
}
