//! Core types every registry starts from.
use crate::annotation::ElementValue;
use crate::def::{AttributeDef, ConstructorDef, TypeDef};
use crate::markers::{
    Documented, Retention, Target, ALIAS, COMMENT, DOCUMENTED, ELEMENT_TYPE, IGNORE, INHERITED,
    RETENTION, RETENTION_POLICY, TARGET,
};
use crate::modifiers::{Modifiers, ACC_ABSTRACT};
use crate::value::Primitive;

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";
pub const NUMBER: &str = "java.lang.Number";
pub const CHAR_SEQUENCE: &str = "java.lang.CharSequence";
pub const COMPARABLE: &str = "java.lang.Comparable";
pub const SERIALIZABLE: &str = "java.io.Serializable";
pub const ANNOTATION: &str = "java.lang.annotation.Annotation";

const MEMBER_TARGETS: &[&str] = &["TYPE", "FIELD", "METHOD", "CONSTRUCTOR"];

pub(crate) fn builtin_types() -> Vec<TypeDef> {
    let mut types = vec![
        TypeDef::class(OBJECT).with_constructor(ConstructorDef::new(Vec::<&str>::new())),
        TypeDef::interface(SERIALIZABLE),
        TypeDef::interface(CHAR_SEQUENCE),
        TypeDef::interface(COMPARABLE),
        TypeDef::interface(ANNOTATION),
        TypeDef::class(STRING)
            .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL)
            .extends(OBJECT)
            .implements(SERIALIZABLE)
            .implements(CHAR_SEQUENCE)
            .implements(COMPARABLE),
        TypeDef::class(NUMBER)
            .with_modifiers(Modifiers::PUBLIC.with(ACC_ABSTRACT))
            .extends(OBJECT)
            .implements(SERIALIZABLE),
        TypeDef::enum_type(RETENTION_POLICY).extends("java.lang.Enum"),
        TypeDef::enum_type(ELEMENT_TYPE).extends("java.lang.Enum"),
        TypeDef::class("java.lang.Enum")
            .with_modifiers(Modifiers::PUBLIC.with(ACC_ABSTRACT))
            .extends(OBJECT)
            .implements(COMPARABLE)
            .implements(SERIALIZABLE),
    ];

    for primitive in Primitive::ALL {
        let super_class = if primitive.is_numeric() { NUMBER } else { OBJECT };
        types.push(
            TypeDef::class(primitive.boxed_name())
                .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL)
                .extends(super_class)
                .implements(COMPARABLE)
                .implements(SERIALIZABLE),
        );
    }

    // The bootstrap annotations annotate each other and themselves.
    types.push(meta_annotation(DOCUMENTED));
    types.push(
        meta_annotation(RETENTION).with_attribute(AttributeDef::new("value", RETENTION_POLICY)),
    );
    types.push(
        meta_annotation(TARGET)
            .with_attribute(AttributeDef::new("value", format!("{ELEMENT_TYPE}[]"))),
    );
    types.push(meta_annotation(INHERITED));

    types.push(
        marker(ALIAS, MEMBER_TARGETS)
            .with_attribute(
                AttributeDef::new("value", "java.lang.String[]")
                    .with_default(ElementValue::Array(Vec::new())),
            )
            .with_attribute(AttributeDef::new("primary", "boolean").with_default(false))
            .with_attribute(AttributeDef::new("caseSensitive", "boolean").with_default(true)),
    );
    types.push(
        marker(IGNORE, MEMBER_TARGETS)
            .with_attribute(AttributeDef::new("reason", STRING).with_default("")),
    );
    types.push(
        marker(COMMENT, &["TYPE", "METHOD", "FIELD", "CONSTRUCTOR", "ANNOTATION_TYPE"])
            .with_attribute(AttributeDef::new("value", STRING))
            .with_attribute(AttributeDef::new("category", STRING).with_default("")),
    );

    types
}

fn meta_annotation(name: &str) -> TypeDef {
    TypeDef::annotation_type(name)
        .implements(ANNOTATION)
        .annotated(Documented::marker())
        .annotated(Retention::runtime())
        .annotated(Target::of(&["ANNOTATION_TYPE"]))
}

fn marker(name: &str, targets: &[&str]) -> TypeDef {
    TypeDef::annotation_type(name)
        .implements(ANNOTATION)
        .annotated(Documented::marker())
        .annotated(Retention::runtime())
        .annotated(Target::of(targets))
}
