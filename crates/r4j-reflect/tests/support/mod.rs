#![allow(dead_code)]

use r4j_model::markers::{Alias, Comment, Documented, Ignore, Retention};
use r4j_model::{
    Annotation, AttributeDef, ConstructorDef, ElementValue, FieldDef, MethodDef, Modifiers,
    ObjectRef, TargetError, TypeDef, TypeRegistry, Value, OBJECT, SERIALIZABLE, STRING,
};
use r4j_reflect::Reflector;

pub const ENTITY: &str = "com.acme.Entity";
pub const USER: &str = "com.acme.User";
pub const NAMED: &str = "com.acme.Named";
pub const HIDDEN: &str = "com.acme.Hidden";
pub const AUDITED: &str = "com.acme.Audited";
pub const RECURSIVE: &str = "com.acme.Recursive";
pub const PING: &str = "com.acme.Ping";
pub const PONG: &str = "com.acme.Pong";
pub const MISSING: &str = "com.other.Missing";

const NO_PARAMS: [&str; 0] = [];

pub fn reflector() -> Reflector {
    Reflector::new(registry())
}

pub fn registry() -> TypeRegistry {
    TypeRegistry::with_builtins()
        .with_type(audited())
        .with_type(TypeDef::annotation_type(RECURSIVE).annotated(Annotation::new(RECURSIVE)))
        .with_type(TypeDef::annotation_type(PING).annotated(Annotation::new(PONG)))
        .with_type(TypeDef::annotation_type(PONG).annotated(Annotation::new(PING)))
        .with_type(TypeDef::interface(NAMED))
        .with_type(TypeDef::class(HIDDEN).annotated(Ignore::because("internal")))
        .with_type(entity())
        .with_type(user())
}

fn audited() -> TypeDef {
    TypeDef::annotation_type(AUDITED)
        .annotated(Documented::marker())
        .annotated(Retention::runtime())
        .with_attribute(AttributeDef::new("level", "int").with_default(1))
        .with_attribute(
            AttributeDef::new("tags", "java.lang.String[]")
                .with_default(ElementValue::strings(Vec::<String>::new())),
        )
        .with_attribute(AttributeDef::new("note", "r4j.annotation.Comment"))
}

fn entity() -> TypeDef {
    TypeDef::class(ENTITY)
        .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
        .extends(OBJECT)
        .with_field(FieldDef::new("id", "long").with_modifiers(Modifiers::PROTECTED))
        .with_method(
            MethodDef::new("describe", NO_PARAMS, STRING)
                .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT),
        )
        .with_method(MethodDef::new("kind", NO_PARAMS, STRING).body(|_, _| Ok(Value::from("entity"))))
        .with_constructor(ConstructorDef::new(NO_PARAMS).with_modifiers(Modifiers::PROTECTED))
}

fn user() -> TypeDef {
    TypeDef::class(USER)
        .extends(ENTITY)
        .implements(SERIALIZABLE)
        .implements(NAMED)
        .implements("com.other.Unknown")
        .annotated(Alias::of(["Member"]))
        .annotated(
            Annotation::new(AUDITED)
                .with("level", 3)
                .with("note", Comment::new("reviewed")),
        )
        .annotated(Annotation::new(MISSING))
        .annotated(Comment::new("aggregate root"))
        .with_field(FieldDef::new("name", STRING))
        .with_field(
            FieldDef::new("password", STRING)
                .annotated(Ignore::marker())
                .annotated(Alias::primary(["name", "secret"])),
        )
        .with_field(FieldDef::new("nickname", STRING).annotated(Alias::case_insensitive(["Handle"])))
        .with_field(FieldDef::new("title", STRING).annotated(Alias::of(["Heading"])))
        .with_field(FieldDef::new("age", "int").annotated(Comment::new("in years")))
        .with_field(
            FieldDef::new("COUNT", "int")
                .with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC)
                .with_value(7),
        )
        .with_field(
            FieldDef::new("PREFIX", STRING)
                .with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL)
                .with_value("usr"),
        )
        .with_method(
            MethodDef::new("getName", NO_PARAMS, STRING)
                .annotated(Annotation::new(AUDITED).with("tags", ElementValue::strings(["read"])))
                .body(|this, _| Ok(receiver(this)?.get("name").unwrap_or(Value::Null))),
        )
        .with_method(
            MethodDef::new("rename", [STRING], "void")
                .annotated(Alias::of(["setName"]))
                .body(|this, args| {
                    receiver(this)?.set("name", args[0].clone());
                    Ok(Value::Null)
                }),
        )
        .with_method(MethodDef::new("describe", NO_PARAMS, STRING).body(|this, _| {
            let name = receiver(this)?.get("name").unwrap_or(Value::Null);
            Ok(Value::from(format!("user:{}", name.as_str().unwrap_or("?"))))
        }))
        .with_method(
            MethodDef::new("twice", ["int"], "int")
                .with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC)
                .body(|_, args| Ok(Value::Int(args[0].as_int().unwrap_or(0) * 2))),
        )
        .with_method(
            MethodDef::new("widen", ["long"], "long")
                .with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC)
                .body(|_, args| Ok(args[0].clone())),
        )
        .with_method(
            MethodDef::new("join", [STRING, "java.lang.String..."], STRING)
                .with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC)
                .body(|_, args| {
                    let separator = args[0].as_str().unwrap_or_default();
                    let parts: Vec<&str> = args[1]
                        .as_array()
                        .unwrap_or_default()
                        .iter()
                        .filter_map(Value::as_str)
                        .collect();
                    Ok(Value::from(parts.join(separator)))
                }),
        )
        .with_method(
            MethodDef::new("fail", NO_PARAMS, "void")
                .body(|_, _| Err(TargetError::illegal_state("boom"))),
        )
        .with_method(
            MethodDef::new("explode", NO_PARAMS, "void")
                .body(|_, _| -> Result<Value, TargetError> { panic!("exploded") }),
        )
        .with_method(MethodDef::new("load", NO_PARAMS, "void").annotated(Alias::of(["fetch"])))
        .with_method(
            MethodDef::new("retrieve", NO_PARAMS, "void").annotated(Alias::primary(["load", "fetch"])),
        )
        .with_method(MethodDef::new("syncA", NO_PARAMS, "void").annotated(Alias::of(["sync"])))
        .with_method(MethodDef::new("syncB", NO_PARAMS, "void").annotated(Alias::of(["sync"])))
        .with_method(
            MethodDef::new("reset", NO_PARAMS, "void")
                .annotated(Ignore::marker())
                .annotated(Alias::primary(["clear"])),
        )
        .with_constructor(ConstructorDef::new(NO_PARAMS))
        .with_constructor(ConstructorDef::new([STRING]).body(|this, args| {
            this.set("name", args[0].clone());
            Ok(())
        }))
        .with_constructor(ConstructorDef::new(["int"]).annotated(Ignore::marker()))
}

fn receiver(this: Option<&ObjectRef>) -> Result<&ObjectRef, TargetError> {
    this.ok_or_else(|| TargetError::illegal_state("missing receiver"))
}
