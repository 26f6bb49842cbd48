use pretty_assertions::assert_eq;
use r4j_model::markers::{self, Alias, AnnotationType};
use r4j_model::{
    ElementValue, Instance, TypeDef, TypeKind, TypeProvider, TypeRegistry, Value, NUMBER, OBJECT,
    STRING,
};

#[test]
fn builtins_cover_core_types_and_markers() {
    let registry = TypeRegistry::with_builtins();
    for name in [OBJECT, STRING, NUMBER, "java.lang.Integer", "java.lang.Boolean"] {
        assert!(registry.contains(name), "{name} missing");
    }
    let alias = registry.lookup_type(Alias::NAME).unwrap();
    assert_eq!(alias.kind, TypeKind::Annotation);
    let attributes: Vec<(&str, Option<&ElementValue>)> = alias
        .attributes
        .iter()
        .map(|attr| (attr.name.as_str(), attr.default.as_ref()))
        .collect();
    assert_eq!(
        attributes,
        vec![
            ("value", Some(&ElementValue::Array(Vec::new()))),
            ("primary", Some(&ElementValue::from(false))),
            ("caseSensitive", Some(&ElementValue::from(true))),
        ]
    );
}

#[test]
fn documented_is_meta_annotated_with_itself() {
    let registry = TypeRegistry::with_builtins();
    let documented = registry.get(markers::DOCUMENTED).unwrap();
    assert!(documented
        .annotations
        .iter()
        .any(|annotation| annotation.type_name == markers::DOCUMENTED));
}

#[test]
fn coercion_widens_boxes_and_checks_references() {
    let registry = TypeRegistry::with_builtins()
        .with_type(TypeDef::interface("com.acme.Named"))
        .with_type(TypeDef::class("com.acme.User").implements("com.acme.Named"));

    assert_eq!(registry.coerce(&Value::Int(3), "long"), Some(Value::Long(3)));
    assert_eq!(registry.coerce(&Value::Long(3), "int"), None);
    assert_eq!(registry.coerce(&Value::Int(3), "java.lang.Integer"), Some(Value::Int(3)));
    assert_eq!(registry.coerce(&Value::Int(3), NUMBER), Some(Value::Int(3)));
    assert_eq!(registry.coerce(&Value::Int(3), "java.lang.Long"), None);
    assert_eq!(registry.coerce(&Value::Null, "int"), None);
    assert_eq!(registry.coerce(&Value::Null, STRING), Some(Value::Null));
    assert_eq!(
        registry.coerce(&Value::from("x"), "java.lang.CharSequence"),
        Some(Value::from("x"))
    );

    let user = Value::Object(Instance::new("com.acme.User"));
    assert_eq!(registry.coerce(&user, "com.acme.Named"), Some(user.clone()));
    assert_eq!(registry.coerce(&user, OBJECT), Some(user.clone()));
    assert_eq!(registry.coerce(&user, STRING), None);
}

#[test]
fn array_assignability() {
    let registry = TypeRegistry::with_builtins();
    assert!(registry.is_subtype("java.lang.String[]", "java.lang.Object[]"));
    assert!(registry.is_subtype("int[]", OBJECT));
    assert!(!registry.is_subtype("int[]", "long[]"));
    assert!(!registry.is_subtype("java.lang.Object[]", "java.lang.String[]"));

    let strings = Value::array(STRING, vec![Value::from("a")]);
    assert_eq!(
        registry.coerce(&strings, "java.lang.Object[]"),
        Some(strings.clone())
    );
}

#[test]
fn annotation_types_implement_annotation() {
    let registry = TypeRegistry::new().with_type(TypeDef::annotation_type("com.acme.Audited"));
    assert!(registry.is_subtype("com.acme.Audited", "java.lang.annotation.Annotation"));
}
