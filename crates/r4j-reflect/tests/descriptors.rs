mod support;

use pretty_assertions::assert_eq;
use r4j_model::markers::Comment;
use r4j_model::{TypeKind, OBJECT, SERIALIZABLE, STRING};
use r4j_reflect::{
    AnnotatedDescriptor, Descriptor, ElementKey, ElementKind, MemberDescriptor, Reflector,
};

use support::{reflector, AUDITED, ENTITY, HIDDEN, MISSING, NAMED, USER};

#[test]
fn missing_method_is_an_absent_sentinel() {
    let user = reflector().class(USER);
    let missing = user.method("noSuchMethod", &[]);

    assert!(!missing.is_present());
    assert!(missing.element().is_none());
    assert_eq!(missing.signature(), "com.acme.User#noSuchMethod()");
    assert!(missing.annotations().is_empty());
    assert_eq!(missing.modifiers().bits(), 0);
    assert!(!missing.is_package_private());
    assert!(!missing.declaring_class().is_present());
}

#[test]
fn missing_class_has_empty_listings() {
    let reflector = reflector();
    let ghost = reflector.class("com.acme.Ghost");
    assert!(!ghost.is_present());
    assert_eq!(ghost.simple_name(), "Ghost");
    assert_eq!(ghost.package_name(), "com.acme");
    assert!(ghost.fields().is_empty());
    assert!(ghost.methods().is_empty());
    assert!(ghost.constructors().is_empty());
    assert!(ghost.interfaces().is_empty());
    assert!(!ghost.field("name").is_present());
    assert!(!ghost.superclass().is_present());
}

#[test]
fn class_metadata_follows_the_definition() {
    let reflector = reflector();
    let user = reflector.class(USER);
    assert_eq!(user.kind(), Some(TypeKind::Class));
    assert_eq!(user.simple_name(), "User");
    assert!(user.is_public());
    assert!(!user.is_abstract());
    assert!(!user.is_interface());

    let entity = user.superclass();
    assert_eq!(entity.name(), ENTITY);
    assert!(entity.is_abstract());
    assert_eq!(entity.superclass().name(), OBJECT);
    assert!(entity.superclass().is_present());

    let interfaces: Vec<String> = user
        .interfaces()
        .iter()
        .map(|class| class.name().to_string())
        .collect();
    assert_eq!(interfaces, vec![SERIALIZABLE.to_string(), NAMED.to_string()]);
    assert!(reflector.class(NAMED).is_interface());
    assert!(reflector.class(AUDITED).is_annotation());
    assert!(reflector.class(AUDITED).is_interface());
    assert!(user.is_subtype_of(SERIALIZABLE));
}

#[test]
fn bulk_listings_skip_ignored_elements() {
    let reflector = reflector();
    let user = reflector.class(USER);

    let fields: Vec<String> = user.fields().iter().map(|f| f.name().to_string()).collect();
    assert_eq!(
        fields,
        vec!["name", "nickname", "title", "age", "COUNT", "PREFIX"]
    );
    assert!(user.methods().iter().all(|m| m.name() != "reset"));
    assert_eq!(user.constructors().len(), 2);
    assert!(!user.constructor(&["int"]).is_present());

    assert!(!reflector.class(HIDDEN).is_present());
    assert!(reflector.classes().iter().all(|class| class.name() != HIDDEN));
    assert!(reflector.classes().iter().any(|class| class.name() == USER));
}

#[test]
fn member_descriptors_expose_their_shape() {
    let user = reflector().class(USER);

    let join = user.method("join", &[STRING, "java.lang.String..."]);
    assert!(join.is_present());
    assert!(join.is_varargs());
    assert!(join.is_static());
    assert_eq!(join.parameter_types(), [STRING, "java.lang.String[]"]);
    assert_eq!(join.parameter_count(), 2);
    assert_eq!(join.return_type(), Some(STRING));
    assert_eq!(
        join.signature(),
        "com.acme.User#join(java.lang.String, java.lang.String[]):java.lang.String"
    );

    let prefix = user.field("PREFIX");
    assert!(prefix.is_static() && prefix.is_final() && prefix.is_public());
    assert_eq!(prefix.type_name(), Some(STRING));

    let name = user.field("name");
    assert!(name.is_private());
    assert_eq!(name.declaring_class().name(), USER);

    let ctor = user.constructor(&[STRING]);
    assert!(ctor.is_present());
    assert_eq!(ctor.signature(), "com.acme.User(java.lang.String)");
    assert_eq!(ctor.name(), "<init>");

    let entity = user.superclass();
    assert!(entity.method("describe", &[]).is_abstract());
    assert!(entity.constructor(&[]).is_protected());
}

#[test]
fn lookups_by_signature() {
    let reflector = reflector();
    let user = reflector.class(USER);

    let typed = user.field_by_signature("com.acme.User#age:int").unwrap();
    assert!(typed.is_present());
    let wrong_type = user.field_by_signature("com.acme.User#age:long").unwrap();
    assert!(!wrong_type.is_present());

    let by_return = user
        .method_by_signature("com.acme.User#twice(int):int")
        .unwrap();
    assert!(by_return.is_present());
    let other_owner = user
        .method_by_signature("com.acme.Entity#kind():java.lang.String")
        .unwrap();
    assert!(!other_owner.is_present());

    let ctor = user
        .constructor_by_signature("com.acme.User(java.lang.String)")
        .unwrap();
    assert!(ctor.is_present());

    let err = user.method_by_signature("com.acme.User#age:int").unwrap_err();
    assert_eq!(err.signature, "com.acme.User#age:int");
    assert!(reflector.class_by_signature("@com.acme.Audited").is_err());
    assert!(reflector.lookup("com.acme.User#").is_err());
}

#[test]
fn describe_dispatches_on_key_kind() {
    let reflector = reflector();

    let class = reflector.describe(&ElementKey::class(USER));
    assert_eq!(class.kind(), ElementKind::Class);
    assert!(class.into_class().is_some_and(|class| class.is_present()));

    let annotation = reflector.describe(&ElementKey::annotation(AUDITED));
    assert_eq!(annotation.kind(), ElementKind::Annotation);
    assert!(annotation.is_present());

    let not_annotation = reflector.annotation_type("@com.acme.User").unwrap();
    assert!(!not_annotation.is_present());

    let missing_owner = reflector.describe(&ElementKey::field("com.acme.Ghost", "x", None));
    assert_eq!(missing_owner.kind(), ElementKind::Field);
    assert!(!missing_owner.is_present());

    let ctor = reflector.lookup("com.acme.User()").unwrap();
    assert!(ctor.into_constructor().is_some_and(|ctor| ctor.is_present()));
}

#[test]
fn unregistered_annotations_are_invisible() {
    let user = reflector().class(USER);

    let names: Vec<&str> = user
        .annotations()
        .iter()
        .map(|annotation| annotation.type_name())
        .collect();
    assert_eq!(
        names,
        vec!["r4j.annotation.Alias", AUDITED, "r4j.annotation.Comment"]
    );

    let missing = user.annotation(&format!("@{MISSING}")).unwrap();
    assert!(!missing.is_present());
    assert!(missing.attributes().is_empty());
    assert!(!missing.annotation_type().is_present());

    assert!(user.has_annotation("@com.acme.Audited").unwrap());
    assert!(user.has_annotation_of::<Comment>());
    assert!(user.annotation("com.acme.Audited").is_err());
}

#[test]
fn comment_annotation_is_plain_metadata() {
    let user = reflector().class(USER);
    let age = user.field("age");
    assert!(age.is_present());

    let comment = age.annotation_of::<Comment>();
    assert_eq!(
        comment.attribute("value").and_then(|value| value.as_str()),
        Some("in years")
    );
    assert_eq!(
        comment.attribute("category").and_then(|value| value.as_str()),
        Some("")
    );
}

#[test]
fn descriptors_are_independent_values() {
    let reflector = Reflector::new(support::registry());
    let first = reflector.class(USER);
    let second = first.clone();
    assert_eq!(first.annotations().len(), second.annotations().len());
    assert_eq!(first.annotations(), second.annotations());
    drop(first);
    assert!(second.is_present());
}

#[test]
fn listed_signatures_parse_back_to_their_keys() {
    let reflector = reflector();
    for name in [USER, ENTITY, NAMED] {
        let class = reflector.class(name);
        let mut listed = vec![(class.signature(), class.key().clone())];
        listed.extend(class.fields().iter().map(|d| (d.signature(), d.key().clone())));
        listed.extend(class.methods().iter().map(|d| (d.signature(), d.key().clone())));
        listed.extend(class.constructors().iter().map(|d| (d.signature(), d.key().clone())));
        assert!(listed.len() > 1, "{name} lists no members");

        for (signature, key) in listed {
            assert_eq!(r4j_signature::parse(&signature).as_ref(), Ok(&key), "{signature}");
        }
    }
}
