mod support;

use pretty_assertions::assert_eq;
use r4j_model::{
    FieldDef, Instance, MethodDef, Modifiers, TargetError, TypeDef, TypeRegistry, Value, STRING,
};
use r4j_reflect::{FaultKind, FaultPhase, Reflector};

use support::{reflector, ENTITY, NAMED, USER};

#[test]
fn constructor_then_instance_method() -> anyhow::Result<()> {
    let user = reflector().class(USER);

    let alice = user.constructor(&[STRING]).invoke(&[Value::from("alice")]).into_result()?;
    assert_eq!(alice.class_name(), USER);
    assert_eq!(alice.get("name"), Some(Value::from("alice")));
    assert_eq!(alice.get("id"), Some(Value::Long(0)));
    assert_eq!(alice.get("age"), Some(Value::Int(0)));

    let name = user.method("getName", &[]).invoke(Some(&alice), &[]).into_result()?;
    assert_eq!(name, Value::from("alice"));

    user.method("setName", &[STRING])
        .invoke(Some(&alice), &[Value::from("bob")])
        .into_result()?;
    assert_eq!(user.field("name").get(Some(&alice)).into_value(), Some(Value::from("bob")));
    Ok(())
}

#[test]
fn target_faults_are_contained() {
    let user = reflector().class(USER);
    let target = Instance::new(USER);

    let outcome = user.method("fail", &[]).invoke(Some(&target), &[]);
    assert!(outcome.is_failure());
    assert!(outcome.value().is_none());
    let fault = outcome.into_fault().unwrap();
    assert_eq!(fault.kind, FaultKind::Raised);
    assert_eq!(fault.phase(), FaultPhase::Execution);
    assert_eq!(fault.target_error(), Some(&TargetError::illegal_state("boom")));
    assert_eq!(fault.signature, "com.acme.User#fail():void");
}

#[test]
fn panics_are_contained() {
    let user = reflector().class(USER);
    let target = Instance::new(USER);

    let fault = user
        .method("explode", &[])
        .invoke(Some(&target), &[])
        .into_fault()
        .unwrap();
    assert_eq!(fault.kind, FaultKind::Panicked);
    assert_eq!(fault.message, "exploded");
    assert!(fault.is_execution());
}

#[test]
fn static_members_ignore_the_target() {
    let user = reflector().class(USER);
    let twice = user.method("twice", &["int"]);

    assert_eq!(twice.invoke(None, &[Value::Int(21)]).into_value(), Some(Value::Int(42)));
    let someone = Instance::new(USER);
    assert_eq!(
        twice.invoke(Some(&someone), &[Value::Short(4)]).into_value(),
        Some(Value::Int(8))
    );

    let count = user.field("COUNT");
    assert_eq!(count.get(None).into_value(), Some(Value::Int(7)));
    assert!(count.set(None, 9).is_success());
    assert_eq!(count.get(None).into_value(), Some(Value::Int(9)));
}

#[test]
fn instance_members_need_a_matching_target() {
    let reflector = reflector();
    let user = reflector.class(USER);
    let get_name = user.method("getName", &[]);

    let fault = get_name.invoke(None, &[]).into_fault().unwrap();
    assert_eq!(fault.kind, FaultKind::MissingTarget);
    assert!(fault.is_validation());

    let stranger = Instance::new(NAMED);
    let fault = get_name.invoke(Some(&stranger), &[]).into_fault().unwrap();
    assert_eq!(fault.kind, FaultKind::TargetMismatch);

    let fault = user.field("name").get(None).into_fault().unwrap();
    assert_eq!(fault.kind, FaultKind::MissingTarget);
}

#[test]
fn argument_faults_are_validation_faults() {
    let user = reflector().class(USER);
    let twice = user.method("twice", &["int"]);

    let fault = twice.invoke(None, &[]).into_fault().unwrap();
    assert_eq!(fault.kind, FaultKind::ArgumentCount);
    assert_eq!(fault.phase(), FaultPhase::Validation);

    let fault = twice.invoke(None, &[Value::Long(1)]).into_fault().unwrap();
    assert_eq!(fault.kind, FaultKind::ArgumentType);
    assert_eq!(fault.message, "argument 0: cannot convert `long` to `int`");

    let fault = twice.invoke(None, &[Value::from("x")]).into_fault().unwrap();
    assert_eq!(fault.kind, FaultKind::ArgumentType);
}

#[test]
fn widening_and_boxing_apply_to_arguments() {
    let user = reflector().class(USER);
    let widen = user.method("widen", &["long"]);
    assert_eq!(
        widen.invoke(None, &[Value::Int(5)]).into_value(),
        Some(Value::Long(5))
    );
    assert_eq!(
        widen.invoke(None, &[Value::Char('A')]).into_value(),
        Some(Value::Long(65))
    );
}

#[test]
fn varargs_are_packed() {
    let user = reflector().class(USER);
    let join = user.method("join", &[STRING, "java.lang.String[]"]);

    let joined = join
        .invoke(None, &[Value::from("-"), Value::from("a"), Value::from("b")])
        .into_value();
    assert_eq!(joined, Some(Value::from("a-b")));

    let none = join.invoke(None, &[Value::from("-")]).into_value();
    assert_eq!(none, Some(Value::from("")));

    let array = Value::array(STRING, vec![Value::from("x"), Value::from("y")]);
    let passed = join.invoke(None, &[Value::from("+"), array]).into_value();
    assert_eq!(passed, Some(Value::from("x+y")));

    let fault = join
        .invoke(None, &[Value::from("-"), Value::Int(1)])
        .into_fault()
        .unwrap();
    assert_eq!(fault.kind, FaultKind::ArgumentType);
}

#[test]
fn final_fields_reject_writes() {
    let user = reflector().class(USER);
    let prefix = user.field("PREFIX");

    let fault = prefix.set(None, "other").into_fault().unwrap();
    assert_eq!(fault.kind, FaultKind::IllegalAccess);
    assert_eq!(prefix.get(None).into_value(), Some(Value::from("usr")));
}

#[test]
fn field_writes_are_type_checked() {
    let user = reflector().class(USER);
    let target = Instance::new(USER);
    let age = user.field("age");

    assert!(age.set(Some(&target), 41).is_success());
    assert_eq!(age.get(Some(&target)).into_value(), Some(Value::Int(41)));

    let fault = age.set(Some(&target), "old").into_fault().unwrap();
    assert_eq!(fault.kind, FaultKind::ArgumentType);
    assert!(user.field("name").set(Some(&target), Value::Null).is_success());
}

#[test]
fn instance_calls_dispatch_on_the_runtime_class() {
    let reflector = reflector();
    let alice = reflector
        .class(USER)
        .constructor(&[STRING])
        .invoke(&[Value::from("alice")])
        .into_value()
        .unwrap();

    let entity = reflector.class(ENTITY);
    let describe = entity.method("describe", &[]);
    assert!(describe.is_abstract());
    assert_eq!(
        describe.invoke(Some(&alice), &[]).into_value(),
        Some(Value::from("user:alice"))
    );

    let inherited = entity.method("kind", &[]);
    assert_eq!(
        inherited.invoke(Some(&alice), &[]).into_value(),
        Some(Value::from("entity"))
    );

    let detached = Instance::new(ENTITY);
    let fault = describe.invoke(Some(&detached), &[]).into_fault().unwrap();
    assert_eq!(fault.kind, FaultKind::IllegalAccess);
}

#[test]
fn abstract_and_interface_types_cannot_be_constructed() {
    let reflector = reflector();
    let fault = reflector
        .class(ENTITY)
        .constructor(&[])
        .invoke(&[])
        .into_fault()
        .unwrap();
    assert_eq!(fault.kind, FaultKind::Instantiation);
    assert!(fault.is_validation());
}

#[test]
fn absent_descriptors_fail_without_panicking() {
    let user = reflector().class(USER);

    let fault = user.method("nothing", &[]).invoke(None, &[]).into_fault().unwrap();
    assert_eq!(fault.kind, FaultKind::Absent);
    assert_eq!(fault.signature, "com.acme.User#nothing()");

    assert!(user.field("nothing").get(None).is_failure());
    assert!(user.field("nothing").set(None, 1).is_failure());
    assert!(user.constructor(&["long"]).invoke(&[]).is_failure());
}

fn secret(result: &'static str) -> MethodDef {
    MethodDef::new("secret", Vec::<&str>::new(), STRING)
        .with_modifiers(Modifiers::PRIVATE)
        .body(move |_, _| Ok(Value::from(result)))
}

#[test]
fn private_methods_do_not_dispatch_to_subclasses() {
    let reflector = Reflector::new(
        TypeRegistry::with_builtins()
            .with_type(
                TypeDef::class("p.Base")
                    .with_method(secret("base"))
                    .with_method(
                        MethodDef::new("shown", Vec::<&str>::new(), STRING)
                            .body(|_, _| Ok(Value::from("base"))),
                    ),
            )
            .with_type(
                TypeDef::class("p.Sub")
                    .extends("p.Base")
                    .with_method(secret("sub"))
                    .with_method(
                        MethodDef::new("shown", Vec::<&str>::new(), STRING)
                            .body(|_, _| Ok(Value::from("sub"))),
                    ),
            ),
    );
    let sub = Instance::new("p.Sub");
    let base = reflector.class("p.Base");

    assert_eq!(
        base.method("secret", &[]).invoke(Some(&sub), &[]).into_value(),
        Some(Value::from("base"))
    );
    assert_eq!(
        base.method("shown", &[]).invoke(Some(&sub), &[]).into_value(),
        Some(Value::from("sub"))
    );
    assert_eq!(
        reflector.class("p.Sub").method("secret", &[]).invoke(Some(&sub), &[]).into_value(),
        Some(Value::from("sub"))
    );
}

#[test]
fn shadowed_fields_keep_separate_values() {
    let reflector = Reflector::new(
        TypeRegistry::with_builtins()
            .with_type(TypeDef::class("p.Base").with_field(FieldDef::new("id", "int")))
            .with_type(
                TypeDef::class("p.Sub")
                    .extends("p.Base")
                    .with_field(FieldDef::new("id", STRING)),
            ),
    );
    let sub = reflector.registry().instantiate("p.Sub").unwrap();
    let base_id = reflector.class("p.Base").field("id");
    let sub_id = reflector.class("p.Sub").field("id");

    assert_eq!(base_id.get(Some(&sub)).into_value(), Some(Value::Int(0)));
    assert_eq!(sub_id.get(Some(&sub)).into_value(), Some(Value::Null));

    assert!(sub_id.set(Some(&sub), "x").is_success());
    assert!(base_id.set(Some(&sub), 5).is_success());
    assert_eq!(base_id.get(Some(&sub)).into_value(), Some(Value::Int(5)));
    assert_eq!(sub_id.get(Some(&sub)).into_value(), Some(Value::from("x")));
    assert_eq!(sub.get("id"), Some(Value::from("x")));
}
