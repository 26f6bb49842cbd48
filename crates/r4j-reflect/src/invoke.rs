//! Fault containment for reflective access.
//!
//! Every entry point checks what it can before touching target code
//! (receiver, access, argument shape) and reports problems as validation
//! faults. Target code then runs under `catch_unwind`, so both returned
//! [`TargetError`]s and panics come back as execution faults.
use std::any::Any;
use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};

use r4j_model::{
    ConstructorDef, FieldDef, MethodBody, MethodDef, ObjectRef, TargetError, TypeDef, TypeKind,
    TypeRegistry, Value,
};
use r4j_signature::ElementKey;

use crate::context::Context;
use crate::fault::{Fault, FaultKind, FaultPhase};
use crate::outcome::InvocationOutcome;

type Checked<T> = Result<T, Fault>;

/// Outcome of using a descriptor that matched nothing. The miss was
/// already logged by the lookup, so this is not logged again.
pub(crate) fn absent<T>(key: &ElementKey) -> InvocationOutcome<T> {
    InvocationOutcome::failure(Fault::new(
        FaultKind::Absent,
        key.to_signature(),
        format!("no {} matches this signature", key.kind()),
    ))
}

pub(crate) fn call_method(
    ctx: &Context,
    key: &ElementKey,
    owner: &TypeDef,
    method: &MethodDef,
    target: Option<&ObjectRef>,
    args: &[Value],
) -> InvocationOutcome<Value> {
    contain(ctx, try_call_method(ctx, key, owner, method, target, args))
}

fn try_call_method(
    ctx: &Context,
    key: &ElementKey,
    owner: &TypeDef,
    method: &MethodDef,
    target: Option<&ObjectRef>,
    args: &[Value],
) -> Checked<Value> {
    let signature = key.to_signature();
    let receiver = if method.is_static() {
        None
    } else {
        Some(check_receiver(&ctx.registry, &signature, owner, target)?)
    };

    // Private methods are never overridden.
    let body = match receiver {
        Some(receiver) if !method.modifiers.is_private() => {
            dispatch(&ctx.registry, receiver.class_name(), owner, method)
        }
        _ => method.body.clone(),
    };
    let Some(body) = body else {
        return Err(Fault::new(
            FaultKind::IllegalAccess,
            signature,
            "cannot invoke an abstract method",
        ));
    };

    let args = prepare_arguments(
        &ctx.registry,
        &signature,
        &method.params,
        method.is_varargs(),
        args,
    )?;
    run_contained(&signature, || body(receiver, &args))
}

pub(crate) fn construct(
    ctx: &Context,
    key: &ElementKey,
    owner: &TypeDef,
    constructor: &ConstructorDef,
    args: &[Value],
) -> InvocationOutcome<ObjectRef> {
    contain(ctx, try_construct(ctx, key, owner, constructor, args))
}

fn try_construct(
    ctx: &Context,
    key: &ElementKey,
    owner: &TypeDef,
    constructor: &ConstructorDef,
    args: &[Value],
) -> Checked<ObjectRef> {
    let signature = key.to_signature();
    let refusal = match owner.kind {
        TypeKind::Interface => Some("cannot instantiate an interface"),
        TypeKind::Annotation => Some("cannot instantiate an annotation type"),
        TypeKind::Enum => Some("cannot reflectively create enum constants"),
        TypeKind::Class | TypeKind::Record if owner.modifiers.is_abstract() => {
            Some("cannot instantiate an abstract class")
        }
        TypeKind::Class | TypeKind::Record => None,
    };
    if let Some(message) = refusal {
        return Err(Fault::new(FaultKind::Instantiation, signature, message));
    }

    let args = prepare_arguments(
        &ctx.registry,
        &signature,
        &constructor.params,
        constructor.is_varargs(),
        args,
    )?;
    let Some(object) = ctx.registry.instantiate(&owner.name) else {
        return Err(Fault::new(
            FaultKind::Instantiation,
            signature,
            format!("`{}` is not registered", owner.name),
        ));
    };

    match &constructor.body {
        Some(body) => run_contained(&signature, || body(&object, &args)).map(|()| object),
        None => Ok(object),
    }
}

pub(crate) fn get_field(
    ctx: &Context,
    key: &ElementKey,
    owner: &TypeDef,
    field: &FieldDef,
    target: Option<&ObjectRef>,
) -> InvocationOutcome<Value> {
    contain(ctx, try_get_field(ctx, key, owner, field, target))
}

fn try_get_field(
    ctx: &Context,
    key: &ElementKey,
    owner: &TypeDef,
    field: &FieldDef,
    target: Option<&ObjectRef>,
) -> Checked<Value> {
    if field.is_static() {
        return Ok(field.static_value());
    }
    let signature = key.to_signature();
    let receiver = check_receiver(&ctx.registry, &signature, owner, target)?;
    // Instances built without a layout only carry the slots written so far.
    Ok(receiver
        .get_declared(&owner.name, &field.name)
        .or_else(|| receiver.get(&field.name))
        .unwrap_or_else(|| Value::default_for(&field.type_name)))
}

pub(crate) fn set_field(
    ctx: &Context,
    key: &ElementKey,
    owner: &TypeDef,
    field: &FieldDef,
    target: Option<&ObjectRef>,
    value: Value,
) -> InvocationOutcome<()> {
    contain(ctx, try_set_field(ctx, key, owner, field, target, value))
}

fn try_set_field(
    ctx: &Context,
    key: &ElementKey,
    owner: &TypeDef,
    field: &FieldDef,
    target: Option<&ObjectRef>,
    value: Value,
) -> Checked<()> {
    let signature = key.to_signature();
    if field.modifiers.is_final() {
        return Err(Fault::new(
            FaultKind::IllegalAccess,
            signature,
            "cannot write a final field",
        ));
    }
    let receiver = if field.is_static() {
        None
    } else {
        Some(check_receiver(&ctx.registry, &signature, owner, target)?)
    };
    let Some(value) = ctx.registry.coerce(&value, &field.type_name) else {
        return Err(Fault::new(
            FaultKind::ArgumentType,
            signature,
            format!(
                "cannot assign `{}` to a field of type `{}`",
                value.type_name(),
                field.type_name
            ),
        ));
    };

    match receiver {
        Some(receiver) => {
            receiver.set_declared(&owner.name, &field.name, value);
        }
        None => field.set_static_value(value),
    }
    Ok(())
}

fn check_receiver<'t>(
    registry: &TypeRegistry,
    signature: &str,
    owner: &TypeDef,
    target: Option<&'t ObjectRef>,
) -> Checked<&'t ObjectRef> {
    let Some(target) = target else {
        return Err(Fault::new(
            FaultKind::MissingTarget,
            signature,
            "instance member accessed without a target",
        ));
    };
    if !registry.is_subtype(target.class_name(), &owner.name) {
        return Err(Fault::new(
            FaultKind::TargetMismatch,
            signature,
            format!(
                "target of type `{}` is not an instance of `{}`",
                target.class_name(),
                owner.name
            ),
        ));
    }
    Ok(target)
}

/// The body that runs for `method` on an instance of `runtime_class`: the
/// nearest non-private override along the superclass chain, else the
/// declared body.
fn dispatch(
    registry: &TypeRegistry,
    runtime_class: &str,
    owner: &TypeDef,
    method: &MethodDef,
) -> Option<MethodBody> {
    let mut seen = HashSet::new();
    let mut next = Some(runtime_class.to_string());
    while let Some(name) = next {
        if name == owner.name || !seen.insert(name.clone()) {
            break;
        }
        let Some(def) = registry.get(&name) else {
            break;
        };
        let body = def
            .methods
            .iter()
            .filter(|candidate| !candidate.is_static() && !candidate.modifiers.is_private())
            .find(|candidate| candidate.name == method.name && candidate.params == method.params)
            .and_then(|candidate| candidate.body.clone());
        if body.is_some() {
            return body;
        }
        next = def.super_class.clone();
    }
    method.body.clone()
}

/// Check argument count and types against `params`, converting each value
/// to its parameter type. Trailing arguments of a varargs call are packed
/// into the array parameter unless they already are that array.
fn prepare_arguments(
    registry: &TypeRegistry,
    signature: &str,
    params: &[String],
    varargs: bool,
    args: &[Value],
) -> Checked<Vec<Value>> {
    let count_fault = |expected: String| {
        Fault::new(
            FaultKind::ArgumentCount,
            signature,
            format!("expected {expected} arguments, got {}", args.len()),
        )
    };

    let (fixed, rest) = match params.split_last() {
        Some((array_type, fixed)) if varargs => (fixed, Some(array_type)),
        _ => (params, None),
    };
    if args.len() < fixed.len() || (rest.is_none() && args.len() != fixed.len()) {
        let expected = match rest {
            Some(_) => format!("at least {}", fixed.len()),
            None => fixed.len().to_string(),
        };
        return Err(count_fault(expected));
    }

    let mut prepared = Vec::with_capacity(params.len());
    for (idx, (arg, param)) in args.iter().zip(fixed).enumerate() {
        prepared.push(coerce_argument(registry, signature, idx, arg, param)?);
    }

    if let Some(array_type) = rest {
        let trailing = &args[fixed.len()..];
        if let [single] = trailing {
            if let Some(array) = registry.coerce(single, array_type) {
                prepared.push(array);
                return Ok(prepared);
            }
        }
        let component = array_type.strip_suffix("[]").unwrap_or(array_type);
        let mut items = Vec::with_capacity(trailing.len());
        for (offset, arg) in trailing.iter().enumerate() {
            items.push(coerce_argument(
                registry,
                signature,
                fixed.len() + offset,
                arg,
                component,
            )?);
        }
        prepared.push(Value::array(component, items));
    }
    Ok(prepared)
}

fn coerce_argument(
    registry: &TypeRegistry,
    signature: &str,
    idx: usize,
    arg: &Value,
    param: &str,
) -> Checked<Value> {
    registry.coerce(arg, param).ok_or_else(|| {
        Fault::new(
            FaultKind::ArgumentType,
            signature,
            format!(
                "argument {idx}: cannot convert `{}` to `{param}`",
                arg.type_name()
            ),
        )
    })
}

fn run_contained<T>(signature: &str, f: impl FnOnce() -> Result<T, TargetError>) -> Checked<T> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(Fault::raised(signature, err)),
        Err(payload) => {
            let message = panic_payload_to_string(payload.as_ref())
                .unwrap_or_else(|| "target code panicked".to_string());
            Err(Fault::new(FaultKind::Panicked, signature, message))
        }
    }
}

fn panic_payload_to_string(payload: &(dyn Any + Send)) -> Option<String> {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return Some((*message).to_string());
    }
    payload.downcast_ref::<String>().cloned()
}

fn contain<T>(ctx: &Context, result: Checked<T>) -> InvocationOutcome<T> {
    if let Err(fault) = &result {
        if ctx.config.invocation.log_faults {
            match fault.phase() {
                FaultPhase::Validation => tracing::debug!(
                    target: "r4j.invoke",
                    signature = %fault.signature,
                    kind = %fault.kind,
                    message = %fault.message,
                    "invocation rejected"
                ),
                FaultPhase::Execution => tracing::warn!(
                    target: "r4j.invoke",
                    signature = %fault.signature,
                    kind = %fault.kind,
                    message = %fault.message,
                    "target code failed"
                ),
            }
        }
    }
    InvocationOutcome::from(result)
}
