use crate::error::{InvalidSignature, Result, SignatureErrorKind};
use crate::key::{normalize_param, ElementKey, ElementKind};

/// Parse any of the five signature forms into an [`ElementKey`].
pub fn parse(signature: &str) -> Result<ElementKey> {
    parse_inner(signature).map_err(|kind| InvalidSignature::new(signature, kind))
}

/// Parse a signature and require it to be of the given kind.
pub fn parse_as(signature: &str, expected: ElementKind) -> Result<ElementKey> {
    let key = parse(signature)?;
    if key.kind() != expected {
        return Err(InvalidSignature::new(
            signature,
            SignatureErrorKind::KindMismatch {
                expected,
                found: key.kind(),
            },
        ));
    }
    Ok(key)
}

/// Parse an annotation reference. The `@` prefix is mandatory; a bare dotted
/// name is rejected rather than treated as a class lookup.
pub fn parse_annotation(signature: &str) -> Result<ElementKey> {
    if !signature.starts_with('@') {
        return Err(InvalidSignature::new(
            signature,
            SignatureErrorKind::MissingAnnotationPrefix,
        ));
    }
    parse_as(signature, ElementKind::Annotation)
}

/// Whether `text` is a dot-separated sequence of identifiers.
pub fn is_qualified_name(text: &str) -> bool {
    !text.is_empty() && text.split('.').all(is_identifier)
}

type Parsed<T> = std::result::Result<T, SignatureErrorKind>;

fn parse_inner(signature: &str) -> Parsed<ElementKey> {
    if signature.is_empty() {
        return Err(SignatureErrorKind::Empty);
    }

    if let Some(name) = signature.strip_prefix('@') {
        return Ok(ElementKey::annotation(qualified_name(name)?));
    }

    if let Some((owner, member)) = signature.split_once('#') {
        let owner = qualified_name(owner)?;
        return member_key(owner, member);
    }

    if let Some(open) = signature.find('(') {
        let owner = qualified_name(&signature[..open])?;
        let (params, rest) = parameter_list(&signature[open..])?;
        if !rest.is_empty() {
            return Err(SignatureErrorKind::TrailingInput(rest.to_string()));
        }
        return Ok(ElementKey::constructor(owner, params));
    }

    Ok(ElementKey::class(qualified_name(signature)?))
}

fn member_key(owner: &str, member: &str) -> Parsed<ElementKey> {
    if let Some(open) = member.find('(') {
        let name = member_name(&member[..open])?;
        let (params, rest) = parameter_list(&member[open..])?;
        let return_type = match rest {
            "" => None,
            rest => match rest.strip_prefix(':') {
                Some(ty) => Some(type_name(ty)?),
                None => return Err(SignatureErrorKind::TrailingInput(rest.to_string())),
            },
        };
        return Ok(ElementKey::method(owner, name, params, return_type));
    }

    let (name, field_type) = match member.split_once(':') {
        Some((name, ty)) => (name, Some(type_name(ty)?)),
        None => (member, None),
    };
    Ok(ElementKey::field(owner, member_name(name)?, field_type))
}

/// Split `(a, b, c)rest` into normalized parameter types and `rest`.
fn parameter_list(input: &str) -> Parsed<(Vec<String>, &str)> {
    debug_assert!(input.starts_with('('));
    let close = input.find(')').ok_or(SignatureErrorKind::UnbalancedParens)?;
    let inner = &input[1..close];
    let rest = &input[close + 1..];
    if inner.contains('(') || rest.contains('(') || rest.contains(')') {
        return Err(SignatureErrorKind::UnbalancedParens);
    }

    if inner.trim().is_empty() {
        return Ok((Vec::new(), rest));
    }

    let entries: Vec<&str> = inner.split(',').map(str::trim).collect();
    let last = entries.len() - 1;
    let mut params = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        if entry.is_empty() {
            return Err(SignatureErrorKind::EmptyParameter);
        }
        match entry.strip_suffix("...") {
            Some(_) if idx != last => return Err(SignatureErrorKind::MisplacedVarargs),
            Some(component) => {
                type_name(component)?;
                params.push(normalize_param(entry));
            }
            None => params.push(type_name(entry)?.to_string()),
        }
    }
    Ok((params, rest))
}

fn qualified_name(text: &str) -> Parsed<&str> {
    if is_qualified_name(text) {
        Ok(text)
    } else {
        Err(SignatureErrorKind::InvalidQualifiedName(text.to_string()))
    }
}

fn member_name(text: &str) -> Parsed<&str> {
    if is_identifier(text) {
        Ok(text)
    } else {
        Err(SignatureErrorKind::InvalidMemberName(text.to_string()))
    }
}

/// A qualified name followed by any number of `[]` pairs.
fn type_name(text: &str) -> Parsed<&str> {
    let mut base = text;
    while let Some(component) = base.strip_suffix("[]") {
        base = component;
    }
    if is_qualified_name(base) {
        Ok(text)
    } else {
        Err(SignatureErrorKind::InvalidTypeName(text.to_string()))
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if is_identifier_char(first) && !first.is_ascii_digit() => {
            chars.all(is_identifier_char)
        }
        _ => false,
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
