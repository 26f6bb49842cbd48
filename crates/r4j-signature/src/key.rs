use std::fmt;

/// Member name used for constructor keys.
pub const CONSTRUCTOR_NAME: &str = "<init>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Class,
    Field,
    Method,
    Constructor,
    Annotation,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Class => "class",
            ElementKind::Field => "field",
            ElementKind::Method => "method",
            ElementKind::Constructor => "constructor",
            ElementKind::Annotation => "annotation",
        }
    }

    pub fn is_member(self) -> bool {
        matches!(
            self,
            ElementKind::Field | ElementKind::Method | ElementKind::Constructor
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical identity of a class, member or annotation reference.
///
/// Equality is structural. Keys either come out of [`crate::parse`] or are
/// built for members that already exist through the kind constructors below;
/// both paths normalize varargs the same way, so the [`fmt::Display`] form of
/// any key parses back to an equal key.
///
/// For type-level keys (`Class`, `Annotation`) the owner and the name are both
/// the fully-qualified type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementKey {
    kind: ElementKind,
    owner: String,
    name: String,
    params: Vec<String>,
    value_type: Option<String>,
}

impl ElementKey {
    pub fn class(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: ElementKind::Class,
            owner: name.clone(),
            name,
            params: Vec::new(),
            value_type: None,
        }
    }

    pub fn annotation(name: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Annotation,
            ..Self::class(name)
        }
    }

    pub fn field(
        owner: impl Into<String>,
        name: impl Into<String>,
        type_name: Option<&str>,
    ) -> Self {
        Self {
            kind: ElementKind::Field,
            owner: owner.into(),
            name: name.into(),
            params: Vec::new(),
            value_type: type_name.map(str::to_string),
        }
    }

    pub fn method<I, S>(
        owner: impl Into<String>,
        name: impl Into<String>,
        params: I,
        return_type: Option<&str>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            kind: ElementKind::Method,
            owner: owner.into(),
            name: name.into(),
            params: normalize_params(params),
            value_type: return_type.map(str::to_string),
        }
    }

    pub fn constructor<I, S>(owner: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            kind: ElementKind::Constructor,
            owner: owner.into(),
            name: CONSTRUCTOR_NAME.to_string(),
            params: normalize_params(params),
            value_type: None,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Fully-qualified name of the owning type (or of the type itself).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter type names, in declaration order. Empty for fields and types.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Field type or method return type, when the signature names one.
    pub fn value_type(&self) -> Option<&str> {
        self.value_type.as_deref()
    }

    pub fn to_signature(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ElementKind::Class => f.write_str(&self.owner),
            ElementKind::Annotation => write!(f, "@{}", self.owner),
            ElementKind::Field => {
                write!(f, "{}#{}", self.owner, self.name)?;
                if let Some(ty) = &self.value_type {
                    write!(f, ":{ty}")?;
                }
                Ok(())
            }
            ElementKind::Method => {
                write!(f, "{}#{}(", self.owner, self.name)?;
                write_params(f, &self.params)?;
                f.write_str(")")?;
                if let Some(ty) = &self.value_type {
                    write!(f, ":{ty}")?;
                }
                Ok(())
            }
            ElementKind::Constructor => {
                write!(f, "{}(", self.owner)?;
                write_params(f, &self.params)?;
                f.write_str(")")
            }
        }
    }
}

fn write_params(f: &mut fmt::Formatter<'_>, params: &[String]) -> fmt::Result {
    for (idx, param) in params.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        f.write_str(param)?;
    }
    Ok(())
}

/// Varargs are arrays in the type system: `T...` becomes `T[]`.
pub(crate) fn normalize_param(param: &str) -> String {
    match param.strip_suffix("...") {
        Some(component) => format!("{component}[]"),
        None => param.to_string(),
    }
}

fn normalize_params<I, S>(params: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    params
        .into_iter()
        .map(|param| normalize_param(param.as_ref().trim()))
        .collect()
}
