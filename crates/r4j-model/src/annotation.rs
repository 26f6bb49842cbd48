/// An annotation instance attached to a type or member.
///
/// Only explicitly given element values are stored here; defaults live on the
/// annotation type's [`crate::AttributeDef`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub type_name: String,
    pub elements: Vec<(String, ElementValue)>,
}

impl Annotation {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            elements: Vec::new(),
        }
    }

    /// Set an element value, replacing an earlier value with the same name.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ElementValue>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.elements.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.elements.push((name, value)),
        }
        self
    }

    pub fn element(&self, name: &str) -> Option<&ElementValue> {
        self.elements
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementValue {
    Const(ConstValue),
    Enum {
        type_name: String,
        const_name: String,
    },
    Class(String),
    Annotation(Box<Annotation>),
    Array(Vec<ElementValue>),
}

impl ElementValue {
    pub fn enum_constant(type_name: impl Into<String>, const_name: impl Into<String>) -> Self {
        ElementValue::Enum {
            type_name: type_name.into(),
            const_name: const_name.into(),
        }
    }

    pub fn strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ElementValue::Array(
            values
                .into_iter()
                .map(|value| ElementValue::Const(ConstValue::String(value.into())))
                .collect(),
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ElementValue::Const(ConstValue::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ElementValue::Const(ConstValue::Boolean(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ElementValue]> {
        match self {
            ElementValue::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_annotation(&self) -> Option<&Annotation> {
        match self {
            ElementValue::Annotation(annotation) => Some(annotation),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    String(String),
}

macro_rules! const_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ElementValue {
                fn from(value: $ty) -> Self {
                    ElementValue::Const(ConstValue::$variant(value.into()))
                }
            }
        )*
    };
}

const_value_from! {
    i8 => Byte,
    char => Char,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    bool => Boolean,
    String => String,
    &str => String,
}

impl From<Annotation> for ElementValue {
    fn from(value: Annotation) -> Self {
        ElementValue::Annotation(Box::new(value))
    }
}

impl From<Vec<ElementValue>> for ElementValue {
    fn from(values: Vec<ElementValue>) -> Self {
        ElementValue::Array(values)
    }
}
