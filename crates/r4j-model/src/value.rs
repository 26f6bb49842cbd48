use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::builtins::STRING;

/// The eight primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Char,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl Primitive {
    pub const ALL: [Primitive; 8] = [
        Primitive::Boolean,
        Primitive::Char,
        Primitive::Byte,
        Primitive::Short,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
    ];

    pub fn from_name(name: &str) -> Option<Primitive> {
        Some(match name {
            "boolean" => Primitive::Boolean,
            "char" => Primitive::Char,
            "byte" => Primitive::Byte,
            "short" => Primitive::Short,
            "int" => Primitive::Int,
            "long" => Primitive::Long,
            "float" => Primitive::Float,
            "double" => Primitive::Double,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Char => "char",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
        }
    }

    pub fn boxed_name(self) -> &'static str {
        match self {
            Primitive::Boolean => "java.lang.Boolean",
            Primitive::Char => "java.lang.Character",
            Primitive::Byte => "java.lang.Byte",
            Primitive::Short => "java.lang.Short",
            Primitive::Int => "java.lang.Integer",
            Primitive::Long => "java.lang.Long",
            Primitive::Float => "java.lang.Float",
            Primitive::Double => "java.lang.Double",
        }
    }

    pub fn from_boxed_name(name: &str) -> Option<Primitive> {
        Primitive::ALL
            .into_iter()
            .find(|primitive| primitive.boxed_name() == name)
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, Primitive::Boolean | Primitive::Char)
    }

    /// Widening primitive conversion (JLS 5.1.2), identity included.
    pub fn widens_to(self, target: Primitive) -> bool {
        use Primitive::*;
        if self == target {
            return true;
        }
        match self {
            Byte => matches!(target, Short | Int | Long | Float | Double),
            Short | Char => matches!(target, Int | Long | Float | Double),
            Int => matches!(target, Long | Float | Double),
            Long => matches!(target, Float | Double),
            Float => matches!(target, Double),
            Boolean | Double => false,
        }
    }
}

/// A runtime object: a class name plus field slots keyed by declaring class,
/// so a subclass field never overwrites a same-named superclass field.
#[derive(Debug)]
pub struct Instance {
    class_name: String,
    slots: RwLock<IndexMap<(String, String), Value>>,
}

/// Shared handle to an [`Instance`]; identity is pointer identity.
pub type ObjectRef = Arc<Instance>;

impl Instance {
    pub fn new(class_name: impl Into<String>) -> ObjectRef {
        Self::with_fields(class_name, IndexMap::new())
    }

    /// An instance whose slots are all declared by its own class.
    pub fn with_fields(class_name: impl Into<String>, fields: IndexMap<String, Value>) -> ObjectRef {
        let class_name = class_name.into();
        let slots = fields
            .into_iter()
            .map(|(field, value)| ((class_name.clone(), field), value))
            .collect();
        Self::with_slots(class_name, slots)
    }

    /// An instance with explicit `(declaring class, field)` slots, listed
    /// from the root superclass down.
    pub fn with_slots(
        class_name: impl Into<String>,
        slots: IndexMap<(String, String), Value>,
    ) -> ObjectRef {
        Arc::new(Instance {
            class_name: class_name.into(),
            slots: RwLock::new(slots),
        })
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Read `field` as code in the instance's own class would: the most
    /// derived declaration of that name wins.
    pub fn get(&self, field: &str) -> Option<Value> {
        let slots = self.slots.read();
        slots
            .iter()
            .rev()
            .find(|((_, name), _)| name == field)
            .map(|(_, value)| value.clone())
    }

    /// Store `value` in the most derived slot named `field`, creating one on
    /// the instance's own class if none exists. Returns the previous value.
    pub fn set(&self, field: &str, value: Value) -> Option<Value> {
        let mut slots = self.slots.write();
        let index = slots.iter().rposition(|((_, name), _)| name == field);
        match index.and_then(|index| slots.get_index_mut(index)) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => slots.insert((self.class_name.clone(), field.to_string()), value),
        }
    }

    /// Read the slot `field` declared by `owner`.
    pub fn get_declared(&self, owner: &str, field: &str) -> Option<Value> {
        self.slots
            .read()
            .get(&(owner.to_string(), field.to_string()))
            .cloned()
    }

    /// Store `value` in the slot `field` declared by `owner`.
    pub fn set_declared(&self, owner: &str, field: &str, value: Value) -> Option<Value> {
        self.slots
            .write()
            .insert((owner.to_string(), field.to_string()), value)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.slots.read().keys().any(|(_, name)| name == field)
    }

    /// Slot names in layout order; a shadowed name appears once per
    /// declaring class.
    pub fn field_names(&self) -> Vec<String> {
        self.slots.read().keys().map(|(_, name)| name.clone()).collect()
    }
}

#[derive(Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Object(ObjectRef),
    Array { component: String, items: Vec<Value> },
}

impl Value {
    /// The zero value a field or array slot of `type_name` starts with.
    pub fn default_for(type_name: &str) -> Value {
        match Primitive::from_name(type_name) {
            Some(Primitive::Boolean) => Value::Boolean(false),
            Some(Primitive::Char) => Value::Char('\0'),
            Some(Primitive::Byte) => Value::Byte(0),
            Some(Primitive::Short) => Value::Short(0),
            Some(Primitive::Int) => Value::Int(0),
            Some(Primitive::Long) => Value::Long(0),
            Some(Primitive::Float) => Value::Float(0.0),
            Some(Primitive::Double) => Value::Double(0.0),
            None => Value::Null,
        }
    }

    pub fn array(component: impl Into<String>, items: Vec<Value>) -> Value {
        Value::Array {
            component: component.into(),
            items,
        }
    }

    /// Runtime type name; `null` for [`Value::Null`].
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::String(_) => STRING.to_string(),
            Value::Object(object) => object.class_name().to_string(),
            Value::Array { component, .. } => format!("{component}[]"),
            other => other
                .primitive()
                .map(|primitive| primitive.name().to_string())
                .unwrap_or_default(),
        }
    }

    pub fn primitive(&self) -> Option<Primitive> {
        Some(match self {
            Value::Boolean(_) => Primitive::Boolean,
            Value::Char(_) => Primitive::Char,
            Value::Byte(_) => Primitive::Byte,
            Value::Short(_) => Primitive::Short,
            Value::Int(_) => Primitive::Int,
            Value::Long(_) => Primitive::Long,
            Value::Float(_) => Primitive::Float,
            Value::Double(_) => Primitive::Double,
            _ => return None,
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Widen a primitive value to `target`; `None` when the conversion would
    /// narrow or the value is not a primitive.
    pub fn widen(&self, target: Primitive) -> Option<Value> {
        let source = self.primitive()?;
        if !source.widens_to(target) {
            return None;
        }
        let widened = match (self, target) {
            (value, _) if source == target => value.clone(),
            (Value::Char(c), _) => Value::Int(*c as i32).widen(target)?,
            (Value::Byte(v), _) => Value::Short(i16::from(*v)).widen(target)?,
            (Value::Short(v), _) => Value::Int(i32::from(*v)).widen(target)?,
            (Value::Int(v), Primitive::Long) => Value::Long(i64::from(*v)),
            (Value::Int(v), Primitive::Float) => Value::Float(*v as f32),
            (Value::Int(v), Primitive::Double) => Value::Double(f64::from(*v)),
            (Value::Long(v), Primitive::Float) => Value::Float(*v as f32),
            (Value::Long(v), Primitive::Double) => Value::Double(*v as f64),
            (Value::Float(v), Primitive::Double) => Value::Double(f64::from(*v)),
            _ => return None,
        };
        Some(widened)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array { items, .. } => Some(items),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (
                Value::Array {
                    component: ca,
                    items: ia,
                },
                Value::Array {
                    component: cb,
                    items: ib,
                },
            ) => ca == cb && ia == ib,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Boolean(v) => f.debug_tuple("Boolean").field(v).finish(),
            Value::Char(v) => f.debug_tuple("Char").field(v).finish(),
            Value::Byte(v) => f.debug_tuple("Byte").field(v).finish(),
            Value::Short(v) => f.debug_tuple("Short").field(v).finish(),
            Value::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Value::Long(v) => f.debug_tuple("Long").field(v).finish(),
            Value::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Value::Double(v) => f.debug_tuple("Double").field(v).finish(),
            Value::String(v) => f.debug_tuple("String").field(v).finish(),
            // Field slots are skipped; objects can reference each other.
            Value::Object(object) => write!(f, "Object({}@{:p})", object.class_name(), Arc::as_ptr(object)),
            Value::Array { component, items } => f
                .debug_struct("Array")
                .field("component", component)
                .field("items", items)
                .finish(),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value.into())
                }
            }
        )*
    };
}

value_from! {
    bool => Boolean,
    char => Char,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => String,
    &str => String,
    ObjectRef => Object,
}
