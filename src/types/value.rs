use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use super::error::ValidateError;

/// A runtime value handed to a validator.
///
/// This is the normalized shape every leaf predicate works against: callers
/// convert their own types once at the library boundary (usually through the
/// `From` conversions below) and validators match on it exhaustively.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absent value (a null pointer, `Option::None`, JSON null).
    Null,
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// An ordered sequence of values.
    Array(Vec<Value>),
    /// A string-keyed mapping.
    Map(BTreeMap<String, Value>),
    /// A key/value pair, as handed out by the `mapkv` container.
    Entry(Box<MapEntry>),
    /// An opaque caller-defined value; see [`CustomValue`].
    Custom(Arc<dyn CustomValue>),
}

/// A key/value pair from a mapping, passed to `mapkv` sub-validators.
#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    pub key: Value,
    pub value: Value,
}

/// The escape hatch for values the [`Value`] enum cannot express directly.
///
/// Implement `as_text` to give the value a textual form usable by
/// string-oriented predicates, and `self_validate` to make the value usable
/// with the `self` rule.
pub trait CustomValue: fmt::Debug + Send + Sync {
    /// The textual form of this value, when it has one.
    fn as_text(&self) -> Option<String> {
        None
    }

    /// Validate this value by its own rules (the `self` rule dispatches here).
    fn self_validate(&self) -> Result<(), ValidateError> {
        Err(ValidateError::new("the value does not support self-validation"))
    }
}

impl Value {
    /// A short type label used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Entry(_) => "entry",
            Value::Custom(_) => "custom",
        }
    }

    /// Whether this is the zero value of its type: null, `false`, `0`,
    /// the empty string, or an empty aggregate.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Int(i) => *i == 0,
            Value::Float(f) => *f == 0.0,
            Value::String(s) => s.is_empty(),
            Value::Array(a) => a.is_empty(),
            Value::Map(m) => m.is_empty(),
            Value::Entry(e) => e.key.is_zero() && e.value.is_zero(),
            Value::Custom(_) => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Entry(a), Value::Entry(b)) => a == b,
            (Value::Custom(a), Value::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// The rendering used when a value is interpolated into an error message:
// strings print bare (no quotes), arrays print space-joined in brackets.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("map[")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                f.write_str("]")
            }
            Value::Entry(e) => write!(f, "{{{} {}}}", e.key, e.value),
            Value::Custom(c) => match c.as_text() {
                Some(s) => f.write_str(&s),
                None => f.write_str("<opaque>"),
            },
        }
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(v: &[T]) -> Self {
        Value::Array(v.iter().cloned().map(Into::into).collect())
    }
}

impl<V: Into<Value>> From<BTreeMap<String, V>> for Value {
    fn from(v: BTreeMap<String, V>) -> Self {
        Value::Map(v.into_iter().map(|(k, val)| (k, val.into())).collect())
    }
}

impl<V: Into<Value>> From<HashMap<String, V>> for Value {
    fn from(v: HashMap<String, V>) -> Self {
        Value::Map(v.into_iter().map(|(k, val)| (k, val.into())).collect())
    }
}

impl From<MapEntry> for Value {
    fn from(v: MapEntry) -> Self {
        Value::Entry(Box::new(v))
    }
}

impl From<Arc<dyn CustomValue>> for Value {
    fn from(v: Arc<dyn CustomValue>) -> Self {
        Value::Custom(v)
    }
}
