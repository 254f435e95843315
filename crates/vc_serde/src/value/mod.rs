//! The value model shared by host objects and decoded wire data.
//!
//! - [`Value`]: one node of an object graph or of a decoded document.
//! - [`DynamicObject`]: a typed record whose unset members are absent.
//! - [`ObjectRef`]: shared handle to a [`DynamicObject`], compared by
//!   identity for cycle detection.
//! - [`EnumValue`]: one case of a registered enum.
//!
//! Only `Null`, `Bool`, `Int`, `Float`, `String`, `List` and `Map` are wire
//! values. The other variants exist on the host side only.

// -----------------------------------------------------------------------------
// Modules

mod object;
mod wire;

// -----------------------------------------------------------------------------
// Exports

pub use object::{DynamicObject, ObjectRef};

use alloc::string::String;
use alloc::vec::Vec;

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;

/// Insertion-ordered string-keyed map.
pub type ValueMap = IndexMap<String, Value>;

// -----------------------------------------------------------------------------
// EnumValue

/// One case of a registered enum, identified by the enum's type path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    type_path: String,
    case: String,
}

impl EnumValue {
    #[inline]
    pub fn new(type_path: impl Into<String>, case: impl Into<String>) -> Self {
        Self {
            type_path: type_path.into(),
            case: case.into(),
        }
    }

    #[inline]
    pub fn type_path(&self) -> &str {
        &self.type_path
    }

    /// The case name, not its backing value.
    #[inline]
    pub fn case(&self) -> &str {
        &self.case
    }
}

// -----------------------------------------------------------------------------
// Value

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(ValueMap),
    Enum(EnumValue),
    DateTime(DateTime<FixedOffset>),
    TimeZone(FixedOffset),
    Object(ObjectRef),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Enum(_) => "enum",
            Value::DateTime(_) => "datetime",
            Value::TimeZone(_) => "timezone",
            Value::Object(_) => "object",
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for lists and maps.
    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::List(_) | Value::Map(_))
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Integers widen to floats.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Value::Enum(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(v) => Some(v),
            _ => None,
        }
    }

    /// Iterates the entries of a list or map as `(key, value)` pairs.
    ///
    /// List keys are their positions. Other values yield nothing.
    pub fn entries(&self) -> Vec<(String, &Value)> {
        use alloc::string::ToString;

        match self {
            Value::List(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), item))
                .collect(),
            Value::Map(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
            _ => Vec::new(),
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl From<$ty> for Value {
            #[inline]
            fn from(value: $ty) -> Self {
                Value::$variant(value.into())
            }
        }
    )*};
}

impl_from! {
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Int,
    u16 => Int,
    u32 => Int,
    f32 => Float,
    f64 => Float,
    String => String,
    &str => String,
    Vec<Value> => List,
    ValueMap => Map,
    EnumValue => Enum,
    DateTime<FixedOffset> => DateTime,
    FixedOffset => TimeZone,
    ObjectRef => Object,
}

impl From<DynamicObject> for Value {
    #[inline]
    fn from(value: DynamicObject) -> Self {
        Value::Object(value.into_ref())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn conversions() {
        assert_eq!(Value::from(3_i32), Value::Int(3));
        assert_eq!(Value::from(1.5_f64), Value::Float(1.5));
        assert_eq!(Value::from("a"), Value::String("a".into()));
        assert_eq!(Value::from(None::<i64>), Value::Null);

        let map: Value = [("x", 1), ("y", 2)].into_iter().collect();
        let keys: Vec<_> = map.as_map().map(|m| m.keys().cloned().collect()).unwrap_or_default();
        assert_eq!(keys, vec!["x".to_owned(), "y".to_owned()]);
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::Int(2).as_f64(), Some(2.0));
        assert_eq!(Value::Float(2.0).as_i64(), None);
        assert!(Value::List(vec![]).is_array());
        assert!(!Value::String("x".into()).is_array());
        assert_eq!(Value::Null.kind(), "null");
    }

    #[test]
    fn entries_of_lists_use_positions() {
        let list = Value::List(vec![Value::from("a"), Value::from("b")]);
        let entries = list.entries();
        assert_eq!(entries[0].0, "0");
        assert_eq!(entries[1].0, "1");
        assert_eq!(entries[1].1, &Value::from("b"));
    }
}
