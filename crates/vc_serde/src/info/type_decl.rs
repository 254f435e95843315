use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::value::Value;

/// Type path of the built-in date/time native type.
pub const DATE_TIME: &str = "DateTime";

/// Type path of the built-in timezone native type.
pub const TIME_ZONE: &str = "TimeZone";

/// The declared type of a field.
///
/// `Union` and `Intersection` can be declared but are rejected when the
/// field descriptor is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDecl {
    Int,
    Float,
    Bool,
    String,
    Null,
    /// A list or map whose shape is decided by the data or a type field.
    Array,
    /// Any object; the concrete type comes from the value or a type map.
    Object,
    /// A registered class, interface, enum or native type.
    Named(String),
    Union(Vec<TypeDecl>),
    Intersection(Vec<TypeDecl>),
    /// No type was declared.
    Unspecified,
}

impl TypeDecl {
    #[inline]
    pub fn named(type_path: impl Into<String>) -> Self {
        TypeDecl::Named(type_path.into())
    }

    /// The runtime type of a value, as used for synthetic fields.
    pub fn of_value(value: &Value) -> Self {
        match value {
            Value::Null => TypeDecl::Null,
            Value::Bool(_) => TypeDecl::Bool,
            Value::Int(_) => TypeDecl::Int,
            Value::Float(_) => TypeDecl::Float,
            Value::String(_) => TypeDecl::String,
            Value::List(_) | Value::Map(_) => TypeDecl::Array,
            Value::Enum(e) => TypeDecl::named(e.type_path()),
            Value::DateTime(_) => TypeDecl::named(DATE_TIME),
            Value::TimeZone(_) => TypeDecl::named(TIME_ZONE),
            Value::Object(o) => TypeDecl::Named(o.type_path()),
        }
    }

    /// The registered type path, for `Named` declarations.
    #[inline]
    pub fn type_path(&self) -> Option<&str> {
        match self {
            TypeDecl::Named(path) => Some(path),
            _ => None,
        }
    }

    #[inline]
    pub fn is_named(&self, type_path: &str) -> bool {
        self.type_path() == Some(type_path)
    }
}

impl fmt::Display for TypeDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, parts: &[TypeDecl], sep: &str) -> fmt::Result {
            for (index, part) in parts.iter().enumerate() {
                if index > 0 {
                    f.write_str(sep)?;
                }
                fmt::Display::fmt(part, f)?;
            }
            Ok(())
        }

        match self {
            TypeDecl::Int => f.write_str("int"),
            TypeDecl::Float => f.write_str("float"),
            TypeDecl::Bool => f.write_str("bool"),
            TypeDecl::String => f.write_str("string"),
            TypeDecl::Null => f.write_str("null"),
            TypeDecl::Array => f.write_str("array"),
            TypeDecl::Object => f.write_str("object"),
            TypeDecl::Named(path) => f.write_str(path),
            TypeDecl::Union(parts) => join(f, parts, "|"),
            TypeDecl::Intersection(parts) => join(f, parts, "&"),
            TypeDecl::Unspecified => f.write_str("<unspecified>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{DynamicObject, EnumValue};
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn runtime_types() {
        assert_eq!(TypeDecl::of_value(&Value::Int(1)), TypeDecl::Int);
        assert_eq!(TypeDecl::of_value(&Value::Map(Default::default())), TypeDecl::Array);
        assert_eq!(
            TypeDecl::of_value(&Value::Enum(EnumValue::new("Size", "Small"))),
            TypeDecl::named("Size")
        );
        let object = DynamicObject::new("Point").into_ref();
        assert!(TypeDecl::of_value(&Value::Object(object)).is_named("Point"));
    }

    #[test]
    fn display() {
        let union = TypeDecl::Union(vec![TypeDecl::Int, TypeDecl::named("Point")]);
        assert_eq!(union.to_string(), "int|Point");
        assert_eq!(TypeDecl::Array.to_string(), "array");
    }
}
