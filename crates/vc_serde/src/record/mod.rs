//! Typed records on top of [`DynamicObject`].
//!
//! A [`Record`] declares its class and converts itself to and from the
//! dynamic form the engine works on, which lets ordinary Rust structs go
//! through [`Serde::serialize_record`](crate::Serde::serialize_record) and
//! [`Serde::deserialize_record`](crate::Serde::deserialize_record).

// -----------------------------------------------------------------------------
// Modules

mod from_value;

// -----------------------------------------------------------------------------
// Exports

pub use from_value::FromValue;

use alloc::string::String;

use crate::error::Error;
use crate::info::ClassDef;
use crate::value::{DynamicObject, Value};

// -----------------------------------------------------------------------------
// Record

/// A Rust type with a registered class.
///
/// # Examples
///
/// ```
/// use vc_serde::info::{ClassDef, FieldDef, TypeDecl};
/// use vc_serde::record::Record;
/// use vc_serde::registry::TypeRegistry;
/// use vc_serde::value::DynamicObject;
/// use vc_serde::{Error, Serde};
///
/// #[derive(Debug, PartialEq)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// impl Record for Point {
///     const TYPE_PATH: &'static str = "Point";
///
///     fn class_def() -> ClassDef {
///         ClassDef::new(Self::TYPE_PATH)
///             .field(FieldDef::new("x", TypeDecl::Int))
///             .field(FieldDef::new("y", TypeDecl::Int).default(0))
///     }
///
///     fn to_object(&self) -> DynamicObject {
///         DynamicObject::new(Self::TYPE_PATH).with("x", self.x).with("y", self.y)
///     }
///
///     fn from_object(object: &DynamicObject) -> Result<Self, Error> {
///         Ok(Self {
///             x: object.require("x")?,
///             y: object.require("y")?,
///         })
///     }
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register_record::<Point>();
/// let serde = Serde::new(registry);
///
/// let wire = serde.serialize_record(&Point { x: 3, y: 4 }, "json").unwrap();
/// assert_eq!(wire.as_text(), Some(r#"{"x":3,"y":4}"#));
///
/// let point: Point = serde.deserialize_record(r#"{"x":3}"#, "json").unwrap();
/// assert_eq!(point, Point { x: 3, y: 0 });
/// ```
pub trait Record: Sized {
    /// The registered type path.
    const TYPE_PATH: &'static str;

    /// The class registered for this type.
    fn class_def() -> ClassDef;

    fn to_object(&self) -> DynamicObject;

    /// Materializes the record, failing with [`Error::MissingField`] or
    /// [`Error::ValueTypeMismatch`] when a member cannot be taken.
    fn from_object(object: &DynamicObject) -> Result<Self, Error>;
}

// -----------------------------------------------------------------------------
// Member access

impl DynamicObject {
    /// Converts a mandatory member.
    ///
    /// An unset member is [`Error::MissingField`].
    pub fn require<T: FromValue>(&self, name: &str) -> Result<T, Error> {
        match self.get(name) {
            Some(value) => convert(self, name, value),
            None => Err(Error::MissingField {
                type_path: String::from(self.type_path()),
                field: String::from(name),
            }),
        }
    }

    /// Converts an optional member. Unset and `null` members are `None`.
    pub fn optional<T: FromValue>(&self, name: &str) -> Result<Option<T>, Error> {
        match self.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => convert(self, name, value).map(Some),
        }
    }
}

fn convert<T: FromValue>(object: &DynamicObject, name: &str, value: &Value) -> Result<T, Error> {
    T::from_value(value).ok_or_else(|| Error::ValueTypeMismatch {
        field: alloc::format!("{}::{name}", object.type_path()),
        expected: String::from(T::EXPECTED),
        found: value.kind(),
    })
}
