//! The public entry points.
//!
//! [`Serde`] owns a [`TypeRegistry`], the handler chains and the available
//! formats. It is immutable once built and can be shared between threads;
//! every call gets its own traversal state.

// -----------------------------------------------------------------------------
// Modules

mod builder;


// -----------------------------------------------------------------------------
// Exports

pub use builder::SerdeBuilder;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use vc_utils::hash::HashMap;

use crate::driver::{DeserializeDriver, SerializeDriver, clear_trace, report_failure};
use crate::error::{Direction, Error};
use crate::format::{Deformatter, Formatter, Wire};
use crate::handler::{PropertyReader, PropertyWriter};
use crate::info::FieldDescriptor;
use crate::record::Record;
use crate::registry::TypeRegistry;
use crate::value::{ObjectRef, Value};

// -----------------------------------------------------------------------------
// Serde

/// Serializes object graphs to, and rebuilds them from, any registered
/// format.
///
/// # Examples
///
/// ```
/// use vc_serde::info::{ClassDef, FieldDef, TypeDecl};
/// use vc_serde::registry::TypeRegistry;
/// use vc_serde::value::DynamicObject;
/// use vc_serde::{Serde, Value};
///
/// let mut registry = TypeRegistry::new();
/// registry.register_class(
///     ClassDef::new("Point")
///         .field(FieldDef::new("x", TypeDecl::Int))
///         .field(FieldDef::new("y", TypeDecl::Int).default(0)),
/// );
/// let serde = Serde::new(registry);
///
/// let point = DynamicObject::new("Point").with("x", 1).with("y", 2).into_ref();
/// let wire = serde.serialize(&point, "array").unwrap();
/// let tree = wire.as_value().unwrap();
/// assert_eq!(tree.as_map().unwrap()["x"], Value::Int(1));
///
/// let back = serde.deserialize(wire, "array", "Point").unwrap();
/// assert_eq!(back.get("y"), Some(Value::Int(2)));
/// ```
pub struct Serde {
    registry: Arc<TypeRegistry>,
    readers: Vec<Arc<dyn PropertyReader>>,
    writers: Vec<Arc<dyn PropertyWriter>>,
    formatters: HashMap<String, Arc<dyn Formatter>>,
    deformatters: HashMap<String, Arc<dyn Deformatter>>,
}

impl Serde {
    /// An engine with the built-in handlers and formats.
    #[inline]
    pub fn new(registry: TypeRegistry) -> Self {
        SerdeBuilder::new().registry(registry).build()
    }

    #[inline]
    pub fn builder() -> SerdeBuilder {
        SerdeBuilder::new()
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Returns `true` if `format` can be both written and read.
    #[inline]
    pub fn supports(&self, format: &str) -> bool {
        self.formatters.contains_key(format) && self.deformatters.contains_key(format)
    }

    /// Serializes `object` and everything reachable from it.
    pub fn serialize(&self, object: &ObjectRef, format: &str) -> Result<Wire, Error> {
        clear_trace();
        let result = self.serialize_inner(object, format);
        match &result {
            Ok(_) => log::trace!("serialized `{}` to `{format}`", object.type_path()),
            Err(err) => report_failure(Direction::Serialize, err),
        }
        result
    }

    fn serialize_inner(&self, object: &ObjectRef, format: &str) -> Result<Wire, Error> {
        let Some(formatter) = self.formatters.get(format) else {
            return Err(Error::UnsupportedFormat {
                format: String::from(format),
                direction: Direction::Serialize,
            });
        };

        let root = FieldDescriptor::root(&self.registry, &object.type_path())?;
        let mut driver = SerializeDriver::new(&self.registry, formatter.as_ref(), &self.readers);

        let acc = formatter.initialize(&root);
        let acc = driver.serialize(&Value::Object(object.clone()), acc, &root)?;
        formatter.finalize(acc, &root)
    }

    /// Rebuilds an object of `type_path` from `wire`.
    ///
    /// `type_path` may name an interface when a type map covers it.
    pub fn deserialize(
        &self,
        wire: impl Into<Wire>,
        format: &str,
        type_path: &str,
    ) -> Result<ObjectRef, Error> {
        clear_trace();
        let result = self.deserialize_inner(wire.into(), format, type_path);
        match &result {
            Ok(_) => log::trace!("deserialized `{type_path}` from `{format}`"),
            Err(err) => report_failure(Direction::Deserialize, err),
        }
        result
    }

    fn deserialize_inner(
        &self,
        wire: Wire,
        format: &str,
        type_path: &str,
    ) -> Result<ObjectRef, Error> {
        let Some(deformatter) = self.deformatters.get(format) else {
            return Err(Error::UnsupportedFormat {
                format: String::from(format),
                direction: Direction::Deserialize,
            });
        };

        let root = FieldDescriptor::root(&self.registry, type_path)?;
        let source = deformatter.initialize(wire, &root)?;
        let driver = DeserializeDriver::new(&self.registry, deformatter.as_ref(), &self.writers);

        let outcome = driver.deserialize(&source, &root)?;
        deformatter.finalize(source);

        match outcome {
            Ok(Value::Object(object)) => Ok(object),
            Ok(other) => Err(Error::ValueTypeMismatch {
                field: String::from(root.name()),
                expected: String::from(type_path),
                found: other.kind(),
            }),
            Err(reason) => Err(Error::InvalidRoot {
                type_path: String::from(type_path),
                format: String::from(format),
                reason,
            }),
        }
    }

    /// Serializes a typed [`Record`].
    ///
    /// The record's class must be registered, see
    /// [`TypeRegistry::register_record`].
    #[inline]
    pub fn serialize_record<T: Record>(&self, record: &T, format: &str) -> Result<Wire, Error> {
        self.serialize(&record.to_object().into_ref(), format)
    }

    /// Rebuilds a typed [`Record`].
    pub fn deserialize_record<T: Record>(
        &self,
        wire: impl Into<Wire>,
        format: &str,
    ) -> Result<T, Error> {
        let object = self.deserialize(wire, format, T::TYPE_PATH)?;
        let object = object.read();
        T::from_object(&object)
    }
}
