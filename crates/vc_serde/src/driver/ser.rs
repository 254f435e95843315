use alloc::string::{String, ToString};
use alloc::sync::Arc;

use super::object_stack::ObjectStack;
use super::trace;
use crate::error::Error;
use crate::format::Formatter;
use crate::handler::PropertyReader;
use crate::info::FieldDescriptor;
use crate::registry::TypeRegistry;
use crate::value::{ObjectRef, Value};

// -----------------------------------------------------------------------------
// SerializeDriver

/// Walks an object graph, dispatching every value to the first
/// [`PropertyReader`] that accepts it.
///
/// # Dispatch
///
/// Readers are tried in registration order and the first whose
/// [`can_read`](PropertyReader::can_read) returns `true` handles the value.
/// When none accepts it the call fails with [`Error::NoReaderFound`].
///
/// # Cycles
///
/// Objects entered through [`serialize`](Self::serialize) or
/// [`enter`](Self::enter) are tracked by identity until they are left.
/// Meeting one of them again fails with [`Error::CircularReferenceDetected`].
/// The same object may appear any number of times in sibling positions.
pub struct SerializeDriver<'a> {
    registry: &'a TypeRegistry,
    formatter: &'a dyn Formatter,
    readers: &'a [Arc<dyn PropertyReader>],
    seen: ObjectStack,
}

impl<'a> SerializeDriver<'a> {
    #[inline]
    pub const fn new(
        registry: &'a TypeRegistry,
        formatter: &'a dyn Formatter,
        readers: &'a [Arc<dyn PropertyReader>],
    ) -> Self {
        Self {
            registry,
            formatter,
            readers,
            seen: ObjectStack::new(),
        }
    }

    #[inline]
    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    #[inline]
    pub fn formatter(&self) -> &'a dyn Formatter {
        self.formatter
    }

    /// Name of the active format.
    #[inline]
    pub fn format(&self) -> &'a str {
        self.formatter.format()
    }

    /// Serializes `value` as `field` into `acc` and returns the new accumulator.
    pub fn serialize(
        &mut self,
        value: &Value,
        acc: Value,
        field: &FieldDescriptor,
    ) -> Result<Value, Error> {
        let readers = self.readers;
        let Some(reader) = readers.iter().find(|r| r.can_read(self, field, value)) else {
            return Err(Error::NoReaderFound {
                type_path: field.declared().to_string(),
                format: String::from(self.format()),
            });
        };

        log::trace!(
            "write `{}` declared `{}` as `{}`",
            field.serialized_name(),
            field.declared(),
            self.format(),
        );
        trace::enter_field(field.serialized_name());

        let acc = match value {
            Value::Object(object) => {
                self.enter(object)?;
                let acc = reader.read_value(self, field, value, acc)?;
                self.leave();
                acc
            }
            _ => reader.read_value(self, field, value, acc)?,
        };

        trace::leave_field();
        Ok(acc)
    }

    /// Marks `object` as being visited.
    ///
    /// Readers that inline an object's members without going back through
    /// [`serialize`](Self::serialize) must bracket the work with
    /// `enter` and [`leave`](Self::leave).
    pub fn enter(&mut self, object: &ObjectRef) -> Result<(), Error> {
        if self.seen.contains(object) {
            return Err(Error::CircularReferenceDetected {
                type_path: object.type_path(),
                chain: self.seen.chain(),
            });
        }
        self.seen.push(object.clone());
        Ok(())
    }

    #[inline]
    pub fn leave(&mut self) {
        self.seen.pop();
    }
}
