use alloc::string::{String, ToString};
use alloc::sync::Arc;

use super::trace;
use crate::error::{Error, Fallible};
use crate::format::Deformatter;
use crate::handler::PropertyWriter;
use crate::info::FieldDescriptor;
use crate::registry::TypeRegistry;
use crate::value::{Value, ValueMap};

// -----------------------------------------------------------------------------
// DeserializeDriver

/// Rebuilds values from decoded data, dispatching every field to the first
/// [`PropertyWriter`] that accepts it.
///
/// The outer `Result` carries fatal errors; the inner [`Fallible`] carries
/// the field-local outcome the caller decides on.
pub struct DeserializeDriver<'a> {
    registry: &'a TypeRegistry,
    deformatter: &'a dyn Deformatter,
    writers: &'a [Arc<dyn PropertyWriter>],
}

impl<'a> DeserializeDriver<'a> {
    #[inline]
    pub const fn new(
        registry: &'a TypeRegistry,
        deformatter: &'a dyn Deformatter,
        writers: &'a [Arc<dyn PropertyWriter>],
    ) -> Self {
        Self {
            registry,
            deformatter,
            writers,
        }
    }

    #[inline]
    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    #[inline]
    pub fn deformatter(&self) -> &'a dyn Deformatter {
        self.deformatter
    }

    /// Name of the active format.
    #[inline]
    pub fn format(&self) -> &'a str {
        self.deformatter.format()
    }

    /// Reads `field` out of `source`.
    pub fn deserialize(
        &self,
        source: &ValueMap,
        field: &FieldDescriptor,
    ) -> Result<Fallible<Value>, Error> {
        let Some(writer) = self.writers.iter().find(|w| w.can_write(self, field)) else {
            return Err(Error::NoWriterFound {
                type_path: field.declared().to_string(),
                format: String::from(self.format()),
            });
        };

        log::trace!(
            "read `{}` declared `{}` as `{}`",
            field.serialized_name(),
            field.declared(),
            self.format(),
        );
        trace::enter_field(field.serialized_name());
        let outcome = writer.write_value(self, field, source)?;
        trace::leave_field();

        Ok(outcome)
    }
}
