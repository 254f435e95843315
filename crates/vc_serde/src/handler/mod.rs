//! Property handlers: the per-kind logic of the engine.
//!
//! A [`PropertyReader`] turns one value into formatter calls; a
//! [`PropertyWriter`] turns deformatter reads back into one value. The
//! engine keeps an ordered chain of each and the first handler whose
//! predicate accepts a field wins, so more specific handlers go first.
//!
//! # Menu
//!
//! - [`ScalarHandler`]: `int`, `float`, `string`, `bool` and `null`.
//! - [`DateTimeHandler`] and [`TimeZoneHandler`]: the native date types.
//! - [`EnumHandler`]: unit, int-backed and string-backed enums.
//! - [`EnumOnArrayWriter`]: keeps enum values as-is for the `array` format.
//! - [`NativeHandler`]: classes converted through [`NativeHooks`](crate::info::NativeHooks).
//! - [`SequenceHandler`] and [`DictionaryHandler`]: arrays.
//! - [`ObjectReader`] and [`ObjectWriter`]: registered classes.

// -----------------------------------------------------------------------------
// Modules

mod date_time;
mod dictionary;
mod enums;
mod native;
mod object_reader;
mod object_writer;
mod scalar;
mod sequence;
mod time_zone;

// -----------------------------------------------------------------------------
// Exports

pub use date_time::DateTimeHandler;
pub use dictionary::DictionaryHandler;
pub use enums::{EnumHandler, EnumOnArrayWriter};
pub use native::NativeHandler;
pub use object_reader::ObjectReader;
pub use object_writer::ObjectWriter;
pub use scalar::ScalarHandler;
pub use sequence::SequenceHandler;
pub use time_zone::TimeZoneHandler;

use alloc::string::{String, ToString};

use crate::driver::{DeserializeDriver, SerializeDriver};
use crate::error::{Error, Fallible};
use crate::info::FieldDescriptor;
use crate::value::{Value, ValueMap};

// -----------------------------------------------------------------------------
// Traits

/// Serializes the values it accepts.
pub trait PropertyReader: Send + Sync {
    /// Returns `true` if this reader handles `value` stored in `field`.
    fn can_read(&self, driver: &SerializeDriver<'_>, field: &FieldDescriptor, value: &Value) -> bool;

    /// Writes `value` into `acc` through the driver's formatter.
    fn read_value(
        &self,
        driver: &mut SerializeDriver<'_>,
        field: &FieldDescriptor,
        value: &Value,
        acc: Value,
    ) -> Result<Value, Error>;
}

/// Deserializes the fields it accepts.
pub trait PropertyWriter: Send + Sync {
    /// Returns `true` if this writer handles `field`.
    fn can_write(&self, driver: &DeserializeDriver<'_>, field: &FieldDescriptor) -> bool;

    /// Reads `field` out of `source` through the driver's deformatter.
    fn write_value(
        &self,
        driver: &DeserializeDriver<'_>,
        field: &FieldDescriptor,
        source: &ValueMap,
    ) -> Result<Fallible<Value>, Error>;
}

// -----------------------------------------------------------------------------
// Helpers

/// The error for a value that does not fit the field it is stored in.
#[inline]
pub(crate) fn mismatch(field: &FieldDescriptor, expected: impl ToString, value: &Value) -> Error {
    Error::ValueTypeMismatch {
        field: String::from(field.name()),
        expected: expected.to_string(),
        found: value.kind(),
    }
}

/// Text form of a scalar, as joined into imploded strings.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(v) => Some(v.clone()),
        Value::Int(v) => Some(v.to_string()),
        Value::Float(v) => Some(v.to_string()),
        Value::Bool(v) => Some(String::from(if *v { "1" } else { "0" })),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

/// Deserializes one decoded element through the driver.
///
/// The element is wrapped in a single-entry map so that it can be read like
/// any other field. Field-local failures become `null`.
pub(crate) fn element(
    driver: &DeserializeDriver<'_>,
    parent: &FieldDescriptor,
    key: String,
    data: Value,
) -> Result<Value, Error> {
    let field = parent.element_for_data(driver.registry(), key.as_str(), &data)?;
    let mut holder = ValueMap::with_capacity(1);
    holder.insert(key, data);

    match driver.deserialize(&holder, &field)? {
        Ok(value) => Ok(value),
        Err(reason) => {
            log::debug!(
                "element `{}` of `{}` dropped to null: {reason}",
                field.serialized_name(),
                parent.name(),
            );
            Ok(Value::Null)
        }
    }
}
