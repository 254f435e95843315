//! The boundary between the traversal core and concrete wire formats.
//!
//! A [`Formatter`] folds fields into an accumulator and finally encodes it;
//! a [`Deformatter`] decodes wire data and answers per-field reads with a
//! [`Fallible`] value. Formats that first convert to and from a plain
//! [`Value`] tree implement [`ArrayBasedFormat`] and get both contracts.
//!
//! # Menu
//!
//! - [`ArrayFormat`]: in-memory [`Value`] trees, format name `"array"`.
//! - [`JsonFormat`]: JSON text via `serde_json`, format name `"json"`.
//! - [`YamlFormat`]: YAML text via `serde_yaml`, format name `"yaml"`.

// -----------------------------------------------------------------------------
// Modules

mod array;
mod array_based;

crate::cfg::json! {
    mod json;
    pub use json::JsonFormat;
}

crate::cfg::yaml! {
    mod yaml;
    pub use yaml::YamlFormat;
}

// -----------------------------------------------------------------------------
// Exports

pub use array::ArrayFormat;
pub use array_based::ArrayBasedFormat;

use alloc::string::String;
use alloc::vec::Vec;

use vc_utils::hash::HashSet;

use crate::collection::{Dict, Sequence};
use crate::driver::SerializeDriver;
use crate::error::{Error, Fallible};
use crate::info::FieldDescriptor;
use crate::value::{Value, ValueMap};

// -----------------------------------------------------------------------------
// Wire

/// Serialized output, or deserialization input.
#[derive(Debug, Clone, PartialEq)]
pub enum Wire {
    /// An in-memory tree, used by the array format.
    Value(Value),
    /// Encoded text, used by JSON and YAML.
    Text(String),
}

impl Wire {
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Wire::Text(text) => Some(text),
            Wire::Value(_) => None,
        }
    }

    #[inline]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Wire::Value(value) => Some(value),
            Wire::Text(_) => None,
        }
    }

    #[inline]
    pub fn into_text(self) -> Option<String> {
        match self {
            Wire::Text(text) => Some(text),
            Wire::Value(_) => None,
        }
    }

    #[inline]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Wire::Value(value) => Some(value),
            Wire::Text(_) => None,
        }
    }
}

impl From<Value> for Wire {
    #[inline]
    fn from(value: Value) -> Self {
        Wire::Value(value)
    }
}

impl From<String> for Wire {
    #[inline]
    fn from(value: String) -> Self {
        Wire::Text(value)
    }
}

impl From<&str> for Wire {
    #[inline]
    fn from(value: &str) -> Self {
        Wire::Text(String::from(value))
    }
}

// -----------------------------------------------------------------------------
// Formatter

/// The write side of a format.
///
/// Every `write_*` method stores one value under the field's serialized name
/// in the running accumulator and returns the new accumulator.
pub trait Formatter: Send + Sync {
    /// The name callers select this format by.
    fn format(&self) -> &str;

    /// The accumulator the root field is folded into.
    fn initialize(&self, root: &FieldDescriptor) -> Value;

    /// Encodes the finished accumulator.
    fn finalize(&self, acc: Value, root: &FieldDescriptor) -> Result<Wire, Error>;

    fn write_int(&self, acc: Value, field: &FieldDescriptor, value: i64) -> Value;

    fn write_float(&self, acc: Value, field: &FieldDescriptor, value: f64) -> Value;

    fn write_string(&self, acc: Value, field: &FieldDescriptor, value: &str) -> Value;

    fn write_bool(&self, acc: Value, field: &FieldDescriptor, value: bool) -> Value;

    /// Stores an explicit null, as found inside arrays.
    fn write_null(&self, acc: Value, field: &FieldDescriptor) -> Value;

    /// Serializes each item through `driver` and stores them as a list.
    fn write_sequence(
        &self,
        acc: Value,
        field: &FieldDescriptor,
        sequence: Sequence,
        driver: &mut SerializeDriver<'_>,
    ) -> Result<Value, Error>;

    /// Serializes each item through `driver` and stores them as a map.
    ///
    /// The field's extra properties are written before the items.
    fn write_dictionary(
        &self,
        acc: Value,
        field: &FieldDescriptor,
        dict: Dict,
        driver: &mut SerializeDriver<'_>,
    ) -> Result<Value, Error>;

    /// Stores the members of an object. Defaults to [`Formatter::write_dictionary`].
    #[inline]
    fn write_object(
        &self,
        acc: Value,
        field: &FieldDescriptor,
        dict: Dict,
        driver: &mut SerializeDriver<'_>,
    ) -> Result<Value, Error> {
        self.write_dictionary(acc, field, dict, driver)
    }
}

// -----------------------------------------------------------------------------
// Deformatter

/// The read side of a format.
///
/// Reads look up the field's serialized name in `source`. An absent key is
/// [`SerdeError::Missing`](crate::SerdeError::Missing); a present value of
/// the wrong shape is [`SerdeError::FormatError`](crate::SerdeError::FormatError).
pub trait Deformatter: Send + Sync {
    /// The name callers select this format by.
    fn format(&self) -> &str;

    /// Decodes wire data into a map holding the root value under the root
    /// field's serialized name.
    fn initialize(&self, wire: Wire, root: &FieldDescriptor) -> Result<ValueMap, Error>;

    /// Releases the decoded data once the call is complete.
    #[inline]
    fn finalize(&self, decoded: ValueMap) {
        drop(decoded);
    }

    fn read_int(&self, source: &ValueMap, field: &FieldDescriptor) -> Fallible<i64>;

    fn read_float(&self, source: &ValueMap, field: &FieldDescriptor) -> Fallible<f64>;

    fn read_string(&self, source: &ValueMap, field: &FieldDescriptor) -> Fallible<String>;

    fn read_bool(&self, source: &ValueMap, field: &FieldDescriptor) -> Fallible<bool>;

    /// Raw elements of a list.
    fn read_sequence(&self, source: &ValueMap, field: &FieldDescriptor) -> Fallible<Vec<Value>>;

    /// Raw entries of a map. Lists are keyed by position.
    fn read_dictionary(&self, source: &ValueMap, field: &FieldDescriptor) -> Fallible<ValueMap>;

    /// Raw members of an object, including any discriminator.
    fn read_object(&self, source: &ValueMap, field: &FieldDescriptor) -> Fallible<ValueMap>;

    /// Returns `true` if the field was decoded as a list rather than a map.
    ///
    /// Unmarked arrays come back in the shape the data was written in.
    #[inline]
    fn is_list(&self, source: &ValueMap, field: &FieldDescriptor) -> bool {
        let _ = (source, field);
        false
    }

    /// The entries of `source` whose keys are not in `used`.
    ///
    /// Returns `None` when the format cannot collect leftover keys, in
    /// which case flattened fields are not populated.
    #[inline]
    fn remaining(&self, source: &ValueMap, used: &HashSet<String>) -> Option<ValueMap> {
        let _ = (source, used);
        None
    }
}
