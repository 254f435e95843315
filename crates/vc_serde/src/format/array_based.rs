use alloc::string::String;
use alloc::vec::Vec;

use vc_utils::hash::HashSet;

use super::{Deformatter, Formatter, Wire};
use crate::collection::{Dict, Sequence};
use crate::driver::SerializeDriver;
use crate::error::{Error, Fallible, SerdeError};
use crate::info::FieldDescriptor;
use crate::value::{Value, ValueMap};

// -----------------------------------------------------------------------------
// ArrayBasedFormat

/// A format that converts to and from a plain [`Value`] tree.
///
/// Implementors only provide the name and the tree encoding; the
/// [`Formatter`] and [`Deformatter`] contracts, including collecting of
/// leftover keys, come from blanket implementations.
pub trait ArrayBasedFormat: Send + Sync {
    fn name(&self) -> &str;

    /// Encodes the root value.
    fn encode(&self, root: Value) -> Result<Wire, Error>;

    /// Decodes wire data into the root value.
    fn decode(&self, wire: Wire) -> Result<Value, Error>;
}

/// Stores `value` under the field's serialized name.
fn store(acc: Value, field: &FieldDescriptor, value: Value) -> Value {
    let mut map = match acc {
        Value::Map(map) => map,
        _ => ValueMap::new(),
    };
    map.insert(String::from(field.serialized_name()), value);
    Value::Map(map)
}

/// Serializes one item into a fresh accumulator and returns what it wrote.
fn write_item(
    driver: &mut SerializeDriver<'_>,
    value: &Value,
    field: &FieldDescriptor,
) -> Result<ValueMap, Error> {
    match driver.serialize(value, Value::Map(ValueMap::new()), field)? {
        Value::Map(map) => Ok(map),
        _ => Ok(ValueMap::new()),
    }
}

impl<T: ArrayBasedFormat> Formatter for T {
    #[inline]
    fn format(&self) -> &str {
        self.name()
    }

    #[inline]
    fn initialize(&self, _root: &FieldDescriptor) -> Value {
        Value::Map(ValueMap::new())
    }

    fn finalize(&self, acc: Value, root: &FieldDescriptor) -> Result<Wire, Error> {
        let root_value = match acc {
            Value::Map(mut map) => map.shift_remove(root.serialized_name()),
            _ => None,
        };
        self.encode(root_value.unwrap_or_else(|| Value::Map(ValueMap::new())))
    }

    #[inline]
    fn write_int(&self, acc: Value, field: &FieldDescriptor, value: i64) -> Value {
        store(acc, field, Value::Int(value))
    }

    #[inline]
    fn write_float(&self, acc: Value, field: &FieldDescriptor, value: f64) -> Value {
        store(acc, field, Value::Float(value))
    }

    #[inline]
    fn write_string(&self, acc: Value, field: &FieldDescriptor, value: &str) -> Value {
        store(acc, field, Value::String(String::from(value)))
    }

    #[inline]
    fn write_bool(&self, acc: Value, field: &FieldDescriptor, value: bool) -> Value {
        store(acc, field, Value::Bool(value))
    }

    #[inline]
    fn write_null(&self, acc: Value, field: &FieldDescriptor) -> Value {
        store(acc, field, Value::Null)
    }

    fn write_sequence(
        &self,
        acc: Value,
        field: &FieldDescriptor,
        sequence: Sequence,
        driver: &mut SerializeDriver<'_>,
    ) -> Result<Value, Error> {
        let mut items = Vec::with_capacity(sequence.len());
        for item in sequence.items {
            items.extend(write_item(driver, &item.value, &item.field)?.into_values());
        }
        Ok(store(acc, field, Value::List(items)))
    }

    fn write_dictionary(
        &self,
        acc: Value,
        field: &FieldDescriptor,
        dict: Dict,
        driver: &mut SerializeDriver<'_>,
    ) -> Result<Value, Error> {
        let mut entries = field.extra_properties().clone();
        for item in dict.items {
            entries.extend(write_item(driver, &item.value, &item.field)?);
        }
        Ok(store(acc, field, Value::Map(entries)))
    }
}

// -----------------------------------------------------------------------------
// Reads

/// The raw value of a field, with `null` treated as absent.
#[inline]
fn lookup<'a>(source: &'a ValueMap, field: &FieldDescriptor) -> Fallible<&'a Value> {
    match source.get(field.serialized_name()) {
        None | Some(Value::Null) => Err(SerdeError::Missing),
        Some(value) => Ok(value),
    }
}

impl<T: ArrayBasedFormat> Deformatter for T {
    #[inline]
    fn format(&self) -> &str {
        self.name()
    }

    fn initialize(&self, wire: Wire, root: &FieldDescriptor) -> Result<ValueMap, Error> {
        let decoded = self.decode(wire)?;
        let mut source = ValueMap::with_capacity(1);
        source.insert(String::from(root.serialized_name()), decoded);
        Ok(source)
    }

    fn read_int(&self, source: &ValueMap, field: &FieldDescriptor) -> Fallible<i64> {
        match lookup(source, field)? {
            Value::Int(v) => Ok(*v),
            _ => Err(SerdeError::FormatError),
        }
    }

    fn read_float(&self, source: &ValueMap, field: &FieldDescriptor) -> Fallible<f64> {
        lookup(source, field)?.as_f64().ok_or(SerdeError::FormatError)
    }

    fn read_string(&self, source: &ValueMap, field: &FieldDescriptor) -> Fallible<String> {
        match lookup(source, field)? {
            Value::String(v) => Ok(v.clone()),
            _ => Err(SerdeError::FormatError),
        }
    }

    fn read_bool(&self, source: &ValueMap, field: &FieldDescriptor) -> Fallible<bool> {
        lookup(source, field)?.as_bool().ok_or(SerdeError::FormatError)
    }

    fn read_sequence(&self, source: &ValueMap, field: &FieldDescriptor) -> Fallible<Vec<Value>> {
        match lookup(source, field)? {
            Value::List(items) => Ok(items.clone()),
            Value::Map(map) => Ok(map.values().cloned().collect()),
            _ => Err(SerdeError::FormatError),
        }
    }

    fn read_dictionary(&self, source: &ValueMap, field: &FieldDescriptor) -> Fallible<ValueMap> {
        let value = lookup(source, field)?;
        match value {
            Value::Map(map) => Ok(map.clone()),
            Value::List(_) => Ok(value
                .entries()
                .into_iter()
                .map(|(k, v)| (k, v.clone()))
                .collect()),
            _ => Err(SerdeError::FormatError),
        }
    }

    fn read_object(&self, source: &ValueMap, field: &FieldDescriptor) -> Fallible<ValueMap> {
        match lookup(source, field)? {
            Value::Map(map) => Ok(map.clone()),
            _ => Err(SerdeError::FormatError),
        }
    }

    #[inline]
    fn is_list(&self, source: &ValueMap, field: &FieldDescriptor) -> bool {
        matches!(source.get(field.serialized_name()), Some(Value::List(_)))
    }

    fn remaining(&self, source: &ValueMap, used: &HashSet<String>) -> Option<ValueMap> {
        Some(
            source
                .iter()
                .filter(|(key, _)| !used.contains(key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }
}
