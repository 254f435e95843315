use alloc::vec::Vec;

use super::{PropertyReader, PropertyWriter, element, mismatch, scalar_text};
use crate::collection::{CollectionItem, Dict};
use crate::driver::{DeserializeDriver, SerializeDriver};
use crate::error::{Error, Fallible};
use crate::info::{DictionaryField, FieldDescriptor, TypeCategory, TypeField};
use crate::value::{Value, ValueMap};

/// Handles arrays written as keyed maps. This is the fallback for every
/// array the sequence handler does not take.
///
/// Unmarked arrays keep their decoded shape: a decoded list comes back as
/// a list and a decoded map as a map, whatever its keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct DictionaryHandler;

#[inline]
fn dictionary_field(field: &FieldDescriptor) -> Option<&DictionaryField> {
    match field.type_field() {
        Some(TypeField::Dictionary(dict)) => Some(dict),
        _ => None,
    }
}

impl PropertyReader for DictionaryHandler {
    #[inline]
    fn can_read(&self, _: &SerializeDriver<'_>, field: &FieldDescriptor, _: &Value) -> bool {
        field.category() == TypeCategory::Array
    }

    fn read_value(
        &self,
        driver: &mut SerializeDriver<'_>,
        field: &FieldDescriptor,
        value: &Value,
        acc: Value,
    ) -> Result<Value, Error> {
        if !value.is_array() {
            return Err(mismatch(field, "array", value));
        }
        let entries = value.entries();
        let formatter = driver.formatter();

        if let Some(dict) = dictionary_field(field)
            && dict.should_implode()
        {
            let mut pairs = Vec::with_capacity(entries.len());
            for (key, item) in &entries {
                let text = scalar_text(item).ok_or_else(|| mismatch(field, "scalar", item))?;
                pairs.push((key.clone(), text));
            }
            let text = dict.implode(&pairs).unwrap_or_default();
            return Ok(formatter.write_string(acc, field, &text));
        }

        let mut items = Dict::new();
        for (key, item) in entries {
            let element = field.element_for_value(driver.registry(), key, item)?;
            items.push(CollectionItem::new(element, item.clone()));
        }
        formatter.write_dictionary(acc, field, items, driver)
    }
}

impl PropertyWriter for DictionaryHandler {
    #[inline]
    fn can_write(&self, _: &DeserializeDriver<'_>, field: &FieldDescriptor) -> bool {
        field.category() == TypeCategory::Array
    }

    fn write_value(
        &self,
        driver: &DeserializeDriver<'_>,
        field: &FieldDescriptor,
        source: &ValueMap,
    ) -> Result<Fallible<Value>, Error> {
        let deformatter = driver.deformatter();
        let marked = dictionary_field(field);

        let raw: ValueMap = match marked {
            Some(dict) if dict.should_implode() => match deformatter.read_string(source, field) {
                Ok(text) => dict
                    .explode(&text)
                    .into_iter()
                    .map(|(key, value)| (key, Value::String(value)))
                    .collect(),
                Err(reason) => return Ok(Err(reason)),
            },
            _ => match deformatter.read_dictionary(source, field) {
                Ok(entries) => entries,
                Err(reason) => return Ok(Err(reason)),
            },
        };

        if marked.is_none() && deformatter.is_list(source, field) {
            let mut out = Vec::with_capacity(raw.len());
            for (key, data) in raw {
                out.push(element(driver, field, key, data)?);
            }
            return Ok(Ok(Value::List(out)));
        }

        let mut out = ValueMap::with_capacity(raw.len());
        for (key, data) in raw {
            let value = element(driver, field, key.clone(), data)?;
            out.insert(key, value);
        }
        Ok(Ok(Value::Map(out)))
    }
}
