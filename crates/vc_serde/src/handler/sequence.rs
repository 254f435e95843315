use alloc::string::ToString;
use alloc::vec::Vec;

use super::{PropertyReader, PropertyWriter, element, mismatch, scalar_text};
use crate::collection::{CollectionItem, Sequence};
use crate::driver::{DeserializeDriver, SerializeDriver};
use crate::error::{Error, Fallible};
use crate::info::{FieldDescriptor, SequenceField, TypeCategory, TypeField};
use crate::value::{Value, ValueMap};

/// Handles arrays written as ordered lists.
///
/// On the way out it takes any list, plus maps on fields marked with a
/// [`SequenceField`]. On the way in it only takes fields marked with a
/// [`SequenceField`]; unmarked arrays are read by the dictionary handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequenceHandler;

#[inline]
fn sequence_field(field: &FieldDescriptor) -> Option<&SequenceField> {
    match field.type_field() {
        Some(TypeField::Sequence(sequence)) => Some(sequence),
        _ => None,
    }
}

impl PropertyReader for SequenceHandler {
    fn can_read(&self, _: &SerializeDriver<'_>, field: &FieldDescriptor, value: &Value) -> bool {
        if field.category() != TypeCategory::Array {
            return false;
        }
        match field.type_field() {
            Some(TypeField::Sequence(_)) => true,
            Some(TypeField::Dictionary(_)) => false,
            None => matches!(value, Value::List(_)),
        }
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

        if let Some(sequence) = sequence_field(field)
            && sequence.implode_on.is_some()
        {
            let mut parts = Vec::with_capacity(entries.len());
            for (_, item) in &entries {
                parts.push(scalar_text(item).ok_or_else(|| mismatch(field, "scalar", item))?);
            }
            let text = sequence.implode(&parts).unwrap_or_default();
            return Ok(formatter.write_string(acc, field, &text));
        }

        let mut items = Sequence::new();
        for (key, item) in entries {
            let element = field.element_for_value(driver.registry(), key, item)?;
            items.push(CollectionItem::new(element, item.clone()));
        }
        formatter.write_sequence(acc, field, items, driver)
    }
}

impl PropertyWriter for SequenceHandler {
    #[inline]
    fn can_write(&self, _: &DeserializeDriver<'_>, field: &FieldDescriptor) -> bool {
        field.category() == TypeCategory::Array && sequence_field(field).is_some()
    }

    fn write_value(
        &self,
        driver: &DeserializeDriver<'_>,
        field: &FieldDescriptor,
        source: &ValueMap,
    ) -> Result<Fallible<Value>, Error> {
        let deformatter = driver.deformatter();

        let raw: Vec<Value> = match sequence_field(field) {
            Some(sequence) if sequence.implode_on.is_some() => {
                match deformatter.read_string(source, field) {
                    Ok(text) => sequence.explode(&text).into_iter().map(Value::String).collect(),
                    Err(reason) => return Ok(Err(reason)),
                }
            }
            _ => match deformatter.read_sequence(source, field) {
                Ok(items) => items,
                Err(reason) => return Ok(Err(reason)),
            },
        };

        let mut out = Vec::with_capacity(raw.len());
        for (index, data) in raw.into_iter().enumerate() {
            out.push(element(driver, field, index.to_string(), data)?);
        }
        Ok(Ok(Value::List(out)))
    }
}

