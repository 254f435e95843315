use alloc::string::String;
use alloc::sync::Arc;

use super::{PropertyReader, mismatch};
use crate::collection::{CollectionItem, Dict};
use crate::driver::SerializeDriver;
use crate::error::Error;
use crate::info::{FieldDescriptor, TypeCategory};
use crate::registry::TypeMap;
use crate::value::{ObjectRef, Value};

/// Serializes registered classes member by member.
///
/// Unset and `null` members are omitted. Flattened members are inlined
/// into the enclosing dictionary, recursively for objects. When the field
/// carries a type map, its discriminator comes first.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectReader;

/// The `key_field => identifier` entry for an object of `type_path`.
fn discriminator(
    driver: &SerializeDriver<'_>,
    map: &dyn TypeMap,
    type_path: &str,
) -> Result<CollectionItem, Error> {
    let Some(id) = map.find_identifier(type_path) else {
        return Err(Error::MissingTypeIdentifier {
            key_field: String::from(map.key_field()),
            type_path: String::from(type_path),
        });
    };
    let value = Value::String(id);
    let field = FieldDescriptor::for_value(driver.registry(), map.key_field(), &value)?;
    Ok(CollectionItem::new(field, value))
}

/// Pushes the members of `object` onto `dict`, inlining flattened ones.
fn flatten_members(
    driver: &mut SerializeDriver<'_>,
    object: &ObjectRef,
    dict: &mut Dict,
) -> Result<(), Error> {
    let snapshot = object.snapshot();
    let class = driver.registry().describe(snapshot.type_path())?;

    for field in class.fields() {
        let value = match snapshot.get(field.name()) {
            None | Some(Value::Null) => continue,
            Some(value) => value,
        };

        if !field.is_flatten() {
            dict.push(CollectionItem::new(Arc::clone(field), value.clone()));
            continue;
        }

        match value {
            Value::Object(inner) if field.category() == TypeCategory::Object => {
                driver.enter(inner)?;
                if let Some(map) = field.type_map() {
                    dict.prepend(discriminator(driver, map, &inner.type_path())?);
                }
                flatten_members(driver, inner, dict)?;
                driver.leave();
            }
            Value::List(_) | Value::Map(_) if field.category() == TypeCategory::Array => {
                for (key, item) in value.entries() {
                    let element = field.element_for_value(driver.registry(), key, item)?;
                    dict.push(CollectionItem::new(element, item.clone()));
                }
            }
            _ => return Err(mismatch(field, field.declared(), value)),
        }
    }
    Ok(())
}

impl PropertyReader for ObjectReader {
    #[inline]
    fn can_read(&self, _: &SerializeDriver<'_>, _: &FieldDescriptor, value: &Value) -> bool {
        matches!(value, Value::Object(_))
    }

    fn read_value(
        &self,
        driver: &mut SerializeDriver<'_>,
        field: &FieldDescriptor,
        value: &Value,
        acc: Value,
    ) -> Result<Value, Error> {
        let Value::Object(object) = value else {
            return Err(mismatch(field, field.declared(), value));
        };

        let mut dict = Dict::new();
        flatten_members(driver, object, &mut dict)?;

        if let Some(map) = field.type_map() {
            dict.prepend(discriminator(driver, map, &object.type_path())?);
        }

        driver.formatter().write_object(acc, field, dict, driver)
    }
}
