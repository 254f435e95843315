use super::{PropertyReader, PropertyWriter, mismatch};
use crate::collection::{CollectionItem, Dict};
use crate::driver::{DeserializeDriver, SerializeDriver};
use crate::error::{Error, Fallible};
use crate::info::{FieldDescriptor, NativeHooks};
use crate::registry::TypeRegistry;
use crate::value::{Value, ValueMap};

/// Handles classes registered with [`NativeHooks`].
///
/// The hooks convert the object to and from a plain map, which is written
/// and read as a dictionary. Field descriptors of the class are not used.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeHandler;

#[inline]
fn hooks(registry: &TypeRegistry, type_path: &str) -> Option<NativeHooks> {
    registry.class(type_path).and_then(|class| class.native)
}

impl PropertyReader for NativeHandler {
    fn can_read(&self, driver: &SerializeDriver<'_>, _: &FieldDescriptor, value: &Value) -> bool {
        match value {
            Value::Object(object) => hooks(driver.registry(), &object.type_path()).is_some(),
            _ => false,
        }
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
        let Some(hooks) = hooks(driver.registry(), &object.type_path()) else {
            return Err(mismatch(field, field.declared(), value));
        };

        let map = (hooks.to_map)(&object.read());
        let mut dict = Dict::new();
        for (key, item) in map {
            let element = FieldDescriptor::for_value(driver.registry(), key, &item)?;
            dict.push(CollectionItem::new(element, item));
        }
        driver.formatter().write_dictionary(acc, field, dict, driver)
    }
}

impl PropertyWriter for NativeHandler {
    fn can_write(&self, driver: &DeserializeDriver<'_>, field: &FieldDescriptor) -> bool {
        field
            .declared()
            .type_path()
            .is_some_and(|path| hooks(driver.registry(), path).is_some())
    }

    fn write_value(
        &self,
        driver: &DeserializeDriver<'_>,
        field: &FieldDescriptor,
        source: &ValueMap,
    ) -> Result<Fallible<Value>, Error> {
        let path = field.declared().type_path().unwrap_or_default();
        let Some(hooks) = hooks(driver.registry(), path) else {
            return Err(Error::UnsupportedType {
                type_path: field.declared().to_string(),
            });
        };

        Ok(driver
            .deformatter()
            .read_object(source, field)
            .and_then(|map| (hooks.from_map)(&map))
            .map(|object| Value::Object(object.into_ref())))
    }
}
