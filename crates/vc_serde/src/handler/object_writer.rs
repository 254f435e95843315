use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

use vc_utils::hash::HashSet;

use super::PropertyWriter;
use crate::driver::DeserializeDriver;
use crate::error::{Error, Fallible, SerdeError};
use crate::info::{FieldDescriptor, TypeCategory};
use crate::registry::TypeRegistry;
use crate::value::{DynamicObject, Value, ValueMap};

/// Rebuilds registered classes from decoded maps.
///
/// # Population
///
/// Non-flattened fields are read by serialized name and their keys marked
/// as used. Flattened object fields are then populated, in declaration
/// order, from the keys nobody has used yet, and what they consume is
/// marked used in turn. Their concrete type is resolved against the whole
/// of `data`, so siblings may share a discriminator. Finally the last flattened array field receives
/// every key still unused, as raw decoded values. Without a flattened
/// array field the leftover keys are ignored.
///
/// A field that comes back missing or malformed takes its default when it
/// has one and is otherwise left unset.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectWriter;

/// The concrete class to build for `field`, and the discriminator key to
/// mark as used.
fn resolve_type(
    registry: &TypeRegistry,
    field: &FieldDescriptor,
    data: &ValueMap,
) -> Result<Fallible<(String, Option<String>)>, Error> {
    let Some(map) = field.type_map() else {
        return match field.declared().type_path() {
            Some(path) => Ok(Ok((String::from(path), None))),
            None => Err(Error::UnsupportedType {
                type_path: field.declared().to_string(),
            }),
        };
    };

    let key = map.key_field();
    let id = match data.get(key) {
        None | Some(Value::Null) => return Ok(Err(SerdeError::Missing)),
        Some(Value::String(id)) => id.clone(),
        Some(Value::Int(id)) => id.to_string(),
        Some(_) => return Ok(Err(SerdeError::FormatError)),
    };

    match map.find_class(&id) {
        Some(path) if registry.class(&path).is_some() => Ok(Ok((path, Some(String::from(key))))),
        _ => {
            log::debug!("type map keyed on `{key}` cannot resolve `{id}`");
            Ok(Err(SerdeError::FormatError))
        }
    }
}

fn assign(object: &mut DynamicObject, field: &FieldDescriptor, outcome: Fallible<Value>) {
    match outcome {
        Ok(value) => {
            object.set(field.name(), value);
        }
        Err(_) if field.should_use_default() => {
            if let Some(default) = field.default_value() {
                object.set(field.name(), default.clone());
            }
        }
        Err(reason) => {
            log::trace!("`{}::{}` left unset: {reason}", object.type_path(), field.name());
        }
    }
}

/// Builds an object of `type_path` out of `data`.
///
/// Returns the object and every key of `data` it consumed.
pub(crate) fn populate_object(
    driver: &DeserializeDriver<'_>,
    data: &ValueMap,
    type_path: &str,
    discriminator: Option<String>,
) -> Result<(DynamicObject, HashSet<String>), Error> {
    let registry = driver.registry();
    let deformatter = driver.deformatter();
    let class = registry.describe(type_path)?;

    let mut used: HashSet<String> = HashSet::default();
    used.extend(discriminator);

    let mut object = DynamicObject::new(type_path);
    let mut collecting_objects: Vec<&Arc<FieldDescriptor>> = Vec::new();
    let mut collecting_array: Option<&Arc<FieldDescriptor>> = None;

    for field in class.fields() {
        if field.is_flatten() {
            match field.category() {
                TypeCategory::Object => collecting_objects.push(field),
                _ => collecting_array = Some(field),
            }
            continue;
        }

        used.insert(String::from(field.serialized_name()));
        let outcome = driver.deserialize(data, field)?;
        assign(&mut object, field, outcome);
    }

    for field in collecting_objects {
        let Some(remaining) = deformatter.remaining(data, &used) else {
            log::debug!(
                "format `{}` cannot collect keys for flattened `{type_path}::{}`",
                driver.format(),
                field.name(),
            );
            continue;
        };

        let (inner_path, inner_discriminator) = match resolve_type(registry, field, data)? {
            Ok(resolved) => resolved,
            Err(reason) => {
                assign(&mut object, field, Err(reason));
                continue;
            }
        };

        let (inner, inner_used) = populate_object(driver, &remaining, &inner_path, inner_discriminator)?;
        used.extend(inner_used);
        object.set(field.name(), Value::Object(inner.into_ref()));
    }

    if let Some(field) = collecting_array {
        match deformatter.remaining(data, &used) {
            Some(remaining) => {
                used.extend(remaining.keys().cloned());
                object.set(field.name(), Value::Map(remaining));
            }
            None => log::debug!(
                "format `{}` cannot collect keys for flattened `{type_path}::{}`",
                driver.format(),
                field.name(),
            ),
        }
    }

    let ignored = data.keys().filter(|key| !used.contains(key.as_str())).count();
    if ignored > 0 {
        log::debug!("ignored {ignored} unknown keys while populating `{type_path}`");
    }

    for callback in class.post_load() {
        callback.call(&mut object);
    }

    Ok((object, used))
}

impl PropertyWriter for ObjectWriter {
    #[inline]
    fn can_write(&self, _: &DeserializeDriver<'_>, field: &FieldDescriptor) -> bool {
        field.category() == TypeCategory::Object
    }

    fn write_value(
        &self,
        driver: &DeserializeDriver<'_>,
        field: &FieldDescriptor,
        source: &ValueMap,
    ) -> Result<Fallible<Value>, Error> {
        let data = match driver.deformatter().read_object(source, field) {
            Ok(data) => data,
            Err(reason) => return Ok(Err(reason)),
        };

        let (type_path, discriminator) = match resolve_type(driver.registry(), field, &data)? {
            Ok(resolved) => resolved,
            Err(reason) => return Ok(Err(reason)),
        };

        if let Some(hooks) = driver.registry().class(&type_path).and_then(|c| c.native) {
            return Ok((hooks.from_map)(&data).map(|object| Value::Object(object.into_ref())));
        }

        let (object, _) = populate_object(driver, &data, &type_path, discriminator)?;
        Ok(Ok(Value::Object(object.into_ref())))
    }
}
