use super::{PropertyReader, PropertyWriter, mismatch};
use crate::driver::{DeserializeDriver, SerializeDriver};
use crate::error::{Error, Fallible};
use crate::info::{FieldDescriptor, TypeCategory, TypeDecl};
use crate::value::{Value, ValueMap};

/// Handles fields declared `int`, `float`, `string`, `bool` or `null`.
///
/// Integers are accepted for `float` fields and widened. A `null` value is
/// written as an explicit null whatever the declared scalar type.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScalarHandler;

impl PropertyReader for ScalarHandler {
    #[inline]
    fn can_read(&self, _: &SerializeDriver<'_>, field: &FieldDescriptor, _: &Value) -> bool {
        field.category() == TypeCategory::Scalar
    }

    fn read_value(
        &self,
        driver: &mut SerializeDriver<'_>,
        field: &FieldDescriptor,
        value: &Value,
        acc: Value,
    ) -> Result<Value, Error> {
        let formatter = driver.formatter();
        match (field.declared(), value) {
            (_, Value::Null) | (TypeDecl::Null, _) => Ok(formatter.write_null(acc, field)),
            (TypeDecl::Int, Value::Int(v)) => Ok(formatter.write_int(acc, field, *v)),
            (TypeDecl::Float, Value::Float(v)) => Ok(formatter.write_float(acc, field, *v)),
            (TypeDecl::Float, Value::Int(v)) => Ok(formatter.write_float(acc, field, *v as f64)),
            (TypeDecl::String, Value::String(v)) => Ok(formatter.write_string(acc, field, v)),
            (TypeDecl::Bool, Value::Bool(v)) => Ok(formatter.write_bool(acc, field, *v)),
            (declared, _) => Err(mismatch(field, declared, value)),
        }
    }
}

impl PropertyWriter for ScalarHandler {
    #[inline]
    fn can_write(&self, _: &DeserializeDriver<'_>, field: &FieldDescriptor) -> bool {
        field.category() == TypeCategory::Scalar
    }

    fn write_value(
        &self,
        driver: &DeserializeDriver<'_>,
        field: &FieldDescriptor,
        source: &ValueMap,
    ) -> Result<Fallible<Value>, Error> {
        let deformatter = driver.deformatter();
        Ok(match field.declared() {
            TypeDecl::Int => deformatter.read_int(source, field).map(Value::Int),
            TypeDecl::Float => deformatter.read_float(source, field).map(Value::Float),
            TypeDecl::String => deformatter.read_string(source, field).map(Value::String),
            TypeDecl::Bool => deformatter.read_bool(source, field).map(Value::Bool),
            _ => Ok(Value::Null),
        })
    }
}
