use alloc::string::String;

use super::{PropertyReader, PropertyWriter, mismatch};
use crate::driver::{DeserializeDriver, SerializeDriver};
use crate::error::{Error, Fallible, SerdeError};
use crate::format::ArrayFormat;
use crate::info::{CaseValue, EnumCase, EnumDef, FieldDescriptor};
use crate::registry::TypeRegistry;
use crate::value::{EnumValue, Value, ValueMap};

// -----------------------------------------------------------------------------
// EnumHandler

/// Writes enum cases by their backing value, or by name for unit enums.
///
/// Reading a value that matches no case is a [`SerdeError::FormatError`].
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumHandler;

fn enum_def<'a>(registry: &'a TypeRegistry, path: &str) -> Result<&'a EnumDef, Error> {
    registry
        .enum_def(path)
        .ok_or_else(|| Error::UnsupportedType {
            type_path: String::from(path),
        })
}

impl PropertyReader for EnumHandler {
    #[inline]
    fn can_read(&self, _: &SerializeDriver<'_>, field: &FieldDescriptor, value: &Value) -> bool {
        field.category().is_enum() || matches!(value, Value::Enum(_))
    }

    fn read_value(
        &self,
        driver: &mut SerializeDriver<'_>,
        field: &FieldDescriptor,
        value: &Value,
        acc: Value,
    ) -> Result<Value, Error> {
        let Value::Enum(case) = value else {
            return Err(mismatch(field, field.declared(), value));
        };
        let def = enum_def(driver.registry(), case.type_path())?;
        let Some(found) = def.case(case.case()) else {
            return Err(mismatch(field, def.type_path(), value));
        };

        let formatter = driver.formatter();
        Ok(match found.value() {
            CaseValue::Unit => formatter.write_string(acc, field, found.name()),
            CaseValue::Int(v) => formatter.write_int(acc, field, *v),
            CaseValue::String(v) => formatter.write_string(acc, field, v),
        })
    }
}

impl EnumHandler {
    fn read_case(
        driver: &DeserializeDriver<'_>,
        field: &FieldDescriptor,
        source: &ValueMap,
    ) -> Result<Fallible<Value>, Error> {
        let path = field.declared().type_path().unwrap_or_default();
        let def = enum_def(driver.registry(), path)?;
        let deformatter = driver.deformatter();

        let found = match def.cases().first().map(EnumCase::value) {
            Some(CaseValue::Int(_)) => deformatter
                .read_int(source, field)
                .map(|v| def.case_by_int(v)),
            Some(CaseValue::String(_)) => deformatter
                .read_string(source, field)
                .map(|v| def.case_by_str(&v)),
            _ => deformatter
                .read_string(source, field)
                .map(|v| def.case(&v)),
        };

        Ok(match found {
            Ok(Some(case)) => Ok(Value::Enum(EnumValue::new(path, case.name()))),
            Ok(None) => Err(SerdeError::FormatError),
            Err(reason) => Err(reason),
        })
    }
}

impl PropertyWriter for EnumHandler {
    #[inline]
    fn can_write(&self, _: &DeserializeDriver<'_>, field: &FieldDescriptor) -> bool {
        field.category().is_enum()
    }

    #[inline]
    fn write_value(
        &self,
        driver: &DeserializeDriver<'_>,
        field: &FieldDescriptor,
        source: &ValueMap,
    ) -> Result<Fallible<Value>, Error> {
        Self::read_case(driver, field, source)
    }
}

// -----------------------------------------------------------------------------
// EnumOnArrayWriter

/// Accepts enum values already present in decoded `array` data.
///
/// In-memory trees may hold [`Value::Enum`] directly; those are passed
/// through untouched when they belong to the declared enum. Anything else
/// is read like [`EnumHandler`] does.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumOnArrayWriter;

impl PropertyWriter for EnumOnArrayWriter {
    #[inline]
    fn can_write(&self, driver: &DeserializeDriver<'_>, field: &FieldDescriptor) -> bool {
        field.category().is_enum() && driver.format() == ArrayFormat::NAME
    }

    fn write_value(
        &self,
        driver: &DeserializeDriver<'_>,
        field: &FieldDescriptor,
        source: &ValueMap,
    ) -> Result<Fallible<Value>, Error> {
        if let Some(Value::Enum(case)) = source.get(field.serialized_name())
            && field.declared().is_named(case.type_path())
        {
            let def = enum_def(driver.registry(), case.type_path())?;
            return Ok(match def.case(case.case()) {
                Some(_) => Ok(Value::Enum(case.clone())),
                None => Err(SerdeError::FormatError),
            });
        }
        EnumHandler::read_case(driver, field, source)
    }
}
