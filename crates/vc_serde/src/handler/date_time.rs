use alloc::string::String;

use chrono::{DateTime, SecondsFormat};

use super::{PropertyReader, PropertyWriter};
use crate::driver::{DeserializeDriver, SerializeDriver};
use crate::error::{Error, Fallible, SerdeError};
use crate::info::{DATE_TIME, FieldDescriptor};
use crate::value::{Value, ValueMap};

/// Writes date/times as RFC 3339 strings with millisecond precision and
/// reads them back, keeping the original offset.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateTimeHandler;

impl PropertyReader for DateTimeHandler {
    #[inline]
    fn can_read(&self, _: &SerializeDriver<'_>, _: &FieldDescriptor, value: &Value) -> bool {
        matches!(value, Value::DateTime(_))
    }

    fn read_value(
        &self,
        driver: &mut SerializeDriver<'_>,
        field: &FieldDescriptor,
        value: &Value,
        acc: Value,
    ) -> Result<Value, Error> {
        let Value::DateTime(at) = value else {
            return Err(super::mismatch(field, DATE_TIME, value));
        };
        let text = at.to_rfc3339_opts(SecondsFormat::Millis, false);
        Ok(driver.formatter().write_string(acc, field, &text))
    }
}

impl PropertyWriter for DateTimeHandler {
    #[inline]
    fn can_write(&self, _: &DeserializeDriver<'_>, field: &FieldDescriptor) -> bool {
        field.declared().is_named(DATE_TIME)
    }

    fn write_value(
        &self,
        driver: &DeserializeDriver<'_>,
        field: &FieldDescriptor,
        source: &ValueMap,
    ) -> Result<Fallible<Value>, Error> {
        Ok(driver
            .deformatter()
            .read_string(source, field)
            .and_then(|text| parse(&text)))
    }
}

fn parse(text: &str) -> Fallible<Value> {
    DateTime::parse_from_rfc3339(text)
        .map(Value::DateTime)
        .map_err(|err| {
            log::debug!("`{text}` is not an RFC 3339 date/time: {err}");
            SerdeError::FormatError
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_offset() {
        let Ok(Value::DateTime(at)) = parse("2024-03-01T10:20:30.250+02:00") else {
            panic!("expected a date/time");
        };
        assert_eq!(at.offset().local_minus_utc(), 7200);
        assert_eq!(
            at.to_rfc3339_opts(SecondsFormat::Millis, false),
            String::from("2024-03-01T10:20:30.250+02:00"),
        );

        assert_eq!(parse("yesterday"), Err(SerdeError::FormatError));
    }
}
