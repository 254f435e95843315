use alloc::string::ToString;

use chrono::FixedOffset;

use super::{PropertyReader, PropertyWriter};
use crate::driver::{DeserializeDriver, SerializeDriver};
use crate::error::{Error, Fallible, SerdeError};
use crate::info::{FieldDescriptor, TIME_ZONE};
use crate::value::{Value, ValueMap};

/// Writes timezones as `±HH:MM` offsets.
///
/// Reading also accepts `Z` and `UTC`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeZoneHandler;

impl PropertyReader for TimeZoneHandler {
    #[inline]
    fn can_read(&self, _: &SerializeDriver<'_>, _: &FieldDescriptor, value: &Value) -> bool {
        matches!(value, Value::TimeZone(_))
    }

    fn read_value(
        &self,
        driver: &mut SerializeDriver<'_>,
        field: &FieldDescriptor,
        value: &Value,
        acc: Value,
    ) -> Result<Value, Error> {
        let Value::TimeZone(offset) = value else {
            return Err(super::mismatch(field, TIME_ZONE, value));
        };
        Ok(driver.formatter().write_string(acc, field, &offset.to_string()))
    }
}

impl PropertyWriter for TimeZoneHandler {
    #[inline]
    fn can_write(&self, _: &DeserializeDriver<'_>, field: &FieldDescriptor) -> bool {
        field.declared().is_named(TIME_ZONE)
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
    let text = text.trim();
    if text.eq_ignore_ascii_case("z") || text.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0)
            .map(Value::TimeZone)
            .ok_or(SerdeError::FormatError);
    }
    parse_offset(text)
        .map(Value::TimeZone)
        .ok_or(SerdeError::FormatError)
}

/// `±HH:MM`, `±HHMM` or `±HH`.
fn parse_offset(text: &str) -> Option<FixedOffset> {
    let (sign, digits) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    if !digits.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }
    let (hours, minutes) = match digits.split_once(':') {
        Some(parts) => parts,
        None if digits.len() == 4 => digits.split_at(2),
        None => (digits, "00"),
    };
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets() {
        let east = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(east.to_string(), "+05:30");
        assert_eq!(parse("+05:30"), Ok(Value::TimeZone(east)));
        assert_eq!(parse("UTC"), Ok(Value::TimeZone(FixedOffset::east_opt(0).unwrap())));
        assert_eq!(parse("-0800"), Ok(Value::TimeZone(FixedOffset::west_opt(8 * 3600).unwrap())));
        assert_eq!(parse("Mars/Olympus"), Err(SerdeError::FormatError));
        assert_eq!(parse("+5:30"), Err(SerdeError::FormatError));
        assert_eq!(parse("+-1:00"), Err(SerdeError::FormatError));
        assert_eq!(parse("+€1"), Err(SerdeError::FormatError));
    }
}
