use alloc::string::String;
use alloc::vec::Vec;

use chrono::{DateTime, FixedOffset};

use crate::value::{EnumValue, ObjectRef, Value, ValueMap};

/// Conversion out of a [`Value`].
///
/// Returns `None` when the value has another shape.
pub trait FromValue: Sized {
    /// Name of the expected shape, used in error messages.
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any";

    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "int";

    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

macro_rules! impl_narrow_int {
    ($($ty:ty),* $(,)?) => {$(
        impl FromValue for $ty {
            const EXPECTED: &'static str = stringify!($ty);

            #[inline]
            fn from_value(value: &Value) -> Option<Self> {
                value.as_i64().and_then(|v| <$ty>::try_from(v).ok())
            }
        }
    )*};
}

impl_narrow_int!(i8, i16, i32, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    const EXPECTED: &'static str = "float";

    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(String::from)
    }
}

impl FromValue for EnumValue {
    const EXPECTED: &'static str = "enum";

    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        value.as_enum().cloned()
    }
}

impl FromValue for ObjectRef {
    const EXPECTED: &'static str = "object";

    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}

impl FromValue for DateTime<FixedOffset> {
    const EXPECTED: &'static str = "datetime";

    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::DateTime(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for FixedOffset {
    const EXPECTED: &'static str = "timezone";

    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::TimeZone(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for ValueMap {
    const EXPECTED: &'static str = "map";

    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        value.as_map().cloned()
    }
}

/// Lists convert element-wise; maps convert their values in order.
impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "list";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            Value::Map(map) => map.values().map(T::from_value).collect(),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn conversions() {
        assert_eq!(i32::from_value(&Value::Int(7)), Some(7));
        assert_eq!(u8::from_value(&Value::Int(300)), None);
        assert_eq!(f64::from_value(&Value::Int(2)), Some(2.0));
        assert_eq!(String::from_value(&Value::Int(2)), None);

        let list = Value::List(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(Vec::<i64>::from_value(&list), Some(vec![1, 2]));

        let mixed = Value::List(vec![Value::Int(1), Value::from("two")]);
        assert_eq!(Vec::<i64>::from_value(&mixed), None);

        assert_eq!(Option::<bool>::from_value(&Value::Null), Some(None));
        assert_eq!(Option::<bool>::from_value(&Value::Bool(true)), Some(Some(true)));
    }
}
