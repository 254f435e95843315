use alloc::string::String;

use super::{ArrayBasedFormat, Wire};
use crate::error::Error;
use crate::value::Value;

/// The in-memory format: the output is the [`Value`] tree itself.
///
/// Decoded input may carry host-only values such as enums, which the
/// [`EnumOnArrayWriter`](crate::handler::EnumOnArrayWriter) can accept
/// as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayFormat;

impl ArrayFormat {
    pub const NAME: &'static str = "array";
}

impl ArrayBasedFormat for ArrayFormat {
    #[inline]
    fn name(&self) -> &str {
        Self::NAME
    }

    #[inline]
    fn encode(&self, root: Value) -> Result<Wire, Error> {
        Ok(Wire::Value(root))
    }

    fn decode(&self, wire: Wire) -> Result<Value, Error> {
        match wire {
            Wire::Value(value) => Ok(value),
            Wire::Text(_) => Err(Error::Decode {
                format: String::from(Self::NAME),
                message: String::from("expected an in-memory value, found text"),
            }),
        }
    }
}
