use alloc::string::{String, ToString};

use super::{ArrayBasedFormat, Wire};
use crate::error::Error;
use crate::value::Value;

/// JSON text, backed by `serde_json` with key order preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat {
    /// Indent the output.
    pub pretty: bool,
}

impl JsonFormat {
    pub const NAME: &'static str = "json";

    #[inline]
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl ArrayBasedFormat for JsonFormat {
    #[inline]
    fn name(&self) -> &str {
        Self::NAME
    }

    fn encode(&self, root: Value) -> Result<Wire, Error> {
        let text = if self.pretty {
            serde_json::to_string_pretty(&root)
        } else {
            serde_json::to_string(&root)
        };
        text.map(Wire::Text).map_err(|e| Error::Encode {
            format: String::from(Self::NAME),
            message: e.to_string(),
        })
    }

    fn decode(&self, wire: Wire) -> Result<Value, Error> {
        let Wire::Text(text) = wire else {
            return Err(Error::Decode {
                format: String::from(Self::NAME),
                message: String::from("expected text, found an in-memory value"),
            });
        };
        serde_json::from_str(&text).map_err(|e| Error::Decode {
            format: String::from(Self::NAME),
            message: e.to_string(),
        })
    }
}
