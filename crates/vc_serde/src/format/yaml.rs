use alloc::string::{String, ToString};

use super::{ArrayBasedFormat, Wire};
use crate::error::Error;
use crate::value::Value;

/// YAML text, backed by `serde_yaml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormat;

impl YamlFormat {
    pub const NAME: &'static str = "yaml";
}

impl ArrayBasedFormat for YamlFormat {
    #[inline]
    fn name(&self) -> &str {
        Self::NAME
    }

    fn encode(&self, root: Value) -> Result<Wire, Error> {
        serde_yaml::to_string(&root)
            .map(Wire::Text)
            .map_err(|e| Error::Encode {
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
        serde_yaml::from_str(&text).map_err(|e| Error::Decode {
            format: String::from(Self::NAME),
            message: e.to_string(),
        })
    }
}
