use alloc::string::String;
use core::fmt;

use thiserror::Error;

// -----------------------------------------------------------------------------
// SerdeError

/// Field-local outcome of reading one value out of decoded data.
///
/// This is never fatal on its own. The object writer resolves it per field,
/// filling the default or leaving the member unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SerdeError {
    /// The key is absent from the source.
    #[error("value is missing")]
    Missing,
    /// The key is present but its value has the wrong shape.
    #[error("value has an unexpected shape")]
    FormatError,
}

/// Result of a single deformatter read.
pub type Fallible<T> = Result<T, SerdeError>;

// -----------------------------------------------------------------------------
// Direction

/// Which half of the engine raised an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Serialize,
    Deserialize,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Serialize => "serialize",
            Direction::Deserialize => "deserialize",
        })
    }
}

// -----------------------------------------------------------------------------
// Error

/// Fatal errors that abort a whole `serialize` or `deserialize` call.
///
/// These describe configuration or data-shape problems the caller must fix.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("no property reader handles `{type_path}` for format `{format}`")]
    NoReaderFound { type_path: String, format: String },

    #[error("no property writer handles `{type_path}` for format `{format}`")]
    NoWriterFound { type_path: String, format: String },

    #[error("cannot {direction} format `{format}`: no backend is registered for it")]
    UnsupportedFormat { format: String, direction: Direction },

    #[error("circular reference detected at `{type_path}` (chain: {chain})")]
    CircularReferenceDetected { type_path: String, chain: String },

    #[error("type `{type_path}` is not supported")]
    UnsupportedType { type_path: String },

    #[error("field `{class}::{field}` declares a union type, which is not supported")]
    UnionTypesNotSupported { class: String, field: String },

    #[error("field `{class}::{field}` declares an intersection type, which is not supported")]
    IntersectionTypesNotSupported { class: String, field: String },

    #[error("`{directive}` cannot be applied to a field of type `{type_path}`")]
    FieldTypeIncompatible { directive: &'static str, type_path: String },

    #[error("field `{class}::{field}` is flattened but is neither an array nor an object")]
    InvalidFlatten { class: String, field: String },

    #[error("type map keyed on `{key_field}` has no identifier for `{type_path}`")]
    MissingTypeIdentifier { key_field: String, type_path: String },

    #[error("field `{field}` expects `{expected}` but holds {found}")]
    ValueTypeMismatch { field: String, expected: String, found: &'static str },

    #[error("root value of `{type_path}` could not be read from format `{format}`: {reason}")]
    InvalidRoot { type_path: String, format: String, reason: SerdeError },

    #[error("`{type_path}` is missing mandatory field `{field}`")]
    MissingField { type_path: String, field: String },

    #[error("failed to encode `{format}`: {message}")]
    Encode { format: String, message: String },

    #[error("failed to decode `{format}`: {message}")]
    Decode { format: String, message: String },
}

impl Error {
    /// Returns `true` for errors raised while building field descriptors.
    pub fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedType { .. }
                | Error::UnionTypesNotSupported { .. }
                | Error::IntersectionTypesNotSupported { .. }
                | Error::FieldTypeIncompatible { .. }
                | Error::InvalidFlatten { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_carry_context() {
        let err = Error::UnsupportedFormat {
            format: "toml".into(),
            direction: Direction::Deserialize,
        };
        assert_eq!(
            err.to_string(),
            "cannot deserialize format `toml`: no backend is registered for it"
        );

        let err = Error::NoReaderFound {
            type_path: "Point".into(),
            format: "json".into(),
        };
        assert!(err.to_string().contains("`Point`"));
        assert!(err.to_string().contains("`json`"));
    }

    #[test]
    fn declaration_errors() {
        let union = Error::UnionTypesNotSupported {
            class: "Shape".into(),
            field: "size".into(),
        };
        assert!(union.is_declaration_error());

        let root = Error::InvalidRoot {
            type_path: "Point".into(),
            format: "array".into(),
            reason: SerdeError::Missing,
        };
        assert!(!root.is_declaration_error());
        assert!(root.to_string().ends_with("value is missing"));
    }
}
