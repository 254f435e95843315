use core::fmt;

/// How a field's value is handled, derived once from its declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Scalar,
    /// A sequence or dictionary.
    Array,
    Object,
    UnitEnum,
    IntEnum,
    StringEnum,
}

impl TypeCategory {
    #[inline]
    pub const fn is_enum(self) -> bool {
        matches!(
            self,
            TypeCategory::UnitEnum | TypeCategory::IntEnum | TypeCategory::StringEnum
        )
    }

    /// Arrays and objects, the categories that nest other fields.
    #[inline]
    pub const fn is_compound(self) -> bool {
        matches!(self, TypeCategory::Array | TypeCategory::Object)
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TypeCategory::Scalar => "scalar",
            TypeCategory::Array => "array",
            TypeCategory::Object => "object",
            TypeCategory::UnitEnum => "unit enum",
            TypeCategory::IntEnum => "int enum",
            TypeCategory::StringEnum => "string enum",
        })
    }
}
