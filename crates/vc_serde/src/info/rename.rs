use alloc::format;
use alloc::string::String;

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase,
};

/// Case conventions for [`Rename::Case`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    Upper,
    Lower,
    Snake,
    Kebab,
    /// `lowerCamelCase`.
    Camel,
    /// `UpperCamelCase`.
    Pascal,
    ScreamingSnake,
}

/// Derives the serialized name of a field from its member name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Rename {
    Literal(String),
    Prefix(String),
    Case(Case),
}

impl Rename {
    pub fn apply(&self, name: &str) -> String {
        match self {
            Rename::Literal(literal) => literal.clone(),
            Rename::Prefix(prefix) => format!("{prefix}{name}"),
            Rename::Case(case) => match case {
                Case::Upper => name.to_uppercase(),
                Case::Lower => name.to_lowercase(),
                Case::Snake => name.to_snake_case(),
                Case::Kebab => name.to_kebab_case(),
                Case::Camel => name.to_lower_camel_case(),
                Case::Pascal => name.to_upper_camel_case(),
                Case::ScreamingSnake => name.to_shouty_snake_case(),
            },
        }
    }
}
