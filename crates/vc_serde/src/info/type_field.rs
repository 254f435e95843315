use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use super::TypeDecl;

// -----------------------------------------------------------------------------
// TypeField

/// A directive refining how an `array` field is (de)serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeField {
    Sequence(SequenceField),
    Dictionary(DictionaryField),
}

impl TypeField {
    /// Name used in [`FieldTypeIncompatible`](crate::Error::FieldTypeIncompatible).
    #[inline]
    pub fn directive(&self) -> &'static str {
        match self {
            TypeField::Sequence(_) => "SequenceField",
            TypeField::Dictionary(_) => "DictionaryField",
        }
    }

    /// Both directives only apply to `array` fields.
    #[inline]
    pub fn accepts(&self, declared: &TypeDecl) -> bool {
        matches!(declared, TypeDecl::Array)
    }

    /// The element type, when the array holds objects or enums.
    #[inline]
    pub fn array_type(&self) -> Option<&str> {
        match self {
            TypeField::Sequence(f) => f.array_type.as_deref(),
            TypeField::Dictionary(f) => f.array_type.as_deref(),
        }
    }

    #[inline]
    pub fn is_sequence(&self) -> bool {
        matches!(self, TypeField::Sequence(_))
    }
}

impl From<SequenceField> for TypeField {
    #[inline]
    fn from(value: SequenceField) -> Self {
        TypeField::Sequence(value)
    }
}

impl From<DictionaryField> for TypeField {
    #[inline]
    fn from(value: DictionaryField) -> Self {
        TypeField::Dictionary(value)
    }
}

// -----------------------------------------------------------------------------
// SequenceField

/// The field is a positional list.
///
/// With `implode_on` set, the list is written as one delimited string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceField {
    pub array_type: Option<String>,
    pub implode_on: Option<String>,
    /// Trim each element when exploding.
    pub trim: bool,
}

impl Default for SequenceField {
    fn default() -> Self {
        Self {
            array_type: None,
            implode_on: None,
            trim: true,
        }
    }
}

impl SequenceField {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sequence whose elements are of `array_type`.
    #[inline]
    pub fn of(array_type: impl Into<String>) -> Self {
        Self {
            array_type: Some(array_type.into()),
            ..Self::default()
        }
    }

    #[inline]
    pub fn implode_on(mut self, separator: impl Into<String>) -> Self {
        self.implode_on = Some(separator.into());
        self
    }

    #[inline]
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn implode(&self, items: &[String]) -> Option<String> {
        self.implode_on.as_deref().map(|sep| items.join(sep))
    }

    /// Splits an imploded string. Empty input yields an empty list.
    pub fn explode(&self, input: &str) -> Vec<String> {
        let Some(sep) = self.implode_on.as_deref() else {
            return Vec::from([String::from(input)]);
        };
        if input.is_empty() {
            return Vec::new();
        }
        input
            .split(sep)
            .map(|item| String::from(if self.trim { item.trim() } else { item }))
            .collect()
    }
}

// -----------------------------------------------------------------------------
// DictionaryField

/// The field is a keyed map.
///
/// With both `implode_on` and `join_on` set, the map is written as
/// `key{join_on}value{implode_on}key{join_on}value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryField {
    pub array_type: Option<String>,
    pub implode_on: Option<String>,
    pub join_on: Option<String>,
    /// Trim keys and values when exploding.
    pub trim: bool,
}

impl Default for DictionaryField {
    fn default() -> Self {
        Self {
            array_type: None,
            implode_on: None,
            join_on: None,
            trim: true,
        }
    }
}

impl DictionaryField {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A dictionary whose values are of `array_type`.
    #[inline]
    pub fn of(array_type: impl Into<String>) -> Self {
        Self {
            array_type: Some(array_type.into()),
            ..Self::default()
        }
    }

    #[inline]
    pub fn imploded(mut self, implode_on: impl Into<String>, join_on: impl Into<String>) -> Self {
        self.implode_on = Some(implode_on.into());
        self.join_on = Some(join_on.into());
        self
    }

    #[inline]
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    #[inline]
    pub fn should_implode(&self) -> bool {
        self.implode_on.as_deref().is_some_and(|s| !s.is_empty())
            && self.join_on.as_deref().is_some_and(|s| !s.is_empty())
    }

    pub fn implode(&self, entries: &[(String, String)]) -> Option<String> {
        let (Some(implode_on), Some(join_on)) = (&self.implode_on, &self.join_on) else {
            return None;
        };
        let parts: Vec<String> = entries
            .iter()
            .map(|(k, v)| format!("{k}{join_on}{v}"))
            .collect();
        Some(parts.join(implode_on))
    }

    /// Splits an imploded string into ordered pairs.
    ///
    /// Items without the join separator map to an empty value, and later
    /// duplicates of a key win.
    pub fn explode(&self, input: &str) -> Vec<(String, String)> {
        let (Some(implode_on), Some(join_on)) = (&self.implode_on, &self.join_on) else {
            return Vec::new();
        };
        let clean = |s: &str| String::from(if self.trim { s.trim() } else { s });

        let mut out: Vec<(String, String)> = Vec::new();
        for item in input.split(implode_on.as_str()) {
            if item.is_empty() {
                continue;
            }
            let (key, value) = match item.split_once(join_on.as_str()) {
                Some((k, v)) => (clean(k), clean(v)),
                None => (clean(item), String::new()),
            };
            match out.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => out.push((key, value)),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn only_arrays_accept_directives() {
        let field = TypeField::from(SequenceField::new());
        assert!(field.accepts(&TypeDecl::Array));
        assert!(!field.accepts(&TypeDecl::String));
        assert_eq!(field.directive(), "SequenceField");
    }

    #[test]
    fn sequence_implode() {
        let field = SequenceField::new().implode_on(",");
        let items = vec![String::from("a"), String::from("b")];
        assert_eq!(field.implode(&items).as_deref(), Some("a,b"));
        assert_eq!(field.explode("a , b"), items);
        assert!(field.explode("").is_empty());
        assert_eq!(SequenceField::new().implode(&items), None);
    }

    #[test]
    fn dictionary_implode() {
        let field = DictionaryField::new().imploded(",", "=");
        assert!(field.should_implode());

        let entries = vec![
            (String::from("a"), String::from("1")),
            (String::from("b"), String::from("2")),
        ];
        assert_eq!(field.implode(&entries).as_deref(), Some("a=1,b=2"));
        assert_eq!(field.explode(" a = 1,b=2,"), entries);
        assert_eq!(
            field.explode("flag"),
            vec![(String::from("flag"), String::new())]
        );
    }
}
