use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;

// -----------------------------------------------------------------------------
// TypeMap

/// Bidirectional mapping between a wire discriminator and a concrete type.
///
/// The discriminator is written under [`key_field`](TypeMap::key_field) as
/// the first entry of the tagged dictionary.
pub trait TypeMap: Send + Sync + Debug {
    /// The wire key holding the discriminator.
    fn key_field(&self) -> &str;

    /// Resolves a discriminator to a type path.
    fn find_class(&self, id: &str) -> Option<String>;

    /// Finds the discriminator for a type path.
    fn find_identifier(&self, type_path: &str) -> Option<String>;
}

// -----------------------------------------------------------------------------
// StaticTypeMap

/// A fixed table of `identifier => type path` pairs.
///
/// # Examples
///
/// ```
/// use vc_serde::registry::{StaticTypeMap, TypeMap};
///
/// let map = StaticTypeMap::new("shape", [("circle", "Circle"), ("rect", "Rectangle")]);
///
/// assert_eq!(map.key_field(), "shape");
/// assert_eq!(map.find_class("rect").as_deref(), Some("Rectangle"));
/// assert_eq!(map.find_identifier("Circle").as_deref(), Some("circle"));
/// assert_eq!(map.find_class("triangle"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticTypeMap {
    key: String,
    map: Vec<(String, String)>,
}

impl StaticTypeMap {
    pub fn new<I, K, V>(key: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            map: entries
                .into_iter()
                .map(|(id, path)| (id.into(), path.into()))
                .collect(),
        }
    }
}

impl TypeMap for StaticTypeMap {
    #[inline]
    fn key_field(&self) -> &str {
        &self.key
    }

    fn find_class(&self, id: &str) -> Option<String> {
        self.map
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, path)| path.clone())
    }

    fn find_identifier(&self, type_path: &str) -> Option<String> {
        self.map
            .iter()
            .find(|(_, path)| path == type_path)
            .map(|(id, _)| id.clone())
    }
}

// -----------------------------------------------------------------------------
// ClassNameTypeMap

/// Uses the type path itself as the discriminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNameTypeMap {
    key: String,
}

impl ClassNameTypeMap {
    #[inline]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl TypeMap for ClassNameTypeMap {
    #[inline]
    fn key_field(&self) -> &str {
        &self.key
    }

    #[inline]
    fn find_class(&self, id: &str) -> Option<String> {
        Some(String::from(id))
    }

    #[inline]
    fn find_identifier(&self, type_path: &str) -> Option<String> {
        Some(String::from(type_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_name_map_is_identity() {
        let map = ClassNameTypeMap::new("class");
        assert_eq!(map.key_field(), "class");
        assert_eq!(map.find_class("Circle").as_deref(), Some("Circle"));
        assert_eq!(map.find_identifier("Circle").as_deref(), Some("Circle"));
    }

    #[test]
    fn static_map_first_entry_wins() {
        let map = StaticTypeMap::new("t", [("a", "A"), ("a", "B"), ("b", "A")]);
        assert_eq!(map.find_class("a").as_deref(), Some("A"));
        assert_eq!(map.find_identifier("A").as_deref(), Some("a"));
    }
}
