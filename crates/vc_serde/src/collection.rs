//! Format-agnostic containers built while walking a value.
//!
//! Property readers fill a [`Sequence`] or [`Dict`] and hand it to the
//! active formatter, which folds it into its accumulator.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::info::FieldDescriptor;
use crate::value::Value;

/// One `(field, value)` pair of a collection.
#[derive(Debug, Clone)]
pub struct CollectionItem {
    pub field: Arc<FieldDescriptor>,
    pub value: Value,
}

impl CollectionItem {
    #[inline]
    pub fn new(field: impl Into<Arc<FieldDescriptor>>, value: Value) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }
}

/// Positional items.
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    pub items: Vec<CollectionItem>,
}

impl Sequence {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, item: CollectionItem) {
        self.items.push(item);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Keyed items in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Dict {
    pub items: Vec<CollectionItem>,
}

impl Dict {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, item: CollectionItem) {
        self.items.push(item);
    }

    /// Inserts an item ahead of all others.
    ///
    /// Used for type-map discriminators, which must come first.
    #[inline]
    pub fn prepend(&mut self, item: CollectionItem) {
        self.items.insert(0, item);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeRegistry;

    #[test]
    fn prepend_puts_item_first() {
        let registry = TypeRegistry::new();
        let item = |name: &str, value: i64| {
            let value = Value::Int(value);
            let field = FieldDescriptor::for_value(&registry, name, &value).unwrap();
            CollectionItem::new(field, value)
        };

        let mut dict = Dict::new();
        dict.push(item("a", 1));
        dict.push(item("b", 2));
        dict.prepend(item("type", 0));

        let names: Vec<&str> = dict.items.iter().map(|i| i.field.serialized_name()).collect();
        assert_eq!(names, ["type", "a", "b"]);
        assert_eq!(dict.len(), 3);
    }
}
