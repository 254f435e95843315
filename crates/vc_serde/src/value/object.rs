use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Value, ValueMap};

// -----------------------------------------------------------------------------
// DynamicObject

/// An instance of a registered class.
///
/// Members that were never set are absent from the field map, so an object
/// may be partially initialized. Use [`DynamicObject::is_set`] before relying
/// on a member that has no default.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicObject {
    type_path: String,
    fields: ValueMap,
}

impl DynamicObject {
    /// Creates an object of `type_path` with every member unset.
    #[inline]
    pub fn new(type_path: impl Into<String>) -> Self {
        Self {
            type_path: type_path.into(),
            fields: ValueMap::new(),
        }
    }

    /// Builder form of [`DynamicObject::set`].
    #[inline]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    #[inline]
    pub fn type_path(&self) -> &str {
        &self.type_path
    }

    /// Sets a member, returning the previous value if there was one.
    #[inline]
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    /// Unsets a member, keeping the order of the others.
    #[inline]
    pub fn unset(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }

    #[inline]
    pub fn is_set(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    #[inline]
    pub fn fields(&self) -> &ValueMap {
        &self.fields
    }

    #[inline]
    pub fn into_fields(self) -> ValueMap {
        self.fields
    }

    #[inline]
    pub fn into_ref(self) -> ObjectRef {
        ObjectRef::new(self)
    }
}

// -----------------------------------------------------------------------------
// ObjectRef

/// A shared handle to a [`DynamicObject`].
///
/// Clones point at the same object. [`ObjectRef::ptr_eq`] compares identity,
/// while `==` compares contents.
#[derive(Clone)]
pub struct ObjectRef(Arc<RwLock<DynamicObject>>);

impl ObjectRef {
    #[inline]
    pub fn new(object: DynamicObject) -> Self {
        Self(Arc::new(RwLock::new(object)))
    }

    /// Returns `true` if both handles refer to the same object.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }

    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, DynamicObject> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, DynamicObject> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    pub fn type_path(&self) -> String {
        String::from(self.read().type_path())
    }

    /// Clones a member out of the object.
    #[inline]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.read().get(name).cloned()
    }

    #[inline]
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.write().set(name, value)
    }

    /// Clones the current state of the object.
    #[inline]
    pub fn snapshot(&self) -> DynamicObject {
        self.read().clone()
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        ObjectRef::ptr_eq(self, other) || *self.read() == *other.read()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_read() {
            Ok(object) => fmt::Debug::fmt(&*object, f),
            Err(_) => write!(f, "ObjectRef(<locked>)"),
        }
    }
}

impl From<DynamicObject> for ObjectRef {
    #[inline]
    fn from(value: DynamicObject) -> Self {
        ObjectRef::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_members_are_absent() {
        let mut point = DynamicObject::new("Point").with("x", 3);
        assert!(point.is_set("x"));
        assert!(!point.is_set("y"));

        point.set("y", 4);
        assert_eq!(point.get("y"), Some(&Value::Int(4)));
        assert_eq!(point.unset("x"), Some(Value::Int(3)));
        assert_eq!(point.fields().len(), 1);
    }

    #[test]
    fn identity_and_equality() {
        let a = DynamicObject::new("Point").with("x", 1).into_ref();
        let b = DynamicObject::new("Point").with("x", 1).into_ref();
        let c = a.clone();

        assert!(ObjectRef::ptr_eq(&a, &c));
        assert!(!ObjectRef::ptr_eq(&a, &b));
        assert_eq!(a, b);

        c.set("x", 2);
        assert_eq!(a.get("x"), Some(Value::Int(2)));
        assert_ne!(a, b);
    }
}
