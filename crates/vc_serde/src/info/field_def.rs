use alloc::string::String;
use alloc::sync::Arc;

use super::{Rename, TypeDecl, TypeField};
use crate::registry::TypeMap;
use crate::value::Value;

/// Declaration of one member of a class, as registered by the user.
///
/// Turned into a [`FieldDescriptor`](super::FieldDescriptor) the first time
/// the class is described.
///
/// # Examples
///
/// ```
/// use vc_serde::info::{Case, FieldDef, Rename, SequenceField, TypeDecl};
///
/// let tags = FieldDef::new("tags", TypeDecl::Array)
///     .type_field(SequenceField::new().implode_on(","));
/// let owner = FieldDef::new("ownerName", TypeDecl::String)
///     .rename(Rename::Case(Case::Snake))
///     .default("nobody");
///
/// assert_eq!(tags.name(), "tags");
/// assert!(owner.default_value().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub(crate) name: String,
    pub(crate) declared: TypeDecl,
    pub(crate) rename: Option<Rename>,
    pub(crate) default: Option<Value>,
    pub(crate) use_default: bool,
    pub(crate) flatten: bool,
    pub(crate) exclude: bool,
    pub(crate) type_map: Option<Arc<dyn TypeMap>>,
    pub(crate) type_field: Option<TypeField>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, declared: TypeDecl) -> Self {
        Self {
            name: name.into(),
            declared,
            rename: None,
            default: None,
            use_default: true,
            flatten: false,
            exclude: false,
            type_map: None,
            type_field: None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn declared(&self) -> &TypeDecl {
        &self.declared
    }

    #[inline]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Shorthand for `rename(Rename::Literal(name))`.
    #[inline]
    pub fn serialized_name(self, name: impl Into<String>) -> Self {
        self.rename(Rename::Literal(name.into()))
    }

    #[inline]
    pub fn rename(mut self, rename: Rename) -> Self {
        self.rename = Some(rename);
        self
    }

    /// Value used when the key is missing from the source.
    #[inline]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// With `false`, a missing key leaves the member unset even if a
    /// default is declared.
    #[inline]
    pub fn use_default(mut self, use_default: bool) -> Self {
        self.use_default = use_default;
        self
    }

    /// Merge this field's contents into the parent instead of nesting.
    ///
    /// Only `array` and object-typed fields can be flattened.
    #[inline]
    pub fn flatten(mut self) -> Self {
        self.flatten = true;
        self
    }

    /// Never read or write this field.
    #[inline]
    pub fn exclude(mut self) -> Self {
        self.exclude = true;
        self
    }

    #[inline]
    pub fn type_map(self, map: impl TypeMap + 'static) -> Self {
        self.shared_type_map(Arc::new(map))
    }

    #[inline]
    pub fn shared_type_map(mut self, map: Arc<dyn TypeMap>) -> Self {
        self.type_map = Some(map);
        self
    }

    #[inline]
    pub fn type_field(mut self, type_field: impl Into<TypeField>) -> Self {
        self.type_field = Some(type_field.into());
        self
    }
}
