use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use super::{FieldDef, TypeCategory};
use crate::error::Fallible;
use crate::registry::TypeMap;
use crate::value::{DynamicObject, EnumValue, ValueMap};

// -----------------------------------------------------------------------------
// Hooks

/// Callback run on a freshly populated object, after every member is set.
#[derive(Clone, Copy)]
pub struct PostLoad(pub fn(&mut DynamicObject));

impl PostLoad {
    #[inline]
    pub fn call(&self, object: &mut DynamicObject) {
        (self.0)(object)
    }
}

impl fmt::Debug for PostLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PostLoad(..)")
    }
}

/// Custom conversion of a class to and from a plain map.
///
/// A class with native hooks bypasses field descriptors entirely.
#[derive(Clone, Copy)]
pub struct NativeHooks {
    pub to_map: fn(&DynamicObject) -> ValueMap,
    pub from_map: fn(&ValueMap) -> Fallible<DynamicObject>,
}

impl fmt::Debug for NativeHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NativeHooks(..)")
    }
}

// -----------------------------------------------------------------------------
// ClassDef

/// Declaration of a class: its ordered fields and class-level metadata.
#[derive(Debug, Clone)]
pub struct ClassDef {
    pub(crate) type_path: String,
    pub(crate) fields: Vec<FieldDef>,
    pub(crate) parents: Vec<String>,
    pub(crate) type_map: Option<Arc<dyn TypeMap>>,
    pub(crate) post_load: Vec<PostLoad>,
    pub(crate) native: Option<NativeHooks>,
}

impl ClassDef {
    pub fn new(type_path: impl Into<String>) -> Self {
        Self {
            type_path: type_path.into(),
            fields: Vec::new(),
            parents: Vec::new(),
            type_map: None,
            post_load: Vec::new(),
            native: None,
        }
    }

    #[inline]
    pub fn type_path(&self) -> &str {
        &self.type_path
    }

    #[inline]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    #[inline]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Declares an interface or parent type this class "is a".
    #[inline]
    pub fn implements(mut self, type_path: impl Into<String>) -> Self {
        self.parents.push(type_path.into());
        self
    }

    /// Class-level type map, used when no registry map covers the class.
    #[inline]
    pub fn type_map(mut self, map: impl TypeMap + 'static) -> Self {
        self.type_map = Some(Arc::new(map));
        self
    }

    #[inline]
    pub fn post_load(mut self, callback: fn(&mut DynamicObject)) -> Self {
        self.post_load.push(PostLoad(callback));
        self
    }

    #[inline]
    pub fn native(mut self, hooks: NativeHooks) -> Self {
        self.native = Some(hooks);
        self
    }
}

// -----------------------------------------------------------------------------
// InterfaceDef

/// An abstract type that classes can implement.
#[derive(Debug, Clone)]
pub struct InterfaceDef {
    pub(crate) type_path: String,
    pub(crate) parents: Vec<String>,
    pub(crate) type_map: Option<Arc<dyn TypeMap>>,
}

impl InterfaceDef {
    pub fn new(type_path: impl Into<String>) -> Self {
        Self {
            type_path: type_path.into(),
            parents: Vec::new(),
            type_map: None,
        }
    }

    #[inline]
    pub fn extends(mut self, type_path: impl Into<String>) -> Self {
        self.parents.push(type_path.into());
        self
    }

    #[inline]
    pub fn type_map(mut self, map: impl TypeMap + 'static) -> Self {
        self.type_map = Some(Arc::new(map));
        self
    }
}

// -----------------------------------------------------------------------------
// EnumDef

/// Backing value of one enum case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CaseValue {
    Unit,
    Int(i64),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumCase {
    name: String,
    value: CaseValue,
}

impl EnumCase {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &CaseValue {
        &self.value
    }
}

/// Declaration of an enum. All cases share one backing kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    type_path: String,
    category: TypeCategory,
    cases: Vec<EnumCase>,
}

impl EnumDef {
    /// An enum without backing values; cases are written by name.
    pub fn unit<I, S>(type_path: impl Into<String>, cases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_path: type_path.into(),
            category: TypeCategory::UnitEnum,
            cases: cases
                .into_iter()
                .map(|name| EnumCase {
                    name: name.into(),
                    value: CaseValue::Unit,
                })
                .collect(),
        }
    }

    pub fn int<I, S>(type_path: impl Into<String>, cases: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        Self {
            type_path: type_path.into(),
            category: TypeCategory::IntEnum,
            cases: cases
                .into_iter()
                .map(|(name, value)| EnumCase {
                    name: name.into(),
                    value: CaseValue::Int(value),
                })
                .collect(),
        }
    }

    pub fn string<I, S, V>(type_path: impl Into<String>, cases: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<String>,
    {
        Self {
            type_path: type_path.into(),
            category: TypeCategory::StringEnum,
            cases: cases
                .into_iter()
                .map(|(name, value)| EnumCase {
                    name: name.into(),
                    value: CaseValue::String(value.into()),
                })
                .collect(),
        }
    }

    #[inline]
    pub fn type_path(&self) -> &str {
        &self.type_path
    }

    /// One of the three enum categories.
    #[inline]
    pub fn category(&self) -> TypeCategory {
        self.category
    }

    #[inline]
    pub fn cases(&self) -> &[EnumCase] {
        &self.cases
    }

    #[inline]
    pub fn case(&self, name: &str) -> Option<&EnumCase> {
        self.cases.iter().find(|c| c.name == name)
    }

    #[inline]
    pub fn case_by_int(&self, value: i64) -> Option<&EnumCase> {
        self.cases.iter().find(|c| c.value == CaseValue::Int(value))
    }

    #[inline]
    pub fn case_by_str(&self, value: &str) -> Option<&EnumCase> {
        self.cases
            .iter()
            .find(|c| matches!(&c.value, CaseValue::String(s) if s == value))
    }

    /// Builds a value of the named case, if it exists.
    pub fn value(&self, name: &str) -> Option<EnumValue> {
        self.case(name)
            .map(|c| EnumValue::new(self.type_path.as_str(), c.name.as_str()))
    }
}

// -----------------------------------------------------------------------------
// TypeDef

/// Any registered type.
#[derive(Debug, Clone)]
pub enum TypeDef {
    Class(ClassDef),
    Interface(InterfaceDef),
    Enum(EnumDef),
    /// A type handled by a dedicated property handler, such as `DateTime`.
    Native(String),
}

impl TypeDef {
    pub fn type_path(&self) -> &str {
        match self {
            TypeDef::Class(def) => &def.type_path,
            TypeDef::Interface(def) => &def.type_path,
            TypeDef::Enum(def) => def.type_path(),
            TypeDef::Native(path) => path,
        }
    }

    /// Direct parents, for `is_a` checks.
    pub fn parents(&self) -> &[String] {
        match self {
            TypeDef::Class(def) => &def.parents,
            TypeDef::Interface(def) => &def.parents,
            TypeDef::Enum(_) | TypeDef::Native(_) => &[],
        }
    }

    /// The type map declared on the type itself.
    pub fn own_type_map(&self) -> Option<&Arc<dyn TypeMap>> {
        match self {
            TypeDef::Class(def) => def.type_map.as_ref(),
            TypeDef::Interface(def) => def.type_map.as_ref(),
            TypeDef::Enum(_) | TypeDef::Native(_) => None,
        }
    }

    pub fn category(&self) -> TypeCategory {
        match self {
            TypeDef::Enum(def) => def.category(),
            TypeDef::Class(_) | TypeDef::Interface(_) | TypeDef::Native(_) => TypeCategory::Object,
        }
    }
}
