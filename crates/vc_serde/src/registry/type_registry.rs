use alloc::borrow::ToOwned;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::{PoisonError, RwLock};

use vc_utils::hash::HashMap;

use super::TypeMap;
use crate::error::Error;
use crate::info::{
    ClassDef, ClassDescriptor, DATE_TIME, EnumDef, InterfaceDef, TIME_ZONE, TypeCategory,
    TypeDecl, TypeDef,
};
use crate::record::Record;

// -----------------------------------------------------------------------------
// TypeRegistry

/// The store of registered types, registry-level type maps and resolved
/// class descriptors.
///
/// Descriptors are built lazily by [`describe`](TypeRegistry::describe) and
/// cached. The cache is safe for concurrent readers; every registration
/// clears it.
///
/// # Examples
///
/// ```
/// use vc_serde::info::{ClassDef, FieldDef, TypeDecl};
/// use vc_serde::registry::TypeRegistry;
///
/// let mut registry = TypeRegistry::new();
/// registry.register_class(
///     ClassDef::new("Point")
///         .field(FieldDef::new("x", TypeDecl::Int))
///         .field(FieldDef::new("y", TypeDecl::Int).default(0)),
/// );
///
/// let point = registry.describe("Point").unwrap();
/// assert_eq!(point.fields().len(), 2);
/// assert!(point.fields()[1].should_use_default());
/// ```
#[derive(Debug)]
pub struct TypeRegistry {
    types: HashMap<String, TypeDef>,
    type_maps: Vec<(String, Arc<dyn TypeMap>)>,
    descriptors: RwLock<HashMap<String, Arc<ClassDescriptor>>>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create an empty [`TypeRegistry`].
    pub fn empty() -> Self {
        Self {
            types: HashMap::default(),
            type_maps: Vec::new(),
            descriptors: RwLock::new(HashMap::default()),
        }
    }

    /// Create a registry with the native types registered:
    /// [`DATE_TIME`] and [`TIME_ZONE`].
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_native(DATE_TIME);
        registry.register_native(TIME_ZONE);
        registry
    }

    fn insert(&mut self, def: TypeDef) {
        self.descriptors
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.types.insert(def.type_path().to_owned(), def);
    }

    /// Registers or replaces a class.
    #[inline]
    pub fn register_class(&mut self, def: ClassDef) {
        self.insert(TypeDef::Class(def));
    }

    #[inline]
    pub fn register_interface(&mut self, def: InterfaceDef) {
        self.insert(TypeDef::Interface(def));
    }

    #[inline]
    pub fn register_enum(&mut self, def: EnumDef) {
        self.insert(TypeDef::Enum(def));
    }

    /// Registers a type handled entirely by a dedicated property handler.
    #[inline]
    pub fn register_native(&mut self, type_path: impl Into<String>) {
        self.insert(TypeDef::Native(type_path.into()));
    }

    /// Registers the class declared by a [`Record`] implementation.
    #[inline]
    pub fn register_record<T: Record>(&mut self) {
        self.register_class(T::class_def());
    }

    /// Binds a type map to `type_path` and everything that "is a" `type_path`.
    ///
    /// Registry maps take precedence over class-level maps, and earlier
    /// registrations over later ones.
    pub fn register_type_map(&mut self, type_path: impl Into<String>, map: impl TypeMap + 'static) {
        self.descriptors
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.type_maps.push((type_path.into(), Arc::new(map)));
    }

    #[inline]
    pub fn contains(&self, type_path: &str) -> bool {
        self.types.contains_key(type_path)
    }

    #[inline]
    pub fn get(&self, type_path: &str) -> Option<&TypeDef> {
        self.types.get(type_path)
    }

    #[inline]
    pub fn class(&self, type_path: &str) -> Option<&ClassDef> {
        match self.types.get(type_path) {
            Some(TypeDef::Class(def)) => Some(def),
            _ => None,
        }
    }

    #[inline]
    pub fn enum_def(&self, type_path: &str) -> Option<&EnumDef> {
        match self.types.get(type_path) {
            Some(TypeDef::Enum(def)) => Some(def),
            _ => None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// `type_path` followed by every transitive parent, nearest first.
    fn lineage<'a>(&'a self, type_path: &'a str) -> Vec<&'a str> {
        let mut lineage = Vec::from([type_path]);
        let mut index = 0;
        while index < lineage.len() {
            if let Some(def) = self.types.get(lineage[index]) {
                for parent in def.parents() {
                    if !lineage.contains(&parent.as_str()) {
                        lineage.push(parent);
                    }
                }
            }
            index += 1;
        }
        lineage
    }

    /// Returns `true` if `type_path` is `ancestor` or transitively declares it.
    #[inline]
    pub fn is_a(&self, type_path: &str, ancestor: &str) -> bool {
        self.lineage(type_path).contains(&ancestor)
    }

    /// The type map governing `type_path`, if any.
    ///
    /// Registry maps bound to the type or any ancestor come first, then the
    /// nearest class-level or interface-level map.
    pub fn type_map_for(&self, type_path: &str) -> Option<Arc<dyn TypeMap>> {
        let lineage = self.lineage(type_path);

        if let Some((_, map)) = self
            .type_maps
            .iter()
            .find(|(key, _)| lineage.contains(&key.as_str()))
        {
            return Some(map.clone());
        }

        lineage
            .iter()
            .find_map(|path| self.types.get(*path).and_then(TypeDef::own_type_map))
            .cloned()
    }

    /// Classifies a declared type.
    pub fn category_of(&self, declared: &TypeDecl) -> Result<TypeCategory, Error> {
        match declared {
            TypeDecl::Int | TypeDecl::Float | TypeDecl::Bool | TypeDecl::String | TypeDecl::Null => {
                Ok(TypeCategory::Scalar)
            }
            TypeDecl::Array => Ok(TypeCategory::Array),
            TypeDecl::Object => Ok(TypeCategory::Object),
            TypeDecl::Named(path) => {
                self.types
                    .get(path.as_str())
                    .map(TypeDef::category)
                    .ok_or_else(|| Error::UnsupportedType {
                        type_path: path.clone(),
                    })
            }
            TypeDecl::Union(_) | TypeDecl::Intersection(_) | TypeDecl::Unspecified => {
                Err(Error::UnsupportedType {
                    type_path: declared.to_string(),
                })
            }
        }
    }

    /// Resolves the fields of a class, building and caching them on first use.
    ///
    /// Fails with [`Error::UnsupportedType`] for anything that is not a
    /// registered class, and with the declaration errors of its fields.
    pub fn describe(&self, type_path: &str) -> Result<Arc<ClassDescriptor>, Error> {
        if let Some(found) = self
            .descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(type_path)
        {
            return Ok(found.clone());
        }

        let Some(TypeDef::Class(def)) = self.types.get(type_path) else {
            return Err(Error::UnsupportedType {
                type_path: type_path.to_owned(),
            });
        };

        let built = Arc::new(ClassDescriptor::build(self, def)?);
        log::trace!("described `{type_path}` with {} fields", built.fields().len());

        let mut cache = self
            .descriptors
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(cache.entry(type_path.to_owned()).or_insert(built).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::FieldDef;
    use crate::registry::{ClassNameTypeMap, StaticTypeMap};

    fn shapes() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register_interface(InterfaceDef::new("Shape"));
        registry.register_interface(InterfaceDef::new("RoundShape").extends("Shape"));
        registry.register_class(ClassDef::new("Circle").implements("RoundShape"));
        registry.register_class(ClassDef::new("Rectangle").implements("Shape"));
        registry
    }

    #[test]
    fn natives_are_preregistered() {
        assert!(TypeRegistry::new().contains(DATE_TIME));
        assert!(TypeRegistry::new().contains(TIME_ZONE));
        assert!(!TypeRegistry::empty().contains(DATE_TIME));
    }

    #[test]
    fn transitive_is_a() {
        let registry = shapes();
        assert!(registry.is_a("Circle", "Circle"));
        assert!(registry.is_a("Circle", "Shape"));
        assert!(registry.is_a("Rectangle", "Shape"));
        assert!(!registry.is_a("Rectangle", "RoundShape"));
        assert!(!registry.is_a("Shape", "Circle"));
    }

    #[test]
    fn cyclic_parents_terminate() {
        let mut registry = TypeRegistry::empty();
        registry.register_interface(InterfaceDef::new("A").extends("B"));
        registry.register_interface(InterfaceDef::new("B").extends("A"));
        assert!(registry.is_a("A", "B"));
        assert!(!registry.is_a("A", "C"));
    }

    #[test]
    fn registry_maps_precede_class_maps() {
        let mut registry = shapes();
        registry.register_class(
            ClassDef::new("Square")
                .implements("Shape")
                .type_map(ClassNameTypeMap::new("class")),
        );
        assert_eq!(
            registry.type_map_for("Square").map(|m| m.key_field().to_owned()),
            Some("class".to_owned())
        );

        registry.register_type_map("Shape", StaticTypeMap::new("shape", [("sq", "Square")]));
        assert_eq!(
            registry.type_map_for("Square").map(|m| m.key_field().to_owned()),
            Some("shape".to_owned())
        );
        assert!(registry.type_map_for("Circle").is_some());
        assert!(registry.type_map_for(DATE_TIME).is_none());
    }

    #[test]
    fn interface_maps_are_inherited() {
        let mut registry = TypeRegistry::new();
        registry.register_interface(
            InterfaceDef::new("Shape").type_map(StaticTypeMap::new("kind", [("c", "Circle")])),
        );
        registry.register_class(ClassDef::new("Circle").implements("Shape"));
        assert_eq!(
            registry.type_map_for("Circle").map(|m| m.key_field().to_owned()),
            Some("kind".to_owned())
        );
    }

    #[test]
    fn describe_caches_until_registration() {
        let mut registry = TypeRegistry::new();
        registry.register_class(ClassDef::new("Point").field(FieldDef::new("x", TypeDecl::Int)));

        let first = registry.describe("Point").unwrap();
        let second = registry.describe("Point").unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        registry.register_class(
            ClassDef::new("Point")
                .field(FieldDef::new("x", TypeDecl::Int))
                .field(FieldDef::new("y", TypeDecl::Int)),
        );
        assert_eq!(registry.describe("Point").unwrap().fields().len(), 2);
    }

    #[test]
    fn describe_rejects_non_classes() {
        let registry = shapes();
        assert!(matches!(
            registry.describe("Shape"),
            Err(Error::UnsupportedType { .. })
        ));
        assert!(matches!(
            registry.describe("Missing"),
            Err(Error::UnsupportedType { .. })
        ));
    }

    #[test]
    fn categories() {
        let mut registry = TypeRegistry::new();
        registry.register_enum(EnumDef::string("Size", [("Small", "S")]));
        assert_eq!(registry.category_of(&TypeDecl::Null).unwrap(), TypeCategory::Scalar);
        assert_eq!(
            registry.category_of(&TypeDecl::named("Size")).unwrap(),
            TypeCategory::StringEnum
        );
        assert!(registry.category_of(&TypeDecl::Unspecified).is_err());
    }
}
