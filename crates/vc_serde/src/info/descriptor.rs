use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

use super::{ClassDef, FieldDef, PostLoad, TypeCategory, TypeDecl, TypeField};
use crate::error::Error;
use crate::registry::{TypeMap, TypeRegistry};
use crate::value::{Value, ValueMap};

// -----------------------------------------------------------------------------
// FieldDescriptor

/// Resolved, immutable metadata for one value site: a class member, the
/// root of a call, or an array element.
///
/// The category is derived from the declared type once, when the
/// descriptor is built, and declaration errors surface at that point.
/// Class members are cached by [`TypeRegistry::describe`]; synthetic
/// descriptors for roots and elements are built per call.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: String,
    serialized_name: String,
    declared: TypeDecl,
    category: TypeCategory,
    default: Option<Value>,
    use_default: bool,
    flatten: bool,
    type_map: Option<Arc<dyn TypeMap>>,
    type_field: Option<TypeField>,
    extra_properties: ValueMap,
}

impl FieldDescriptor {
    /// Resolves a member declaration of `owner`.
    pub fn from_def(registry: &TypeRegistry, owner: &str, def: &FieldDef) -> Result<Self, Error> {
        match &def.declared {
            TypeDecl::Union(_) => {
                return Err(Error::UnionTypesNotSupported {
                    class: owner.to_string(),
                    field: def.name.clone(),
                });
            }
            TypeDecl::Intersection(_) => {
                return Err(Error::IntersectionTypesNotSupported {
                    class: owner.to_string(),
                    field: def.name.clone(),
                });
            }
            _ => {}
        }

        let category = registry.category_of(&def.declared)?;

        if let Some(type_field) = &def.type_field
            && !type_field.accepts(&def.declared)
        {
            return Err(Error::FieldTypeIncompatible {
                directive: type_field.directive(),
                type_path: def.declared.to_string(),
            });
        }

        if def.flatten && !category.is_compound() {
            return Err(Error::InvalidFlatten {
                class: owner.to_string(),
                field: def.name.clone(),
            });
        }

        let serialized_name = match &def.rename {
            Some(rename) => rename.apply(&def.name),
            None => def.name.clone(),
        };

        let type_map = def
            .type_map
            .clone()
            .or_else(|| inherited_type_map(registry, &def.declared, category));

        Ok(Self {
            name: def.name.clone(),
            serialized_name,
            declared: def.declared.clone(),
            category,
            default: def.default.clone(),
            use_default: def.use_default,
            flatten: def.flatten,
            type_map,
            type_field: def.type_field.clone(),
            extra_properties: ValueMap::new(),
        })
    }

    /// A field that is not a class member, named `name` on the wire.
    pub fn synthetic(
        registry: &TypeRegistry,
        name: impl Into<String>,
        declared: TypeDecl,
        extra_properties: ValueMap,
    ) -> Result<Self, Error> {
        let category = registry.category_of(&declared)?;
        let name = name.into();
        Ok(Self {
            serialized_name: name.clone(),
            name,
            type_map: inherited_type_map(registry, &declared, category),
            declared,
            category,
            default: None,
            use_default: false,
            flatten: false,
            type_field: None,
            extra_properties,
        })
    }

    /// The field every top-level call starts from.
    #[inline]
    pub fn root(registry: &TypeRegistry, type_path: &str) -> Result<Self, Error> {
        Self::synthetic(registry, "root", TypeDecl::named(type_path), ValueMap::new())
    }

    /// A synthetic field typed by the runtime type of `value`.
    #[inline]
    pub fn for_value(
        registry: &TypeRegistry,
        name: impl Into<String>,
        value: &Value,
    ) -> Result<Self, Error> {
        Self::synthetic(registry, name, TypeDecl::of_value(value), ValueMap::new())
    }

    /// Descriptor for one element of this array field, on the write-out
    /// path. The element is typed by its runtime value.
    ///
    /// A polymorphic object element carries its discriminator as an extra
    /// property instead of a type map, so it is written first.
    pub fn element_for_value(
        &self,
        registry: &TypeRegistry,
        key: impl Into<String>,
        value: &Value,
    ) -> Result<Self, Error> {
        let mut element = Self::for_value(registry, key, value)?;
        if element.category == TypeCategory::Object && self.type_map.is_some() {
            element.type_map.clone_from(&self.type_map);
        }

        let (Some(map), Value::Object(object)) = (element.type_map.take(), value) else {
            return Ok(element);
        };
        let type_path = object.type_path();
        let Some(id) = map.find_identifier(&type_path) else {
            return Err(Error::MissingTypeIdentifier {
                key_field: String::from(map.key_field()),
                type_path,
            });
        };
        let mut extra = ValueMap::with_capacity(1);
        extra.insert(String::from(map.key_field()), Value::String(id));
        Ok(element.with_extra_properties(extra))
    }

    /// Descriptor for one element of this array field, on the read-in path.
    ///
    /// The declared element type wins, then this field's type map, then
    /// the shape of the decoded element itself.
    pub fn element_for_data(
        &self,
        registry: &TypeRegistry,
        key: impl Into<String>,
        data: &Value,
    ) -> Result<Self, Error> {
        let array_type = self.type_field.as_ref().and_then(TypeField::array_type);

        let mut element = match array_type {
            Some(array_type) => {
                Self::synthetic(registry, key, TypeDecl::named(array_type), ValueMap::new())?
            }
            None if self.type_map.is_some() && matches!(data, Value::Map(_)) => {
                Self::synthetic(registry, key, TypeDecl::Object, ValueMap::new())?
            }
            None => Self::for_value(registry, key, data)?,
        };

        if element.category == TypeCategory::Object && self.type_map.is_some() {
            element.type_map.clone_from(&self.type_map);
        }
        Ok(element)
    }

    #[inline]
    pub fn with_extra_properties(mut self, extra_properties: ValueMap) -> Self {
        self.extra_properties = extra_properties;
        self
    }

    /// Member name on the host object.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key on the wire.
    #[inline]
    pub fn serialized_name(&self) -> &str {
        &self.serialized_name
    }

    #[inline]
    pub fn declared(&self) -> &TypeDecl {
        &self.declared
    }

    #[inline]
    pub fn category(&self) -> TypeCategory {
        self.category
    }

    #[inline]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// A missing key is filled from the default rather than left unset.
    #[inline]
    pub fn should_use_default(&self) -> bool {
        self.use_default && self.default.is_some()
    }

    #[inline]
    pub fn is_flatten(&self) -> bool {
        self.flatten
    }

    #[inline]
    pub fn type_map(&self) -> Option<&dyn TypeMap> {
        self.type_map.as_deref()
    }

    #[inline]
    pub fn type_field(&self) -> Option<&TypeField> {
        self.type_field.as_ref()
    }

    /// Literal entries written alongside this field's own data.
    #[inline]
    pub fn extra_properties(&self) -> &ValueMap {
        &self.extra_properties
    }
}

fn inherited_type_map(
    registry: &TypeRegistry,
    declared: &TypeDecl,
    category: TypeCategory,
) -> Option<Arc<dyn TypeMap>> {
    if category != TypeCategory::Object {
        return None;
    }
    declared.type_path().and_then(|path| registry.type_map_for(path))
}

// -----------------------------------------------------------------------------
// ClassDescriptor

/// The resolved fields and hooks of one class.
#[derive(Debug)]
pub struct ClassDescriptor {
    type_path: String,
    fields: Vec<Arc<FieldDescriptor>>,
    post_load: Vec<PostLoad>,
}

impl ClassDescriptor {
    pub(crate) fn build(registry: &TypeRegistry, def: &ClassDef) -> Result<Self, Error> {
        let mut fields = Vec::with_capacity(def.fields.len());
        for field in def.fields.iter().filter(|f| !f.exclude) {
            fields.push(Arc::new(FieldDescriptor::from_def(registry, &def.type_path, field)?));
        }

        let collecting = fields
            .iter()
            .filter(|f| f.flatten && f.category == TypeCategory::Array)
            .count();
        if collecting > 1 {
            log::warn!(
                "`{}` flattens {collecting} array fields; only the last one collects leftover keys",
                def.type_path,
            );
        }

        Ok(Self {
            type_path: def.type_path.clone(),
            fields,
            post_load: def.post_load.clone(),
        })
    }

    #[inline]
    pub fn type_path(&self) -> &str {
        &self.type_path
    }

    /// Non-excluded fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[Arc<FieldDescriptor>] {
        &self.fields
    }

    #[inline]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name).map(Arc::as_ref)
    }

    #[inline]
    pub fn post_load(&self) -> &[PostLoad] {
        &self.post_load
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{Case, DictionaryField, EnumDef, InterfaceDef, Rename, SequenceField};
    use crate::registry::StaticTypeMap;
    use crate::value::DynamicObject;
    use alloc::vec;

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register_enum(EnumDef::unit("Suit", ["Hearts", "Spades"]));
        registry.register_enum(EnumDef::int("Level", [("Low", 1)]));
        registry.register_class(ClassDef::new("Point"));
        registry.register_interface(InterfaceDef::new("Shape"));
        registry.register_class(ClassDef::new("Circle").implements("Shape"));
        registry.register_type_map(
            "Shape",
            StaticTypeMap::new("shape", [("circle", "Circle")]),
        );
        registry
    }

    #[test]
    fn categories_and_names() {
        let registry = registry();
        let field = |def: FieldDef| FieldDescriptor::from_def(&registry, "Owner", &def).unwrap();

        let f = field(FieldDef::new("firstName", TypeDecl::String).rename(Rename::Case(Case::Snake)));
        assert_eq!(f.category(), TypeCategory::Scalar);
        assert_eq!(f.name(), "firstName");
        assert_eq!(f.serialized_name(), "first_name");

        assert_eq!(field(FieldDef::new("s", TypeDecl::named("Suit"))).category(), TypeCategory::UnitEnum);
        assert_eq!(field(FieldDef::new("l", TypeDecl::named("Level"))).category(), TypeCategory::IntEnum);
        assert_eq!(field(FieldDef::new("p", TypeDecl::named("Point"))).category(), TypeCategory::Object);
        assert_eq!(field(FieldDef::new("a", TypeDecl::Array)).category(), TypeCategory::Array);
        assert_eq!(field(FieldDef::new("d", TypeDecl::named("DateTime"))).category(), TypeCategory::Object);
    }

    #[test]
    fn default_policy() {
        let registry = registry();
        let with_default = FieldDef::new("y", TypeDecl::Int).default(0);
        let f = FieldDescriptor::from_def(&registry, "Point", &with_default).unwrap();
        assert!(f.should_use_default());

        let f = FieldDescriptor::from_def(&registry, "Point", &with_default.use_default(false)).unwrap();
        assert!(!f.should_use_default());

        let f = FieldDescriptor::from_def(&registry, "Point", &FieldDef::new("y", TypeDecl::Int)).unwrap();
        assert!(!f.should_use_default());
    }

    #[test]
    fn declaration_errors() {
        let registry = registry();

        let union = FieldDef::new("v", TypeDecl::Union(vec![TypeDecl::Int, TypeDecl::String]));
        let err = FieldDescriptor::from_def(&registry, "Holder", &union).unwrap_err();
        assert!(matches!(err, Error::UnionTypesNotSupported { ref class, ref field } if class == "Holder" && field == "v"));

        let inter = FieldDef::new("v", TypeDecl::Intersection(vec![TypeDecl::named("Point")]));
        let err = FieldDescriptor::from_def(&registry, "Holder", &inter).unwrap_err();
        assert!(matches!(err, Error::IntersectionTypesNotSupported { .. }));

        let unknown = FieldDef::new("v", TypeDecl::named("Nope"));
        let err = FieldDescriptor::from_def(&registry, "Holder", &unknown).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { ref type_path } if type_path == "Nope"));

        let untyped = FieldDef::new("v", TypeDecl::Unspecified);
        assert!(FieldDescriptor::from_def(&registry, "Holder", &untyped).is_err());

        let bad_directive = FieldDef::new("v", TypeDecl::String).type_field(DictionaryField::new());
        let err = FieldDescriptor::from_def(&registry, "Holder", &bad_directive).unwrap_err();
        assert!(matches!(err, Error::FieldTypeIncompatible { directive: "DictionaryField", .. }));

        let bad_flatten = FieldDef::new("v", TypeDecl::Int).flatten();
        let err = FieldDescriptor::from_def(&registry, "Holder", &bad_flatten).unwrap_err();
        assert!(matches!(err, Error::InvalidFlatten { .. }));
    }

    #[test]
    fn type_map_binding() {
        let registry = registry();

        let f = FieldDescriptor::from_def(&registry, "Holder", &FieldDef::new("s", TypeDecl::named("Shape"))).unwrap();
        assert_eq!(f.type_map().map(TypeMap::key_field), Some("shape"));

        let own = FieldDef::new("s", TypeDecl::named("Shape")).type_map(StaticTypeMap::new("kind", [("c", "Circle")]));
        let f = FieldDescriptor::from_def(&registry, "Holder", &own).unwrap();
        assert_eq!(f.type_map().map(TypeMap::key_field), Some("kind"));

        let f = FieldDescriptor::root(&registry, "Circle").unwrap();
        assert_eq!(f.serialized_name(), "root");
        assert_eq!(f.type_map().map(TypeMap::key_field), Some("shape"));

        let f = FieldDescriptor::root(&registry, "Point").unwrap();
        assert!(f.type_map().is_none());
    }

    #[test]
    fn element_descriptors() {
        let registry = registry();
        let list = FieldDescriptor::from_def(
            &registry,
            "Holder",
            &FieldDef::new("shapes", TypeDecl::Array).type_field(SequenceField::of("Shape")),
        )
        .unwrap();

        let element = list.element_for_data(&registry, "0", &Value::Map(ValueMap::new())).unwrap();
        assert_eq!(element.serialized_name(), "0");
        assert!(element.declared().is_named("Shape"));
        assert!(element.type_map().is_some());

        let untyped = FieldDescriptor::from_def(&registry, "Holder", &FieldDef::new("any", TypeDecl::Array)).unwrap();
        let element = untyped.element_for_data(&registry, "k", &Value::Int(1)).unwrap();
        assert_eq!(element.declared(), &TypeDecl::Int);
        assert_eq!(element.category(), TypeCategory::Scalar);

        let circle = Value::Object(DynamicObject::new("Circle").into_ref());
        let element = list.element_for_value(&registry, "0", &circle).unwrap();
        assert!(element.type_map().is_none());
        assert_eq!(element.extra_properties().get("shape"), Some(&Value::from("circle")));

        let point = Value::Object(DynamicObject::new("Point").into_ref());
        let element = list.element_for_value(&registry, "1", &point).unwrap();
        assert!(element.extra_properties().is_empty());
    }

    #[test]
    fn unmapped_element_cannot_be_tagged() {
        let mut registry = registry();
        registry.register_class(ClassDef::new("Blob").implements("Shape"));
        let list = FieldDescriptor::from_def(&registry, "Holder", &FieldDef::new("any", TypeDecl::Array)).unwrap();

        let blob = Value::Object(DynamicObject::new("Blob").into_ref());
        let err = list.element_for_value(&registry, "0", &blob).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingTypeIdentifier { ref key_field, ref type_path }
                if key_field == "shape" && type_path == "Blob"
        ));
    }

    #[test]
    fn class_descriptor_skips_excluded() {
        let mut registry = registry();
        registry.register_class(
            ClassDef::new("Account")
                .field(FieldDef::new("id", TypeDecl::Int))
                .field(FieldDef::new("secret", TypeDecl::String).exclude()),
        );
        let class = registry.describe("Account").unwrap();
        assert_eq!(class.fields().len(), 1);
        assert!(class.field("secret").is_none());
    }
}
