//! The class-metadata provider and type maps.

// -----------------------------------------------------------------------------
// Modules

mod type_map;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use type_map::{ClassNameTypeMap, StaticTypeMap, TypeMap};
pub use type_registry::TypeRegistry;
