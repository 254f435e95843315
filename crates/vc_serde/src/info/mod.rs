//! Declarations and resolved metadata for the types being (de)serialized.
//!
//! # Menu
//!
//! - Declarations, registered by the user:
//!   [`ClassDef`], [`FieldDef`], [`EnumDef`], [`InterfaceDef`], [`TypeDef`].
//! - Declared types: [`TypeDecl`], classified into a [`TypeCategory`].
//! - Directives: [`Rename`], [`TypeField`] ([`SequenceField`], [`DictionaryField`]).
//! - Resolved metadata: [`FieldDescriptor`], [`ClassDescriptor`].

// -----------------------------------------------------------------------------
// Modules

mod category;
mod class_def;
mod descriptor;
mod field_def;
mod rename;
mod type_decl;
mod type_field;

// -----------------------------------------------------------------------------
// Exports

pub use category::TypeCategory;
pub use class_def::{
    CaseValue, ClassDef, EnumCase, EnumDef, InterfaceDef, NativeHooks, PostLoad, TypeDef,
};
pub use descriptor::{ClassDescriptor, FieldDescriptor};
pub use field_def::FieldDef;
pub use rename::{Case, Rename};
pub use type_decl::{DATE_TIME, TIME_ZONE, TypeDecl};
pub use type_field::{DictionaryField, SequenceField, TypeField};
