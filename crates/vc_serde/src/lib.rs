#![doc = include_str!("../README.md")]

// -----------------------------------------------------------------------------
// Compilation config

/// Macros gating code on the enabled features.
pub mod cfg {
    vc_cfg::define_alias! {
        #[cfg(feature = "json")] => json,
        #[cfg(feature = "yaml")] => yaml,
        #[cfg(all(debug_assertions, feature = "debug"))] => debug,
    }
}

// -----------------------------------------------------------------------------
// Crates

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod collection;
pub mod driver;
pub mod engine;
pub mod format;
pub mod handler;
pub mod info;
pub mod record;
pub mod registry;
pub mod value;

mod error;

// -----------------------------------------------------------------------------
// Exports

pub use engine::{Serde, SerdeBuilder};
pub use error::{Direction, Error, Fallible, SerdeError};
pub use format::Wire;
pub use value::{DynamicObject, ObjectRef, Value, ValueMap};
