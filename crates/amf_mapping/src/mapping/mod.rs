//! The type registry and the policy resolver.
//!
//! ## Menu
//!
//! - [`MappingSet`]: wire class name ↔ native class name, with per-scope policies.
//! - [`MappingSetArc`]: a [`MappingSet`] shared behind a read-write lock.
//! - [`TypeMapping`]: one registered pair and its policies.
//! - [`MapOptions`]: arguments to [`MappingSet::map`].
//! - [`SerializationPolicy`], [`Include`]: what to emit for one class in one scope.
//! - [`Scope`]: a named policy variant.
//! - [`MappingDecl`]: a mapping written as data.
//!
//! Lookups go through the native class name. Policy resolution falls back from
//! an explicit scope to the mapping's default scope only when no scope is given.

// -----------------------------------------------------------------------------
// Modules

mod decl;
mod mapping_set;
mod options;
mod policy;
mod type_mapping;

// -----------------------------------------------------------------------------
// Exports

pub use decl::{MappingDecl, ScopedList};
pub use mapping_set::MappingSet;
#[cfg(feature = "std")]
pub use mapping_set::MappingSetArc;
pub use options::MapOptions;
pub use policy::{Include, Scope, SerializationPolicy};
pub use type_mapping::TypeMapping;
