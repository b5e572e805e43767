//! The native side of the mapping: what a class must provide to be
//! marshaled, and the registry of classes the marshaler can allocate.
//!
//! ## Menu
//!
//! - [`Model`]: attribute and association access for any native object.
//! - [`Class`]: a model that can be allocated from its native class name.
//! - [`ClassMeta`]: allocation functions plus a [`ClassTrait`] table.
//! - [`Constructor`]: the allocation functions copied out of a [`ClassMeta`].
//! - [`ClassRegistry`], [`ClassRegistryArc`]: the registered classes.
//! - [`FromType`]: builds a [`ClassTrait`] for a concrete class.
//! - ClassTraits:
//!     - [`ClassTraitInit`]: the class populates itself through [`AmfInit`].
//!     - [`ClassTraitHash`]: the class flattens itself through [`AmfHash`].
//!     - [`ClassTraitMessage`]: the class is a framework message.
//!
//! ## auto_register
//!
//! Classes can be submitted at their definition site with
//! [`impl_auto_register!`](crate::impl_auto_register) and collected later
//! with [`ClassRegistry::auto_register`]. Collection uses the [`inventory`]
//! crate and is a no-op on platforms it does not support.
//!
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod class_meta;
mod class_registry;
mod from_type;
mod model;
mod traits;

// -----------------------------------------------------------------------------
// Exports

pub use class_meta::{ClassMeta, ClassTrait, Constructor};
pub use class_registry::ClassRegistry;
#[cfg(feature = "std")]
pub use class_registry::ClassRegistryArc;
pub use from_type::FromType;
pub use model::{AssociationKind, AssociationState, Class, Model};
pub use traits::{AmfHash, ClassTraitHash};
pub use traits::{AmfInit, ClassTraitInit};
pub use traits::ClassTraitMessage;
