//! The object marshaler the codec calls for every object.
//!
//! ## Menu
//!
//! - [`ClassMapper`]: the codec-facing operations.
//! - [`ClassMapping`]: the marshaler, backed by shared mappings, classes and
//!   configuration.
//! - [`Instance`]: an inbound object, native or typed.
//! - [`transform`]: case translation and ignore-field removal.

// -----------------------------------------------------------------------------
// Modules

mod class_mapper;
#[cfg(feature = "std")]
mod class_mapping;

pub mod transform;

// -----------------------------------------------------------------------------
// Exports

pub use class_mapper::{ClassMapper, Instance};
#[cfg(feature = "std")]
pub use class_mapping::ClassMapping;
