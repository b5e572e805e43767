#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod class;
pub mod config;
pub mod error;
pub mod mapper;
pub mod mapping;
pub mod messages;
pub mod serialization;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use config::Configuration;
pub use error::{ConfigurationError, MarshalError, PopulationWarning, TypeResolutionError};
pub use mapper::{ClassMapper, Instance};
pub use mapping::{MapOptions, MappingSet, Scope, SerializationPolicy};
pub use serialization::Deferred;
pub use value::{PropertyMap, Value};

#[cfg(feature = "std")]
pub use {config::ConfigArc, mapper::ClassMapping, mapping::MappingSetArc};
