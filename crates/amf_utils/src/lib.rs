#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod case;
pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use case::{camelize_lower, underscore};
pub use typeid_map::TypeIdMap;
