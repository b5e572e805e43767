//! The generic serialization strategies and the deferred wrapper.
//!
//! ## Menu
//!
//! - [`Deferred`], [`wrap_all`]: pair native objects with one-off options.
//! - [`serializable_hash`]: flatten a model following a policy.
//! - [`populate_attributes`]: apply inbound properties to a model.
//! - [`is_empty_key`]: new-record check for population hooks.

// -----------------------------------------------------------------------------
// Modules

mod deferred;
mod hash;
mod populate;

// -----------------------------------------------------------------------------
// Exports

pub use deferred::{Deferred, wrap_all};
pub use hash::{serializable_hash, wrap_association};
pub use populate::{is_empty_key, is_safe_setter, populate_attributes};
