use alloc::boxed::Box;
use alloc::string::String;

use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// An error raised by application code inside a model hook.
///
/// The marshaler never inspects these, it hands them back to the caller.
pub type HookError = Box<dyn core::error::Error + Send + Sync>;

/// A mapping could not be registered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("mapping requires a native class name")]
    MissingNativeName,

    #[error("mapping requires a wire class name")]
    MissingWireName,

    #[error("class `{0}` must be given a wire class with `as_class` before `map_amf`")]
    MissingAsClass(&'static str),
}

/// A class name could not be resolved to something that can be built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TypeResolutionError {
    #[error("cannot resolve an empty class name")]
    EmptyName,

    #[error("native class `{0}` is mapped but not registered")]
    UnknownClass(String),

    #[error("auto-mapping `{name}` to `{derived}` collides with the existing mapping for `{existing}`")]
    AutoMapCollision {
        name: String,
        derived: String,
        existing: String,
    },
}

/// Non-fatal problem found while populating an object. Logged, never returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PopulationWarning {
    #[error("refusing to call setter `{property}=` on `{class}`: unsafe setter name")]
    UnsafeSetter { class: &'static str, property: String },

    #[error("cannot call setter for non-attribute on `{class}`: {property}")]
    MissingSetter { class: &'static str, property: String },
}

/// Any failure while marshaling one object.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MarshalError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    TypeResolution(#[from] TypeResolutionError),

    #[error("model hook failed: {0}")]
    Hook(#[source] HookError),
}
