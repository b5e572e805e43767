use crate::class::{Class, ClassTrait, FromType, Model};
use crate::config::Configuration;
use crate::error::HookError;
use crate::mapping::SerializationPolicy;
use crate::value::PropertyMap;

// -----------------------------------------------------------------------------
// AmfHash

/// Custom flattening for serialization.
///
/// `options` is the resolved policy for the current scope, or the per-call
/// override from a [`Deferred`](crate::serialization::Deferred). An
/// implementation may rewrite `options.include` to report which associations
/// it actually included.
///
/// [`serializable_hash`](crate::serialization::serializable_hash) is the
/// generic strategy and can be called from an implementation to extend it.
pub trait AmfHash {
    fn amf_hash(
        &self,
        options: &mut SerializationPolicy,
        config: &Configuration,
    ) -> Result<PropertyMap, HookError>;
}

// -----------------------------------------------------------------------------
// ClassTraitHash

/// A container providing [`AmfHash`] support for registered classes.
#[derive(Clone, Copy)]
pub struct ClassTraitHash {
    func: fn(&dyn Model, &mut SerializationPolicy, &Configuration) -> Result<PropertyMap, HookError>,
}

impl ClassTraitHash {
    /// Calls the class's [`AmfHash::amf_hash`] on `model`.
    #[inline(always)]
    pub fn hash(
        &self,
        model: &dyn Model,
        options: &mut SerializationPolicy,
        config: &Configuration,
    ) -> Result<PropertyMap, HookError> {
        (self.func)(model, options, config)
    }
}

impl ClassTrait for ClassTraitHash {}

impl<T: Class + AmfHash> FromType<T> for ClassTraitHash {
    fn from_type() -> Self {
        Self {
            func: |model, options, config| match model.downcast_ref::<T>() {
                Some(model) => model.amf_hash(options, config),
                None => Err(HookError::from("hash hook applied to a model of another class")),
            },
        }
    }
}
