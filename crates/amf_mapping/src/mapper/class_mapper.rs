use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;

use crate::class::Model;
use crate::error::MarshalError;
use crate::value::{PropertyMap, TypedObject, Value};

// -----------------------------------------------------------------------------
// Instance

/// An object built for an inbound wire class.
#[derive(Debug)]
pub enum Instance {
    /// An instance of a registered native class.
    Object(Box<dyn Model>),
    /// No native class claims the wire class, the name is kept on the object.
    Typed(TypedObject),
}

impl Instance {
    /// Returns the native object, if there is one.
    #[inline]
    pub fn as_model(&self) -> Option<&dyn Model> {
        match self {
            Self::Object(model) => Some(model.as_ref()),
            Self::Typed(_) => None,
        }
    }

    #[inline]
    pub fn downcast_ref<T: Model>(&self) -> Option<&T> {
        match self {
            Self::Object(model) => model.downcast_ref::<T>(),
            Self::Typed(_) => None,
        }
    }

    #[inline]
    pub fn as_typed(&self) -> Option<&TypedObject> {
        match self {
            Self::Typed(typed) => Some(typed),
            Self::Object(_) => None,
        }
    }

    /// Converts the populated instance into a [`Value`].
    pub fn into_value(self) -> Value {
        match self {
            Self::Object(model) => Value::Object(Arc::from(model)),
            Self::Typed(typed) => Value::Typed(typed),
        }
    }
}

// -----------------------------------------------------------------------------
// ClassMapper

/// The operations a codec calls for every object it encodes or decodes.
///
/// Decoding calls [`instantiate`](ClassMapper::instantiate) with the wire
/// class name, then [`populate`](ClassMapper::populate) with the decoded
/// properties. Encoding calls
/// [`wire_type_name_of`](ClassMapper::wire_type_name_of) and
/// [`properties_for`](ClassMapper::properties_for) for the same value.
pub trait ClassMapper {
    /// Returns the wire class name for an outbound value.
    ///
    /// `None` means the value is encoded as an anonymous object.
    fn wire_type_name_of(&self, value: &Value) -> Result<Option<String>, MarshalError>;

    /// Builds a blank object for an inbound wire class name.
    fn instantiate(&self, wire: &str) -> Result<Instance, MarshalError>;

    /// Applies decoded properties to an object built by
    /// [`instantiate`](ClassMapper::instantiate).
    fn populate(
        &self,
        target: &mut Instance,
        props: PropertyMap,
        dynamic: Option<PropertyMap>,
    ) -> Result<(), MarshalError>;

    /// Flattens an outbound value into the properties to encode.
    fn properties_for(&self, value: &Value) -> Result<PropertyMap, MarshalError>;
}
