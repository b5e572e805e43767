use crate::class::{Class, ClassTrait, FromType, Model};
use crate::error::HookError;
use crate::value::PropertyMap;

// -----------------------------------------------------------------------------
// AmfInit

/// Custom population after deserialization.
///
/// Classes implementing this take full control of how inbound properties are
/// applied, including deciding whether the object is a new record or an
/// existing one. Their [`Class::initialize`] is not run by the marshaler.
///
/// `dynamic` holds the properties the wire object carried beyond its sealed
/// members and is `None` when there were none.
pub trait AmfInit {
    fn amf_init(
        &mut self,
        props: PropertyMap,
        dynamic: Option<PropertyMap>,
    ) -> Result<(), HookError>;
}

// -----------------------------------------------------------------------------
// ClassTraitInit

/// A container providing [`AmfInit`] support for registered classes.
#[derive(Clone, Copy)]
pub struct ClassTraitInit {
    func: fn(&mut dyn Model, PropertyMap, Option<PropertyMap>) -> Result<(), HookError>,
}

impl ClassTraitInit {
    /// Calls the class's [`AmfInit::amf_init`] on `model`.
    #[inline(always)]
    pub fn init(
        &self,
        model: &mut dyn Model,
        props: PropertyMap,
        dynamic: Option<PropertyMap>,
    ) -> Result<(), HookError> {
        (self.func)(model, props, dynamic)
    }
}

impl ClassTrait for ClassTraitInit {}

impl<T: Class + AmfInit> FromType<T> for ClassTraitInit {
    fn from_type() -> Self {
        Self {
            func: |model, props, dynamic| match model.downcast_mut::<T>() {
                Some(model) => model.amf_init(props, dynamic),
                None => Err(HookError::from("init hook applied to a model of another class")),
            },
        }
    }
}
