use alloc::string::String;

use crate::value::PropertyMap;

// -----------------------------------------------------------------------------
// TypedObject

/// A property map that carries a wire type name but has no native class.
///
/// The marshaler hands these out for wire types it cannot map, so an
/// unknown object still travels back to the client with its original type tag.
///
/// # Examples
///
/// ```
/// use amf_mapping::value::TypedObject;
///
/// let mut obj = TypedObject::new("com.example.Unknown");
/// obj.properties_mut().insert("id", 7);
///
/// assert_eq!(obj.type_name(), "com.example.Unknown");
/// assert_eq!(obj.properties().len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypedObject {
    type_name: String,
    properties: PropertyMap,
}

impl TypedObject {
    /// Creates an empty object tagged with `type_name`.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: PropertyMap::new(),
        }
    }

    /// Creates an object tagged with `type_name` holding `properties`.
    pub fn with_properties(type_name: impl Into<String>, properties: PropertyMap) -> Self {
        Self {
            type_name: type_name.into(),
            properties,
        }
    }

    /// Returns the wire type name this object was received with.
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[inline]
    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    #[inline]
    pub fn properties_mut(&mut self) -> &mut PropertyMap {
        &mut self.properties
    }

    #[inline]
    pub fn into_properties(self) -> PropertyMap {
        self.properties
    }
}
