//! The dynamic value model exchanged with the codec.
//!
//! ## Menu
//!
//! - [`Value`]: any value that can cross the wire.
//! - [`PropertyMap`]: an ordered property map, the flat form of an object.
//! - [`Key`], [`Symbol`], [`KeyStyle`]: string-keyed or symbol-keyed properties.
//! - [`TypedObject`]: a typed property map for wire types with no native class.

// -----------------------------------------------------------------------------
// Modules

mod key;
mod property_map;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use key::{Key, KeyStyle, Symbol};
pub use property_map::PropertyMap;
pub use typed::TypedObject;

// -----------------------------------------------------------------------------
// Value

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::class::Model;
use crate::serialization::Deferred;

/// A value as seen by the marshaler.
///
/// Native objects are shared through [`Arc`], the marshaler only reads them
/// on the way out. Equality on [`Value::Object`] and [`Value::Deferred`] is
/// identity of the shared object.
///
/// # Examples
///
/// ```
/// use amf_mapping::value::Value;
///
/// assert_eq!(Value::from("text").as_str(), Some("text"));
/// assert_eq!(Value::from(3).as_i64(), Some(3));
/// assert!(Value::from(None::<i64>).is_null());
/// ```
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Array(Vec<Value>),
    /// An untyped (anonymous) object.
    Map(PropertyMap),
    /// An object that kept its wire type name but has no native class.
    Typed(TypedObject),
    /// A native object.
    Object(Arc<dyn Model>),
    /// A native object paired with a one-off serialization policy.
    Deferred(Deferred),
}

impl Value {
    /// Wraps a native model.
    #[inline]
    pub fn object(model: impl Model) -> Self {
        Self::Object(Arc::new(model))
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_map(&self) -> Option<&PropertyMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_object(&self) -> Option<&Arc<dyn Model>> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_deferred(&self) -> Option<&Deferred> {
        match self {
            Self::Deferred(d) => Some(d),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Typed(a), Self::Typed(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => same_object(a, b),
            (Self::Deferred(a), Self::Deferred(b)) => {
                same_object(a.object(), b.object()) && a.options() == b.options()
            }
            _ => false,
        }
    }
}

#[inline]
fn same_object(a: &Arc<dyn Model>, b: &Arc<dyn Model>) -> bool {
    core::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from {
    ($($ty:ty => $variant:ident $(as $cast:ty)?),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value $(as $cast)?)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i32 => Integer as i64,
    i64 => Integer,
    u32 => Integer as i64,
    f64 => Double,
    String => String,
    Vec<Value> => Array,
    PropertyMap => Map,
    TypedObject => Typed,
    Arc<dyn Model> => Object,
    Deferred => Deferred,
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(String::from(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
