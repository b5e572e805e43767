use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt::Debug;

use crate::value::{PropertyMap, Value};

// -----------------------------------------------------------------------------
// AssociationState

/// How a model relates to the records of one association.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssociationKind {
    HasMany,
    HasOne,
    BelongsTo,
    HasAndBelongsToMany,
}

/// One association a model declares, and whether its records are already in
/// memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssociationState {
    pub name: String,
    pub kind: AssociationKind,
    pub loaded: bool,
}

impl AssociationState {
    pub fn new(name: impl Into<String>, kind: AssociationKind, loaded: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            loaded,
        }
    }
}

// -----------------------------------------------------------------------------
// Model

/// The contract a native object fulfils so the marshaler can read and write
/// it without knowing its concrete type.
///
/// Only [`type_path`](Model::type_path) is required. A model exposes its state
/// either as a bulk attribute map ([`attributes`](Model::attributes) and
/// [`assign_attributes`](Model::assign_attributes)) or through named
/// accessors ([`readers`](Model::readers), [`call`](Model::call) and
/// [`set`](Model::set)), or both.
///
/// # Examples
///
/// ```
/// use amf_mapping::class::Model;
/// use amf_mapping::value::{PropertyMap, Value};
///
/// #[derive(Debug, Default)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// impl Model for Point {
///     fn type_path(&self) -> &'static str {
///         "geometry::Point"
///     }
///
///     fn readers(&self) -> &'static [&'static str] {
///         &["x", "y"]
///     }
///
///     fn call(&self, name: &str) -> Option<Value> {
///         match name {
///             "x" => Some(self.x.into()),
///             "y" => Some(self.y.into()),
///             _ => None,
///         }
///     }
/// }
///
/// let point: &dyn Model = &Point { x: 1, y: 2 };
/// assert_eq!(point.call("y"), Some(Value::Integer(2)));
/// assert!(point.downcast_ref::<Point>().is_some());
/// ```
pub trait Model: Any + Send + Sync + Debug {
    /// The native class name of this object.
    fn type_path(&self) -> &'static str;

    /// The object's declared attributes, if it keeps them as a map.
    fn attributes(&self) -> Option<PropertyMap> {
        None
    }

    /// Bulk-assigns declared attributes.
    ///
    /// Returns the map back when the model has no bulk assignment.
    fn assign_attributes(&mut self, attrs: PropertyMap) -> Result<(), PropertyMap> {
        Err(attrs)
    }

    /// Names of the zero-argument accessors that make up the object's state
    /// when it has no attribute map.
    fn readers(&self) -> &'static [&'static str] {
        &[]
    }

    /// Invokes the zero-argument accessor `name`.
    ///
    /// Returns `None` when the object has no such accessor.
    fn call(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Invokes the single-argument setter for `name`.
    ///
    /// Returns the value back when the object has no such setter.
    fn set(&mut self, _name: &str, value: Value) -> Result<(), Value> {
        Err(value)
    }

    /// Returns the record or records of the association `name`.
    ///
    /// Defaults to calling the accessor of the same name.
    fn retrieve_association(&self, name: &str) -> Option<Value> {
        self.call(name)
    }

    /// Reports the declared associations and whether each is loaded, without
    /// loading any of them.
    fn associations(&self) -> Vec<AssociationState> {
        Vec::new()
    }
}

impl dyn Model {
    /// Returns `true` if the underlying type is `T`.
    #[inline]
    pub fn is<T: Model>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Model>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Model>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }
}

// -----------------------------------------------------------------------------
// Class

/// A [`Model`] the marshaler can create from a wire class name.
///
/// [`allocate`](Class::allocate) builds a blank instance with no side
/// effects. [`initialize`](Class::initialize) runs the normal construction
/// logic, and is skipped for classes that register an
/// [`AmfInit`](crate::class::AmfInit) hook, since the hook decides how the
/// object is built.
pub trait Class: Model + Sized {
    /// The native class name, equal to what [`Model::type_path`] returns.
    const TYPE_PATH: &'static str;

    /// Creates a blank instance.
    fn allocate() -> Self;

    /// Runs the regular constructor logic on a blank instance.
    fn initialize(&mut self) {}
}
