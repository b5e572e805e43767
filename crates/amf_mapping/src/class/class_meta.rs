use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::ops::Deref;

use amf_utils::TypeIdMap;

use crate::class::{Class, Model};

// -----------------------------------------------------------------------------
// ClassTrait

/// A capability a registered class supports, stored in its [`ClassMeta`].
///
/// Capabilities are plain structs of function pointers built by
/// [`FromType`](crate::class::FromType), so the marshaler checks for a
/// capability once per lookup instead of probing the object.
pub trait ClassTrait: Any + Send + Sync {}

impl dyn ClassTrait {
    #[inline]
    pub fn downcast_ref<T: ClassTrait>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}

// -----------------------------------------------------------------------------
// ClassMeta

/// Runtime data for one registered class: how to allocate it and which
/// capabilities it has.
///
/// # Example
///
/// ```
/// use amf_mapping::class::{Class, ClassMeta, ClassTraitInit, Model};
///
/// #[derive(Debug, Default)]
/// struct Note;
///
/// impl Model for Note {
///     fn type_path(&self) -> &'static str {
///         Self::TYPE_PATH
///     }
/// }
///
/// impl Class for Note {
///     const TYPE_PATH: &'static str = "Note";
///
///     fn allocate() -> Self {
///         Note
///     }
/// }
///
/// let meta = ClassMeta::of::<Note>();
/// assert_eq!(meta.type_path(), "Note");
/// assert!(!meta.has_trait::<ClassTraitInit>());
///
/// let note = meta.instantiate(true);
/// assert!(note.is::<Note>());
/// ```
pub struct ClassMeta {
    type_path: &'static str,
    type_id: TypeId,
    allocate: fn() -> Box<dyn Model>,
    initialize: fn(&mut dyn Model),
    trait_table: TypeIdMap<Box<dyn ClassTrait>>,
}

impl ClassMeta {
    /// Creates a [`ClassMeta`] with no capabilities for the class `T`.
    pub fn of<T: Class>() -> Self {
        Self {
            type_path: T::TYPE_PATH,
            type_id: TypeId::of::<T>(),
            allocate: || Box::new(T::allocate()),
            initialize: |model| {
                if let Some(model) = model.downcast_mut::<T>() {
                    model.initialize();
                }
            },
            trait_table: TypeIdMap::new(),
        }
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Allocates a blank instance, running the class initializer when
    /// `initialize` is `true`.
    #[inline]
    pub fn instantiate(&self, initialize: bool) -> Box<dyn Model> {
        self.constructor().build(initialize)
    }

    /// Copies the allocation functions out of the metadata, so a caller can
    /// release the registry before running class code.
    #[inline]
    pub const fn constructor(&self) -> Constructor {
        Constructor {
            allocate: self.allocate,
            initialize: self.initialize,
        }
    }

    /// Inserts or replaces a capability.
    #[inline]
    pub fn insert_trait<T: ClassTrait>(&mut self, data: T) {
        self.trait_table.insert(TypeId::of::<T>(), Box::new(data));
    }

    /// Returns the capability `T`, if the class has it.
    #[inline]
    pub fn get_trait<T: ClassTrait>(&self) -> Option<&T> {
        self.trait_table
            .get(&TypeId::of::<T>())
            .map(Deref::deref)
            .and_then(<dyn ClassTrait>::downcast_ref)
    }

    #[inline]
    pub fn has_trait<T: ClassTrait>(&self) -> bool {
        self.trait_table.contains(&TypeId::of::<T>())
    }
}

// -----------------------------------------------------------------------------
// Constructor

/// The allocation functions of one class, detached from its [`ClassMeta`].
#[derive(Clone, Copy)]
pub struct Constructor {
    allocate: fn() -> Box<dyn Model>,
    initialize: fn(&mut dyn Model),
}

impl Constructor {
    pub fn build(self, initialize: bool) -> Box<dyn Model> {
        let mut model = (self.allocate)();
        if initialize {
            (self.initialize)(model.as_mut());
        }
        model
    }
}

impl core::fmt::Debug for Constructor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Constructor").finish_non_exhaustive()
    }
}

impl core::fmt::Debug for ClassMeta {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClassMeta")
            .field("type_path", &self.type_path)
            .field("traits", &self.trait_table.len())
            .finish()
    }
}
