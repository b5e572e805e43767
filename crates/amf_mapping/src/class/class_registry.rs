use core::any::TypeId;

use amf_utils::TypeIdMap;
use amf_utils::hash::HashMap;

use crate::class::{Class, ClassMeta, ClassTrait, FromType};

// -----------------------------------------------------------------------------
// ClassRegistry

/// The native classes the marshaler can allocate, keyed by type and by
/// native class name.
///
/// # Example
///
/// ```
/// use amf_mapping::class::{Class, ClassRegistry, ClassTraitMessage, Model};
///
/// #[derive(Debug)]
/// struct User;
///
/// impl Model for User {
///     fn type_path(&self) -> &'static str {
///         Self::TYPE_PATH
///     }
/// }
///
/// impl Class for User {
///     const TYPE_PATH: &'static str = "app::User";
///
///     fn allocate() -> Self {
///         User
///     }
/// }
///
/// let mut registry = ClassRegistry::new();
/// registry.register::<User>();
///
/// let meta = registry.get_with_type_path("app::User").unwrap();
/// assert!(meta.instantiate(true).is::<User>());
///
/// // Framework message classes come pre-registered.
/// let remoting = registry
///     .get_with_type_path("amf_mapping::messages::RemotingMessage")
///     .unwrap();
/// assert!(remoting.has_trait::<ClassTraitMessage>());
/// ```
pub struct ClassRegistry {
    class_meta_table: TypeIdMap<ClassMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
}

impl Default for ClassRegistry {
    /// See [`ClassRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            class_meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(amf_utils::hash::FixedHashState),
        }
    }

    /// Creates a registry holding the framework message classes.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        crate::messages::register_messages(&mut registry);
        registry
    }

    /// Registers the class `T` if it is not registered yet.
    ///
    /// Returns `true` if `T` was newly registered.
    pub fn register<T: Class>(&mut self) -> bool {
        self.class_meta_table.try_insert(TypeId::of::<T>(), || {
            if let Some(previous) = self.type_path_to_id.insert(T::TYPE_PATH, TypeId::of::<T>()) {
                log::warn!(
                    "class path `{}` was registered by another type ({previous:?}), it now resolves to the latest one",
                    T::TYPE_PATH
                );
            }
            ClassMeta::of::<T>()
        })
    }

    /// Inserts or **overwrites** a class's meta.
    pub fn insert_class_meta(&mut self, meta: ClassMeta) {
        self.type_path_to_id.insert(meta.type_path(), meta.type_id());
        self.class_meta_table.insert(meta.type_id(), meta);
    }

    /// Registers the capability `D` for the class `T`, registering `T` first
    /// if needed.
    pub fn register_trait<T: Class, D: ClassTrait + FromType<T>>(&mut self) {
        self.register::<T>();
        if let Some(meta) = self.class_meta_table.get_mut(&TypeId::of::<T>()) {
            meta.insert_trait(D::from_type());
        }
    }

    /// Registers every class declared through
    /// [`impl_auto_register!`](crate::impl_auto_register).
    ///
    /// Returns `false` when the `auto_register` feature is disabled.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        crate::__macro_exports::auto_register::register_classes(self);

        cfg!(feature = "auto_register")
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.class_meta_table.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&ClassMeta> {
        self.class_meta_table.get(&type_id)
    }

    /// Returns the meta of the class registered under the native class name
    /// `type_path`.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&ClassMeta> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns the capability `T` of the class registered under `type_path`.
    pub fn get_class_trait<T: ClassTrait>(&self, type_path: &str) -> Option<&T> {
        match self.get_with_type_path(type_path) {
            Some(meta) => meta.get_trait::<T>(),
            None => None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.class_meta_table.len()
    }

    /// Returns an iterator over the registered classes.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ClassMeta> {
        self.class_meta_table.values()
    }
}

// -----------------------------------------------------------------------------
// ClassRegistryArc

#[cfg(feature = "std")]
use {
    alloc::sync::Arc,
    std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// A shared, lock-guarded [`ClassRegistry`].
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Clone, Default)]
pub struct ClassRegistryArc {
    /// The wrapped [`ClassRegistry`].
    pub internal: Arc<RwLock<ClassRegistry>>,
}

#[cfg(feature = "std")]
impl ClassRegistryArc {
    pub fn new(registry: ClassRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`ClassRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, ClassRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`ClassRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, ClassRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(feature = "std")]
impl core::fmt::Debug for ClassRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.read().type_path_to_id.keys().fmt(f)
    }
}

#[cfg(feature = "std")]
impl From<ClassRegistry> for ClassRegistryArc {
    #[inline]
    fn from(value: ClassRegistry) -> Self {
        Self::new(value)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::ClassRegistry;
    use crate::class::{AmfInit, Class, ClassTraitInit, ClassTraitMessage, Model};
    use crate::error::HookError;
    use crate::value::PropertyMap;

    #[derive(Debug, Default)]
    struct Counter {
        initialized: bool,
    }

    impl Model for Counter {
        fn type_path(&self) -> &'static str {
            Self::TYPE_PATH
        }
    }

    impl Class for Counter {
        const TYPE_PATH: &'static str = "tests::Counter";

        fn allocate() -> Self {
            Self::default()
        }

        fn initialize(&mut self) {
            self.initialized = true;
        }
    }

    impl AmfInit for Counter {
        fn amf_init(&mut self, _: PropertyMap, _: Option<PropertyMap>) -> Result<(), HookError> {
            Ok(())
        }
    }

    #[test]
    fn register_is_idempotent() {
        let mut registry = ClassRegistry::empty();
        assert!(registry.register::<Counter>());
        assert!(!registry.register::<Counter>());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn instantiate_runs_initializer_on_request() {
        let mut registry = ClassRegistry::empty();
        registry.register::<Counter>();
        let meta = registry.get_with_type_path("tests::Counter").unwrap();

        let fresh = meta.instantiate(false);
        assert!(!fresh.downcast_ref::<Counter>().unwrap().initialized);

        let built = meta.instantiate(true);
        assert!(built.downcast_ref::<Counter>().unwrap().initialized);
    }

    #[test]
    fn register_trait_registers_class() {
        let mut registry = ClassRegistry::empty();
        registry.register_trait::<Counter, ClassTraitInit>();
        assert!(registry.get_class_trait::<ClassTraitInit>("tests::Counter").is_some());
        assert!(registry.get_class_trait::<ClassTraitMessage>("tests::Counter").is_none());
    }

    #[test]
    fn messages_are_registered() {
        let registry = ClassRegistry::new();
        assert_eq!(registry.len(), 9);
        assert!(
            registry
                .get_class_trait::<ClassTraitMessage>("amf_mapping::messages::ErrorMessage")
                .is_some()
        );
    }
}
