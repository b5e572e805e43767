/// Submits a class for [`ClassRegistry::auto_register`].
///
/// The class is registered together with any capabilities listed after it.
/// Generic classes cannot be submitted.
///
/// Without the `auto_register` feature this expands to nothing.
///
/// # Examples
///
/// ```
/// use amf_mapping::class::{Class, ClassRegistry, ClassTraitInit, AmfInit, Model};
/// use amf_mapping::error::HookError;
/// use amf_mapping::value::PropertyMap;
///
/// #[derive(Debug)]
/// struct Session;
///
/// impl Model for Session {
///     fn type_path(&self) -> &'static str {
///         Self::TYPE_PATH
///     }
/// }
///
/// impl Class for Session {
///     const TYPE_PATH: &'static str = "app::Session";
///
///     fn allocate() -> Self {
///         Session
///     }
/// }
///
/// impl AmfInit for Session {
///     fn amf_init(&mut self, _: PropertyMap, _: Option<PropertyMap>) -> Result<(), HookError> {
///         Ok(())
///     }
/// }
///
/// amf_mapping::impl_auto_register!(Session, ClassTraitInit);
///
/// fn main() {
///     let mut registry = ClassRegistry::empty();
///     if registry.auto_register() {
///         assert!(registry.get_class_trait::<ClassTraitInit>("app::Session").is_some());
///     }
/// }
/// ```
///
/// [`ClassRegistry::auto_register`]: crate::class::ClassRegistry::auto_register
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! impl_auto_register {
    ($ty:ty $(, $class_trait:ty)* $(,)?) => {
        $crate::__macro_exports::auto_register::inventory::submit! {
            $crate::__macro_exports::auto_register::__AutoRegisterFunc(
                |registry: &mut $crate::class::ClassRegistry| {
                    registry.register::<$ty>();
                    $( registry.register_trait::<$ty, $class_trait>(); )*
                }
            )
        }
    };
}

/// Submits a class for [`ClassRegistry::auto_register`].
///
/// The `auto_register` feature is disabled, so this expands to nothing.
///
/// [`ClassRegistry::auto_register`]: crate::class::ClassRegistry::auto_register
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! impl_auto_register {
    ($ty:ty $(, $class_trait:ty)* $(,)?) => {};
}
