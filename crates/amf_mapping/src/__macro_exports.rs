//! Items used by the exported macros. Not part of the public API.

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::class::ClassRegistry;

    /// One class registration submitted by [`impl_auto_register!`](crate::impl_auto_register).
    pub struct __AutoRegisterFunc(pub fn(&mut ClassRegistry));

    inventory::collect!(__AutoRegisterFunc);

    pub(crate) fn register_classes(registry: &mut ClassRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
