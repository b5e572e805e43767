use crate::class::Class;

/// Builds a [`ClassTrait`] for the class `T`.
///
/// # Example
///
/// ```
/// # use amf_mapping::class::{Class, ClassMeta, ClassTraitInit, FromType, AmfInit, Model};
/// # use amf_mapping::error::HookError;
/// # use amf_mapping::value::PropertyMap;
/// # #[derive(Debug)]
/// # struct Note;
/// # impl Model for Note { fn type_path(&self) -> &'static str { "Note" } }
/// # impl Class for Note { const TYPE_PATH: &'static str = "Note"; fn allocate() -> Self { Note } }
/// # impl AmfInit for Note {
/// #     fn amf_init(&mut self, _: PropertyMap, _: Option<PropertyMap>) -> Result<(), HookError> { Ok(()) }
/// # }
/// let mut meta = ClassMeta::of::<Note>();
/// meta.insert_trait::<ClassTraitInit>(FromType::<Note>::from_type());
///
/// assert!(meta.has_trait::<ClassTraitInit>());
/// ```
///
/// [`ClassTrait`]: crate::class::ClassTrait
pub trait FromType<T: Class> {
    fn from_type() -> Self;
}
