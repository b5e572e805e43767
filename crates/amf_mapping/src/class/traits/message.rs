use crate::class::{Class, ClassTrait, FromType};

/// Marks the framework message classes of the RPC envelope.
///
/// Properties of these classes are never case-translated on the way in.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassTraitMessage;

impl ClassTrait for ClassTraitMessage {}

impl<T: Class> FromType<T> for ClassTraitMessage {
    #[inline]
    fn from_type() -> Self {
        Self
    }
}
