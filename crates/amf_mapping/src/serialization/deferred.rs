use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::class::Model;
use crate::mapping::SerializationPolicy;
use crate::value::Value;

// -----------------------------------------------------------------------------
// Deferred

/// A native object paired with the policy to serialize it with.
///
/// The marshaler names a `Deferred` after the wrapped object and flattens it
/// with [`options`](Deferred::options) instead of the registered policy.
///
/// # Examples
///
/// ```
/// use amf_mapping::class::Model;
/// use amf_mapping::mapping::SerializationPolicy;
/// use amf_mapping::serialization::Deferred;
/// use amf_mapping::value::Value;
///
/// #[derive(Debug)]
/// struct Tag;
///
/// impl Model for Tag {
///     fn type_path(&self) -> &'static str {
///         "Tag"
///     }
/// }
///
/// let deferred = Deferred::new(Tag, Some(SerializationPolicy::new().only(["name"])));
/// assert_eq!(deferred.object().type_path(), "Tag");
///
/// let value = Value::from(deferred);
/// assert!(value.as_deferred().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct Deferred {
    object: Arc<dyn Model>,
    options: Option<SerializationPolicy>,
}

impl Deferred {
    /// Wraps a shared object.
    #[inline]
    pub fn wrap(object: Arc<dyn Model>, options: Option<SerializationPolicy>) -> Self {
        Self { object, options }
    }

    /// Wraps an owned model.
    #[inline]
    pub fn new(model: impl Model, options: Option<SerializationPolicy>) -> Self {
        Self::wrap(Arc::new(model), options)
    }

    #[inline]
    pub fn object(&self) -> &Arc<dyn Model> {
        &self.object
    }

    #[inline]
    pub fn options(&self) -> Option<&SerializationPolicy> {
        self.options.as_ref()
    }

    #[inline]
    pub fn into_parts(self) -> (Arc<dyn Model>, Option<SerializationPolicy>) {
        (self.object, self.options)
    }
}

/// Wraps every native object in `values` with `options`.
///
/// Objects that are already wrapped are rewrapped with the new options. Other
/// values pass through.
pub fn wrap_all(values: Vec<Value>, options: Option<&SerializationPolicy>) -> Vec<Value> {
    values
        .into_iter()
        .map(|value| match value {
            Value::Object(object) => Deferred::wrap(object, options.cloned()).into(),
            Value::Deferred(deferred) => Deferred::wrap(deferred.object, options.cloned()).into(),
            other => other,
        })
        .collect()
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec;

    use super::{Deferred, wrap_all};
    use crate::class::Model;
    use crate::mapping::SerializationPolicy;
    use crate::value::Value;

    #[derive(Debug)]
    struct Tag;

    impl Model for Tag {
        fn type_path(&self) -> &'static str {
            "Tag"
        }
    }

    #[test]
    fn wrap_all_wraps_objects_only() {
        let tag: Arc<dyn Model> = Arc::new(Tag);
        let options = SerializationPolicy::new().only(["name"]);
        let values = vec![
            Value::Object(tag.clone()),
            Value::from(1),
            Value::Deferred(Deferred::wrap(tag.clone(), None)),
        ];

        let wrapped = wrap_all(values, Some(&options));
        assert_eq!(
            wrapped[0],
            Value::Deferred(Deferred::wrap(tag.clone(), Some(options.clone())))
        );
        assert_eq!(wrapped[1], Value::Integer(1));
        assert_eq!(wrapped[2].as_deferred().unwrap().options(), Some(&options));
    }
}
