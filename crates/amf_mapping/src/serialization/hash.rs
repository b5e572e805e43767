use alloc::string::String;
use alloc::vec::Vec;

use crate::class::{AssociationKind, Model};
use crate::config::Configuration;
use crate::mapping::{Include, SerializationPolicy};
use crate::serialization::{Deferred, wrap_all};
use crate::value::{PropertyMap, Value};

// -----------------------------------------------------------------------------
// serializable_hash

/// Flattens `model` into a property map following `options`.
///
/// This is the generic strategy used for classes without an
/// [`AmfHash`](crate::class::AmfHash) hook:
///
/// 1. Loaded associations other than [`BelongsTo`](AssociationKind::BelongsTo)
///    are added to `options.include` when
///    [`check_for_associations`](Configuration::check_for_associations) is set.
/// 2. Attribute names come from [`Model::attributes`], or from
///    [`Model::readers`] when the model keeps no attribute map. They are
///    sorted, then restricted by `only` or else `except`.
/// 3. Every name in `methods` the model answers is appended.
/// 4. Every association in `include` is retrieved. Missing or null ones are
///    skipped, the others go through [`wrap_association`].
///
/// On return `options.include` holds the associations that were considered.
///
/// # Examples
///
/// ```
/// use amf_mapping::class::Model;
/// use amf_mapping::config::Configuration;
/// use amf_mapping::mapping::SerializationPolicy;
/// use amf_mapping::serialization::serializable_hash;
/// use amf_mapping::value::{PropertyMap, Value};
///
/// #[derive(Debug)]
/// struct Post;
///
/// impl Model for Post {
///     fn type_path(&self) -> &'static str {
///         "Post"
///     }
///
///     fn attributes(&self) -> Option<PropertyMap> {
///         Some([("title", "Hi"), ("body", "Long text")].into_iter().collect())
///     }
///
///     fn call(&self, name: &str) -> Option<Value> {
///         (name == "word_count").then(|| Value::from(2))
///     }
/// }
///
/// let mut options = SerializationPolicy::new().except(["body"]).methods(["word_count"]);
/// let props = serializable_hash(&Post, &mut options, &Configuration::default());
///
/// let expected: PropertyMap = [("title", Value::from("Hi")), ("word_count", Value::from(2))]
///     .into_iter()
///     .collect();
/// assert_eq!(props, expected);
/// ```
pub fn serializable_hash(
    model: &dyn Model,
    options: &mut SerializationPolicy,
    config: &Configuration,
) -> PropertyMap {
    if config.check_for_associations {
        include_loaded_associations(model, options);
    }

    let mut props = PropertyMap::new();

    match model.attributes() {
        Some(mut attrs) => {
            let names = attrs.keys().map(|key| String::from(key.as_str())).collect();
            for name in options.filter_attributes(names) {
                if let Some(value) = attrs.remove_name(&name) {
                    props.insert(name, value);
                }
            }
        }
        None => {
            let names = model.readers().iter().map(|name| String::from(*name)).collect();
            for name in options.filter_attributes(names) {
                if let Some(value) = model.call(&name) {
                    props.insert(name, value);
                }
            }
        }
    }

    for method in &options.methods {
        if let Some(value) = model.call(method) {
            props.insert(method.clone(), value);
        }
    }

    if let Some(include) = options.include.take() {
        for name in include.names() {
            let value = model.retrieve_association(name).filter(|value| !value.is_null());
            if let Some(value) = value {
                props.insert(String::from(name), wrap_association(value, include.options_for(name)));
            }
        }
        options.include = Some(include);
    }

    props
}

/// Prepares a retrieved association for serialization.
///
/// With nested `options`, every related model (or each one of a collection)
/// is wrapped in a [`Deferred`] carrying them. Without, the value is returned
/// unchanged and related models are serialized with their own policy.
pub fn wrap_association(value: Value, options: Option<&SerializationPolicy>) -> Value {
    let Some(options) = options else {
        return value;
    };
    match value {
        Value::Array(items) => Value::Array(wrap_all(items, Some(options))),
        Value::Object(object) => Deferred::wrap(object, Some(options.clone())).into(),
        Value::Deferred(deferred) => {
            let (object, _) = deferred.into_parts();
            Deferred::wrap(object, Some(options.clone())).into()
        }
        other => other,
    }
}

fn include_loaded_associations(model: &dyn Model, options: &mut SerializationPolicy) {
    let loaded: Vec<_> = model
        .associations()
        .into_iter()
        .filter(|state| state.loaded && state.kind != AssociationKind::BelongsTo)
        .map(|state| state.name)
        .collect();

    if loaded.is_empty() {
        return;
    }

    match &mut options.include {
        Some(include) => include.merge_names(loaded.iter().map(String::as_str)),
        None => options.include = Some(Include::Names(loaded)),
    }
}

// -----------------------------------------------------------------------------
// Tests
