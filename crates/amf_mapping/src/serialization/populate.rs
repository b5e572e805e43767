use alloc::string::String;
use alloc::vec::Vec;

use crate::class::Model;
use crate::error::PopulationWarning;
use crate::value::{PropertyMap, Value};

// -----------------------------------------------------------------------------
// populate_attributes

/// Applies inbound properties to `model`.
///
/// This is the generic strategy used for classes without an
/// [`AmfInit`](crate::class::AmfInit) hook. `dynamic` is merged into `props`
/// first. Names found in [`Model::attributes`] are bulk-assigned with
/// [`Model::assign_attributes`] once every other name has gone through
/// [`Model::set`]. A model with no bulk assignment gets those through
/// [`Model::set`] as well.
///
/// A name is only passed to a setter if it starts with a lowercase ASCII
/// letter and continues with ASCII letters, digits or `_`. Rejected names and
/// names with no setter are dropped, logged and returned as warnings.
///
/// # Examples
///
/// ```
/// use amf_mapping::class::Model;
/// use amf_mapping::serialization::populate_attributes;
/// use amf_mapping::value::{PropertyMap, Value};
///
/// #[derive(Debug, Default)]
/// struct Tag {
///     name: String,
/// }
///
/// impl Model for Tag {
///     fn type_path(&self) -> &'static str {
///         "Tag"
///     }
///
///     fn set(&mut self, name: &str, value: Value) -> Result<(), Value> {
///         match (name, value) {
///             ("name", Value::String(s)) => {
///                 self.name = s;
///                 Ok(())
///             }
///             (_, value) => Err(value),
///         }
///     }
/// }
///
/// let mut tag = Tag::default();
/// let props: PropertyMap = [("name", "rust"), ("Admin", "yes")].into_iter().collect();
///
/// let warnings = populate_attributes(&mut tag, props, None);
/// assert_eq!(tag.name, "rust");
/// assert_eq!(warnings.len(), 1);
/// ```
pub fn populate_attributes(
    model: &mut dyn Model,
    mut props: PropertyMap,
    dynamic: Option<PropertyMap>,
) -> Vec<PopulationWarning> {
    if let Some(dynamic) = dynamic {
        props.merge(dynamic);
    }

    let declared = model.attributes();
    let mut attributes = PropertyMap::new();
    let mut warnings = Vec::new();

    for (key, value) in props {
        match &declared {
            Some(declared) if declared.contains_name(key.as_str()) => {
                attributes.insert(key, value);
            }
            _ => set_property(model, key.as_str(), value, &mut warnings),
        }
    }

    if !attributes.is_empty()
        && let Err(rest) = model.assign_attributes(attributes)
    {
        for (key, value) in rest {
            set_property(model, key.as_str(), value, &mut warnings);
        }
    }

    warnings
}

fn set_property(model: &mut dyn Model, name: &str, value: Value, warnings: &mut Vec<PopulationWarning>) {
    let warning = if !is_safe_setter(name) {
        PopulationWarning::UnsafeSetter {
            class: model.type_path(),
            property: String::from(name),
        }
    } else if model.set(name, value).is_err() {
        PopulationWarning::MissingSetter {
            class: model.type_path(),
            property: String::from(name),
        }
    } else {
        return;
    };

    log::warn!("{warning}");
    warnings.push(warning);
}

/// Returns `true` if `name` may be handed to a setter.
pub fn is_safe_setter(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

// -----------------------------------------------------------------------------
// is_empty_key

/// Returns `true` if `key` is absent, null or zero in `props`.
///
/// Both key styles are checked. Hooks use this to tell a new record (no
/// primary key yet) from an existing one.
///
/// ```
/// use amf_mapping::serialization::is_empty_key;
/// use amf_mapping::value::{Key, PropertyMap};
///
/// let mut props = PropertyMap::new();
/// props.insert("id", 0);
/// props.insert(Key::symbol("parent_id"), 12);
///
/// assert!(is_empty_key(&props, "id"));
/// assert!(!is_empty_key(&props, "parent_id"));
/// assert!(is_empty_key(&props, "missing"));
/// ```
pub fn is_empty_key(props: &PropertyMap, key: &str) -> bool {
    match props.get_str(key).or_else(|| props.get_symbol(key)) {
        None | Some(Value::Null) | Some(Value::Integer(0)) => true,
        Some(Value::Double(d)) => *d == 0.0,
        Some(_) => false,
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::{is_safe_setter, populate_attributes};
    use crate::class::Model;
    use crate::error::PopulationWarning;
    use crate::value::{PropertyMap, Value};

    #[derive(Debug, Default)]
    struct Record {
        attrs: PropertyMap,
        nickname: Option<String>,
        bulk: bool,
    }

    impl Model for Record {
        fn type_path(&self) -> &'static str {
            "Record"
        }

        fn attributes(&self) -> Option<PropertyMap> {
            Some(self.attrs.clone())
        }

        fn assign_attributes(&mut self, attrs: PropertyMap) -> Result<(), PropertyMap> {
            if !self.bulk {
                return Err(attrs);
            }
            self.attrs.merge(attrs);
            Ok(())
        }

        fn set(&mut self, name: &str, value: Value) -> Result<(), Value> {
            match name {
                "nickname" => {
                    self.nickname = value.as_str().map(String::from);
                    Ok(())
                }
                "name" => {
                    self.attrs.insert("name", value);
                    Ok(())
                }
                _ => Err(value),
            }
        }
    }

    fn record(bulk: bool) -> Record {
        Record {
            attrs: [("name", Value::Null)].into_iter().collect(),
            nickname: None,
            bulk,
        }
    }

    #[test]
    fn setters_and_bulk_assignment() {
        let mut model = record(true);
        let props: PropertyMap = [("name", "Ada"), ("nickname", "ada")].into_iter().collect();
        let dynamic: PropertyMap = [("color", "red")].into_iter().collect();

        let warnings = populate_attributes(&mut model, props, Some(dynamic));
        assert_eq!(model.attrs.get_str("name"), Some(&Value::from("Ada")));
        assert_eq!(model.nickname.as_deref(), Some("ada"));
        assert_eq!(
            warnings,
            [PopulationWarning::MissingSetter {
                class: "Record",
                property: String::from("color"),
            }]
        );
    }

    #[test]
    fn attributes_fall_back_to_setters() {
        let mut model = record(false);
        let props: PropertyMap = [("name", "Ada")].into_iter().collect();
        assert!(populate_attributes(&mut model, props, None).is_empty());
        assert_eq!(model.attrs.get_str("name"), Some(&Value::from("Ada")));
    }

    #[test]
    fn unsafe_names_never_reach_setters() {
        let mut model = record(true);
        let props: PropertyMap = [("nickname!", "x")].into_iter().collect();
        let warnings = populate_attributes(&mut model, props, None);
        assert!(matches!(warnings[0], PopulationWarning::UnsafeSetter { .. }));
        assert!(model.nickname.is_none());
    }

    #[test]
    fn setter_names() {
        assert!(is_safe_setter("first_name2"));
        assert!(is_safe_setter("camelCase"));
        assert!(!is_safe_setter("Name"));
        assert!(!is_safe_setter("_private"));
        assert!(!is_safe_setter("a-b"));
        assert!(!is_safe_setter(""));
    }
}
