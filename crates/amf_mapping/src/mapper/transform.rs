//! Key rewrites applied to property maps on their way in and out.
//!
//! Case translation renames keys between wire camelCase and native
//! snake_case, keeping each key's style. Key-style conversion is
//! [`PropertyMap::into_key_style`]. Both rewrites are idempotent and never
//! touch values.

use alloc::string::String;

use amf_utils::{camelize_lower, underscore};

use crate::value::{Key, KeyStyle, PropertyMap};

/// Renames every key from camelCase to snake_case.
///
/// ```
/// use amf_mapping::mapper::transform::to_native_case;
/// use amf_mapping::value::PropertyMap;
///
/// let props: PropertyMap = [("aMoreComplexProperty", 1)].into_iter().collect();
/// let props = to_native_case(props);
/// assert!(props.contains_name("a_more_complex_property"));
/// ```
pub fn to_native_case(props: PropertyMap) -> PropertyMap {
    props.map_keys(|key| rename(key, underscore))
}

/// Renames every key from snake_case to lower camelCase.
pub fn to_wire_case(props: PropertyMap) -> PropertyMap {
    props.map_keys(|key| rename(key, camelize_lower))
}

/// Removes every name in `ignored`, under both key styles.
pub fn remove_ignored(props: &mut PropertyMap, ignored: &[String]) {
    for name in ignored {
        props.remove_name(name);
    }
}

fn rename(key: Key, f: fn(&str) -> String) -> Key {
    let name = f(key.as_str());
    match key.style() {
        KeyStyle::String => Key::string(name),
        KeyStyle::Symbol => Key::symbol(name),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::{remove_ignored, to_native_case, to_wire_case};
    use crate::value::{Key, KeyStyle, PropertyMap, Value};

    #[test]
    fn case_round_trip_keeps_style() {
        let mut props = PropertyMap::new();
        props.insert("aProperty", 1);
        props.insert(Key::symbol("aMoreComplexProperty"), 2);

        let native = to_native_case(props.clone());
        assert_eq!(native.get_str("a_property"), Some(&Value::Integer(1)));
        assert_eq!(native.get_symbol("a_more_complex_property"), Some(&Value::Integer(2)));

        assert_eq!(to_native_case(native.clone()), native);
        assert_eq!(to_wire_case(native), props);
    }

    #[test]
    fn key_style_leaves_values() {
        let props: PropertyMap = [("id", 7)].into_iter().collect();
        let symbols = props.into_key_style(KeyStyle::Symbol);
        assert_eq!(symbols.get_symbol("id"), Some(&Value::Integer(7)));
        assert_eq!(symbols.clone().into_key_style(KeyStyle::Symbol), symbols);
    }

    #[test]
    fn ignored_names_go_in_both_styles() {
        let mut props = PropertyMap::new();
        props.insert("created_at", 1);
        props.insert(Key::symbol("updated_at"), 2);
        props.insert("name", 3);

        remove_ignored(&mut props, &[String::from("created_at"), String::from("updated_at")]);
        let keys: Vec<_> = props.keys().map(Key::as_str).collect();
        assert_eq!(keys, ["name"]);
    }
}
