use alloc::vec::Vec;
use core::fmt;

use amf_utils::hash::HashMap;

use crate::value::key::KeyRef;
use crate::value::{Key, KeyStyle, Value};

// -----------------------------------------------------------------------------
// PropertyMap

/// An insertion-ordered map from property names to values.
///
/// This is the shape every object takes on the wire: the codec decodes an
/// object into a `PropertyMap` and encodes a `PropertyMap` back into bytes.
///
/// Equality ignores insertion order, like comparing two hashes.
///
/// # Examples
///
/// ```
/// use amf_mapping::value::{PropertyMap, Value};
///
/// let mut props = PropertyMap::new();
/// props.insert("first_name", "Ada");
/// props.insert("age", 36);
///
/// assert_eq!(props.len(), 2);
/// assert_eq!(props.get_str("first_name"), Some(&Value::from("Ada")));
///
/// // Inserting an existing key overwrites in place.
/// props.insert("age", 37);
/// assert_eq!(props.keys().map(|k| k.as_str()).collect::<Vec<_>>(), ["first_name", "age"]);
/// ```
#[derive(Clone, Default)]
pub struct PropertyMap {
    entries: Vec<(Key, Value)>,
    indices: HashMap<Key, usize>,
}

impl PropertyMap {
    /// Creates an empty `PropertyMap`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty `PropertyMap` with at least the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            indices: HashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Returns the number of properties.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no properties.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a property, returning the previous value of the same key.
    ///
    /// An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.indices.get(&key) {
            Some(&index) => Some(core::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.indices.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Returns the value stored under `key`.
    #[inline]
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.get_by_ref(key.as_key_ref())
    }

    /// Returns the value stored under the string key `name`.
    #[inline]
    pub fn get_str(&self, name: &str) -> Option<&Value> {
        self.get_by_ref(KeyRef::string(name))
    }

    /// Returns the value stored under the symbol key `name`.
    #[inline]
    pub fn get_symbol(&self, name: &str) -> Option<&Value> {
        self.get_by_ref(KeyRef::symbol(name))
    }

    fn get_by_ref(&self, key: KeyRef<'_>) -> Option<&Value> {
        self.indices.get(&key).map(|&index| &self.entries[index].1)
    }

    /// Returns `true` if the map holds `key`.
    #[inline]
    pub fn contains_key(&self, key: &Key) -> bool {
        self.indices.contains_key(&key.as_key_ref())
    }

    /// Returns `true` if the map holds `name` under either key style.
    pub fn contains_name(&self, name: &str) -> bool {
        self.indices.contains_key(&KeyRef::string(name))
            || self.indices.contains_key(&KeyRef::symbol(name))
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        self.remove_by_ref(key.as_key_ref())
    }

    /// Removes `name` under both key styles.
    ///
    /// Returns the string-keyed value if present, else the symbol-keyed one.
    pub fn remove_name(&mut self, name: &str) -> Option<Value> {
        let string = self.remove_by_ref(KeyRef::string(name));
        let symbol = self.remove_by_ref(KeyRef::symbol(name));
        string.or(symbol)
    }

    fn remove_by_ref(&mut self, key: KeyRef<'_>) -> Option<Value> {
        let index = self.indices.remove(&key)?;
        let (_, value) = self.entries.remove(index);
        for slot in self.indices.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        Some(value)
    }

    /// Iterates over the properties in insertion order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Key, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterates over the keys in insertion order.
    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates over the values in insertion order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Moves every property of `other` into `self`, overwriting equal keys.
    pub fn merge(&mut self, other: PropertyMap) {
        for (key, value) in other {
            self.insert(key, value);
        }
    }

    /// Rebuilds the map with every key passed through `f`.
    ///
    /// When two keys map to the same new key, the later one wins.
    pub fn map_keys(self, mut f: impl FnMut(Key) -> Key) -> Self {
        let mut out = Self::with_capacity(self.len());
        for (key, value) in self {
            out.insert(f(key), value);
        }
        out
    }

    /// Rewrites every key to the given style without touching the values.
    #[inline]
    pub fn into_key_style(self, style: KeyStyle) -> Self {
        self.map_keys(|key| key.into_style(style))
    }
}

// -----------------------------------------------------------------------------
// Traits

impl PartialEq for PropertyMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl fmt::Debug for PropertyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl IntoIterator for PropertyMap {
    type Item = (Key, Value);
    type IntoIter = alloc::vec::IntoIter<(Key, Value)>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<K: Into<Key>, V: Into<Value>> Extend<(K, V)> for PropertyMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::PropertyMap;
    use crate::value::{Key, KeyStyle, Value};

    #[test]
    fn remove_keeps_order() {
        let mut props: PropertyMap = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(props.remove(&Key::from("b")), Some(Value::Integer(2)));

        let keys: Vec<_> = props.keys().map(Key::as_str).collect();
        assert_eq!(keys, ["a", "c"]);
        assert_eq!(props.get_str("c"), Some(&Value::Integer(3)));
    }

    #[test]
    fn remove_name_checks_both_styles() {
        let mut props = PropertyMap::new();
        props.insert("asdf", "x");
        props.insert(Key::symbol("asdf"), "y");
        props.insert("fdsa", "z");

        assert!(props.remove_name("asdf").is_some());
        assert!(!props.contains_name("asdf"));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn key_style_round_trip() {
        let props: PropertyMap = [("a", 1), ("b", 2)].into_iter().collect();
        let symbols = props.clone().into_key_style(KeyStyle::Symbol);

        assert!(symbols.get_str("a").is_none());
        assert_eq!(symbols.get_symbol("a"), Some(&Value::Integer(1)));
        assert_ne!(symbols, props);
        assert_eq!(symbols.into_key_style(KeyStyle::String), props);
    }

    #[test]
    fn equality_ignores_order() {
        let a: PropertyMap = [("x", 1), ("y", 2)].into_iter().collect();
        let b: PropertyMap = [("y", 2), ("x", 1)].into_iter().collect();
        assert_eq!(a, b);
    }
}
