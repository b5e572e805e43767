use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;

// -----------------------------------------------------------------------------
// Scope

/// A named variant of a class's serialization policy, e.g. `public` or `admin`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct Scope(Cow<'static, str>);

impl Scope {
    /// The scope every mapping starts with.
    pub const DEFAULT: Scope = Scope(Cow::Borrowed("default"));

    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Scope {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<&'static str> for Scope {
    #[inline]
    fn from(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }
}

impl From<String> for Scope {
    #[inline]
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// -----------------------------------------------------------------------------
// SerializationPolicy

/// The rules governing one class's serialization in one scope.
///
/// - `only`: allow-list of attribute names. When non-empty, `except` is ignored.
/// - `except`: deny-list of attribute names.
/// - `methods`: derived values appended after the attributes.
/// - `include`: associations to serialize along with the object.
/// - `ignore_fields`: properties dropped on the way in.
///
/// # Examples
///
/// ```
/// use amf_mapping::mapping::SerializationPolicy;
///
/// let policy = SerializationPolicy::new()
///     .only(["name", "email"])
///     .except(["password"])
///     .methods(["display_name"]);
///
/// let kept = policy.filter_attributes(["email", "name", "password"].map(String::from).to_vec());
/// assert_eq!(kept, ["email", "name"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerializationPolicy {
    #[serde(deserialize_with = "one_or_many")]
    pub only: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub except: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub methods: Vec<String>,
    pub include: Option<Include>,
    #[serde(deserialize_with = "one_or_many")]
    pub ignore_fields: Vec<String>,
}

fn to_strings<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Into::into).collect()
}

impl SerializationPolicy {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn only<I: IntoIterator<Item = S>, S: Into<String>>(mut self, names: I) -> Self {
        self.only = to_strings(names);
        self
    }

    pub fn except<I: IntoIterator<Item = S>, S: Into<String>>(mut self, names: I) -> Self {
        self.except = to_strings(names);
        self
    }

    pub fn methods<I: IntoIterator<Item = S>, S: Into<String>>(mut self, names: I) -> Self {
        self.methods = to_strings(names);
        self
    }

    /// Includes the named associations with their own registered policies.
    pub fn include<I: IntoIterator<Item = S>, S: Into<String>>(mut self, names: I) -> Self {
        self.include = Some(Include::Names(to_strings(names)));
        self
    }

    /// Includes one association serialized with `options` instead of its
    /// registered policy. Repeated calls accumulate.
    pub fn include_with(mut self, name: impl Into<String>, options: SerializationPolicy) -> Self {
        let name = name.into();
        match &mut self.include {
            Some(Include::Nested(nested)) => nested.push((name, options)),
            Some(Include::Names(names)) => {
                let mut nested: Vec<_> = names
                    .drain(..)
                    .map(|n| (n, SerializationPolicy::default()))
                    .collect();
                nested.push((name, options));
                self.include = Some(Include::Nested(nested));
            }
            None => self.include = Some(Include::Nested(alloc::vec![(name, options)])),
        }
        self
    }

    pub fn ignore_fields<I: IntoIterator<Item = S>, S: Into<String>>(mut self, names: I) -> Self {
        self.ignore_fields = to_strings(names);
        self
    }

    /// Returns `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        self.only.is_empty()
            && self.except.is_empty()
            && self.methods.is_empty()
            && self.include.is_none()
            && self.ignore_fields.is_empty()
    }

    /// Applies `only` (if non-empty) or else `except` to sorted attribute names.
    pub fn filter_attributes(&self, mut names: Vec<String>) -> Vec<String> {
        names.sort_unstable();
        if !self.only.is_empty() {
            names.retain(|name| self.only.iter().any(|o| o == name));
        } else if !self.except.is_empty() {
            names.retain(|name| !self.except.iter().any(|e| e == name));
        }
        names
    }
}

// -----------------------------------------------------------------------------
// Include

/// Associations to serialize with an object.
#[derive(Clone, Debug, PartialEq)]
pub enum Include {
    /// Association names, each serialized with its registered policy.
    Names(Vec<String>),
    /// Association names paired with the options to serialize them with.
    Nested(Vec<(String, SerializationPolicy)>),
}

impl Include {
    /// Iterates over the association names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let (names, nested) = match self {
            Self::Names(names) => (names.as_slice(), [].as_slice()),
            Self::Nested(nested) => ([].as_slice(), nested.as_slice()),
        };
        names
            .iter()
            .map(String::as_str)
            .chain(nested.iter().map(|(name, _)| name.as_str()))
    }

    /// Returns the nested options for `name`, if this include carries any.
    pub fn options_for(&self, name: &str) -> Option<&SerializationPolicy> {
        match self {
            Self::Names(_) => None,
            Self::Nested(nested) => nested.iter().find(|(n, _)| n == name).map(|(_, o)| o),
        }
    }

    /// Adds `names` that are not already present.
    ///
    /// Name lists are extended; nested maps get empty options for new names.
    pub fn merge_names<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            if self.names().any(|n| n == name) {
                continue;
            }
            match self {
                Self::Names(list) => list.push(String::from(name)),
                Self::Nested(nested) => nested.push((String::from(name), SerializationPolicy::default())),
            }
        }
    }
}

impl<'de> Deserialize<'de> for Include {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IncludeVisitor;

        impl<'de> Visitor<'de> for IncludeVisitor {
            type Value = Include;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an association name, a list of names, or a map of name to options")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Include, E> {
                Ok(Include::Names(alloc::vec![String::from(v)]))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Include, A::Error> {
                let mut names = Vec::new();
                while let Some(name) = seq.next_element::<String>()? {
                    names.push(name);
                }
                Ok(Include::Names(names))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Include, A::Error> {
                let mut nested = Vec::new();
                while let Some((name, options)) = map.next_entry::<String, SerializationPolicy>()? {
                    nested.push((name, options));
                }
                Ok(Include::Nested(nested))
            }
        }

        deserializer.deserialize_any(IncludeVisitor)
    }
}

// -----------------------------------------------------------------------------
// serde helpers

/// Accepts either a single name or a list of names.
fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    struct OneOrMany;

    impl<'de> Visitor<'de> for OneOrMany {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a name or a list of names")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Vec<String>, E> {
            Ok(alloc::vec![String::from(v)])
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<String>, A::Error> {
            let mut names = Vec::new();
            while let Some(name) = seq.next_element::<String>()? {
                names.push(name);
            }
            Ok(names)
        }
    }

    deserializer.deserialize_any(OneOrMany)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{Include, Scope, SerializationPolicy};

    #[test]
    fn only_wins_over_except() {
        let policy = SerializationPolicy::new().only(["b"]).except(["b"]);
        let names = policy.filter_attributes(vec!["c".into(), "b".into(), "a".into()]);
        assert_eq!(names, ["b"]);

        let policy = SerializationPolicy::new().except(["b"]);
        let names = policy.filter_attributes(vec!["c".into(), "b".into(), "a".into()]);
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn include_with_upgrades_names() {
        let policy = SerializationPolicy::new()
            .include(["mentor"])
            .include_with("courses", SerializationPolicy::new().only(["title"]));

        let include = policy.include.unwrap();
        assert_eq!(include.names().collect::<Vec<_>>(), ["mentor", "courses"]);
        assert_eq!(include.options_for("mentor"), Some(&SerializationPolicy::default()));
        assert_eq!(include.options_for("courses").unwrap().only, ["title"]);
    }

    #[test]
    fn merge_names_skips_existing() {
        let mut include = Include::Names(vec!["a".into()]);
        include.merge_names(["a", "b"]);
        assert_eq!(include, Include::Names(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn deserialize_policy() {
        let policy: SerializationPolicy = serde_json::from_str(
            r#"{ "only": "prop_a", "include": { "courses": { "except": ["id"] } } }"#,
        )
        .unwrap();

        assert_eq!(policy.only, ["prop_a"]);
        let include = policy.include.unwrap();
        assert_eq!(include.options_for("courses").unwrap().except, ["id"]);

        let scope: Scope = serde_json::from_str(r#""admin""#).unwrap();
        assert_eq!(scope, Scope::from("admin"));
        assert_eq!(Scope::default().as_str(), "default");
    }
}
