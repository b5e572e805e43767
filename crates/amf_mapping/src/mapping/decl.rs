use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;

use serde::Deserialize;

use crate::error::ConfigurationError;
use crate::mapping::{MapOptions, MappingSet, Scope};

// -----------------------------------------------------------------------------
// MappingDecl

/// A name list that is either shared by every scope or given per scope.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ScopedList {
    Plain(Vec<String>),
    Scoped(BTreeMap<String, Vec<String>>),
}

impl ScopedList {
    fn for_scope(&self, scope: &str) -> Option<&[String]> {
        match self {
            Self::Plain(names) => Some(names),
            Self::Scoped(scoped) => scoped.get(scope).map(Vec::as_slice),
        }
    }

    fn scopes(&self) -> impl Iterator<Item = &str> {
        let scoped = match self {
            Self::Plain(_) => None,
            Self::Scoped(scoped) => Some(scoped.keys().map(String::as_str)),
        };
        scoped.into_iter().flatten()
    }
}

/// A mapping declared as data, for loading from a configuration file.
///
/// `attributes` become `only` and `associations` become `include`. When either
/// is given per scope, one mapping is registered for every scope named, and a
/// plain list on the other field applies to each of them.
///
/// # Examples
///
/// ```
/// use amf_mapping::mapping::{MappingDecl, MappingSet, Scope};
///
/// let decl: MappingDecl = serde_json::from_str(r#"{
///     "actionscript": "Scoped3",
///     "ruby": "Scoped3",
///     "attributes": { "scope_1": ["prop_a", "prop_b"], "scope_2": ["prop_a"] },
///     "associations": ["assoc_a", "assoc_b"]
/// }"#).unwrap();
///
/// let mut mappings = MappingSet::new();
/// mappings.map_decl(&decl).unwrap();
///
/// let policy = mappings.policy_for("Scoped3", Some(&Scope::from("scope_2"))).unwrap();
/// assert_eq!(policy.only, ["prop_a"]);
/// assert_eq!(policy.include.as_ref().unwrap().names().collect::<Vec<_>>(), ["assoc_a", "assoc_b"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MappingDecl {
    #[serde(alias = "ruby")]
    pub native: Option<String>,
    #[serde(alias = "actionscript", alias = "as", alias = "flash")]
    pub wire: Option<String>,
    pub methods: Option<Vec<String>>,
    pub ignore_fields: Option<Vec<String>>,
    pub attributes: Option<ScopedList>,
    pub associations: Option<ScopedList>,
}

impl MappingDecl {
    fn base_options(&self) -> MapOptions {
        let mut options = MapOptions::default();
        options.native = self.native.clone();
        options.wire = self.wire.clone();
        if let Some(methods) = &self.methods {
            options = options.methods(methods.iter().cloned());
        }
        if let Some(fields) = &self.ignore_fields {
            options = options.ignore_fields(fields.iter().cloned());
        }
        options
    }

    fn with_lists(
        mut options: MapOptions,
        only: Option<&[String]>,
        include: Option<&[String]>,
    ) -> MapOptions {
        if let Some(only) = only {
            options = options.only(only.iter().cloned());
        }
        if let Some(include) = include {
            options = options.include(include.iter().cloned());
        }
        options
    }

    /// Expands the declaration into the [`MapOptions`] it stands for.
    pub fn to_options(&self) -> Vec<MapOptions> {
        let attributes = self.attributes.as_ref();
        let associations = self.associations.as_ref();

        let scopes: BTreeSet<&str> = attributes
            .into_iter()
            .chain(associations)
            .flat_map(|list| list.scopes())
            .collect();

        if scopes.is_empty() {
            let only = attributes.and_then(|a| a.for_scope(""));
            let include = associations.and_then(|a| a.for_scope(""));
            return alloc::vec![Self::with_lists(self.base_options(), only, include)];
        }

        scopes
            .into_iter()
            .map(|scope| {
                let options = self.base_options().scope(Scope::from(String::from(scope)));
                let only = attributes.and_then(|a| a.for_scope(scope));
                let include = associations.and_then(|a| a.for_scope(scope));
                Self::with_lists(options, only, include)
            })
            .collect()
    }
}

impl MappingSet {
    /// Registers every mapping a [`MappingDecl`] stands for.
    pub fn map_decl(&mut self, decl: &MappingDecl) -> Result<(), ConfigurationError> {
        for options in decl.to_options() {
            self.map(options)?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::MappingDecl;
    use crate::mapping::{MappingSet, Scope};

    fn load(json: &str) -> MappingSet {
        let decl: MappingDecl = serde_json::from_str(json).unwrap();
        let mut mappings = MappingSet::empty();
        mappings.map_decl(&decl).unwrap();
        mappings
    }

    fn include_names(mappings: &MappingSet, native: &str, scope: Option<&str>) -> Vec<String> {
        let scope = scope.map(|s| Scope::from(String::from(s)));
        let policy = mappings.policy_for(native, scope.as_ref()).unwrap();
        policy
            .include
            .as_ref()
            .map(|i| i.names().map(String::from).collect())
            .unwrap_or_default()
    }

    #[test]
    fn unscoped_lists() {
        let mappings = load(
            r#"{ "actionscript": "Both", "ruby": "Both",
                 "attributes": ["prop_a", "prop_b"], "associations": ["assoc_a", "assoc_b"] }"#,
        );
        let policy = mappings.policy_for("Both", None).unwrap();
        assert_eq!(policy.only, ["prop_a", "prop_b"]);
        assert_eq!(include_names(&mappings, "Both", None), ["assoc_a", "assoc_b"]);
    }

    #[test]
    fn methods_only() {
        let mappings = load(r#"{ "as": "Method", "ruby": "Method", "methods": ["meth_a"] }"#);
        let policy = mappings.policy_for("Method", None).unwrap();
        assert_eq!(policy.methods, ["meth_a"]);
        assert!(policy.only.is_empty());
        assert!(policy.include.is_none());
    }

    #[test]
    fn both_scoped() {
        let mappings = load(
            r#"{ "flash": "Scoped4", "ruby": "Scoped4",
                 "attributes": { "scope_1": ["prop_a", "prop_b"], "scope_2": ["prop_a"] },
                 "associations": { "scope_1": ["assoc_a", "assoc_b"], "scope_3": ["assoc_a"] } }"#,
        );

        let scope_1 = mappings.policy_for("Scoped4", Some(&Scope::from("scope_1"))).unwrap();
        assert_eq!(scope_1.only, ["prop_a", "prop_b"]);
        assert_eq!(include_names(&mappings, "Scoped4", Some("scope_1")), ["assoc_a", "assoc_b"]);

        let scope_2 = mappings.policy_for("Scoped4", Some(&Scope::from("scope_2"))).unwrap();
        assert_eq!(scope_2.only, ["prop_a"]);
        assert!(scope_2.include.is_none());

        let scope_3 = mappings.policy_for("Scoped4", Some(&Scope::from("scope_3"))).unwrap();
        assert!(scope_3.only.is_empty());
        assert_eq!(include_names(&mappings, "Scoped4", Some("scope_3")), ["assoc_a"]);

        assert!(mappings.policy_for("Scoped4", None).is_none());
    }

    #[test]
    fn missing_names_fail() {
        let decl: MappingDecl = serde_json::from_str(r#"{ "ruby": "Lonely" }"#).unwrap();
        assert!(MappingSet::empty().map_decl(&decl).is_err());
    }
}
