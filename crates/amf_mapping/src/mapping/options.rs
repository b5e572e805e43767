use alloc::string::String;

use crate::mapping::{Scope, SerializationPolicy};

// -----------------------------------------------------------------------------
// MapOptions

/// Arguments to [`MappingSet::map`](crate::mapping::MappingSet::map).
///
/// Both class names are required. Policy fields are optional; calling any of
/// the policy builders marks the call as carrying a policy, which is then
/// stored under the resolved scope.
///
/// # Examples
///
/// ```
/// use amf_mapping::mapping::{MapOptions, MappingSet, Scope};
///
/// let mut mappings = MappingSet::new();
/// mappings
///     .map(MapOptions::new("User", "com.example.User").only(["username"]))
///     .unwrap();
/// mappings
///     .map(MapOptions::new("User", "com.example.User").scope("admin").except(["password"]))
///     .unwrap();
///
/// assert_eq!(mappings.policy_for("User", None).unwrap().only, ["username"]);
/// assert_eq!(mappings.policy_for("User", Some(&Scope::from("admin"))).unwrap().except, ["password"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapOptions {
    pub(crate) native: Option<String>,
    pub(crate) wire: Option<String>,
    pub(crate) scope: Option<Scope>,
    pub(crate) default_scope: Option<Scope>,
    pub(crate) policy: Option<SerializationPolicy>,
}

impl MapOptions {
    /// Options binding `native` to `wire`, with no policy.
    pub fn new(native: impl Into<String>, wire: impl Into<String>) -> Self {
        Self {
            native: Some(native.into()),
            wire: Some(wire.into()),
            ..Self::default()
        }
    }

    pub fn native(mut self, name: impl Into<String>) -> Self {
        self.native = Some(name.into());
        self
    }

    pub fn wire(mut self, name: impl Into<String>) -> Self {
        self.wire = Some(name.into());
        self
    }

    /// Stores the policy under `scope` instead of the mapping's default scope.
    pub fn scope(mut self, scope: impl Into<Scope>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Makes `scope` the mapping's default scope and stores the policy there.
    ///
    /// Takes precedence over [`scope`](Self::scope).
    pub fn default_scope(mut self, scope: impl Into<Scope>) -> Self {
        self.default_scope = Some(scope.into());
        self
    }

    /// Replaces the whole policy.
    pub fn policy(mut self, policy: SerializationPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    #[inline]
    fn edit(mut self, f: impl FnOnce(SerializationPolicy) -> SerializationPolicy) -> Self {
        self.policy = Some(f(self.policy.take().unwrap_or_default()));
        self
    }

    pub fn only<I: IntoIterator<Item = S>, S: Into<String>>(self, names: I) -> Self {
        self.edit(|p| p.only(names))
    }

    pub fn except<I: IntoIterator<Item = S>, S: Into<String>>(self, names: I) -> Self {
        self.edit(|p| p.except(names))
    }

    pub fn methods<I: IntoIterator<Item = S>, S: Into<String>>(self, names: I) -> Self {
        self.edit(|p| p.methods(names))
    }

    pub fn include<I: IntoIterator<Item = S>, S: Into<String>>(self, names: I) -> Self {
        self.edit(|p| p.include(names))
    }

    pub fn include_with(self, name: impl Into<String>, options: SerializationPolicy) -> Self {
        self.edit(|p| p.include_with(name, options))
    }

    pub fn ignore_fields<I: IntoIterator<Item = S>, S: Into<String>>(self, names: I) -> Self {
        self.edit(|p| p.ignore_fields(names))
    }
}
