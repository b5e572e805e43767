use alloc::string::String;

use amf_utils::hash::HashMap;

use crate::mapping::{Scope, SerializationPolicy};

// -----------------------------------------------------------------------------
// TypeMapping

/// One wire class name bound to one native class name, with the
/// serialization policies registered for it.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeMapping {
    pub(crate) native: String,
    pub(crate) wire: String,
    pub(crate) default_scope: Scope,
    pub(crate) scopes: HashMap<Scope, SerializationPolicy>,
}

impl TypeMapping {
    pub(crate) fn new(native: String, wire: String) -> Self {
        Self {
            native,
            wire,
            default_scope: Scope::DEFAULT,
            scopes: HashMap::default(),
        }
    }

    /// The native class name.
    #[inline]
    pub fn native(&self) -> &str {
        &self.native
    }

    /// The wire class name.
    #[inline]
    pub fn wire(&self) -> &str {
        &self.wire
    }

    /// The scope used when a lookup names none.
    #[inline]
    pub fn default_scope(&self) -> &Scope {
        &self.default_scope
    }

    /// Returns the policy stored under `scope`, without falling back.
    #[inline]
    pub fn policy(&self, scope: &Scope) -> Option<&SerializationPolicy> {
        self.scopes.get(scope)
    }

    /// Returns the policy for `scope`, or for the default scope when `scope`
    /// is `None`.
    ///
    /// A named scope with no stored policy yields `None`, it does not fall
    /// back to the default scope.
    pub fn resolve(&self, scope: Option<&Scope>) -> Option<&SerializationPolicy> {
        self.scopes.get(scope.unwrap_or(&self.default_scope))
    }

    /// Iterates over every scope with a stored policy.
    pub fn scopes(&self) -> impl Iterator<Item = (&Scope, &SerializationPolicy)> {
        self.scopes.iter()
    }
}
