use alloc::string::{String, ToString};

use amf_utils::hash::HashMap;

use crate::class::Class;
use crate::error::{ConfigurationError, TypeResolutionError};
use crate::mapping::{MapOptions, Scope, SerializationPolicy, TypeMapping};
use crate::messages::DEFAULT_MAPPINGS;

// -----------------------------------------------------------------------------
// MappingSet

type MappingId = u32;

/// The type registry: a bidirectional table of native class name to wire
/// class name, with per-scope serialization policies for each pair.
///
/// Every name resolves to at most one counterpart. Registering a pair that
/// shares a name with an existing record updates that record in place.
///
/// # Examples
///
/// ```
/// use amf_mapping::mapping::{MapOptions, MappingSet, Scope};
///
/// let mut mappings = MappingSet::new();
/// mappings
///     .map(MapOptions::new("R", "A").default_scope("scope_a").except(["a"]))
///     .unwrap();
/// mappings
///     .map(MapOptions::new("R", "A").scope("scope_b").except(["b"]))
///     .unwrap();
///
/// assert_eq!(mappings.wire_name_for("R"), Some("A"));
/// assert_eq!(mappings.native_name_for("A"), Some("R"));
/// assert_eq!(mappings.policy_for("R", None).unwrap().except, ["a"]);
/// assert_eq!(mappings.policy_for("R", Some(&Scope::from("scope_b"))).unwrap().except, ["b"]);
/// ```
#[derive(Clone, Debug)]
pub struct MappingSet {
    records: HashMap<MappingId, TypeMapping>,
    by_wire: HashMap<String, MappingId>,
    by_native: HashMap<String, MappingId>,
    // wire names declared through `as_class`, keyed by native type path
    declared: HashMap<&'static str, String>,
    next_id: MappingId,
}

impl Default for MappingSet {
    /// See [`MappingSet::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl MappingSet {
    /// Creates an empty set, without the framework message mappings.
    pub fn empty() -> Self {
        Self {
            records: HashMap::default(),
            by_wire: HashMap::default(),
            by_native: HashMap::default(),
            declared: HashMap::default(),
            next_id: 0,
        }
    }

    /// Creates a set holding the default mappings for the framework message
    /// types carried by the RPC envelope.
    pub fn new() -> Self {
        let mut set = Self::empty();
        set.map_defaults();
        set
    }

    /// Clears every mapping and reinstalls the defaults.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn map_defaults(&mut self) {
        for (native, wire) in DEFAULT_MAPPINGS {
            self.bind(native, wire);
        }
    }

    /// Returns the number of mappings.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over every mapping, in no particular order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMapping> {
        self.records.values()
    }

    // -------------------------------------------------------------------------
    // Registration

    /// Registers a mapping and optionally a policy for it.
    ///
    /// The existing record is looked up by wire name first, then by native
    /// name. Names the record no longer carries are released, and a record
    /// that loses one of its names to this call is dropped.
    ///
    /// The policy, if any, is stored under the `default_scope` option (which
    /// also becomes the mapping's default scope), else the `scope` option,
    /// else the mapping's current default scope. It replaces any policy
    /// already stored under that scope.
    pub fn map(&mut self, options: MapOptions) -> Result<&TypeMapping, ConfigurationError> {
        let native = options
            .native
            .filter(|n| !n.is_empty())
            .ok_or(ConfigurationError::MissingNativeName)?;
        let wire = options
            .wire
            .filter(|w| !w.is_empty())
            .ok_or(ConfigurationError::MissingWireName)?;

        let id = self.bind(&native, &wire);
        let mapping = self
            .records
            .entry(id)
            .or_insert_with(|| TypeMapping::new(native.clone(), wire.clone()));

        let scope = match options.default_scope {
            Some(scope) => {
                mapping.default_scope = scope.clone();
                scope
            }
            None => options
                .scope
                .unwrap_or_else(|| mapping.default_scope.clone()),
        };

        if let Some(policy) = options.policy {
            log::trace!("storing `{native}` policy under scope `{scope}`");
            mapping.scopes.insert(scope, policy);
        }

        Ok(mapping)
    }

    // Points both names at one record, creating it if needed.
    fn bind(&mut self, native: &str, wire: &str) -> MappingId {
        let found = self
            .by_wire
            .get(wire)
            .or_else(|| self.by_native.get(native))
            .copied();

        let id = match found {
            Some(id) => id,
            None => {
                let id = self.next_id;
                self.next_id += 1;
                self.records
                    .insert(id, TypeMapping::new(native.to_string(), wire.to_string()));
                id
            }
        };

        if let Some(mapping) = self.records.get_mut(&id) {
            if mapping.wire != wire {
                let stale = core::mem::replace(&mut mapping.wire, wire.to_string());
                self.by_wire.remove(&stale);
            }
            if mapping.native != native {
                let stale = core::mem::replace(&mut mapping.native, native.to_string());
                self.by_native.remove(&stale);
            }
        }

        if let Some(other) = self.by_wire.insert(wire.to_string(), id)
            && other != id
        {
            self.drop_record(other);
        }
        if let Some(other) = self.by_native.insert(native.to_string(), id)
            && other != id
        {
            self.drop_record(other);
        }

        id
    }

    fn drop_record(&mut self, id: MappingId) {
        if let Some(orphan) = self.records.remove(&id) {
            if self.by_wire.get(&orphan.wire) == Some(&id) {
                self.by_wire.remove(&orphan.wire);
            }
            if self.by_native.get(&orphan.native) == Some(&id) {
                self.by_native.remove(&orphan.native);
            }
            log::debug!(
                "dropped mapping `{}` <-> `{}`, its names were rebound",
                orphan.native,
                orphan.wire
            );
        }
    }

    // -------------------------------------------------------------------------
    // Lookup

    /// Returns the wire class name mapped to `native`.
    pub fn wire_name_for(&self, native: &str) -> Option<&str> {
        self.get(native).map(TypeMapping::wire)
    }

    /// Returns the native class name mapped to `wire`.
    pub fn native_name_for(&self, wire: &str) -> Option<&str> {
        match self.by_wire.get(wire) {
            Some(id) => self.records.get(id).map(TypeMapping::native),
            None => None,
        }
    }

    /// Returns the mapping for the native class name `native`.
    pub fn get(&self, native: &str) -> Option<&TypeMapping> {
        match self.by_native.get(native) {
            Some(id) => self.records.get(id),
            None => None,
        }
    }

    /// Resolves the policy for `native` in `scope`.
    ///
    /// With no scope, the mapping's current default scope is used. Returns
    /// `None` when the class is unmapped or nothing is stored for the scope.
    pub fn policy_for(&self, native: &str, scope: Option<&Scope>) -> Option<&SerializationPolicy> {
        self.get(native).and_then(|mapping| mapping.resolve(scope))
    }

    // -------------------------------------------------------------------------
    // Auto-mapping

    /// Maps an unmapped native class to the last `::` segment of its name.
    ///
    /// Returns the wire name, which is the existing one if `native` is already
    /// mapped.
    pub fn auto_map_native(&mut self, native: &str) -> Result<String, TypeResolutionError> {
        if let Some(wire) = self.wire_name_for(native) {
            return Ok(wire.to_string());
        }
        let derived = last_segment(native, "::")?;
        if let Some(existing) = self.native_name_for(derived) {
            return Err(TypeResolutionError::AutoMapCollision {
                name: native.to_string(),
                derived: derived.to_string(),
                existing: existing.to_string(),
            });
        }

        log::debug!("auto-mapping native class `{native}` to `{derived}`");
        self.bind(native, derived);
        Ok(derived.to_string())
    }

    /// Maps an unmapped wire class to the last `.` segment of its name.
    ///
    /// Returns the native name, which is the existing one if `wire` is already
    /// mapped.
    pub fn auto_map_wire(&mut self, wire: &str) -> Result<String, TypeResolutionError> {
        if let Some(native) = self.native_name_for(wire) {
            return Ok(native.to_string());
        }
        let derived = last_segment(wire, ".")?;
        if let Some(existing) = self.wire_name_for(derived) {
            return Err(TypeResolutionError::AutoMapCollision {
                name: wire.to_string(),
                derived: derived.to_string(),
                existing: existing.to_string(),
            });
        }

        log::debug!("auto-mapping wire class `{wire}` to `{derived}`");
        self.bind(derived, wire);
        Ok(derived.to_string())
    }

    // -------------------------------------------------------------------------
    // In-model mapping

    /// Maps the class `T` to the wire class `wire`.
    ///
    /// Must be called before [`map_amf`](Self::map_amf) for the same class.
    pub fn as_class<T: Class>(&mut self, wire: impl Into<String>) -> &TypeMapping {
        let wire = wire.into();
        let id = self.bind(T::TYPE_PATH, &wire);
        self.declared.insert(T::TYPE_PATH, wire.clone());
        self.records
            .entry(id)
            .or_insert_with(|| TypeMapping::new(T::TYPE_PATH.to_string(), wire))
    }

    /// Records a policy for `T` using the wire class set by
    /// [`as_class`](Self::as_class). Class names in `options` are overridden.
    pub fn map_amf<T: Class>(
        &mut self,
        options: MapOptions,
    ) -> Result<&TypeMapping, ConfigurationError> {
        let wire = self
            .declared
            .get(T::TYPE_PATH)
            .cloned()
            .ok_or(ConfigurationError::MissingAsClass(T::TYPE_PATH))?;
        self.map(options.native(T::TYPE_PATH).wire(wire))
    }

    /// Like [`map_amf`](Self::map_amf), storing the policy under `scope`.
    pub fn map_amf_scoped<T: Class>(
        &mut self,
        scope: impl Into<Scope>,
        options: MapOptions,
    ) -> Result<&TypeMapping, ConfigurationError> {
        self.map_amf::<T>(options.scope(scope))
    }
}

fn last_segment<'a>(name: &'a str, separator: &str) -> Result<&'a str, TypeResolutionError> {
    match name.rsplit(separator).next() {
        Some(segment) if !segment.is_empty() => Ok(segment),
        _ => Err(TypeResolutionError::EmptyName),
    }
}

// -----------------------------------------------------------------------------
// MappingSetArc

#[cfg(feature = "std")]
use {
    alloc::sync::Arc,
    std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// A shared, lock-guarded [`MappingSet`].
///
/// Clones share the same set.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Clone, Default)]
pub struct MappingSetArc {
    /// The wrapped [`MappingSet`].
    pub internal: Arc<RwLock<MappingSet>>,
}

#[cfg(feature = "std")]
impl MappingSetArc {
    pub fn new(mappings: MappingSet) -> Self {
        Self {
            internal: Arc::new(RwLock::new(mappings)),
        }
    }

    /// Takes a read lock on the underlying [`MappingSet`].
    pub fn read(&self) -> RwLockReadGuard<'_, MappingSet> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`MappingSet`].
    pub fn write(&self) -> RwLockWriteGuard<'_, MappingSet> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a mapping. See [`MappingSet::map`].
    pub fn map(&self, options: MapOptions) -> Result<(), ConfigurationError> {
        self.write().map(options).map(|_| ())
    }

    /// Resolves a policy and clones it out of the lock.
    pub fn resolve_policy(&self, native: &str, scope: Option<&Scope>) -> Option<SerializationPolicy> {
        self.read().policy_for(native, scope).cloned()
    }

    /// Clears every mapping and reinstalls the defaults.
    pub fn reset(&self) {
        self.write().reset();
    }
}

#[cfg(feature = "std")]
impl core::fmt::Debug for MappingSetArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.read().by_native.keys().fmt(f)
    }
}

#[cfg(feature = "std")]
impl From<MappingSet> for MappingSetArc {
    #[inline]
    fn from(value: MappingSet) -> Self {
        Self::new(value)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::MappingSet;
    use crate::class::{Class, Model};
    use crate::error::{ConfigurationError, TypeResolutionError};
    use crate::mapping::{MapOptions, Scope};

    #[derive(Debug)]
    struct Invoice;

    impl Model for Invoice {
        fn type_path(&self) -> &'static str {
            Self::TYPE_PATH
        }
    }

    impl Class for Invoice {
        const TYPE_PATH: &'static str = "billing::Invoice";

        fn allocate() -> Self {
            Invoice
        }
    }

    #[test]
    fn default_mappings() {
        let mappings = MappingSet::new();
        assert_eq!(
            mappings.native_name_for("flex.messaging.messages.RemotingMessage"),
            Some("amf_mapping::messages::RemotingMessage")
        );
        assert_eq!(
            mappings.wire_name_for("amf_mapping::messages::AcknowledgeMessageExt"),
            Some("DSK")
        );
        assert_eq!(mappings.len(), 9);
        assert!(MappingSet::empty().is_empty());
    }

    #[test]
    fn missing_names() {
        let mut mappings = MappingSet::empty();
        assert_eq!(
            mappings.map(MapOptions::default().wire("A")).unwrap_err(),
            ConfigurationError::MissingNativeName
        );
        assert_eq!(
            mappings.map(MapOptions::default().native("R")).unwrap_err(),
            ConfigurationError::MissingWireName
        );
        assert_eq!(
            mappings.map(MapOptions::new("", "A")).unwrap_err(),
            ConfigurationError::MissingNativeName
        );
        assert!(mappings.is_empty());
    }

    #[test]
    fn assume_default_scope() {
        let mut mappings = MappingSet::empty();
        mappings
            .map(MapOptions::new("R", "A").only(["prop_a"]))
            .unwrap();

        let mapping = mappings.get("R").unwrap();
        assert_eq!(mapping.default_scope(), &Scope::DEFAULT);
        assert_eq!(mapping.policy(&Scope::DEFAULT).unwrap().only, ["prop_a"]);
    }

    #[test]
    fn scopes_accumulate() {
        let mut mappings = MappingSet::empty();
        mappings
            .map(MapOptions::new("R", "A").only(["a"]))
            .unwrap();
        mappings
            .map(MapOptions::new("R", "A").scope("other").only(["b"]))
            .unwrap();

        let other = Scope::from("other");
        assert_eq!(mappings.policy_for("R", None).unwrap().only, ["a"]);
        assert_eq!(mappings.policy_for("R", Some(&other)).unwrap().only, ["b"]);
        assert!(mappings.policy_for("R", Some(&Scope::from("missing"))).is_none());
        assert!(mappings.policy_for("Unknown", None).is_none());
    }

    #[test]
    fn changing_default_scope_keeps_policies() {
        let mut mappings = MappingSet::empty();
        mappings
            .map(MapOptions::new("R", "A").except(["x"]))
            .unwrap();
        mappings
            .map(MapOptions::new("R", "A").default_scope("scope_a").except(["a"]))
            .unwrap();

        assert_eq!(mappings.policy_for("R", None).unwrap().except, ["a"]);
        assert_eq!(
            mappings.policy_for("R", Some(&Scope::DEFAULT)).unwrap().except,
            ["x"]
        );
    }

    #[test]
    fn default_scope_without_policy() {
        let mut mappings = MappingSet::empty();
        mappings
            .map(MapOptions::new("R", "A").scope("s").only(["a"]))
            .unwrap();
        mappings
            .map(MapOptions::new("R", "A").default_scope("s"))
            .unwrap();
        assert_eq!(mappings.policy_for("R", None).unwrap().only, ["a"]);
    }

    #[test]
    fn rebinding_releases_stale_names() {
        let mut mappings = MappingSet::empty();
        mappings.map(MapOptions::new("R", "A")).unwrap();
        mappings.map(MapOptions::new("R", "B")).unwrap();

        assert_eq!(mappings.wire_name_for("R"), Some("B"));
        assert_eq!(mappings.native_name_for("B"), Some("R"));
        assert_eq!(mappings.native_name_for("A"), None);
        assert_eq!(mappings.len(), 1);

        mappings.map(MapOptions::new("S", "C")).unwrap();
        mappings.map(MapOptions::new("S", "B")).unwrap();
        assert_eq!(mappings.wire_name_for("S"), Some("B"));
        assert_eq!(mappings.wire_name_for("R"), None);
        assert_eq!(mappings.native_name_for("C"), None);
        assert_eq!(mappings.len(), 1);
    }

    #[test]
    fn auto_map_is_idempotent() {
        let mut mappings = MappingSet::empty();
        let first = mappings.auto_map_native("Example::Date").unwrap();
        let second = mappings.auto_map_native("Example::Date").unwrap();
        assert_eq!(first, "Date");
        assert_eq!(first, second);
        assert_eq!(mappings.len(), 1);

        let native = mappings.auto_map_wire("com.test.Unmapped").unwrap();
        assert_eq!(native, "Unmapped");
        assert_eq!(mappings.native_name_for("com.test.Unmapped"), Some("Unmapped"));
    }

    #[test]
    fn auto_map_collision() {
        let mut mappings = MappingSet::empty();
        mappings.auto_map_native("Billing::Account").unwrap();

        let err = mappings.auto_map_native("Admin::Account").unwrap_err();
        assert_eq!(
            err,
            TypeResolutionError::AutoMapCollision {
                name: "Admin::Account".into(),
                derived: "Account".into(),
                existing: "Billing::Account".into(),
            }
        );
        assert_eq!(mappings.wire_name_for("Billing::Account"), Some("Account"));
        assert_eq!(
            mappings.auto_map_wire("com.example.").unwrap_err(),
            TypeResolutionError::EmptyName
        );
    }

    #[test]
    fn reset_restores_defaults() {
        let mut mappings = MappingSet::new();
        mappings.map(MapOptions::new("R", "A")).unwrap();
        mappings.reset();
        assert_eq!(mappings.wire_name_for("R"), None);
        assert_eq!(mappings.len(), 9);
    }

    #[test]
    fn in_model_mapping() {
        let mut mappings = MappingSet::new();
        assert_eq!(
            mappings.map_amf::<Invoice>(MapOptions::default().only(["total"])).unwrap_err(),
            ConfigurationError::MissingAsClass("billing::Invoice")
        );

        mappings.as_class::<Invoice>("com.billing.Invoice");
        mappings.map_amf::<Invoice>(MapOptions::default().only(["total"])).unwrap();
        mappings
            .map_amf_scoped::<Invoice>("admin", MapOptions::default().except(["secret"]))
            .unwrap();

        assert_eq!(mappings.wire_name_for("billing::Invoice"), Some("com.billing.Invoice"));
        assert_eq!(mappings.policy_for("billing::Invoice", None).unwrap().only, ["total"]);
        assert_eq!(
            mappings.policy_for("billing::Invoice", Some(&Scope::from("admin"))).unwrap().except,
            ["secret"]
        );
    }
}
