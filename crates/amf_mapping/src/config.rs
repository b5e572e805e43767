//! Process-wide marshaling settings.

use alloc::string::String;
use alloc::vec::Vec;

use serde::Deserialize;

use crate::value::KeyStyle;

// -----------------------------------------------------------------------------
// Configuration

/// Settings read by the marshaler on every call.
///
/// Every field has a default, so partial documents deserialize.
///
/// # Examples
///
/// ```
/// use amf_mapping::config::Configuration;
/// use amf_mapping::value::KeyStyle;
///
/// let config: Configuration = serde_json::from_str(r#"{
///     "translate_case": true,
///     "hash_key_access": "symbol"
/// }"#).unwrap();
///
/// assert!(config.translate_case);
/// assert_eq!(config.hash_key_access, KeyStyle::Symbol);
/// assert!(config.check_for_associations);
/// assert_eq!(config.ignore_fields, ["created_at", "created_on", "updated_at", "updated_on"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Translate property names between wire camelCase and native snake_case.
    pub translate_case: bool,
    /// Map unmapped classes on first use, by the last segment of their name.
    pub auto_class_mapping: bool,
    /// Codec hint: encode arrays as collections. Not read by the marshaler.
    pub use_array_collection: bool,
    /// Key style for inbound objects with no native class.
    pub hash_key_access: KeyStyle,
    /// Include associations that are already loaded without being asked to.
    pub check_for_associations: bool,
    /// Properties dropped on population when the class policy names none.
    pub ignore_fields: Vec<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            translate_case: false,
            auto_class_mapping: false,
            use_array_collection: false,
            hash_key_access: KeyStyle::String,
            check_for_associations: true,
            ignore_fields: ["created_at", "created_on", "updated_at", "updated_on"]
                .map(String::from)
                .to_vec(),
        }
    }
}

// -----------------------------------------------------------------------------
// ConfigArc

#[cfg(feature = "std")]
use {
    alloc::sync::Arc,
    std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// A shared, lock-guarded [`Configuration`].
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Clone, Debug, Default)]
pub struct ConfigArc {
    /// The wrapped [`Configuration`].
    pub internal: Arc<RwLock<Configuration>>,
}

#[cfg(feature = "std")]
impl ConfigArc {
    pub fn new(config: Configuration) -> Self {
        Self {
            internal: Arc::new(RwLock::new(config)),
        }
    }

    /// Takes a read lock on the underlying [`Configuration`].
    pub fn read(&self) -> RwLockReadGuard<'_, Configuration> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`Configuration`].
    pub fn write(&self) -> RwLockWriteGuard<'_, Configuration> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(feature = "std")]
impl From<Configuration> for ConfigArc {
    #[inline]
    fn from(value: Configuration) -> Self {
        Self::new(value)
    }
}
