use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;
use core::hash::{Hash, Hasher};

use amf_utils::hash::hashbrown::Equivalent;
use serde::Deserialize;

// -----------------------------------------------------------------------------
// Symbol

/// An interned-style identifier, distinct from a plain string key.
///
/// Property maps can be keyed either by strings or by symbols. The two never
/// compare equal, even when they spell the same name.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Symbol(Cow<'static, str>);

impl Symbol {
    /// Creates a symbol from a name.
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Returns the symbol's name.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// -----------------------------------------------------------------------------
// KeyStyle

/// Which identifier representation a property map uses for its keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStyle {
    /// Keys are plain strings. The codec always produces this style.
    #[default]
    String,
    /// Keys are [`Symbol`]s.
    Symbol,
}

// -----------------------------------------------------------------------------
// Key

const STRING_TAG: u8 = 0;
const SYMBOL_TAG: u8 = 1;

/// A property map key.
///
/// # Examples
///
/// ```
/// use amf_mapping::value::{Key, KeyStyle};
///
/// let key = Key::from("first_name");
/// assert_eq!(key.style(), KeyStyle::String);
///
/// let sym = key.clone().into_style(KeyStyle::Symbol);
/// assert_eq!(sym.as_str(), "first_name");
/// assert_ne!(sym, key);
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Key {
    String(Cow<'static, str>),
    Symbol(Symbol),
}

impl Key {
    /// Creates a string key.
    #[inline]
    pub fn string(name: impl Into<Cow<'static, str>>) -> Self {
        Self::String(name.into())
    }

    /// Creates a symbol key.
    #[inline]
    pub fn symbol(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Symbol(Symbol::new(name))
    }

    /// Returns the key's name regardless of its style.
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            Self::String(s) => s,
            Self::Symbol(s) => s.as_str(),
        }
    }

    /// Returns the style of this key.
    #[inline]
    pub const fn style(&self) -> KeyStyle {
        match self {
            Self::String(_) => KeyStyle::String,
            Self::Symbol(_) => KeyStyle::Symbol,
        }
    }

    /// Converts the key to the given style, keeping its name.
    pub fn into_style(self, style: KeyStyle) -> Self {
        match (self, style) {
            (Self::Symbol(s), KeyStyle::String) => Self::String(s.0),
            (Self::String(s), KeyStyle::Symbol) => Self::Symbol(Symbol(s)),
            (key, _) => key,
        }
    }

    /// Borrowed form used for lookups without allocating.
    #[inline]
    pub(crate) fn as_key_ref(&self) -> KeyRef<'_> {
        KeyRef {
            style: self.style(),
            name: self.as_str(),
        }
    }
}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_key_ref().hash(state);
    }
}

impl From<&'static str> for Key {
    #[inline]
    fn from(value: &'static str) -> Self {
        Self::String(Cow::Borrowed(value))
    }
}

impl From<String> for Key {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(Cow::Owned(value))
    }
}

impl From<Symbol> for Key {
    #[inline]
    fn from(value: Symbol) -> Self {
        Self::Symbol(value)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => fmt::Debug::fmt(s, f),
            Self::Symbol(s) => fmt::Debug::fmt(s, f),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// -----------------------------------------------------------------------------
// KeyRef

/// A borrowed key, hashed identically to [`Key`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct KeyRef<'a> {
    pub(crate) style: KeyStyle,
    pub(crate) name: &'a str,
}

impl<'a> KeyRef<'a> {
    #[inline]
    pub(crate) const fn string(name: &'a str) -> Self {
        Self {
            style: KeyStyle::String,
            name,
        }
    }

    #[inline]
    pub(crate) const fn symbol(name: &'a str) -> Self {
        Self {
            style: KeyStyle::Symbol,
            name,
        }
    }
}

impl Hash for KeyRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(match self.style {
            KeyStyle::String => STRING_TAG,
            KeyStyle::Symbol => SYMBOL_TAG,
        });
        self.name.hash(state);
    }
}

impl Equivalent<Key> for KeyRef<'_> {
    #[inline]
    fn equivalent(&self, key: &Key) -> bool {
        self.style == key.style() && self.name == key.as_str()
    }
}
