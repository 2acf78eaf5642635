//! Keys addressing a slot in a tracked container.

use std::fmt;
use std::sync::Arc;

use vigil_foundation::{Error, Result, Value};

/// The key or index a change applies to.
///
/// Keyed containers are addressed by name; sequences by index. A keyed
/// container accepts an index and stores it under its decimal name.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A named entry in a keyed container.
    Name(Arc<str>),
    /// A position in a sequence.
    Index(usize),
}

impl Key {
    /// Converts a scalar value into a key.
    ///
    /// Strings become names. Non-negative integers, and floats holding a
    /// non-negative whole number, become indices. Other numbers become the
    /// name of their decimal rendering.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedKey` for nil, booleans, and containers.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(Self::Name(s.clone())),
            Value::Int(n) => Ok(usize::try_from(*n)
                .map_or_else(|_| Self::Name(n.to_string().into()), Self::Index)),
            Value::Float(n) => Ok(whole_index(*n)
                .map_or_else(|| Self::Name(n.to_string().into()), Self::Index)),
            other => Err(Error::unsupported_key(
                format!("of type {}", other.value_type()),
                "any",
            )),
        }
    }

    /// Returns the name, if this is a name key.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Index(_) => None,
        }
    }

    /// Returns the index, if this is an index key.
    #[must_use]
    pub const fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(i) => Some(*i),
            Self::Name(_) => None,
        }
    }

    /// Returns the name this key is stored under in a keyed container.
    #[must_use]
    pub fn to_name(&self) -> Arc<str> {
        match self {
            Self::Name(name) => name.clone(),
            Self::Index(i) => i.to_string().into(),
        }
    }
}

/// Largest float below which every whole number is exactly representable.
const EXACT_FLOAT_LIMIT: f64 = 9_007_199_254_740_992.0;

fn whole_index(n: f64) -> Option<usize> {
    if !n.is_finite() || n < 0.0 || n.fract() != 0.0 || n >= EXACT_FLOAT_LIMIT {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    usize::try_from(n as u64).ok()
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name:?}"),
            Self::Index(i) => write!(f, "[{i}]"),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Name(name.into())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Name(name.into())
    }
}

impl From<Arc<str>> for Key {
    fn from(name: Arc<str>) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Name(name) => Value::String(name),
            #[allow(clippy::cast_possible_wrap)]
            Key::Index(i) => Value::Int(i as i64),
        }
    }
}
