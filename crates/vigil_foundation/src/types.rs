//! Type descriptors and container classification.

use std::fmt;

use crate::error::Error;
use crate::value::Value;

/// Type descriptor for a [`Value`].
///
/// Used in error messages and when deciding how a value may be tracked.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// The nil type (only value: nil).
    Nil,
    /// Boolean type.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// String type.
    String,
    /// Vector of values.
    Vec,
    /// Map from names to values.
    Map,
}

impl Type {
    /// Returns true for the types that may be used as a single key.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(self, Self::String | Self::Int | Self::Float)
    }

    /// Returns true for the types that can be tracked.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Vec | Self::Map)
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Vec => write!(f, "vec"),
            Self::Map => write!(f, "map"),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// How a tracked container is addressed.
///
/// Fixed when tracking starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Plain name-to-value mapping.
    Keyed,
    /// Integer-indexed, length-bearing sequence.
    Sequence,
}

impl ContainerKind {
    /// Classifies a value as a trackable container.
    ///
    /// # Errors
    ///
    /// Returns an `Unclassifiable` error for anything other than a vec or map.
    pub fn classify(value: &Value) -> crate::Result<Self> {
        if value.is_sequence() {
            Ok(Self::Sequence)
        } else if value.is_keyed() {
            Ok(Self::Keyed)
        } else {
            Err(Error::unclassifiable(value.value_type()))
        }
    }

    /// Returns the lowercase name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyed => "keyed",
            Self::Sequence => "sequence",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
