//! Change records emitted by tracked containers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use vigil_foundation::Value;

use crate::key::Key;

/// Identity of a tracked container.
///
/// Allocated once per `monitor` call and never reused within a process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u64);

impl ContainerId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Container({})", self.0)
    }
}

/// What a change did to its key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// The key was absent and now holds a value.
    Add,
    /// The key held a value that was overwritten.
    Update,
    /// The key held a value that was removed.
    Delete,
}

impl ChangeKind {
    /// Returns the record type name (`"add"`, `"update"`, `"delete"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable description of one committed mutation.
///
/// `Add` carries only `value`, `Delete` only `old_value`, and `Update`
/// carries both.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeRecord {
    sequence: u64,
    kind: ChangeKind,
    key: Key,
    value: Option<Value>,
    old_value: Option<Value>,
    container: ContainerId,
}

impl ChangeRecord {
    pub(crate) fn add(container: ContainerId, sequence: u64, key: Key, value: Value) -> Self {
        Self {
            sequence,
            kind: ChangeKind::Add,
            key,
            value: Some(value),
            old_value: None,
            container,
        }
    }

    pub(crate) fn update(
        container: ContainerId,
        sequence: u64,
        key: Key,
        value: Value,
        old_value: Value,
    ) -> Self {
        Self {
            sequence,
            kind: ChangeKind::Update,
            key,
            value: Some(value),
            old_value: Some(old_value),
            container,
        }
    }

    pub(crate) fn delete(container: ContainerId, sequence: u64, key: Key, old_value: Value) -> Self {
        Self {
            sequence,
            kind: ChangeKind::Delete,
            key,
            value: None,
            old_value: Some(old_value),
            container,
        }
    }

    /// Position of this record in its container's log.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// What the change did.
    #[must_use]
    pub const fn kind(&self) -> ChangeKind {
        self.kind
    }

    /// The key or index affected.
    #[must_use]
    pub const fn key(&self) -> &Key {
        &self.key
    }

    /// The new value, for adds and updates.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// The previous value, for updates and deletes.
    #[must_use]
    pub const fn old_value(&self) -> Option<&Value> {
        self.old_value.as_ref()
    }

    /// The container this record belongs to.
    #[must_use]
    pub const fn container(&self) -> ContainerId {
        self.container
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:04} {} {}", self.sequence, self.kind, self.key)?;
        match (&self.old_value, &self.value) {
            (None, Some(new)) => write!(f, " = {new}"),
            (Some(old), Some(new)) => write!(f, ": {old} -> {new}"),
            (Some(old), None) => write!(f, " (was {old})"),
            (None, None) => Ok(()),
        }
    }
}
