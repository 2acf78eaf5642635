//! Append-only change log.

use std::ops::Index;

use crate::key::Key;
use crate::record::{ChangeKind, ChangeRecord, ContainerId};

/// Ordered history of the changes committed to one container.
///
/// Records are only ever appended; the log is never reordered or pruned.
#[derive(Clone, Debug)]
pub struct ChangeLog {
    container: ContainerId,
    records: Vec<ChangeRecord>,
}

impl ChangeLog {
    pub(crate) fn with_capacity(container: ContainerId, capacity: usize) -> Self {
        Self {
            container,
            records: Vec::with_capacity(capacity),
        }
    }

    /// Sequence number the next appended record will carry.
    pub(crate) fn next_sequence(&self) -> u64 {
        self.records.len() as u64
    }

    /// Appends a record and returns its position.
    pub(crate) fn append(&mut self, record: ChangeRecord) -> usize {
        debug_assert_eq!(record.sequence(), self.next_sequence());
        debug_assert_eq!(record.container(), self.container);
        self.records.push(record);
        self.records.len() - 1
    }

    /// The container this log belongs to.
    #[must_use]
    pub const fn container(&self) -> ContainerId {
        self.container
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been committed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Gets a record by position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ChangeRecord> {
        self.records.get(index)
    }

    /// Returns the most recent record.
    #[must_use]
    pub fn last(&self) -> Option<&ChangeRecord> {
        self.records.last()
    }

    /// Returns all records, oldest first.
    #[must_use]
    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    /// Returns an iterator over records, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, ChangeRecord> {
        self.records.iter()
    }

    /// Returns the records from position `start` onwards.
    ///
    /// Empty if `start` is past the end.
    #[must_use]
    pub fn since(&self, start: usize) -> &[ChangeRecord] {
        self.records.get(start..).unwrap_or(&[])
    }

    /// Returns the records that touched `key`, oldest first.
    pub fn history<'a>(&'a self, key: &'a Key) -> impl Iterator<Item = &'a ChangeRecord> + 'a {
        self.records.iter().filter(move |r| r.key() == key)
    }

    /// Counts the records of one kind.
    #[must_use]
    pub fn count(&self, kind: ChangeKind) -> usize {
        self.records.iter().filter(|r| r.kind() == kind).count()
    }
}

impl Index<usize> for ChangeLog {
    type Output = ChangeRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a ChangeLog {
    type Item = &'a ChangeRecord;
    type IntoIter = std::slice::Iter<'a, ChangeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
