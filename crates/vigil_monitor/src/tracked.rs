//! Tracked containers.
//!
//! A [`Tracked`] owns a keyed map or a sequence and is the only way to
//! mutate it. Every committed mutation becomes a [`ChangeRecord`] that is
//! appended to the container's [`ChangeLog`] and handed to the observer
//! before the mutating call returns.
//!
//! The observer only ever sees `&ChangeRecord` and `&ChangeLog`, and all
//! mutation goes through `&mut self`, so an observer cannot reenter the
//! container it is watching.

use std::sync::Arc;

use vigil_foundation::{
    ContainerKind, Error, ErrorContext, LtMap, LtVec, Result, Type, Value,
};

use crate::config::MonitorConfig;
use crate::detached::Detached;
use crate::key::Key;
use crate::log::ChangeLog;
use crate::record::{ChangeRecord, ContainerId};

/// What a successful `pop` hands back.
///
/// Sequences return the removed element; keyed containers return the key
/// that was removed.
#[derive(Clone, Debug, PartialEq)]
pub enum Popped {
    /// Element removed from a sequence.
    Value(Value),
    /// Key removed from a keyed container.
    Key(Key),
}

impl Popped {
    /// Returns the removed element, for sequences.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Key(_) => None,
        }
    }

    /// Returns the removed key, for keyed containers.
    #[must_use]
    pub fn key(&self) -> Option<&Key> {
        match self {
            Self::Key(key) => Some(key),
            Self::Value(_) => None,
        }
    }

    /// Converts into a value: the element itself, or the key as a value.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Value(value) => value,
            Self::Key(key) => key.into(),
        }
    }
}

/// Storage behind a tracked container.
#[derive(Clone, Debug)]
enum Target {
    Keyed(LtMap<Arc<str>, Value>),
    Sequence(LtVec<Value>),
}

impl Target {
    fn from_value(value: Value) -> Result<Self> {
        let kind = ContainerKind::classify(&value)?;
        match (kind, value) {
            (ContainerKind::Keyed, Value::Map(map)) => Ok(Self::Keyed(map)),
            (ContainerKind::Sequence, Value::Vec(items)) => Ok(Self::Sequence(items)),
            (_, other) => Err(Error::unclassifiable(other.value_type())),
        }
    }

    fn kind(&self) -> ContainerKind {
        match self {
            Self::Keyed(_) => ContainerKind::Keyed,
            Self::Sequence(_) => ContainerKind::Sequence,
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Keyed(map) => map.len(),
            Self::Sequence(items) => items.len(),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Keyed(map) => Value::Map(map.clone()),
            Self::Sequence(items) => Value::Vec(items.clone()),
        }
    }
}

/// Starts tracking `target` with default configuration.
///
/// # Errors
///
/// Returns an `Unclassifiable` error unless `target` is a vec or a map.
pub fn monitor<F>(target: Value, observer: F) -> Result<Tracked<F>>
where
    F: FnMut(&ChangeRecord, &ChangeLog),
{
    monitor_with(target, observer, MonitorConfig::default())
}

/// Starts tracking `target` with the given configuration.
///
/// # Errors
///
/// Returns an `Unclassifiable` error unless `target` is a vec or a map.
pub fn monitor_with<F>(target: Value, observer: F, config: MonitorConfig) -> Result<Tracked<F>>
where
    F: FnMut(&ChangeRecord, &ChangeLog),
{
    let target = Target::from_value(target).map_err(|err| {
        let mut context = ErrorContext::new().with_frame("monitor");
        if let Some(label) = &config.label {
            context = context.with_source(label.clone());
        }
        err.with_context(context)
    })?;

    let id = ContainerId::next();
    tracing::debug!(
        container = %id,
        kind = %target.kind(),
        label = ?config.label,
        len = target.len(),
        "monitor attached"
    );

    Ok(Tracked {
        id,
        target,
        log: ChangeLog::with_capacity(id, config.log_capacity),
        observer,
        config,
    })
}

/// Stops tracking, then calls `on_detach` once with the detached handle.
///
/// Equivalent to [`Tracked::unmonitor`].
pub fn unmonitor<F, D>(tracked: Tracked<F>, on_detach: D) -> Detached
where
    F: FnMut(&ChangeRecord, &ChangeLog),
    D: FnOnce(&Detached),
{
    tracked.unmonitor(on_detach)
}

/// A container whose mutations are recorded and observed.
pub struct Tracked<F> {
    id: ContainerId,
    target: Target,
    log: ChangeLog,
    observer: F,
    config: MonitorConfig,
}

impl<F> Tracked<F>
where
    F: FnMut(&ChangeRecord, &ChangeLog),
{
    /// Identity shared by every record this container emits.
    #[must_use]
    pub const fn id(&self) -> ContainerId {
        self.id
    }

    /// Whether this container is keyed or a sequence.
    #[must_use]
    pub fn kind(&self) -> ContainerKind {
        self.target.kind()
    }

    /// The configuration this container was created with.
    #[must_use]
    pub const fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Snapshot of the current contents. O(1).
    #[must_use]
    pub fn target(&self) -> Value {
        self.target.to_value()
    }

    /// Returns the value stored under `key`.
    ///
    /// Name keys never match anything in a sequence.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        let key = key.into();
        match &self.target {
            Target::Keyed(map) => map.get(&*key.to_name()),
            Target::Sequence(items) => key.as_index().and_then(|i| items.get(i)),
        }
    }

    /// Returns true if `key` currently holds a value.
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.get(key).is_some()
    }

    /// Number of elements (sequence) or keys (keyed).
    #[must_use]
    pub fn len(&self) -> usize {
        self.target.len()
    }

    /// Returns true if the container holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The full change history.
    #[must_use]
    pub const fn log(&self) -> &ChangeLog {
        &self.log
    }

    /// Adds or updates `key`, or deletes it when `value` is nil.
    ///
    /// On a sequence, `key` must be an index no greater than the length;
    /// the length itself appends.
    ///
    /// # Errors
    ///
    /// `UnsupportedKey` for a name key on a sequence, `IndexOutOfBounds`
    /// past the end of a sequence, and `NotLastIndex` when deleting any
    /// element but the last.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Result<()> {
        let (key, value) = (key.into(), value.into());
        self.set_entry(key, value)
            .map_err(|err| self.annotate(err, "set"))
    }

    /// Applies every entry of `mapping` in ascending key order, not the
    /// order the entries were inserted.
    ///
    /// Stops at the first failing entry; entries before it stay committed.
    ///
    /// # Errors
    ///
    /// Same as [`Tracked::set`] for each entry.
    pub fn set_many(&mut self, mapping: &LtMap<Arc<str>, Value>) -> Result<()> {
        self.merge(mapping)
            .map_err(|err| self.annotate(err, "set_many"))
    }

    /// Dynamic form of `set`: a map applies all its entries, a scalar
    /// names a single key, and `None` requests a delete.
    ///
    /// # Errors
    ///
    /// `UnsupportedKey` when `key_or_mapping` is neither a map nor a scalar,
    /// otherwise as [`Tracked::set`].
    pub fn assign(&mut self, key_or_mapping: &Value, value: Option<Value>) -> Result<()> {
        let result = match key_or_mapping {
            Value::Map(mapping) => self.merge(mapping),
            key if key.is_scalar() => Key::from_value(key)
                .and_then(|key| self.set_entry(key, value.unwrap_or(Value::Nil))),
            other => Err(Error::unsupported_key(
                format!("of type {}", other.value_type()),
                self.kind().as_str(),
            )),
        };
        result.map_err(|err| self.annotate(err, "assign"))
    }

    /// Appends values to a sequence, or merges maps into a keyed container.
    ///
    /// Returns the new length or key count.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if a keyed container is given anything but maps; no
    /// argument is applied in that case.
    pub fn push<I>(&mut self, values: I) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.push_values(values)
            .map_err(|err| self.annotate(err, "push"))
    }

    /// Removes `key`, or the last element of a sequence when `key` is `None`.
    ///
    /// Returns `Ok(None)` without recording anything if the key is absent.
    ///
    /// # Errors
    ///
    /// `MissingKey` for a keyed container without a key, and `NotLastIndex`
    /// for a sequence index other than the last.
    pub fn pop(&mut self, key: Option<Key>) -> Result<Option<Popped>> {
        self.remove_entry(key)
            .map_err(|err| self.annotate(err, "pop"))
    }

    /// Shorthand for `pop(Some(key))`.
    ///
    /// # Errors
    ///
    /// As [`Tracked::pop`].
    pub fn remove(&mut self, key: impl Into<Key>) -> Result<Option<Popped>> {
        self.pop(Some(key.into()))
    }

    /// Stops tracking and calls `on_detach` once with the detached handle.
    ///
    /// The observer is dropped before `on_detach` runs.
    pub fn unmonitor<D>(self, on_detach: D) -> Detached
    where
        D: FnOnce(&Detached),
    {
        let Self {
            id,
            target,
            log,
            observer,
            config,
        } = self;
        drop(observer);

        let detached = Detached::new(id, target.kind(), target.to_value(), log, config.label);
        tracing::debug!(
            container = %id,
            label = ?detached.label(),
            records = detached.log().len(),
            "monitor detached"
        );
        on_detach(&detached);
        detached
    }

    fn set_entry(&mut self, key: Key, value: Value) -> Result<()> {
        if value.is_nil() {
            return self.remove_entry(Some(key)).map(drop);
        }

        let sequence = self.log.next_sequence();
        let record = match &mut self.target {
            Target::Keyed(map) => {
                let name = key.to_name();
                let previous = map.get(&*name).cloned();
                *map = map.insert(name.clone(), value.clone());
                match previous {
                    Some(old) => ChangeRecord::update(self.id, sequence, Key::Name(name), value, old),
                    None => ChangeRecord::add(self.id, sequence, Key::Name(name), value),
                }
            }
            Target::Sequence(items) => {
                let index = index_of(&key)?;
                let length = items.len();
                if let (Some(old), Some(updated)) =
                    (items.get(index).cloned(), items.update(index, value.clone()))
                {
                    *items = updated;
                    ChangeRecord::update(self.id, sequence, Key::Index(index), value, old)
                } else if index == length {
                    *items = items.push_back(value.clone());
                    ChangeRecord::add(self.id, sequence, Key::Index(index), value)
                } else {
                    return Err(Error::index_out_of_bounds(index, length));
                }
            }
        };

        self.commit(record);
        Ok(())
    }

    fn remove_entry(&mut self, key: Option<Key>) -> Result<Option<Popped>> {
        let sequence = self.log.next_sequence();
        let (record, popped) = match &mut self.target {
            Target::Keyed(map) => {
                let key = key.ok_or_else(Error::missing_key)?;
                let name = key.to_name();
                let Some(old) = map.get(&*name).cloned() else {
                    tracing::trace!(container = %self.id, key = %name, "delete of absent key ignored");
                    return Ok(None);
                };
                *map = map.remove(&*name);
                let key = Key::Name(name);
                (
                    ChangeRecord::delete(self.id, sequence, key.clone(), old),
                    Popped::Key(key),
                )
            }
            Target::Sequence(items) => {
                let length = items.len();
                let index = match key {
                    Some(key) => index_of(&key)?,
                    None => length.saturating_sub(1),
                };
                if index >= length {
                    tracing::trace!(container = %self.id, index, length, "delete of absent index ignored");
                    return Ok(None);
                }
                if index + 1 != length {
                    return Err(Error::not_last_index(index, length));
                }
                let Some((rest, old)) = items.pop_back() else {
                    return Ok(None);
                };
                *items = rest;
                (
                    ChangeRecord::delete(self.id, sequence, Key::Index(index), old.clone()),
                    Popped::Value(old),
                )
            }
        };

        self.commit(record);
        Ok(Some(popped))
    }

    fn merge(&mut self, mapping: &LtMap<Arc<str>, Value>) -> Result<()> {
        for (name, value) in mapping.iter() {
            self.set_entry(Key::Name(name.clone()), value.clone())?;
        }
        Ok(())
    }

    fn push_values(&mut self, values: Vec<Value>) -> Result<usize> {
        match self.kind() {
            ContainerKind::Sequence => {
                for value in values {
                    let index = self.len();
                    self.set_entry(Key::Index(index), value)?;
                }
            }
            ContainerKind::Keyed => {
                if let Some(bad) = values.iter().find(|v| !v.is_keyed()) {
                    return Err(Error::type_mismatch(Type::Map, bad.value_type()));
                }
                for value in &values {
                    if let Value::Map(mapping) = value {
                        self.merge(mapping)?;
                    }
                }
            }
        }
        Ok(self.len())
    }

    fn commit(&mut self, record: ChangeRecord) {
        let position = self.log.append(record);
        let record = &self.log[position];
        if self.config.trace_mutations {
            tracing::trace!(
                container = %self.id,
                label = ?self.config.label,
                record = %record,
                "change committed"
            );
        }
        (self.observer)(record, &self.log);
    }

    fn annotate(&self, err: Error, operation: &str) -> Error {
        tracing::debug!(container = %self.id, operation, error = %err, "mutation rejected");
        let mut context = ErrorContext::new().with_frame(operation);
        if let Some(label) = &self.config.label {
            context = context.with_source(label.clone());
        }
        err.with_context(context)
    }
}

impl<F> std::fmt::Debug for Tracked<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracked")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("records", &self.log.len())
            .field("label", &self.config.label)
            .finish_non_exhaustive()
    }
}

fn index_of(key: &Key) -> Result<usize> {
    key.as_index()
        .ok_or_else(|| Error::unsupported_key(format!("{key:?}"), "sequence"))
}
