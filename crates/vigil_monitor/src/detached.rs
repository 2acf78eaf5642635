//! Containers that are no longer tracked.

use vigil_foundation::{ContainerKind, Value};

use crate::log::ChangeLog;
use crate::record::ContainerId;

/// The terminal state of a tracked container.
///
/// Produced by `unmonitor`. The final contents and the complete change log
/// stay readable, but there are no mutation methods: a detached container
/// cannot record or emit anything further.
///
/// ```compile_fail
/// use vigil_foundation::Value;
/// use vigil_monitor::{ChangeLog, ChangeRecord, monitor};
///
/// let tracked = monitor(Value::vec([1]), |_: &ChangeRecord, _: &ChangeLog| {}).unwrap();
/// let mut detached = tracked.unmonitor(|_| {});
/// detached.set(0usize, 2);
/// ```
///
/// The tracker itself is consumed by `unmonitor`:
///
/// ```compile_fail
/// use vigil_foundation::Value;
/// use vigil_monitor::{ChangeLog, ChangeRecord, monitor};
///
/// let mut tracked = monitor(Value::vec([1]), |_: &ChangeRecord, _: &ChangeLog| {}).unwrap();
/// let _detached = tracked.unmonitor(|_| {});
/// tracked.set(0usize, 2).unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Detached {
    id: ContainerId,
    kind: ContainerKind,
    target: Value,
    log: ChangeLog,
    label: Option<String>,
}

impl Detached {
    pub(crate) fn new(
        id: ContainerId,
        kind: ContainerKind,
        target: Value,
        log: ChangeLog,
        label: Option<String>,
    ) -> Self {
        Self {
            id,
            kind,
            target,
            log,
            label,
        }
    }

    /// Identity the container had while tracked.
    #[must_use]
    pub const fn id(&self) -> ContainerId {
        self.id
    }

    /// Whether the container was keyed or a sequence.
    #[must_use]
    pub const fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Contents at the time of detaching.
    #[must_use]
    pub const fn target(&self) -> &Value {
        &self.target
    }

    /// Every change recorded while tracked.
    #[must_use]
    pub const fn log(&self) -> &ChangeLog {
        &self.log
    }

    /// Label from the container's configuration.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Gives back the contents.
    #[must_use]
    pub fn into_target(self) -> Value {
        self.target
    }

    /// Gives back the contents and the change log.
    #[must_use]
    pub fn into_parts(self) -> (Value, ChangeLog) {
        (self.target, self.log)
    }
}
