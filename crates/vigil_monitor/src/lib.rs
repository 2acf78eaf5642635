//! Change-tracking containers for Vigil.
//!
//! [`monitor`] takes ownership of a keyed map or a sequence and returns a
//! [`Tracked`] handle. Mutations made through the handle are turned into
//! [`ChangeRecord`]s, appended to the container's [`ChangeLog`], and passed
//! to the observer synchronously. [`unmonitor`] ends tracking for good.
//!
//! ```
//! use vigil_foundation::Value;
//! use vigil_monitor::{ChangeKind, ChangeLog, ChangeRecord, monitor};
//!
//! let mut kinds = Vec::new();
//! let mut tracked = monitor(Value::map([("a", 1)]), |record: &ChangeRecord, _: &ChangeLog| {
//!     kinds.push(record.kind());
//! })
//! .unwrap();
//!
//! tracked.set("a", 2).unwrap();
//! tracked.set("b", 3).unwrap();
//! let detached = tracked.unmonitor(|_| {});
//!
//! assert_eq!(detached.log().len(), 2);
//! assert_eq!(kinds, vec![ChangeKind::Update, ChangeKind::Add]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod detached;
pub mod key;
pub mod log;
pub mod record;
pub mod tracked;

pub use config::MonitorConfig;
pub use detached::Detached;
pub use key::Key;
pub use log::ChangeLog;
pub use record::{ChangeKind, ChangeRecord, ContainerId};
pub use tracked::{Popped, Tracked, monitor, monitor_with, unmonitor};
pub use vigil_foundation::ContainerKind;
