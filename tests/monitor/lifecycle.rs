//! Lifecycle tests
//!
//! Monitoring, detaching, and observer ordering.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use vigil_foundation::{ErrorKind, Value};
use vigil_monitor::{
    ChangeKind, ChangeLog, ChangeRecord, ContainerKind, MonitorConfig, Tracked, monitor,
    monitor_with, unmonitor,
};

use crate::support::{empty_map, recording};

#[test]
fn monitor_unsupported_target_fails_fast() {
    for target in [Value::Nil, Value::Int(1), Value::from("text"), Value::Bool(true)] {
        let err = monitor(target, |_: &ChangeRecord, _: &ChangeLog| {}).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Unclassifiable(_)));
    }
}

#[test]
fn monitor_error_names_label() {
    let config = MonitorConfig::new().with_label("scores");
    let err = monitor_with(Value::Int(1), |_: &ChangeRecord, _: &ChangeLog| {}, config).unwrap_err();
    assert_eq!(err.context.unwrap().source.as_deref(), Some("scores"));
}

#[test]
fn unmonitor_calls_back_once_after_detaching() {
    let (mut tracked, calls) = recording(empty_map());
    tracked.set("a", 1).unwrap();
    let id = tracked.id();

    let mut callbacks = 0;
    let detached = unmonitor(tracked, |d| {
        callbacks += 1;
        assert_eq!(d.id(), id);
        assert_eq!(d.log().len(), 1);
    });

    assert_eq!(callbacks, 1);
    assert_eq!(detached.kind(), ContainerKind::Keyed);
    assert_eq!(detached.target(), &Value::map([("a", 1)]));
    // Detaching is not a change.
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn detached_keeps_log_and_target() {
    let config = MonitorConfig::traced().with_label("list");
    let mut tracked = monitor_with(
        Value::vec([1]),
        |_: &ChangeRecord, _: &ChangeLog| {},
        config,
    )
    .unwrap();
    tracked.push([2, 3]).unwrap();

    let detached = tracked.unmonitor(|_| {});
    assert_eq!(detached.label(), Some("list"));
    assert_eq!(detached.log().count(ChangeKind::Add), 2);

    let (target, log) = detached.into_parts();
    assert_eq!(target, Value::vec([1, 2, 3]));
    assert_eq!(log.len(), 2);
}

#[test]
fn remonitoring_starts_a_fresh_container() {
    let (mut tracked, _calls) = recording(empty_map());
    tracked.set("a", 1).unwrap();
    let first_id = tracked.id();
    let detached = tracked.unmonitor(|_| {});

    let (again, _calls) = recording(detached.into_target());
    assert_ne!(again.id(), first_id);
    assert!(again.log().is_empty());
    assert_eq!(again.get("a"), Some(&Value::Int(1)));
}

#[test]
fn observer_sees_committed_state() {
    let observed: Rc<RefCell<Vec<(u64, usize, Option<u64>)>>> = Rc::default();
    let sink = Rc::clone(&observed);
    let mut tracked = monitor(Value::vec([0]), move |record: &ChangeRecord, log: &ChangeLog| {
        // The record handed over is always the one just appended.
        let last = log.last().map(ChangeRecord::sequence);
        sink.borrow_mut().push((record.sequence(), log.len(), last));
    })
    .unwrap();

    tracked.push([1, 2]).unwrap();
    tracked.pop(None).unwrap();

    assert_eq!(
        *observed.borrow(),
        vec![(0, 1, Some(0)), (1, 2, Some(1)), (2, 3, Some(2))]
    );
}

type BoxedObserver = Box<dyn FnMut(&ChangeRecord, &ChangeLog)>;

#[test]
fn observer_cannot_reenter_its_container() {
    let handle: Rc<RefCell<Weak<RefCell<Tracked<BoxedObserver>>>>> = Rc::default();
    let rejected: Rc<Cell<Option<bool>>> = Rc::default();

    let observer: BoxedObserver = {
        let handle = Rc::clone(&handle);
        let rejected = Rc::clone(&rejected);
        Box::new(move |_: &ChangeRecord, _: &ChangeLog| {
            let shared = handle.borrow().upgrade();
            if let Some(shared) = shared {
                rejected.set(Some(shared.try_borrow_mut().is_err()));
            }
        })
    };
    let shared = Rc::new(RefCell::new(monitor(empty_map(), observer).unwrap()));
    *handle.borrow_mut() = Rc::downgrade(&shared);

    shared.borrow_mut().set("a", 1).unwrap();

    assert_eq!(rejected.get(), Some(true));
    assert_eq!(shared.borrow().log().len(), 1);
    assert_eq!(shared.borrow().get("a"), Some(&Value::Int(1)));
}

#[test]
fn log_history_for_one_key() {
    let (mut tracked, _calls) = recording(empty_map());
    tracked.set("a", 1).unwrap();
    tracked.set("b", 1).unwrap();
    tracked.set("a", 2).unwrap();
    tracked.remove("a").unwrap();

    let key = "a".into();
    let kinds: Vec<_> = tracked.log().history(&key).map(ChangeRecord::kind).collect();
    assert_eq!(
        kinds,
        vec![ChangeKind::Add, ChangeKind::Update, ChangeKind::Delete]
    );
    assert_eq!(tracked.log().since(2).len(), 2);
}
