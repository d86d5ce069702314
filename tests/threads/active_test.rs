/*!
 * Active Thread Tests
 */

use pretty_assertions::assert_eq;
use script_runtime::ActiveThreadTracker;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

#[test]
fn test_null_active_is_valid() {
    let tracker = ActiveThreadTracker::new();
    tracker.set_active(Some(1));
    tracker.set_active(None);
    assert_eq!(tracker.get_active(), None);
}

#[test]
fn test_guard_restores_after_panic() {
    let tracker = Arc::new(ActiveThreadTracker::new());
    tracker.set_active(Some(1));

    let inner = Arc::clone(&tracker);
    let result = catch_unwind(AssertUnwindSafe(move || {
        let _guard = inner.enter(2);
        panic!("script fault");
    }));

    assert!(result.is_err());
    assert_eq!(tracker.get_active(), Some(1));
}

#[test]
fn test_slot_visible_across_threads() {
    let tracker = Arc::new(ActiveThreadTracker::new());
    let writer = Arc::clone(&tracker);

    std::thread::spawn(move || {
        writer.set_active(Some(9));
    })
    .join()
    .unwrap();

    assert_eq!(tracker.get_active(), Some(9));
}
