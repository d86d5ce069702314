/*!
 * Lifecycle Hook Tests
 * Init ordering, failure isolation and monotonic veto
 */

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use script_runtime::hooks::EventListeners;
use script_runtime::{BroadcastReport, HookError, ScriptHooks};
use std::sync::Arc;

#[test]
fn test_init_listeners_run_in_registration_order() {
    let hooks = ScriptHooks::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    for name in ["first", "second", "third"] {
        let order = Arc::clone(&order);
        hooks.on_script_init(move || {
            order.lock().push(name);
            Ok(())
        });
    }

    hooks.fire_script_init();
    assert_eq!(*order.lock(), vec!["first", "second", "third"]);
}

#[test]
fn test_failing_and_panicking_listeners_are_isolated() {
    let hooks = ScriptHooks::new();
    let reached = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&reached);

    hooks.on_script_init(|| Err(HookError::listener_failed("not ready")));
    hooks.on_script_init(|| panic!("listener bug"));
    hooks.on_script_init(move || {
        *flag.lock() = true;
        Ok(())
    });

    assert_eq!(
        hooks.fire_script_init(),
        Some(BroadcastReport {
            invoked: 3,
            failed: 2
        })
    );
    assert!(*reached.lock());
}

#[test]
fn test_veto_then_allow_is_disallowed() {
    let hooks = ScriptHooks::new();
    hooks.on_check_native_allowed(|allowance| {
        allowance.deny();
        Ok(())
    });
    hooks.on_check_native_allowed(|_| Ok(()));

    assert!(!hooks.check_native_allowed(0x1234));
}

#[test]
fn test_removed_listener_no_longer_vetoes() {
    let hooks = ScriptHooks::new();
    let id = hooks.on_check_native_allowed(|allowance| {
        allowance.deny();
        Ok(())
    });
    assert!(!hooks.check_native_allowed(1));

    assert!(hooks.remove_check_native_allowed_listener(id));
    assert!(!hooks.remove_check_native_allowed_listener(id));
    assert!(hooks.check_native_allowed(1));
    assert_eq!(hooks.check_native_allowed_listeners(), 0);
}

#[test]
fn test_listener_may_register_during_broadcast() {
    let listeners: Arc<EventListeners<u32>> = Arc::new(EventListeners::new("test"));
    let inner = Arc::clone(&listeners);

    listeners.add(move |value: &mut u32| {
        *value += 1;
        inner.add(|value: &mut u32| {
            *value += 10;
            Ok(())
        });
        Ok(())
    });

    let mut value = 0;
    let report = listeners.broadcast(&mut value);

    assert_eq!(report.invoked, 1);
    assert_eq!(value, 1);
    assert_eq!(listeners.len(), 2);
}
