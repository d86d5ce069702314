/*!
 * Dispatch Tests
 * Handler resolution, fail-open skipping and call-site caching
 */

use pretty_assertions::assert_eq;
use script_runtime::{
    InvocationError, NativeCallSite, NativeDispatcher, NativeHandlerRegistry, ScrVector, Vector3,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_registered_then_unregistered_native() {
    let dispatcher = NativeDispatcher::new(NativeHandlerRegistry::new());
    dispatcher.registry().register(0x1234, |ctx| {
        ctx.set_result(42u32).unwrap();
    });

    let found: u32 = dispatcher.invoke(0x1234, ()).unwrap();
    let missing: u32 = dispatcher.invoke(0x5678, ()).unwrap();

    assert_eq!(found, 42);
    assert_eq!(missing, 0);

    let stats = dispatcher.stats();
    assert_eq!(stats.invocations, 1);
    assert_eq!(stats.unresolved, 1);
    assert_eq!(stats.rejected, 0);
}

#[test]
fn test_void_native_runs_handler() {
    let dispatcher = NativeDispatcher::new(NativeHandlerRegistry::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    dispatcher.registry().register(1, move |ctx| {
        seen.fetch_add(ctx.arg::<u32>(0).unwrap() as usize, Ordering::SeqCst);
    });

    dispatcher.invoke::<(), _>(1, (5u32,)).unwrap();
    dispatcher.invoke::<(), _>(1, (7u32,)).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 12);
}

#[test]
fn test_handler_sees_arguments_in_order() {
    let dispatcher = NativeDispatcher::new(NativeHandlerRegistry::new());
    dispatcher.registry().register(2, |ctx| {
        let a = ctx.arg::<i32>(0).unwrap();
        let b = ctx.arg::<i32>(1).unwrap();
        let scale = ctx.arg::<f32>(2).unwrap();
        ctx.set_result((a - b) as f32 * scale).unwrap();
    });

    let result: f32 = dispatcher.invoke(2, (10i32, 4i32, 0.5f32)).unwrap();
    assert_eq!(result, 3.0);
}

#[test]
fn test_vector_returning_native() {
    let dispatcher = NativeDispatcher::new(NativeHandlerRegistry::new());
    dispatcher.registry().register(3, |ctx| {
        let id = ctx.arg::<u32>(0).unwrap() as f32;
        ctx.push_vector_result(0, Vector3::new(id, id * 2.0, id * 3.0))
            .unwrap();
    });

    let position: ScrVector = dispatcher.invoke(3, (2u32,)).unwrap();
    assert_eq!(Vector3::from(position), Vector3::new(2.0, 4.0, 6.0));
}

#[test]
fn test_too_many_arguments_abort() {
    let dispatcher = NativeDispatcher::new(NativeHandlerRegistry::new());
    let mut ctx = script_runtime::NativeContext::from_raw(&[0; 32]).unwrap();

    assert_eq!(
        ctx.push(1u8),
        Err(InvocationError::TooManyArguments { max: 32 })
    );
    assert!(!dispatcher.invoke_context(0x77, &mut ctx));
}

#[test]
fn test_call_site_reused_across_dispatchers_sharing_registry() {
    let registry = NativeHandlerRegistry::new();
    let a = NativeDispatcher::new(registry.clone());
    let b = NativeDispatcher::new(registry.clone());
    let site = NativeCallSite::new(0x42);

    registry.register(0x42, |ctx| {
        ctx.set_result(8u16).unwrap();
    });

    assert_eq!(site.invoke::<u16, _>(&a, ()).unwrap(), 8);
    assert_eq!(site.invoke::<u16, _>(&b, ()).unwrap(), 8);
}

#[test]
fn test_call_site_observes_replacement() {
    let dispatcher = NativeDispatcher::new(NativeHandlerRegistry::new());
    let site = NativeCallSite::new(0x10);

    dispatcher.registry().register(0x10, |ctx| {
        ctx.set_result(1i64).unwrap();
    });
    assert_eq!(site.invoke::<i64, _>(&dispatcher, ()).unwrap(), 1);

    dispatcher.registry().register(0x10, |ctx| {
        ctx.set_result(2i64).unwrap();
    });
    assert_eq!(site.invoke::<i64, _>(&dispatcher, ()).unwrap(), 2);
}

#[test]
fn test_reversed_call_site() {
    let dispatcher = NativeDispatcher::new(NativeHandlerRegistry::new());
    dispatcher.registry().register(0x20, |ctx| {
        let first = ctx.arg::<u8>(0).unwrap();
        ctx.set_result(first).unwrap();
    });
    let site = NativeCallSite::new(0x20);

    let value: u8 = site.invoke_reversed(&dispatcher, (1u8, 2u8, 3u8)).unwrap();
    assert_eq!(value, 3);
}
