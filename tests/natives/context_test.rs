/*!
 * Native Context Tests
 * Slot packing, aliasing and vector results
 */

use pretty_assertions::assert_eq;
use script_runtime::{InvocationError, NativeContext, ScrVector, Vector3};

#[test]
fn test_mixed_width_arguments_each_take_a_slot() {
    let mut ctx = NativeContext::new();
    ctx.push(true).unwrap();
    ctx.push(-1i16).unwrap();
    ctx.push(2.5f32).unwrap();
    ctx.push(0xDEAD_BEEF_CAFE_u64).unwrap();

    assert_eq!(ctx.argument_count(), 4);
    assert_eq!(ctx.arg::<bool>(0).unwrap(), true);
    assert_eq!(ctx.arg::<i16>(1).unwrap(), -1);
    assert_eq!(ctx.arg::<f32>(2).unwrap(), 2.5);
    assert_eq!(ctx.arg::<u64>(3).unwrap(), 0xDEAD_BEEF_CAFE);

    // -1i16 leaves the upper six bytes of its slot clear
    assert_eq!(&ctx.as_bytes()[10..16], &[0; 6]);
}

#[test]
fn test_pointer_arguments() {
    let value = 17u32;
    let ptr: *const u32 = &value;

    let mut ctx = NativeContext::new();
    ctx.push(ptr).unwrap();

    assert_eq!(ctx.arg::<*const u32>(0).unwrap(), ptr);
}

#[test]
fn test_oversized_argument_is_rejected() {
    let mut ctx = NativeContext::new();
    assert_eq!(
        ctx.push(Vector3::new(1.0, 2.0, 3.0)),
        Err(InvocationError::OversizedArgument { size: 12, max: 8 })
    );
    assert_eq!(ctx.argument_count(), 0);
}

#[test]
fn test_raw_context_reverse() {
    let mut ctx = NativeContext::from_raw(&[10, 20, 30, 40]).unwrap();
    ctx.reverse();
    assert_eq!(ctx.slots(), &[40, 30, 20, 10]);

    ctx.set_argument_count(2).unwrap();
    ctx.reverse();
    assert_eq!(ctx.slots(), &[30, 40]);
}

#[test]
fn test_multiple_vector_results() {
    let mut ctx = NativeContext::new();
    ctx.push_vector_result(0, Vector3::new(1.0, 2.0, 3.0)).unwrap();
    ctx.push_vector_result(3, Vector3::new(4.0, 5.0, 6.0)).unwrap();
    ctx.set_vector_results();

    let first = ctx.get_result::<ScrVector>().unwrap();
    assert_eq!(Vector3::from(first), Vector3::new(1.0, 2.0, 3.0));

    let bytes = &ctx.as_bytes()[24..48];
    let second: ScrVector = bytemuck::pod_read_unaligned(bytes);
    assert_eq!(Vector3::from(second), Vector3::new(4.0, 5.0, 6.0));
}

#[test]
fn test_wide_result_spans_slots() {
    let mut ctx = NativeContext::from_raw(&[1, 2, 3, 4]).unwrap();
    ctx.set_result(u128::MAX).unwrap();

    assert_eq!(ctx.get_result::<u128>().unwrap(), u128::MAX);
    assert_eq!(ctx.slots(), &[u64::MAX, u64::MAX, 3, 4]);
}
