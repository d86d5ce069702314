/*!
 * Property Tests
 * Slot offsets, reversal and policy consistency
 */

use proptest::prelude::*;
use script_runtime::{BlockRule, InvocationError, NativeBlockPolicy, NativeContext};

proptest! {
    #[test]
    fn prop_pushed_value_sits_at_slot_offset(values in prop::collection::vec(any::<u32>(), 0..32)) {
        let mut ctx = NativeContext::new();
        for v in &values {
            ctx.push(*v).unwrap();
        }

        for (n, v) in values.iter().enumerate() {
            let offset = n * 8;
            let bytes = &ctx.as_bytes()[offset..offset + 8];
            prop_assert_eq!(&bytes[..4], &v.to_ne_bytes()[..]);
            prop_assert_eq!(&bytes[4..], &[0u8; 4][..]);
        }
    }

    #[test]
    fn prop_oversized_push_keeps_count(count in 0usize..32, wide in any::<u128>()) {
        let mut ctx = NativeContext::new();
        for i in 0..count {
            ctx.push(i as u64).unwrap();
        }

        prop_assert_eq!(
            ctx.push(wide),
            Err(InvocationError::OversizedArgument { size: 16, max: 8 })
        );
        prop_assert_eq!(ctx.argument_count(), count);
    }

    #[test]
    fn prop_reverse_is_involution(slots in prop::collection::vec(any::<u64>(), 0..=32)) {
        let mut ctx = NativeContext::from_raw(&slots).unwrap();

        ctx.reverse();
        let k = slots.len();
        for i in 0..k {
            prop_assert_eq!(ctx.slot(i), Some(slots[k - 1 - i]));
        }

        ctx.reverse();
        prop_assert_eq!(ctx.slots(), &slots[..]);
    }

    #[test]
    fn prop_block_policy_agrees(
        hashes in prop::collection::vec(0u64..64, 0..16),
        probe in 0u64..64,
    ) {
        let rules: Vec<BlockRule> = hashes.iter().copied().map(BlockRule::always).collect();
        let policy = NativeBlockPolicy::new(&rules, None);

        prop_assert_eq!(
            policy.should_block(probe),
            policy.blocked_natives().contains(&probe)
        );
    }
}
