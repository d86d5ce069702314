/*!
 * Native Call Context
 * Fixed-capacity argument/return buffer exchanged with native handlers
 *
 * # Layout
 *
 * - 32 slots of 8 bytes each, shared by arguments and the return value
 * - The return value is read from and written to the start of the buffer, so a
 *   handler that writes its result overwrites its own leading arguments
 * - Values narrower than a slot occupy the slot's leading bytes; the remaining
 *   bytes are always zero
 */

use super::value::{NativeValue, ScrVector, Vector3};
use crate::core::errors::{InvocationError, InvocationResult};
use crate::core::limits::{
    ARG_SIZE, CONTEXT_BUFFER_SIZE, MAX_NATIVE_PARAMS, MAX_VECTOR_RESULTS, VECTOR_RESULT_SLOTS,
};

/// Per-invocation argument and return buffer
///
/// Created by the call site, handed to the handler by mutable reference and
/// dropped when the call returns.
#[derive(Debug, Clone)]
pub struct NativeContext {
    stack: [u64; MAX_NATIVE_PARAMS],
    arg_count: usize,
    data_count: usize,
    vector_targets: [usize; MAX_VECTOR_RESULTS],
    vector_space: [Vector3; MAX_VECTOR_RESULTS],
}

impl NativeContext {
    /// Create an empty, zero-filled context
    pub fn new() -> Self {
        Self {
            stack: [0; MAX_NATIVE_PARAMS],
            arg_count: 0,
            data_count: 0,
            vector_targets: [0; MAX_VECTOR_RESULTS],
            vector_space: [Vector3::default(); MAX_VECTOR_RESULTS],
        }
    }

    /// Create a context from slots that were packed elsewhere
    pub fn from_raw(args: &[u64]) -> InvocationResult<Self> {
        if args.len() > MAX_NATIVE_PARAMS {
            return Err(InvocationError::TooManyArguments {
                max: MAX_NATIVE_PARAMS,
            });
        }

        let mut ctx = Self::new();
        ctx.stack[..args.len()].copy_from_slice(args);
        ctx.arg_count = args.len();
        Ok(ctx)
    }

    /// Append one argument into the next free slot
    ///
    /// Fails without touching the context when the value is wider than a slot
    /// or all slots are taken.
    pub fn push<T: NativeValue>(&mut self, value: T) -> InvocationResult<()> {
        if T::SIZE > ARG_SIZE {
            return Err(InvocationError::OversizedArgument {
                size: T::SIZE,
                max: ARG_SIZE,
            });
        }
        if self.arg_count >= MAX_NATIVE_PARAMS {
            return Err(InvocationError::TooManyArguments {
                max: MAX_NATIVE_PARAMS,
            });
        }

        let index = self.arg_count;
        self.stack[index] = 0;
        let offset = index * ARG_SIZE;
        value.write_bytes(&mut self.bytes_mut()[offset..offset + T::SIZE]);
        self.arg_count += 1;
        Ok(())
    }

    /// Reverse the occupied slots in place
    pub fn reverse(&mut self) {
        self.stack[..self.arg_count].reverse();
    }

    /// Read the result from the start of the return buffer
    ///
    /// The caller must request the type the native's contract promises; no tag
    /// travels with the value. A handler that wrote nothing leaves zero bytes.
    pub fn get_result<T: NativeValue>(&self) -> InvocationResult<T> {
        if T::SIZE > CONTEXT_BUFFER_SIZE {
            return Err(InvocationError::ResultTooLarge {
                size: T::SIZE,
                capacity: CONTEXT_BUFFER_SIZE,
            });
        }
        Ok(T::read_bytes(&self.as_bytes()[..T::SIZE]))
    }

    /// Write a result at the start of the return buffer
    ///
    /// Every slot the value touches is cleared first.
    pub fn set_result<T: NativeValue>(&mut self, value: T) -> InvocationResult<()> {
        if T::SIZE > CONTEXT_BUFFER_SIZE {
            return Err(InvocationError::ResultTooLarge {
                size: T::SIZE,
                capacity: CONTEXT_BUFFER_SIZE,
            });
        }

        let slots = T::SIZE.div_ceil(ARG_SIZE);
        self.stack[..slots].fill(0);
        value.write_bytes(&mut self.bytes_mut()[..T::SIZE]);
        Ok(())
    }

    /// Read argument `index` as `T`
    pub fn arg<T: NativeValue>(&self, index: usize) -> InvocationResult<T> {
        if T::SIZE > ARG_SIZE {
            return Err(InvocationError::OversizedArgument {
                size: T::SIZE,
                max: ARG_SIZE,
            });
        }
        if index >= self.arg_count {
            return Err(InvocationError::SlotOutOfRange {
                index,
                count: self.arg_count,
            });
        }

        let offset = index * ARG_SIZE;
        Ok(T::read_bytes(&self.as_bytes()[offset..offset + T::SIZE]))
    }

    /// Stage a packed vector to be written out by [`Self::set_vector_results`]
    ///
    /// `target_slot` is the first of the three slots the padded vector will occupy.
    pub fn push_vector_result(&mut self, target_slot: usize, value: Vector3) -> InvocationResult<()> {
        if self.data_count >= MAX_VECTOR_RESULTS {
            return Err(InvocationError::VectorSpaceExhausted {
                max: MAX_VECTOR_RESULTS,
            });
        }
        if target_slot + VECTOR_RESULT_SLOTS > MAX_NATIVE_PARAMS {
            return Err(InvocationError::SlotOutOfRange {
                index: target_slot,
                count: MAX_NATIVE_PARAMS,
            });
        }

        self.vector_targets[self.data_count] = target_slot;
        self.vector_space[self.data_count] = value;
        self.data_count += 1;
        Ok(())
    }

    /// Copy staged vectors into their padded slot layout
    ///
    /// Runs after every invocation. With nothing staged this is a no-op, and
    /// running it twice produces the same buffer.
    pub fn set_vector_results(&mut self) {
        for i in 0..self.data_count {
            let padded = ScrVector::from(self.vector_space[i]);
            let offset = self.vector_targets[i] * ARG_SIZE;
            let size = std::mem::size_of::<ScrVector>();
            self.bytes_mut()[offset..offset + size].copy_from_slice(bytemuck::bytes_of(&padded));
        }
    }

    /// Number of occupied argument slots
    #[inline]
    pub fn argument_count(&self) -> usize {
        self.arg_count
    }

    /// Override the argument count (for contexts packed by hand)
    pub fn set_argument_count(&mut self, count: usize) -> InvocationResult<()> {
        if count > MAX_NATIVE_PARAMS {
            return Err(InvocationError::TooManyArguments {
                max: MAX_NATIVE_PARAMS,
            });
        }
        self.arg_count = count;
        Ok(())
    }

    /// Number of staged vector results
    #[inline]
    pub fn data_count(&self) -> usize {
        self.data_count
    }

    /// Raw content of an occupied slot
    #[inline]
    pub fn slot(&self, index: usize) -> Option<u64> {
        self.slots().get(index).copied()
    }

    /// Occupied slots
    #[inline]
    pub fn slots(&self) -> &[u64] {
        &self.stack[..self.arg_count]
    }

    /// The whole 256-byte buffer
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.stack[..])
    }

    #[inline]
    fn bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(&mut self.stack[..])
    }
}

impl Default for NativeContext {
    fn default() -> Self {
        Self::new()
    }
}
