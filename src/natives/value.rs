/*!
 * Native Values
 * Typed views over raw slot bytes
 *
 * Every value that crosses the native boundary is written into, or read out of,
 * a run of bytes in the invocation buffer using the host's native byte order.
 * Slot bytes never get reinterpreted through pointer casts; `bytemuck` performs
 * the copies for plain-old-data types.
 */

use super::context::NativeContext;
use crate::core::errors::InvocationResult;
use bytemuck::{Pod, Zeroable};

/// A value with a fixed byte representation in the invocation buffer
pub trait NativeValue: Sized {
    /// Natural size of the value in bytes
    const SIZE: usize;

    /// Write the value into `out`, which is exactly `SIZE` bytes long
    fn write_bytes(&self, out: &mut [u8]);

    /// Read a value back from exactly `SIZE` bytes
    fn read_bytes(bytes: &[u8]) -> Self;
}

/// A type a native invocation can produce
///
/// `()` means the native is void and nothing is extracted.
pub trait NativeReturn: Sized {
    fn extract(ctx: &NativeContext) -> InvocationResult<Self>;
}

/// An ordered argument list that can be packed into a context
pub trait NativeArgs {
    /// Number of arguments in the list
    const COUNT: usize;

    fn push_all(self, ctx: &mut NativeContext) -> InvocationResult<()>;
}

/// Packed three-component vector as handlers produce it
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Slot-padded vector as it sits in the return buffer
///
/// Each component occupies the low half of its own 8-byte slot.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ScrVector {
    pub x: f32,
    pad0: u32,
    pub y: f32,
    pad1: u32,
    pub z: f32,
    pad2: u32,
}

impl ScrVector {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            pad0: 0,
            y,
            pad1: 0,
            z,
            pad2: 0,
        }
    }
}

impl From<Vector3> for ScrVector {
    fn from(v: Vector3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<ScrVector> for Vector3 {
    fn from(v: ScrVector) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

macro_rules! impl_pod_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl NativeValue for $t {
                const SIZE: usize = std::mem::size_of::<$t>();

                #[inline]
                fn write_bytes(&self, out: &mut [u8]) {
                    out.copy_from_slice(bytemuck::bytes_of(self));
                }

                #[inline]
                fn read_bytes(bytes: &[u8]) -> Self {
                    bytemuck::pod_read_unaligned(bytes)
                }
            }

            impl NativeReturn for $t {
                #[inline]
                fn extract(ctx: &NativeContext) -> InvocationResult<Self> {
                    ctx.get_result::<$t>()
                }
            }
        )*
    };
}

impl_pod_value!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, Vector3, ScrVector,
);

impl NativeValue for bool {
    const SIZE: usize = 1;

    #[inline]
    fn write_bytes(&self, out: &mut [u8]) {
        out[0] = u8::from(*self);
    }

    #[inline]
    fn read_bytes(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

impl NativeReturn for bool {
    #[inline]
    fn extract(ctx: &NativeContext) -> InvocationResult<Self> {
        ctx.get_result::<bool>()
    }
}

impl<T> NativeValue for *const T {
    const SIZE: usize = std::mem::size_of::<usize>();

    #[inline]
    fn write_bytes(&self, out: &mut [u8]) {
        (*self as usize).write_bytes(out);
    }

    #[inline]
    fn read_bytes(bytes: &[u8]) -> Self {
        usize::read_bytes(bytes) as *const T
    }
}

impl<T> NativeValue for *mut T {
    const SIZE: usize = std::mem::size_of::<usize>();

    #[inline]
    fn write_bytes(&self, out: &mut [u8]) {
        (*self as usize).write_bytes(out);
    }

    #[inline]
    fn read_bytes(bytes: &[u8]) -> Self {
        usize::read_bytes(bytes) as *mut T
    }
}

impl<T> NativeReturn for *const T {
    #[inline]
    fn extract(ctx: &NativeContext) -> InvocationResult<Self> {
        ctx.get_result::<*const T>()
    }
}

impl<T> NativeReturn for *mut T {
    #[inline]
    fn extract(ctx: &NativeContext) -> InvocationResult<Self> {
        ctx.get_result::<*mut T>()
    }
}

impl NativeReturn for () {
    #[inline]
    fn extract(_ctx: &NativeContext) -> InvocationResult<Self> {
        Ok(())
    }
}

impl NativeArgs for () {
    const COUNT: usize = 0;

    #[inline]
    fn push_all(self, _ctx: &mut NativeContext) -> InvocationResult<()> {
        Ok(())
    }
}

macro_rules! count_idents {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + count_idents!($($tail)*) };
}

macro_rules! impl_native_args {
    ($($name:ident),+) => {
        impl<$($name: NativeValue),+> NativeArgs for ($($name,)+) {
            const COUNT: usize = count_idents!($($name)+);

            #[inline]
            #[allow(non_snake_case)]
            fn push_all(self, ctx: &mut NativeContext) -> InvocationResult<()> {
                let ($($name,)+) = self;
                $(ctx.push($name)?;)+
                Ok(())
            }
        }
    };
}

impl_native_args!(A1);
impl_native_args!(A1, A2);
impl_native_args!(A1, A2, A3);
impl_native_args!(A1, A2, A3, A4);
impl_native_args!(A1, A2, A3, A4, A5);
impl_native_args!(A1, A2, A3, A4, A5, A6);
impl_native_args!(A1, A2, A3, A4, A5, A6, A7);
impl_native_args!(A1, A2, A3, A4, A5, A6, A7, A8);
impl_native_args!(A1, A2, A3, A4, A5, A6, A7, A8, A9);
impl_native_args!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10);
impl_native_args!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11);
impl_native_args!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12);
impl_native_args!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12, A13);
impl_native_args!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12, A13, A14);
impl_native_args!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12, A13, A14, A15);
impl_native_args!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12, A13, A14, A15, A16);
