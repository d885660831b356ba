//! Primitive element types that map one-to-one onto hardware vector lanes.

use num::PrimInt;

use crate::simd::traits::BitVector;

mod sealed {
    pub trait Sealed {}
}

/// An integer type whose width is one of the hardware lane widths (1, 2, 4 or 8 bytes).
///
/// Implemented for `u8`, `u16`, `u32`, `u64`, `i8`, `i16`, `i32` and `i64`.
/// Other element types go through the byte-level entry points
/// ([`apply_bytes`](crate::apply_bytes), [`apply_pod`](crate::apply_pod)).
pub trait Lane: PrimInt + Send + Sync + 'static + sealed::Sealed {
    /// Size of one element in bytes.
    const WIDTH: usize;

    /// Reads a value from exactly `WIDTH` native-endian bytes.
    fn from_ne_slice(bytes: &[u8]) -> Self;

    /// Broadcasts the value into every lane of a vector register.
    ///
    /// # Safety
    ///
    /// The CPU must support `V`'s instruction set.
    #[doc(hidden)]
    #[allow(private_bounds)]
    unsafe fn splat<V: BitVector>(self) -> V;
}

macro_rules! impl_lane {
    ($($ty:ty => $bits:ty, $splat:ident;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Lane for $ty {
                const WIDTH: usize = core::mem::size_of::<$ty>();

                #[inline(always)]
                fn from_ne_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; core::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_ne_bytes(raw)
                }

                #[inline(always)]
                #[allow(private_bounds)]
                unsafe fn splat<V: BitVector>(self) -> V {
                    V::$splat(self as $bits)
                }
            }
        )*
    };
}

impl_lane! {
    u8 => u8, splat8;
    u16 => u16, splat16;
    u32 => u32, splat32;
    u64 => u64, splat64;
    i8 => u8, splat8;
    i16 => u16, splat16;
    i32 => u32, splat32;
    i64 => u64, splat64;
}
