use std::arch::aarch64::*;

use crate::simd::traits::BitVector;

/// Number of bytes in a NEON Q register.
pub(crate) const NEON_BYTES: usize = 16;

/// NEON 128-bit register holding 16 packed bytes.
///
/// Wider lanes are broadcast with the matching `vdupq_n_*` and reinterpreted
/// as bytes, which is lossless on little-endian targets.
#[derive(Copy, Clone, Debug)]
pub(crate) struct U8x16 {
    pub elements: uint8x16_t,
}

impl BitVector for U8x16 {
    const BYTES: usize = NEON_BYTES;

    #[inline(always)]
    unsafe fn splat8(value: u8) -> Self {
        Self {
            elements: vdupq_n_u8(value),
        }
    }

    #[inline(always)]
    unsafe fn splat16(value: u16) -> Self {
        Self {
            elements: vreinterpretq_u8_u16(vdupq_n_u16(value)),
        }
    }

    #[inline(always)]
    unsafe fn splat32(value: u32) -> Self {
        Self {
            elements: vreinterpretq_u8_u32(vdupq_n_u32(value)),
        }
    }

    #[inline(always)]
    unsafe fn splat64(value: u64) -> Self {
        Self {
            elements: vreinterpretq_u8_u64(vdupq_n_u64(value)),
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const u8) -> Self {
        Self {
            elements: vld1q_u8(ptr),
        }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut u8) {
        vst1q_u8(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn and(self, other: Self) -> Self {
        Self {
            elements: vandq_u8(self.elements, other.elements),
        }
    }

    #[inline(always)]
    unsafe fn or(self, other: Self) -> Self {
        Self {
            elements: vorrq_u8(self.elements, other.elements),
        }
    }

    #[inline(always)]
    unsafe fn xor(self, other: Self) -> Self {
        Self {
            elements: veorq_u8(self.elements, other.elements),
        }
    }

    #[inline(always)]
    unsafe fn not(self) -> Self {
        Self {
            elements: vmvnq_u8(self.elements),
        }
    }
}
