//! SSE2 128-bit register wrapper over `__m128i`.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::traits::BitVector;

/// Number of bytes in an SSE2 register.
pub(crate) const SSE_BYTES: usize = 16;

#[derive(Copy, Clone, Debug)]
pub(crate) struct U8x16 {
    pub elements: __m128i,
}

impl BitVector for U8x16 {
    const BYTES: usize = SSE_BYTES;

    #[inline(always)]
    unsafe fn splat8(value: u8) -> Self {
        Self {
            elements: _mm_set1_epi8(value as i8),
        }
    }

    #[inline(always)]
    unsafe fn splat16(value: u16) -> Self {
        Self {
            elements: _mm_set1_epi16(value as i16),
        }
    }

    #[inline(always)]
    unsafe fn splat32(value: u32) -> Self {
        Self {
            elements: _mm_set1_epi32(value as i32),
        }
    }

    #[inline(always)]
    unsafe fn splat64(value: u64) -> Self {
        Self {
            elements: _mm_set1_epi64x(value as i64),
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const u8) -> Self {
        Self {
            elements: _mm_loadu_si128(ptr as *const __m128i),
        }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut u8) {
        _mm_storeu_si128(ptr as *mut __m128i, self.elements)
    }

    #[inline(always)]
    unsafe fn and(self, other: Self) -> Self {
        Self {
            elements: _mm_and_si128(self.elements, other.elements),
        }
    }

    #[inline(always)]
    unsafe fn or(self, other: Self) -> Self {
        Self {
            elements: _mm_or_si128(self.elements, other.elements),
        }
    }

    #[inline(always)]
    unsafe fn xor(self, other: Self) -> Self {
        Self {
            elements: _mm_xor_si128(self.elements, other.elements),
        }
    }

    #[inline(always)]
    unsafe fn not(self) -> Self {
        Self {
            elements: _mm_xor_si128(self.elements, _mm_set1_epi32(-1)),
        }
    }
}
