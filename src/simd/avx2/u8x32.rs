//! AVX2 256-bit register wrapper.
//!
//! `U8x32` wraps `__m256i` and implements [`BitVector`] with the AVX/AVX2
//! integer intrinsics. The "u8" in the name only describes the load/store
//! granularity; the mask broadcasts cover every lane width.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::traits::BitVector;

/// Number of bytes in an AVX2 register.
pub(crate) const AVX_BYTES: usize = 32;

#[derive(Copy, Clone, Debug)]
pub(crate) struct U8x32 {
    pub elements: __m256i,
}

impl BitVector for U8x32 {
    const BYTES: usize = AVX_BYTES;

    #[inline(always)]
    unsafe fn splat8(value: u8) -> Self {
        Self {
            elements: _mm256_set1_epi8(value as i8),
        }
    }

    #[inline(always)]
    unsafe fn splat16(value: u16) -> Self {
        Self {
            elements: _mm256_set1_epi16(value as i16),
        }
    }

    #[inline(always)]
    unsafe fn splat32(value: u32) -> Self {
        Self {
            elements: _mm256_set1_epi32(value as i32),
        }
    }

    #[inline(always)]
    unsafe fn splat64(value: u64) -> Self {
        Self {
            elements: _mm256_set1_epi64x(value as i64),
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const u8) -> Self {
        Self {
            elements: _mm256_loadu_si256(ptr as *const __m256i),
        }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut u8) {
        _mm256_storeu_si256(ptr as *mut __m256i, self.elements)
    }

    #[inline(always)]
    unsafe fn and(self, other: Self) -> Self {
        Self {
            elements: _mm256_and_si256(self.elements, other.elements),
        }
    }

    #[inline(always)]
    unsafe fn or(self, other: Self) -> Self {
        Self {
            elements: _mm256_or_si256(self.elements, other.elements),
        }
    }

    #[inline(always)]
    unsafe fn xor(self, other: Self) -> Self {
        Self {
            elements: _mm256_xor_si256(self.elements, other.elements),
        }
    }

    #[inline(always)]
    unsafe fn not(self) -> Self {
        Self {
            elements: _mm256_xor_si256(self.elements, _mm256_set1_epi32(-1)),
        }
    }
}
