//! SSE2 tier: 128-bit integer vectors on x86/x86_64.
//!
//! SSE2 is part of the x86_64 baseline, so on 64-bit hosts this tier is the
//! guaranteed vector fallback below AVX2. On 32-bit x86 it is still probed.

pub(crate) mod u8x16;

use crate::lane::Lane;
use crate::operation::{with_kernel, BitwiseOp};
use crate::simd::tier;

use self::u8x16::U8x16;

/// Applies `op` to `count` elements with 128-bit registers.
///
/// # Safety
///
/// SSE2 must be available. `src` must be valid for reads and `dst` for writes
/// of `count * L::WIDTH` bytes; the regions are identical or disjoint.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn apply<L: Lane>(
    op: BitwiseOp,
    src: *const u8,
    dst: *mut u8,
    count: usize,
    mask: L,
) {
    with_kernel!(op, K => tier::run::<U8x16, L, K>(src, dst, count, mask))
}
