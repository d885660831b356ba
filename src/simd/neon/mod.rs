//! ARM NEON tier: 128-bit vectors on AArch64.
//!
//! NEON (Advanced SIMD) is present on every AArch64 core, including Apple
//! Silicon and AWS Graviton, but is still confirmed through the capability
//! probe like every other tier.
//!
//! # Platform Support
//!
//! Only compiled for little-endian AArch64: the lane broadcasts reinterpret
//! wide lanes as bytes, which matches memory order only on little-endian
//! targets. Big-endian AArch64 uses the scalar tier.

pub(crate) mod u8x16;

use crate::lane::Lane;
use crate::operation::{with_kernel, BitwiseOp};
use crate::simd::tier;

use self::u8x16::U8x16;

/// Applies `op` to `count` elements with 128-bit NEON registers.
///
/// # Safety
///
/// NEON must be available. `src` must be valid for reads and `dst` for writes
/// of `count * L::WIDTH` bytes; the regions are identical or disjoint.
#[target_feature(enable = "neon")]
pub(crate) unsafe fn apply<L: Lane>(
    op: BitwiseOp,
    src: *const u8,
    dst: *mut u8,
    count: usize,
    mask: L,
) {
    with_kernel!(op, K => tier::run::<U8x16, L, K>(src, dst, count, mask))
}
