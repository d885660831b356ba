//! AVX2 tier: 256-bit integer vectors.
//!
//! Available on Intel Haswell (2013+) and AMD Excavator (2015+) and later.
//! The entry point is compiled with `avx2` enabled and must only be reached
//! after the capability probe has confirmed AVX2 at run time.
//!
//! | Element width | Lanes per register |
//! |---------------|--------------------|
//! | 1 byte        | 32                 |
//! | 2 bytes       | 16                 |
//! | 4 bytes       | 8                  |
//! | 8 bytes       | 4                  |

pub(crate) mod u8x32;

use crate::lane::Lane;
use crate::operation::{with_kernel, BitwiseOp};
use crate::simd::tier;

use self::u8x32::U8x32;

/// Applies `op` to `count` elements with 256-bit registers.
///
/// # Safety
///
/// AVX2 must be available. `src` must be valid for reads and `dst` for writes
/// of `count * L::WIDTH` bytes; the regions are identical or disjoint.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn apply<L: Lane>(
    op: BitwiseOp,
    src: *const u8,
    dst: *mut u8,
    count: usize,
    mask: L,
) {
    with_kernel!(op, K => tier::run::<U8x32, L, K>(src, dst, count, mask))
}
