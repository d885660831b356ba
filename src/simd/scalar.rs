//! Scalar fallback: one element per iteration, available everywhere.
//!
//! Reads and writes are unaligned so the same loop serves typed buffers and
//! byte streams reinterpreted as wider lanes.

use core::ptr;

use crate::lane::Lane;
use crate::operation::{with_kernel, BitwiseOp, Kernel};

/// Applies `op` to `count` elements of type `L`.
///
/// # Safety
///
/// `src` must be valid for reads and `dst` for writes of `count * L::WIDTH`
/// bytes. The two regions are either identical or disjoint.
pub(crate) unsafe fn apply<L: Lane>(
    op: BitwiseOp,
    src: *const u8,
    dst: *mut u8,
    count: usize,
    mask: L,
) {
    with_kernel!(op, K => run::<L, K>(src, dst, count, mask))
}

#[inline(always)]
pub(crate) unsafe fn run<L: Lane, K: Kernel>(src: *const u8, dst: *mut u8, count: usize, mask: L) {
    for i in 0..count {
        let offset = i * L::WIDTH;
        let value = ptr::read_unaligned(src.add(offset) as *const L);
        ptr::write_unaligned(dst.add(offset) as *mut L, K::scalar(value, mask));
    }
}
