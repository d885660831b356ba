//! Generic primitive-width tier, instantiated once per register width.
//!
//! The bulk of the buffer is streamed through full registers; the tail that
//! cannot fill a register goes through a staged partial load/store, so no
//! byte past `count` elements is ever read or written.

use crate::lane::Lane;
use crate::operation::Kernel;
use crate::simd::traits::BitVector;

/// The tail of a buffer that does not fill a whole register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Remainder {
    /// Index of the first tail element.
    pub start: usize,
    /// Number of tail elements, always fewer than one register's lanes.
    pub count: usize,
}

impl Remainder {
    /// Splits `count` elements into a bulk prefix of whole registers and a tail.
    ///
    /// Returns the bulk length and the remainder; together they cover
    /// `0..count` exactly.
    ///
    /// ```rust
    /// use simdbits::simd::tier::Remainder;
    ///
    /// let (bulk, tail) = Remainder::split(19, 8);
    /// assert_eq!(bulk, 16);
    /// assert_eq!(tail, Remainder { start: 16, count: 3 });
    /// ```
    #[inline(always)]
    pub fn split(count: usize, lanes: usize) -> (usize, Remainder) {
        debug_assert!(lanes > 0, "a register holds at least one lane");

        let bulk = count - count % lanes;
        (
            bulk,
            Remainder {
                start: bulk,
                count: count - bulk,
            },
        )
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Number of `L` lanes in a `V` register.
#[inline(always)]
pub(crate) const fn lanes<V: BitVector, L: Lane>() -> usize {
    V::BYTES / L::WIDTH
}

/// Runs kernel `K` over `count` elements using register `V`.
///
/// # Safety
///
/// The CPU must support `V`. `src` must be valid for reads and `dst` for writes
/// of `count * L::WIDTH` bytes; the regions are identical or disjoint.
#[inline(always)]
pub(crate) unsafe fn run<V: BitVector, L: Lane, K: Kernel>(
    src: *const u8,
    dst: *mut u8,
    count: usize,
    mask: L,
) {
    let step = lanes::<V, L>();
    let (bulk, tail) = Remainder::split(count, step);

    let mask = mask.splat::<V>();

    let mut i = 0;
    while i < bulk {
        let offset = i * L::WIDTH;
        let value = V::load(src.add(offset));
        K::vector(value, mask).store(dst.add(offset));
        i += step;
    }

    if !tail.is_empty() {
        run_tail::<V, L, K>(src, dst, tail, mask);
    }
}

#[inline(always)]
unsafe fn run_tail<V: BitVector, L: Lane, K: Kernel>(
    src: *const u8,
    dst: *mut u8,
    tail: Remainder,
    mask: V,
) {
    let offset = tail.start * L::WIDTH;
    let len = tail.count * L::WIDTH;

    let value = V::load_partial(src.add(offset), len);
    K::vector(value, mask).store_partial(dst.add(offset), len);
}
