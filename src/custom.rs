//! Custom-width adapter for element sizes other than 1, 2, 4 or 8 bytes.
//!
//! Such elements have no hardware lane, so the buffer is treated as a byte
//! stream of `count * width` bytes. Two strategies:
//!
//! - **Periodic mask.** If the mask repeats with a primitive period `p` that
//!   divides the width (always true for NOT, which ignores the mask), every
//!   byte position in the stream meets the same mask byte it would meet as
//!   part of a `p`-byte lane. The whole stream then runs through the primitive
//!   tiers as `count * width / p` lanes of `p` bytes.
//! - **Per element.** Otherwise each element is processed on its own: full
//!   8-byte words with the matching 8 bytes of the mask, then the sub-word
//!   remainder through a scratch word of which only the remainder bytes are
//!   written back.
//!
//! # Masks wider than a word
//!
//! Byte `j` of every element meets mask byte `j`, for all `j < width`. Word
//! `k` of an element uses mask bytes `8k..8k + 8`, not the first eight mask
//! bytes again. Schemes that repeat the first eight mask bytes over every
//! word give different results for masks of more than eight distinct bytes;
//! to reproduce them, pass a mask whose bytes already repeat with period 8.
//!
//! The remainder merge works on byte indices, not shifts, so it is independent
//! of the target's byte order, and it never reads or writes a byte outside the
//! element being processed.

use core::ptr;

use crate::dispatch;
use crate::lane::Lane;
use crate::operation::{with_kernel, BitwiseOp, Kernel};
use crate::simd::probe::Tier;
use crate::WORD_BYTES;

/// Tiles a mask's raw bytes to fill one 8-byte word.
///
/// Masks of eight bytes or more contribute their first eight bytes.
///
/// ```rust
/// use simdbits::custom::replicate_mask;
///
/// let word = replicate_mask(&[0x01, 0x02, 0x03]);
/// assert_eq!(word.to_ne_bytes(), [1, 2, 3, 1, 2, 3, 1, 2]);
/// ```
pub fn replicate_mask(mask: &[u8]) -> u64 {
    let mut word = [0u8; WORD_BYTES];

    if !mask.is_empty() {
        for (i, byte) in word.iter_mut().enumerate() {
            *byte = mask[i % mask.len()];
        }
    }

    u64::from_ne_bytes(word)
}

/// Smallest primitive lane width that reproduces the mask pattern across the
/// whole byte stream, if any.
///
/// The period must divide the element width so that element boundaries fall
/// on lane boundaries.
pub(crate) fn primitive_period(op: BitwiseOp, mask: &[u8]) -> Option<usize> {
    if !op.uses_mask() {
        return Some(1);
    }

    let width = mask.len();

    [1usize, 2, 4, 8]
        .into_iter()
        .filter(|&p| p <= width && width % p == 0)
        .find(|&p| mask.chunks_exact(p).all(|chunk| chunk == &mask[..p]))
}

/// Applies `op` to `count` elements of `mask.len()` bytes each.
///
/// # Safety
///
/// `src` must be valid for reads and `dst` for writes of `count * mask.len()`
/// bytes; the regions are identical or disjoint. `tier` must be supported.
pub(crate) unsafe fn apply(
    tier: Tier,
    op: BitwiseOp,
    src: *const u8,
    dst: *mut u8,
    count: usize,
    mask: &[u8],
) {
    let width = mask.len();
    debug_assert!(width > 0, "element width must be positive");

    if let Some(period) = primitive_period(op, mask) {
        let lanes = count * (width / period);
        dispatch::apply_width(tier, op, src, dst, lanes, &mask[..period]);
        return;
    }

    with_kernel!(op, K => apply_per_element::<K>(src, dst, count, mask))
}

#[inline(always)]
unsafe fn apply_per_element<K: Kernel>(src: *const u8, dst: *mut u8, count: usize, mask: &[u8]) {
    let width = mask.len();
    let words = width / WORD_BYTES;
    let remainder = width % WORD_BYTES;
    let tail_mask = replicate_mask(&mask[words * WORD_BYTES..]);

    for element in 0..count {
        let base = element * width;

        for word in 0..words {
            let offset = word * WORD_BYTES;
            let mask_word = u64::from_ne_slice(&mask[offset..offset + WORD_BYTES]);

            let value = ptr::read_unaligned(src.add(base + offset) as *const u64);
            ptr::write_unaligned(dst.add(base + offset) as *mut u64, K::scalar(value, mask_word));
        }

        if remainder > 0 {
            let offset = base + words * WORD_BYTES;
            merge_tail::<K>(src.add(offset), dst.add(offset), remainder, tail_mask);
        }
    }
}

/// Computes a full word from the `len` remainder bytes and writes back only those bytes.
#[inline(always)]
unsafe fn merge_tail<K: Kernel>(src: *const u8, dst: *mut u8, len: usize, mask: u64) {
    debug_assert!(len < WORD_BYTES);

    let mut scratch = [0u8; WORD_BYTES];
    ptr::copy_nonoverlapping(src, scratch.as_mut_ptr(), len);

    let computed = K::scalar(u64::from_ne_bytes(scratch), mask).to_ne_bytes();
    ptr::copy_nonoverlapping(computed.as_ptr(), dst, len);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Byte-at-a-time model: byte `j` of every element meets mask byte `j`.
    fn reference(op: BitwiseOp, origin: &[u8], mask: &[u8]) -> Vec<u8> {
        origin
            .iter()
            .enumerate()
            .map(|(i, &b)| op.apply_scalar(b, mask[i % mask.len()]))
            .collect()
    }

    fn run(op: BitwiseOp, origin: &[u8], mask: &[u8]) -> Vec<u8> {
        let mut target = vec![0u8; origin.len()];
        let count = origin.len() / mask.len();
        unsafe {
            apply(
                Tier::Scalar,
                op,
                origin.as_ptr(),
                target.as_mut_ptr(),
                count,
                mask,
            )
        };
        target
    }

    #[test]
    fn test_replicate_mask() {
        assert_eq!(replicate_mask(&[0xAB]).to_ne_bytes(), [0xAB; 8]);
        assert_eq!(
            replicate_mask(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]).to_ne_bytes(),
            [1, 2, 3, 4, 5, 6, 7, 8]
        );
        assert_eq!(replicate_mask(&[]), 0);
    }

    #[test]
    fn test_primitive_period() {
        assert_eq!(primitive_period(BitwiseOp::Not, &[1, 2, 3]), Some(1));
        assert_eq!(primitive_period(BitwiseOp::And, &[7, 7, 7]), Some(1));
        assert_eq!(primitive_period(BitwiseOp::And, &[1, 2, 3]), None);
        assert_eq!(primitive_period(BitwiseOp::Or, &[1, 2, 1, 2, 1, 2]), Some(2));
        assert_eq!(primitive_period(BitwiseOp::Xor, &[1, 2, 3, 4, 1, 2, 3, 4, 1, 2, 3, 4]), Some(4));
        // Period 4 does not divide width 6.
        assert_eq!(primitive_period(BitwiseOp::Xor, &[1, 2, 3, 4, 1, 2]), None);

        let mut twenty_four = [0u8; 24];
        for (i, b) in twenty_four.iter_mut().enumerate() {
            *b = (i % 8) as u8;
        }
        assert_eq!(primitive_period(BitwiseOp::Nand, &twenty_four), Some(8));
    }

    #[test]
    fn test_per_element_matches_reference() {
        let masks: [&[u8]; 5] = [
            &[0x0F, 0xF0, 0x3C],
            &[1, 2, 3, 4, 5],
            &[0xFF, 0, 0xFF, 0, 0xFF, 0, 0xFF, 0, 0xFF, 0, 0xFF, 0x80],
            &[9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 0xAA, 0x55, 0x11, 0x22, 0x33, 0x44, 0x99],
            &[0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C],
        ];

        for mask in masks {
            for count in [0usize, 1, 2, 5, 9] {
                let origin: Vec<u8> = (0..count * mask.len())
                    .map(|i| (i as u8).wrapping_mul(29).wrapping_add(3))
                    .collect();

                for op in BitwiseOp::ALL {
                    assert_eq!(
                        run(op, &origin, mask),
                        reference(op, &origin, mask),
                        "{op} width {} count {count}",
                        mask.len()
                    );
                }
            }
        }
    }

    #[test]
    fn test_wide_mask_is_positional() {
        let origin = [0xFFu8; 24];
        let mask: Vec<u8> = (1..=12).collect();

        let target = run(BitwiseOp::And, &origin, &mask);

        assert_eq!(&target[..12], &mask[..]);
        assert_eq!(&target[8..12], &[9, 10, 11, 12]);
        assert_eq!(&target[12..], &mask[..]);

        // Repeating the first word reproduces a word-periodic mask.
        let repeated: Vec<u8> = (0..12).map(|i| mask[i % 8]).collect();
        let target = run(BitwiseOp::And, &origin, &repeated);
        assert_eq!(&target[8..12], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_width_twelve_all_ones_and_zeros() {
        let origin: Vec<u8> = (0..12 * 7).map(|i| i as u8 ^ 0x5A).collect();

        assert_eq!(run(BitwiseOp::And, &origin, &[0xFF; 12]), origin);
        assert_eq!(run(BitwiseOp::And, &origin, &[0x00; 12]), vec![0u8; origin.len()]);
    }

    #[test]
    fn test_tail_does_not_touch_following_bytes() {
        // Width 3 per-element path: the byte right after the last element stays.
        let origin = [0x10u8, 0x20, 0x30, 0x40, 0x50, 0x60];
        let mut target = [0xEEu8; 7];
        let mask = [0x01u8, 0x02, 0x04];

        unsafe {
            apply(
                Tier::Scalar,
                BitwiseOp::Or,
                origin.as_ptr(),
                target.as_mut_ptr(),
                2,
                &mask,
            )
        };

        assert_eq!(target, [0x11, 0x22, 0x34, 0x41, 0x52, 0x64, 0xEE]);
    }

    #[test]
    fn test_in_place_per_element() {
        let mut buffer: Vec<u8> = (0..40).collect();
        let expected = reference(BitwiseOp::Xnor, &buffer, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        let ptr = buffer.as_mut_ptr();

        unsafe {
            apply(
                Tier::Scalar,
                BitwiseOp::Xnor,
                ptr,
                ptr,
                4,
                &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
            )
        };

        assert_eq!(buffer, expected);
    }
}
