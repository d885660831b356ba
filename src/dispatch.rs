//! Dispatcher: validates arguments, then routes each call to a tier.
//!
//! Routing, per call:
//!
//! 1. Element width 1, 2, 4 or 8 bytes: the engine's tier, which for
//!    [`Engine::auto`] is the widest tier the CPU supports (AVX2, then
//!    SSE2/NEON), else the scalar loop.
//! 2. Any other width: the [custom-width adapter](crate::custom), which comes
//!    back through step 1 whenever its mask allows.
//!
//! Validation happens before any tier runs, so a returned error means the
//! target was not written. Tier choice is never observable in the output:
//! every tier produces the same bytes.
//!
//! # Example
//!
//! ```rust
//! use simdbits::{apply, and, not_in_place, BitwiseOp};
//!
//! let origin = [0x0Fu8, 0xF0, 0xAA];
//! let mut target = [0u8; 3];
//! and(&origin, &mut target, 0x0F).unwrap();
//! assert_eq!(target, [0x0F, 0x00, 0x0A]);
//!
//! let mut words = [0x00FFu16, 0xFF00];
//! not_in_place(&mut words);
//! assert_eq!(words, [0xFF00, 0x00FF]);
//!
//! // Operator chosen at run time.
//! let op: BitwiseOp = "xor".parse().unwrap();
//! apply(op, &origin, &mut target, 0xFF).unwrap();
//! assert_eq!(target, [0xF0, 0x0F, 0x55]);
//! ```

use bytemuck::Pod;

use crate::custom;
use crate::error::{
    check_range, invalid_width_error, length_mismatch_error, mask_width_error,
    partial_element_error, Result, SimdbitsError,
};
use crate::lane::Lane;
use crate::operation::BitwiseOp;
use crate::simd::probe::{self, Tier};
use crate::simd::scalar;

#[cfg(simdbits_x86)]
use crate::simd::{avx2, sse2};

#[cfg(simdbits_neon)]
use crate::simd::neon;

/// Runs `op` over `count` lanes of type `L` on `tier`.
///
/// # Safety
///
/// `tier` must be supported by the CPU. `src` must be valid for reads and
/// `dst` for writes of `count * L::WIDTH` bytes; the regions are identical or
/// disjoint.
pub(crate) unsafe fn apply_lane<L: Lane>(
    tier: Tier,
    op: BitwiseOp,
    src: *const u8,
    dst: *mut u8,
    count: usize,
    mask: L,
) {
    if count == 0 {
        return;
    }

    match tier {
        #[cfg(simdbits_x86)]
        Tier::Avx2 => avx2::apply(op, src, dst, count, mask),
        #[cfg(simdbits_x86)]
        Tier::Sse2 => sse2::apply(op, src, dst, count, mask),
        #[cfg(simdbits_neon)]
        Tier::Neon => neon::apply(op, src, dst, count, mask),
        _ => scalar::apply(op, src, dst, count, mask),
    }
}

/// Runs `op` over `count` elements of `mask.len()` bytes on `tier`.
///
/// # Safety
///
/// As [`apply_lane`], with `count * mask.len()` bytes; `mask` is non-empty.
pub(crate) unsafe fn apply_width(
    tier: Tier,
    op: BitwiseOp,
    src: *const u8,
    dst: *mut u8,
    count: usize,
    mask: &[u8],
) {
    match mask.len() {
        1 => apply_lane(tier, op, src, dst, count, u8::from_ne_slice(mask)),
        2 => apply_lane(tier, op, src, dst, count, u16::from_ne_slice(mask)),
        4 => apply_lane(tier, op, src, dst, count, u32::from_ne_slice(mask)),
        8 => apply_lane(tier, op, src, dst, count, u64::from_ne_slice(mask)),
        _ => custom::apply(tier, op, src, dst, count, mask),
    }
}

/// Number of `width`-byte elements in a `len`-byte buffer, validating the mask.
fn element_count(width: usize, len: usize, mask: &[u8]) -> Result<usize> {
    if width == 0 {
        return Err(invalid_width_error(width));
    }
    if mask.len() != width {
        return Err(mask_width_error(width, mask.len()));
    }
    if len % width != 0 {
        return Err(partial_element_error(len, width));
    }

    Ok(len / width)
}

/// A dispatcher bound to one tier.
///
/// [`Engine::auto`] is what the free functions use. Pinning a tier with
/// [`Engine::with_tier`] is mostly useful for comparing tiers against each
/// other or against [`Engine::scalar`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Engine {
    tier: Tier,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::auto()
    }
}

impl Engine {
    /// The widest supported tier, subject to `SIMDBITS_MAX_TIER`.
    pub fn auto() -> Self {
        Engine {
            tier: probe::best_tier(),
        }
    }

    /// The scalar reference implementation.
    pub fn scalar() -> Self {
        Engine { tier: Tier::Scalar }
    }

    /// An engine pinned to `tier`, or `None` if the CPU cannot run it.
    pub fn with_tier(tier: Tier) -> Option<Self> {
        probe::is_supported(tier).then_some(Engine { tier })
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Writes `op(origin[i], mask)` into `target[i]` for every `i < origin.len()`.
    ///
    /// `target` may be longer than `origin`; its extra elements are left alone.
    ///
    /// # Errors
    ///
    /// [`SimdbitsError::LengthMismatch`] if `target` is shorter than `origin`.
    pub fn apply<L: Lane>(
        &self,
        op: BitwiseOp,
        origin: &[L],
        target: &mut [L],
        mask: L,
    ) -> Result<()> {
        if target.len() < origin.len() {
            return Err(length_mismatch_error(origin.len(), target.len()));
        }

        unsafe {
            apply_lane(
                self.tier,
                op,
                origin.as_ptr() as *const u8,
                target.as_mut_ptr() as *mut u8,
                origin.len(),
                mask,
            )
        };

        Ok(())
    }

    /// Like [`Engine::apply`] on `origin[start..start + len]` into
    /// `target[start..start + len]`.
    pub fn apply_range<L: Lane>(
        &self,
        op: BitwiseOp,
        origin: &[L],
        target: &mut [L],
        mask: L,
        start: usize,
        len: usize,
    ) -> Result<()> {
        check_range(start, len, origin.len())?;
        check_range(start, len, target.len())?;

        self.apply(
            op,
            &origin[start..start + len],
            &mut target[start..start + len],
            mask,
        )
    }

    /// Replaces every element with `op(element, mask)`.
    pub fn apply_in_place<L: Lane>(&self, op: BitwiseOp, buffer: &mut [L], mask: L) {
        let ptr = buffer.as_mut_ptr() as *mut u8;

        unsafe { apply_lane(self.tier, op, ptr, ptr, buffer.len(), mask) };
    }

    /// Like [`Engine::apply_in_place`] on `buffer[start..start + len]`.
    pub fn apply_in_place_range<L: Lane>(
        &self,
        op: BitwiseOp,
        buffer: &mut [L],
        mask: L,
        start: usize,
        len: usize,
    ) -> Result<()> {
        check_range(start, len, buffer.len())?;

        self.apply_in_place(op, &mut buffer[start..start + len], mask);
        Ok(())
    }

    /// Applies `op` to a byte buffer holding elements of `width` bytes.
    ///
    /// `mask` holds one element's raw bytes. Works for any positive width;
    /// widths of 1, 2, 4 and 8 bytes use the vector tiers directly.
    ///
    /// # Errors
    ///
    /// - [`SimdbitsError::InvalidElementWidth`] if `width` is zero.
    /// - [`SimdbitsError::MaskWidth`] if `mask.len() != width`.
    /// - [`SimdbitsError::PartialElement`] if `origin.len()` is not a multiple of `width`.
    /// - [`SimdbitsError::LengthMismatch`] if `target` is shorter than `origin`.
    pub fn apply_bytes(
        &self,
        op: BitwiseOp,
        width: usize,
        origin: &[u8],
        target: &mut [u8],
        mask: &[u8],
    ) -> Result<()> {
        let count = element_count(width, origin.len(), mask)?;

        if target.len() < origin.len() {
            return Err(length_mismatch_error(count, target.len() / width));
        }

        unsafe {
            apply_width(
                self.tier,
                op,
                origin.as_ptr(),
                target.as_mut_ptr(),
                count,
                mask,
            )
        };

        Ok(())
    }

    /// In-place form of [`Engine::apply_bytes`].
    pub fn apply_bytes_in_place(
        &self,
        op: BitwiseOp,
        width: usize,
        buffer: &mut [u8],
        mask: &[u8],
    ) -> Result<()> {
        let count = element_count(width, buffer.len(), mask)?;
        let ptr = buffer.as_mut_ptr();

        unsafe { apply_width(self.tier, op, ptr, ptr, count, mask) };

        Ok(())
    }

    /// Applies `op` to any plain-old-data element type, whatever its size.
    ///
    /// ```rust
    /// use simdbits::{BitwiseOp, Engine};
    ///
    /// let origin = [[0x12u8, 0x34, 0x56], [0x78, 0x9A, 0xBC]];
    /// let mut target = [[0u8; 3]; 2];
    ///
    /// Engine::auto()
    ///     .apply_pod(BitwiseOp::And, &origin, &mut target, [0xF0, 0x0F, 0xFF])
    ///     .unwrap();
    /// assert_eq!(target, [[0x10, 0x04, 0x56], [0x70, 0x0A, 0xBC]]);
    /// ```
    pub fn apply_pod<T: Pod>(
        &self,
        op: BitwiseOp,
        origin: &[T],
        target: &mut [T],
        mask: T,
    ) -> Result<()> {
        let width = core::mem::size_of::<T>();
        if width == 0 {
            return Err(invalid_width_error(width));
        }
        if target.len() < origin.len() {
            return Err(length_mismatch_error(origin.len(), target.len()));
        }

        let target = &mut target[..origin.len()];
        self.apply_bytes(
            op,
            width,
            bytemuck::cast_slice(origin),
            bytemuck::cast_slice_mut(target),
            bytemuck::bytes_of(&mask),
        )
    }

    /// In-place form of [`Engine::apply_pod`].
    pub fn apply_pod_in_place<T: Pod>(&self, op: BitwiseOp, buffer: &mut [T], mask: T) -> Result<()> {
        let width = core::mem::size_of::<T>();
        if width == 0 {
            return Err(invalid_width_error(width));
        }

        self.apply_bytes_in_place(
            op,
            width,
            bytemuck::cast_slice_mut(buffer),
            bytemuck::bytes_of(&mask),
        )
    }

    /// Pointer-based entry point for callers that manage their own buffers.
    ///
    /// Processes `count` elements of `width` bytes from `origin` into
    /// `target`. `origin` and `target` may be equal.
    ///
    /// # Errors
    ///
    /// [`SimdbitsError::NullPointer`], [`SimdbitsError::InvalidElementWidth`]
    /// or [`SimdbitsError::MaskWidth`]; nothing is written in that case.
    ///
    /// # Safety
    ///
    /// - `origin` must be valid for reads of `count * width` bytes.
    /// - `target` must be valid for writes of `count * width` bytes.
    /// - The two regions must be identical or not overlap at all.
    pub unsafe fn apply_raw(
        &self,
        op: BitwiseOp,
        origin: *const u8,
        target: *mut u8,
        mask: &[u8],
        count: usize,
        width: usize,
    ) -> Result<()> {
        if origin.is_null() || target.is_null() {
            return Err(SimdbitsError::NullPointer);
        }
        if width == 0 {
            return Err(invalid_width_error(width));
        }
        if mask.len() != width {
            return Err(mask_width_error(width, mask.len()));
        }

        apply_width(self.tier, op, origin, target, count, mask);
        Ok(())
    }
}

/// Writes `op(origin[i], mask)` into `target[i]` using the best available tier.
///
/// See [`Engine::apply`].
pub fn apply<L: Lane>(op: BitwiseOp, origin: &[L], target: &mut [L], mask: L) -> Result<()> {
    Engine::auto().apply(op, origin, target, mask)
}

/// See [`Engine::apply_range`].
pub fn apply_range<L: Lane>(
    op: BitwiseOp,
    origin: &[L],
    target: &mut [L],
    mask: L,
    start: usize,
    len: usize,
) -> Result<()> {
    Engine::auto().apply_range(op, origin, target, mask, start, len)
}

/// See [`Engine::apply_in_place`].
pub fn apply_in_place<L: Lane>(op: BitwiseOp, buffer: &mut [L], mask: L) {
    Engine::auto().apply_in_place(op, buffer, mask)
}

/// See [`Engine::apply_in_place_range`].
pub fn apply_in_place_range<L: Lane>(
    op: BitwiseOp,
    buffer: &mut [L],
    mask: L,
    start: usize,
    len: usize,
) -> Result<()> {
    Engine::auto().apply_in_place_range(op, buffer, mask, start, len)
}

/// See [`Engine::apply_bytes`].
pub fn apply_bytes(
    op: BitwiseOp,
    width: usize,
    origin: &[u8],
    target: &mut [u8],
    mask: &[u8],
) -> Result<()> {
    Engine::auto().apply_bytes(op, width, origin, target, mask)
}

/// See [`Engine::apply_bytes_in_place`].
pub fn apply_bytes_in_place(
    op: BitwiseOp,
    width: usize,
    buffer: &mut [u8],
    mask: &[u8],
) -> Result<()> {
    Engine::auto().apply_bytes_in_place(op, width, buffer, mask)
}

/// See [`Engine::apply_pod`].
pub fn apply_pod<T: Pod>(op: BitwiseOp, origin: &[T], target: &mut [T], mask: T) -> Result<()> {
    Engine::auto().apply_pod(op, origin, target, mask)
}

/// See [`Engine::apply_pod_in_place`].
pub fn apply_pod_in_place<T: Pod>(op: BitwiseOp, buffer: &mut [T], mask: T) -> Result<()> {
    Engine::auto().apply_pod_in_place(op, buffer, mask)
}

/// `target[i] = !origin[i]`.
pub fn not<L: Lane>(origin: &[L], target: &mut [L]) -> Result<()> {
    apply(BitwiseOp::Not, origin, target, L::zero())
}

/// Inverts every element of `buffer`.
pub fn not_in_place<L: Lane>(buffer: &mut [L]) {
    apply_in_place(BitwiseOp::Not, buffer, L::zero())
}

/// `target[i] = !origin[i]` for `i` in `start..start + len`.
pub fn not_range<L: Lane>(origin: &[L], target: &mut [L], start: usize, len: usize) -> Result<()> {
    apply_range(BitwiseOp::Not, origin, target, L::zero(), start, len)
}

macro_rules! masked_entry_points {
    ($($op:ident: $name:ident, $in_place:ident, $range:ident, $expr:literal;)*) => {
        $(
            #[doc = concat!("`target[i] = ", $expr, "`.")]
            pub fn $name<L: Lane>(origin: &[L], target: &mut [L], mask: L) -> Result<()> {
                apply(BitwiseOp::$op, origin, target, mask)
            }

            #[doc = concat!("`buffer[i] = ", $expr, "` in place.")]
            pub fn $in_place<L: Lane>(buffer: &mut [L], mask: L) {
                apply_in_place(BitwiseOp::$op, buffer, mask)
            }

            #[doc = concat!("`target[i] = ", $expr, "` for `i` in `start..start + len`.")]
            pub fn $range<L: Lane>(
                origin: &[L],
                target: &mut [L],
                mask: L,
                start: usize,
                len: usize,
            ) -> Result<()> {
                apply_range(BitwiseOp::$op, origin, target, mask, start, len)
            }
        )*
    };
}

masked_entry_points! {
    And: and, and_in_place, and_range, "origin[i] & mask";
    Or: or, or_in_place, or_range, "origin[i] | mask";
    Xor: xor, xor_in_place, xor_range, "origin[i] ^ mask";
    Nand: nand, nand_in_place, nand_range, "!(origin[i] & mask)";
    Nor: nor, nor_in_place, nor_range, "!(origin[i] | mask)";
    Xnor: xnor, xnor_in_place, xnor_range, "!(origin[i] ^ mask)";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::out_of_range_error;

    #[test]
    fn test_engine_with_unsupported_tier() {
        for tier in Tier::PRIORITY {
            assert_eq!(
                Engine::with_tier(tier).is_some(),
                probe::is_supported(tier),
                "{tier}"
            );
        }
        assert_eq!(Engine::with_tier(Tier::Scalar), Some(Engine::scalar()));
    }

    #[test]
    fn test_target_longer_than_origin_keeps_extra() {
        let origin = [1u32, 2, 3];
        let mut target = [9u32; 5];

        xor(&origin, &mut target, 1).unwrap();

        assert_eq!(target, [0, 3, 2, 9, 9]);
    }

    #[test]
    fn test_target_shorter_than_origin() {
        let origin = [1u8; 4];
        let mut target = [7u8; 3];

        assert_eq!(
            and(&origin, &mut target, 0xFF),
            Err(length_mismatch_error(4, 3))
        );
        assert_eq!(target, [7; 3]);
    }

    #[test]
    fn test_range_forms() {
        let origin: Vec<u16> = (0..10).collect();
        let mut target = vec![0xFFFFu16; 10];

        or_range(&origin, &mut target, 0x100, 2, 5).unwrap();

        assert_eq!(&target[..2], &[0xFFFF, 0xFFFF]);
        assert_eq!(&target[2..7], &[0x102, 0x103, 0x104, 0x105, 0x106]);
        assert_eq!(&target[7..], &[0xFFFF; 3]);

        assert_eq!(
            not_range(&origin, &mut target, 8, 3),
            Err(out_of_range_error(8, 3, 10))
        );
    }

    #[test]
    fn test_in_place_range() {
        let mut buffer = [0u64; 6];
        apply_in_place_range(BitwiseOp::Nor, &mut buffer, 0, 1, 3).unwrap();
        assert_eq!(buffer, [0, u64::MAX, u64::MAX, u64::MAX, 0, 0]);

        assert!(apply_in_place_range(BitwiseOp::Nor, &mut buffer, 0, 6, 1).is_err());
    }

    #[test]
    fn test_bytes_validation() {
        let origin = [0u8; 12];
        let mut target = [0u8; 12];

        assert_eq!(
            apply_bytes(BitwiseOp::And, 0, &origin, &mut target, &[]),
            Err(invalid_width_error(0))
        );
        assert_eq!(
            apply_bytes(BitwiseOp::And, 3, &origin, &mut target, &[0xFF; 4]),
            Err(mask_width_error(3, 4))
        );
        assert_eq!(
            apply_bytes(BitwiseOp::And, 5, &origin, &mut target, &[0xFF; 5]),
            Err(partial_element_error(12, 5))
        );
        assert_eq!(
            apply_bytes(BitwiseOp::And, 3, &origin, &mut target[..9], &[0xFF; 3]),
            Err(length_mismatch_error(4, 3))
        );
    }

    #[test]
    fn test_bytes_primitive_width_routes_to_lanes() {
        let origin = 0x1122_3344u32.to_ne_bytes();
        let mut target = [0u8; 4];

        apply_bytes(
            BitwiseOp::Xor,
            4,
            &origin,
            &mut target,
            &0xFFFF_0000u32.to_ne_bytes(),
        )
        .unwrap();

        assert_eq!(u32::from_ne_bytes(target), 0xEEDD_3344);
    }

    #[test]
    fn test_pod_zero_sized() {
        let origin = [(); 3];
        let mut target = [(); 3];
        assert_eq!(
            apply_pod(BitwiseOp::Not, &origin, &mut target, ()),
            Err(invalid_width_error(0))
        );
    }

    #[test]
    fn test_raw_rejects_null() {
        let mut target = [0u8; 4];
        let result = unsafe {
            Engine::auto().apply_raw(
                BitwiseOp::Not,
                core::ptr::null(),
                target.as_mut_ptr(),
                &[0],
                4,
                1,
            )
        };
        assert_eq!(result, Err(SimdbitsError::NullPointer));
    }

    #[test]
    fn test_raw_in_place_custom_width() {
        let mut buffer = [0x0Fu8; 15];
        let ptr = buffer.as_mut_ptr();

        unsafe {
            Engine::auto()
                .apply_raw(BitwiseOp::Or, ptr, ptr, &[0xF0, 0x00, 0xF0, 0x00, 0xF0], 3, 5)
                .unwrap()
        };

        assert_eq!(
            buffer,
            [0xFF, 0x0F, 0xFF, 0x0F, 0xFF, 0xFF, 0x0F, 0xFF, 0x0F, 0xFF, 0xFF, 0x0F, 0xFF, 0x0F, 0xFF]
        );
    }
}
