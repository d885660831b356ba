//! Method-style access to the bitwise operators on slices, `Vec`s and
//! `ndarray` arrays.
//!
//! [`Bitwise`] returns a new container; [`BitwiseAssign`] rewrites the
//! receiver. Both take the operator as a runtime [`BitwiseOp`] value.
//!
//! ```rust
//! use ndarray::array;
//! use simdbits::{Bitwise, BitwiseAssign, BitwiseOp};
//!
//! let masked = [0x12u8, 0x34, 0x56].bitwise(BitwiseOp::And, 0xF0);
//! assert_eq!(masked, vec![0x10, 0x30, 0x50]);
//!
//! let mut grid = array![[1u32, 2], [3, 4]];
//! grid.bitwise_assign(BitwiseOp::Or, 0x100);
//! assert_eq!(grid, array![[0x101, 0x102], [0x103, 0x104]]);
//! ```

use ndarray::{Array, ArrayBase, Data, DataMut, Dimension};
use num::Zero;

use crate::dispatch::apply_in_place;
use crate::lane::Lane;
use crate::operation::BitwiseOp;

/// Allocating bitwise operators.
pub trait Bitwise {
    type Elem: Lane;
    type Output;

    /// Returns a copy with `op(element, mask)` applied to every element.
    fn bitwise(&self, op: BitwiseOp, mask: Self::Elem) -> Self::Output;

    /// Returns a copy with every element inverted.
    fn bitwise_not(&self) -> Self::Output {
        self.bitwise(BitwiseOp::Not, Self::Elem::zero())
    }
}

/// In-place bitwise operators.
pub trait BitwiseAssign {
    type Elem: Lane;

    /// Replaces every element with `op(element, mask)`.
    fn bitwise_assign(&mut self, op: BitwiseOp, mask: Self::Elem);

    /// Inverts every element.
    fn bitwise_not_assign(&mut self) {
        self.bitwise_assign(BitwiseOp::Not, Self::Elem::zero())
    }
}

impl<L: Lane> Bitwise for [L] {
    type Elem = L;
    type Output = Vec<L>;

    fn bitwise(&self, op: BitwiseOp, mask: L) -> Vec<L> {
        let mut output = self.to_vec();
        apply_in_place(op, &mut output, mask);
        output
    }
}

impl<L: Lane> BitwiseAssign for [L] {
    type Elem = L;

    fn bitwise_assign(&mut self, op: BitwiseOp, mask: L) {
        apply_in_place(op, self, mask)
    }
}

impl<L, S, D> Bitwise for ArrayBase<S, D>
where
    L: Lane,
    S: Data<Elem = L>,
    D: Dimension,
{
    type Elem = L;
    type Output = Array<L, D>;

    fn bitwise(&self, op: BitwiseOp, mask: L) -> Array<L, D> {
        let mut output = self.to_owned();
        output.bitwise_assign(op, mask);
        output
    }
}

impl<L, S, D> BitwiseAssign for ArrayBase<S, D>
where
    L: Lane,
    S: DataMut<Elem = L>,
    D: Dimension,
{
    type Elem = L;

    /// Contiguous arrays, in any memory order, go through the vector tiers.
    /// Strided views fall back to the scalar operator element by element.
    fn bitwise_assign(&mut self, op: BitwiseOp, mask: L) {
        if let Some(slice) = self.as_slice_memory_order_mut() {
            apply_in_place(op, slice, mask);
            return;
        }

        self.map_inplace(|value| *value = op.apply_scalar(*value, mask));
    }
}
