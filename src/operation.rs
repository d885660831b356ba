//! The seven bitwise operators and their per-operator kernels.
//!
//! [`BitwiseOp`] is the runtime selector callers pass around. Internally each
//! operator also has a zero-sized kernel type implementing [`Kernel`], so every
//! tier compiles one tight loop per operator instead of branching per chunk.
//! The [`with_kernel!`] macro bridges the two.

use std::fmt;
use std::str::FromStr;

use num::PrimInt;

use crate::error::{unknown_operation_error, SimdbitsError};
use crate::simd::traits::BitVector;

/// A bitwise operator applied element-wise between a buffer and a mask.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BitwiseOp {
    /// `!value`; the mask is ignored.
    Not,
    /// `value & mask`
    And,
    /// `value | mask`
    Or,
    /// `value ^ mask`
    Xor,
    /// `!(value & mask)`
    Nand,
    /// `!(value | mask)`
    Nor,
    /// `!(value ^ mask)`
    Xnor,
}

impl BitwiseOp {
    /// Every operator, in declaration order.
    pub const ALL: [BitwiseOp; 7] = [
        BitwiseOp::Not,
        BitwiseOp::And,
        BitwiseOp::Or,
        BitwiseOp::Xor,
        BitwiseOp::Nand,
        BitwiseOp::Nor,
        BitwiseOp::Xnor,
    ];

    /// Whether the operator reads the mask operand.
    #[inline(always)]
    pub fn uses_mask(self) -> bool {
        !matches!(self, BitwiseOp::Not)
    }

    /// Lower-case operator name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            BitwiseOp::Not => "not",
            BitwiseOp::And => "and",
            BitwiseOp::Or => "or",
            BitwiseOp::Xor => "xor",
            BitwiseOp::Nand => "nand",
            BitwiseOp::Nor => "nor",
            BitwiseOp::Xnor => "xnor",
        }
    }

    /// Applies the operator to a single value.
    ///
    /// This is the reference every vector tier must agree with bit for bit.
    ///
    /// ```rust
    /// use simdbits::BitwiseOp;
    ///
    /// assert_eq!(BitwiseOp::And.apply_scalar(0xAAu8, 0x0F), 0x0A);
    /// assert_eq!(BitwiseOp::Nor.apply_scalar(0xF0u8, 0x0F), 0x00);
    /// assert_eq!(BitwiseOp::Not.apply_scalar(0x00FFu16, 0), 0xFF00);
    /// ```
    #[inline(always)]
    pub fn apply_scalar<T: PrimInt>(self, value: T, mask: T) -> T {
        match self {
            BitwiseOp::Not => !value,
            BitwiseOp::And => value & mask,
            BitwiseOp::Or => value | mask,
            BitwiseOp::Xor => value ^ mask,
            BitwiseOp::Nand => !(value & mask),
            BitwiseOp::Nor => !(value | mask),
            BitwiseOp::Xnor => !(value ^ mask),
        }
    }
}

impl fmt::Display for BitwiseOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BitwiseOp {
    type Err = SimdbitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BitwiseOp::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| unknown_operation_error(s))
    }
}

/// Compile-time form of a [`BitwiseOp`].
pub(crate) trait Kernel {
    const OP: BitwiseOp;

    #[inline(always)]
    fn scalar<T: PrimInt>(value: T, mask: T) -> T {
        Self::OP.apply_scalar(value, mask)
    }

    /// # Safety
    ///
    /// The caller must be running on a CPU that supports `V`'s instructions.
    unsafe fn vector<V: BitVector>(value: V, mask: V) -> V;
}

pub(crate) struct NotKernel;
pub(crate) struct AndKernel;
pub(crate) struct OrKernel;
pub(crate) struct XorKernel;
pub(crate) struct NandKernel;
pub(crate) struct NorKernel;
pub(crate) struct XnorKernel;

impl Kernel for NotKernel {
    const OP: BitwiseOp = BitwiseOp::Not;

    #[inline(always)]
    unsafe fn vector<V: BitVector>(value: V, _mask: V) -> V {
        value.not()
    }
}

impl Kernel for AndKernel {
    const OP: BitwiseOp = BitwiseOp::And;

    #[inline(always)]
    unsafe fn vector<V: BitVector>(value: V, mask: V) -> V {
        value.and(mask)
    }
}

impl Kernel for OrKernel {
    const OP: BitwiseOp = BitwiseOp::Or;

    #[inline(always)]
    unsafe fn vector<V: BitVector>(value: V, mask: V) -> V {
        value.or(mask)
    }
}

impl Kernel for XorKernel {
    const OP: BitwiseOp = BitwiseOp::Xor;

    #[inline(always)]
    unsafe fn vector<V: BitVector>(value: V, mask: V) -> V {
        value.xor(mask)
    }
}

impl Kernel for NandKernel {
    const OP: BitwiseOp = BitwiseOp::Nand;

    #[inline(always)]
    unsafe fn vector<V: BitVector>(value: V, mask: V) -> V {
        value.and(mask).not()
    }
}

impl Kernel for NorKernel {
    const OP: BitwiseOp = BitwiseOp::Nor;

    #[inline(always)]
    unsafe fn vector<V: BitVector>(value: V, mask: V) -> V {
        value.or(mask).not()
    }
}

impl Kernel for XnorKernel {
    const OP: BitwiseOp = BitwiseOp::Xnor;

    #[inline(always)]
    unsafe fn vector<V: BitVector>(value: V, mask: V) -> V {
        value.xor(mask).not()
    }
}

/// Expands `$body` once per operator with `$k` bound to that operator's kernel type.
macro_rules! with_kernel {
    ($op:expr, $k:ident => $body:expr) => {
        match $op {
            $crate::operation::BitwiseOp::Not => {
                type $k = $crate::operation::NotKernel;
                $body
            }
            $crate::operation::BitwiseOp::And => {
                type $k = $crate::operation::AndKernel;
                $body
            }
            $crate::operation::BitwiseOp::Or => {
                type $k = $crate::operation::OrKernel;
                $body
            }
            $crate::operation::BitwiseOp::Xor => {
                type $k = $crate::operation::XorKernel;
                $body
            }
            $crate::operation::BitwiseOp::Nand => {
                type $k = $crate::operation::NandKernel;
                $body
            }
            $crate::operation::BitwiseOp::Nor => {
                type $k = $crate::operation::NorKernel;
                $body
            }
            $crate::operation::BitwiseOp::Xnor => {
                type $k = $crate::operation::XnorKernel;
                $body
            }
        }
    };
}

pub(crate) use with_kernel;
