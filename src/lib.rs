//! Width-adaptive bitwise operations over buffers.
//!
//! `simdbits` applies NOT, AND, OR, XOR, NAND, NOR and XNOR element-wise
//! between a buffer and a single mask value, using the widest vector
//! instructions the running CPU offers:
//!
//! | Tier     | Register | Targets                |
//! |----------|----------|------------------------|
//! | AVX2     | 256-bit  | x86, x86_64            |
//! | SSE2     | 128-bit  | x86, x86_64            |
//! | NEON     | 128-bit  | little-endian AArch64  |
//! | Scalar   | one lane | everywhere             |
//!
//! Detection happens once per process. Every tier produces exactly the bytes
//! the scalar loop would, so the choice never shows up in results.
//!
//! Elements of 1, 2, 4 or 8 bytes map onto hardware lanes ([`Lane`]). Any
//! other width (3-byte pixels, 12-byte records, ...) goes through
//! [`apply_bytes`] or [`apply_pod`].
//!
//! ```rust
//! use simdbits::{nand, Bitwise, BitwiseOp, Engine};
//!
//! let origin = vec![0xF0F0u16; 100];
//! let mut target = vec![0u16; 100];
//! nand(&origin, &mut target, 0xFF00).unwrap();
//! assert!(target.iter().all(|&v| v == 0x0FFF));
//!
//! let flipped = origin.bitwise(BitwiseOp::Xor, 0xFFFF);
//! assert_eq!(flipped[0], 0x0F0F);
//!
//! // Pin the reference loop, e.g. to compare against.
//! let engine = Engine::scalar();
//! let mut again = vec![0u16; 100];
//! engine.apply(BitwiseOp::Nand, &origin, &mut again, 0xFF00).unwrap();
//! assert_eq!(again, target);
//! ```
//!
//! # Build and runtime switches
//!
//! - `SIMDBITS_FORCE_FALLBACK=1` at build time compiles out every vector tier.
//! - `SIMDBITS_MAX_TIER=<tier>` at run time caps automatic dispatch, see [`config`].

pub mod config;
pub mod custom;
pub mod error;
pub mod ext;
pub mod simd;

mod dispatch;
mod lane;
mod operation;

/// Bytes in the scalar word the custom-width adapter works with.
pub const WORD_BYTES: usize = 8;

/// Widest register any tier uses, in bytes.
pub const MAX_VECTOR_BYTES: usize = 32;

pub use dispatch::{
    and, and_in_place, and_range, apply, apply_bytes, apply_bytes_in_place, apply_in_place,
    apply_in_place_range, apply_pod, apply_pod_in_place, apply_range, nand, nand_in_place,
    nand_range, nor, nor_in_place, nor_range, not, not_in_place, not_range, or, or_in_place,
    or_range, xnor, xnor_in_place, xnor_range, xor, xor_in_place, xor_range, Engine,
};
pub use error::{Result, SimdbitsError};
pub use ext::{Bitwise, BitwiseAssign};
pub use lane::Lane;
pub use operation::BitwiseOp;
pub use simd::probe::{
    best_tier, capabilities, is_supported, supported_tiers, Capabilities, Tier,
};
