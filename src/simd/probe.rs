//! Runtime CPU capability probe.
//!
//! Detection runs once per process and is cached in a `OnceLock`; every later
//! query is a plain read and safe from any thread. A missing instruction set is
//! an ordinary answer, never an error: dispatch simply moves down to the next
//! tier in [`Tier::PRIORITY`].

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::config;
use crate::error::{unknown_tier_error, SimdbitsError};

/// One implementation strategy for the bitwise kernels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Element-at-a-time loop, always available.
    Scalar,
    /// 128-bit SSE2 registers (x86, x86_64).
    Sse2,
    /// 128-bit NEON registers (little-endian AArch64).
    Neon,
    /// 256-bit AVX2 registers (x86, x86_64).
    Avx2,
}

impl Tier {
    /// Tiers in the order dispatch tries them: widest first, scalar last.
    pub const PRIORITY: [Tier; 4] = [Tier::Avx2, Tier::Sse2, Tier::Neon, Tier::Scalar];

    /// Register width in bits; zero for the scalar tier.
    pub fn vector_bits(self) -> usize {
        match self {
            Tier::Scalar => 0,
            Tier::Sse2 | Tier::Neon => 128,
            Tier::Avx2 => 256,
        }
    }

    /// Number of lanes of `width`-byte elements in one register (1 for scalar).
    pub fn lanes(self, width: usize) -> usize {
        match self.vector_bits() {
            0 => 1,
            bits => (bits / 8 / width.max(1)).max(1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tier::Scalar => "scalar",
            Tier::Sse2 => "sse2",
            Tier::Neon => "neon",
            Tier::Avx2 => "avx2",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tier {
    type Err = SimdbitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::PRIORITY
            .into_iter()
            .find(|tier| tier.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| unknown_tier_error(s))
    }
}

/// Instruction sets detected on the running CPU.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub avx2: bool,
    pub sse2: bool,
    pub neon: bool,
}

impl Capabilities {
    #[cfg(simdbits_x86)]
    fn detect() -> Self {
        Capabilities {
            avx2: is_x86_feature_detected!("avx2"),
            sse2: is_x86_feature_detected!("sse2"),
            neon: false,
        }
    }

    #[cfg(simdbits_neon)]
    fn detect() -> Self {
        Capabilities {
            avx2: false,
            sse2: false,
            neon: std::arch::is_aarch64_feature_detected!("neon"),
        }
    }

    #[cfg(not(any(simdbits_x86, simdbits_neon)))]
    fn detect() -> Self {
        Capabilities::default()
    }

    /// Whether `tier` can run on this CPU.
    pub fn supports(&self, tier: Tier) -> bool {
        match tier {
            Tier::Scalar => true,
            Tier::Sse2 => self.sse2,
            Tier::Neon => self.neon,
            Tier::Avx2 => self.avx2,
        }
    }

    /// Widest supported tier whose register is no wider than `cap`.
    pub fn best(&self, cap: Option<Tier>) -> Tier {
        let limit = cap.map_or(usize::MAX, Tier::vector_bits);

        Tier::PRIORITY
            .into_iter()
            .find(|&tier| tier.vector_bits() <= limit && self.supports(tier))
            .unwrap_or(Tier::Scalar)
    }
}

static CAPS: OnceLock<Capabilities> = OnceLock::new();
static BEST: OnceLock<Tier> = OnceLock::new();

/// Detected capabilities, probed on first call.
pub fn capabilities() -> &'static Capabilities {
    CAPS.get_or_init(|| {
        let caps = Capabilities::detect();
        tracing::debug!(
            avx2 = caps.avx2,
            sse2 = caps.sse2,
            neon = caps.neon,
            "SIMD capabilities detected"
        );
        caps
    })
}

/// Whether `tier` is usable on the running CPU.
///
/// ```rust
/// use simdbits::{is_supported, Tier};
///
/// assert!(is_supported(Tier::Scalar));
/// ```
pub fn is_supported(tier: Tier) -> bool {
    capabilities().supports(tier)
}

/// The tier automatic dispatch uses: the widest supported one, capped by
/// `SIMDBITS_MAX_TIER` when set.
pub fn best_tier() -> Tier {
    *BEST.get_or_init(|| {
        let tier = capabilities().best(config::config().max_tier);
        tracing::debug!(tier = %tier, "bitwise dispatch tier selected");
        tier
    })
}

/// Every tier usable on the running CPU, widest first.
pub fn supported_tiers() -> Vec<Tier> {
    Tier::PRIORITY
        .into_iter()
        .filter(|&tier| is_supported(tier))
        .collect()
}
