pub mod probe;
pub mod tier;

pub(crate) mod scalar;
pub(crate) mod traits;

#[cfg(simdbits_x86)]
pub(crate) mod avx2;
#[cfg(simdbits_x86)]
pub(crate) mod sse2;

#[cfg(simdbits_neon)]
pub(crate) mod neon;
