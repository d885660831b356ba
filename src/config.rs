//! Process-wide configuration read from the environment.
//!
//! | Variable              | Values                                      | Effect                                    |
//! |-----------------------|---------------------------------------------|-------------------------------------------|
//! | `SIMDBITS_MAX_TIER`   | `auto`, `avx2`, `sse2`, `neon`, `scalar`    | Caps automatic dispatch by register width |
//!
//! The environment is read once, on the first dispatch. Setting the variable
//! later in the process has no effect. The build-time counterpart,
//! `SIMDBITS_FORCE_FALLBACK`, is handled by `build.rs`.

use std::sync::OnceLock;

use crate::simd::probe::Tier;

/// Environment variable capping the automatically selected tier.
pub const MAX_TIER_ENV: &str = "SIMDBITS_MAX_TIER";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Widest tier automatic dispatch may use; `None` means no cap.
    pub max_tier: Option<Tier>,
}

impl Config {
    /// Builds a configuration from the process environment.
    pub fn from_env() -> Self {
        match std::env::var(MAX_TIER_ENV) {
            Ok(value) => Self::from_max_tier(&value),
            Err(_) => Config::default(),
        }
    }

    /// Interprets a `SIMDBITS_MAX_TIER` value. Unknown values leave the cap unset.
    pub fn from_max_tier(value: &str) -> Self {
        let value = value.trim();

        if value.is_empty() || value.eq_ignore_ascii_case("auto") {
            return Config::default();
        }

        match value.parse::<Tier>() {
            Ok(tier) => {
                tracing::info!(max_tier = %tier, "{MAX_TIER_ENV} caps bitwise dispatch");
                Config {
                    max_tier: Some(tier),
                }
            }
            Err(error) => {
                tracing::warn!(%error, "ignoring {MAX_TIER_ENV}");
                Config::default()
            }
        }
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// The configuration in effect for this process.
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}
