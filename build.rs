use std::env;

// Build-time switches understood by this crate
#[derive(Debug)]
struct BuildSwitch {
    env_var: &'static str,
    cfg_flag: &'static str,
}

impl BuildSwitch {
    fn switches() -> Vec<BuildSwitch> {
        vec![BuildSwitch {
            // Compiles out every vector tier, leaving only the scalar loop
            env_var: "SIMDBITS_FORCE_FALLBACK",
            cfg_flag: "simdbits_fallback",
        }]
    }

    fn enabled(&self) -> bool {
        match env::var(self.env_var) {
            Ok(value) => !value.is_empty() && value != "0",
            Err(_) => false,
        }
    }
}

// Vector tier families that can be compiled for the target
struct TierFamily {
    cfg_flag: &'static str,
    arches: &'static [&'static str],
    little_endian_only: bool,
}

impl TierFamily {
    fn families() -> Vec<TierFamily> {
        vec![
            TierFamily {
                // AVX2 + SSE2
                cfg_flag: "simdbits_x86",
                arches: &["x86", "x86_64"],
                little_endian_only: false,
            },
            TierFamily {
                cfg_flag: "simdbits_neon",
                arches: &["aarch64"],
                little_endian_only: true,
            },
        ]
    }

    fn matches(&self, arch: &str, endian: &str) -> bool {
        self.arches.contains(&arch) && (!self.little_endian_only || endian == "little")
    }
}

fn main() {
    let mut fallback = false;

    for switch in BuildSwitch::switches() {
        println!("cargo:rerun-if-env-changed={}", switch.env_var);
        println!("cargo::rustc-check-cfg=cfg({})", switch.cfg_flag);

        if switch.enabled() {
            println!("cargo:rustc-cfg={}", switch.cfg_flag);
            fallback = true;
        }
    }

    // Cargo describes the target (not the host) to build scripts
    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let endian = env::var("CARGO_CFG_TARGET_ENDIAN").unwrap_or_default();

    for family in TierFamily::families() {
        println!("cargo::rustc-check-cfg=cfg({})", family.cfg_flag);

        if !fallback && family.matches(&arch, &endian) {
            println!("cargo:rustc-cfg={}", family.cfg_flag);
        }
    }
}
