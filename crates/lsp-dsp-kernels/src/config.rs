// SPDX-License-Identifier: LGPL-3.0-or-later

//! Dispatch configuration.
//!
//! Lets the host (or a test) force a capability record, mask off individual
//! extensions, or pin every primitive to its reference kernel.
//!
//! Environment variables read by [`DispatchConfig::from_env`]:
//! - `LSP_DSP_DISABLE`: comma-separated feature names, e.g. `avx,fma3`
//! - `LSP_DSP_FORCE_GENERIC`: `1` or `true` to bind reference kernels only

use crate::detect::detect_capabilities;
use crate::features::{CpuInfo, Features};

/// Environment variable listing features to disable.
pub const ENV_DISABLE: &str = "LSP_DSP_DISABLE";
/// Environment variable forcing the reference kernels.
pub const ENV_FORCE_GENERIC: &str = "LSP_DSP_FORCE_GENERIC";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Features removed from the record before binding.
    pub disabled: Features,
    /// Bind every primitive to its reference kernel.
    pub force_generic: bool,
    /// Use this record instead of live detection.
    pub cpu: Option<CpuInfo>,
}

impl DispatchConfig {
    /// Configuration from the process environment.
    ///
    /// Unknown feature names are logged and skipped.
    pub fn from_env() -> Self {
        let disabled = std::env::var(ENV_DISABLE)
            .map(|list| parse_lenient(&list))
            .unwrap_or_default();
        let force_generic = std::env::var(ENV_FORCE_GENERIC)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            disabled,
            force_generic,
            cpu: None,
        }
    }

    /// Configuration that binds the given record unchanged.
    pub fn forced(cpu: CpuInfo) -> Self {
        Self {
            cpu: Some(cpu),
            ..Self::default()
        }
    }

    /// Resolve the record to bind: forced or detected, then masked.
    pub fn resolve(&self) -> CpuInfo {
        let cpu = match &self.cpu {
            Some(cpu) => cpu.clone(),
            None => detect_capabilities(),
        };
        self.apply(cpu)
    }

    /// Mask `cpu` according to this configuration.
    pub fn apply(&self, mut cpu: CpuInfo) -> CpuInfo {
        if self.force_generic || cfg!(feature = "force-generic") {
            cpu.features = Features::NONE;
            return cpu;
        }

        let masked = cpu.features & self.disabled;
        if !masked.is_empty() {
            log::warn!("disabling supported CPU features: {masked}");
        }
        cpu.features = cpu.features - self.disabled;
        cpu
    }
}

fn parse_lenient(list: &str) -> Features {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .fold(Features::NONE, |acc, name| match Features::from_name(name) {
            Some(f) => acc | f,
            None => {
                log::warn!("{ENV_DISABLE}: ignoring unknown feature `{name}`");
                acc
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_masks_features() {
        let cpu = CpuInfo::with_features(Features::SSE | Features::AVX | Features::FMA3);
        let cfg = DispatchConfig {
            disabled: Features::FMA3,
            ..DispatchConfig::default()
        };
        let out = cfg.apply(cpu);
        if cfg!(feature = "force-generic") {
            assert_eq!(out.features, Features::NONE);
        } else {
            assert_eq!(out.features, Features::SSE | Features::AVX);
        }
    }

    #[test]
    fn test_force_generic_clears_everything() {
        let cpu = CpuInfo::with_features(Features::NEON);
        let cfg = DispatchConfig {
            force_generic: true,
            ..DispatchConfig::default()
        };
        assert_eq!(cfg.apply(cpu).features, Features::NONE);
    }

    #[test]
    fn test_forced_record_is_resolved_verbatim() {
        let cpu = CpuInfo::with_features(Features::SSE | Features::SSE2);
        let resolved = DispatchConfig::forced(cpu.clone()).resolve();
        if !cfg!(feature = "force-generic") {
            assert_eq!(resolved, cpu);
        }
    }

    #[test]
    fn test_parse_lenient_skips_unknown() {
        assert_eq!(parse_lenient("avx, bogus ,fma3"), Features::AVX | Features::FMA3);
        assert_eq!(parse_lenient(""), Features::NONE);
    }
}
