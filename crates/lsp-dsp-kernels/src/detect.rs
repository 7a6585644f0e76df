// SPDX-License-Identifier: LGPL-3.0-or-later
// Ported from lsp-plugins/lsp-dsp-lib (C++) — x86/features.h

//! Feature detection.
//!
//! Queries the running CPU once and produces a [`CpuInfo`]. Extensions that
//! cannot be queried are reported absent; detection never fails.

use crate::features::{CpuInfo, Features};
#[cfg(target_arch = "x86_64")]
use crate::features::Vendor;

/// Detect the capabilities of the running CPU.
///
/// Pure with respect to program state: repeated calls return equal records.
pub fn detect_capabilities() -> CpuInfo {
    #[cfg(target_arch = "x86_64")]
    {
        x86::detect()
    }

    #[cfg(target_arch = "aarch64")]
    {
        aarch64::detect()
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        CpuInfo::generic()
    }
}

#[cfg(target_arch = "x86_64")]
mod x86 {
    use super::*;
    use core::arch::x86_64::{__cpuid, CpuidResult};

    fn cpuid(leaf: u32) -> CpuidResult {
        // SAFETY: CPUID is available on every x86_64 processor.
        #[allow(unused_unsafe)]
        unsafe {
            __cpuid(leaf)
        }
    }

    fn vendor_id(r: &CpuidResult) -> String {
        let mut id = Vec::with_capacity(12);
        for reg in [r.ebx, r.edx, r.ecx] {
            id.extend_from_slice(&reg.to_le_bytes());
        }
        String::from_utf8_lossy(&id).into_owned()
    }

    /// Decode (family, model) from the leaf 1 signature in `eax`.
    pub(super) fn family_model(eax: u32) -> (u32, u32) {
        let base_family = (eax >> 8) & 0x0f;
        let base_model = (eax >> 4) & 0x0f;
        let ext_family = (eax >> 20) & 0xff;
        let ext_model = (eax >> 16) & 0x0f;

        let family = if base_family == 0x0f {
            base_family + ext_family
        } else {
            base_family
        };
        let model = if base_family == 0x06 || base_family == 0x0f {
            (ext_model << 4) | base_model
        } else {
            base_model
        };
        (family, model)
    }

    fn brand() -> String {
        let max_ext = cpuid(0x8000_0000).eax;
        if max_ext < 0x8000_0004 {
            return String::new();
        }
        let mut bytes = Vec::with_capacity(48);
        for leaf in 0x8000_0002..=0x8000_0004u32 {
            let r = cpuid(leaf);
            for reg in [r.eax, r.ebx, r.ecx, r.edx] {
                bytes.extend_from_slice(&reg.to_le_bytes());
            }
        }
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        String::from_utf8_lossy(&bytes[..end]).trim().to_string()
    }

    fn isa() -> Features {
        let mut f = Features::NONE;
        let mut set = |present: bool, feature: Features| {
            if present {
                f |= feature;
            }
        };
        set(is_x86_feature_detected!("sse"), Features::SSE);
        set(is_x86_feature_detected!("sse2"), Features::SSE2);
        set(is_x86_feature_detected!("sse3"), Features::SSE3);
        set(is_x86_feature_detected!("ssse3"), Features::SSSE3);
        set(is_x86_feature_detected!("sse4.1"), Features::SSE4_1);
        set(is_x86_feature_detected!("sse4.2"), Features::SSE4_2);
        set(is_x86_feature_detected!("fma"), Features::FMA3);
        set(is_x86_feature_detected!("avx"), Features::AVX);
        set(is_x86_feature_detected!("avx2"), Features::AVX2);
        set(is_x86_feature_detected!("avx512f"), Features::AVX512F);
        set(is_x86_feature_detected!("avx512dq"), Features::AVX512DQ);
        set(is_x86_feature_detected!("avx512bw"), Features::AVX512BW);
        set(is_x86_feature_detected!("avx512vl"), Features::AVX512VL);
        f
    }

    pub(super) fn detect() -> CpuInfo {
        let leaf0 = cpuid(0);
        let vendor = Vendor::from_id(&vendor_id(&leaf0));
        let (family, model) = if leaf0.eax >= 1 {
            family_model(cpuid(1).eax)
        } else {
            (0, 0)
        };

        CpuInfo {
            vendor,
            family,
            model,
            features: isa() | CpuInfo::vendor_hints(vendor, family),
            brand: brand(),
        }
    }
}

#[cfg(target_arch = "aarch64")]
mod aarch64 {
    use super::*;
    use std::arch::is_aarch64_feature_detected;

    pub(super) fn detect() -> CpuInfo {
        let mut features = Features::NONE;
        if is_aarch64_feature_detected!("neon") {
            features |= Features::NEON;
        }
        CpuInfo::with_features(features)
    }
}
