// SPDX-License-Identifier: LGPL-3.0-or-later
//
// Binding rules of the registry, checked against synthetic capability
// records. The per-arch tables are inspected with `new_unchecked` and never
// called, so any record can be bound on any machine.

use lsp_dsp_kernels::{
    catalogue, detect_capabilities, CpuInfo, DispatchConfig, Features, Primitive, Registry,
};

fn bound(registry: &Registry, primitive: Primitive) -> &'static str {
    registry.binding(primitive).name
}

#[test]
fn binding_is_deterministic() {
    let cpu = detect_capabilities();
    let a = Registry::new(&cpu).unwrap();
    let b = Registry::new(&cpu).unwrap();
    assert_eq!(a, b);
    assert_eq!(format!("{a:?}"), format!("{b:?}"));
}

#[test]
fn empty_record_selects_reference_everywhere() {
    let registry = Registry::new(&CpuInfo::generic()).unwrap();
    assert_eq!(registry, Registry::reference());
    for (primitive, info) in registry.bindings() {
        assert_eq!(info.name, "generic", "{primitive}");
        assert_eq!(info.rank, 0);
    }
}

#[test]
fn bound_variant_requirements_are_met() {
    let cpu = detect_capabilities();
    let registry = Registry::new(&cpu).unwrap();
    for (primitive, info) in registry.bindings() {
        assert!(
            cpu.features.contains(info.requires),
            "{primitive} bound to {info} on {cpu}"
        );
    }
}

#[test]
fn bound_variant_has_maximal_rank() {
    let cpu = detect_capabilities();
    let registry = Registry::new(&cpu).unwrap();
    for (primitive, info) in registry.bindings() {
        let best = catalogue()
            .variants(primitive)
            .into_iter()
            .filter(|v| cpu.features.contains(v.requires))
            .map(|v| v.rank)
            .max();
        assert_eq!(Some(info.rank), best, "{primitive}");
    }
}

#[test]
fn every_primitive_is_listed() {
    assert_eq!(Primitive::ALL.len(), 31);
    for &p in Primitive::ALL {
        assert!(!catalogue().variants(p).is_empty(), "{p}");
    }
}

#[test]
fn variant_names_are_unique_per_primitive() {
    for &p in Primitive::ALL {
        let mut names: Vec<_> = catalogue().variants(p).iter().map(|v| v.name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total, "{p}");
    }
}

#[test]
fn forced_superset_binds_only_runnable_variants() {
    let host = detect_capabilities().isa();
    let registry = Registry::new(&CpuInfo::with_features(!Features::NONE)).unwrap();
    for (primitive, info) in registry.bindings() {
        assert!(host.contains(info.requires.isa()), "{primitive} bound to {info}");
    }

    // Every bound entry is safe to call on this machine.
    let mut dst = [1.0f32, 2.0, 3.0, 4.0, 5.0];
    registry.fmadd_k3(&mut dst, &[1.0; 5], 2.0);
    assert_eq!(dst, [3.0, 4.0, 5.0, 6.0, 7.0]);
    registry.fmmod_k3(&mut dst, &[1.0; 5], 2.0);
    assert_eq!(dst, [1.0, 0.0, 1.0, 0.0, 1.0]);
}

#[test]
fn forced_config_masks_live_detection() {
    let config = DispatchConfig {
        force_generic: true,
        ..DispatchConfig::default()
    };
    let registry = Registry::new(&config.resolve()).unwrap();
    assert_eq!(registry, Registry::reference());
}

#[cfg(target_arch = "x86_64")]
mod x86 {
    use super::*;

    const SSE: Features = Features::SSE.union(Features::SSE2);
    const SSE41: Features = SSE.union(Features::SSE4_1);
    const AVX: Features = SSE41.union(Features::AVX);
    const AVX_FMA: Features = AVX.union(Features::FMA3);
    const HINTS: Features = Features::FAST_AVX.union(Features::FAST_FMA3);

    fn registry(features: Features) -> Registry {
        // SAFETY: bindings are only inspected, no primitive is called.
        unsafe { Registry::new_unchecked(&CpuInfo::with_features(features)) }.unwrap()
    }

    #[test]
    fn sse_only() {
        let r = registry(SSE);
        assert_eq!(bound(&r, Primitive::Reverse1), "sse");
        assert_eq!(bound(&r, Primitive::FmaddK3), "sse");
        assert_eq!(bound(&r, Primitive::FmmodK4), "generic");
        assert_eq!(bound(&r, Primitive::BitmapPutB1b8), "sse2");
    }

    #[test]
    fn sse41_enables_vector_mod() {
        let r = registry(SSE41);
        assert_eq!(bound(&r, Primitive::FmmodK3), "sse4.1");
        assert_eq!(bound(&r, Primitive::FmrmodK4), "sse4.1");
        assert_eq!(bound(&r, Primitive::FmaddK3), "sse");
    }

    #[test]
    fn avx_without_vendor_hint_stays_on_sse() {
        let r = registry(AVX_FMA);
        assert_eq!(bound(&r, Primitive::LrToMs), "sse");
        assert_eq!(bound(&r, Primitive::FmaddK4), "sse");
        assert_eq!(bound(&r, Primitive::FmmodK3), "sse4.1");
    }

    #[test]
    fn fast_avx_and_fma3() {
        let r = registry(AVX_FMA | HINTS);
        assert_eq!(bound(&r, Primitive::Reverse2), "avx");
        assert_eq!(bound(&r, Primitive::FmmulK3), "avx");
        assert_eq!(bound(&r, Primitive::Ssqrt1), "avx");
        assert_eq!(bound(&r, Primitive::FmaddK3), "avx+fma3");
        assert_eq!(bound(&r, Primitive::FmrsubK4), "avx+fma3");
        assert_eq!(bound(&r, Primitive::FmmodK3), "avx");
        assert_eq!(bound(&r, Primitive::FmrmodK4), "avx");
        assert_eq!(bound(&r, Primitive::BitmapMinB1b8), "sse2");
    }

    #[test]
    fn fma3_hint_without_isa_is_ignored() {
        let r = registry(AVX | HINTS);
        assert_eq!(bound(&r, Primitive::FmaddK3), "avx");
    }

    #[test]
    #[cfg(not(feature = "force-generic"))]
    fn disabled_feature_removes_variants() {
        let config = DispatchConfig {
            disabled: Features::AVX,
            ..DispatchConfig::forced(CpuInfo::with_features(AVX_FMA | HINTS))
        };
        // SAFETY: bindings are only inspected, no primitive is called.
        let r = unsafe { Registry::new_unchecked(&config.resolve()) }.unwrap();
        assert_eq!(bound(&r, Primitive::FmaddK3), "sse");
        assert_eq!(bound(&r, Primitive::FmmodK3), "sse4.1");
    }
}

#[cfg(target_arch = "aarch64")]
mod aarch64 {
    use super::*;

    #[test]
    fn neon_binds_float_primitives() {
        // SAFETY: bindings are only inspected, no primitive is called.
        let r = unsafe { Registry::new_unchecked(&CpuInfo::with_features(Features::NEON)) }
            .unwrap();
        assert_eq!(bound(&r, Primitive::Reverse1), "neon");
        assert_eq!(bound(&r, Primitive::FmmodK4), "neon");
        assert_eq!(bound(&r, Primitive::BitmapPutB1b8), "generic");
    }
}
