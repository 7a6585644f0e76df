// SPDX-License-Identifier: LGPL-3.0-or-later
//
// Algebraic properties of the bound kernels on arbitrary inputs.

use lsp_dsp_kernels::{detect_capabilities, generic, Registry};
use proptest::prelude::*;

fn bound() -> Registry {
    Registry::new(&detect_capabilities()).unwrap()
}

fn samples(max_len: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-10.0f32..10.0, 0..max_len)
}

fn stereo(max_len: usize) -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
    (0..max_len).prop_flat_map(|n| {
        (
            prop::collection::vec(-10.0f32..10.0, n),
            prop::collection::vec(-10.0f32..10.0, n),
        )
    })
}

proptest! {
    #[test]
    fn reverse1_is_an_involution(src in samples(300)) {
        let r = bound();
        let mut buf = src.clone();
        r.reverse1(&mut buf);
        r.reverse1(&mut buf);
        prop_assert_eq!(buf, src);
    }

    #[test]
    fn reverse2_matches_iterator(src in samples(300)) {
        let r = bound();
        let mut dst = vec![0.0; src.len()];
        r.reverse2(&mut dst, &src);
        let expected: Vec<f32> = src.iter().rev().copied().collect();
        prop_assert_eq!(dst, expected);
    }

    #[test]
    fn fused_ms_matches_single_channel((l, r) in stereo(200)) {
        let reg = bound();
        let n = l.len();
        let (mut m, mut s) = (vec![0.0; n], vec![0.0; n]);
        reg.lr_to_ms(&mut m, &mut s, &l, &r);

        let (mut m1, mut s1) = (vec![0.0; n], vec![0.0; n]);
        reg.lr_to_mid(&mut m1, &l, &r);
        reg.lr_to_side(&mut s1, &l, &r);
        prop_assert_eq!(&m, &m1);
        prop_assert_eq!(&s, &s1);

        let (mut left, mut right) = (vec![0.0; n], vec![0.0; n]);
        reg.ms_to_lr(&mut left, &mut right, &m, &s);
        let (mut l1, mut r1) = (vec![0.0; n], vec![0.0; n]);
        reg.ms_to_left(&mut l1, &m, &s);
        reg.ms_to_right(&mut r1, &m, &s);
        prop_assert_eq!(left, l1);
        prop_assert_eq!(right, r1);
    }

    #[test]
    fn ms_round_trip((l, r) in stereo(200)) {
        let reg = bound();
        let n = l.len();
        let (mut m, mut s) = (vec![0.0; n], vec![0.0; n]);
        let (mut l2, mut r2) = (vec![0.0; n], vec![0.0; n]);
        reg.lr_to_ms(&mut m, &mut s, &l, &r);
        reg.ms_to_lr(&mut l2, &mut r2, &m, &s);

        for i in 0..n {
            let scale = l[i].abs().max(r[i].abs()).max(1.0);
            let eps = 4.0 * f32::EPSILON * scale;
            prop_assert!((l2[i] - l[i]).abs() <= eps, "left[{}]: {} vs {}", i, l2[i], l[i]);
            prop_assert!((r2[i] - r[i]).abs() <= eps, "right[{}]: {} vs {}", i, r2[i], r[i]);
        }
    }

    #[test]
    fn ssqrt_is_never_nan(src in prop::collection::vec(any::<f32>(), 0..100)) {
        let r = bound();
        let mut dst = vec![0.0; src.len()];
        r.ssqrt2(&mut dst, &src);
        for (d, s) in dst.iter().zip(&src) {
            prop_assert!(!d.is_nan(), "ssqrt({}) = {}", s, d);
            prop_assert!(*d >= 0.0);
        }
    }

    #[test]
    fn fmadd_with_zero_factor_is_identity((dst, src) in stereo(200)) {
        let r = bound();
        let mut out = dst.clone();
        r.fmadd_k3(&mut out, &src, 0.0);
        prop_assert_eq!(out, dst);
    }

    #[test]
    fn fmmod_matches_reference((a, b) in stereo(200), k in 0.1f32..4.0) {
        let r = bound();
        let b: Vec<f32> = b.iter().map(|v| if v.abs() < 0.01 { 1.0 } else { *v }).collect();
        let mut expected = vec![0.0; a.len()];
        let mut actual = vec![0.0; a.len()];
        generic::fmmod_k4(&mut expected, &a, &b, k);
        r.fmmod_k4(&mut actual, &a, &b, k);
        for (e, v) in expected.iter().zip(&actual) {
            prop_assert!((e - v).abs() <= 1e-4 * e.abs().max(1.0), "{} vs {}", e, v);
        }
    }
}
