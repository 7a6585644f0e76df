// SPDX-License-Identifier: LGPL-3.0-or-later
// Ported from lsp-plugins/lsp-dsp-lib (C++) — generic/msmatrix.h

//! Mid/Side matrix encoding and decoding.
//!
//! - Mid  = (L + R) * 0.5
//! - Side = (L - R) * 0.5
//! - Left  = M + S
//! - Right = M - S
//!
//! The two-output forms compute each channel with exactly the expression of
//! the matching single-output form, so both paths agree bit for bit.

#[inline(always)]
fn mid(l: f32, r: f32) -> f32 {
    (l + r) * 0.5
}

#[inline(always)]
fn side(l: f32, r: f32) -> f32 {
    (l - r) * 0.5
}

/// Convert Left/Right to Mid/Side.
pub fn lr_to_ms(m: &mut [f32], s: &mut [f32], l: &[f32], r: &[f32]) {
    for (((m, s), &l), &r) in m.iter_mut().zip(s.iter_mut()).zip(l).zip(r) {
        *m = mid(l, r);
        *s = side(l, r);
    }
}

/// `m[i] = (l[i] + r[i]) * 0.5`
pub fn lr_to_mid(m: &mut [f32], l: &[f32], r: &[f32]) {
    for ((m, &l), &r) in m.iter_mut().zip(l).zip(r) {
        *m = mid(l, r);
    }
}

/// `s[i] = (l[i] - r[i]) * 0.5`
pub fn lr_to_side(s: &mut [f32], l: &[f32], r: &[f32]) {
    for ((s, &l), &r) in s.iter_mut().zip(l).zip(r) {
        *s = side(l, r);
    }
}

/// Convert Mid/Side to Left/Right.
pub fn ms_to_lr(l: &mut [f32], r: &mut [f32], m: &[f32], s: &[f32]) {
    for (((l, r), &m), &s) in l.iter_mut().zip(r.iter_mut()).zip(m).zip(s) {
        *l = m + s;
        *r = m - s;
    }
}

/// `l[i] = m[i] + s[i]`
pub fn ms_to_left(l: &mut [f32], m: &[f32], s: &[f32]) {
    for ((l, &m), &s) in l.iter_mut().zip(m).zip(s) {
        *l = m + s;
    }
}

/// `r[i] = m[i] - s[i]`
pub fn ms_to_right(r: &mut [f32], m: &[f32], s: &[f32]) {
    for ((r, &m), &s) in r.iter_mut().zip(m).zip(s) {
        *r = m - s;
    }
}
