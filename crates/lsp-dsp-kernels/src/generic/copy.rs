// SPDX-License-Identifier: LGPL-3.0-or-later
// Ported from lsp-plugins/lsp-dsp-lib (C++) — generic/copy.h

//! Buffer reversal.

/// Reverse `dst` in place.
pub fn reverse1(dst: &mut [f32]) {
    let n = dst.len();
    for i in 0..n / 2 {
        dst.swap(i, n - 1 - i);
    }
}

/// Copy `src` into `dst` in reverse order.
///
/// # Panics
/// Panics if `dst.len() < src.len()`.
pub fn reverse2(dst: &mut [f32], src: &[f32]) {
    assert!(dst.len() >= src.len(), "dst too small");
    for (d, &s) in dst.iter_mut().zip(src.iter().rev()) {
        *d = s;
    }
}
