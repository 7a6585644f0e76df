// SPDX-License-Identifier: LGPL-3.0-or-later

//! Mid/Side matrixing. Every channel uses the same expression in the fused
//! and the single-output forms.

use crate::simd::{zip, zip2, SimdVector};

#[inline(always)]
fn mid<V: SimdVector>(l: V, r: V) -> V {
    l.add(r).mul(V::splat(0.5))
}

#[inline(always)]
fn side<V: SimdVector>(l: V, r: V) -> V {
    l.sub(r).mul(V::splat(0.5))
}

#[inline(always)]
pub(crate) unsafe fn lr_to_ms<V: SimdVector>(m: &mut [f32], s: &mut [f32], l: &[f32], r: &[f32]) {
    unsafe { zip2::<V>(m, s, l, r, |l, r| (mid(l, r), side(l, r))) }
}

#[inline(always)]
pub(crate) unsafe fn lr_to_mid<V: SimdVector>(m: &mut [f32], l: &[f32], r: &[f32]) {
    unsafe { zip::<V>(m, l, r, mid) }
}

#[inline(always)]
pub(crate) unsafe fn lr_to_side<V: SimdVector>(s: &mut [f32], l: &[f32], r: &[f32]) {
    unsafe { zip::<V>(s, l, r, side) }
}

#[inline(always)]
pub(crate) unsafe fn ms_to_lr<V: SimdVector>(l: &mut [f32], r: &mut [f32], m: &[f32], s: &[f32]) {
    unsafe { zip2::<V>(l, r, m, s, |m, s| (m.add(s), m.sub(s))) }
}

#[inline(always)]
pub(crate) unsafe fn ms_to_left<V: SimdVector>(l: &mut [f32], m: &[f32], s: &[f32]) {
    unsafe { zip::<V>(l, m, s, |m, s| m.add(s)) }
}

#[inline(always)]
pub(crate) unsafe fn ms_to_right<V: SimdVector>(r: &mut [f32], m: &[f32], s: &[f32]) {
    unsafe { zip::<V>(r, m, s, |m, s| m.sub(s)) }
}
