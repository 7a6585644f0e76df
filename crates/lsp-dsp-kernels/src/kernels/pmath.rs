// SPDX-License-Identifier: LGPL-3.0-or-later

//! Scaled fused operations and safe square root.

use crate::simd::{map, map_inplace, zip, zip_inplace, SimdVector};

/// Per-lane operators `(a, b, k)`, with `b` still unscaled so that targets
/// with FMA can fold the scaling into the operation.
pub(crate) mod op {
    use crate::simd::SimdVector;

    #[inline(always)]
    pub(crate) fn add<V: SimdVector>(a: V, b: V, k: V) -> V {
        b.mul_add(k, a)
    }

    #[inline(always)]
    pub(crate) fn sub<V: SimdVector>(a: V, b: V, k: V) -> V {
        b.neg_mul_add(k, a)
    }

    #[inline(always)]
    pub(crate) fn rsub<V: SimdVector>(a: V, b: V, k: V) -> V {
        b.mul_sub(k, a)
    }

    #[inline(always)]
    pub(crate) fn mul<V: SimdVector>(a: V, b: V, k: V) -> V {
        a.mul(b.mul(k))
    }

    #[inline(always)]
    pub(crate) fn div<V: SimdVector>(a: V, b: V, k: V) -> V {
        a.div(b.mul(k))
    }

    #[inline(always)]
    pub(crate) fn rdiv<V: SimdVector>(a: V, b: V, k: V) -> V {
        b.mul(k).div(a)
    }

    /// Never fused: `b * q` must round before the subtraction, otherwise a
    /// large quotient leaves the remainder of a different product.
    #[inline(always)]
    pub(crate) fn fmod<V: SimdVector>(a: V, b: V, k: V) -> V {
        let b = b.mul(k);
        a.sub(b.mul(a.div(b).trunc()))
    }

    /// See [`fmod`].
    #[inline(always)]
    pub(crate) fn rfmod<V: SimdVector>(a: V, b: V, k: V) -> V {
        let b = b.mul(k);
        b.sub(a.mul(b.div(a).trunc()))
    }
}

/// `dst[i] = op(dst[i], src[i], k)`
#[inline(always)]
pub(crate) unsafe fn fmop_k3<V: SimdVector>(
    dst: &mut [f32],
    src: &[f32],
    k: f32,
    op: impl Fn(V, V, V) -> V,
) {
    let k = V::splat(k);
    unsafe { zip_inplace::<V>(dst, src, |a, b| op(a, b, k)) }
}

/// `dst[i] = op(src1[i], src2[i], k)`
#[inline(always)]
pub(crate) unsafe fn fmop_k4<V: SimdVector>(
    dst: &mut [f32],
    src1: &[f32],
    src2: &[f32],
    k: f32,
    op: impl Fn(V, V, V) -> V,
) {
    let k = V::splat(k);
    unsafe { zip::<V>(dst, src1, src2, |a, b| op(a, b, k)) }
}

#[inline(always)]
fn ssqrt<V: SimdVector>(x: V) -> V {
    x.max(V::splat(0.0)).sqrt()
}

#[inline(always)]
pub(crate) unsafe fn ssqrt1<V: SimdVector>(dst: &mut [f32]) {
    unsafe { map_inplace::<V>(dst, ssqrt) }
}

#[inline(always)]
pub(crate) unsafe fn ssqrt2<V: SimdVector>(dst: &mut [f32], src: &[f32]) {
    unsafe { map::<V>(dst, src, ssqrt) }
}
