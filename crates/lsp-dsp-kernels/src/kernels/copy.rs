// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::simd::SimdVector;

/// Swap whole vectors from both ends inward, then finish the middle with
/// scalar swaps. Both ends are loaded before either is stored.
#[inline(always)]
pub(crate) unsafe fn reverse1<V: SimdVector>(dst: &mut [f32]) {
    let (mut lo, mut hi) = (0, dst.len());
    let p = dst.as_mut_ptr();
    while hi - lo >= 2 * V::LANES {
        unsafe {
            let head = V::load(p.add(lo));
            let tail = V::load(p.add(hi - V::LANES));
            tail.reverse().store(p.add(lo));
            head.reverse().store(p.add(hi - V::LANES));
        }
        lo += V::LANES;
        hi -= V::LANES;
    }
    dst[lo..hi].reverse();
}

#[inline(always)]
pub(crate) unsafe fn reverse2<V: SimdVector>(dst: &mut [f32], src: &[f32]) {
    assert!(dst.len() >= src.len(), "dst too small");
    let n = src.len();
    let mut i = 0;
    while i + V::LANES <= n {
        unsafe {
            let v = V::load(src.as_ptr().add(n - i - V::LANES));
            v.reverse().store(dst.as_mut_ptr().add(i));
        }
        i += V::LANES;
    }
    for (d, &s) in dst[i..n].iter_mut().zip(src[..n - i].iter().rev()) {
        *d = s;
    }
}
