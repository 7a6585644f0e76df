// SPDX-License-Identifier: LGPL-3.0-or-later

//! Portable fixed-width vector abstraction for the accelerated kernels.
//!
//! Kernel bodies in [`crate::kernels`] are written once against
//! [`SimdVector`] and instantiated per target in [`crate::arch`]. The loop
//! helpers here own the chunking: full vectors first, then one padded vector
//! for the tail, so the tail goes through exactly the same arithmetic as the
//! body and is processed exactly once.

/// Upper bound on `SimdVector::LANES` across all targets.
pub(crate) const MAX_LANES: usize = 8;

/// A fixed-width vector of `f32` lanes.
///
/// # Safety
///
/// Implementations wrap target-specific intrinsics. No method may run on a CPU
/// lacking the implementation's instruction set; the registry only binds a
/// variant after its requirements have been checked against the running CPU.
/// Loads and stores are unaligned.
pub(crate) unsafe trait SimdVector: Copy {
    const LANES: usize;

    /// Load `LANES` values starting at `src`.
    unsafe fn load(src: *const f32) -> Self;

    /// Store `LANES` values starting at `dst`.
    unsafe fn store(self, dst: *mut f32);

    fn splat(v: f32) -> Self;

    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
    fn div(self, rhs: Self) -> Self;

    /// `self * b + c`, fused on targets with FMA.
    fn mul_add(self, b: Self, c: Self) -> Self;

    /// `self * b - c`, fused on targets with FMA.
    fn mul_sub(self, b: Self, c: Self) -> Self;

    /// `c - self * b`, fused on targets with FMA.
    fn neg_mul_add(self, b: Self, c: Self) -> Self;

    /// Round toward zero. Infinities and NaN pass through.
    fn trunc(self) -> Self;

    /// Lane-wise maximum; a NaN lane in `self` yields `rhs`.
    fn max(self, rhs: Self) -> Self;

    fn sqrt(self) -> Self;

    /// Reverse the lane order.
    fn reverse(self) -> Self;
}

/// Load a partial vector of `src.len() < MAX_LANES` values, zero-padded.
#[inline(always)]
unsafe fn load_tail<V: SimdVector>(src: &[f32]) -> V {
    let mut buf = [0.0f32; MAX_LANES];
    buf[..src.len()].copy_from_slice(src);
    unsafe { V::load(buf.as_ptr()) }
}

/// Store the first `dst.len()` lanes of `v`.
#[inline(always)]
unsafe fn store_tail<V: SimdVector>(v: V, dst: &mut [f32]) {
    let mut buf = [0.0f32; MAX_LANES];
    unsafe { v.store(buf.as_mut_ptr()) };
    let n = dst.len();
    dst.copy_from_slice(&buf[..n]);
}

/// `dst[i] = f(dst[i])`
#[inline(always)]
pub(crate) unsafe fn map_inplace<V: SimdVector>(dst: &mut [f32], f: impl Fn(V) -> V) {
    let n = dst.len();
    let mut i = 0;
    while i + V::LANES <= n {
        unsafe {
            let p = dst.as_mut_ptr().add(i);
            f(V::load(p)).store(p);
        }
        i += V::LANES;
    }
    if i < n {
        unsafe {
            let v = f(load_tail::<V>(&dst[i..n]));
            store_tail(v, &mut dst[i..n]);
        }
    }
}

/// `dst[i] = f(src[i])`
#[inline(always)]
pub(crate) unsafe fn map<V: SimdVector>(dst: &mut [f32], src: &[f32], f: impl Fn(V) -> V) {
    let n = dst.len().min(src.len());
    let mut i = 0;
    while i + V::LANES <= n {
        unsafe {
            let v = f(V::load(src.as_ptr().add(i)));
            v.store(dst.as_mut_ptr().add(i));
        }
        i += V::LANES;
    }
    if i < n {
        unsafe {
            let v = f(load_tail::<V>(&src[i..n]));
            store_tail(v, &mut dst[i..n]);
        }
    }
}

/// `dst[i] = f(dst[i], src[i])`
#[inline(always)]
pub(crate) unsafe fn zip_inplace<V: SimdVector>(
    dst: &mut [f32],
    src: &[f32],
    f: impl Fn(V, V) -> V,
) {
    let n = dst.len().min(src.len());
    let mut i = 0;
    while i + V::LANES <= n {
        unsafe {
            let p = dst.as_mut_ptr().add(i);
            f(V::load(p), V::load(src.as_ptr().add(i))).store(p);
        }
        i += V::LANES;
    }
    if i < n {
        unsafe {
            let v = f(load_tail::<V>(&dst[i..n]), load_tail::<V>(&src[i..n]));
            store_tail(v, &mut dst[i..n]);
        }
    }
}

/// `dst[i] = f(a[i], b[i])`
#[inline(always)]
pub(crate) unsafe fn zip<V: SimdVector>(
    dst: &mut [f32],
    a: &[f32],
    b: &[f32],
    f: impl Fn(V, V) -> V,
) {
    let n = dst.len().min(a.len()).min(b.len());
    let mut i = 0;
    while i + V::LANES <= n {
        unsafe {
            let v = f(V::load(a.as_ptr().add(i)), V::load(b.as_ptr().add(i)));
            v.store(dst.as_mut_ptr().add(i));
        }
        i += V::LANES;
    }
    if i < n {
        unsafe {
            let v = f(load_tail::<V>(&a[i..n]), load_tail::<V>(&b[i..n]));
            store_tail(v, &mut dst[i..n]);
        }
    }
}

/// `(d1[i], d2[i]) = f(a[i], b[i])`
#[inline(always)]
pub(crate) unsafe fn zip2<V: SimdVector>(
    d1: &mut [f32],
    d2: &mut [f32],
    a: &[f32],
    b: &[f32],
    f: impl Fn(V, V) -> (V, V),
) {
    let n = d1.len().min(d2.len()).min(a.len()).min(b.len());
    let mut i = 0;
    while i + V::LANES <= n {
        unsafe {
            let (x, y) = f(V::load(a.as_ptr().add(i)), V::load(b.as_ptr().add(i)));
            x.store(d1.as_mut_ptr().add(i));
            y.store(d2.as_mut_ptr().add(i));
        }
        i += V::LANES;
    }
    if i < n {
        unsafe {
            let (x, y) = f(load_tail::<V>(&a[i..n]), load_tail::<V>(&b[i..n]));
            store_tail(x, &mut d1[i..n]);
            store_tail(y, &mut d2[i..n]);
        }
    }
}
