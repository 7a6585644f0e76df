// SPDX-License-Identifier: LGPL-3.0-or-later

//! 128-bit NEON variants, four lanes.

use core::arch::aarch64::*;

use crate::simd::SimdVector;

#[derive(Clone, Copy)]
#[repr(transparent)]
pub(crate) struct NeonVec(float32x4_t);

#[allow(unused_unsafe)]
unsafe impl SimdVector for NeonVec {
    const LANES: usize = 4;

    #[inline(always)]
    unsafe fn load(src: *const f32) -> Self {
        Self(unsafe { vld1q_f32(src) })
    }

    #[inline(always)]
    unsafe fn store(self, dst: *mut f32) {
        unsafe { vst1q_f32(dst, self.0) }
    }

    #[inline(always)]
    fn splat(v: f32) -> Self {
        Self(unsafe { vdupq_n_f32(v) })
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { vaddq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(unsafe { vsubq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self(unsafe { vmulq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self(unsafe { vdivq_f32(self.0, rhs.0) })
    }

    // Unfused, so rounding matches the reference kernels.
    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        self.mul(b).add(c)
    }

    #[inline(always)]
    fn mul_sub(self, b: Self, c: Self) -> Self {
        self.mul(b).sub(c)
    }

    #[inline(always)]
    fn neg_mul_add(self, b: Self, c: Self) -> Self {
        c.sub(self.mul(b))
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        Self(unsafe { vrndq_f32(self.0) })
    }

    /// `fmaxnm` returns the numeric operand when the other is NaN.
    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self(unsafe { vmaxnmq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        Self(unsafe { vsqrtq_f32(self.0) })
    }

    #[inline(always)]
    fn reverse(self) -> Self {
        unsafe {
            let pairs = vrev64q_f32(self.0);
            Self(vextq_f32::<2>(pairs, pairs))
        }
    }
}

basic_entries!("aarch64+neon", NeonVec);
mod_entries!("aarch64+neon", NeonVec);
