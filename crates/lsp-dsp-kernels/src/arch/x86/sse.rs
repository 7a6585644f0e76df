// SPDX-License-Identifier: LGPL-3.0-or-later

//! 128-bit SSE variants, four lanes.

use core::arch::x86_64::*;

use crate::simd::SimdVector;

#[derive(Clone, Copy)]
#[repr(transparent)]
pub(crate) struct SseVec(__m128);

#[allow(unused_unsafe)]
unsafe impl SimdVector for SseVec {
    const LANES: usize = 4;

    #[inline(always)]
    unsafe fn load(src: *const f32) -> Self {
        Self(unsafe { _mm_loadu_ps(src) })
    }

    #[inline(always)]
    unsafe fn store(self, dst: *mut f32) {
        unsafe { _mm_storeu_ps(dst, self.0) }
    }

    #[inline(always)]
    fn splat(v: f32) -> Self {
        Self(unsafe { _mm_set1_ps(v) })
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { _mm_add_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(unsafe { _mm_sub_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self(unsafe { _mm_mul_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self(unsafe { _mm_div_ps(self.0, rhs.0) })
    }

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

    /// Needs SSE4.1.
    #[inline(always)]
    fn trunc(self) -> Self {
        Self(unsafe { _mm_round_ps::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(self.0) })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self(unsafe { _mm_max_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        Self(unsafe { _mm_sqrt_ps(self.0) })
    }

    #[inline(always)]
    fn reverse(self) -> Self {
        Self(unsafe { _mm_shuffle_ps::<0x1b>(self.0, self.0) })
    }
}

basic_entries!("x86_64+sse+sse2", SseVec);

/// Remainders need `roundps`, so they live apart from the SSE2 set.
pub(crate) mod sse41 {
    use super::SseVec;

    mod_entries!("x86_64+sse+sse2+sse4.1", SseVec);
}
