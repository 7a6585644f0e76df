// SPDX-License-Identifier: LGPL-3.0-or-later

//! 256-bit AVX variants, eight lanes.
//!
//! `AvxVec<true>` additionally fuses the multiply-add family with FMA3.

use core::arch::x86_64::*;

use crate::simd::SimdVector;

#[derive(Clone, Copy)]
#[repr(transparent)]
pub(crate) struct AvxVec<const FMA: bool>(__m256);

#[allow(unused_unsafe)]
unsafe impl<const FMA: bool> SimdVector for AvxVec<FMA> {
    const LANES: usize = 8;

    #[inline(always)]
    unsafe fn load(src: *const f32) -> Self {
        Self(unsafe { _mm256_loadu_ps(src) })
    }

    #[inline(always)]
    unsafe fn store(self, dst: *mut f32) {
        unsafe { _mm256_storeu_ps(dst, self.0) }
    }

    #[inline(always)]
    fn splat(v: f32) -> Self {
        Self(unsafe { _mm256_set1_ps(v) })
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_add_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_sub_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_mul_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_div_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        if FMA {
            Self(unsafe { _mm256_fmadd_ps(self.0, b.0, c.0) })
        } else {
            self.mul(b).add(c)
        }
    }

    #[inline(always)]
    fn mul_sub(self, b: Self, c: Self) -> Self {
        if FMA {
            Self(unsafe { _mm256_fmsub_ps(self.0, b.0, c.0) })
        } else {
            self.mul(b).sub(c)
        }
    }

    #[inline(always)]
    fn neg_mul_add(self, b: Self, c: Self) -> Self {
        if FMA {
            Self(unsafe { _mm256_fnmadd_ps(self.0, b.0, c.0) })
        } else {
            c.sub(self.mul(b))
        }
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        Self(unsafe { _mm256_round_ps::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(self.0) })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_max_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        Self(unsafe { _mm256_sqrt_ps(self.0) })
    }

    #[inline(always)]
    fn reverse(self) -> Self {
        unsafe {
            // Swap the 128-bit halves, then reverse within each half.
            let swapped = _mm256_permute2f128_ps::<0x01>(self.0, self.0);
            Self(_mm256_permute_ps::<0x1b>(swapped))
        }
    }
}

basic_entries!("x86_64+avx", AvxVec<false>);
mod_entries!("x86_64+avx", AvxVec<false>);

pub(crate) mod fma {
    use super::AvxVec;

    fused_entries!("x86_64+avx+fma", AvxVec<true>);
}
