// SPDX-License-Identifier: LGPL-3.0-or-later
// Ported from lsp-plugins/lsp-dsp-lib (C++) — x86/sse, x86/avx, x86/sse2 dispatch tables

//! x86_64 variants.
//!
//! | Variant    | Rank | Requires              |
//! |------------|------|-----------------------|
//! | `sse`      | 10   | SSE, SSE2             |
//! | `sse4.1`   | 10   | SSE, SSE2, SSE4.1     |
//! | `sse2`     | 10   | SSE2 (bitmaps)        |
//! | `avx`      | 20   | AVX, fast AVX         |
//! | `avx+fma3` | 30   | AVX, FMA3, fast FMA3  |

mod avx;
mod bitmap;
mod sse;

use crate::features::Features;
use crate::registry::Catalogue;

pub(crate) fn register(cat: &mut Catalogue) {
    add_variants!(cat, "sse", Features::SSE | Features::SSE2, 10, sse => [
        reverse1, reverse2,
        lr_to_ms, lr_to_mid, lr_to_side, ms_to_lr, ms_to_left, ms_to_right,
        fmadd_k3, fmsub_k3, fmrsub_k3, fmmul_k3, fmdiv_k3, fmrdiv_k3,
        fmadd_k4, fmsub_k4, fmrsub_k4, fmmul_k4, fmdiv_k4, fmrdiv_k4,
        ssqrt1, ssqrt2,
    ]);

    add_variants!(cat, "sse4.1", Features::SSE | Features::SSE2 | Features::SSE4_1, 10, sse::sse41 => [
        fmmod_k3, fmrmod_k3, fmmod_k4, fmrmod_k4,
    ]);

    add_variants!(cat, "sse2", Features::SSE2, 10, bitmap => [
        bitmap_put_b1b8, bitmap_add_b1b8, bitmap_sub_b1b8, bitmap_max_b1b8, bitmap_min_b1b8,
    ]);

    add_variants!(cat, "avx", Features::AVX | Features::FAST_AVX, 20, avx => [
        reverse1, reverse2,
        lr_to_ms, lr_to_mid, lr_to_side, ms_to_lr, ms_to_left, ms_to_right,
        fmadd_k3, fmsub_k3, fmrsub_k3, fmmul_k3, fmdiv_k3, fmrdiv_k3, fmmod_k3, fmrmod_k3,
        fmadd_k4, fmsub_k4, fmrsub_k4, fmmul_k4, fmdiv_k4, fmrdiv_k4, fmmod_k4, fmrmod_k4,
        ssqrt1, ssqrt2,
    ]);

    add_variants!(cat, "avx+fma3", Features::AVX | Features::FMA3 | Features::FAST_FMA3, 30, avx::fma => [
        fmadd_k3, fmsub_k3, fmrsub_k3,
        fmadd_k4, fmsub_k4, fmrsub_k4,
    ]);
}
