// SPDX-License-Identifier: LGPL-3.0-or-later

//! AArch64 variants.
//!
//! NEON is part of the AArch64 baseline; the single `neon` variant (rank 10)
//! serves every float primitive. Bitmaps stay on the reference kernels.

mod neon;

use crate::features::Features;
use crate::registry::Catalogue;

pub(crate) fn register(cat: &mut Catalogue) {
    add_variants!(cat, "neon", Features::NEON, 10, neon => [
        reverse1, reverse2,
        lr_to_ms, lr_to_mid, lr_to_side, ms_to_lr, ms_to_left, ms_to_right,
        fmadd_k3, fmsub_k3, fmrsub_k3, fmmul_k3, fmdiv_k3, fmrdiv_k3, fmmod_k3, fmrmod_k3,
        fmadd_k4, fmsub_k4, fmrsub_k4, fmmul_k4, fmdiv_k4, fmrdiv_k4, fmmod_k4, fmrmod_k4,
        ssqrt1, ssqrt2,
    ]);
}
