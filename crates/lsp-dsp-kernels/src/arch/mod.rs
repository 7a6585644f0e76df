// SPDX-License-Identifier: LGPL-3.0-or-later

//! Accelerated variants.
//!
//! Every architecture module defines its vector types, instantiates the
//! bodies from [`crate::kernels`] under the matching target features, and
//! registers the resulting entry points with the variant catalogue.

/// Instantiate target-feature entry points for vector type `$V`.
///
/// Each entry is a plain `fn` with the primitive's signature wrapping an
/// `unsafe` body compiled for `$target`. The registry hands an entry out only
/// after checking its variant's requirements against the running CPU, which
/// is what makes the inner call sound.
#[allow(unused_macros)]
macro_rules! vector_entries {
    ($target:tt, $V:ty; $($name:ident($($arg:ident: $ty:ty),*) => $kernel:ident $([$op:ident])?;)*) => {
        $(
            pub(crate) fn $name($($arg: $ty),*) {
                #[multiversion::target($target)]
                unsafe fn body($($arg: $ty),*) {
                    unsafe {
                        $crate::kernels::$kernel::<$V>($($arg,)* $($crate::kernels::op::$op::<$V>)?)
                    }
                }
                // SAFETY: safe APIs only hand this entry out when the running
                // CPU has the variant's extensions (`Registry::new`,
                // `Variant::checked_entry`).
                unsafe { body($($arg),*) }
            }
        )*
    };
}

/// Primitives every float vector type can serve.
#[allow(unused_macros)]
macro_rules! basic_entries {
    ($target:tt, $V:ty) => {
        vector_entries! { $target, $V;
            reverse1(dst: &mut [f32]) => reverse1;
            reverse2(dst: &mut [f32], src: &[f32]) => reverse2;
            lr_to_ms(m: &mut [f32], s: &mut [f32], l: &[f32], r: &[f32]) => lr_to_ms;
            lr_to_mid(m: &mut [f32], l: &[f32], r: &[f32]) => lr_to_mid;
            lr_to_side(s: &mut [f32], l: &[f32], r: &[f32]) => lr_to_side;
            ms_to_lr(l: &mut [f32], r: &mut [f32], m: &[f32], s: &[f32]) => ms_to_lr;
            ms_to_left(l: &mut [f32], m: &[f32], s: &[f32]) => ms_to_left;
            ms_to_right(r: &mut [f32], m: &[f32], s: &[f32]) => ms_to_right;
            fmadd_k3(dst: &mut [f32], src: &[f32], k: f32) => fmop_k3 [add];
            fmsub_k3(dst: &mut [f32], src: &[f32], k: f32) => fmop_k3 [sub];
            fmrsub_k3(dst: &mut [f32], src: &[f32], k: f32) => fmop_k3 [rsub];
            fmmul_k3(dst: &mut [f32], src: &[f32], k: f32) => fmop_k3 [mul];
            fmdiv_k3(dst: &mut [f32], src: &[f32], k: f32) => fmop_k3 [div];
            fmrdiv_k3(dst: &mut [f32], src: &[f32], k: f32) => fmop_k3 [rdiv];
            fmadd_k4(dst: &mut [f32], src1: &[f32], src2: &[f32], k: f32) => fmop_k4 [add];
            fmsub_k4(dst: &mut [f32], src1: &[f32], src2: &[f32], k: f32) => fmop_k4 [sub];
            fmrsub_k4(dst: &mut [f32], src1: &[f32], src2: &[f32], k: f32) => fmop_k4 [rsub];
            fmmul_k4(dst: &mut [f32], src1: &[f32], src2: &[f32], k: f32) => fmop_k4 [mul];
            fmdiv_k4(dst: &mut [f32], src1: &[f32], src2: &[f32], k: f32) => fmop_k4 [div];
            fmrdiv_k4(dst: &mut [f32], src1: &[f32], src2: &[f32], k: f32) => fmop_k4 [rdiv];
            ssqrt1(dst: &mut [f32]) => ssqrt1;
            ssqrt2(dst: &mut [f32], src: &[f32]) => ssqrt2;
        }
    };
}

/// Remainder primitives; `$V` must provide a vector truncation.
#[allow(unused_macros)]
macro_rules! mod_entries {
    ($target:tt, $V:ty) => {
        vector_entries! { $target, $V;
            fmmod_k3(dst: &mut [f32], src: &[f32], k: f32) => fmop_k3 [fmod];
            fmrmod_k3(dst: &mut [f32], src: &[f32], k: f32) => fmop_k3 [rfmod];
            fmmod_k4(dst: &mut [f32], src1: &[f32], src2: &[f32], k: f32) => fmop_k4 [fmod];
            fmrmod_k4(dst: &mut [f32], src1: &[f32], src2: &[f32], k: f32) => fmop_k4 [rfmod];
        }
    };
}

/// Primitives that gain from a fused multiply-add. The remainders are left
/// out: they only round correctly unfused.
#[allow(unused_macros)]
macro_rules! fused_entries {
    ($target:tt, $V:ty) => {
        vector_entries! { $target, $V;
            fmadd_k3(dst: &mut [f32], src: &[f32], k: f32) => fmop_k3 [add];
            fmsub_k3(dst: &mut [f32], src: &[f32], k: f32) => fmop_k3 [sub];
            fmrsub_k3(dst: &mut [f32], src: &[f32], k: f32) => fmop_k3 [rsub];
            fmadd_k4(dst: &mut [f32], src1: &[f32], src2: &[f32], k: f32) => fmop_k4 [add];
            fmsub_k4(dst: &mut [f32], src1: &[f32], src2: &[f32], k: f32) => fmop_k4 [sub];
            fmrsub_k4(dst: &mut [f32], src1: &[f32], src2: &[f32], k: f32) => fmop_k4 [rsub];
        }
    };
}

/// Append one variant per listed primitive to the catalogue.
#[allow(unused_macros)]
macro_rules! add_variants {
    ($cat:ident, $name:literal, $requires:expr, $rank:literal, $($module:ident)::+ => [$($prim:ident),* $(,)?]) => {{
        use $($module)::+ as variants;
        let requires = $requires;
        $(
            $cat.$prim.push($crate::registry::Variant::new($name, requires, $rank, variants::$prim));
        )*
    }};
}

#[cfg(target_arch = "x86_64")]
pub(crate) mod x86;

#[cfg(target_arch = "aarch64")]
pub(crate) mod aarch64;
