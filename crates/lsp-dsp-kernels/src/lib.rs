// SPDX-License-Identifier: LGPL-3.0-or-later

//! # lsp-dsp-kernels
//!
//! Runtime-dispatched DSP kernels in the style of
//! [lsp-plugins/lsp-dsp-lib](https://github.com/lsp-plugins/lsp-dsp-lib).
//!
//! Every primitive has a portable reference kernel plus hand-vectorized
//! variants for x86_64 (SSE, SSE4.1, SSE2, AVX, AVX+FMA3) and AArch64 (NEON).
//! At startup the CPU is queried once, each primitive is bound to the best
//! variant the CPU can run, and calls go straight to the bound entry with no
//! further branching.
//!
//! - **Reversal**: `reverse1`, `reverse2`
//! - **Mid/Side**: stereo ↔ mid/side matrixing
//! - **Scaled fused ops**: `fm{add,sub,rsub,mul,div,rdiv,mod,rmod}_k{3,4}`
//! - **Safe square root**: `ssqrt1`, `ssqrt2`
//! - **Bitmaps**: 1-bit onto 8-bit compositing with clipping
//! - **FFT**: twiddle tables and a table-driven radix-2 transform
//!
//! ## Usage
//!
//! ```
//! use lsp_dsp_kernels::dsp;
//!
//! lsp_dsp_kernels::init().expect("kernels bound once");
//!
//! let mut buf = [1.0f32, 2.0, 3.0];
//! dsp::reverse1(&mut buf);
//! assert_eq!(buf, [3.0, 2.0, 1.0]);
//! ```
//!
//! A [`Registry`] can also be built directly from any [`CpuInfo`] and passed
//! around as an explicit lookup table.
//!
//! ## Design
//!
//! Kernel bodies are written once against a fixed-width vector abstraction
//! and compiled per target with `multiversion`. Every variant is tested for
//! equivalence with the reference kernel over odd lengths and misaligned
//! buffers. The reference kernels live in [`generic`] and are always
//! callable directly.

#![cfg_attr(
    not(any(target_arch = "x86_64", target_arch = "aarch64")),
    allow(dead_code)
)]

mod arch;
mod kernels;
mod simd;

pub mod bitmap;
pub mod config;
pub mod detect;
pub mod error;
pub mod features;
pub mod fft;
pub mod generic;
pub mod registry;

pub use bitmap::{Bitmap1, Bitmap8};
pub use config::DispatchConfig;
pub use detect::detect_capabilities;
pub use error::{BitmapError, ConfigError, DispatchError};
pub use features::{CpuInfo, Features, Vendor};
pub use registry::{
    catalogue, dsp, init, init_with, init_with_config, is_initialized, registry, Catalogue,
    Primitive, Registry, Variant, VariantInfo,
};
