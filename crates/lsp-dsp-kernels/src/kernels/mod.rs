// SPDX-License-Identifier: LGPL-3.0-or-later

//! Vector kernel bodies.
//!
//! Each body is generic over [`SimdVector`](crate::simd::SimdVector) and is
//! meant to be inlined into a target-feature entry point in [`crate::arch`].
//! Calling one is `unsafe`: the caller guarantees the CPU supports `V`.

mod copy;
mod msmatrix;
mod pmath;

pub(crate) use copy::*;
pub(crate) use msmatrix::*;
pub(crate) use pmath::*;
