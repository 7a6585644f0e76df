// SPDX-License-Identifier: LGPL-3.0-or-later

//! Reference kernels.
//!
//! Portable scalar implementations of every primitive. They are the dispatch
//! fallback on every CPU and the oracle the accelerated variants are tested
//! against, so they favour the plainest expression of each formula.

mod bitmap;
mod copy;
mod msmatrix;
mod pmath;

pub use bitmap::*;
pub use copy::*;
pub use msmatrix::*;
pub use pmath::*;
