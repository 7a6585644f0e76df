// SPDX-License-Identifier: LGPL-3.0-or-later
//
// Shared helpers for the integration tests: guarded float buffers with
// controllable alignment, seeded signals and an adaptive comparator.

#![allow(dead_code)]

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Buffers start this many bytes past an aligned boundary plus the misalignment.
pub const ALIGN: usize = 64;

/// Canary floats kept on each side of the payload.
pub const GUARD: usize = 16;

/// Bit pattern of the canary, a NaN no kernel would produce by accident.
const CANARY: u32 = 0x7fa5_5a5a;

/// Element counts every variant is checked at: all short tails, vector
/// multiples, odd lengths and one large block.
pub const COUNTS: &[usize] = &[
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 32, 64, 65, 100, 999, 0xfff,
];

/// Tolerance of the adaptive comparison.
pub const TOLERANCE: f32 = 1e-4;

/// A float buffer surrounded by canaries, starting `misalign` floats past a
/// 64-byte boundary.
pub struct FloatBuffer {
    storage: Vec<f32>,
    start: usize,
    len: usize,
    misalign: usize,
}

impl FloatBuffer {
    pub fn new(len: usize, misalign: usize) -> Self {
        let total = len + 2 * GUARD + ALIGN / 4 + misalign;
        let storage = vec![f32::from_bits(CANARY); total];
        let base = storage.as_ptr() as usize;
        let pad = ((ALIGN - base % ALIGN) % ALIGN) / 4;
        Self {
            storage,
            start: pad + GUARD + misalign,
            len,
            misalign,
        }
    }

    /// A buffer filled with uniform values in `[-1, 1)`.
    pub fn random(len: usize, misalign: usize, rng: &mut ChaCha8Rng) -> Self {
        Self::random_scaled(len, misalign, 1.0, rng)
    }

    /// A buffer filled with uniform values in `[-scale, scale)`.
    pub fn random_scaled(len: usize, misalign: usize, scale: f32, rng: &mut ChaCha8Rng) -> Self {
        let mut buf = Self::new(len, misalign);
        for v in buf.as_mut_slice() {
            *v = (rng.random::<f32>() * 2.0 - 1.0) * scale;
        }
        buf
    }

    /// A copy with identical contents and alignment.
    pub fn duplicate(&self) -> Self {
        let mut copy = Self::new(self.len, self.misalign);
        copy.as_mut_slice().copy_from_slice(self.as_slice());
        copy
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.storage[self.start..self.start + self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.storage[self.start..self.start + self.len]
    }

    /// `true` if no canary around the payload was overwritten.
    pub fn valid(&self) -> bool {
        let (head, rest) = self.storage.split_at(self.start);
        let tail = &rest[self.len..];
        head.iter().chain(tail).all(|v| v.to_bits() == CANARY)
    }
}

/// Seeded generator, so failures reproduce.
pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Absolute comparison near zero, relative elsewhere. NaN matches NaN and
/// infinities must match exactly.
pub fn equal_adaptive(a: f32, b: f32, tolerance: f32) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    let scale = a.abs().max(b.abs());
    let diff = (a - b).abs();
    if scale <= 1.0 {
        diff <= tolerance
    } else {
        diff <= tolerance * scale
    }
}

/// Panic with context at the first element outside tolerance.
pub fn assert_equal_adaptive(expected: &[f32], actual: &[f32], context: &str) {
    assert_eq!(expected.len(), actual.len(), "{context}: length mismatch");
    for (i, (&e, &a)) in expected.iter().zip(actual).enumerate() {
        assert!(
            equal_adaptive(e, a, TOLERANCE),
            "{context}: index {i}: expected {e}, got {a}"
        );
    }
}

/// Like [`equal_adaptive`], but relative to `scale` rather than to the result.
///
/// For `a ± b` where one side rounds `b` before the sum and the other does
/// not, the difference is bounded by the operands, not by the result.
pub fn equal_scaled(a: f32, b: f32, tolerance: f32, scale: f32) -> bool {
    if a.is_nan() || b.is_nan() || a.is_infinite() || b.is_infinite() {
        return equal_adaptive(a, b, tolerance);
    }
    (a - b).abs() <= tolerance * scale.max(1.0)
}

/// Misalignment (0 or 1 float) of buffer `index` under offset `mask`.
pub fn misalign(mask: usize, index: usize) -> usize {
    (mask >> index) & 1
}
