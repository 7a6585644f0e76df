// SPDX-License-Identifier: LGPL-3.0-or-later
// Ported from lsp-plugins/lsp-dsp-lib (C++) — common/fft/const.h

//! Twiddle tables and a table-driven radix-2 FFT.
//!
//! Conventions:
//! - `rank` means log2 of the FFT size (e.g., rank=10 → 1024-point FFT)
//! - Separate real/imaginary arrays
//! - The inverse transform is not normalized; see [`normalize_fft`]
//!
//! The [`TwiddleTable`] holds, for every stage half-size `n = 4 << i`, the
//! first eight factors `cos/sin(π·k/n)` plus the single-step factor
//! `cos/sin(π/n)`. Twiddles past the eighth are assembled from the tables of
//! smaller stages, since `π·(8q + k)/n = π·k/n + π·q/(n/8)`; no transform
//! ever evaluates a trigonometric function.

use once_cell::sync::Lazy;
use std::f64::consts::PI;

/// Number of stage ranks covered by the tables.
pub const TWIDDLE_RANKS: usize = 16;

/// Largest supported transform rank.
pub const MAX_RANK: usize = TWIDDLE_RANKS + 2;

/// Precomputed FFT twiddle factors, rounded from double precision.
#[derive(Debug, Clone, PartialEq)]
pub struct TwiddleTable {
    /// `cos(π·(k mod n)/n)` for `n = 4 << i`, `k ∈ [0, 8)`.
    pub a_re: [[f32; 8]; TWIDDLE_RANKS],
    /// `sin(π·(k mod n)/n)` for `n = 4 << i`, `k ∈ [0, 8)`.
    pub a_im: [[f32; 8]; TWIDDLE_RANKS],
    /// `cos(π/n)` for `n = 4 << i`.
    pub dw_re: [f32; TWIDDLE_RANKS],
    /// `sin(π/n)` for `n = 4 << i`.
    pub dw_im: [f32; TWIDDLE_RANKS],
}

impl TwiddleTable {
    fn generate() -> Self {
        let mut t = Self {
            a_re: [[0.0; 8]; TWIDDLE_RANKS],
            a_im: [[0.0; 8]; TWIDDLE_RANKS],
            dw_re: [0.0; TWIDDLE_RANKS],
            dw_im: [0.0; TWIDDLE_RANKS],
        };
        for i in 0..TWIDDLE_RANKS {
            let n = 4usize << i;
            for k in 0..8 {
                let w = PI * (k % n) as f64 / n as f64;
                t.a_re[i][k] = w.cos() as f32;
                t.a_im[i][k] = w.sin() as f32;
            }
            let dw = PI / n as f64;
            t.dw_re[i] = dw.cos() as f32;
            t.dw_im[i] = dw.sin() as f32;
        }
        t
    }

    /// `(cos, sin)` of `π·j/h` for a power-of-two stage half-size `h`, `j < h`.
    pub fn factor(&self, h: usize, j: usize) -> (f32, f32) {
        debug_assert!(h.is_power_of_two() && j < h);
        match h {
            1 => (1.0, 0.0),
            2 if j == 0 => (1.0, 0.0),
            2 => (0.0, 1.0),
            _ => self.compose(h.trailing_zeros() as usize - 2, j),
        }
    }

    /// Twiddle `j` of the stage with half-size `4 << i`.
    fn compose(&self, mut i: usize, mut j: usize) -> (f32, f32) {
        let (mut re, mut im) = (self.a_re[i][j & 7], self.a_im[i][j & 7]);
        j >>= 3;
        while j != 0 {
            if i < 3 {
                // Only half-size 16 gets here, with a remaining quarter turn.
                (re, im) = (-im, re);
                break;
            }
            i -= 3;
            let (wr, wi) = (self.a_re[i][j & 7], self.a_im[i][j & 7]);
            (re, im) = (re * wr - im * wi, re * wi + im * wr);
            j >>= 3;
        }
        (re, im)
    }
}

static TWIDDLES: Lazy<TwiddleTable> = Lazy::new(TwiddleTable::generate);

/// The process-wide twiddle tables, generated on first use.
pub fn twiddles() -> &'static TwiddleTable {
    &TWIDDLES
}

fn transform(
    dst_re: &mut [f32],
    dst_im: &mut [f32],
    src_re: &[f32],
    src_im: &[f32],
    rank: usize,
    sign: f32,
) {
    assert!(rank <= MAX_RANK, "FFT rank {rank} exceeds {MAX_RANK}");
    let n = 1usize << rank;
    assert!(src_re.len() >= n && src_im.len() >= n);
    assert!(dst_re.len() >= n && dst_im.len() >= n);

    if rank == 0 {
        dst_re[0] = src_re[0];
        dst_im[0] = src_im[0];
        return;
    }

    let shift = usize::BITS - rank as u32;
    for i in 0..n {
        let r = i.reverse_bits() >> shift;
        dst_re[r] = src_re[i];
        dst_im[r] = src_im[i];
    }

    let table = twiddles();
    let mut h = 1;
    while h < n {
        for j in 0..h {
            let (wr, wi) = table.factor(h, j);
            let wi = sign * wi;
            let mut p = j;
            while p < n {
                let q = p + h;
                let tr = dst_re[q] * wr - dst_im[q] * wi;
                let ti = dst_re[q] * wi + dst_im[q] * wr;
                dst_re[q] = dst_re[p] - tr;
                dst_im[q] = dst_im[p] - ti;
                dst_re[p] += tr;
                dst_im[p] += ti;
                p += 2 * h;
            }
        }
        h <<= 1;
    }
}

/// Perform a forward (direct) FFT.
///
/// # Arguments
/// - `dst_re`, `dst_im`: output real and imaginary parts (length `2^rank`)
/// - `src_re`, `src_im`: input real and imaginary parts (length `2^rank`)
/// - `rank`: log2 of the FFT size, at most [`MAX_RANK`]
pub fn direct_fft(
    dst_re: &mut [f32],
    dst_im: &mut [f32],
    src_re: &[f32],
    src_im: &[f32],
    rank: usize,
) {
    transform(dst_re, dst_im, src_re, src_im, rank, -1.0);
}

/// Perform an inverse (reverse) FFT.
///
/// The output is scaled by `N`. Call [`normalize_fft`] to get `1/N` scaling.
pub fn reverse_fft(
    dst_re: &mut [f32],
    dst_im: &mut [f32],
    src_re: &[f32],
    src_im: &[f32],
    rank: usize,
) {
    transform(dst_re, dst_im, src_re, src_im, rank, 1.0);
}

/// Normalize FFT output by dividing by N (in-place).
pub fn normalize_fft(re: &mut [f32], im: &mut [f32], rank: usize) {
    let n = 1 << rank;
    let scale = 1.0 / n as f32;
    for (r, i) in re[..n].iter_mut().zip(&mut im[..n]) {
        *r *= scale;
        *i *= scale;
    }
}

/// Normalize FFT output into separate destination buffers.
pub fn normalize_fft3(
    dst_re: &mut [f32],
    dst_im: &mut [f32],
    src_re: &[f32],
    src_im: &[f32],
    rank: usize,
) {
    let n = 1 << rank;
    let scale = 1.0 / n as f32;
    for i in 0..n {
        dst_re[i] = src_re[i] * scale;
        dst_im[i] = src_im[i] * scale;
    }
}
