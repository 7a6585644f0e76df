// SPDX-License-Identifier: LGPL-3.0-or-later
// Ported from lsp-plugins/lsp-dsp-lib (C++) — generic/bitmap/b1b8.h

//! 1-bit onto 8-bit bitmap compositing.
//!
//! A set source pixel contributes `0xff`, a clear one `0x00`. Only the overlap
//! of the source placed at (`x`, `y`) with the destination is touched.

use crate::bitmap::{bit, for_each_row, Bitmap1, Bitmap8};

#[inline(always)]
fn composite(
    dst: &mut Bitmap8<'_>,
    src: &Bitmap1<'_>,
    x: isize,
    y: isize,
    op: impl Fn(u8, u8) -> u8,
) {
    for_each_row(dst, src, x, y, |span, row, src_x| {
        for (i, d) in span.iter_mut().enumerate() {
            let v = if bit(row, src_x + i) { 0xff } else { 0x00 };
            *d = op(*d, v);
        }
    });
}

/// Overwrite with `0xff` / `0x00`.
pub fn bitmap_put_b1b8(dst: &mut Bitmap8<'_>, src: &Bitmap1<'_>, x: isize, y: isize) {
    composite(dst, src, x, y, |_, v| v);
}

/// Saturating add.
pub fn bitmap_add_b1b8(dst: &mut Bitmap8<'_>, src: &Bitmap1<'_>, x: isize, y: isize) {
    composite(dst, src, x, y, u8::saturating_add);
}

/// Saturating subtract.
pub fn bitmap_sub_b1b8(dst: &mut Bitmap8<'_>, src: &Bitmap1<'_>, x: isize, y: isize) {
    composite(dst, src, x, y, u8::saturating_sub);
}

/// Maximum, which for a `0x00`/`0xff` source is a bitwise OR.
pub fn bitmap_max_b1b8(dst: &mut Bitmap8<'_>, src: &Bitmap1<'_>, x: isize, y: isize) {
    composite(dst, src, x, y, |d, v| d | v);
}

/// Minimum, which for a `0x00`/`0xff` source is a bitwise AND.
pub fn bitmap_min_b1b8(dst: &mut Bitmap8<'_>, src: &Bitmap1<'_>, x: isize, y: isize) {
    composite(dst, src, x, y, |d, v| d & v);
}
