// SPDX-License-Identifier: LGPL-3.0-or-later

//! Bitmap views for the b1→b8 compositing primitives.
//!
//! An 8-bit bitmap stores one byte per pixel; a 1-bit bitmap packs eight
//! pixels per byte, most significant bit first. Both are row-major with an
//! explicit row stride in bytes. The views borrow caller memory and never
//! reallocate it.

use crate::error::BitmapError;

/// Mutable view of an 8-bit (one byte per pixel) bitmap.
#[derive(Debug)]
pub struct Bitmap8<'a> {
    data: &'a mut [u8],
    stride: usize,
    width: usize,
    height: usize,
}

impl<'a> Bitmap8<'a> {
    /// Wrap `data` as a `width` x `height` bitmap with rows `stride` bytes apart.
    pub fn new(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        stride: usize,
    ) -> Result<Self, BitmapError> {
        check_geometry(data.len(), width, height, stride)?;
        Ok(Self {
            data,
            stride,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn data(&self) -> &[u8] {
        self.data
    }

    /// Pixels `x..x + len` of row `y`.
    pub(crate) fn span_mut(&mut self, x: usize, y: usize, len: usize) -> &mut [u8] {
        let start = y * self.stride + x;
        &mut self.data[start..start + len]
    }
}

/// Read-only view of a packed 1-bit bitmap, MSB-first within each byte.
#[derive(Debug, Clone, Copy)]
pub struct Bitmap1<'a> {
    data: &'a [u8],
    stride: usize,
    width: usize,
    height: usize,
}

impl<'a> Bitmap1<'a> {
    /// Wrap `data` as a `width` x `height` bitmap with rows `stride` bytes apart.
    ///
    /// Each row needs `width.div_ceil(8)` bytes.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
    ) -> Result<Self, BitmapError> {
        check_geometry(data.len(), width.div_ceil(8), height, stride)?;
        Ok(Self {
            data,
            stride,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Packed bytes of row `y`.
    pub(crate) fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width.div_ceil(8)]
    }

    /// `true` if pixel (`x`, `y`) is set.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        bit(self.row(y), x)
    }
}

/// Bit `x` of a packed MSB-first row.
#[inline(always)]
pub(crate) fn bit(row: &[u8], x: usize) -> bool {
    row[x >> 3] & (0x80 >> (x & 7)) != 0
}

fn check_geometry(
    len: usize,
    row_bytes: usize,
    height: usize,
    stride: usize,
) -> Result<(), BitmapError> {
    if height > 1 && stride < row_bytes {
        return Err(BitmapError::StrideTooSmall {
            stride,
            needed: row_bytes,
        });
    }
    // An overflowing size can never fit; report it as `usize::MAX` bytes.
    let needed = match height {
        0 => Some(0),
        h => stride
            .checked_mul(h - 1)
            .and_then(|n| n.checked_add(row_bytes)),
    }
    .unwrap_or(usize::MAX);
    if len < needed {
        return Err(BitmapError::BufferTooSmall { len, needed });
    }
    Ok(())
}

/// Intersection of a source placed at (x, y) with the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Overlap {
    pub dst_x: usize,
    pub dst_y: usize,
    pub src_x: usize,
    pub src_y: usize,
    pub count_x: usize,
    pub count_y: usize,
}

/// Clip one axis: returns (dst offset, src offset, count).
fn clip_axis(dst_len: usize, src_len: usize, at: isize) -> Option<(usize, usize, usize)> {
    let dst_off = at.max(0).unsigned_abs();
    let src_off = at.min(0).unsigned_abs();
    if dst_off >= dst_len || src_off >= src_len {
        return None;
    }
    Some((dst_off, src_off, (dst_len - dst_off).min(src_len - src_off)))
}

/// Overlap rectangle of `src` drawn at (`x`, `y`) on `dst`, or `None` if empty.
pub(crate) fn overlap(dst: &Bitmap8<'_>, src: &Bitmap1<'_>, x: isize, y: isize) -> Option<Overlap> {
    let (dst_x, src_x, count_x) = clip_axis(dst.width, src.width, x)?;
    let (dst_y, src_y, count_y) = clip_axis(dst.height, src.height, y)?;
    Some(Overlap {
        dst_x,
        dst_y,
        src_x,
        src_y,
        count_x,
        count_y,
    })
}

/// Run `f(dst_span, src_row, src_x)` over every row of the overlap.
///
/// `dst_span` holds exactly the destination pixels covered by the source on
/// that row; `src_x` is the bit offset of the first covered source pixel.
#[inline(always)]
pub(crate) fn for_each_row(
    dst: &mut Bitmap8<'_>,
    src: &Bitmap1<'_>,
    x: isize,
    y: isize,
    mut f: impl FnMut(&mut [u8], &[u8], usize),
) {
    let Some(o) = overlap(dst, src, x, y) else {
        return;
    };
    for row in 0..o.count_y {
        let src_row = src.row(o.src_y + row);
        let span = dst.span_mut(o.dst_x, o.dst_y + row, o.count_x);
        f(span, src_row, o.src_x);
    }
}
