// SPDX-License-Identifier: LGPL-3.0-or-later

//! SSE2 b1→b8 compositing, sixteen pixels per step.
//!
//! Sixteen source bits are expanded to a `0x00`/`0xff` byte mask and combined
//! with the destination using the saturating and bitwise byte instructions,
//! which gives exactly the reference result. Row remainders use the scalar
//! pixel operation.

#![allow(unused_unsafe)]

use core::arch::x86_64::*;

use crate::bitmap::{bit, for_each_row, Bitmap1, Bitmap8};

/// Sixteen source bits starting at pixel `x`, the first pixel in bit 15.
#[inline(always)]
fn bits16(row: &[u8], x: usize) -> u16 {
    let at = x >> 3;
    let byte = |j: usize| u32::from(row.get(at + j).copied().unwrap_or(0));
    let window = (byte(0) << 16) | (byte(1) << 8) | byte(2);
    ((window << (x & 7)) >> 8) as u16
}

/// One mask byte per bit: `0xff` where set.
#[inline(always)]
unsafe fn expand(bits: u16) -> __m128i {
    unsafe {
        // Byte 0 now holds pixels 0..8, byte 1 pixels 8..16.
        let v = _mm_cvtsi32_si128(i32::from(bits.swap_bytes()));
        let v = _mm_unpacklo_epi8(v, v);
        let v = _mm_unpacklo_epi16(v, v);
        let v = _mm_unpacklo_epi32(v, v);
        let sel = _mm_setr_epi8(
            -128, 0x40, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01, -128, 0x40, 0x20, 0x10, 0x08, 0x04,
            0x02, 0x01,
        );
        _mm_cmpeq_epi8(_mm_and_si128(v, sel), sel)
    }
}

#[inline(always)]
unsafe fn blend_row(
    span: &mut [u8],
    row: &[u8],
    src_x: usize,
    vop: impl Fn(__m128i, __m128i) -> __m128i,
    sop: impl Fn(u8, u8) -> u8,
) {
    let n = span.len();
    let mut i = 0;
    while i + 16 <= n {
        unsafe {
            let mask = expand(bits16(row, src_x + i));
            let p = span.as_mut_ptr().add(i).cast::<__m128i>();
            _mm_storeu_si128(p, vop(_mm_loadu_si128(p), mask));
        }
        i += 16;
    }
    for (j, d) in span[i..].iter_mut().enumerate() {
        let v = if bit(row, src_x + i + j) { 0xff } else { 0x00 };
        *d = sop(*d, v);
    }
}

macro_rules! sse2_composite {
    ($($name:ident => $vop:expr, $sop:expr;)*) => {
        $(
            pub(crate) fn $name(dst: &mut Bitmap8<'_>, src: &Bitmap1<'_>, x: isize, y: isize) {
                #[multiversion::target("x86_64+sse2")]
                unsafe fn body(dst: &mut Bitmap8<'_>, src: &Bitmap1<'_>, x: isize, y: isize) {
                    for_each_row(dst, src, x, y, |span, row, src_x| unsafe {
                        blend_row(span, row, src_x, $vop, $sop)
                    });
                }
                // SAFETY: only bound when the running CPU has SSE2.
                unsafe { body(dst, src, x, y) }
            }
        )*
    };
}

sse2_composite! {
    bitmap_put_b1b8 => |_, m| m, |_, v| v;
    bitmap_add_b1b8 => |d, m| unsafe { _mm_adds_epu8(d, m) }, u8::saturating_add;
    bitmap_sub_b1b8 => |d, m| unsafe { _mm_subs_epu8(d, m) }, u8::saturating_sub;
    bitmap_max_b1b8 => |d, m| unsafe { _mm_or_si128(d, m) }, |d, v| d | v;
    bitmap_min_b1b8 => |d, m| unsafe { _mm_and_si128(d, m) }, |d, v| d & v;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits16_alignment() {
        let row = [0b1000_0001, 0b0110_0000, 0b1111_1111];
        assert_eq!(bits16(&row, 0), 0b1000_0001_0110_0000);
        assert_eq!(bits16(&row, 7), 0b1011_0000_0111_1111);
        // Reading past the row end yields clear bits.
        assert_eq!(bits16(&row, 16), 0b1111_1111_0000_0000);
    }

    #[test]
    fn test_expand_is_msb_first() {
        let mut out = [0u8; 16];
        unsafe {
            _mm_storeu_si128(
                out.as_mut_ptr().cast(),
                expand(0b1000_0000_0000_0001),
            );
        }
        let mut expected = [0u8; 16];
        expected[0] = 0xff;
        expected[15] = 0xff;
        assert_eq!(out, expected);
    }
}
