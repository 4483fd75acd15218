//! 5×7 ASCII font for the matrix.
//!
//! Glyphs are stored column-major, five bytes per character. Within a column byte, bit 6 is the
//! top row and bit 0 the bottom row; bit 7 is unused. The table covers printable ASCII
//! (`' '..='~'`); anything else renders as a space.

use embedded_graphics::prelude::Point;

use crate::pixel::{Pixel, PixelBuffer};

/// Glyph width in columns
pub const GLYPH_WIDTH: usize = 5;

/// Glyph height in rows
pub const GLYPH_HEIGHT: usize = 7;

const FIRST_CHAR: u32 = ' ' as u32;

#[rustfmt::skip]
static GLYPHS: [[u8; GLYPH_WIDTH]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // space
    [0x00, 0x00, 0x7D, 0x00, 0x00], // !
    [0x00, 0x70, 0x00, 0x70, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x12, 0x2A, 0x7F, 0x2A, 0x24], // $
    [0x62, 0x64, 0x08, 0x13, 0x23], // %
    [0x36, 0x49, 0x55, 0x22, 0x05], // &
    [0x00, 0x50, 0x60, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x05, 0x06, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x03, 0x03, 0x00, 0x00], // .
    [0x02, 0x04, 0x08, 0x10, 0x20], // /
    [0x3E, 0x45, 0x49, 0x51, 0x3E], // 0
    [0x00, 0x21, 0x7F, 0x01, 0x00], // 1
    [0x21, 0x43, 0x45, 0x49, 0x31], // 2
    [0x42, 0x41, 0x51, 0x69, 0x46], // 3
    [0x0C, 0x14, 0x24, 0x7F, 0x04], // 4
    [0x72, 0x51, 0x51, 0x51, 0x4E], // 5
    [0x1E, 0x29, 0x49, 0x49, 0x06], // 6
    [0x40, 0x47, 0x48, 0x50, 0x60], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x30, 0x49, 0x49, 0x4A, 0x3C], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x35, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x20, 0x40, 0x45, 0x48, 0x30], // ?
    [0x26, 0x49, 0x4F, 0x41, 0x3E], // @
    [0x3F, 0x44, 0x44, 0x44, 0x3F], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x48, 0x48, 0x40, 0x40], // F
    [0x3E, 0x41, 0x41, 0x45, 0x26], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x02, 0x01, 0x41, 0x7E, 0x40], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x01, 0x01, 0x01, 0x01], // L
    [0x7F, 0x20, 0x10, 0x20, 0x7F], // M
    [0x7F, 0x10, 0x08, 0x04, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x48, 0x48, 0x48, 0x30], // P
    [0x3E, 0x41, 0x45, 0x42, 0x3D], // Q
    [0x7F, 0x48, 0x4C, 0x4A, 0x31], // R
    [0x31, 0x49, 0x49, 0x49, 0x46], // S
    [0x40, 0x40, 0x7F, 0x40, 0x40], // T
    [0x7E, 0x01, 0x01, 0x01, 0x7E], // U
    [0x7C, 0x02, 0x01, 0x02, 0x7C], // V
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x60, 0x10, 0x0F, 0x10, 0x60], // Y
    [0x43, 0x45, 0x49, 0x51, 0x61], // Z
    [0x00, 0x00, 0x7F, 0x41, 0x41], // [
    [0x20, 0x10, 0x08, 0x04, 0x02], // backslash
    [0x41, 0x41, 0x7F, 0x00, 0x00], // ]
    [0x10, 0x20, 0x40, 0x20, 0x10], // ^
    [0x01, 0x01, 0x01, 0x01, 0x01], // _
    [0x00, 0x40, 0x20, 0x10, 0x00], // `
    [0x02, 0x15, 0x15, 0x15, 0x0F], // a
    [0x7F, 0x09, 0x11, 0x11, 0x0E], // b
    [0x0E, 0x11, 0x11, 0x11, 0x02], // c
    [0x0E, 0x11, 0x11, 0x09, 0x7F], // d
    [0x0E, 0x15, 0x15, 0x15, 0x0C], // e
    [0x08, 0x3F, 0x48, 0x40, 0x20], // f
    [0x08, 0x14, 0x15, 0x15, 0x1E], // g
    [0x7F, 0x08, 0x10, 0x10, 0x0F], // h
    [0x00, 0x11, 0x5F, 0x01, 0x00], // i
    [0x02, 0x01, 0x11, 0x5E, 0x00], // j
    [0x00, 0x7F, 0x04, 0x0A, 0x11], // k
    [0x00, 0x41, 0x7F, 0x01, 0x00], // l
    [0x1F, 0x10, 0x0C, 0x10, 0x0F], // m
    [0x1F, 0x08, 0x10, 0x10, 0x0F], // n
    [0x0E, 0x11, 0x11, 0x11, 0x0E], // o
    [0x1F, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x0C, 0x1F], // q
    [0x1F, 0x08, 0x10, 0x10, 0x08], // r
    [0x09, 0x15, 0x15, 0x15, 0x02], // s
    [0x10, 0x7E, 0x11, 0x01, 0x02], // t
    [0x1E, 0x01, 0x01, 0x02, 0x1F], // u
    [0x1C, 0x02, 0x01, 0x02, 0x1C], // v
    [0x1E, 0x01, 0x06, 0x01, 0x1E], // w
    [0x11, 0x0A, 0x04, 0x0A, 0x11], // x
    [0x18, 0x05, 0x05, 0x05, 0x1E], // y
    [0x11, 0x13, 0x15, 0x19, 0x11], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x20, 0x40, 0x20, 0x10, 0x20], // ~
];

/// Column bytes for `ch`, falling back to the space glyph.
#[must_use]
pub fn glyph(ch: char) -> &'static [u8; GLYPH_WIDTH] {
    (ch as u32)
        .checked_sub(FIRST_CHAR)
        .and_then(|index| GLYPHS.get(index as usize))
        .unwrap_or(&GLYPHS[0])
}

/// Returns true if `ch` has its own glyph.
#[must_use]
pub fn has_glyph(ch: char) -> bool {
    (' '..='~').contains(&ch)
}

/// Draw `ch` with its top-left corner at `offset`.
///
/// Every glyph cell that lands on the matrix is overwritten: set bits become `color`, clear
/// bits become [`Pixel::OFF`]. Cells falling off the matrix are skipped. Nothing is flushed to
/// the controller.
pub fn render_char(buffer: &mut PixelBuffer, ch: char, offset: Point, color: Pixel) {
    for (col, &bits) in glyph(ch).iter().enumerate() {
        for row in 0..GLYPH_HEIGHT {
            let lit = bits & (1 << (GLYPH_HEIGHT - 1 - row)) != 0;
            // a cell whose coordinate does not fit in i32 is off the matrix anyway
            let (Some(x), Some(y)) = (
                offset.x.checked_add(col as i32),
                offset.y.checked_add(row as i32),
            ) else {
                continue;
            };
            buffer.set_pixel(Point::new(x, y), if lit { color } else { Pixel::OFF });
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use super::*;

    fn lit_cells(buffer: &PixelBuffer) -> Vec<(usize, usize)> {
        buffer
            .iter()
            .filter(|(_, _, p)| !p.is_off())
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn test_table_covers_printable_ascii() {
        assert_eq!(GLYPHS.len(), ('~' as usize) - (' ' as usize) + 1);
        assert!(has_glyph(' '));
        assert!(has_glyph('~'));
        assert!(!has_glyph('\n'));
        assert!(!has_glyph('é'));
    }

    #[test]
    fn test_bit_seven_unused() {
        for g in &GLYPHS {
            assert!(g.iter().all(|&column| column & 0x80 == 0));
        }
    }

    #[test]
    fn test_space_is_blank() {
        assert_eq!(glyph(' '), &[0; GLYPH_WIDTH]);
    }

    #[test]
    fn test_missing_glyph_falls_back_to_space() {
        for ch in ['\0', '\t', '\u{7f}', 'é', '€'] {
            assert_eq!(glyph(ch), glyph(' '));

            let mut rendered = PixelBuffer::new();
            rendered.fill(Pixel::BLUE);
            render_char(&mut rendered, ch, Point::new(1, 0), Pixel::RED);

            let mut space = PixelBuffer::new();
            space.fill(Pixel::BLUE);
            render_char(&mut space, ' ', Point::new(1, 0), Pixel::RED);

            assert_eq!(rendered, space);
        }
    }

    #[test]
    fn test_exclamation_mark_top_row_first() {
        let mut buffer = PixelBuffer::new();
        render_char(&mut buffer, '!', Point::zero(), Pixel::GREEN);
        // a bar down rows 0..=4 of the middle column, a gap, then the dot
        assert_eq!(
            lit_cells(&buffer),
            [(2, 0), (2, 1), (2, 2), (2, 3), (2, 4), (2, 6)]
        );
        assert_eq!(buffer.get(Point::new(2, 0)), Some(Pixel::GREEN));
    }

    #[test]
    fn test_letter_l() {
        let mut buffer = PixelBuffer::new();
        render_char(&mut buffer, 'L', Point::zero(), Pixel::WHITE);
        for row in 0..7 {
            assert_eq!(buffer.get(Point::new(0, row)), Some(Pixel::WHITE));
        }
        for col in 0..5 {
            assert_eq!(buffer.get(Point::new(col, 6)), Some(Pixel::WHITE));
        }
        assert_eq!(lit_cells(&buffer).len(), 11);
    }

    #[test]
    fn test_render_clears_unset_cells() {
        let mut buffer = PixelBuffer::new();
        buffer.fill(Pixel::WHITE);
        render_char(&mut buffer, ' ', Point::new(1, 1), Pixel::RED);
        for y in 0..8 {
            for x in 0..8 {
                let inside = (1..6).contains(&x) && (1..8).contains(&y);
                let expected = if inside { Pixel::OFF } else { Pixel::WHITE };
                assert_eq!(buffer.get(Point::new(x, y)), Some(expected));
            }
        }
    }

    #[test]
    fn test_render_clips_at_edges() {
        let mut buffer = PixelBuffer::new();
        render_char(&mut buffer, 'L', Point::new(6, 4), Pixel::RED);
        // only glyph columns 0,1 and rows 0..4 land on the matrix; the foot is cut off
        assert_eq!(lit_cells(&buffer), [(6, 4), (6, 5), (6, 6), (6, 7)]);

        let mut buffer = PixelBuffer::new();
        render_char(&mut buffer, 'L', Point::new(-4, -3), Pixel::RED);
        // only the last glyph column lands on the matrix
        assert_eq!(lit_cells(&buffer), [(0, 3)]);
    }

    #[test]
    fn test_render_at_extreme_offsets_is_skipped() {
        let mut buffer = PixelBuffer::new();
        buffer.fill(Pixel::BLUE);
        render_char(&mut buffer, 'A', Point::new(i32::MAX - 2, 0), Pixel::RED);
        render_char(&mut buffer, 'A', Point::new(0, i32::MAX - 3), Pixel::RED);
        render_char(&mut buffer, 'W', Point::new(i32::MAX, i32::MAX), Pixel::RED);
        render_char(&mut buffer, 'W', Point::new(i32::MIN, i32::MIN), Pixel::RED);
        assert!(buffer.iter().all(|(_, _, p)| p == Pixel::BLUE));
    }
}
