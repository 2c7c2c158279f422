//! 5x5 LED font and icons
//!
//! Bitmaps are five rows, top first. Bit 4 of a row is the leftmost column.

use super::display::Icon;

/// Rows of a 5x5 bitmap
pub type Bitmap = [u8; 5];

/// Blank columns a space occupies
const SPACE_WIDTH: usize = 3;

pub fn icon(icon: Icon) -> Bitmap {
    match icon {
        Icon::Happy => [0b00000, 0b01010, 0b00000, 0b10001, 0b01110],
        Icon::Skull => [0b01110, 0b10101, 0b11111, 0b01110, 0b01110],
    }
}

/// Glyph for a character. Lowercase letters use the uppercase glyph.
pub fn glyph(c: char) -> Option<Bitmap> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [0b01100, 0b10010, 0b11110, 0b10010, 0b10010],
        'B' => [0b11100, 0b10010, 0b11100, 0b10010, 0b11100],
        'C' => [0b01110, 0b10000, 0b10000, 0b10000, 0b01110],
        'D' => [0b11100, 0b10010, 0b10010, 0b10010, 0b11100],
        'E' => [0b11110, 0b10000, 0b11100, 0b10000, 0b11110],
        'F' => [0b11110, 0b10000, 0b11100, 0b10000, 0b10000],
        'G' => [0b01110, 0b10000, 0b10011, 0b10001, 0b01110],
        'H' => [0b10010, 0b10010, 0b11110, 0b10010, 0b10010],
        'I' => [0b11100, 0b01000, 0b01000, 0b01000, 0b11100],
        'J' => [0b11111, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10010, 0b10100, 0b11000, 0b10100, 0b10010],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b11110],
        'M' => [0b10001, 0b11011, 0b10101, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001],
        'O' => [0b01100, 0b10010, 0b10010, 0b10010, 0b01100],
        'P' => [0b11100, 0b10010, 0b11100, 0b10000, 0b10000],
        'Q' => [0b01100, 0b10010, 0b10010, 0b01100, 0b00110],
        'R' => [0b11100, 0b10010, 0b11100, 0b10010, 0b10001],
        'S' => [0b01110, 0b10000, 0b01100, 0b00010, 0b11100],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10010, 0b10010, 0b10010, 0b10010, 0b01100],
        'V' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10101, 0b11011, 0b10001],
        'X' => [0b10010, 0b10010, 0b01100, 0b10010, 0b10010],
        'Y' => [0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11110, 0b00100, 0b01000, 0b10000, 0b11110],
        '0' => [0b01100, 0b10110, 0b11010, 0b10010, 0b01100],
        '1' => [0b01000, 0b11000, 0b01000, 0b01000, 0b11100],
        '2' => [0b11100, 0b00010, 0b01100, 0b10000, 0b11110],
        '3' => [0b11110, 0b00010, 0b00100, 0b10010, 0b01100],
        '4' => [0b00110, 0b01010, 0b10010, 0b11111, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b11110],
        '6' => [0b00010, 0b00100, 0b01110, 0b10001, 0b01110],
        '7' => [0b11111, 0b00010, 0b00100, 0b01000, 0b10000],
        '8' => [0b01110, 0b10001, 0b01110, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b01110, 0b00100, 0b01000],
        '!' => [0b10000, 0b10000, 0b10000, 0b00000, 0b10000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b10000],
        ',' => [0b00000, 0b00000, 0b00000, 0b01000, 0b10000],
        '?' => [0b11100, 0b00010, 0b01100, 0b00000, 0b01000],
        ':' => [0b00000, 0b10000, 0b00000, 0b10000, 0b00000],
        '-' => [0b00000, 0b00000, 0b11100, 0b00000, 0b00000],
        '\'' => [0b10000, 0b10000, 0b00000, 0b00000, 0b00000],
        _ => return None,
    };
    Some(rows)
}

/// Column `x` (0 = leftmost) of a bitmap, as a mask with bit `y` set for lit rows
fn column(bitmap: &Bitmap, x: usize) -> u8 {
    bitmap
        .iter()
        .enumerate()
        .filter(|(_, row)| *row & (0b10000 >> x) != 0)
        .fold(0, |mask, (y, _)| mask | (1 << y))
}

/// Lay text out as a strip of columns ready to scroll. Glyphs are trimmed
/// to their lit columns and followed by one blank column. Characters
/// without a glyph become a single blank column.
pub fn text_columns(text: &str) -> Vec<u8> {
    let mut columns = Vec::new();

    for c in text.chars() {
        if c == ' ' {
            columns.extend(std::iter::repeat_n(0, SPACE_WIDTH));
            continue;
        }
        let Some(bitmap) = glyph(c) else {
            columns.push(0);
            continue;
        };

        let lit: Vec<u8> = (0..5).map(|x| column(&bitmap, x)).collect();
        let first = lit.iter().position(|&c| c != 0).unwrap_or(0);
        let last = lit.iter().rposition(|&c| c != 0).unwrap_or(0);
        columns.extend_from_slice(&lit[first..=last]);
        columns.push(0);
    }

    columns
}
