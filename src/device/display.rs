use super::font::{self, Bitmap};

/// Side length of the LED matrix
pub const MATRIX_SIZE: usize = 5;

/// Built-in images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Happy,
    Skull,
}

/// The 5x5 LED matrix as the game sees it.
///
/// `plot` ignores coordinates off the matrix. `show_text` and `show_icon`
/// complete once the text has scrolled past or the icon has been held.
#[allow(async_fn_in_trait)]
pub trait LedDisplay {
    fn clear(&mut self);

    fn plot(&mut self, x: i32, y: i32, brightness: u8);

    async fn show_text(&mut self, text: &str);

    async fn show_icon(&mut self, icon: Icon);
}

/// Brightness of every LED, indexed `[y][x]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedMatrix {
    leds: [[u8; MATRIX_SIZE]; MATRIX_SIZE],
}

impl LedMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.leds = Default::default();
    }

    pub fn plot(&mut self, x: i32, y: i32, brightness: u8) {
        if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
            if x < MATRIX_SIZE && y < MATRIX_SIZE {
                self.leds[y][x] = brightness;
            }
        }
    }

    pub fn brightness(&self, x: usize, y: usize) -> u8 {
        self.leds[y][x]
    }

    pub fn rows(&self) -> &[[u8; MATRIX_SIZE]; MATRIX_SIZE] {
        &self.leds
    }

    /// Replace the whole matrix with a bitmap at full brightness
    pub fn show_bitmap(&mut self, bitmap: &Bitmap) {
        for (y, row) in bitmap.iter().enumerate() {
            for x in 0..MATRIX_SIZE {
                self.leds[y][x] = if row & (0b10000 >> x) != 0 { 255 } else { 0 };
            }
        }
    }

    /// Show five consecutive columns of a scroll strip starting at `offset`.
    /// Columns past the end of the strip are blank.
    pub fn show_columns(&mut self, columns: &[u8], offset: usize) {
        for x in 0..MATRIX_SIZE {
            let column = columns.get(offset + x).copied().unwrap_or(0);
            for y in 0..MATRIX_SIZE {
                self.leds[y][x] = if column & (1 << y) != 0 { 255 } else { 0 };
            }
        }
    }

    pub fn show_icon(&mut self, icon: Icon) {
        self.show_bitmap(&font::icon(icon));
    }

    pub fn lit_count(&self) -> usize {
        self.leds.iter().flatten().filter(|&&b| b > 0).count()
    }
}
