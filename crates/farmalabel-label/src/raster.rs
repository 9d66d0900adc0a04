//! From-scratch raster adapter: the lightweight PNG-export strategy used
//! when no rendered surface is available to snapshot.
//!
//! Fills the background, then draws each visible line top-to-bottom with a
//! fixed `font_size + 4` line pitch, centered horizontally. Text uses a
//! built-in 5×7 face scaled to the configured font size. Deliberately
//! approximate: this strategy trades exact box layout for having zero
//! rendering dependencies. Accented characters fold to their base glyph.

use farmalabel_core::LabelConfig;

use crate::fmt::parse_hex_color;
use crate::geometry::{LabelGeometry, PADDING_PX};
use crate::layout::LayoutLine;

const WHITE: [u8; 3] = [0xFF, 0xFF, 0xFF];
const BLACK: [u8; 3] = [0x00, 0x00, 0x00];

/// Glyph cell: 5 columns × 7 rows, column-major, bit 0 = top row.
type Glyph = [u8; 5];

const GLYPH_COLS: u32 = 5;
const GLYPH_ROWS: u32 = 7;
/// Column advance: glyph width plus one blank column.
const GLYPH_ADVANCE: u32 = GLYPH_COLS + 1;

/// An RGBA8 pixel buffer produced by the draw strategy.
#[derive(Debug, Clone)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes, row-major RGBA.
    pub pixels: Vec<u8>,
}

/// Draws the given layout lines onto a fresh label canvas.
///
/// The canvas measures the geometry-contract conversion of the configured
/// millimetre dimensions, multiplied by `scale` (clamped to at least 1).
/// Malformed hex colors degrade to white background / black text.
#[must_use]
pub fn draw_label(lines: &[LayoutLine], config: &LabelConfig, scale: u32) -> Raster {
    let scale = scale.max(1);
    let geometry = LabelGeometry::of(config).scaled(scale);
    let background = parse_hex_color(&config.background_color, WHITE);
    let foreground = parse_hex_color(&config.text_color, BLACK);

    let mut raster = Raster::filled(geometry.width_px, geometry.height_px, background);

    // Glyph cell size tracks the font: a 5×7 glyph drawn at `unit` pixels
    // per cell stands roughly `font_size` pixels tall (7/8 of it, like a
    // cap height).
    let unit = (config.font_size / 8).max(1) * scale;
    let pitch = (config.font_size + 4) * scale;
    let advance = GLYPH_ADVANCE * unit;

    for (index, line) in lines.iter().enumerate() {
        let top = i64::from(PADDING_PX * scale) + i64::from(pitch) * index as i64;
        let chars: Vec<char> = line.text.chars().map(fold_char).collect();
        if chars.is_empty() {
            continue;
        }
        let text_width = i64::from(advance) * chars.len() as i64 - i64::from(unit);
        let mut x = (i64::from(raster.width) - text_width) / 2;

        for ch in chars {
            draw_glyph(&mut raster, glyph_for(ch), x, top, unit, foreground);
            x += i64::from(advance);
        }
    }

    raster
}

impl Raster {
    fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width * height {
            pixels.extend_from_slice(&[color[0], color[1], color[2], 0xFF]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Writes one pixel, silently clipping anything outside the canvas.
    fn set(&mut self, x: i64, y: i64, color: [u8; 3]) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        #[allow(clippy::cast_sign_loss)]
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[offset] = color[0];
        self.pixels[offset + 1] = color[1];
        self.pixels[offset + 2] = color[2];
        self.pixels[offset + 3] = 0xFF;
    }
}

fn draw_glyph(raster: &mut Raster, glyph: Glyph, x: i64, y: i64, unit: u32, color: [u8; 3]) {
    for (col, bits) in glyph.iter().enumerate() {
        for row in 0..GLYPH_ROWS {
            if bits & (1 << row) == 0 {
                continue;
            }
            let cell_x = x + col as i64 * i64::from(unit);
            let cell_y = y + i64::from(row) * i64::from(unit);
            for dx in 0..i64::from(unit) {
                for dy in 0..i64::from(unit) {
                    raster.set(cell_x + dx, cell_y + dy, color);
                }
            }
        }
    }
}

/// Folds a character onto the glyph table: ASCII letters uppercase, Spanish
/// accents drop to their base letter, everything else passes through (and
/// may land on the fallback glyph).
fn fold_char(ch: char) -> char {
    match ch {
        'á' | 'Á' => 'A',
        'é' | 'É' => 'E',
        'í' | 'Í' => 'I',
        'ó' | 'Ó' => 'O',
        'ú' | 'Ú' | 'ü' | 'Ü' => 'U',
        'ñ' | 'Ñ' => 'N',
        _ => ch.to_ascii_uppercase(),
    }
}

/// Unknown characters render as a hollow box rather than vanishing.
const FALLBACK: Glyph = [0x7F, 0x41, 0x41, 0x41, 0x7F];

#[allow(clippy::too_many_lines)]
fn glyph_for(ch: char) -> Glyph {
    match ch {
        ' ' => [0x00, 0x00, 0x00, 0x00, 0x00],
        '!' => [0x00, 0x00, 0x5F, 0x00, 0x00],
        '"' => [0x00, 0x07, 0x00, 0x07, 0x00],
        '#' => [0x14, 0x7F, 0x14, 0x7F, 0x14],
        '$' => [0x24, 0x2A, 0x7F, 0x2A, 0x12],
        '%' => [0x23, 0x13, 0x08, 0x64, 0x62],
        '&' => [0x36, 0x49, 0x55, 0x22, 0x50],
        '\'' => [0x00, 0x05, 0x03, 0x00, 0x00],
        '(' => [0x00, 0x1C, 0x22, 0x41, 0x00],
        ')' => [0x00, 0x41, 0x22, 0x1C, 0x00],
        '*' => [0x14, 0x08, 0x3E, 0x08, 0x14],
        '+' => [0x08, 0x08, 0x3E, 0x08, 0x08],
        ',' => [0x00, 0x50, 0x30, 0x00, 0x00],
        '-' => [0x08, 0x08, 0x08, 0x08, 0x08],
        '.' => [0x00, 0x60, 0x60, 0x00, 0x00],
        '/' => [0x20, 0x10, 0x08, 0x04, 0x02],
        '0' => [0x3E, 0x51, 0x49, 0x45, 0x3E],
        '1' => [0x00, 0x42, 0x7F, 0x40, 0x00],
        '2' => [0x42, 0x61, 0x51, 0x49, 0x46],
        '3' => [0x21, 0x41, 0x45, 0x4B, 0x31],
        '4' => [0x18, 0x14, 0x12, 0x7F, 0x10],
        '5' => [0x27, 0x45, 0x45, 0x45, 0x39],
        '6' => [0x3C, 0x4A, 0x49, 0x49, 0x30],
        '7' => [0x01, 0x71, 0x09, 0x05, 0x03],
        '8' => [0x36, 0x49, 0x49, 0x49, 0x36],
        '9' => [0x06, 0x49, 0x49, 0x29, 0x1E],
        ':' => [0x00, 0x36, 0x36, 0x00, 0x00],
        '=' => [0x14, 0x14, 0x14, 0x14, 0x14],
        '?' => [0x02, 0x01, 0x51, 0x09, 0x06],
        'A' => [0x7E, 0x11, 0x11, 0x11, 0x7E],
        'B' => [0x7F, 0x49, 0x49, 0x49, 0x36],
        'C' => [0x3E, 0x41, 0x41, 0x41, 0x22],
        'D' => [0x7F, 0x41, 0x41, 0x22, 0x1C],
        'E' => [0x7F, 0x49, 0x49, 0x49, 0x41],
        'F' => [0x7F, 0x09, 0x09, 0x09, 0x01],
        'G' => [0x3E, 0x41, 0x49, 0x49, 0x7A],
        'H' => [0x7F, 0x08, 0x08, 0x08, 0x7F],
        'I' => [0x00, 0x41, 0x7F, 0x41, 0x00],
        'J' => [0x20, 0x40, 0x41, 0x3F, 0x01],
        'K' => [0x7F, 0x08, 0x14, 0x22, 0x41],
        'L' => [0x7F, 0x40, 0x40, 0x40, 0x40],
        'M' => [0x7F, 0x02, 0x0C, 0x02, 0x7F],
        'N' => [0x7F, 0x04, 0x08, 0x10, 0x7F],
        'O' => [0x3E, 0x41, 0x41, 0x41, 0x3E],
        'P' => [0x7F, 0x09, 0x09, 0x09, 0x06],
        'Q' => [0x3E, 0x41, 0x51, 0x21, 0x5E],
        'R' => [0x7F, 0x09, 0x19, 0x29, 0x46],
        'S' => [0x46, 0x49, 0x49, 0x49, 0x31],
        'T' => [0x01, 0x01, 0x7F, 0x01, 0x01],
        'U' => [0x3F, 0x40, 0x40, 0x40, 0x3F],
        'V' => [0x1F, 0x20, 0x40, 0x20, 0x1F],
        'W' => [0x3F, 0x40, 0x38, 0x40, 0x3F],
        'X' => [0x63, 0x14, 0x08, 0x14, 0x63],
        'Y' => [0x07, 0x08, 0x70, 0x08, 0x07],
        'Z' => [0x61, 0x51, 0x49, 0x45, 0x43],
        '_' => [0x40, 0x40, 0x40, 0x40, 0x40],
        _ => FALLBACK,
    }
}
