use serde::{Deserialize, Serialize};

/// Font size (px) the glyph width buckets were calibrated for.
pub const GLYPH_TABLE_FONT_SIZE: f64 = 12.0;

pub const NARROW_GLYPH_UNITS: u32 = 3;
pub const WIDE_GLYPH_UNITS: u32 = 9;
pub const UPPERCASE_GLYPH_UNITS: u32 = 7;
pub const DEFAULT_GLYPH_UNITS: u32 = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: GLYPH_TABLE_FONT_SIZE,
            font_weight: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Width units for a single UTF-16 code unit of `ch`.
///
/// `i l I | space` are narrow, `m w M W` are wide, ASCII uppercase is slightly wider than the
/// default bucket everything else falls into.
pub fn glyph_units(ch: char) -> u32 {
    match ch {
        'i' | 'l' | 'I' | '|' | ' ' => NARROW_GLYPH_UNITS,
        'm' | 'w' | 'M' | 'W' => WIDE_GLYPH_UNITS,
        'A'..='Z' => UPPERCASE_GLYPH_UNITS,
        _ => DEFAULT_GLYPH_UNITS,
    }
}

/// Sums glyph units over `text`.
///
/// Characters outside the BMP occupy two UTF-16 code units and are counted once per unit, so an
/// emoji weighs `2 * DEFAULT_GLYPH_UNITS`.
pub fn text_units(text: &str) -> u32 {
    text.chars()
        .map(|ch| glyph_units(ch) * ch.len_utf16() as u32)
        .sum()
}

/// Bucketed width estimate standing in for real font metrics (Verdana-like, 12px).
///
/// The result only depends on the text and the requested font size, which keeps badge layout
/// byte-stable across platforms and font installations.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlyphTableTextMeasurer;

impl TextMeasurer for GlyphTableTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let font_size = if style.font_size.is_finite() && style.font_size > 0.0 {
            style.font_size
        } else {
            GLYPH_TABLE_FONT_SIZE
        };
        let units = f64::from(text_units(text));
        let width = if font_size == GLYPH_TABLE_FONT_SIZE {
            units
        } else {
            units * font_size / GLYPH_TABLE_FONT_SIZE
        };
        TextMetrics {
            width,
            height: font_size,
            line_count: 1,
        }
    }
}
