//! Text measurement service for label placement.

use bevy::prelude::*;

/// Measures the rendered extent of a label string.
///
/// Placement only needs width and height, so hosts with access to real font
/// metrics can supply them; the default is a per-glyph approximation.
pub trait TextMetrics {
    /// Returns `(width, height)` of `text` at `font_size`.
    fn measure(&self, text: &str, font_size: f32) -> Vec2;
}

/// Fixed-advance approximation of the label font.
///
/// Index labels are short digit runs, so a constant advance per glyph stays
/// within a pixel or two of the real extent at overlay font sizes.
#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct MonospaceMetrics {
    /// Glyph advance as a fraction of the font size.
    pub advance: f32,
    /// Glyph height as a fraction of the font size.
    pub height: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            height: 0.75,
        }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(&self, text: &str, font_size: f32) -> Vec2 {
        Vec2::new(
            text.chars().count() as f32 * self.advance * font_size,
            self.height * font_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_scales_with_glyph_count() {
        let metrics = MonospaceMetrics::default();
        let one = metrics.measure("7", 10.0);
        let three = metrics.measure("127", 10.0);
        assert_eq!(three.x, one.x * 3.0);
        assert_eq!(three.y, one.y);
    }

    #[test]
    fn empty_text_has_zero_width() {
        let metrics = MonospaceMetrics::default();
        assert_eq!(metrics.measure("", 12.0).x, 0.0);
    }
}
