//! Canvas sizing for axis-aligned label backdrops in the 3D viewport.

use bevy::prelude::*;

/// Axis-aligned backdrop rectangle in screen pixels, `x0 <= x1` and
/// `y0 <= y1` whenever the requested text size is positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct Canvas {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Canvas {
    pub const fn width(&self) -> i32 { self.x1 - self.x0 }

    pub const fn height(&self) -> i32 { self.y1 - self.y0 }

    /// A degenerate canvas has nothing to draw; callers skip it.
    pub const fn is_degenerate(&self) -> bool { self.width() <= 0 || self.height() <= 0 }

    /// Corner quad in counter-clockwise winding, ready for a quad fill.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x0 as f32, self.y0 as f32),
            Vec2::new(self.x0 as f32, self.y1 as f32),
            Vec2::new(self.x1 as f32, self.y1 as f32),
            Vec2::new(self.x1 as f32, self.y0 as f32),
        ]
    }
}

/// Sizes the backdrop canvas for an index label centered on `pos`.
///
/// The text box is approximated from the glyph count rather than measured:
/// one `font_size` of advance per glyph and 1.5 of line height. Index
/// strings are short digit runs, so the approximation stays close.
/// Coordinates truncate toward zero onto pixel boundaries.
pub fn get_canvas(pos: Vec2, ch_count: usize, font_size: f32) -> Canvas {
    let width = ch_count as f32 * font_size * 1.0;
    let height = font_size * 1.5;

    Canvas {
        x0: (pos.x - width * 0.5) as i32,
        y0: (pos.y - height * 0.5) as i32,
        x1: (pos.x + width * 0.5) as i32,
        y1: (pos.y + height * 0.5) as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_is_centered_and_truncated() {
        let canvas = get_canvas(Vec2::new(100.0, 100.0), 3, 10.0);
        assert_eq!(
            canvas,
            Canvas {
                x0: 85,
                y0: 92,
                x1: 115,
                y1: 107,
            }
        );
        assert_eq!(canvas.width(), 30);
        assert_eq!(canvas.height(), 15);
    }

    #[test]
    fn canvas_translates_with_anchor() {
        // Integer-aligned offset so truncation does not interfere.
        let base = get_canvas(Vec2::new(100.0, 100.0), 3, 10.0);
        let moved = get_canvas(Vec2::new(107.0, 97.0), 3, 10.0);
        assert_eq!(moved.x0, base.x0 + 7);
        assert_eq!(moved.y0, base.y0 - 3);
        assert_eq!(moved.x1, base.x1 + 7);
        assert_eq!(moved.y1, base.y1 - 3);
    }

    #[test]
    fn zero_glyphs_yields_degenerate_canvas() {
        let canvas = get_canvas(Vec2::new(50.0, 50.0), 0, 10.0);
        assert!(canvas.is_degenerate());
        assert_eq!(canvas.width(), 0);
    }

    #[test]
    fn negative_font_size_yields_degenerate_canvas() {
        let canvas = get_canvas(Vec2::new(50.0, 50.0), 2, -4.0);
        assert!(canvas.is_degenerate());
    }

    #[test]
    fn corners_wind_counter_clockwise() {
        let canvas = get_canvas(Vec2::new(10.0, 10.0), 1, 8.0);
        let [a, b, c, d] = canvas.corners();
        assert_eq!(a, Vec2::new(canvas.x0 as f32, canvas.y0 as f32));
        assert_eq!(b, Vec2::new(canvas.x0 as f32, canvas.y1 as f32));
        assert_eq!(c, Vec2::new(canvas.x1 as f32, canvas.y1 as f32));
        assert_eq!(d, Vec2::new(canvas.x1 as f32, canvas.y0 as f32));
    }
}
