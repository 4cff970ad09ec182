//! Tangent-frame label placement along UV edges and rotated backdrop boxes.
//!
//! Edge and loop labels follow the direction of the edge they annotate. The
//! frame derived here carries the edge midpoint, unit tangent and normal, and
//! the signed angle of the tangent; `TangentFrame::place` turns that into an
//! anchor point and an upright text rotation.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;

/// Padding factor applied to backdrop boxes around rotated labels.
pub const BACKDROP_PADDING: f32 = 0.6;

/// Signed angle from `a` to `b`, counter-clockwise positive, in `(-pi, pi]`.
pub fn signed_angle(a: Vec2, b: Vec2) -> f32 { a.perp_dot(b).atan2(a.dot(b)) }

/// Anchor point and text rotation chosen for one label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Bottom-left text origin before rotation is applied.
    pub anchor: Vec2,
    /// Text rotation in radians, always within `(-pi/2, pi/2]`.
    pub rotation: f32,
}

/// Per-edge frame for orienting a label along a directed edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentFrame {
    pub midpoint: Vec2,
    pub tangent: Vec2,
    pub normal: Vec2,
    /// Signed angle of the tangent against `(1, 0)`.
    pub angle: f32,
}

impl TangentFrame {
    /// Builds the frame for the directed edge `uv_start -> uv_end`.
    ///
    /// A zero-length edge falls back to the `(1, 0)` tangent rather than
    /// failing; the label then renders as if the edge ran along +x.
    pub fn from_edge(uv_start: Vec2, uv_end: Vec2) -> Self {
        let midpoint = (uv_start + uv_end) / 2.0;
        let raw = uv_end - uv_start;
        let tangent = if raw.length() == 0.0 { Vec2::X } else { raw / raw.length() };
        // Left-hand perpendicular, so label sidedness is deterministic
        let normal = Vec2::new(-tangent.y, tangent.x);
        let angle = signed_angle(Vec2::X, tangent);

        Self {
            midpoint,
            tangent,
            normal,
            angle,
        }
    }

    /// Places a label of measured `text_size` on this frame, anchored at the
    /// frame's own midpoint. See [`TangentFrame::place_at`].
    pub fn place(&self, text_size: Vec2, extra_normal_offset: f32) -> Placement {
        self.place_at(self.midpoint, text_size, extra_normal_offset)
    }

    /// Places a label of measured `text_size` relative to `at` (the frame
    /// midpoint mapped into the target drawing space).
    ///
    /// The rotation is the tangent heading wrapped into `(-pi/2, pi/2]` so
    /// the baseline follows the edge without ever rendering upside-down, and
    /// the anchor is derived from that final rotation so the glyph box stays
    /// centered on `at`. A label turned by half a turn about its center
    /// covers the same glyph box, so the wrap handles both edge windings;
    /// anchor and rotation always move as one pair.
    ///
    /// `extra_normal_offset` shifts the anchor further along the normal in
    /// units of text height; it separates loop labels from edge labels that
    /// share an edge.
    pub fn place_at(&self, at: Vec2, text_size: Vec2, extra_normal_offset: f32) -> Placement {
        let rotation = wrap_upright(self.angle);
        let anchor = at - Vec2::from_angle(rotation).rotate(text_size / 2.0)
            + extra_normal_offset * text_size.y * self.normal;

        Placement { anchor, rotation }
    }
}

/// Wraps an angle into `(-pi/2, pi/2]` by half-turn steps.
fn wrap_upright(mut angle: f32) -> f32 {
    while angle <= -FRAC_PI_2 {
        angle += PI;
    }
    while angle > FRAC_PI_2 {
        angle -= PI;
    }
    angle
}

/// Builds the backdrop quad behind a label anchored at `anchor`.
///
/// The box pads the text by one glyph width horizontally and by
/// `padding * text_h` vertically, then rotates about the anchor by `angle`
/// so it stays aligned with rotated text. Corners wind counter-clockwise.
/// Degenerate text sizes produce a degenerate but harmless quad.
pub fn backdrop_box(
    anchor: Vec2,
    text_w: f32,
    text_h: f32,
    glyph_count: usize,
    padding: f32,
    angle: f32,
) -> [Vec2; 4] {
    let glyph_w = if glyph_count == 0 { 0.0 } else { text_w / glyph_count as f32 };

    let x1 = anchor.x - glyph_w / 2.0;
    let y1 = anchor.y - text_h / 2.0 * padding;
    let x2 = x1 + text_w + glyph_w;
    let y2 = y1 + text_h * (1.0 + padding);

    let mut corners = [
        Vec2::new(x1, y1),
        Vec2::new(x1, y2),
        Vec2::new(x2, y2),
        Vec2::new(x2, y1),
    ];

    if angle != 0.0 {
        let rot = Vec2::from_angle(angle);
        for corner in &mut corners {
            *corner = anchor + rot.rotate(*corner - anchor);
        }
    }

    corners
}
