//! Read-only overlay configuration resources.

use bevy::prelude::*;

/// Configuration for 3D viewport index labels.
#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct IndexOverlayConfig {
    pub box_color: Color,
    pub text_color: Color,
    /// Text size in points, clamped to 10..=100 when read.
    pub font_size: u32,
}

impl Default for IndexOverlayConfig {
    fn default() -> Self {
        Self {
            box_color: Color::srgba(0.0, 0.0, 0.0, 1.0),
            text_color: Color::srgba(1.0, 1.0, 1.0, 1.0),
            font_size: 13,
        }
    }
}

impl IndexOverlayConfig {
    pub fn font_size(&self) -> f32 { self.font_size.clamp(10, 100) as f32 }
}

/// Configuration for UV editor index labels: which element kinds to show,
/// and how selection filtering behaves.
#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct UvIndexConfig {
    pub verts: bool,
    pub edges: bool,
    pub faces: bool,
    pub loops: bool,
    /// Text size in points, clamped to 8..=32 when read.
    pub font_size: u32,
    /// When set, labels follow the mesh selection instead of the UV
    /// selection (the editor's select-sync mode). Loop labels are not drawn
    /// in sync mode, since loops have no mesh-side selection of their own.
    pub select_sync: bool,
}

impl Default for UvIndexConfig {
    fn default() -> Self {
        Self {
            verts: false,
            edges: false,
            faces: false,
            loops: false,
            font_size: 11,
            select_sync: false,
        }
    }
}

impl UvIndexConfig {
    pub fn font_size(&self) -> f32 { self.font_size.clamp(8, 32) as f32 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_sizes_are_clamped() {
        let mut config = IndexOverlayConfig::default();
        config.font_size = 3;
        assert_eq!(config.font_size(), 10.0);
        config.font_size = 500;
        assert_eq!(config.font_size(), 100.0);

        let mut uv = UvIndexConfig::default();
        uv.font_size = 1;
        assert_eq!(uv.font_size(), 8.0);
        uv.font_size = 64;
        assert_eq!(uv.font_size(), 32.0);
    }
}
