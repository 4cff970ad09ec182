//! Projection of label anchors into drawable 2D coordinates.

use bevy::prelude::*;

/// Projects a world-space point onto the camera's viewport.
///
/// Returns `None` when the point cannot be projected (behind the camera or
/// outside the visible region). That is a normal per-frame outcome: the
/// caller omits the label for this frame, nothing is retried or logged.
pub fn project_to_viewport(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    world: Vec3,
) -> Option<Vec2> {
    camera.world_to_viewport(camera_transform, world).ok()
}

/// Mapping from UV coordinates to the UV editor's 2D region coordinates.
///
/// Lives on the UV editor camera entity; the host updates `origin` and
/// `scale` as the editor view pans and zooms.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct UvViewTransform {
    /// Region position of UV `(0, 0)`.
    pub origin: Vec2,
    /// Region pixels per UV unit, per axis.
    pub scale: Vec2,
}

impl Default for UvViewTransform {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            scale: Vec2::splat(256.0),
        }
    }
}

impl UvViewTransform {
    pub fn uv_to_region(&self, uv: Vec2) -> Vec2 { self.origin + uv * self.scale }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uv_to_region_applies_origin_and_scale() {
        let view = UvViewTransform {
            origin: Vec2::new(100.0, 50.0),
            scale: Vec2::new(512.0, 512.0),
        };
        assert_eq!(view.uv_to_region(Vec2::ZERO), Vec2::new(100.0, 50.0));
        assert_eq!(view.uv_to_region(Vec2::new(0.5, 1.0)), Vec2::new(356.0, 562.0));
    }

    #[test]
    fn uv_to_region_supports_anisotropic_scale() {
        let view = UvViewTransform {
            origin: Vec2::ZERO,
            scale: Vec2::new(200.0, 100.0),
        };
        assert_eq!(view.uv_to_region(Vec2::ONE), Vec2::new(200.0, 100.0));
    }
}
