// bevy_index_overlay
// Overlay library for editable meshes providing:
// - Vertex/edge/face index labels in the 3D viewport
// - Vertex/edge/face/loop index labels in a 2D UV editor view
// - Screen-space placement: canvas sizing, tangent frames, backdrop boxes

use bevy::prelude::*;

mod canvas;
mod config;
mod mesh;
mod metrics;
mod place;
pub mod prelude;
mod project;
mod uv;
mod viewport;

// Public API - Core geometry
pub use canvas::Canvas;
pub use canvas::get_canvas;
pub use place::BACKDROP_PADDING;
pub use place::Placement;
pub use place::TangentFrame;
pub use place::backdrop_box;
pub use place::signed_angle;

// Public API - Mesh snapshot types and selector
pub use mesh::EditMesh;
pub use mesh::ElementKind;
pub use mesh::IndexedElement;
pub use mesh::LabelKey;
pub use mesh::MeshEdge;
pub use mesh::MeshFace;
pub use mesh::MeshLoop;
pub use mesh::MeshVertex;
pub use mesh::SelectMode;
pub use mesh::selected_positions;

// Public API - Projection
pub use project::UvViewTransform;
pub use project::project_to_viewport;

// Public API - Text measurement
pub use metrics::MonospaceMetrics;
pub use metrics::TextMetrics;

// Public API - Configuration resources
pub use config::IndexOverlayConfig;
pub use config::UvIndexConfig;

// Public API - Overlay state and camera markers
pub use uv::UvEditorCamera;
pub use uv::UvLabel;
pub use uv::UvOverlay;
pub use uv::uv_labels;
pub use viewport::IndexOverlayCamera;
pub use viewport::ViewportLabel;
pub use viewport::ViewportOverlay;
pub use viewport::viewport_labels;

// Internal - used by plugin, not for external use
use uv::{cleanup_uv_labels_when_stopped, draw_uv_indices};
use viewport::{cleanup_viewport_labels_when_stopped, draw_viewport_indices};

/// Plugin that adds all index overlay functionality
pub struct IndexOverlayPlugin;

impl Plugin for IndexOverlayPlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize resources
            .init_resource::<IndexOverlayConfig>()
            .init_resource::<UvIndexConfig>()
            .init_resource::<MonospaceMetrics>()
            .init_resource::<ViewportOverlay>()
            .init_resource::<UvOverlay>()
            // Register types for reflection-based tooling
            .register_type::<IndexOverlayConfig>()
            .register_type::<UvIndexConfig>()
            .register_type::<MonospaceMetrics>()
            .register_type::<ViewportOverlay>()
            .register_type::<UvOverlay>()
            .register_type::<EditMesh>()
            .register_type::<UvViewTransform>()
            .register_type::<IndexOverlayCamera>()
            .register_type::<UvEditorCamera>()
            // Add systems
            .add_systems(
                Update,
                (draw_viewport_indices, cleanup_viewport_labels_when_stopped).chain(),
            )
            .add_systems(
                Update,
                (draw_uv_indices, cleanup_uv_labels_when_stopped).chain(),
            );
    }
}
