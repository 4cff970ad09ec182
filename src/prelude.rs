//! Convenient re-exports for common types and traits

pub use crate::IndexOverlayPlugin;
pub use crate::canvas::Canvas;
pub use crate::canvas::get_canvas;
pub use crate::config::IndexOverlayConfig;
pub use crate::config::UvIndexConfig;
pub use crate::mesh::EditMesh;
pub use crate::mesh::ElementKind;
pub use crate::mesh::LabelKey;
pub use crate::mesh::SelectMode;
pub use crate::metrics::MonospaceMetrics;
pub use crate::metrics::TextMetrics;
pub use crate::place::TangentFrame;
pub use crate::place::backdrop_box;
pub use crate::project::UvViewTransform;
pub use crate::project::project_to_viewport;
pub use crate::uv::UvEditorCamera;
pub use crate::uv::UvOverlay;
pub use crate::viewport::IndexOverlayCamera;
pub use crate::viewport::ViewportOverlay;
