//! Editable-mesh snapshot types and the label selector.
//!
//! The host rebuilds an [`EditMesh`] from its live edit session whenever the
//! mesh or its selection changes; the overlay only reads it. Element ids
//! (`verts` of an edge, `loops` of a face, `vert`/`edge` of a loop) index
//! into the owning snapshot's arrays.

use bevy::prelude::*;

/// Kind of mesh element a label is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ElementKind {
    Vertex,
    Edge,
    Face,
    Loop,
}

/// Active selection mode of the edit session. Exactly one element kind is
/// labeled in the 3D viewport at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum SelectMode {
    #[default]
    Vertex,
    Edge,
    Face,
}

impl SelectMode {
    pub const fn element_kind(self) -> ElementKind {
        match self {
            Self::Vertex => ElementKind::Vertex,
            Self::Edge => ElementKind::Edge,
            Self::Face => ElementKind::Face,
        }
    }
}

/// Identity of one label: which element of which kind it annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct LabelKey {
    pub kind: ElementKind,
    pub index: u32,
}

#[derive(Debug, Clone, Reflect)]
pub struct MeshVertex {
    pub index: u32,
    pub select: bool,
    pub co: Vec3,
}

#[derive(Debug, Clone, Reflect)]
pub struct MeshEdge {
    pub index: u32,
    pub select: bool,
    pub verts: [u32; 2],
}

#[derive(Debug, Clone, Reflect)]
pub struct MeshFace {
    pub index: u32,
    pub select: bool,
    /// Loop ids in face winding order.
    pub loops: Vec<u32>,
}

/// A face corner: one vertex as used by one face, with its UV coordinate.
#[derive(Debug, Clone, Reflect)]
pub struct MeshLoop {
    pub index: u32,
    /// UV-space selection flag of this loop's UV vertex.
    pub select: bool,
    pub vert: u32,
    pub edge: u32,
    pub uv: Vec2,
}

/// An element that carries an index and a selection flag.
pub trait IndexedElement {
    fn index(&self) -> u32;
    fn is_selected(&self) -> bool;
}

macro_rules! impl_indexed_element {
    ($($ty:ty),*) => {
        $(impl IndexedElement for $ty {
            fn index(&self) -> u32 { self.index }
            fn is_selected(&self) -> bool { self.select }
        })*
    };
}

impl_indexed_element!(MeshVertex, MeshEdge, MeshFace, MeshLoop);

/// Lazily yields `(index, position)` for every selected element, in element
/// order. An empty selection yields an empty iterator.
pub fn selected_positions<'a, E: IndexedElement>(
    elements: &'a [E],
    position: impl Fn(&E) -> Vec3 + 'a,
) -> impl Iterator<Item = (u32, Vec3)> + 'a {
    elements
        .iter()
        .filter(|element| element.is_selected())
        .map(move |element| (element.index(), position(element)))
}

/// Snapshot of an editable mesh, attached to the entity whose
/// `GlobalTransform` is the mesh's world matrix.
#[derive(Component, Reflect, Debug, Default, Clone)]
#[reflect(Component)]
pub struct EditMesh {
    pub verts: Vec<MeshVertex>,
    pub edges: Vec<MeshEdge>,
    pub faces: Vec<MeshFace>,
    pub loops: Vec<MeshLoop>,
    pub select_mode: SelectMode,
}

impl EditMesh {
    pub fn vert(&self, id: u32) -> Option<&MeshVertex> { self.verts.get(id as usize) }

    pub fn edge(&self, id: u32) -> Option<&MeshEdge> { self.edges.get(id as usize) }

    pub fn loop_at(&self, id: u32) -> Option<&MeshLoop> { self.loops.get(id as usize) }

    /// The loop following `slot` in the face's winding, wrapping around.
    pub fn next_loop(&self, face: &MeshFace, slot: usize) -> Option<&MeshLoop> {
        if face.loops.is_empty() {
            return None;
        }
        let id = *face.loops.get((slot + 1) % face.loops.len())?;
        self.loop_at(id)
    }

    /// Arithmetic mean of the edge's two vertex coordinates.
    pub fn edge_midpoint(&self, edge: &MeshEdge) -> Vec3 {
        let [a, b] = edge.verts;
        let a = self.vert(a).map_or(Vec3::ZERO, |v| v.co);
        let b = self.vert(b).map_or(Vec3::ZERO, |v| v.co);
        (a + b) / 2.0
    }

    /// Arithmetic mean of the face's corner vertex coordinates.
    pub fn face_center(&self, face: &MeshFace) -> Vec3 {
        if face.loops.is_empty() {
            return Vec3::ZERO;
        }
        let sum: Vec3 = face
            .loops
            .iter()
            .filter_map(|&id| self.loop_at(id))
            .filter_map(|l| self.vert(l.vert))
            .map(|v| v.co)
            .sum();
        sum / face.loops.len() as f32
    }

    /// World-space representative positions of the selected elements of the
    /// active [`SelectMode`]: vertex coordinate, edge midpoint, or face
    /// centroid.
    pub fn viewport_positions(&self, world: &GlobalTransform) -> Vec<(u32, Vec3)> {
        let transform = |(index, co): (u32, Vec3)| (index, world.transform_point(co));
        match self.select_mode {
            SelectMode::Vertex => selected_positions(&self.verts, |v| v.co)
                .map(transform)
                .collect(),
            SelectMode::Edge => selected_positions(&self.edges, |e| self.edge_midpoint(e))
                .map(transform)
                .collect(),
            SelectMode::Face => selected_positions(&self.faces, |f| self.face_center(f))
                .map(transform)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangle_mesh() -> EditMesh {
        // Quad split along the diagonal, unit square in the xy plane.
        let co = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        EditMesh {
            verts: co
                .iter()
                .enumerate()
                .map(|(i, &co)| MeshVertex {
                    index: i as u32,
                    select: i % 2 == 0,
                    co,
                })
                .collect(),
            edges: vec![
                MeshEdge { index: 0, select: true, verts: [0, 1] },
                MeshEdge { index: 1, select: false, verts: [1, 2] },
                MeshEdge { index: 2, select: true, verts: [0, 2] },
            ],
            faces: vec![MeshFace {
                index: 0,
                select: true,
                loops: vec![0, 1, 2],
            }],
            loops: vec![
                MeshLoop { index: 0, select: true, vert: 0, edge: 0, uv: Vec2::ZERO },
                MeshLoop { index: 1, select: true, vert: 1, edge: 1, uv: Vec2::X },
                MeshLoop { index: 2, select: true, vert: 2, edge: 2, uv: Vec2::ONE },
            ],
            select_mode: SelectMode::Vertex,
        }
    }

    #[test]
    fn selector_keeps_element_order_and_skips_unselected() {
        let mesh = two_triangle_mesh();
        let picked: Vec<_> = selected_positions(&mesh.verts, |v| v.co).collect();
        assert_eq!(picked.len(), 2);
        assert_eq!(picked[0], (0, Vec3::ZERO));
        assert_eq!(picked[1], (2, Vec3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn empty_selection_yields_empty_iterator() {
        let mut mesh = two_triangle_mesh();
        for vert in &mut mesh.verts {
            vert.select = false;
        }
        assert_eq!(selected_positions(&mesh.verts, |v| v.co).count(), 0);
    }

    #[test]
    fn edge_midpoint_is_vertex_mean() {
        let mesh = two_triangle_mesh();
        let midpoint = mesh.edge_midpoint(&mesh.edges[0]);
        assert_eq!(midpoint, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn face_center_is_corner_mean() {
        let mesh = two_triangle_mesh();
        let center = mesh.face_center(&mesh.faces[0]);
        assert!((center - Vec3::new(2.0 / 3.0, 1.0 / 3.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn viewport_positions_dispatch_on_select_mode() {
        let mut mesh = two_triangle_mesh();
        let world = GlobalTransform::from(Transform::from_translation(Vec3::new(10.0, 0.0, 0.0)));

        mesh.select_mode = SelectMode::Vertex;
        let verts = mesh.viewport_positions(&world);
        assert_eq!(verts.len(), 2);
        assert_eq!(verts[0], (0, Vec3::new(10.0, 0.0, 0.0)));

        mesh.select_mode = SelectMode::Edge;
        let edges = mesh.viewport_positions(&world);
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0], (0, Vec3::new(10.5, 0.0, 0.0)));

        mesh.select_mode = SelectMode::Face;
        let faces = mesh.viewport_positions(&world);
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].0, 0);
    }

    #[test]
    fn next_loop_wraps_around_the_face() {
        let mesh = two_triangle_mesh();
        let face = &mesh.faces[0];
        assert_eq!(mesh.next_loop(face, 0).map(|l| l.index), Some(1));
        assert_eq!(mesh.next_loop(face, 2).map(|l| l.index), Some(0));
    }
}
