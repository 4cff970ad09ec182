//! Index labels over the 2D UV editor.
//!
//! Labels are walked face by face, loop by loop, the way the edit session
//! stores them: vertex labels sit at the loop's UV, edge and loop labels
//! follow the directed edge to the next loop via a [`TangentFrame`], and
//! face labels sit at the UV centroid. Vertex and edge labels get a
//! translucent backdrop quad; loop and face labels render text only.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;

use crate::config::UvIndexConfig;
use crate::mesh::{EditMesh, ElementKind, LabelKey};
use crate::metrics::{MonospaceMetrics, TextMetrics};
use crate::place::{BACKDROP_PADDING, TangentFrame, backdrop_box};
use crate::project::UvViewTransform;
use crate::viewport::despawn_stale;

const UV_TEXT_COLOR: Color = Color::WHITE;
const UV_BACKDROP_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.3);

// Loop labels shift one text height along the normal, half more when edge
// labels occupy the near side of the same edge.
const LOOP_OFFSET: f32 = 1.0;
const LOOP_OFFSET_PAST_EDGES: f32 = 1.5;

const BACKDROP_Z: f32 = 0.9;
const LABEL_Z: f32 = 1.0;

/// Marks the 2D camera rendering the UV editor region.
#[derive(Component, Reflect, Debug, Default)]
#[reflect(Component)]
pub struct UvEditorCamera;

/// On/off state of the UV editor overlay. Systems are inert while stopped;
/// stopping despawns all live labels.
#[derive(Resource, Reflect, Debug, Default)]
#[reflect(Resource)]
pub struct UvOverlay {
    active: bool,
}

impl UvOverlay {
    pub fn start(&mut self) {
        if !self.active {
            info!("uv index overlay started");
            self.active = true;
        }
    }

    pub fn stop(&mut self) {
        if self.active {
            info!("uv index overlay stopped");
            self.active = false;
        }
    }

    pub fn toggle(&mut self) {
        if self.active { self.stop() } else { self.start() }
    }

    pub const fn is_running(&self) -> bool { self.active }
}

/// One UV editor label, ready to draw.
///
/// Labels are emitted per face corner, so a vertex or edge shared by several
/// faces yields one label per incident loop (distinct anchors across UV
/// seams). `corner` disambiguates them; `(key, corner)` is unique per frame.
#[derive(Debug, Clone)]
pub struct UvLabel {
    pub key: LabelKey,
    /// Loop id the label was emitted from; face labels carry the face id.
    pub corner: u32,
    pub text: String,
    /// Measured text extent at the configured font size.
    pub size: Vec2,
    /// Bottom-left text origin in region coordinates.
    pub anchor: Vec2,
    /// Text rotation in radians, within `(-pi/2, pi/2]`.
    pub rotation: f32,
    /// Backdrop quad corners, present for vertex and edge labels.
    pub backdrop: Option<[Vec2; 4]>,
}

/// Computes the frame's UV editor labels for one mesh.
///
/// In select-sync mode the mesh selection drives visibility; otherwise the
/// UV selection of each loop does. Faces deselected under the active rule
/// contribute nothing.
pub fn uv_labels<M: TextMetrics>(
    mesh: &EditMesh,
    view: &UvViewTransform,
    config: &UvIndexConfig,
    metrics: &M,
) -> Vec<UvLabel> {
    let font_size = config.font_size();
    let sync = config.select_sync;
    let mut labels = Vec::new();

    for face in &mesh.faces {
        if !face.select && !sync {
            continue;
        }

        let mut uv_center = Vec2::ZERO;
        let mut selected_loops = 0usize;

        for (slot, &loop_id) in face.loops.iter().enumerate() {
            let Some(loop1) = mesh.loop_at(loop_id) else {
                continue;
            };
            uv_center += loop1.uv;
            if !loop1.select && !sync {
                continue;
            }
            selected_loops += 1;

            if config.verts {
                let Some(vert) = mesh.vert(loop1.vert) else {
                    continue;
                };
                if sync && !vert.select {
                    continue;
                }
                labels.push(placed_label(
                    LabelKey { kind: ElementKind::Vertex, index: vert.index },
                    loop1.index,
                    &TangentFrame::from_edge(Vec2::ZERO, Vec2::ZERO),
                    view.uv_to_region(loop1.uv),
                    0.0,
                    font_size,
                    metrics,
                    true,
                ));
            }

            let Some(loop2) = mesh.next_loop(face, slot) else {
                continue;
            };
            if loop2.index == loop1.index {
                continue;
            }
            let frame = TangentFrame::from_edge(loop1.uv, loop2.uv);
            let at = view.uv_to_region(frame.midpoint);

            if config.edges {
                let edge_visible = if sync {
                    mesh.vert(loop2.vert).is_some_and(|v| v.select)
                        && mesh.edge(loop1.edge).is_some_and(|e| e.select)
                } else {
                    loop2.select
                };
                if edge_visible {
                    if let Some(edge) = mesh.edge(loop1.edge) {
                        labels.push(placed_label(
                            LabelKey { kind: ElementKind::Edge, index: edge.index },
                            loop1.index,
                            &frame,
                            at,
                            0.0,
                            font_size,
                            metrics,
                            true,
                        ));
                    }
                }
            }

            if config.loops && !sync {
                let extra = if config.edges { LOOP_OFFSET_PAST_EDGES } else { LOOP_OFFSET };
                labels.push(placed_label(
                    LabelKey { kind: ElementKind::Loop, index: loop1.index },
                    loop1.index,
                    &frame,
                    at,
                    extra,
                    font_size,
                    metrics,
                    false,
                ));
            }
        }

        if config.faces
            && !face.loops.is_empty()
            && ((!sync && selected_loops > 0) || (sync && face.select))
        {
            let centroid = uv_center / face.loops.len() as f32;
            labels.push(placed_label(
                LabelKey { kind: ElementKind::Face, index: face.index },
                face.index,
                &TangentFrame::from_edge(Vec2::ZERO, Vec2::ZERO),
                view.uv_to_region(centroid),
                0.0,
                font_size,
                metrics,
                false,
            ));
        }
    }

    labels
}

fn placed_label<M: TextMetrics>(
    key: LabelKey,
    corner: u32,
    frame: &TangentFrame,
    at: Vec2,
    extra_normal_offset: f32,
    font_size: f32,
    metrics: &M,
    with_backdrop: bool,
) -> UvLabel {
    let text = key.index.to_string();
    let size = metrics.measure(&text, font_size);
    let placement = frame.place_at(at, size, extra_normal_offset);
    let backdrop = with_backdrop.then(|| {
        backdrop_box(
            placement.anchor,
            size.x,
            size.y,
            text.chars().count(),
            BACKDROP_PADDING,
            placement.rotation,
        )
    });

    UvLabel {
        key,
        corner,
        text,
        size,
        anchor: placement.anchor,
        rotation: placement.rotation,
        backdrop,
    }
}

/// Per-frame identity of one drawn UV label: which mesh, which element,
/// which face corner.
type UvLabelId = (Entity, LabelKey, u32);

/// Component marking one UV index label entity
#[derive(Component)]
pub(crate) struct UvIndexLabel {
    mesh: Entity,
    key: LabelKey,
    corner: u32,
}

/// Component marking one UV backdrop quad entity
#[derive(Component)]
pub(crate) struct UvIndexBackdrop {
    mesh: Entity,
    key: LabelKey,
    corner: u32,
}

type UvLabelQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static UvIndexLabel,
        &'static mut Transform,
        &'static mut Text2d,
        &'static mut TextFont,
    ),
    Without<UvIndexBackdrop>,
>;

type UvBackdropQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static UvIndexBackdrop,
        &'static mut Transform,
        &'static mut Sprite,
    ),
    Without<UvIndexLabel>,
>;

/// System that walks UV faces and syncs label and backdrop entities
pub(crate) fn draw_uv_indices(
    mut commands: Commands,
    overlay: Res<UvOverlay>,
    config: Res<UvIndexConfig>,
    metrics: Res<MonospaceMetrics>,
    view_query: Query<&UvViewTransform, With<UvEditorCamera>>,
    mesh_query: Query<(Entity, &EditMesh)>,
    mut label_query: UvLabelQuery,
    mut backdrop_query: UvBackdropQuery,
) {
    if !overlay.is_running() {
        return;
    }
    let Ok(view) = view_query.single() else {
        return;
    };

    let existing_labels: HashMap<UvLabelId, Entity> = label_query
        .iter()
        .map(|(entity, label, ..)| ((label.mesh, label.key, label.corner), entity))
        .collect();
    let existing_backdrops: HashMap<UvLabelId, Entity> = backdrop_query
        .iter()
        .map(|(entity, backdrop, ..)| ((backdrop.mesh, backdrop.key, backdrop.corner), entity))
        .collect();
    let mut live: HashSet<UvLabelId> = HashSet::new();

    for (mesh_entity, mesh) in &mesh_query {
        for label in uv_labels(mesh, view, &config, metrics.as_ref()) {
            let id = (mesh_entity, label.key, label.corner);
            live.insert(id);
            match existing_labels.get(&id) {
                Some(&entity) => update_label(&mut label_query, entity, &label, &config),
                None => spawn_label(&mut commands, mesh_entity, &label, &config),
            }
            if let Some(corners) = &label.backdrop {
                let (transform, size) = backdrop_transform(corners, label.rotation);
                match existing_backdrops.get(&id) {
                    Some(&entity) => update_backdrop(&mut backdrop_query, entity, transform, size),
                    None => spawn_backdrop(&mut commands, mesh_entity, &label, transform, size),
                }
            }
        }
    }

    despawn_stale(&mut commands, existing_labels, &live);
    despawn_stale(&mut commands, existing_backdrops, &live);
}

/// Text2d is center-anchored; shift from the bottom-left anchor by half the
/// rotated text extent.
fn label_transform(label: &UvLabel) -> Transform {
    let rot = Vec2::from_angle(label.rotation);
    let center = label.anchor + rot.rotate(label.size / 2.0);
    Transform {
        translation: center.extend(LABEL_Z),
        rotation: Quat::from_rotation_z(label.rotation),
        ..default()
    }
}

fn backdrop_transform(corners: &[Vec2; 4], rotation: f32) -> (Transform, Vec2) {
    let center = (corners[0] + corners[2]) / 2.0;
    let size = Vec2::new(
        (corners[3] - corners[0]).length(),
        (corners[1] - corners[0]).length(),
    );
    let transform = Transform {
        translation: center.extend(BACKDROP_Z),
        rotation: Quat::from_rotation_z(rotation),
        ..default()
    };
    (transform, size)
}

fn update_label(
    label_query: &mut UvLabelQuery,
    entity: Entity,
    label: &UvLabel,
    config: &UvIndexConfig,
) {
    let Ok((_, _, mut transform, mut text, mut font)) = label_query.get_mut(entity) else {
        return;
    };
    *transform = label_transform(label);
    **text = label.text.clone();
    font.font_size = config.font_size();
}

fn spawn_label(commands: &mut Commands, mesh: Entity, label: &UvLabel, config: &UvIndexConfig) {
    commands.spawn((
        Text2d::new(label.text.clone()),
        TextFont {
            font_size: config.font_size(),
            ..default()
        },
        TextColor(UV_TEXT_COLOR),
        label_transform(label),
        UvIndexLabel { mesh, key: label.key, corner: label.corner },
    ));
}

fn update_backdrop(
    backdrop_query: &mut UvBackdropQuery,
    entity: Entity,
    transform: Transform,
    size: Vec2,
) {
    let Ok((_, _, mut existing_transform, mut sprite)) = backdrop_query.get_mut(entity) else {
        return;
    };
    *existing_transform = transform;
    sprite.custom_size = Some(size);
}

fn spawn_backdrop(
    commands: &mut Commands,
    mesh: Entity,
    label: &UvLabel,
    transform: Transform,
    size: Vec2,
) {
    commands.spawn((
        Sprite {
            color: UV_BACKDROP_COLOR,
            custom_size: Some(size),
            ..default()
        },
        transform,
        UvIndexBackdrop { mesh, key: label.key, corner: label.corner },
    ));
}

/// System that despawns all UV labels once the overlay is stopped
pub(crate) fn cleanup_uv_labels_when_stopped(
    mut commands: Commands,
    overlay: Res<UvOverlay>,
    label_query: Query<Entity, With<UvIndexLabel>>,
    backdrop_query: Query<Entity, With<UvIndexBackdrop>>,
) {
    if overlay.is_running() || (label_query.is_empty() && backdrop_query.is_empty()) {
        return;
    }
    for entity in label_query.iter().chain(backdrop_query.iter()) {
        commands.entity(entity).despawn();
    }
}
