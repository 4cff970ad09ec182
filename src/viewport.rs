//! Index labels over the 3D viewport.
//!
//! Every frame the selected elements of each [`EditMesh`] are projected
//! through the overlay camera and rendered as absolute-positioned UI nodes:
//! a backdrop-colored box sized by [`get_canvas`] with the index text inside.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use bevy::prelude::*;

use crate::canvas::{Canvas, get_canvas};
use crate::config::IndexOverlayConfig;
use crate::mesh::{EditMesh, LabelKey};
use crate::project::project_to_viewport;

/// Marks the camera whose viewport receives the 3D index labels.
#[derive(Component, Reflect, Debug, Default)]
#[reflect(Component)]
pub struct IndexOverlayCamera;

/// On/off state of the 3D viewport overlay. Systems are inert while stopped;
/// stopping despawns all live labels.
#[derive(Resource, Reflect, Debug, Default)]
#[reflect(Resource)]
pub struct ViewportOverlay {
    active: bool,
}

impl ViewportOverlay {
    pub fn start(&mut self) {
        if !self.active {
            info!("viewport index overlay started");
            self.active = true;
        }
    }

    pub fn stop(&mut self) {
        if self.active {
            info!("viewport index overlay stopped");
            self.active = false;
        }
    }

    pub fn toggle(&mut self) {
        if self.active { self.stop() } else { self.start() }
    }

    pub const fn is_running(&self) -> bool { self.active }
}

/// One viewport label, ready to draw.
#[derive(Debug, Clone)]
pub struct ViewportLabel {
    pub key: LabelKey,
    pub canvas: Canvas,
    pub text: String,
}

/// Computes the frame's viewport labels for one mesh.
///
/// `project` is the world-to-screen transform; elements it cannot project
/// are skipped for this frame.
pub fn viewport_labels(
    mesh: &EditMesh,
    world: &GlobalTransform,
    font_size: f32,
    mut project: impl FnMut(Vec3) -> Option<Vec2>,
) -> Vec<ViewportLabel> {
    let kind = mesh.select_mode.element_kind();
    mesh.viewport_positions(world)
        .into_iter()
        .filter_map(|(index, position)| {
            let screen = project(position)?;
            let text = index.to_string();
            let canvas = get_canvas(screen, text.chars().count(), font_size);
            Some(ViewportLabel {
                key: LabelKey { kind, index },
                canvas,
                text,
            })
        })
        .collect()
}

/// Component marking one viewport index label node. Keyed per source mesh:
/// two meshes may select the same element index without sharing a node.
#[derive(Component)]
pub(crate) struct ViewportIndexLabel {
    mesh: Entity,
    key: LabelKey,
}

type ViewportLabelQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static ViewportIndexLabel,
        &'static mut Node,
        &'static mut Text,
        &'static mut TextFont,
        &'static mut TextColor,
        &'static mut BackgroundColor,
    ),
>;

/// System that projects selected mesh elements and syncs their label nodes
pub(crate) fn draw_viewport_indices(
    mut commands: Commands,
    overlay: Res<ViewportOverlay>,
    config: Res<IndexOverlayConfig>,
    camera_query: Query<(&Camera, &GlobalTransform), With<IndexOverlayCamera>>,
    mesh_query: Query<(Entity, &EditMesh, &GlobalTransform), Without<IndexOverlayCamera>>,
    mut label_query: ViewportLabelQuery,
) {
    if !overlay.is_running() {
        return;
    }
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let existing: HashMap<(Entity, LabelKey), Entity> = label_query
        .iter()
        .map(|(entity, label, ..)| ((label.mesh, label.key), entity))
        .collect();
    let mut live: HashSet<(Entity, LabelKey)> = HashSet::new();

    for (mesh_entity, mesh, world) in &mesh_query {
        let labels = viewport_labels(mesh, world, config.font_size(), |position| {
            project_to_viewport(camera, camera_transform, position)
        });
        for label in labels {
            if label.canvas.is_degenerate() {
                continue;
            }
            live.insert((mesh_entity, label.key));
            match existing.get(&(mesh_entity, label.key)) {
                Some(&entity) => update_label(&mut label_query, entity, &label, &config),
                None => spawn_label(&mut commands, mesh_entity, &label, &config),
            }
        }
    }

    // Remove labels whose elements are deselected or off-screen this frame
    despawn_stale(&mut commands, existing, &live);
}

/// Despawns every tracked entity whose key was not re-emitted this frame.
pub(crate) fn despawn_stale<K: Eq + Hash>(
    commands: &mut Commands,
    existing: HashMap<K, Entity>,
    live: &HashSet<K>,
) {
    for (key, entity) in existing {
        if !live.contains(&key) {
            commands.entity(entity).despawn();
        }
    }
}

fn update_label(
    label_query: &mut ViewportLabelQuery,
    entity: Entity,
    label: &ViewportLabel,
    config: &IndexOverlayConfig,
) {
    let Ok((_, _, mut node, mut text, mut font, mut text_color, mut background)) =
        label_query.get_mut(entity)
    else {
        return;
    };
    node.left = Val::Px(label.canvas.x0 as f32);
    node.top = Val::Px(label.canvas.y0 as f32);
    node.width = Val::Px(label.canvas.width() as f32);
    node.height = Val::Px(label.canvas.height() as f32);
    **text = label.text.clone();
    font.font_size = config.font_size();
    text_color.0 = config.text_color;
    background.0 = config.box_color;
}

fn spawn_label(
    commands: &mut Commands,
    mesh: Entity,
    label: &ViewportLabel,
    config: &IndexOverlayConfig,
) {
    commands.spawn((
        Text::new(label.text.clone()),
        TextFont {
            font_size: config.font_size(),
            ..default()
        },
        TextColor(config.text_color),
        BackgroundColor(config.box_color),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(label.canvas.x0 as f32),
            top: Val::Px(label.canvas.y0 as f32),
            width: Val::Px(label.canvas.width() as f32),
            height: Val::Px(label.canvas.height() as f32),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        ViewportIndexLabel { mesh, key: label.key },
    ));
}

/// System that despawns all viewport labels once the overlay is stopped
pub(crate) fn cleanup_viewport_labels_when_stopped(
    mut commands: Commands,
    overlay: Res<ViewportOverlay>,
    label_query: Query<Entity, With<ViewportIndexLabel>>,
) {
    if overlay.is_running() || label_query.is_empty() {
        return;
    }
    for entity in &label_query {
        commands.entity(entity).despawn();
    }
}
