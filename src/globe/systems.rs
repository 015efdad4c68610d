use crate::core::camera::components::{CameraLerp, MainCamera};
use crate::core::camera::logic::{drag_rotation, zoom_step};
use crate::globe::components::*;
use crate::globe::events::*;
use crate::globe::logic::{settings_from_config, step_level, zoom_range};
use crate::globe::resources::*;
use crate::helpers::mesh::tile_mesh;
use bevy::input::ButtonInput;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::picking::events::{Click, Pointer};
use bevy::picking::pointer::PointerButton;
use bevy::prelude::*;
use tilegen::mesh::BaseMesh;
use tilegen::mesh_data::{MeshData, vertex_colors};

pub fn request_initial_globe(mut events: MessageWriter<GenerateGlobeEvent>) {
    events.write(GenerateGlobeEvent);
}

pub fn spawn_globe_on_event(
    mut commands: Commands,
    mut camera_events: MessageWriter<SetCameraPositionEvent>,
    mut events: MessageReader<GenerateGlobeEvent>,
    mut current: ResMut<CurrentGlobe>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut settings: ResMut<GlobeSettings>,
    globe_entities: Query<(Entity, &GlobeControls), With<GlobeEntity>>,
) {
    // Several requests in one frame still build a single globe
    if events.read().count() == 0 {
        return;
    }

    match tilegen::reload_config() {
        Ok(()) => {
            let level = settings.subdivision_level;
            *settings = settings_from_config(&tilegen::get_config(), level);
        }
        Err(err) => warn!("Keeping previous tile generation config: {err}"),
    }

    // Keep the orientation across rebuilds
    let current_rotation = globe_entities
        .iter()
        .next()
        .map(|(_, controls)| controls.rotation)
        .unwrap_or(Quat::IDENTITY);
    for (entity, _) in globe_entities.iter() {
        commands.entity(entity).despawn();
    }

    let base_mesh = BaseMesh::icosphere(settings.radius, settings.icosphere_refinements);
    let mut globe = tilegen::generate(base_mesh, &settings.generation_settings());
    let mesh_handle = meshes.add(tile_mesh(MeshData::from_globe(&globe)));
    // The mesh was just built from the atlas
    globe.atlas_mut().clear_dirty();

    let material_handle = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.9,
        ..default()
    });

    let (min_zoom, max_zoom) = zoom_range(settings.radius);
    let zoom = settings.radius * 3.0;

    commands
        .spawn((
            Transform::from_rotation(current_rotation),
            GlobalTransform::default(),
            Visibility::Visible,
            GlobeEntity,
            GlobeControls {
                rotation: current_rotation,
                zoom,
                min_zoom,
                max_zoom,
            },
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Mesh3d(mesh_handle),
                    MeshMaterial3d(material_handle),
                    Transform::default(),
                    TileMesh,
                ))
                .observe(on_tile_click);
        });

    info!(
        "Globe spawned: {} tiles at level {}",
        globe.total_tiles(),
        globe.level().get()
    );

    camera_events.write(SetCameraPositionEvent {
        position: Vec3::new(0.0, 0.0, zoom),
    });

    current.globe = Some(globe);
    current.highlighted.clear();
}

/// Resolves a primary click on the tile mesh into a tile id.
///
/// The hit point is brought back into globe space, where the base faces live.
pub fn on_tile_click(
    click: On<Pointer<Click>>,
    tile_meshes: Query<&GlobalTransform, With<TileMesh>>,
    current: Res<CurrentGlobe>,
    mut picked_events: MessageWriter<TilePickedEvent>,
) {
    if click.button != PointerButton::Primary {
        return;
    }
    let Some(world_hit) = click.hit.position else {
        return;
    };
    let Ok(transform) = tile_meshes.get(click.event().event_target()) else {
        return;
    };
    let Some(globe) = current.globe.as_ref() else {
        return;
    };

    let local_hit = transform.affine().inverse().transform_point3(world_hit);
    match globe.pick_point(local_hit) {
        Some(tile_id) => {
            if let Ok(tile) = globe.tile(tile_id) {
                info!(
                    "Picked tile {tile_id} (face {}, sub-tile {}, {:?}, elevation {:.3})",
                    tile.face, tile.sub_index, tile.biome, tile.elevation
                );
            }
            picked_events.write(TilePickedEvent { tile_id });
        }
        None => warn!("Click at {local_hit} did not resolve to a tile"),
    }
}

pub fn highlight_picked_tiles(
    mut events: MessageReader<TilePickedEvent>,
    mut current: ResMut<CurrentGlobe>,
    settings: Res<GlobeSettings>,
) {
    let CurrentGlobe { globe, highlighted } = &mut *current;
    let Some(globe) = globe.as_mut() else {
        events.clear();
        return;
    };

    for event in events.read() {
        match globe.set_tile_color(event.tile_id, settings.highlight_color) {
            Ok(()) => highlighted.push(event.tile_id),
            Err(err) => warn!("Could not highlight tile: {err}"),
        }
    }
}

pub fn reset_highlights_on_key(keyboard_input: Res<ButtonInput<KeyCode>>, mut current: ResMut<CurrentGlobe>) {
    if !keyboard_input.just_pressed(KeyCode::KeyR) {
        return;
    }
    let CurrentGlobe { globe, highlighted } = &mut *current;
    let Some(globe) = globe.as_mut() else {
        return;
    };

    for tile_id in highlighted.drain(..) {
        if let Err(err) = globe.reset_tile_color(tile_id) {
            warn!("Could not reset tile color: {err}");
        }
    }
    info!("Tile colors reset");
}

pub fn change_level_on_keys(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<GlobeSettings>,
    mut events: MessageWriter<GenerateGlobeEvent>,
) {
    let mut delta = 0;
    if keyboard_input.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]) {
        delta += 1;
    }
    if keyboard_input.any_just_pressed([KeyCode::Minus, KeyCode::NumpadSubtract]) {
        delta -= 1;
    }
    if delta == 0 {
        return;
    }

    let level = step_level(settings.subdivision_level, delta);
    if level != settings.subdivision_level {
        settings.subdivision_level = level;
        info!("Subdivision level set to {level}");
        events.write(GenerateGlobeEvent);
    }
}

/// Right-drag rotates the globe, the wheel moves the camera in and out.
pub fn globe_control(
    mouse_input: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mut globe_query: Query<(&mut Transform, &mut GlobeControls), With<GlobeEntity>>,
    mut camera_query: Query<&mut CameraLerp, With<MainCamera>>,
) {
    let drag: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    let wheel: f32 = mouse_wheel.read().map(|wheel| wheel.y).sum();

    let Ok((mut globe_transform, mut controls)) = globe_query.single_mut() else {
        return;
    };

    if mouse_input.pressed(MouseButton::Right) && drag != Vec2::ZERO {
        controls.rotation = drag_rotation(controls.rotation, drag, controls.zoom);
        globe_transform.rotation = controls.rotation;
    }

    if wheel != 0.0 {
        controls.zoom = zoom_step(controls.zoom, wheel, controls.min_zoom, controls.max_zoom);
        if let Ok(mut camera_lerp) = camera_query.single_mut() {
            camera_lerp.target_position = Vec3::new(0.0, 0.0, controls.zoom);
            camera_lerp.is_lerping = true;
        }
    }
}

/// Re-uploads per-vertex tile colors whenever the atlas changed.
pub fn sync_atlas_colors(
    mut current: ResMut<CurrentGlobe>,
    tile_meshes: Query<&Mesh3d, With<TileMesh>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let Some(globe) = current.globe.as_mut() else {
        return;
    };
    if !globe.atlas().is_dirty() {
        return;
    }

    let colors = vertex_colors(globe.atlas(), globe.tiles().len());
    for mesh_handle in tile_meshes.iter() {
        let Some(mesh) = meshes.get_mut(&mesh_handle.0) else {
            continue;
        };
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors.clone());
    }
    globe.atlas_mut().clear_dirty();
}
