use crate::core::camera::components::{CameraLerp, MainCamera};
use crate::core::camera::logic::{LerpStep, lerp_step};
use crate::globe::events::SetCameraPositionEvent;
use bevy::light::DirectionalLight;
use bevy::log::info;
use bevy::math::{EulerRot, Quat, Vec3};
use bevy::prelude::*;
use std::f32::consts::PI;

const INITIAL_DISTANCE: f32 = 60.0;

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 0.0, INITIAL_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
        CameraLerp {
            target_position: Vec3::new(0.0, 0.0, INITIAL_DISTANCE),
            target_look_at: Vec3::ZERO,
            current_look_at: Vec3::ZERO,
            lerp_speed: 3.0,
            is_lerping: false,
        },
    ));

    commands.spawn((
        Transform::from_rotation(Quat::from_euler(EulerRot::ZYX, 0.0, 1.0, -PI / 4.)),
        DirectionalLight::default(),
    ));

    info!("Camera spawned");
}

pub fn smooth_camera_movement(
    time: Res<Time>,
    mut camera_query: Query<(&mut Transform, &mut CameraLerp), With<MainCamera>>,
) {
    let Ok((mut camera_transform, mut camera_lerp)) = camera_query.single_mut() else {
        return;
    };
    if !camera_lerp.is_lerping {
        return;
    }

    let step = lerp_step(
        LerpStep {
            position: camera_transform.translation,
            look_at: camera_lerp.current_look_at,
        },
        LerpStep {
            position: camera_lerp.target_position,
            look_at: camera_lerp.target_look_at,
        },
        camera_lerp.lerp_speed,
        time.delta_secs(),
    );

    camera_transform.translation = step.position;
    camera_lerp.current_look_at = step.look_at;
    camera_transform.look_at(camera_lerp.current_look_at, Vec3::Y);
    camera_lerp.is_lerping = !step.arrived;
}

pub fn handle_camera_position_events(
    mut events: MessageReader<SetCameraPositionEvent>,
    mut camera_query: Query<&mut CameraLerp, With<MainCamera>>,
) {
    for event in events.read() {
        if let Ok(mut camera_lerp) = camera_query.single_mut() {
            camera_lerp.target_position = event.position;
            camera_lerp.target_look_at = Vec3::ZERO;
            camera_lerp.is_lerping = true;
        }
    }
}
