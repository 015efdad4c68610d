use bevy::prelude::*;

#[derive(Component, Reflect)]
#[reflect(Component)]
pub struct MainCamera;

/// Eases the camera toward a target position while keeping it aimed at a look-at point.
#[derive(Component)]
pub struct CameraLerp {
    pub target_position: Vec3,
    pub target_look_at: Vec3,
    pub current_look_at: Vec3,
    pub lerp_speed: f32,
    pub is_lerping: bool,
}
