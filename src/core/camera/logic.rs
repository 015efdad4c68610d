use bevy::math::{Quat, Vec2, Vec3};

const ARRIVAL_DISTANCE: f32 = 0.001;
const DRAG_SENSITIVITY: f32 = 0.002;
const REFERENCE_ZOOM: f32 = 60.0;
const ZOOM_PER_WHEEL_STEP: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LerpStep {
    pub position: Vec3,
    pub look_at: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LerpOutcome {
    pub position: Vec3,
    pub look_at: Vec3,
    pub arrived: bool,
}

/// Moves position and look-at toward their targets by `speed * delta_time`
/// (capped at 1), snapping onto the target once both are within reach.
pub fn lerp_step(current: LerpStep, target: LerpStep, speed: f32, delta_time: f32) -> LerpOutcome {
    let factor = (speed * delta_time).min(1.0);
    let position = current.position.lerp(target.position, factor);
    let look_at = current.look_at.lerp(target.look_at, factor);

    if position.distance(target.position) < ARRIVAL_DISTANCE
        && look_at.distance(target.look_at) < ARRIVAL_DISTANCE
    {
        return LerpOutcome {
            position: target.position,
            look_at: target.look_at,
            arrived: true,
        };
    }

    LerpOutcome {
        position,
        look_at,
        arrived: false,
    }
}

/// New camera distance after `wheel_delta` scroll steps, kept within `[min_zoom, max_zoom]`.
pub fn zoom_step(zoom: f32, wheel_delta: f32, min_zoom: f32, max_zoom: f32) -> f32 {
    (zoom - wheel_delta * ZOOM_PER_WHEEL_STEP).clamp(min_zoom, max_zoom)
}

/// Globe orientation after dragging by `mouse_delta` pixels.
///
/// Horizontal drag spins around the world Y axis, vertical drag tilts around
/// world X; both slow down as the camera closes in.
pub fn drag_rotation(rotation: Quat, mouse_delta: Vec2, zoom: f32) -> Quat {
    if mouse_delta == Vec2::ZERO {
        return rotation;
    }
    let sensitivity = DRAG_SENSITIVITY * (zoom / REFERENCE_ZOOM);
    let yaw = Quat::from_rotation_y(mouse_delta.x * sensitivity);
    let pitch = Quat::from_rotation_x(mouse_delta.y * sensitivity);
    (yaw * pitch * rotation).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at(position: Vec3) -> LerpStep {
        LerpStep {
            position,
            look_at: Vec3::ZERO,
        }
    }

    #[rstest]
    #[case(60.0, 1.0, 58.0)] // Scroll in
    #[case(60.0, -1.0, 62.0)] // Scroll out
    #[case(60.0, 0.0, 60.0)] // No scroll
    #[case(31.0, 5.0, 30.0)] // Clamped at min
    #[case(99.0, -5.0, 100.0)] // Clamped at max
    fn test_zoom_step(#[case] zoom: f32, #[case] wheel: f32, #[case] expected: f32) {
        let result = zoom_step(zoom, wheel, 30.0, 100.0);
        assert!((result - expected).abs() < 1e-5, "zoom was {result}, expected {expected}");
    }

    #[test]
    fn test_no_drag_no_rotation() {
        let rotation = Quat::from_rotation_z(0.3);
        assert_eq!(drag_rotation(rotation, Vec2::ZERO, 60.0), rotation);
    }

    #[rstest]
    #[case(Vec2::new(100.0, 0.0), Vec3::Y)]
    #[case(Vec2::new(0.0, 100.0), Vec3::X)]
    fn test_drag_rotates_around_world_axis(#[case] delta: Vec2, #[case] axis: Vec3) {
        let rotation = drag_rotation(Quat::IDENTITY, delta, 60.0);
        let (rotation_axis, angle) = rotation.to_axis_angle();
        assert!((angle - 0.2).abs() < 1e-4, "angle was {angle}");
        assert!(rotation_axis.abs_diff_eq(axis, 1e-4));
    }

    #[rstest]
    #[case(30.0, 0.1)]
    #[case(60.0, 0.2)]
    #[case(120.0, 0.4)]
    fn test_drag_sensitivity_scales_with_zoom(#[case] zoom: f32, #[case] expected_angle: f32) {
        let rotation = drag_rotation(Quat::IDENTITY, Vec2::new(100.0, 0.0), zoom);
        assert!((rotation.to_axis_angle().1 - expected_angle).abs() < 1e-4);
    }

    #[test]
    fn test_lerp_moves_toward_target() {
        let outcome = lerp_step(at(Vec3::ZERO), at(Vec3::new(0.0, 0.0, 10.0)), 3.0, 0.1);
        assert!((outcome.position.z - 3.0).abs() < 1e-5);
        assert!(!outcome.arrived);
    }

    #[rstest]
    #[case(3.0, 1.0)] // Factor capped at 1
    #[case(1.0, 1.0)]
    fn test_lerp_arrives_when_factor_saturates(#[case] speed: f32, #[case] delta_time: f32) {
        let target = at(Vec3::new(5.0, 0.0, 40.0));
        let outcome = lerp_step(at(Vec3::ZERO), target, speed, delta_time);
        assert!(outcome.arrived);
        assert_eq!(outcome.position, target.position);
    }

    #[test]
    fn test_lerp_snaps_within_arrival_distance() {
        let target = at(Vec3::new(0.0, 0.0, 10.0));
        let outcome = lerp_step(at(Vec3::new(0.0, 0.0, 10.0005)), target, 3.0, 0.016);
        assert!(outcome.arrived);
        assert_eq!(outcome.position, target.position);
    }
}
