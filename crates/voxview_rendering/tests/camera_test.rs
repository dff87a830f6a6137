//! # Camera Property Tests
//!
//! The basis stays orthonormal and pitch stays clamped under any sequence of
//! angle changes and pointer motion.

use voxview_rendering::camera::{CameraController, FpsCamera, FrameInput, MoveDirection};
use voxview_shared::{Vec2, Vec3};

const EPS: f32 = 1e-4;

fn assert_orthonormal(cam: &FpsCamera) {
    let (f, r, u) = (cam.forward(), cam.right(), cam.up());
    for v in [f, r, u] {
        assert!((v.length() - 1.0).abs() < EPS, "not unit: {v:?}");
    }
    assert!(f.dot(r).abs() < EPS, "forward·right = {}", f.dot(r));
    assert!(f.dot(u).abs() < EPS, "forward·up = {}", f.dot(u));
    assert!(r.dot(u).abs() < EPS, "right·up = {}", r.dot(u));
}

#[test]
fn test_basis_orthonormal_over_angle_sweep() {
    let mut cam = FpsCamera::new(Vec3::ZERO, 1.5, 1.5, 0.3);

    for pitch in (-120..=120).step_by(7) {
        for yaw in (-400..=400).step_by(23) {
            cam.set_pitch(pitch as f32);
            cam.set_yaw(yaw as f32);
            assert_orthonormal(&cam);
            assert!(cam.pitch() <= 89.0 + EPS && cam.pitch() >= -89.0 - EPS);
        }
    }
}

#[test]
fn test_set_pitch_stores_clamped_value() {
    let mut cam = FpsCamera::new(Vec3::ZERO, 1.0, 1.0, 1.0);
    for p in [-1000.0f32, -89.5, -10.0, 0.0, 45.0, 89.0, 90.0, 1e6] {
        cam.set_pitch(p);
        assert!((cam.pitch() - p.clamp(-89.0, 89.0)).abs() < EPS);
    }
}

#[test]
fn test_pointer_drag_keeps_pitch_clamped() {
    let mut cam = FpsCamera::new(Vec3::ZERO, 1.0, 1.0, 0.3);
    let mut controller = CameraController::new();

    // Drag the pointer straight up for a long way.
    for step in 0..200 {
        let input = FrameInput {
            pointer: Some(Vec2::new(17.0 * step as f32, -25.0 * step as f32)),
            ..FrameInput::idle(1.0 / 60.0)
        };
        controller.update(&mut cam, &input);
        assert_orthonormal(&cam);
    }
    assert!((cam.pitch() - 89.0).abs() < EPS);
}

#[test]
fn test_movement_follows_current_basis() {
    let mut cam = FpsCamera::new(Vec3::ZERO, 1.0, 2.0, 1.0);
    cam.set_yaw(0.0);

    // Yaw 0 looks down +X.
    cam.move_in(MoveDirection::Forward, 1.0);
    assert!((cam.position().x - 2.0).abs() < EPS);

    cam.move_in(MoveDirection::Backward, 0.5);
    cam.move_in(MoveDirection::Left, 1.0);
    let p = cam.position();
    assert!((p.x - 1.0).abs() < EPS);
    // right = forward × up = +X × +Y = +Z, so left is -Z.
    assert!((p.z + 2.0).abs() < EPS);
}

#[test]
fn test_projection_uses_fov_and_aspect() {
    let mut cam = FpsCamera::new(Vec3::ZERO, 2.0, 1.0, 1.0);
    let wide = cam.projection_matrix();
    cam.set_fov(10.0);
    let narrow = cam.projection_matrix();

    assert!(narrow.cols[1][1] > wide.cols[1][1]);
    assert!((wide.cols[0][0] * 2.0 - wide.cols[1][1]).abs() < EPS);
}
