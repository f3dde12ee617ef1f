// Orbit camera around the flock's home centre
//
// Camera model:
//   - A fixed target point (the home centre)
//   - Yaw/pitch around it, distance along the look vector
//   - A/D and mouse drag orbit, W/S tilt, wheel zooms
//   - Slow idle spin when nothing is pressed

use glam::{Mat4, Vec3};
use winit::keyboard::KeyCode;

use super::input::InputState;

pub struct OrbitCamera {
    pub target: Vec3,

    /// Private: always clamped to [min_distance, max_distance] in update().
    distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,

    /// Elevation in radians, clamped just short of straight up/down.
    pitch: f32,
    /// Horizontal angle in radians.
    pub yaw: f32,

    pub fov: f32,
    pub near: f32,
    pub far: f32,

    /// Radians per second for keyboard orbit.
    pub orbit_speed: f32,
    /// Radians per pixel of mouse drag.
    pub drag_speed: f32,
    /// Distance change per scroll line.
    pub zoom_speed: f32,
    /// Radians per second of idle spin.
    pub idle_spin: f32,
}

const PITCH_LIMIT: f32 = 1.4;

impl OrbitCamera {
    pub fn new(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            distance,
            min_distance: 2.0,
            max_distance: 80.0,
            pitch: 0.35,
            yaw: 0.0,
            fov: 45.0_f32.to_radians(),
            near: 0.05,
            far: 500.0,
            orbit_speed: 1.2,
            drag_speed: 0.005,
            zoom_speed: 1.5,
            idle_spin: 0.1,
        }
    }

    /// Update orbit from input. Call once per frame before rendering.
    pub fn update(&mut self, input: &InputState, dt: f32) {
        let mut yaw_dir = 0.0;
        let mut pitch_dir = 0.0;
        if input.is_key_held(KeyCode::KeyA) { yaw_dir -= 1.0; }
        if input.is_key_held(KeyCode::KeyD) { yaw_dir += 1.0; }
        if input.is_key_held(KeyCode::KeyW) { pitch_dir += 1.0; }
        if input.is_key_held(KeyCode::KeyS) { pitch_dir -= 1.0; }

        if input.dragging {
            self.yaw -= input.mouse_delta.0 * self.drag_speed;
            self.pitch += input.mouse_delta.1 * self.drag_speed;
        } else if yaw_dir == 0.0 && pitch_dir == 0.0 {
            self.yaw += self.idle_spin * dt;
        }

        self.yaw += yaw_dir * self.orbit_speed * dt;
        self.pitch += pitch_dir * self.orbit_speed * dt;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

        // Scroll up (positive delta) zooms in
        self.distance -= input.scroll_delta * self.zoom_speed;
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
    }

    pub fn eye(&self) -> Vec3 {
        self.target
            + Vec3::new(
                self.yaw.sin() * self.pitch.cos(),
                self.pitch.sin(),
                self.yaw.cos() * self.pitch.cos(),
            ) * self.distance
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        let projection = Mat4::perspective_rh(self.fov, aspect, self.near, self.far);
        let view = Mat4::look_at_rh(self.eye(), self.target, Vec3::Y);
        projection * view
    }

    pub fn distance(&self) -> f32 { self.distance }

    /// 1 = fully zoomed in (min_distance), 0 = fully zoomed out.
    pub fn zoom_fraction(&self) -> f32 {
        let range = self.max_distance - self.min_distance;
        if range > 0.0 {
            1.0 - (self.distance - self.min_distance) / range
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_sits_at_distance_from_target() {
        let cam = OrbitCamera::new(Vec3::new(1.0, 2.0, 3.0), 12.0);
        assert!((cam.eye().distance(cam.target) - 12.0).abs() < 1e-4);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = OrbitCamera::new(Vec3::ZERO, 10.0);
        let mut input = InputState::new();
        input.scroll_delta = 1000.0;
        cam.update(&input, 0.016);
        assert_eq!(cam.distance(), cam.min_distance);
        assert_eq!(cam.zoom_fraction(), 1.0);

        input.scroll_delta = -1000.0;
        cam.update(&input, 0.016);
        assert_eq!(cam.distance(), cam.max_distance);
        assert_eq!(cam.zoom_fraction(), 0.0);
    }

    #[test]
    fn idle_spin_advances_yaw() {
        let mut cam = OrbitCamera::new(Vec3::ZERO, 10.0);
        let input = InputState::new();
        cam.update(&input, 1.0);
        assert!((cam.yaw - cam.idle_spin).abs() < 1e-6);
    }
}
