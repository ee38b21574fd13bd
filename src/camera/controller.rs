use glam::{Quat, Vec2, Vec3};

use crate::camera::core::Camera;
use crate::camera::CameraProbe;
use crate::options::CameraOptions;
use crate::util::math::look_rotation;

/// Smallest polar angle the orbit may reach; keeps the view off the pole.
const MIN_POLAR: f32 = 1e-3;

/// Damped orbital camera around a fixed focus point.
///
/// Input (`rotate`, `zoom`) accumulates pending motion; every `update`
/// applies a `damping` fraction of what is pending and decays the rest, so
/// the camera glides to a stop. Distance and polar angle are clamped after
/// each step.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,

    /// Derived view/projection camera, refreshed on every change.
    pub camera: Camera,

    pending_rotation: Vec2,
    pending_zoom: f32,
    damping: f32,
    min_distance: f32,
    max_distance: f32,
    max_polar_angle: f32,
    rotate_speed: f32,
    zoom_speed: f32,
}

impl OrbitCamera {
    /// Orbit around `focus_point` starting from the configured eye.
    #[must_use]
    pub fn new(options: &CameraOptions, focus_point: Vec3, aspect: f32) -> Self {
        let offset = Vec3::from_array(options.eye) - focus_point;
        let orientation = look_rotation(offset, Vec3::Y);
        let distance = offset.length();

        let camera = Camera {
            eye: Vec3::from_array(options.eye),
            target: focus_point,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        let mut orbit = Self {
            orientation,
            distance,
            focus_point,
            camera,
            pending_rotation: Vec2::ZERO,
            pending_zoom: 0.0,
            damping: options.damping.clamp(0.0, 1.0),
            min_distance: options.min_distance,
            max_distance: options.max_distance.max(options.min_distance),
            max_polar_angle: options.max_polar_angle,
            rotate_speed: options.rotate_speed,
            zoom_speed: options.zoom_speed,
        };
        orbit.distance = orbit.clamp_distance(distance);
        orbit.update_camera_pos();
        orbit
    }

    fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance)
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * Vec3::Z;

        self.camera.eye = self.focus_point + (dir * self.distance);
        self.camera.target = self.focus_point;
        self.camera.up = Vec3::Y;
    }

    /// Polar angle of the eye measured from straight up.
    #[must_use]
    pub fn polar_angle(&self) -> f32 {
        (self.orientation * Vec3::Z).y.clamp(-1.0, 1.0).acos()
    }

    /// Queue an orbit drag (x: around the vertical axis, y: toward the
    /// ground).
    pub fn rotate(&mut self, delta: Vec2) {
        self.pending_rotation += delta * self.rotate_speed;
    }

    /// Queue a zoom step; positive moves closer.
    pub fn zoom(&mut self, delta: f32) {
        self.pending_zoom += delta * self.zoom_speed;
    }

    /// Jump straight to `distance` (clamped), dropping any pending zoom.
    pub fn set_distance(&mut self, distance: f32) {
        self.pending_zoom = 0.0;
        self.distance = self.clamp_distance(distance);
        self.update_camera_pos();
    }

    /// Update the viewport aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Apply one damped step of pending motion. Returns whether anything is
    /// still moving.
    pub fn update(&mut self) -> bool {
        let step = self.pending_rotation * self.damping;
        self.pending_rotation -= step;

        // Horizontal rotation around the world up axis
        self.orientation = (Quat::from_rotation_y(-step.x) * self.orientation).normalize();

        // Vertical rotation around the camera's right vector, clamped in
        // polar angle
        let polar = self.polar_angle();
        let clamped = (polar + step.y).clamp(MIN_POLAR, self.max_polar_angle);
        let right = self.orientation * Vec3::X;
        self.orientation =
            (Quat::from_axis_angle(right, clamped - polar) * self.orientation).normalize();

        let zoom = self.pending_zoom * self.damping;
        self.pending_zoom -= zoom;
        self.distance = self.clamp_distance(self.distance * (1.0 - zoom));

        self.update_camera_pos();
        self.pending_rotation.length_squared() > 1e-12 || self.pending_zoom.abs() > 1e-6
    }

    /// Orbit distance.
    #[must_use]
    pub fn orbit_distance(&self) -> f32 {
        self.distance
    }

    /// Allowed distance range.
    #[must_use]
    pub fn distance_range(&self) -> (f32, f32) {
        (self.min_distance, self.max_distance)
    }
}

impl CameraProbe for OrbitCamera {
    fn eye(&self) -> Vec3 {
        self.camera.eye
    }

    fn target(&self) -> Vec3 {
        self.focus_point
    }

    fn distance(&self) -> f32 {
        self.distance
    }
}
