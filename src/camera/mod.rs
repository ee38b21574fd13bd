//! Camera system for viewing the tree.
//!
//! The scene only needs to know where the camera is. [`CameraProbe`] is
//! that seam; [`OrbitCamera`] is the damped orbital controller the driver
//! binary uses, and a bare [`Camera`] works as a fixed probe.

/// Damped orbital camera controller.
pub mod controller;
/// Core camera struct.
pub mod core;

use glam::Vec3;

pub use self::controller::OrbitCamera;
pub use self::core::Camera;

/// Read-only view of the live camera, sampled once per tick.
pub trait CameraProbe {
    /// Eye position in world space.
    fn eye(&self) -> Vec3;

    /// Point the camera looks at, in world space.
    fn target(&self) -> Vec3;

    /// Distance from eye to target; drives the control signal.
    fn distance(&self) -> f32 {
        self.eye().distance(self.target())
    }
}

impl CameraProbe for Camera {
    fn eye(&self) -> Vec3 {
        self.eye
    }

    fn target(&self) -> Vec3 {
        self.target
    }
}
