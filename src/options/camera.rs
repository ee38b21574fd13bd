use std::f32::consts::PI;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and orbit control parameters.
pub struct CameraOptions {
    /// Initial eye position in world space.
    #[schemars(skip)]
    pub eye: [f32; 3],
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Fraction of pending orbit motion applied per update.
    #[schemars(title = "Damping", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub damping: f32,
    /// Closest allowed orbit distance.
    #[schemars(title = "Min Distance", range(min = 0.5, max = 10.0), extend("step" = 0.1))]
    pub min_distance: f32,
    /// Farthest allowed orbit distance.
    #[schemars(title = "Max Distance", range(min = 2.0, max = 30.0), extend("step" = 0.1))]
    pub max_distance: f32,
    /// Largest angle between the view direction and straight down (radians).
    #[schemars(skip)]
    pub max_polar_angle: f32,
    /// Rotation sensitivity (radians per input unit).
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub rotate_speed: f32,
    /// Zoom sensitivity multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            eye: [0.0, 1.7, 8.5],
            fovy: 45.0,
            znear: 0.1,
            zfar: 50.0,
            damping: 0.12,
            min_distance: 3.8,
            max_distance: 9.0,
            max_polar_angle: PI / 1.8,
            rotate_speed: 0.01,
            zoom_speed: 0.05,
        }
    }
}
