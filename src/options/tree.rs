use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Placement of the tree in the world and its idle motion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Tree", inline)]
#[serde(default)]
pub struct TreeOptions {
    /// Tree root position in world space.
    #[schemars(skip)]
    pub position: [f32; 3],
    /// Uniform scale of the tree root frame.
    #[schemars(title = "Scale", range(min = 0.1, max = 3.0), extend("step" = 0.01))]
    pub scale: f32,
    /// Height above the root the camera orbits around.
    #[schemars(skip)]
    pub target_lift: f32,
    /// Focus ring centre in tree-local space.
    #[schemars(skip)]
    pub focus_center: [f32; 3],
    /// Offset of the spinning body inside the tree frame.
    #[schemars(skip)]
    pub body_offset: [f32; 3],
    /// Body spin about Y (rad/s).
    #[schemars(title = "Body Spin", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub body_spin: f32,
    /// Collapse target at or above which the body is hidden.
    #[schemars(skip)]
    pub body_hide_threshold: f32,
    /// Star topper spin about Y (rad/s).
    #[schemars(title = "Star Spin", range(min = 0.0, max = 5.0), extend("step" = 0.1))]
    pub star_spin_y: f32,
    /// Star topper spin about X (rad/s).
    #[schemars(skip)]
    pub star_spin_x: f32,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            position: [-0.1, 0.3, 0.0],
            scale: 0.84,
            target_lift: 0.5,
            focus_center: [0.0, 0.5, 0.0],
            body_offset: [0.0, 0.3, 0.0],
            body_spin: 0.12,
            body_hide_threshold: 0.55,
            star_spin_y: 1.2,
            star_spin_x: 0.4,
        }
    }
}

impl TreeOptions {
    /// Point the camera orbits around, in world space.
    #[must_use]
    pub fn camera_target(&self) -> Vec3 {
        Vec3::from_array(self.position) + Vec3::Y * self.target_lift
    }
}
