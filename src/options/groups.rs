use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Population size of every particle group.
///
/// A count of zero yields an empty group that renders nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Groups", inline)]
#[serde(default)]
pub struct GroupOptions {
    /// Canopy needles.
    #[schemars(title = "Foliage", range(min = 0, max = 10000))]
    pub foliage: usize,
    /// Glowing specks.
    #[schemars(title = "Light Specks", range(min = 0, max = 5000))]
    pub light_specks: usize,
    /// Baubles, split between gold, red and green.
    #[schemars(title = "Ornaments", range(min = 0, max = 1000))]
    pub ornaments: usize,
    /// Gift boxes inside the body.
    #[schemars(title = "Gift Boxes", range(min = 0, max = 500))]
    pub gift_boxes: usize,
    /// White voxel fragments.
    #[schemars(title = "Voxels", range(min = 0, max = 5000))]
    pub voxels: usize,
    /// Gold burst spheres.
    pub gold_spheres: usize,
    /// Red burst spheres.
    pub red_spheres: usize,
    /// White burst spheres.
    pub white_spheres: usize,
    /// Gold burst boxes (each carries two ribbon strips).
    pub gold_boxes: usize,
    /// Red burst boxes (each carries two ribbon strips).
    pub red_boxes: usize,
    /// Snow flakes.
    #[schemars(title = "Snow", range(min = 0, max = 5000))]
    pub snow: usize,
    /// Flat golden cards.
    pub gold_cards: usize,
    /// Background stars.
    #[schemars(title = "Star Field", range(min = 0, max = 10000))]
    pub star_field: usize,
}

impl Default for GroupOptions {
    fn default() -> Self {
        Self {
            foliage: 1800,
            light_specks: 640,
            ornaments: 120,
            gift_boxes: 36,
            voxels: 420,
            gold_spheres: 80,
            red_spheres: 80,
            white_spheres: 160,
            gold_boxes: 75,
            red_boxes: 53,
            snow: 600,
            gold_cards: 25,
            star_field: 1800,
        }
    }
}
