//! Particle groups: a placement population, its look, and its batch.
//!
//! Each [`ParticleGroup`] exclusively owns its [`InstanceBatch`] and rewrites
//! it from the shared [`ControlSignal`]. Populations are reference counted
//! so overlay groups (ribbons over gift boxes) reuse the exact same anchors.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::instancing::{write_instances, InstanceBatch, InstanceStyle};
use crate::placement::Placement;
use crate::signal::ControlSignal;

/// Identity of one particle group in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKind {
    /// Canopy needles.
    Foliage,
    /// Glowing specks in the canopy.
    LightSpecks,
    /// Gold baubles.
    OrnamentsGold,
    /// Red baubles.
    OrnamentsRed,
    /// Evergreen baubles.
    OrnamentsGreen,
    /// Small gift boxes inside the tree body.
    GiftBoxes,
    /// White voxel fragments.
    Voxels,
    /// Gold burst spheres.
    GoldSpheres,
    /// Red burst spheres.
    RedSpheres,
    /// White burst spheres.
    WhiteSpheres,
    /// Gold burst boxes.
    GoldBoxes,
    /// Red burst boxes.
    RedBoxes,
    /// Ribbon strips along X over gold boxes.
    GoldRibbonX,
    /// Ribbon strips along Y over gold boxes.
    GoldRibbonY,
    /// Ribbon strips along X over red boxes.
    RedRibbonX,
    /// Ribbon strips along Y over red boxes.
    RedRibbonY,
    /// Snow flakes.
    Snow,
    /// Flat golden cards.
    GoldCards,
}

impl GroupKind {
    /// Stable lowercase label, used for logging and GPU buffer labels.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Foliage => "foliage",
            Self::LightSpecks => "light-specks",
            Self::OrnamentsGold => "ornaments-gold",
            Self::OrnamentsRed => "ornaments-red",
            Self::OrnamentsGreen => "ornaments-green",
            Self::GiftBoxes => "gift-boxes",
            Self::Voxels => "voxels",
            Self::GoldSpheres => "gold-spheres",
            Self::RedSpheres => "red-spheres",
            Self::WhiteSpheres => "white-spheres",
            Self::GoldBoxes => "gold-boxes",
            Self::RedBoxes => "red-boxes",
            Self::GoldRibbonX => "gold-ribbon-x",
            Self::GoldRibbonY => "gold-ribbon-y",
            Self::RedRibbonX => "red-ribbon-x",
            Self::RedRibbonY => "red-ribbon-y",
            Self::Snow => "snow",
            Self::GoldCards => "gold-cards",
        }
    }
}

/// Coordinate frame a group's transforms are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentFrame {
    /// The tree root frame (position + uniform scale).
    Tree,
    /// The spinning tree body, nested inside the tree frame.
    Body,
}

/// Unit mesh an instance batch is drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Unit-radius UV sphere.
    Sphere {
        /// Width and height segment count.
        segments: u32,
    },
    /// Unit cube.
    Cube,
    /// Flat quad in the XY plane.
    Plane {
        /// Quad width.
        width: f32,
        /// Quad height.
        height: f32,
    },
}

/// Geometry plus an opaque material key resolved by the render
/// collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    /// Mesh.
    pub geometry: Geometry,
    /// Material key.
    pub material: &'static str,
}

/// One instanced population in the scene.
#[derive(Debug, Clone)]
pub struct ParticleGroup {
    kind: GroupKind,
    parent: ParentFrame,
    appearance: Appearance,
    placements: Arc<[Placement]>,
    style: InstanceStyle,
    batch: InstanceBatch,
}

impl ParticleGroup {
    /// Group over `placements`; the batch length is fixed to the population
    /// length from here on.
    #[must_use]
    pub fn new(
        kind: GroupKind,
        parent: ParentFrame,
        appearance: Appearance,
        placements: Arc<[Placement]>,
        style: InstanceStyle,
    ) -> Self {
        let batch = InstanceBatch::new(placements.len());
        Self {
            kind,
            parent,
            appearance,
            placements,
            style,
            batch,
        }
    }

    /// Rewrite the whole batch from the signal.
    pub fn update(&mut self, signal: &ControlSignal) {
        write_instances(&self.placements, &mut self.batch, signal, &self.style);
    }

    /// Group identity.
    #[must_use]
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Parent frame.
    #[must_use]
    pub fn parent(&self) -> ParentFrame {
        self.parent
    }

    /// Mesh and material binding.
    #[must_use]
    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    /// Shared population.
    #[must_use]
    pub fn placements(&self) -> &Arc<[Placement]> {
        &self.placements
    }

    /// Signal-to-transform mapping.
    #[must_use]
    pub fn style(&self) -> &InstanceStyle {
        &self.style
    }

    /// Current batch.
    #[must_use]
    pub fn batch(&self) -> &InstanceBatch {
        &self.batch
    }
}

/// Ordered collection of particle groups with lookup by kind.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    groups: Vec<ParticleGroup>,
    index: FxHashMap<GroupKind, usize>,
}

impl ParticleField {
    /// Empty field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group, replacing any existing group of the same kind in place.
    pub fn insert(&mut self, group: ParticleGroup) {
        if let Some(&slot) = self.index.get(&group.kind) {
            log::warn!("replacing particle group {}", group.kind.label());
            self.groups[slot] = group;
            return;
        }
        let _ = self.index.insert(group.kind, self.groups.len());
        self.groups.push(group);
    }

    /// Rewrite every group's batch. Groups are independent readers of the
    /// same signal.
    pub fn update_all(&mut self, signal: &ControlSignal) {
        for group in &mut self.groups {
            group.update(signal);
        }
    }

    /// Group of the given kind.
    #[must_use]
    pub fn get(&self, kind: GroupKind) -> Option<&ParticleGroup> {
        self.index.get(&kind).map(|&i| &self.groups[i])
    }

    /// Groups in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ParticleGroup> {
        self.groups.iter()
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the field has no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total instance count across all groups.
    #[must_use]
    pub fn total_instances(&self) -> usize {
        self.groups.iter().map(|g| g.batch.len()).sum()
    }
}
