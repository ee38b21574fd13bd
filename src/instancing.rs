//! Per-frame instanced transform updates.
//!
//! Given a placement population and the current [`ControlSignal`], the
//! updater rewrites one transform per instance into an [`InstanceBatch`].
//! How the explosion factor maps onto offset, scale and orientation is
//! described per group by an [`InstanceStyle`].

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::placement::Placement;
use crate::signal::ControlSignal;
use crate::util::math::look_rotation;

/// Per-instance data uploaded to the GPU.
/// Column-major model matrix, matching a WGSL `mat4x4<f32>` attribute.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    /// Model matrix columns.
    pub model: [[f32; 4]; 4],
}

impl From<&Mat4> for InstanceRaw {
    fn from(m: &Mat4) -> Self {
        Self {
            model: m.to_cols_array_2d(),
        }
    }
}

/// Ordered transforms for one particle group, index-aligned with its
/// placement population.
///
/// The length is fixed at construction; [`write_instances`] overwrites every
/// entry each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceBatch {
    transforms: Vec<Mat4>,
    visible: bool,
}

impl InstanceBatch {
    /// Batch of `len` identity transforms.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            transforms: vec![Mat4::IDENTITY; len],
            visible: true,
        }
    }

    /// Number of instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Whether the batch holds no instances.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Current transforms.
    #[must_use]
    pub fn transforms(&self) -> &[Mat4] {
        &self.transforms
    }

    /// Whether the render collaborator should draw this batch.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Transforms packed for GPU upload.
    #[must_use]
    pub fn to_raw(&self) -> Vec<InstanceRaw> {
        self.transforms.iter().map(InstanceRaw::from).collect()
    }
}

/// How instance scale reacts to the explosion factor `f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleResponse {
    /// Scale stays at the placement's base scale.
    Fixed,
    /// `base · (1 + f · growth)`: fragments swell as they disperse.
    Grow(f32),
    /// `base · (1 - f · shrink)`, floored at zero.
    Shrink(f32),
}

impl ScaleResponse {
    /// Scale for a base scale at explosion factor `f`.
    #[must_use]
    pub fn apply(self, base: f32, f: f32) -> f32 {
        match self {
            Self::Fixed => base,
            Self::Grow(growth) => base * (1.0 + f * growth),
            Self::Shrink(shrink) => (base * (1.0 - f * shrink)).max(0.0),
        }
    }
}

/// Instance orientation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Identity rotation.
    None,
    /// The placement's resting rotation (XYZ Euler), identity when absent.
    Euler,
    /// Local +Z aimed at the point `2 · offset`, so fragments tumble away
    /// from the tree centre as they fly.
    FaceOutward,
}

/// Long axis of a ribbon strip wrapped around a gift box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RibbonAxis {
    /// Strip runs along local X.
    X,
    /// Strip runs along local Y.
    Y,
}

/// Anisotropic strip layered over a box population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonStyle {
    /// Long axis.
    pub axis: RibbonAxis,
    /// Length as a multiple of the box base scale (overhangs the box).
    pub length: f32,
    /// Thickness as a multiple of the box base scale.
    pub thickness: f32,
    /// Outward z lift as a multiple of the thickness.
    pub lift: f32,
}

impl RibbonStyle {
    /// Ribbon strip along `axis` with the standard proportions.
    #[must_use]
    pub const fn along(axis: RibbonAxis) -> Self {
        Self {
            axis,
            length: 1.6,
            thickness: 0.4,
            lift: 0.7,
        }
    }
}

/// Per-group mapping from the control signal to instance transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceStyle {
    /// Distance travelled along the placement direction at full explosion.
    pub spread: f32,
    /// Scale reaction.
    pub scale: ScaleResponse,
    /// Orientation rule.
    pub orientation: Orientation,
    /// Ribbon geometry, replacing the uniform scale when set.
    pub ribbon: Option<RibbonStyle>,
    /// Hide the whole batch once the explosion factor reaches this value.
    pub visibility_gate: Option<f32>,
}

impl InstanceStyle {
    /// Burst fragments: fly out 3 units, grow by 160%, face outward.
    #[must_use]
    pub const fn burst() -> Self {
        Self {
            spread: 3.0,
            scale: ScaleResponse::Grow(1.6),
            orientation: Orientation::FaceOutward,
            ribbon: None,
            visibility_gate: None,
        }
    }

    /// Tree-body particles: stay put and shrink away, optionally gated.
    #[must_use]
    pub const fn shrink(shrink: f32, gate: Option<f32>) -> Self {
        Self {
            spread: 0.0,
            scale: ScaleResponse::Shrink(shrink),
            orientation: Orientation::None,
            ribbon: None,
            visibility_gate: gate,
        }
    }

    /// Ribbon strips riding along with a burst box population.
    #[must_use]
    pub const fn ribbon(axis: RibbonAxis) -> Self {
        Self {
            spread: 3.0,
            scale: ScaleResponse::Fixed,
            orientation: Orientation::Euler,
            ribbon: Some(RibbonStyle::along(axis)),
            visibility_gate: None,
        }
    }

    /// Same style with a different orientation rule.
    #[must_use]
    pub const fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Whether a batch in this style is drawn at explosion factor `f`.
    #[must_use]
    pub fn is_visible(&self, f: f32) -> bool {
        self.visibility_gate.is_none_or(|gate| f < gate)
    }

    /// Transform of one placement at explosion factor `f`.
    #[must_use]
    pub fn transform(&self, placement: &Placement, f: f32) -> Mat4 {
        let offset = placement.direction * (self.spread * f);
        let mut position = placement.position + offset;

        let rotation = match self.orientation {
            Orientation::None => Quat::IDENTITY,
            Orientation::Euler => placement.rotation.map_or(Quat::IDENTITY, |r| {
                Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
            }),
            Orientation::FaceOutward => {
                look_rotation(offset * 2.0 - position, Vec3::Y)
            }
        };

        let scale = if let Some(ribbon) = self.ribbon {
            let long = placement.base_scale * ribbon.length;
            let thick = placement.base_scale * ribbon.thickness;
            position.z += thick * ribbon.lift;
            match ribbon.axis {
                RibbonAxis::X => Vec3::new(long, thick, thick),
                RibbonAxis::Y => Vec3::new(thick, long, thick),
            }
        } else {
            Vec3::splat(self.scale.apply(placement.base_scale, f))
        };

        Mat4::from_scale_rotation_translation(scale, rotation, position)
    }
}

/// Overwrite every entry of `batch` from `placements` and the signal.
///
/// `batch` must have been built for this population; entries beyond the
/// shorter of the two are left untouched.
pub fn write_instances(
    placements: &[Placement],
    batch: &mut InstanceBatch,
    signal: &ControlSignal,
    style: &InstanceStyle,
) {
    debug_assert_eq!(placements.len(), batch.len());
    let f = signal.explosion_factor();
    for (slot, placement) in batch.transforms.iter_mut().zip(placements) {
        *slot = style.transform(placement, f);
    }
    batch.visible = style.is_visible(f);
}
