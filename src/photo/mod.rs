//! Photo focus subsystem.
//!
//! Photo cards float in a loose orbit around the tree. As the camera pushes
//! in, each card blends from its scattered pose toward an assigned slot of a
//! [`FocusRing`], stops bobbing and spinning, grows a little, and past a
//! threshold turns to face the viewer. Card poses are never stored; they are
//! recomputed every tick from the scatter placement, the slot, the shared
//! [`ControlSignal`] and elapsed time.

mod layout;

use glam::{EulerRot, Mat4, Quat, Vec3};
pub use layout::{
    fit_photo, scatter_layout, FocusRing, FocusRingSlot, FrameSpec, PhotoSize,
};
use rand::Rng;

use crate::error::EvergreenError;
use crate::placement::Placement;
use crate::signal::ControlSignal;
use crate::util::easing::EasingFunction;
use crate::util::math::{lerp_exact, look_rotation};

/// Opaque texture handle plus the native pixel size, when known, supplied
/// by the asset collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoAsset<H> {
    /// Texture handle owned by the asset collaborator.
    pub texture: H,
    /// Native `(width, height)` in pixels.
    pub dimensions: Option<(u32, u32)>,
}

/// Constants shaping the focus blend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusTuning {
    /// How far the focus blend leads the explosion factor toward the target.
    pub focus_lead: f32,
    /// Vertical bob amplitude while scattered.
    pub float_amplitude: f32,
    /// Bob angular frequency (rad/s).
    pub float_frequency: f32,
    /// Fraction of the bob removed at full focus.
    pub float_settle: f32,
    /// Idle yaw spin (rad/s).
    pub spin_rate: f32,
    /// Fraction of the spin removed at full focus.
    pub spin_settle: f32,
    /// Smoothed blend above which cards face the viewer.
    pub billboard_threshold: f32,
    /// Fraction of the card roll kept while billboarding.
    pub billboard_roll: f32,
    /// Extra scale at full focus.
    pub focus_growth: f32,
}

impl Default for FocusTuning {
    fn default() -> Self {
        Self {
            focus_lead: 0.4,
            float_amplitude: 0.08,
            float_frequency: 0.8,
            float_settle: 1.0,
            spin_rate: 0.2,
            spin_settle: 1.0,
            billboard_threshold: 0.35,
            billboard_roll: 0.35,
            focus_growth: 0.55,
        }
    }
}

impl FocusTuning {
    /// Raw focus blend: the explosion factor pulled `focus_lead` of the way
    /// toward the collapse target, clamped to `[0, 1]`.
    #[must_use]
    pub fn blend(&self, signal: &ControlSignal) -> f32 {
        let f = signal.explosion_factor();
        let target = signal.collapse_target();
        (f + (target - f) * self.focus_lead).clamp(0.0, 1.0)
    }

    /// Blend after the cubic ease.
    #[must_use]
    pub fn smoothed_blend(&self, signal: &ControlSignal) -> f32 {
        EasingFunction::SmoothStep.evaluate(self.blend(signal))
    }
}

/// One photo card.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoCard<H> {
    /// Texture handle.
    pub texture: H,
    /// Scattered resting pose.
    pub scatter: Placement,
    /// Index into the focus ring.
    pub slot: usize,
    /// Photo plane size inside the frame.
    pub photo_size: PhotoSize,
}

/// Live pose of one card for the current tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    /// Position in the tree frame.
    pub position: Vec3,
    /// Orientation.
    pub rotation: Quat,
    /// Uniform scale.
    pub scale: f32,
    /// Smoothed focus blend used for this pose.
    pub blend: f32,
    /// Whether the card is turned toward the viewer.
    pub billboarded: bool,
}

impl CardTransform {
    /// Model matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.position)
    }
}

/// Photo cards with their focus ring and per-tick poses.
///
/// Inactive (zero cards) until [`Self::attach`] is called once the asset
/// collaborator has finished loading.
#[derive(Debug, Clone)]
pub struct PhotoFocus<H> {
    tuning: FocusTuning,
    frame: FrameSpec,
    ring_size: Option<usize>,
    cards: Vec<PhotoCard<H>>,
    ring: Option<FocusRing>,
    transforms: Vec<CardTransform>,
}

impl<H> PhotoFocus<H> {
    /// Inactive subsystem. `ring_size` overrides the slot count, which
    /// otherwise matches the photo count.
    #[must_use]
    pub fn new(tuning: FocusTuning, frame: FrameSpec, ring_size: Option<usize>) -> Self {
        Self {
            tuning,
            frame,
            ring_size,
            cards: Vec::new(),
            ring: None,
            transforms: Vec::new(),
        }
    }

    /// Build cards for the loaded photos. Allowed once; an empty list leaves
    /// the subsystem rendering nothing.
    pub fn attach<R: Rng + ?Sized>(
        &mut self,
        photos: Vec<PhotoAsset<H>>,
        focus_center: Vec3,
        rng: &mut R,
    ) -> Result<(), EvergreenError> {
        if self.ring.is_some() {
            return Err(EvergreenError::PhotosAlreadyAttached);
        }

        let count = photos.len();
        let ring = FocusRing::new(self.ring_size.unwrap_or(count), focus_center, rng);
        let scatter = scatter_layout(count, rng);

        self.cards = photos
            .into_iter()
            .zip(scatter)
            .enumerate()
            .map(|(i, (photo, scatter))| PhotoCard {
                photo_size: fit_photo(photo.dimensions, &self.frame),
                texture: photo.texture,
                scatter,
                slot: ring.slot_index(i),
            })
            .collect();
        self.transforms = self
            .cards
            .iter()
            .map(|card| CardTransform {
                position: card.scatter.position,
                rotation: Quat::IDENTITY,
                scale: card.scatter.base_scale,
                blend: 0.0,
                billboarded: false,
            })
            .collect();

        log::info!(
            "attached {} photo cards to a {}-slot focus ring",
            self.cards.len(),
            ring.len()
        );
        self.ring = Some(ring);
        Ok(())
    }

    /// Whether photos have been attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.ring.is_some()
    }

    /// Whether any card will render.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.cards.is_empty()
    }

    /// Recompute every card pose. `viewer` is the camera eye expressed in
    /// the same frame as the cards.
    pub fn update(&mut self, signal: &ControlSignal, elapsed: f32, viewer: Vec3) {
        let Some(ring) = &self.ring else {
            return;
        };
        let smooth = self.tuning.smoothed_blend(signal);
        for (out, card) in self.transforms.iter_mut().zip(&self.cards) {
            if let Some(slot) = ring.slot(card.slot) {
                *out = pose(&self.tuning, card, slot, smooth, elapsed, viewer);
            }
        }
    }

    /// Cards in attachment order.
    #[must_use]
    pub fn cards(&self) -> &[PhotoCard<H>] {
        &self.cards
    }

    /// Poses from the last update, index-aligned with [`Self::cards`].
    #[must_use]
    pub fn transforms(&self) -> &[CardTransform] {
        &self.transforms
    }

    /// Focus ring, once attached.
    #[must_use]
    pub fn ring(&self) -> Option<&FocusRing> {
        self.ring.as_ref()
    }

    /// Picture frame dimensions.
    #[must_use]
    pub fn frame(&self) -> &FrameSpec {
        &self.frame
    }
}

fn pose<H>(
    tuning: &FocusTuning,
    card: &PhotoCard<H>,
    slot: &FocusRingSlot,
    smooth: f32,
    elapsed: f32,
    viewer: Vec3,
) -> CardTransform {
    let scatter = &card.scatter;

    let amplitude = tuning.float_amplitude * (1.0 - smooth * tuning.float_settle);
    let mut position = lerp_exact(scatter.position, slot.position, smooth);
    position.y += (elapsed * tuning.float_frequency + scatter.phase).sin() * amplitude;

    let mut euler = lerp_exact(scatter.rotation.unwrap_or(Vec3::ZERO), slot.rotation, smooth);
    euler.y += elapsed * tuning.spin_rate * (1.0 - smooth * tuning.spin_settle);

    let billboarded = smooth > tuning.billboard_threshold;
    let rotation = if billboarded {
        look_rotation(viewer - position, Vec3::Y)
            * Quat::from_rotation_z(euler.z * tuning.billboard_roll)
    } else {
        Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z)
    };

    CardTransform {
        position,
        rotation,
        scale: (scatter.base_scale * (1.0 + smooth * tuning.focus_growth)).max(0.001),
        blend: smooth,
        billboarded,
    }
}
