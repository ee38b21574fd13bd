//! Static layouts for photo cards: scattered orbit, focus ring, photo fit.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

use crate::placement::Placement;

// ---------------------------------------------------------------------------
// Picture frame
// ---------------------------------------------------------------------------

/// Dimensions of the picture frame every card is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSpec {
    /// Outer frame width.
    pub width: f32,
    /// Outer frame height.
    pub height: f32,
    /// Frame depth.
    pub depth: f32,
    /// Matte board width.
    pub matte_width: f32,
    /// Matte board height.
    pub matte_height: f32,
    /// Widest photo that fits inside the matte.
    pub max_photo_width: f32,
    /// Tallest photo that fits inside the matte.
    pub max_photo_height: f32,
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self {
            width: 1.08,
            height: 1.5,
            depth: 0.05,
            matte_width: 1.0,
            matte_height: 1.42,
            max_photo_width: 0.92,
            max_photo_height: 1.3,
        }
    }
}

impl FrameSpec {
    /// Distance of the photo planes from the frame centre (front and back).
    #[must_use]
    pub fn photo_offset(&self) -> f32 {
        self.depth * 0.55
    }
}

/// Size of the photo plane inside a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoSize {
    /// Plane width.
    pub width: f32,
    /// Plane height.
    pub height: f32,
}

/// Fit a photo with the given native pixel dimensions inside the frame
/// interior, preserving aspect ratio.
///
/// Missing or zero dimensions fall back to the full interior.
#[must_use]
pub fn fit_photo(dimensions: Option<(u32, u32)>, frame: &FrameSpec) -> PhotoSize {
    let (max_w, max_h) = (frame.max_photo_width, frame.max_photo_height);
    match dimensions {
        Some((w, h)) if w > 0 && h > 0 => {
            let aspect = w as f32 / h as f32;
            if aspect >= max_w / max_h {
                PhotoSize {
                    width: max_w,
                    height: max_w / aspect,
                }
            } else {
                PhotoSize {
                    width: max_h * aspect,
                    height: max_h,
                }
            }
        }
        _ => PhotoSize {
            width: max_w,
            height: max_h,
        },
    }
}

// ---------------------------------------------------------------------------
// Layouts
// ---------------------------------------------------------------------------

/// Vertical extent of the scatter band.
const SCATTER_HEIGHT: f32 = 2.0;
/// Scatter band offset below the tree frame origin.
const SCATTER_DROP: f32 = 0.2;

/// Scattered orbit of `count` cards around the tree.
///
/// Cards sit on a loose ring (radius 2.4..3.3) at evenly spaced angles with
/// a little angular noise, facing inward. `height` records the sample
/// within the band, before the drop.
pub fn scatter_layout<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Placement> {
    (0..count)
        .map(|i| {
            let radius = 2.4 + rng.random::<f32>() * 0.9;
            let angle = (i as f32 / count as f32) * TAU
                + (rng.random::<f32>() - 0.5) * 0.5;
            let height = rng.random::<f32>() * SCATTER_HEIGHT;
            let y = height - SCATTER_DROP;
            let position = Vec3::new(angle.cos() * radius, y, angle.sin() * radius);
            let rotation = Vec3::new(
                (rng.random::<f32>() - 0.5) * 0.3,
                angle + PI,
                (rng.random::<f32>() - 0.5) * 0.2,
            );
            Placement {
                position,
                direction: position.try_normalize().unwrap_or(Vec3::Y),
                base_scale: 0.3 + rng.random::<f32>() * 0.08,
                rotation: Some(rotation),
                phase: rng.random::<f32>() * TAU,
                height,
            }
        })
        .collect()
}

/// Target pose of one card in the focus ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusRingSlot {
    /// Slot position.
    pub position: Vec3,
    /// Slot rotation (XYZ Euler radians).
    pub rotation: Vec3,
}

/// Circular target layout photo cards converge toward.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusRing {
    slots: Vec<FocusRingSlot>,
}

impl FocusRing {
    /// Ring of `max(1, count)` slots around `center`.
    ///
    /// The radius grows with the slot count (capped at 2.9); each slot gets
    /// a deterministic wave plus a little noise in height and radius so the
    /// ring does not read as a rigid circle.
    pub fn new<R: Rng + ?Sized>(count: usize, center: Vec3, rng: &mut R) -> Self {
        let count = count.max(1);
        let radius = (1.7 + count as f32 * 0.04).min(2.9);
        let slots = (0..count)
            .map(|i| {
                let fi = i as f32;
                let angle = (fi / count as f32) * TAU;
                let y_jitter = ((fi * 1.7).sin() + (fi * 0.9).cos()) * 0.18
                    + (rng.random::<f32>() - 0.5) * 0.18;
                let r_jitter = (fi * 1.3).sin() * 0.16 + (rng.random::<f32>() - 0.5) * 0.12;
                let r = (radius + r_jitter).max(0.6);
                FocusRingSlot {
                    position: Vec3::new(
                        center.x + angle.cos() * r,
                        center.y + y_jitter,
                        center.z + angle.sin() * r,
                    ),
                    rotation: Vec3::new(0.04, angle + PI, 0.0),
                }
            })
            .collect();
        Self { slots }
    }

    /// Number of slots (at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false; a ring has at least one slot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot index assigned to card `index` (modulo wraparound).
    #[must_use]
    pub fn slot_index(&self, index: usize) -> usize {
        index % self.slots.len().max(1)
    }

    /// Slot assigned to card `index`.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&FocusRingSlot> {
        self.slots.get(self.slot_index(index))
    }

    /// All slots.
    #[must_use]
    pub fn slots(&self) -> &[FocusRingSlot] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::seeded_rng;

    #[test]
    fn landscape_photo_fills_width() {
        let size = fit_photo(Some((1600, 900)), &FrameSpec::default());
        assert_eq!(size.width, 0.92);
        assert!((size.height - 0.92 * 900.0 / 1600.0).abs() < 1e-6);
    }

    #[test]
    fn portrait_photo_fills_height() {
        let size = fit_photo(Some((600, 1200)), &FrameSpec::default());
        assert_eq!(size.height, 1.3);
        assert!((size.width - 0.65).abs() < 1e-6);
    }

    #[test]
    fn fitted_photo_never_exceeds_interior() {
        let frame = FrameSpec::default();
        for dims in [(1, 1), (4000, 3), (3, 4000), (1920, 1080), (1080, 1350)] {
            let size = fit_photo(Some(dims), &frame);
            assert!(size.width <= frame.max_photo_width + 1e-6);
            assert!(size.height <= frame.max_photo_height + 1e-6);
        }
    }

    #[test]
    fn missing_dimensions_use_default_aspect() {
        let frame = FrameSpec::default();
        for dims in [None, Some((0, 100)), Some((100, 0))] {
            let size = fit_photo(dims, &frame);
            assert_eq!(size.width, frame.max_photo_width);
            assert_eq!(size.height, frame.max_photo_height);
        }
    }

    #[test]
    fn three_photos_get_distinct_slots() {
        let ring = FocusRing::new(3, Vec3::new(0.0, 0.5, 0.0), &mut seeded_rng(3));
        assert_eq!(ring.len(), 3);
        let indices: Vec<_> = (0..3).map(|i| ring.slot_index(i)).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        let slots = ring.slots();
        for a in 0..3 {
            for b in (a + 1)..3 {
                assert!(slots[a].position.distance(slots[b].position) > 0.1);
            }
        }
    }

    #[test]
    fn ring_wraps_when_population_exceeds_slots() {
        let ring = FocusRing::new(2, Vec3::ZERO, &mut seeded_rng(3));
        assert_eq!(ring.slot_index(5), 1);
        assert_eq!(ring.slot(4), ring.slot(0));
    }

    #[test]
    fn empty_ring_still_has_one_slot() {
        let ring = FocusRing::new(0, Vec3::ZERO, &mut seeded_rng(3));
        assert_eq!(ring.len(), 1);
        assert!(!ring.is_empty());
        assert!(ring.slot(7).is_some());
    }

    #[test]
    fn ring_radius_is_bounded() {
        let center = Vec3::new(0.0, 0.5, 0.0);
        let ring = FocusRing::new(200, center, &mut seeded_rng(9));
        for slot in ring.slots() {
            let flat = Vec3::new(slot.position.x, 0.0, slot.position.z);
            assert!(flat.length() >= 0.6 - 1e-5);
            assert!(flat.length() <= 2.9 + 0.16 + 0.06 + 1e-5);
        }
    }

    #[test]
    fn scatter_cards_face_inward() {
        let cards = scatter_layout(12, &mut seeded_rng(1));
        assert_eq!(cards.len(), 12);
        for card in cards {
            let r = card.radius();
            assert!((2.4 - 1e-4..=3.3 + 1e-4).contains(&r));
            assert!((-0.2..=1.8 + 1e-5).contains(&card.position.y));
            assert!((0.0..=SCATTER_HEIGHT).contains(&card.height));
            assert!((card.height - SCATTER_DROP - card.position.y).abs() < 1e-6);
            let rot = card.rotation.unwrap();
            let angle = card.position.z.atan2(card.position.x);
            let diff = (rot.y - PI - angle).rem_euclid(TAU);
            assert!(diff < 1e-4 || TAU - diff < 1e-4);
        }
    }
}
