//! Random placement generation.
//!
//! A [`Placement`] is the immutable spatial anchor of one particle instance.
//! Populations are drawn once at scene construction from a
//! [`ConeDistribution`] and never mutated afterwards; per-frame transforms
//! are derived from them by [`crate::instancing`].
//!
//! Generation is seeded so populations are reproducible across runs and in
//! tests.

mod distribution;

pub use distribution::{ConeDistribution, HeightBoost, RotationMode, Span};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random number generator used for placement populations.
pub type PlacementRng = StdRng;

/// Deterministic generator for the given seed.
#[must_use]
pub fn seeded_rng(seed: u64) -> PlacementRng {
    StdRng::seed_from_u64(seed)
}

/// Immutable spatial anchor for one particle instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Rest position in the owning group's frame.
    pub position: Vec3,
    /// Unit explosion trajectory.
    pub direction: Vec3,
    /// Scale at rest.
    pub base_scale: f32,
    /// Optional resting rotation (XYZ Euler, radians).
    pub rotation: Option<Vec3>,
    /// Motion phase offset in `[0, 2π)`.
    pub phase: f32,
    /// Sampled canopy height before the vertical offset was applied.
    pub height: f32,
}

impl Placement {
    /// Horizontal distance from the tree axis.
    #[must_use]
    pub fn radius(&self) -> f32 {
        Vec2::new(self.position.x, self.position.z).length()
    }
}

/// Draw `count` independent placements.
///
/// `count == 0` yields an empty population.
pub fn generate<R: Rng + ?Sized>(
    count: usize,
    distribution: &ConeDistribution,
    rng: &mut R,
) -> Vec<Placement> {
    (0..count).map(|i| distribution.sample(i, rng)).collect()
}

/// Split a population into buckets, assigning each placement to bucket `k`
/// with probability proportional to `weights[k]`.
///
/// Returns one (possibly empty) vector per weight. With no weights, or only
/// non-positive ones, everything lands in the first bucket.
pub fn partition_weighted<R: Rng + ?Sized>(
    placements: Vec<Placement>,
    weights: &[f32],
    rng: &mut R,
) -> Vec<Vec<Placement>> {
    let mut buckets: Vec<Vec<Placement>> = (0..weights.len().max(1)).map(|_| Vec::new()).collect();
    let total: f32 = weights.iter().map(|w| w.max(0.0)).sum();

    for placement in placements {
        let bucket = if total > 0.0 {
            let pick = rng.random::<f32>() * total;
            let mut acc = 0.0;
            weights
                .iter()
                .position(|w| {
                    acc += w.max(0.0);
                    pick < acc
                })
                .unwrap_or(weights.len() - 1)
        } else {
            0
        };
        buckets[bucket].push(placement);
    }
    buckets
}
