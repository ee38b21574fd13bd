//! Static background star field.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

/// Points scattered over a spherical shell around the world origin.
#[derive(Debug, Clone, PartialEq)]
pub struct StarField {
    points: Vec<Vec3>,
    inner_radius: f32,
    outer_radius: f32,
}

impl StarField {
    /// Default shell inner radius.
    pub const INNER_RADIUS: f32 = 40.0;
    /// Default shell outer radius.
    pub const OUTER_RADIUS: f32 = 60.0;

    /// `count` stars with directions uniform over the sphere and radii
    /// uniform in `[inner, outer]`.
    pub fn generate<R: Rng + ?Sized>(
        count: usize,
        inner_radius: f32,
        outer_radius: f32,
        rng: &mut R,
    ) -> Self {
        let (inner_radius, outer_radius) = if inner_radius <= outer_radius {
            (inner_radius, outer_radius)
        } else {
            (outer_radius, inner_radius)
        };
        let points = (0..count)
            .map(|_| {
                let z = rng.random::<f32>() * 2.0 - 1.0;
                let phi = rng.random::<f32>() * TAU;
                let ring = (1.0 - z * z).max(0.0).sqrt();
                let radius = inner_radius + rng.random::<f32>() * (outer_radius - inner_radius);
                Vec3::new(ring * phi.cos(), z, ring * phi.sin()) * radius
            })
            .collect();
        Self {
            points,
            inner_radius,
            outer_radius,
        }
    }

    /// Star positions in world space.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Number of stars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shell radii `(inner, outer)`.
    #[must_use]
    pub fn shell(&self) -> (f32, f32) {
        (self.inner_radius, self.outer_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::seeded_rng;

    #[test]
    fn stars_lie_on_shell() {
        let field = StarField::generate(
            1800,
            StarField::INNER_RADIUS,
            StarField::OUTER_RADIUS,
            &mut seeded_rng(5),
        );
        assert_eq!(field.len(), 1800);
        for p in field.points() {
            let r = p.length();
            assert!((40.0 - 1e-3..=60.0 + 1e-3).contains(&r), "radius {r}");
        }
    }

    #[test]
    fn directions_cover_both_hemispheres() {
        let field = StarField::generate(2000, 40.0, 60.0, &mut seeded_rng(6));
        let above = field.points().iter().filter(|p| p.y > 0.0).count();
        assert!((800..1200).contains(&above));
        let mean = field.points().iter().copied().sum::<Vec3>() / 2000.0;
        assert!(mean.length() < 5.0);
    }

    #[test]
    fn swapped_radii_are_normalized() {
        let field = StarField::generate(3, 60.0, 40.0, &mut seeded_rng(1));
        assert_eq!(field.shell(), (40.0, 60.0));
        assert!(StarField::generate(0, 40.0, 60.0, &mut seeded_rng(1)).is_empty());
    }
}
