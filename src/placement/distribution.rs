//! Parameterized cone-shaped sampling distribution and per-group presets.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use super::Placement;

/// Inclusive-exclusive sampling span `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl Span {
    /// Span from `min` to `max`.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Degenerate span that always samples `value`.
    #[must_use]
    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Draw a uniform sample.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.random::<f32>() * (self.max - self.min)
    }
}

/// Occasional extra height that lets a few particles poke above the cone,
/// breaking up a perfectly conical silhouette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightBoost {
    /// Chance in `[0, 1]` that a particle receives a boost.
    pub probability: f32,
    /// Largest height added by a boost.
    pub magnitude: f32,
}

/// How a placement's optional rotation is produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationMode {
    /// No rotation is stored.
    None,
    /// Independent uniform pitch, yaw and roll (XYZ Euler radians).
    Random {
        /// Rotation about X.
        pitch: Span,
        /// Rotation about Y.
        yaw: Span,
        /// Rotation about Z.
        roll: Span,
    },
    /// Deterministic tilt from the instance index (`a·sin i`, `a·cos i`)
    /// with a random yaw, so neighbouring boxes lean in different
    /// directions.
    Wobble {
        /// Tilt amplitude in radians.
        amplitude: f32,
    },
}

/// Radius-by-height weighted distribution filling a cone.
///
/// Heights are drawn as `max_height · u^height_exponent`; exponents below 1
/// push density toward the base. The radius at height `h` shrinks linearly
/// from `base_radius` at the ground to `apex_floor` at `taper_height`, then
/// gets multiplied by a random `spread` so the volume is filled rather than
/// just the shell.
#[derive(Debug, Clone, PartialEq)]
pub struct ConeDistribution {
    /// Tallest sampled height.
    pub max_height: f32,
    /// Height at which the cone radius reaches `apex_floor`.
    pub taper_height: f32,
    /// Cone radius at the ground.
    pub base_radius: f32,
    /// Constant radius added at every height.
    pub apex_floor: f32,
    /// Exponent applied to the uniform height sample.
    pub height_exponent: f32,
    /// Optional outlier boost.
    pub boost: Option<HeightBoost>,
    /// Radial fill factor.
    pub spread: Span,
    /// Extra independent x/z scatter.
    pub lateral_jitter: Option<Span>,
    /// Amount subtracted from the sampled height to place the base.
    pub vertical_offset: f32,
    /// Full width of symmetric y noise.
    pub vertical_jitter: f32,
    /// Base scale range.
    pub scale: Span,
    /// Rotation sampling.
    pub rotation: RotationMode,
    /// Box of noise added before normalizing the explosion direction.
    /// x and z are symmetric around zero, y is upward only.
    pub direction_jitter: Vec3,
}

/// Default explosion-direction noise: outward with an upward bias.
const DIRECTION_JITTER: Vec3 = Vec3::new(0.8, 1.2, 0.8);

impl ConeDistribution {
    /// Dense canopy needles around the tree body.
    #[must_use]
    pub fn foliage() -> Self {
        Self {
            max_height: 4.1,
            taper_height: 4.1,
            base_radius: 2.0,
            apex_floor: 0.1,
            height_exponent: 0.9,
            boost: Some(HeightBoost {
                probability: 0.28,
                magnitude: 0.6,
            }),
            spread: Span::new(0.45, 1.05),
            lateral_jitter: None,
            vertical_offset: 1.5,
            vertical_jitter: 0.0,
            scale: Span::new(0.022, 0.052),
            rotation: RotationMode::None,
            direction_jitter: DIRECTION_JITTER,
        }
    }

    /// Tiny glowing specks woven through the foliage.
    #[must_use]
    pub fn light_specks() -> Self {
        Self {
            max_height: 4.1,
            taper_height: 4.1,
            base_radius: 2.0,
            apex_floor: 0.0,
            height_exponent: 0.9,
            boost: Some(HeightBoost {
                probability: 0.25,
                magnitude: 0.45,
            }),
            spread: Span::new(0.5, 1.0),
            lateral_jitter: None,
            vertical_offset: 1.45,
            vertical_jitter: 0.06,
            scale: Span::new(0.014, 0.034),
            rotation: RotationMode::None,
            direction_jitter: DIRECTION_JITTER,
        }
    }

    /// Baubles hanging close to the canopy surface.
    #[must_use]
    pub fn ornaments() -> Self {
        Self {
            max_height: 4.0,
            taper_height: 4.0,
            base_radius: 1.8,
            apex_floor: 0.1,
            height_exponent: 0.9,
            boost: Some(HeightBoost {
                probability: 0.3,
                magnitude: 0.48,
            }),
            spread: Span::new(0.88, 1.04),
            lateral_jitter: None,
            vertical_offset: 1.5,
            vertical_jitter: 0.0,
            scale: Span::new(0.06, 0.14),
            rotation: RotationMode::None,
            direction_jitter: DIRECTION_JITTER,
        }
    }

    /// Small gift boxes tucked into the tree body.
    #[must_use]
    pub fn gift_boxes() -> Self {
        Self {
            max_height: 3.6,
            taper_height: 3.6,
            base_radius: 1.4,
            apex_floor: 0.0,
            height_exponent: 0.8,
            boost: None,
            spread: Span::new(0.7, 1.2),
            lateral_jitter: None,
            vertical_offset: 1.3,
            vertical_jitter: 0.0,
            scale: Span::new(0.08, 0.12),
            rotation: RotationMode::Wobble { amplitude: 0.2 },
            direction_jitter: DIRECTION_JITTER,
        }
    }

    /// White voxel fragments that fly apart first.
    #[must_use]
    pub fn voxels() -> Self {
        Self {
            taper_height: 4.0,
            base_radius: 1.8,
            vertical_offset: 1.3,
            ..Self::burst(3.6, Span::new(0.035, 0.105))
        }
    }

    /// Uniform-height burst fragments (spheres, snow).
    #[must_use]
    pub fn burst(max_height: f32, scale: Span) -> Self {
        Self {
            max_height,
            taper_height: max_height,
            base_radius: 2.0,
            apex_floor: 0.0,
            height_exponent: 1.0,
            boost: None,
            spread: Span::new(0.6, 1.2),
            lateral_jitter: Some(Span::new(0.9, 1.05)),
            vertical_offset: 1.4,
            vertical_jitter: 0.0,
            scale,
            rotation: RotationMode::None,
            direction_jitter: DIRECTION_JITTER,
        }
    }

    /// Burst gift boxes with a random resting tilt.
    #[must_use]
    pub fn burst_boxes(scale: Span) -> Self {
        Self {
            rotation: RotationMode::Random {
                pitch: Span::new(0.0, 0.5),
                yaw: Span::new(0.0, TAU),
                roll: Span::new(0.0, 0.5),
            },
            ..Self::burst(3.8, scale)
        }
    }

    /// Flat golden cards mixed into the burst.
    #[must_use]
    pub fn burst_cards() -> Self {
        Self {
            rotation: RotationMode::Random {
                pitch: Span::new(0.0, 0.4),
                yaw: Span::new(0.0, TAU),
                roll: Span::new(0.0, 0.3),
            },
            ..Self::burst(3.8, Span::new(0.08, 0.12))
        }
    }

    /// Draw one placement. `index` only feeds index-derived rotation modes.
    pub fn sample<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> Placement {
        let max_height = self.max_height.max(0.0);

        let u: f32 = rng.random();
        let mut h = max_height * u.powf(self.height_exponent);
        if let Some(boost) = self.boost {
            if rng.random::<f32>() < boost.probability {
                h += rng.random::<f32>() * boost.magnitude;
            }
        }
        let h = h.clamp(0.0, max_height);

        let taper = if self.taper_height > 0.0 {
            1.0 - h / self.taper_height
        } else {
            0.0
        };
        let cone_radius = (self.base_radius * taper + self.apex_floor).max(0.0);
        let radius = cone_radius * self.spread.sample(rng).max(0.0);

        let angle = rng.random::<f32>() * TAU;
        let (jx, jz) = self.lateral_jitter.map_or((1.0, 1.0), |span| {
            (span.sample(rng).max(0.0), span.sample(rng).max(0.0))
        });
        let y_noise = if self.vertical_jitter > 0.0 {
            (rng.random::<f32>() - 0.5) * self.vertical_jitter
        } else {
            0.0
        };
        let position = Vec3::new(
            angle.cos() * radius * jx,
            h - self.vertical_offset + y_noise,
            angle.sin() * radius * jz,
        );

        let jitter = Vec3::new(
            (rng.random::<f32>() - 0.5) * self.direction_jitter.x,
            rng.random::<f32>() * self.direction_jitter.y,
            (rng.random::<f32>() - 0.5) * self.direction_jitter.z,
        );
        let direction = (position + jitter).try_normalize().unwrap_or(Vec3::Y);

        let base_scale = self.scale.sample(rng).max(0.0);
        let rotation = match self.rotation {
            RotationMode::None => None,
            RotationMode::Random { pitch, yaw, roll } => Some(Vec3::new(
                pitch.sample(rng),
                yaw.sample(rng),
                roll.sample(rng),
            )),
            RotationMode::Wobble { amplitude } => {
                let i = index as f32;
                let yaw = rng.random::<f32>() * TAU;
                Some(Vec3::new(amplitude * i.sin(), yaw, amplitude * i.cos()))
            }
        };
        let phase = rng.random::<f32>() * TAU;

        Placement {
            position,
            direction,
            base_scale,
            rotation,
            phase,
            height: h,
        }
    }
}
