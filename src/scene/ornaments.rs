//! Single-mesh decorations that read the control signal but are not
//! instanced: the cone silhouette, the star topper, the neon star outline,
//! the golden ribbon helix and the ground.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::signal::ControlSignal;

/// Dark cone filling the canopy so gaps between needles read as foliage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeSilhouette {
    /// Base radius.
    pub radius: f32,
    /// Height.
    pub height: f32,
    /// Radial segment count.
    pub radial_segments: u32,
    /// Opacity lost at full explosion.
    pub fade: f32,
    /// Explosion factor at which the cone is hidden.
    pub gate: f32,
}

/// Spinning octahedron on top of the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarTopper {
    /// Position in the body frame.
    pub position: Vec3,
    /// Uniform scale.
    pub scale: f32,
    /// Spin about X (rad/s).
    pub spin_x: f32,
    /// Spin about Y (rad/s).
    pub spin_y: f32,
    /// Explosion factor at which the star is hidden.
    pub gate: f32,
}

/// Closed neon outline of a five-pointed star above the topper.
#[derive(Debug, Clone, PartialEq)]
pub struct NeonStar {
    /// Position in the body frame.
    pub position: Vec3,
    /// Closed outline in the star's XY plane.
    pub outline: Vec<Vec3>,
    /// Opacity while assembled.
    pub peak_opacity: f32,
}

/// Golden tube spiralling up the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RibbonHelix {
    /// Control points in the body frame, bottom to top.
    pub path: Vec<Vec3>,
    /// Tube radius.
    pub tube_radius: f32,
}

/// Ground disc with a gold ring, in the tree frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ground {
    /// Disc centre.
    pub position: Vec3,
    /// Disc radius.
    pub disc_radius: f32,
    /// Ring inner radius.
    pub ring_inner: f32,
    /// Ring outer radius.
    pub ring_outer: f32,
    /// Ring opacity.
    pub ring_opacity: f32,
}

impl Default for Ground {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, -1.9, 0.0),
            disc_radius: 6.0,
            ring_inner: 2.0,
            ring_outer: 2.8,
            ring_opacity: 0.8,
        }
    }
}

/// Per-tick ornament state derived from the signal and the star spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrnamentState {
    /// Silhouette opacity.
    pub silhouette_opacity: f32,
    /// Whether the silhouette is drawn.
    pub silhouette_visible: bool,
    /// Accumulated star rotation (XYZ Euler radians).
    pub star_rotation: Vec3,
    /// Whether the star topper is drawn.
    pub star_visible: bool,
    /// Neon outline opacity.
    pub neon_opacity: f32,
    /// Ribbon helix opacity.
    pub ribbon_opacity: f32,
}

impl Default for OrnamentState {
    fn default() -> Self {
        Self {
            silhouette_opacity: 1.0,
            silhouette_visible: true,
            star_rotation: Vec3::ZERO,
            star_visible: true,
            neon_opacity: 0.85,
            ribbon_opacity: 1.0,
        }
    }
}

/// Star outline alternating between `outer` and `inner` radius, starting at
/// the top point and closed by repeating the first point.
#[must_use]
pub fn star_outline(points: usize, outer: f32, inner: f32) -> Vec<Vec3> {
    let mut outline: Vec<Vec3> = (0..points)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let a = (i as f32 / points as f32) * TAU - FRAC_PI_2;
            Vec3::new(a.cos() * r, a.sin() * r, 0.0)
        })
        .collect();
    if let Some(&first) = outline.first() {
        outline.push(first);
    }
    outline
}

/// Helix of `steps + 1` points rising `height` over `turns` revolutions;
/// the radius narrows from `base_radius` by `taper` of itself at the top.
#[must_use]
pub fn helix_path(
    steps: usize,
    turns: f32,
    height: f32,
    base_radius: f32,
    taper: f32,
    y_offset: f32,
) -> Vec<Vec3> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let angle = turns * TAU * t;
            let radius = base_radius * (1.0 - t * taper);
            Vec3::new(angle.cos() * radius, t * height + y_offset, angle.sin() * radius)
        })
        .collect()
}

/// Every non-instanced decoration plus its live state.
#[derive(Debug, Clone, PartialEq)]
pub struct Ornaments {
    /// Cone silhouette.
    pub silhouette: ConeSilhouette,
    /// Star topper.
    pub star: StarTopper,
    /// Neon star outline.
    pub neon: NeonStar,
    /// Ribbon helix.
    pub ribbon: RibbonHelix,
    /// Ground.
    pub ground: Ground,
    state: OrnamentState,
}

impl Ornaments {
    /// Decorations with the given star spin rates (rad/s).
    #[must_use]
    pub fn new(star_spin_x: f32, star_spin_y: f32) -> Self {
        Self {
            silhouette: ConeSilhouette {
                radius: 1.9,
                height: 4.3,
                radial_segments: 18,
                fade: 0.25,
                gate: 0.98,
            },
            star: StarTopper {
                position: Vec3::new(0.0, 2.6, 0.0),
                scale: 0.26,
                spin_x: star_spin_x,
                spin_y: star_spin_y,
                gate: 0.95,
            },
            neon: NeonStar {
                position: Vec3::new(0.0, 3.3, 0.0),
                outline: star_outline(10, 0.55, 0.24),
                peak_opacity: 0.85,
            },
            ribbon: RibbonHelix {
                path: helix_path(250, 3.8, 4.2, 1.75, 0.7, -1.6),
                tube_radius: 0.08,
            },
            ground: Ground::default(),
            state: OrnamentState::default(),
        }
    }

    /// Spin the star topper by `delta` seconds.
    pub fn advance(&mut self, delta: f32) {
        let rotation = &mut self.state.star_rotation;
        rotation.x = (rotation.x + delta * self.star.spin_x).rem_euclid(TAU);
        rotation.y = (rotation.y + delta * self.star.spin_y).rem_euclid(TAU);
    }

    /// Refresh opacities and visibility from the signal.
    pub fn update(&mut self, signal: &ControlSignal) {
        let f = signal.explosion_factor();
        let state = &mut self.state;

        state.silhouette_opacity = 1.0 - f * self.silhouette.fade;
        state.silhouette_visible = state.silhouette_opacity > 0.05 && f < self.silhouette.gate;
        state.star_visible = f < self.star.gate;
        state.neon_opacity = self.neon.peak_opacity * (1.0 - f);
        state.ribbon_opacity = 1.0 - f;
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &OrnamentState {
        &self.state
    }

    /// Star topper transform in the body frame.
    #[must_use]
    pub fn star_transform(&self) -> Mat4 {
        let r = self.state.star_rotation;
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.star.scale),
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.star.position,
        )
    }
}
