//! Easing functions for animation interpolation.
//!
//! Provides the easing curves used to shape blend factors (photo focus blend,
//! scripted camera dollies). All functions are branch-light and allocation
//! free; they run once per card per frame.

/// Easing function variants for animation curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    #[default]
    Linear,
    /// Cubic smoothstep `3t² - 2t³` (ease-in/ease-out, zero slope at both
    /// ends).
    SmoothStep,
}

impl EasingFunction {
    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0], and hits both endpoints
    /// exactly.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}
