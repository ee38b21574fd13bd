//! Camera-proximity control signal.
//!
//! The whole scene animates from one smoothed scalar pair. Every tick the
//! scene derives an instantaneous `collapse_target` from how far the camera
//! has pushed into a [`ProximityBand`], then moves `explosion_factor` a fixed
//! fraction of the remaining gap toward it (first-order low-pass). The
//! factor is never assigned directly, so camera jumps never pop the scene.

/// Camera-distance band that drives disassembly.
///
/// Outside `start` the tree is assembled; at or inside `end` it is fully
/// exploded; in between the target rises linearly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityBand {
    /// Distance at which bursting begins.
    pub start: f32,
    /// Distance at which bursting is complete.
    pub end: f32,
}

impl Default for ProximityBand {
    fn default() -> Self {
        Self {
            start: 6.5,
            end: 4.5,
        }
    }
}

impl ProximityBand {
    /// Unsmoothed explosion target for a camera distance, in `[0, 1]`.
    ///
    /// An inverted or empty band (`start <= end`) behaves as a step at
    /// `start`. A band with a non-finite edge never bursts.
    #[must_use]
    pub fn target(&self, camera_distance: f32) -> f32 {
        if !(self.start.is_finite() && self.end.is_finite()) {
            return 0.0;
        }
        let width = self.start - self.end;
        if width <= 0.0 {
            return if camera_distance < self.start { 1.0 } else { 0.0 };
        }
        let target = (self.start - camera_distance) / width;
        if target.is_finite() {
            target.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Smoothed explosion factor plus its instantaneous target.
///
/// Owned by the scene and written once per tick via [`Self::update`]; every
/// particle group reads it through a shared borrow afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSignal {
    explosion_factor: f32,
    collapse_target: f32,
    smoothing: f32,
    band: ProximityBand,
}

impl Default for ControlSignal {
    fn default() -> Self {
        Self::new(ProximityBand::default(), Self::DEFAULT_SMOOTHING)
    }
}

impl ControlSignal {
    /// Fraction of the remaining gap closed per tick.
    pub const DEFAULT_SMOOTHING: f32 = 0.08;

    /// Assembled signal (both values 0). `smoothing` is clamped to `[0, 1]`;
    /// a non-finite value falls back to [`Self::DEFAULT_SMOOTHING`].
    #[must_use]
    pub fn new(band: ProximityBand, smoothing: f32) -> Self {
        let smoothing = if smoothing.is_finite() {
            smoothing.clamp(0.0, 1.0)
        } else {
            Self::DEFAULT_SMOOTHING
        };
        Self {
            explosion_factor: 0.0,
            collapse_target: 0.0,
            smoothing,
            band,
        }
    }

    /// Recompute the target from the live camera distance and advance the
    /// smoothed factor one step.
    ///
    /// Non-finite distances are ignored for this tick.
    pub fn update(&mut self, camera_distance: f32) {
        if !camera_distance.is_finite() {
            log::warn!("ignoring non-finite camera distance {camera_distance}");
            return;
        }
        self.collapse_target = self.band.target(camera_distance);
        self.step();
    }

    fn step(&mut self) {
        let gap = self.collapse_target - self.explosion_factor;
        self.explosion_factor = (self.explosion_factor + gap * self.smoothing).clamp(0.0, 1.0);
    }

    /// Smoothed dispersion in `[0, 1]`.
    #[must_use]
    pub fn explosion_factor(&self) -> f32 {
        self.explosion_factor
    }

    /// Instantaneous target in `[0, 1]`.
    #[must_use]
    pub fn collapse_target(&self) -> f32 {
        self.collapse_target
    }

    /// Per-tick smoothing constant.
    #[must_use]
    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }

    /// Proximity band in use.
    #[must_use]
    pub fn band(&self) -> ProximityBand {
        self.band
    }

    /// Whether the factor is within `epsilon` of its target.
    #[must_use]
    pub fn is_settled(&self, epsilon: f32) -> bool {
        (self.collapse_target - self.explosion_factor).abs() <= epsilon
    }

    /// Signal frozen at the given values, for exercising readers.
    #[cfg(test)]
    pub(crate) fn with_state(explosion_factor: f32, collapse_target: f32) -> Self {
        Self {
            explosion_factor: explosion_factor.clamp(0.0, 1.0),
            collapse_target: collapse_target.clamp(0.0, 1.0),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn band_maps_distance_linearly() {
        let band = ProximityBand::default();
        assert_eq!(band.target(9.0), 0.0);
        assert_eq!(band.target(6.5), 0.0);
        assert!((band.target(5.5) - 0.5).abs() < 1e-6);
        assert_eq!(band.target(4.5), 1.0);
        assert_eq!(band.target(3.8), 1.0);
    }

    #[test]
    fn inverted_band_is_a_step() {
        let band = ProximityBand {
            start: 4.0,
            end: 5.0,
        };
        assert_eq!(band.target(4.5), 0.0);
        assert_eq!(band.target(3.9), 1.0);
    }

    #[test]
    fn starts_assembled() {
        let signal = ControlSignal::default();
        assert_eq!(signal.explosion_factor(), 0.0);
        assert_eq!(signal.collapse_target(), 0.0);
        assert!(signal.is_settled(0.0));
    }

    #[test]
    fn converges_monotonically_within_sixty_ticks() {
        let mut signal = ControlSignal::default();
        let mut prev = signal.explosion_factor();
        let mut settled_at = None;
        for tick in 1..=60 {
            signal.update(4.0);
            assert_eq!(signal.collapse_target(), 1.0);
            assert!(signal.explosion_factor() >= prev);
            prev = signal.explosion_factor();
            if settled_at.is_none() && 1.0 - prev <= 0.01 {
                settled_at = Some(tick);
            }
        }
        assert!(settled_at.is_some(), "factor {prev} not within 0.01 of 1");
    }

    #[test]
    fn camera_jump_does_not_pop() {
        let mut signal = ControlSignal::default();
        signal.update(20.0);
        signal.update(0.5);
        assert_eq!(signal.collapse_target(), 1.0);
        assert!((signal.explosion_factor() - 0.08).abs() < 1e-6);
    }

    #[test]
    fn non_finite_distance_is_ignored() {
        let mut signal = ControlSignal::default();
        signal.update(5.0);
        let before = signal.clone();
        signal.update(f32::NAN);
        signal.update(f32::INFINITY);
        assert_eq!(signal, before);
    }

    #[test]
    fn smoothing_is_clamped() {
        let signal = ControlSignal::new(ProximityBand::default(), 3.0);
        assert_eq!(signal.smoothing(), 1.0);
        let signal = ControlSignal::new(ProximityBand::default(), -1.0);
        assert_eq!(signal.smoothing(), 0.0);
    }

    #[test]
    fn non_finite_smoothing_uses_default() {
        for smoothing in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let mut signal = ControlSignal::new(ProximityBand::default(), smoothing);
            assert_eq!(signal.smoothing(), ControlSignal::DEFAULT_SMOOTHING);
            signal.update(4.0);
            assert!((signal.explosion_factor() - 0.08).abs() < 1e-6);
        }
    }

    #[test]
    fn non_finite_band_stays_assembled() {
        let bands = [
            ProximityBand { start: f32::NAN, end: 4.5 },
            ProximityBand { start: 6.5, end: f32::NAN },
            ProximityBand { start: f32::INFINITY, end: 4.5 },
            ProximityBand { start: 6.5, end: f32::NEG_INFINITY },
        ];
        for band in bands {
            let mut signal = ControlSignal::new(band, ControlSignal::DEFAULT_SMOOTHING);
            for d in [0.0, 5.0, 9.0] {
                signal.update(d);
                assert_eq!(signal.collapse_target(), 0.0, "{band:?} at {d}");
                assert_eq!(signal.explosion_factor(), 0.0, "{band:?} at {d}");
            }
        }
    }

    proptest! {
        #[test]
        fn oscillating_target_stays_bounded(
            distances in prop::collection::vec(0.0f32..12.0, 1..200)
        ) {
            let mut signal = ControlSignal::default();
            for d in distances {
                let before = signal.explosion_factor();
                signal.update(d);
                let after = signal.explosion_factor();
                let gap = (signal.collapse_target() - before).abs();
                prop_assert!((0.0..=1.0).contains(&after));
                prop_assert!((after - before).abs() <= gap * signal.smoothing() + 1e-6);
            }
        }
    }
}
