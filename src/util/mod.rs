//! Shared utilities for the scene engine.
//!
//! Helpers for frame timing, easing curves, and small vector math.

/// Easing curves for blend factors.
pub mod easing;
/// Frame clock and per-tick time input.
pub mod frame_timing;
/// Exact lerp and look-at rotation helpers.
pub mod math;
