use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::signal::{ControlSignal, ProximityBand};

/// Proximity band and smoothing for the control signal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Signal", inline)]
#[serde(default)]
pub struct SignalOptions {
    /// Camera distance at which the tree starts to burst.
    #[schemars(title = "Burst Start", range(min = 3.0, max = 12.0), extend("step" = 0.1))]
    pub band_start: f32,
    /// Camera distance at which the burst is complete.
    #[schemars(title = "Burst End", range(min = 1.0, max = 10.0), extend("step" = 0.1))]
    pub band_end: f32,
    /// Fraction of the remaining gap closed per tick.
    #[schemars(title = "Smoothing", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub smoothing: f32,
}

impl Default for SignalOptions {
    fn default() -> Self {
        let band = ProximityBand::default();
        Self {
            band_start: band.start,
            band_end: band.end,
            smoothing: ControlSignal::DEFAULT_SMOOTHING,
        }
    }
}

impl SignalOptions {
    /// Band described by these options.
    #[must_use]
    pub fn band(&self) -> ProximityBand {
        ProximityBand {
            start: self.band_start,
            end: self.band_end,
        }
    }

    /// Assembled signal configured from these options.
    #[must_use]
    pub fn build(&self) -> ControlSignal {
        ControlSignal::new(self.band(), self.smoothing)
    }
}
