use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::photo::FocusTuning;

/// Photo focus tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Photos", inline)]
#[serde(default)]
pub struct PhotoOptions {
    /// Focus ring slot count. Defaults to the number of photos.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(skip)]
    pub ring_size: Option<usize>,
    /// How far the focus blend leads the explosion factor.
    #[schemars(title = "Focus Lead", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub focus_lead: f32,
    /// Vertical bob amplitude while scattered.
    #[schemars(title = "Float Amplitude", range(min = 0.0, max = 0.5), extend("step" = 0.01))]
    pub float_amplitude: f32,
    /// Bob angular frequency (rad/s).
    #[schemars(skip)]
    pub float_frequency: f32,
    /// Fraction of the bob removed at full focus.
    #[schemars(skip)]
    pub float_settle: f32,
    /// Idle yaw spin (rad/s).
    #[schemars(title = "Spin Rate", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub spin_rate: f32,
    /// Fraction of the spin removed at full focus.
    #[schemars(skip)]
    pub spin_settle: f32,
    /// Blend above which cards face the viewer.
    #[schemars(title = "Billboard Threshold", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub billboard_threshold: f32,
    /// Fraction of card roll kept while facing the viewer.
    #[schemars(skip)]
    pub billboard_roll: f32,
    /// Extra scale at full focus.
    #[schemars(title = "Focus Growth", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub focus_growth: f32,
}

impl Default for PhotoOptions {
    fn default() -> Self {
        let tuning = FocusTuning::default();
        Self {
            ring_size: None,
            focus_lead: tuning.focus_lead,
            float_amplitude: tuning.float_amplitude,
            float_frequency: tuning.float_frequency,
            float_settle: tuning.float_settle,
            spin_rate: tuning.spin_rate,
            spin_settle: tuning.spin_settle,
            billboard_threshold: tuning.billboard_threshold,
            billboard_roll: tuning.billboard_roll,
            focus_growth: tuning.focus_growth,
        }
    }
}

impl PhotoOptions {
    /// Focus tuning described by these options.
    #[must_use]
    pub fn tuning(&self) -> FocusTuning {
        FocusTuning {
            focus_lead: self.focus_lead,
            float_amplitude: self.float_amplitude,
            float_frequency: self.float_frequency,
            float_settle: self.float_settle,
            spin_rate: self.spin_rate,
            spin_settle: self.spin_settle,
            billboard_threshold: self.billboard_threshold,
            billboard_roll: self.billboard_roll,
            focus_growth: self.focus_growth,
        }
    }
}
