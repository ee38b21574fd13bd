use web_time::{Duration, Instant};

/// Time values handed to one scene tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
}

impl FrameInput {
    /// Frame input for a fixed-step simulation at `step` seconds per frame.
    #[must_use]
    pub fn fixed(frame: u32, step: f32) -> Self {
        Self {
            elapsed: frame as f32 * step,
            delta: step,
        }
    }
}

/// Frame clock with FPS calculation and optional frame limiting
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Clock origin for elapsed time
    started: Instant,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame clock with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        let now = Instant::now();
        Self {
            target_fps,
            min_frame_duration,
            started: now,
            last_frame: now,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    /* 5% new value, 95% old value for smooth
                                 * display */
        }
    }

    /// Returns true if enough time has passed since the last frame to tick
    /// again.
    #[must_use]
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Close the current frame and return the time values for the next
    /// tick.
    pub fn advance(&mut self) -> FrameInput {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            // Exponential moving average for smooth display
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }

        FrameInput {
            elapsed: now.duration_since(self.started).as_secs_f32(),
            delta: frame_time,
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_step_input() {
        let input = FrameInput::fixed(30, 1.0 / 60.0);
        assert!((input.elapsed - 0.5).abs() < 1e-6);
        assert!((input.delta - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn unlimited_clock_always_renders() {
        let timing = FrameTiming::new(0);
        assert!(timing.should_render());
    }

    #[test]
    fn advance_is_monotonic() {
        let mut timing = FrameTiming::new(0);
        let a = timing.advance();
        let b = timing.advance();
        assert!(b.elapsed >= a.elapsed);
        assert!(b.delta >= 0.0);
        assert!(timing.fps() > 0.0);
    }
}
