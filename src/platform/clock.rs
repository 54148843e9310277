//! Frame timestamps and FPS

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Tracks animation-frame timestamps (ms)
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
    last_time: Option<f64>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
            last_time: None,
        }
    }

    /// Record a frame at `time` ms; returns ms since the previous frame
    pub fn record(&mut self, time: f64) -> f64 {
        let delta = self.last_time.map_or(0.0, |last| time - last);
        self.last_time = Some(time);

        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest slot is the one about to be overwritten
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = (((FPS_WINDOW - 1) as f64 * 1000.0) / elapsed).round() as u32;
            }
        }
        delta
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Forget history (after a restart or a long pause)
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
