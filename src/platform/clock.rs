//! Frame loop timing
//!
//! The host calls `tick(now)` once per displayed frame with a monotonic
//! timestamp. While running it hands back the elapsed milliseconds, clamped so
//! a long stall (tab hidden, debugger pause) doesn't arrive as one huge step.

/// Largest dt handed to the game in one frame
pub const MAX_FRAME_DT_MS: f32 = 100.0;

#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    running: bool,
    last_frame_ms: Option<f64>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin ticking; false if already running
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.last_frame_ms = Some(now_ms);
        true
    }

    /// Stop ticking; false if already stopped
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.last_frame_ms = None;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Milliseconds since the previous frame, or `None` when stopped
    pub fn tick(&mut self, now_ms: f64) -> Option<f32> {
        if !self.running {
            return None;
        }
        let last = self.last_frame_ms.replace(now_ms).unwrap_or(now_ms);
        let dt = (now_ms - last).max(0.0) as f32;
        Some(dt.min(MAX_FRAME_DT_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_ticks_until_started() {
        let mut frame_loop = FrameLoop::new();
        assert_eq!(frame_loop.tick(10.0), None);
        assert!(frame_loop.start(10.0));
        assert_eq!(frame_loop.tick(26.0), Some(16.0));
    }

    #[test]
    fn test_start_and_stop_are_idempotent() {
        let mut frame_loop = FrameLoop::new();
        assert!(frame_loop.start(0.0));
        assert!(!frame_loop.start(50.0));
        // Second start didn't move the reference time
        assert_eq!(frame_loop.tick(20.0), Some(20.0));

        assert!(frame_loop.stop());
        assert!(!frame_loop.stop());
        assert!(!frame_loop.is_running());
        assert_eq!(frame_loop.tick(40.0), None);
    }

    #[test]
    fn test_restart_does_not_count_stopped_time() {
        let mut frame_loop = FrameLoop::new();
        frame_loop.start(0.0);
        frame_loop.stop();
        frame_loop.start(5_000.0);
        assert_eq!(frame_loop.tick(5_010.0), Some(10.0));
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut frame_loop = FrameLoop::new();
        frame_loop.start(0.0);
        assert_eq!(frame_loop.tick(3_000.0), Some(MAX_FRAME_DT_MS));
        // Clock going backwards yields a zero step
        assert_eq!(frame_loop.tick(2_000.0), Some(0.0));
    }
}
