//! Rolling frame-rate sampler.
//!
//! The host calls [`PerformanceMonitor::record_frame`] once per animation
//! frame while the monitor runs. Every time a one-second window elapses the
//! fps estimate is recomputed and the window restarts. After `stop()` frames
//! are ignored and the host should stop re-arming its frame callback.

use crate::constants::*;
use instant::Instant;
use std::time::Duration;

/// One closed measurement window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerformanceSample {
    pub fps: f32,
    pub frame_count: u32,
    pub window_start: Instant,
    /// Set when the window fell below the low-fps threshold.
    pub low_fps: bool,
}

#[derive(Debug)]
pub struct PerformanceMonitor {
    label: String,
    running: bool,
    fps: f32,
    frame_count: u32,
    window_start: Instant,
}

#[inline]
fn elapsed_ms(since: Instant, now: Instant) -> f64 {
    let d = if now > since { now - since } else { Duration::ZERO };
    d.as_secs_f64() * 1000.0
}

impl PerformanceMonitor {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            running: false,
            fps: DEFAULT_FPS,
            frame_count: 0,
            window_start: Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Begin sampling with the first window opening at `now`. No-op while running.
    pub fn start_at(&mut self, now: Instant) {
        if self.running {
            return;
        }
        self.running = true;
        self.frame_count = 0;
        self.window_start = now;
        log::debug!("[monitor] {} started", self.label);
    }

    /// Halt sampling. The partial window is discarded and the estimate
    /// returns to its idle default.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.frame_count = 0;
        self.fps = DEFAULT_FPS;
        log::debug!("[monitor] {} stopped", self.label);
    }

    /// Count one rendered frame. Returns the closed window when this frame
    /// completes one, and `None` otherwise or when stopped.
    pub fn record_frame(&mut self, now: Instant) -> Option<PerformanceSample> {
        if !self.running {
            return None;
        }
        self.frame_count += 1;
        let elapsed = elapsed_ms(self.window_start, now);
        if elapsed < FPS_WINDOW_MS {
            return None;
        }
        self.fps = (self.frame_count as f64 * 1000.0 / elapsed) as f32;
        let sample = PerformanceSample {
            fps: self.fps,
            frame_count: self.frame_count,
            window_start: self.window_start,
            low_fps: self.fps < LOW_FPS_THRESHOLD,
        };
        if sample.low_fps {
            // one diagnostic per closed window
            log::warn!(
                "[monitor] {} low frame rate: {:.1} fps over {} frames",
                self.label,
                sample.fps,
                sample.frame_count
            );
        }
        self.frame_count = 0;
        self.window_start = now;
        Some(sample)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn current_fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_performance_good(&self) -> bool {
        self.fps >= GOOD_FPS_THRESHOLD
    }

    /// Frames counted in the currently open window.
    #[inline]
    pub fn pending_frames(&self) -> u32 {
        self.frame_count
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
