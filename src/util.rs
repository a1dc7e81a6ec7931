//! Shared utilities

use crate::board::Color;
use std::collections::VecDeque;
use std::time::Instant;

/// Mix colored lights: sum each color weighted by its alpha, saturating at 255.
/// The result is always opaque.
pub fn additive_blend(colors: &[Color]) -> Color {
    let (mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32);
    for c in colors {
        let alpha = c.a as f32 / 255.0;
        r += c.r as f32 * alpha;
        g += c.g as f32 * alpha;
        b += c.b as f32 * alpha;
    }
    Color::rgb(
        r.min(255.0) as u8,
        g.min(255.0) as u8,
        b.min(255.0) as u8,
    )
}

// ============================================================================
// FPS Counter
// ============================================================================

/// FPS counter with rolling average
pub struct FpsCounter {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    sample_count: usize,
}

impl FpsCounter {
    /// Create a new FPS counter with specified sample window
    pub fn new(sample_count: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: Instant::now(),
            sample_count: sample_count.max(1),
        }
    }

    /// Call at the start of each frame to record timing
    /// Returns (delta_time, average_fps)
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.record(dt);
        (dt, self.average_fps())
    }

    fn record(&mut self, dt: f32) {
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }
    }

    fn average_dt(&self) -> f32 {
        self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32
    }

    pub fn average_fps(&self) -> f32 {
        let avg_dt = self.average_dt();
        if avg_dt > 0.0 {
            1.0 / avg_dt
        } else {
            0.0
        }
    }

    /// Get the average frame time in milliseconds
    pub fn avg_frame_time_ms(&self) -> f32 {
        self.average_dt() * 1000.0
    }

    /// Whether the rolling window has been filled since the last reset
    pub fn window_full(&self) -> bool {
        self.frame_times.len() >= self.sample_count
    }

    pub fn reset(&mut self) {
        self.frame_times.clear();
    }
}
