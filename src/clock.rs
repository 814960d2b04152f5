//! Monotonic frame clock.
//!
//! Tracks elapsed time since the animation started, the delta between ticks,
//! a frame counter, and an FPS average refreshed every half second.
//!
//! ```ignore
//! let mut clock = Clock::new();
//!
//! // once per frame:
//! let elapsed = clock.tick();
//! log::trace!("frame {} at {:.2}s ({:.1} fps)", clock.frame(), elapsed, clock.fps());
//! ```

use std::time::{Duration, Instant};

const FPS_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct Clock {
    start: Instant,
    last_tick: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_window_start: Instant,
    paused: bool,
    /// Wall time spent paused, excluded from `elapsed`.
    paused_total: Duration,
}

impl Clock {
    /// Create a clock starting now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a clock whose zero is `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last_tick: start,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_window_start: start,
            paused: false,
            paused_total: Duration::ZERO,
        }
    }

    /// Advance to the current instant. Returns elapsed seconds.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Advance to `now`. Returns elapsed seconds.
    ///
    /// While paused the elapsed time holds still and the delta is zero.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        if self.paused {
            self.delta_secs = 0.0;
            return self.elapsed_secs;
        }

        self.delta_secs = now.saturating_duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;

        let running = now
            .saturating_duration_since(self.start)
            .saturating_sub(self.paused_total);
        self.elapsed_secs = running.as_secs_f32();

        self.frame_count += 1;

        let window = now.saturating_duration_since(self.fps_window_start);
        if window >= FPS_WINDOW {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / window.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_window_start = now;
        }

        self.elapsed_secs
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    pub fn resume_at(&mut self, now: Instant) {
        if self.paused {
            self.paused_total += now.saturating_duration_since(self.last_tick);
            self.last_tick = now;
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
