//! Per-frame uniform updates.
//!
//! The driver never touches point buffers. Each tick it reads the clock,
//! writes the elapsed time, and recomputes the point size from the base size,
//! the device pixel ratio and the current [`SizePulse`].

use crate::clock::Clock;
use crate::shading::ShadingUniforms;

/// Base sprite size in logical pixels.
pub const BASE_POINT_SIZE: f32 = 80.0;
/// Extra size per unit of zoom intensity.
pub const ZOOM_SIZE_BOOST: f32 = 20.0;
/// Pixel ratios above this are clamped.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// How the point size is modulated this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizePulse {
    /// Plain base size.
    None,
    /// Transient boost while the camera is zooming; the value is the zoom
    /// intensity in roughly [-1.2, 1].
    Zoom(f32),
    /// Decorative breathing: `1 + amplitude * sin(elapsed * frequency)`.
    Periodic { amplitude: f32, frequency: f32 },
}

/// Compute the uniforms for a frame at `elapsed` seconds.
pub fn step(
    uniforms: ShadingUniforms,
    elapsed: f32,
    base_size: f32,
    pixel_ratio: f32,
    pulse: SizePulse,
) -> ShadingUniforms {
    let point_size = match pulse {
        SizePulse::None => base_size * pixel_ratio,
        SizePulse::Zoom(intensity) => (base_size + intensity * ZOOM_SIZE_BOOST) * pixel_ratio,
        SizePulse::Periodic { amplitude, frequency } => {
            base_size * pixel_ratio * (1.0 + amplitude * (elapsed * frequency).sin())
        }
    };
    let mut next = uniforms;
    next.elapsed_time = elapsed;
    next.point_size = point_size;
    next
}

/// Owns the frame clock and the size constants.
#[derive(Debug)]
pub struct AnimationDriver {
    clock: Clock,
    base_size: f32,
    pixel_ratio: f32,
}

impl AnimationDriver {
    pub fn new(pixel_ratio: f64) -> Self {
        Self::with_clock(Clock::new(), pixel_ratio)
    }

    pub fn with_clock(clock: Clock, pixel_ratio: f64) -> Self {
        Self {
            clock,
            base_size: BASE_POINT_SIZE,
            pixel_ratio: clamp_pixel_ratio(pixel_ratio),
        }
    }

    pub fn set_pixel_ratio(&mut self, pixel_ratio: f64) {
        self.pixel_ratio = clamp_pixel_ratio(pixel_ratio);
    }

    #[inline]
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Uniforms for a frame that has not started animating yet.
    pub fn initial_uniforms(&self) -> ShadingUniforms {
        ShadingUniforms::new(self.base_size * self.pixel_ratio)
    }

    /// Uniforms at the clock's current reading, without advancing it.
    pub fn current(&self, uniforms: ShadingUniforms, pulse: SizePulse) -> ShadingUniforms {
        step(uniforms, self.clock.elapsed(), self.base_size, self.pixel_ratio, pulse)
    }

    /// Advance the clock and compute this frame's uniforms.
    pub fn tick(&mut self, uniforms: ShadingUniforms, pulse: SizePulse) -> ShadingUniforms {
        self.clock.tick();
        self.current(uniforms, pulse)
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }
}

fn clamp_pixel_ratio(ratio: f64) -> f32 {
    (ratio as f32).clamp(f32::MIN_POSITIVE, MAX_PIXEL_RATIO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_step_writes_time_and_base_size() {
        let out = step(ShadingUniforms::default(), 3.5, 80.0, 2.0, SizePulse::None);
        assert_eq!(out.elapsed_time, 3.5);
        assert_eq!(out.point_size, 160.0);
    }

    #[test]
    fn test_zoom_pulse() {
        let out = step(ShadingUniforms::default(), 0.0, 80.0, 1.0, SizePulse::Zoom(1.0));
        assert_eq!(out.point_size, 100.0);
        let out = step(ShadingUniforms::default(), 0.0, 80.0, 2.0, SizePulse::Zoom(-1.2));
        assert!((out.point_size - 112.0).abs() < 1e-4);
    }

    #[test]
    fn test_periodic_pulse() {
        let pulse = SizePulse::Periodic {
            amplitude: 0.5,
            frequency: 2.0,
        };
        let out = step(ShadingUniforms::default(), 0.0, 80.0, 1.0, pulse);
        assert_eq!(out.point_size, 80.0);
        let quarter = std::f32::consts::FRAC_PI_4;
        let out = step(ShadingUniforms::default(), quarter, 80.0, 1.0, pulse);
        assert!((out.point_size - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_pixel_ratio_is_clamped() {
        let driver = AnimationDriver::new(3.0);
        assert_eq!(driver.pixel_ratio(), 2.0);
        assert_eq!(driver.initial_uniforms().point_size, 160.0);
    }

    #[test]
    fn test_tick_advances_elapsed() {
        let start = Instant::now() - Duration::from_secs(2);
        let mut driver = AnimationDriver::with_clock(Clock::starting_at(start), 1.0);
        let out = driver.tick(driver.initial_uniforms(), SizePulse::None);
        assert!(out.elapsed_time >= 2.0);
        assert_eq!(driver.clock().frame(), 1);
    }
}
