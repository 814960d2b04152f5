//! Wheel zoom and the transient zoom-intensity signal.
//!
//! Every wheel notch multiplies or divides the camera distance by
//! [`ZOOM_FACTOR`] and sets a signed intensity that the animation driver turns
//! into a point-size boost. The intensity falls back to zero once the wheel has
//! been quiet for [`ZOOM_QUIET_PERIOD`].

use std::time::{Duration, Instant};

use crate::animation::SizePulse;
use crate::camera::{OrbitCamera, MAX_DISTANCE, MIN_DISTANCE};

pub const ZOOM_FACTOR: f32 = 1.2;
pub const ZOOM_QUIET_PERIOD: Duration = Duration::from_millis(300);
pub const ZOOM_OUT_INTENSITY: f32 = 1.0;
pub const ZOOM_IN_INTENSITY: f32 = -1.2;

#[derive(Debug, Clone, Default)]
pub struct ZoomController {
    intensity: f32,
    last_wheel: Option<Instant>,
}

impl ZoomController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a wheel event. Positive `delta_y` zooms out.
    ///
    /// Returns the new camera distance.
    pub fn on_wheel(&mut self, camera: &mut OrbitCamera, delta_y: f32, now: Instant) -> f32 {
        if delta_y == 0.0 {
            return camera.distance;
        }
        if delta_y > 0.0 {
            camera.set_distance((camera.distance * ZOOM_FACTOR).min(MAX_DISTANCE));
            self.intensity = ZOOM_OUT_INTENSITY;
        } else {
            camera.set_distance((camera.distance / ZOOM_FACTOR).max(MIN_DISTANCE));
            self.intensity = ZOOM_IN_INTENSITY;
        }
        self.last_wheel = Some(now);
        camera.distance
    }

    /// Current zoom intensity; zero once the quiet period has elapsed.
    pub fn intensity(&self, now: Instant) -> f32 {
        if self.is_zooming(now) {
            self.intensity
        } else {
            0.0
        }
    }

    pub fn is_zooming(&self, now: Instant) -> bool {
        self.last_wheel
            .is_some_and(|t| now.saturating_duration_since(t) < ZOOM_QUIET_PERIOD)
    }

    /// The size pulse for a frame at `now`.
    pub fn pulse(&self, now: Instant) -> SizePulse {
        if self.is_zooming(now) {
            SizePulse::Zoom(self.intensity)
        } else {
            SizePulse::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_out_then_in() {
        let now = Instant::now();
        let mut camera = OrbitCamera::new();
        let mut zoom = ZoomController::new();

        let d = zoom.on_wheel(&mut camera, 1.0, now);
        assert!((d - 6.0).abs() < 1e-5);
        assert_eq!(zoom.intensity(now), 1.0);

        let d = zoom.on_wheel(&mut camera, -3.0, now);
        assert!((d - 5.0).abs() < 1e-5);
        assert_eq!(zoom.intensity(now), -1.2);
    }

    #[test]
    fn test_distance_limits() {
        let now = Instant::now();
        let mut camera = OrbitCamera::new();
        let mut zoom = ZoomController::new();
        for _ in 0..50 {
            zoom.on_wheel(&mut camera, 1.0, now);
        }
        assert_eq!(camera.distance, MAX_DISTANCE);
        for _ in 0..100 {
            zoom.on_wheel(&mut camera, -1.0, now);
        }
        assert_eq!(camera.distance, MIN_DISTANCE);
    }

    #[test]
    fn test_intensity_decays_after_quiet_period() {
        let now = Instant::now();
        let mut camera = OrbitCamera::new();
        let mut zoom = ZoomController::new();
        assert_eq!(zoom.pulse(now), SizePulse::None);

        zoom.on_wheel(&mut camera, 1.0, now);
        assert_eq!(zoom.pulse(now + Duration::from_millis(299)), SizePulse::Zoom(1.0));
        assert_eq!(zoom.intensity(now + Duration::from_millis(300)), 0.0);
        assert_eq!(zoom.pulse(now + Duration::from_secs(1)), SizePulse::None);
    }

    #[test]
    fn test_new_wheel_restarts_quiet_period() {
        let now = Instant::now();
        let mut camera = OrbitCamera::new();
        let mut zoom = ZoomController::new();
        zoom.on_wheel(&mut camera, 1.0, now);
        zoom.on_wheel(&mut camera, 1.0, now + Duration::from_millis(200));
        assert!(zoom.is_zooming(now + Duration::from_millis(450)));
    }
}
