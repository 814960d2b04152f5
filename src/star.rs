//! Decorative bright star orbiting the galaxy.

use glam::Vec3;

use crate::animation::SizePulse;
use crate::generator::PointAttributeSet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightStar {
    pub color: Vec3,
    /// Per-point scale handed to the shading program.
    pub scale: f32,
    /// Orbit radius around the y axis.
    pub radius: f32,
    /// Radians per second.
    pub angular_speed: f32,
    pub height: f32,
    pub pulse_amplitude: f32,
    pub pulse_frequency: f32,
}

impl BrightStar {
    pub const DEFAULT: BrightStar = BrightStar {
        color: Vec3::new(1.0, 0.95, 0.85),
        scale: 4.0,
        radius: 3.0,
        angular_speed: 0.3,
        height: 0.5,
        pulse_amplitude: 0.5,
        pulse_frequency: 2.0,
    };

    /// The star's one-point attribute set, placed at the local origin.
    ///
    /// Motion is applied through the origin uniform, so this is uploaded once.
    pub fn points(&self) -> PointAttributeSet {
        PointAttributeSet::single(Vec3::ZERO, self.color, self.scale)
    }

    /// Where the star sits at `elapsed` seconds.
    pub fn position(&self, elapsed: f32) -> Vec3 {
        let angle = elapsed * self.angular_speed;
        Vec3::new(
            self.radius * angle.cos(),
            self.height * (elapsed * 0.5).sin(),
            self.radius * angle.sin(),
        )
    }

    pub fn pulse(&self) -> SizePulse {
        SizePulse::Periodic {
            amplitude: self.pulse_amplitude,
            frequency: self.pulse_frequency,
        }
    }
}

impl Default for BrightStar {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_orbit_radius() {
        let star = BrightStar::DEFAULT;
        for i in 0..20 {
            let p = star.position(i as f32 * 0.7);
            let horizontal = (p.x * p.x + p.z * p.z).sqrt();
            assert!((horizontal - star.radius).abs() < 1e-4);
            assert!(p.y.abs() <= star.height + 1e-6);
        }
    }

    #[test]
    fn test_star_points_single() {
        let set = BrightStar::DEFAULT.points();
        assert_eq!(set.len(), 1);
        assert_eq!(set.scales()[0], 4.0);
    }
}
