//! User-tunable galaxy parameters.
//!
//! [`GalaxyParameters`] is a plain value. A control panel (keyboard bindings in
//! the bundled viewer) never mutates it in place; it emits a
//! [`ParameterChange`] and the owner applies it to get the next value, which
//! then drives a full regeneration.
//!
//! ```ignore
//! let params = GalaxyParameters::DEFAULT.apply(ParameterChange::Count(500_000));
//! visualization.set_parameters(params)?;
//! ```

use glam::Vec3;

use crate::error::GalaxyError;

/// Parses a `#rrggbb` (or `rrggbb`) hex string into an RGB color in 0.0-1.0.
pub fn parse_hex_color(text: &str) -> Result<Vec3, GalaxyError> {
    let digits = text.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(GalaxyError::InvalidColor(text.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| GalaxyError::InvalidColor(text.to_string()))
    };
    Ok(Vec3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Configuration consumed by the point-cloud generator.
///
/// Only `count` and the two colors affect the generated points. The other
/// fields are exposed for panels and kept for compatibility; `branches`,
/// `spin` and `randomness_power` are reserved and have no effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalaxyParameters {
    /// Number of points. Negative values are rejected by the generator.
    pub count: i64,
    /// Nominal base point size.
    pub size: f32,
    /// Nominal spatial scale shown to the user.
    pub radius: f32,
    /// Reserved.
    pub branches: u32,
    /// Reserved.
    pub spin: f32,
    /// Jitter magnitude base.
    pub randomness: f32,
    /// Reserved jitter falloff exponent.
    pub randomness_power: f32,
    /// Gradient color at mix ratio 0.
    pub color_inside: Vec3,
    /// Gradient color at mix ratio 1.
    pub color_outside: Vec3,
}

impl GalaxyParameters {
    /// The stock parameter set.
    pub const DEFAULT: GalaxyParameters = GalaxyParameters {
        count: 313_400,
        size: 0.005,
        radius: 100.0,
        branches: 15,
        spin: 1.0,
        randomness: 1.4,
        randomness_power: 7.013,
        // #fa8500
        color_inside: Vec3::new(0.980_392_156_862_745, 0.521_568_627_450_980, 0.0),
        // #05acff
        color_outside: Vec3::new(0.019_607_843_137_255, 0.674_509_803_921_569, 1.0),
    };

    /// Apply one panel event, returning the resulting parameters.
    pub fn apply(&self, change: ParameterChange) -> GalaxyParameters {
        let mut next = *self;
        match change {
            ParameterChange::Count(v) => next.count = v,
            ParameterChange::Size(v) => next.size = v,
            ParameterChange::Radius(v) => next.radius = v,
            ParameterChange::Branches(v) => next.branches = v,
            ParameterChange::Spin(v) => next.spin = v,
            ParameterChange::Randomness(v) => next.randomness = v,
            ParameterChange::RandomnessPower(v) => next.randomness_power = v,
            ParameterChange::ColorInside(c) => next.color_inside = c,
            ParameterChange::ColorOutside(c) => next.color_outside = c,
            ParameterChange::ResetToDefaults => next.reset_to_defaults(),
        }
        next
    }

    /// Copy every field back from [`GalaxyParameters::DEFAULT`].
    pub fn reset_to_defaults(&mut self) {
        let d = Self::DEFAULT;
        self.count = d.count;
        self.size = d.size;
        self.radius = d.radius;
        self.branches = d.branches;
        self.spin = d.spin;
        self.randomness = d.randomness;
        self.randomness_power = d.randomness_power;
        self.color_inside = d.color_inside;
        self.color_outside = d.color_outside;
    }
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A single "parameters changed" event emitted by a control panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterChange {
    Count(i64),
    Size(f32),
    Radius(f32),
    Branches(u32),
    Spin(f32),
    Randomness(f32),
    RandomnessPower(f32),
    ColorInside(Vec3),
    ColorOutside(Vec3),
    ResetToDefaults,
}

/// Slider bounds for a panel-exposed parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParameterRange {
    pub const COUNT: ParameterRange = ParameterRange {
        min: 113_400.0,
        max: 1_000_000.0,
        step: 100.0,
    };
    pub const RADIUS: ParameterRange = ParameterRange {
        min: 16.56,
        max: 20.0,
        step: 0.01,
    };
    pub const BRANCHES: ParameterRange = ParameterRange {
        min: 15.0,
        max: 20.0,
        step: 1.0,
    };
    pub const RANDOMNESS: ParameterRange = ParameterRange {
        min: 1.4,
        max: 2.0,
        step: 0.001,
    };
    pub const RANDOMNESS_POWER: ParameterRange = ParameterRange {
        min: 7.013,
        max: 10.0,
        step: 0.001,
    };

    /// Clamp a value into the range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Move `value` by `steps` whole steps, snapped to the step grid anchored
    /// at `min` and clamped into the range.
    pub fn nudge(&self, value: f64, steps: i32) -> f64 {
        let index = ((self.clamp(value) - self.min) / self.step).round() + steps as f64;
        self.clamp(self.min + index * self.step)
    }
}
