//! Procedural star-field generation.
//!
//! Points are scattered through a sphere with a square-root radial bias and
//! uniform solid-angle directions. Each point gets a color from a position-based
//! pseudo-noise gradient, a cubed random scale, and a static jitter offset that
//! the vertex stage adds on the GPU.
//!
//! # Example
//!
//! ```ignore
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let set = generate(&GalaxyParameters::DEFAULT, &GeneratorConfig::default(), &mut rng)?;
//! assert_eq!(set.len(), 313_400);
//! ```

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::Rng;

use crate::error::GalaxyError;
use crate::params::GalaxyParameters;

/// Optional stretch applied to generated positions to flatten the sphere into
/// a disk-like silhouette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anisotropy {
    /// Multiplier on x, typically the viewport aspect ratio.
    pub x_stretch: f32,
    /// Multiplier on z; values below 1 flatten the cloud.
    pub z_flatten: f32,
}

/// Fixed constants of the generation algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Radius scale constant: `r = sqrt(u) * extent`.
    pub extent: f32,
    /// Largest per-point scale (`K`): `scale = u^3 * scale_max`.
    pub scale_max: f32,
    /// Full width of each jitter component, centered on zero.
    pub jitter_width: f32,
    pub anisotropy: Option<Anisotropy>,
}

impl GeneratorConfig {
    pub const DEFAULT: GeneratorConfig = GeneratorConfig {
        extent: 200.0,
        scale_max: 3.0,
        jitter_width: 0.5,
        anisotropy: None,
    };

    pub fn with_anisotropy(mut self, x_stretch: f32, z_flatten: f32) -> Self {
        self.anisotropy = Some(Anisotropy { x_stretch, z_flatten });
        self
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Interleaved per-point vertex data as uploaded to the GPU.
///
/// Layout matches the `@location` attributes of the vertex stage.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub scale: f32,
    pub jitter: [f32; 3],
}

/// Per-point attribute buffers for one generation.
///
/// All four sequences have the same length and the i-th entry of each
/// describes the same point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointAttributeSet {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    scales: Vec<f32>,
    jitter: Vec<Vec3>,
}

impl PointAttributeSet {
    fn with_capacity(count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(count),
            colors: Vec::with_capacity(count),
            scales: Vec::with_capacity(count),
            jitter: Vec::with_capacity(count),
        }
    }

    /// Build a set from a single point, used for decorative sprites.
    pub fn single(position: Vec3, color: Vec3, scale: f32) -> Self {
        Self {
            positions: vec![position],
            colors: vec![color],
            scales: vec![scale],
            jitter: vec![Vec3::ZERO],
        }
    }

    fn push(&mut self, position: Vec3, color: Vec3, scale: f32, jitter: Vec3) {
        self.positions.push(position);
        self.colors.push(color);
        self.scales.push(scale);
        self.jitter.push(jitter);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    pub fn jitter(&self) -> &[Vec3] {
        &self.jitter
    }

    /// Interleave the four sequences into upload-ready vertices.
    pub fn vertices(&self) -> Vec<PointVertex> {
        self.positions
            .iter()
            .zip(&self.colors)
            .zip(&self.scales)
            .zip(&self.jitter)
            .map(|(((p, c), s), j)| PointVertex {
                position: p.to_array(),
                color: c.to_array(),
                scale: *s,
                jitter: j.to_array(),
            })
            .collect()
    }
}

/// Pseudo-noise scalar driving the color gradient.
///
/// The tangent term is unbounded, so the result can exceed 1.
#[inline]
pub fn color_noise(position: Vec3) -> f32 {
    (position.x * 0.2).sin() * (position.y * 0.3).cos() * (position.z * 0.1).tan()
}

/// Per-channel linear interpolation without clamping: ratios above 1
/// extrapolate past `outside`.
///
/// Weighted-sum form, so ratio 0 returns `inside` and ratio 1 returns
/// `outside` bit for bit.
#[inline]
pub fn mix_color(inside: Vec3, outside: Vec3, ratio: f32) -> Vec3 {
    inside * (1.0 - ratio) + outside * ratio
}

/// Generate a fresh point cloud.
///
/// Draws from `rng` in a fixed order per point, so a seeded generator gives
/// identical output for identical parameters.
pub fn generate<R: Rng + ?Sized>(
    params: &GalaxyParameters,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<PointAttributeSet, GalaxyError> {
    let count =
        usize::try_from(params.count).map_err(|_| GalaxyError::InvalidCount(params.count))?;
    let mut set = PointAttributeSet::with_capacity(count);

    for _ in 0..count {
        let radius = rng.gen::<f32>().sqrt() * config.extent;
        let theta = rng.gen::<f32>() * TAU;
        let phi = (1.0 - 2.0 * rng.gen::<f32>()).acos();

        let mut position = Vec3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
        );
        if let Some(a) = config.anisotropy {
            position.x *= a.x_stretch;
            position.z *= a.z_flatten;
        }

        let jitter = Vec3::new(
            (rng.gen::<f32>() - 0.5) * config.jitter_width,
            (rng.gen::<f32>() - 0.5) * config.jitter_width,
            (rng.gen::<f32>() - 0.5) * config.jitter_width,
        );

        let ratio = color_noise(position).abs();
        let color = mix_color(params.color_inside, params.color_outside, ratio);

        let scale = rng.gen::<f32>().powi(3) * config.scale_max;

        set.push(position, color, scale, jitter);
    }

    log::debug!("Generated {} points (extent {})", set.len(), config.extent);
    Ok(set)
}
