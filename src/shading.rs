//! The galaxy shading program and its uniforms.
//!
//! The program is two WGSL payloads, a vertex stage and a fragment stage,
//! joined into a single module with entry points [`VERTEX_ENTRY`] and
//! [`FRAGMENT_ENTRY`]. The tuning constants are declared once here and
//! prepended to the module as WGSL `const`s. The same math is mirrored on the CPU in
//! [`vertex_stage`] and [`fragment_stage`] so the numeric contract can be
//! checked without a GPU.

use std::borrow::Cow;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4};

pub const VERTEX_SOURCE: &str = include_str!("shaders/galaxy_vertex.wgsl");
pub const FRAGMENT_SOURCE: &str = include_str!("shaders/galaxy_fragment.wgsl");

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Drift speed shared by both drift axes.
pub const FLOAT_SPEED: f32 = 0.5;
/// Exponent applied to the radial strength.
pub const SHARPNESS: f32 = 6.0;
/// Samples dimmer than this are discarded.
pub const DISCARD_BELOW: f32 = 0.05;

/// Vertex + fragment source pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadingProgram {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl ShadingProgram {
    /// The built-in galaxy program.
    pub fn galaxy() -> Self {
        Self {
            vertex: Cow::Borrowed(VERTEX_SOURCE),
            fragment: Cow::Borrowed(FRAGMENT_SOURCE),
        }
    }

    /// Full module source: the constants prelude, then the vertex payload,
    /// then the fragment payload.
    pub fn source(&self) -> String {
        format!("{}\n{}\n{}", constants_prelude(), self.vertex, self.fragment)
    }
}

/// WGSL declarations of the tuning constants shared with the CPU mirror.
pub fn constants_prelude() -> String {
    format!(
        "const FLOAT_SPEED: f32 = {:?};\n\
         const SHARPNESS: f32 = {:?};\n\
         const DISCARD_BELOW: f32 = {:?};\n",
        FLOAT_SPEED, SHARPNESS, DISCARD_BELOW
    )
}

impl Default for ShadingProgram {
    fn default() -> Self {
        Self::galaxy()
    }
}

/// The two values the animation loop rewrites every frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShadingUniforms {
    /// Seconds since the animation started.
    pub elapsed_time: f32,
    /// Base point size in physical pixels.
    pub point_size: f32,
}

impl ShadingUniforms {
    pub fn new(point_size: f32) -> Self {
        Self {
            elapsed_time: 0.0,
            point_size,
        }
    }
}

/// Camera state needed by the vertex stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMatrices {
    pub view: Mat4,
    pub projection: Mat4,
    /// Render target size in physical pixels.
    pub viewport: Vec2,
}

/// GPU layout of the uniform block declared in the vertex payload.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub origin: [f32; 3],
    pub time: f32,
    pub viewport: [f32; 2],
    pub size: f32,
    pub _pad: f32,
}

impl FrameUniforms {
    pub fn new(shading: &ShadingUniforms, camera: &CameraMatrices, origin: Vec3) -> Self {
        Self {
            view: camera.view.to_cols_array_2d(),
            projection: camera.projection.to_cols_array_2d(),
            origin: origin.to_array(),
            time: shading.elapsed_time,
            viewport: camera.viewport.to_array(),
            size: shading.point_size,
            _pad: 0.0,
        }
    }
}

/// One point's inputs to the vertex stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointInput {
    pub position: Vec3,
    pub color: Vec3,
    pub scale: f32,
    pub jitter: Vec3,
}

/// What the vertex stage computes for a point's center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexSample {
    /// Model-space position after drift and jitter.
    pub world: Vec3,
    pub view_position: Vec4,
    pub clip_position: Vec4,
    /// Sprite edge length in pixels.
    pub point_size: f32,
    pub color: Vec3,
}

/// CPU mirror of `vs_main` for the point center.
pub fn vertex_stage(
    point: &PointInput,
    uniforms: &ShadingUniforms,
    camera: &CameraMatrices,
    origin: Vec3,
) -> VertexSample {
    let mut world = point.position + origin;
    let parallax = 0.5 + world.z * 0.01;
    world.x += uniforms.elapsed_time * FLOAT_SPEED * 0.7 * parallax;
    world.y += uniforms.elapsed_time * FLOAT_SPEED * 0.5 * parallax;
    world += point.jitter;

    let view_position = camera.view * world.extend(1.0);
    let clip_position = camera.projection * view_position;

    let size_modifier = (1.0 - world.z / 100.0).max(0.2);
    let point_size = uniforms.point_size * point.scale * size_modifier * (1.0 / -view_position.z);

    VertexSample {
        world,
        view_position,
        clip_position,
        point_size,
        color: point.color,
    }
}

/// CPU mirror of `fs_main`.
///
/// `point_coord` is in 0..1 across the sprite. Returns `None` where the GPU
/// would discard.
pub fn fragment_stage(point_coord: Vec2, color: Vec3) -> Option<Vec4> {
    let strength = (1.0 - point_coord.distance(Vec2::splat(0.5))).powf(SHARPNESS);
    if strength < DISCARD_BELOW {
        return None;
    }
    Some((Vec3::ZERO.lerp(color, strength)).extend(strength))
}
