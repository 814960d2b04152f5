//! # Galaxy
//!
//! A procedurally generated, interactive 3D galaxy rendered as a GPU point
//! cloud.
//!
//! Every point gets a random spherical position, a color from a two-stop
//! gradient perturbed by a deterministic noise term, a size scale, and a
//! static jitter offset. A single shading program turns each point into a
//! soft, additively blended glow that drifts with a depth-dependent parallax
//! over time.
//!
//! ## Quick Start
//!
//! ```ignore
//! use galaxy::prelude::*;
//!
//! fn main() -> Result<(), ViewerError> {
//!     Viewer::new()
//!         .with_parameters(GalaxyParameters {
//!             count: 500_000,
//!             ..GalaxyParameters::DEFAULT
//!         })
//!         .with_seed(42)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Parameters
//!
//! [`GalaxyParameters`] is a plain value. Controls emit [`ParameterChange`]
//! events; applying one yields the next parameters and triggers a full
//! regeneration.
//!
//! ### Generation
//!
//! [`generate`] turns parameters and a random source into a
//! [`PointAttributeSet`]. With a seeded RNG the output is reproducible:
//!
//! ```ignore
//! let mut rng = StdRng::seed_from_u64(7);
//! let points = generate(&GalaxyParameters::DEFAULT, &GeneratorConfig::DEFAULT, &mut rng)?;
//! assert_eq!(points.len(), 313_400);
//! ```
//!
//! ### Rendering
//!
//! [`Visualization`] owns the installed point set and its GPU handles. It is
//! generic over [`RenderBackend`], implemented for wgpu by [`WgpuBackend`].
//! Only uniforms change per frame; buffers are rebuilt only on regeneration.
//!
//! ## Controls
//!
//! Drag to orbit, scroll to zoom. See [`controls`] for the keyboard bindings.

pub mod animation;
pub mod camera;
pub mod clock;
pub mod controls;
mod error;
pub mod generator;
mod gpu;
pub mod interaction;
pub mod overlay;
pub mod params;
pub mod shading;
pub mod star;
mod viewer;
pub mod visualization;

pub use animation::{AnimationDriver, SizePulse};
pub use camera::OrbitCamera;
pub use clock::Clock;
pub use error::{GalaxyError, GpuError, RenderError, ViewerError};
pub use generator::{generate, GeneratorConfig, PointAttributeSet, PointVertex};
pub use glam::{Vec2, Vec3, Vec4};
pub use gpu::WgpuBackend;
pub use interaction::ZoomController;
pub use overlay::{OverlayChange, ZoomOverlay};
pub use params::{parse_hex_color, GalaxyParameters, ParameterChange, ParameterRange};
pub use shading::{CameraMatrices, FrameUniforms, ShadingProgram, ShadingUniforms};
pub use star::BrightStar;
pub use viewer::Viewer;
pub use visualization::{DrawBatch, RenderBackend, Visualization};

/// Common imports for building and running a galaxy.
pub mod prelude {
    pub use crate::{
        generate, BrightStar, GalaxyParameters, GeneratorConfig, ParameterChange,
        PointAttributeSet, ShadingUniforms, Vec3, Viewer, ViewerError, Visualization,
        ZoomOverlay,
    };
    pub use rand::rngs::StdRng;
    pub use rand::SeedableRng;
}
