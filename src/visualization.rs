//! The live galaxy: generated points, their GPU resources, and per-frame
//! uniforms.
//!
//! A [`Visualization`] owns exactly one [`PointAttributeSet`] at a time and
//! the backend handles created from it. Regeneration builds and uploads the
//! replacement first; only when that has fully succeeded is the old set
//! released and the new one installed, so a frame never sees a partial set and
//! a failed regeneration leaves the previous galaxy on screen.
//!
//! Rendering goes through the [`RenderBackend`] trait. The windowed viewer uses
//! [`WgpuBackend`](crate::WgpuBackend); tests plug in a counting backend.

use glam::Vec3;
use rand::rngs::StdRng;

use crate::error::{GpuError, RenderError};
use crate::generator::{generate, GeneratorConfig, PointAttributeSet};
use crate::params::{GalaxyParameters, ParameterChange};
use crate::shading::{CameraMatrices, FrameUniforms, ShadingProgram, ShadingUniforms};
use crate::star::BrightStar;

/// One draw: a point set and the uniforms to draw it with.
pub struct DrawBatch<'a, P> {
    pub points: &'a P,
    pub uniforms: FrameUniforms,
}

/// GPU-side operations the visualization needs.
///
/// Handles returned by `compile_program` and `upload_points` are owned by the
/// caller and must be handed back to the matching `release_*` call exactly
/// once.
pub trait RenderBackend {
    type Program;
    type Points;

    fn compile_program(&mut self, program: &ShadingProgram) -> Result<Self::Program, GpuError>;

    fn upload_points(
        &mut self,
        program: &Self::Program,
        points: &PointAttributeSet,
    ) -> Result<Self::Points, GpuError>;

    fn release_points(&mut self, points: Self::Points);

    fn release_program(&mut self, program: Self::Program);

    /// Draw the batches in order into the next frame.
    fn render(
        &mut self,
        program: &Self::Program,
        batches: &[DrawBatch<'_, Self::Points>],
    ) -> Result<(), GpuError>;
}

struct Installed<P> {
    attributes: PointAttributeSet,
    points: P,
}

struct StarState<P> {
    star: BrightStar,
    points: P,
    uniforms: ShadingUniforms,
}

struct Resources<B: RenderBackend> {
    program: B::Program,
    galaxy: Installed<B::Points>,
    star: Option<StarState<B::Points>>,
}

pub struct Visualization<B: RenderBackend> {
    backend: B,
    params: GalaxyParameters,
    config: GeneratorConfig,
    rng: StdRng,
    uniforms: ShadingUniforms,
    initial_uniforms: ShadingUniforms,
    /// `None` once torn down.
    resources: Option<Resources<B>>,
}

impl<B: RenderBackend> Visualization<B> {
    /// Compile the program and generate the first galaxy.
    ///
    /// On failure everything acquired so far is released before returning.
    pub fn new(
        mut backend: B,
        params: GalaxyParameters,
        config: GeneratorConfig,
        mut rng: StdRng,
        initial_uniforms: ShadingUniforms,
        star: Option<BrightStar>,
    ) -> Result<Self, RenderError> {
        let attributes = generate(&params, &config, &mut rng)?;
        let program = backend.compile_program(&ShadingProgram::galaxy())?;

        let points = match backend.upload_points(&program, &attributes) {
            Ok(points) => points,
            Err(e) => {
                backend.release_program(program);
                return Err(e.into());
            }
        };

        let star = match star {
            Some(star) => match backend.upload_points(&program, &star.points()) {
                Ok(star_points) => Some(StarState {
                    star,
                    points: star_points,
                    uniforms: initial_uniforms,
                }),
                Err(e) => {
                    backend.release_points(points);
                    backend.release_program(program);
                    return Err(e.into());
                }
            },
            None => None,
        };

        log::info!("Galaxy ready with {} points", attributes.len());

        Ok(Self {
            backend,
            params,
            config,
            rng,
            uniforms: initial_uniforms,
            initial_uniforms,
            resources: Some(Resources {
                program,
                galaxy: Installed { attributes, points },
                star,
            }),
        })
    }

    pub fn parameters(&self) -> &GalaxyParameters {
        &self.params
    }

    /// The installed attribute set, or `None` after teardown.
    pub fn attributes(&self) -> Option<&PointAttributeSet> {
        self.resources.as_ref().map(|r| &r.galaxy.attributes)
    }

    /// Number of points the next frame will draw.
    pub fn point_count(&self) -> usize {
        self.attributes().map_or(0, PointAttributeSet::len)
    }

    pub fn uniforms(&self) -> ShadingUniforms {
        self.uniforms
    }

    pub fn is_torn_down(&self) -> bool {
        self.resources.is_none()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Regenerate with new parameters.
    ///
    /// On error the previous parameters and points stay installed.
    pub fn set_parameters(&mut self, params: GalaxyParameters) -> Result<(), RenderError> {
        let Some(resources) = self.resources.as_mut() else {
            log::warn!("Ignoring parameter change after teardown");
            return Ok(());
        };

        let attributes = generate(&params, &self.config, &mut self.rng)?;
        let points = self.backend.upload_points(&resources.program, &attributes)?;

        let old = std::mem::replace(&mut resources.galaxy, Installed { attributes, points });
        self.backend.release_points(old.points);

        self.params = params;
        self.uniforms = self.initial_uniforms;
        if let Some(star) = resources.star.as_mut() {
            star.uniforms = self.initial_uniforms;
        }
        log::info!(
            "Regenerated galaxy: {} -> {} points",
            old.attributes.len(),
            self.point_count()
        );
        Ok(())
    }

    /// Apply a panel event and regenerate.
    pub fn apply(&mut self, change: ParameterChange) -> Result<(), RenderError> {
        self.set_parameters(self.params.apply(change))
    }

    /// Change the base size the uniforms reset to on regeneration, e.g. after
    /// the window moves to a display with another pixel ratio.
    pub fn set_initial_uniforms(&mut self, uniforms: ShadingUniforms) {
        self.initial_uniforms = uniforms;
    }

    /// Store this frame's galaxy uniforms.
    pub fn update_uniforms(&mut self, uniforms: ShadingUniforms) {
        self.uniforms = uniforms;
    }

    /// Store this frame's star uniforms; ignored without a star.
    pub fn update_star_uniforms(&mut self, uniforms: ShadingUniforms) {
        if let Some(star) = self.resources.as_mut().and_then(|r| r.star.as_mut()) {
            star.uniforms = uniforms;
        }
    }

    /// The star's current uniforms, or `None` without a star.
    pub fn star_uniforms(&self) -> Option<ShadingUniforms> {
        self.resources
            .as_ref()
            .and_then(|r| r.star.as_ref())
            .map(|s| s.uniforms)
    }

    pub fn star(&self) -> Option<&BrightStar> {
        self.resources
            .as_ref()
            .and_then(|r| r.star.as_ref())
            .map(|s| &s.star)
    }

    /// Draw the galaxy and, if present, the star. A no-op after teardown.
    pub fn render(&mut self, camera: &CameraMatrices) -> Result<(), GpuError> {
        let Some(resources) = self.resources.as_ref() else {
            return Ok(());
        };

        let mut batches = Vec::with_capacity(2);
        batches.push(DrawBatch {
            points: &resources.galaxy.points,
            uniforms: FrameUniforms::new(&self.uniforms, camera, Vec3::ZERO),
        });
        if let Some(star) = &resources.star {
            let origin = star.star.position(star.uniforms.elapsed_time);
            batches.push(DrawBatch {
                points: &star.points,
                uniforms: FrameUniforms::new(&star.uniforms, camera, origin),
            });
        }

        self.backend.render(&resources.program, &batches)
    }

    /// Release every GPU resource. Safe to call any number of times.
    pub fn teardown(&mut self) {
        let Some(resources) = self.resources.take() else {
            return;
        };
        self.backend.release_points(resources.galaxy.points);
        if let Some(star) = resources.star {
            self.backend.release_points(star.points);
        }
        self.backend.release_program(resources.program);
        log::info!("Galaxy torn down");
    }
}

impl<B: RenderBackend> Drop for Visualization<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[derive(Default)]
    struct Counting {
        live_programs: usize,
        live_points: usize,
        draws: Vec<usize>,
    }

    impl RenderBackend for Counting {
        type Program = ();
        type Points = usize;

        fn compile_program(&mut self, _program: &ShadingProgram) -> Result<(), GpuError> {
            self.live_programs += 1;
            Ok(())
        }

        fn upload_points(&mut self, _: &(), points: &PointAttributeSet) -> Result<usize, GpuError> {
            self.live_points += 1;
            Ok(points.len())
        }

        fn release_points(&mut self, _points: usize) {
            self.live_points -= 1;
        }

        fn release_program(&mut self, _program: ()) {
            self.live_programs -= 1;
        }

        fn render(&mut self, _: &(), batches: &[DrawBatch<'_, usize>]) -> Result<(), GpuError> {
            self.draws.extend(batches.iter().map(|b| *b.points));
            Ok(())
        }
    }

    fn build(count: i64, star: Option<BrightStar>) -> Visualization<Counting> {
        let params = GalaxyParameters {
            count,
            ..GalaxyParameters::DEFAULT
        };
        Visualization::new(
            Counting::default(),
            params,
            GeneratorConfig::default(),
            StdRng::seed_from_u64(1),
            ShadingUniforms::new(80.0),
            star,
        )
        .unwrap()
    }

    #[test]
    fn test_regeneration_replaces_points() {
        let mut vis = build(10, None);
        vis.apply(ParameterChange::Count(25)).unwrap();
        assert_eq!(vis.point_count(), 25);
        assert_eq!(vis.backend().live_points, 1);
        assert_eq!(vis.parameters().count, 25);
    }

    #[test]
    fn test_failed_regeneration_keeps_previous() {
        let mut vis = build(10, None);
        let before = vis.attributes().cloned();
        let err = vis.apply(ParameterChange::Count(-5)).unwrap_err();
        assert!(matches!(err, RenderError::Galaxy(_)));
        assert_eq!(vis.attributes().cloned(), before);
        assert_eq!(vis.parameters().count, 10);
    }

    #[test]
    fn test_render_draws_galaxy_then_star() {
        let mut vis = build(12, Some(BrightStar::DEFAULT));
        let camera = crate::camera::OrbitCamera::new().matrices(glam::Vec2::new(640.0, 480.0));
        vis.render(&camera).unwrap();
        assert_eq!(vis.backend().draws, vec![12, 1]);
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let mut vis = build(8, Some(BrightStar::DEFAULT));
        assert_eq!(vis.backend().live_points, 2);
        vis.teardown();
        vis.teardown();
        assert!(vis.is_torn_down());
        assert_eq!(vis.backend().live_points, 0);
        assert_eq!(vis.backend().live_programs, 0);
        assert_eq!(vis.point_count(), 0);
    }

    #[test]
    fn test_regeneration_resets_uniforms() {
        let mut vis = build(4, None);
        vis.update_uniforms(ShadingUniforms {
            elapsed_time: 9.0,
            point_size: 100.0,
        });
        vis.apply(ParameterChange::Radius(18.0)).unwrap();
        assert_eq!(vis.uniforms(), ShadingUniforms::new(80.0));
    }

    #[test]
    fn test_regeneration_resets_star_uniforms() {
        let mut vis = build(4, Some(BrightStar::DEFAULT));
        let advanced = ShadingUniforms {
            elapsed_time: 9.0,
            point_size: 100.0,
        };
        vis.update_uniforms(advanced);
        vis.update_star_uniforms(advanced);
        assert_eq!(vis.star_uniforms(), Some(advanced));

        vis.apply(ParameterChange::Count(6)).unwrap();
        assert_eq!(vis.uniforms(), ShadingUniforms::new(80.0));
        assert_eq!(vis.star_uniforms(), Some(ShadingUniforms::new(80.0)));

        // the next frame draws the star at its starting position
        let camera = crate::camera::OrbitCamera::new().matrices(glam::Vec2::new(640.0, 480.0));
        vis.render(&camera).unwrap();
        assert_eq!(vis.backend().draws, vec![6, 1]);
    }

    #[test]
    fn test_star_uniforms_absent_without_star() {
        let mut vis = build(4, None);
        vis.update_star_uniforms(ShadingUniforms::new(5.0));
        assert_eq!(vis.star_uniforms(), None);
    }
}
