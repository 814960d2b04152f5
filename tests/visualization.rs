//! Integration tests for `Visualization` against a resource-counting backend.
//!
//! The backend shares its counters through `Rc<Cell<_>>` so they can still be
//! read after the visualization (and the backend it owns) has been dropped.

use std::cell::Cell;
use std::rc::Rc;

use galaxy::prelude::*;
use galaxy::{
    DrawBatch, GpuError, OrbitCamera, RenderBackend, RenderError, ShadingProgram, Vec2,
};

#[derive(Default)]
struct Counters {
    programs: Cell<i32>,
    point_sets: Cell<i32>,
    uploads: Cell<u32>,
    frames: Cell<u32>,
}

/// Counts live handles; optionally fails the n-th upload.
struct CountingBackend {
    counters: Rc<Counters>,
    fail_upload: Option<u32>,
    last_draw: Vec<usize>,
}

impl CountingBackend {
    fn new(counters: Rc<Counters>) -> Self {
        Self {
            counters,
            fail_upload: None,
            last_draw: Vec::new(),
        }
    }
}

impl RenderBackend for CountingBackend {
    type Program = ();
    type Points = usize;

    fn compile_program(&mut self, _program: &ShadingProgram) -> Result<(), GpuError> {
        self.counters.programs.set(self.counters.programs.get() + 1);
        Ok(())
    }

    fn upload_points(&mut self, _: &(), points: &PointAttributeSet) -> Result<usize, GpuError> {
        let n = self.counters.uploads.get() + 1;
        self.counters.uploads.set(n);
        if self.fail_upload == Some(n) {
            return Err(GpuError::TooManyPoints(points.len()));
        }
        self.counters.point_sets.set(self.counters.point_sets.get() + 1);
        Ok(points.len())
    }

    fn release_points(&mut self, _points: usize) {
        self.counters.point_sets.set(self.counters.point_sets.get() - 1);
    }

    fn release_program(&mut self, _program: ()) {
        self.counters.programs.set(self.counters.programs.get() - 1);
    }

    fn render(&mut self, _: &(), batches: &[DrawBatch<'_, usize>]) -> Result<(), GpuError> {
        self.counters.frames.set(self.counters.frames.get() + 1);
        self.last_draw = batches.iter().map(|b| *b.points).collect();
        Ok(())
    }
}

fn params(count: i64) -> GalaxyParameters {
    GalaxyParameters {
        count,
        ..GalaxyParameters::DEFAULT
    }
}

fn build(
    backend: CountingBackend,
    count: i64,
    star: Option<BrightStar>,
) -> Result<Visualization<CountingBackend>, RenderError> {
    Visualization::new(
        backend,
        params(count),
        GeneratorConfig::DEFAULT,
        StdRng::seed_from_u64(11),
        ShadingUniforms::new(80.0),
        star,
    )
}

fn camera() -> galaxy::CameraMatrices {
    OrbitCamera::new().matrices(Vec2::new(800.0, 600.0))
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_teardown_twice_leaves_nothing() {
    let counters = Rc::new(Counters::default());
    let backend = CountingBackend::new(counters.clone());
    let mut vis = build(backend, 64, Some(BrightStar::DEFAULT)).unwrap();
    assert_eq!(counters.point_sets.get(), 2);
    assert_eq!(counters.programs.get(), 1);

    vis.teardown();
    vis.teardown();

    assert_eq!(counters.point_sets.get(), 0);
    assert_eq!(counters.programs.get(), 0);
    assert!(vis.attributes().is_none());
}

#[test]
fn test_drop_releases_resources() {
    let counters = Rc::new(Counters::default());
    {
        let mut vis = build(CountingBackend::new(counters.clone()), 32, None).unwrap();
        vis.apply(ParameterChange::Count(48)).unwrap();
        vis.apply(ParameterChange::Count(16)).unwrap();
    }
    assert_eq!(counters.point_sets.get(), 0);
    assert_eq!(counters.programs.get(), 0);
    assert_eq!(counters.uploads.get(), 3);
}

#[test]
fn test_drop_after_teardown_does_not_double_release() {
    let counters = Rc::new(Counters::default());
    let backend = CountingBackend::new(counters.clone());
    let mut vis = build(backend, 8, Some(BrightStar::DEFAULT)).unwrap();
    vis.teardown();
    drop(vis);
    assert_eq!(counters.point_sets.get(), 0);
    assert_eq!(counters.programs.get(), 0);
}

#[test]
fn test_changes_after_teardown_are_ignored() {
    let counters = Rc::new(Counters::default());
    let mut vis = build(CountingBackend::new(counters.clone()), 8, None).unwrap();
    vis.teardown();
    vis.apply(ParameterChange::Count(100)).unwrap();
    vis.render(&camera()).unwrap();
    assert_eq!(counters.point_sets.get(), 0);
    assert_eq!(counters.frames.get(), 0);
    assert_eq!(vis.point_count(), 0);
}

// ============================================================================
// Regeneration
// ============================================================================

#[test]
fn test_regeneration_fully_replaces_points() {
    let counters = Rc::new(Counters::default());
    let mut vis = build(CountingBackend::new(counters.clone()), 200, None).unwrap();
    let before = vis.attributes().cloned().unwrap();

    vis.apply(ParameterChange::Count(120)).unwrap();
    let after = vis.attributes().cloned().unwrap();

    assert_eq!(after.len(), 120);
    assert_eq!(after.colors().len(), 120);
    assert_eq!(after.scales().len(), 120);
    assert_eq!(after.jitter().len(), 120);
    // the RNG has advanced, so no stale prefix survives
    assert_ne!(&before.positions()[..120], after.positions());
    assert_eq!(counters.point_sets.get(), 1);

    vis.render(&camera()).unwrap();
    assert_eq!(vis.backend().last_draw, vec![120]);
}

#[test]
fn test_color_change_regenerates() {
    let counters = Rc::new(Counters::default());
    let mut vis = build(CountingBackend::new(counters.clone()), 50, None).unwrap();
    vis.apply(ParameterChange::ColorInside(Vec3::ZERO)).unwrap();
    vis.apply(ParameterChange::ColorOutside(Vec3::ZERO)).unwrap();
    let set = vis.attributes().unwrap();
    assert!(set.colors().iter().all(|c| *c == Vec3::ZERO));
    assert_eq!(counters.uploads.get(), 3);
}

#[test]
fn test_zero_count_renders_nothing() {
    let counters = Rc::new(Counters::default());
    let mut vis = build(CountingBackend::new(counters.clone()), 0, None).unwrap();
    assert_eq!(vis.point_count(), 0);
    vis.render(&camera()).unwrap();
    assert_eq!(vis.backend().last_draw, vec![0]);
}

#[test]
fn test_failed_upload_keeps_previous_set() {
    let counters = Rc::new(Counters::default());
    let mut backend = CountingBackend::new(counters.clone());
    backend.fail_upload = Some(2);
    let mut vis = build(backend, 40, None).unwrap();
    let before = vis.attributes().cloned();

    let err = vis.apply(ParameterChange::Count(80)).unwrap_err();
    assert!(matches!(err, RenderError::Gpu(GpuError::TooManyPoints(80))));
    assert_eq!(vis.attributes().cloned(), before);
    assert_eq!(vis.parameters().count, 40);
    assert_eq!(counters.point_sets.get(), 1);

    // a later change goes through
    vis.apply(ParameterChange::Count(60)).unwrap();
    assert_eq!(vis.point_count(), 60);
    assert_eq!(counters.point_sets.get(), 1);
}

#[test]
fn test_failed_star_upload_releases_everything() {
    let counters = Rc::new(Counters::default());
    let mut backend = CountingBackend::new(counters.clone());
    backend.fail_upload = Some(2);
    let result = build(backend, 10, Some(BrightStar::DEFAULT));
    assert!(result.is_err());
    assert_eq!(counters.point_sets.get(), 0);
    assert_eq!(counters.programs.get(), 0);
}

#[test]
fn test_invalid_count_on_construction() {
    let counters = Rc::new(Counters::default());
    let result = build(CountingBackend::new(counters.clone()), -1, None);
    assert!(matches!(result, Err(RenderError::Galaxy(_))));
    assert_eq!(counters.programs.get(), 0);
}

#[test]
fn test_reset_restores_default_count() {
    let counters = Rc::new(Counters::default());
    let mut vis = build(CountingBackend::new(counters), 10, None).unwrap();
    vis.apply(ParameterChange::ResetToDefaults).unwrap();
    assert_eq!(vis.parameters(), &GalaxyParameters::DEFAULT);
    assert_eq!(vis.point_count(), 313_400);
}
