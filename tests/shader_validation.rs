//! WGSL validation for the embedded shading program.
//!
//! Parses the joined vertex + fragment source with naga and runs the full
//! validator, so shader typos fail `cargo test` instead of the first frame.

use galaxy::shading::{DISCARD_BELOW, FLOAT_SPEED, FRAGMENT_ENTRY, SHARPNESS, VERTEX_ENTRY};
use galaxy::{FrameUniforms, PointVertex, ShadingProgram};

fn parse(source: &str) -> naga::Module {
    naga::front::wgsl::parse_str(source)
        .unwrap_or_else(|e| panic!("WGSL parse error:\n{}", e.emit_to_string(source)))
}

fn validate(module: &naga::Module) {
    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(module)
    .unwrap_or_else(|e| panic!("WGSL validation error: {:?}", e));
}

#[test]
fn test_galaxy_program_validates() {
    let module = parse(&ShadingProgram::galaxy().source());
    validate(&module);
}

#[test]
fn test_entry_points() {
    let module = parse(&ShadingProgram::galaxy().source());

    let vertex = module
        .entry_points
        .iter()
        .find(|ep| ep.name == VERTEX_ENTRY)
        .expect("vertex entry point");
    assert_eq!(vertex.stage, naga::ShaderStage::Vertex);

    let fragment = module
        .entry_points
        .iter()
        .find(|ep| ep.name == FRAGMENT_ENTRY)
        .expect("fragment entry point");
    assert_eq!(fragment.stage, naga::ShaderStage::Fragment);
}

#[test]
fn test_vertex_inputs_match_point_layout() {
    let module = parse(&ShadingProgram::galaxy().source());
    let vertex = module
        .entry_points
        .iter()
        .find(|ep| ep.name == VERTEX_ENTRY)
        .unwrap();

    let locations: Vec<u32> = vertex
        .function
        .arguments
        .iter()
        .filter_map(|arg| match arg.binding {
            Some(naga::Binding::Location { location, .. }) => Some(location),
            _ => None,
        })
        .collect();
    assert_eq!(locations, vec![0, 1, 2, 3]);
    assert_eq!(std::mem::size_of::<PointVertex>(), 40);
}

#[test]
fn test_uniform_block_size_matches_rust() {
    let module = parse(&ShadingProgram::galaxy().source());
    let mut layouter = naga::proc::Layouter::default();
    layouter.update(module.to_ctx()).unwrap();

    let (handle, _) = module
        .types
        .iter()
        .find(|(_, ty)| ty.name.as_deref() == Some("Uniforms"))
        .expect("Uniforms struct");
    assert_eq!(
        layouter[handle].size as usize,
        std::mem::size_of::<FrameUniforms>()
    );
}

#[test]
fn test_each_payload_is_standalone_text() {
    let program = ShadingProgram::galaxy();
    assert!(program.vertex.contains("@vertex"));
    assert!(!program.vertex.contains("@fragment"));
    assert!(program.fragment.contains("@fragment"));
    assert!(program.fragment.contains("discard"));
}

fn constant_value(module: &naga::Module, name: &str) -> f32 {
    let (_, constant) = module
        .constants
        .iter()
        .find(|(_, c)| c.name.as_deref() == Some(name))
        .unwrap_or_else(|| panic!("constant {} not declared", name));
    match module.global_expressions[constant.init] {
        naga::Expression::Literal(naga::Literal::F32(v)) => v,
        naga::Expression::Literal(naga::Literal::AbstractFloat(v)) => v as f32,
        ref other => panic!("constant {} is not a float literal: {:?}", name, other),
    }
}

#[test]
fn test_shader_constants_match_cpu_mirror() {
    let module = parse(&ShadingProgram::galaxy().source());
    assert_eq!(constant_value(&module, "FLOAT_SPEED"), FLOAT_SPEED);
    assert_eq!(constant_value(&module, "SHARPNESS"), SHARPNESS);
    assert_eq!(constant_value(&module, "DISCARD_BELOW"), DISCARD_BELOW);
}

#[test]
fn test_payloads_do_not_redeclare_constants() {
    let program = ShadingProgram::galaxy();
    for payload in [&program.vertex, &program.fragment] {
        assert!(!payload.contains("const "));
    }
}
