use argh::FromArgs;
use galaxy::prelude::*;
use galaxy::{parse_hex_color, ViewerError};

/// Interactive procedural galaxy point cloud.
#[derive(FromArgs)]
struct Args {
    /// number of points
    #[argh(option)]
    count: Option<i64>,

    /// seed for a reproducible galaxy
    #[argh(option)]
    seed: Option<u64>,

    /// nominal radius shown to the controls
    #[argh(option)]
    radius: Option<f32>,

    /// inside gradient color as #rrggbb
    #[argh(option, from_str_fn(color))]
    inside: Option<Vec3>,

    /// outside gradient color as #rrggbb
    #[argh(option, from_str_fn(color))]
    outside: Option<Vec3>,

    /// largest per-point scale
    #[argh(option)]
    scale_max: Option<f32>,

    /// squash the cloud along z by this factor
    #[argh(option)]
    flatten: Option<f32>,

    /// hide the orbiting star
    #[argh(switch)]
    no_star: bool,

    /// camera distance below which the overlay message shows
    #[argh(option)]
    overlay_threshold: Option<f32>,
}

fn color(text: &str) -> Result<Vec3, String> {
    parse_hex_color(text).map_err(|e| e.to_string())
}

impl Args {
    fn into_viewer(self) -> Viewer {
        let mut params = GalaxyParameters::DEFAULT;
        if let Some(count) = self.count {
            params.count = count;
        }
        if let Some(radius) = self.radius {
            params.radius = radius;
        }
        if let Some(inside) = self.inside {
            params.color_inside = inside;
        }
        if let Some(outside) = self.outside {
            params.color_outside = outside;
        }

        let mut generator = GeneratorConfig::DEFAULT;
        if let Some(scale_max) = self.scale_max {
            generator.scale_max = scale_max;
        }
        if let Some(flatten) = self.flatten {
            generator = generator.with_anisotropy(1.0, flatten);
        }

        let mut overlay = ZoomOverlay::default();
        if let Some(threshold) = self.overlay_threshold {
            overlay.set_zoom_threshold(threshold);
        }

        let mut viewer = Viewer::new()
            .with_parameters(params)
            .with_generator(generator)
            .with_overlay(overlay);
        if self.no_star {
            viewer = viewer.with_star(None);
        }
        if let Some(seed) = self.seed {
            viewer = viewer.with_seed(seed);
        }
        viewer
    }
}

fn run(args: Args) -> Result<(), ViewerError> {
    args.into_viewer().run()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();
    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
