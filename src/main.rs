use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use surfkit::{Geometry, HeadlessHost, LayoutConfig, ResponsiveLayout, SurfaceKind, Viewport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Lay out the surfaces of a layout file on a headless host and print the
/// resulting geometry as JSON.
#[derive(Parser, Debug)]
#[command(name = "surfkit", version)]
struct Args {
    /// Layout file (JSON)
    #[arg(long, env = "SURFKIT_LAYOUT")]
    layout: PathBuf,

    /// Viewport size to resize to after adding surfaces, as WIDTHxHEIGHT.
    /// May be repeated.
    #[arg(long = "resize", value_parser = parse_size)]
    resizes: Vec<Viewport>,

    /// Number of times to flip the layout after resizing
    #[arg(long, default_value_t = 0)]
    flips: u32,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    viewport: Viewport,
    flipped: bool,
    surfaces: Vec<SurfaceReport<'a>>,
}

#[derive(Serialize)]
struct SurfaceReport<'a> {
    id: &'a str,
    kind: SurfaceKind,
    visible: bool,
    geometry: Geometry,
    #[serde(skip_serializing_if = "Option::is_none")]
    draw_commands: Option<&'a [String]>,
}

fn parse_size(s: &str) -> Result<Viewport, String> {
    let (width, height) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let parse = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid size {value:?}: {e}"))
    };
    Ok(Viewport::new(parse(width)?, parse(height)?))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "surfkit=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = LayoutConfig::load(&args.layout)
        .with_context(|| format!("loading {}", args.layout.display()))?;
    tracing::info!(surfaces = config.surfaces.len(), "layout loaded");

    let mut host = HeadlessHost::new(config.width, config.height);
    let mut layout = ResponsiveLayout::new(&host);

    for surface in config.surfaces {
        let id = surface.id.clone();
        layout
            .manager_mut()
            .add_surface_with(&mut host, surface, |context| {
                context.push(format!("clear {}", context.kind));
            })
            .with_context(|| format!("adding surface {id:?}"))?;
    }

    for viewport in &args.resizes {
        host.set_viewport(viewport.width, viewport.height);
        layout.handle_resize(&mut host).context("resizing layout")?;
    }

    for _ in 0..args.flips {
        layout.manager_mut().flip(&mut host).context("flipping layout")?;
    }

    let report = Report {
        viewport: layout.viewport(),
        flipped: layout.manager().is_flipped(),
        surfaces: layout
            .manager()
            .surfaces()
            .iter()
            .map(|surface| SurfaceReport {
                id: surface.id(),
                kind: surface.kind(),
                visible: surface.is_visible(),
                geometry: surface.geometry(),
                draw_commands: surface.context().map(|context| context.commands.as_slice()),
            })
            .collect(),
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    Ok(())
}
