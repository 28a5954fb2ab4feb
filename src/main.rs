use std::collections::BTreeMap;
use std::path::PathBuf;

use canvas::scene::Layer;
use canvas::{CanvasConfig, ConfigError, LayerKind, PatternCanvas, SceneError};
use clap::{Parser, Subcommand};
use kurbo::Size;
use schema::CodecError;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("decode failed: {0}")]
    Codec(#[from] CodecError),
    #[error("draw failed: {0}")]
    Scene(#[from] SceneError),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "stitchboard", about = "Cross-stitch pattern canvas tools")]
struct Cli {
    /// Log filter directives, e.g. `info` or `canvas=trace`.
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a key-prefixed document, draw it headlessly and print a JSON summary.
    Inspect {
        file: PathBuf,

        /// Viewport width in pixels for the culling pass.
        #[arg(long, default_value_t = 1280.0)]
        width: f64,

        /// Viewport height in pixels for the culling pass.
        #[arg(long, default_value_t = 800.0)]
        height: f64,
    },
}

#[derive(Debug, Serialize)]
struct Summary {
    key: String,
    width: u16,
    height: u16,
    palette: usize,
    /// Drawables per container layer, primitives per fillable layer.
    layers: BTreeMap<LayerKind, usize>,
    indexed: usize,
    special_models: usize,
    visible: usize,
    hidden: usize,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_new(&cli.log)?).with_writer(std::io::stderr).init();

    match cli.command {
        Command::Inspect { file, width, height } => run_inspect(file, Size::new(width, height)),
    }
}

fn run_inspect(path: PathBuf, viewport: Size) -> Result<(), CliError> {
    let bytes = std::fs::read(&path).map_err(|source| CliError::Read { path: path.clone(), source })?;
    let (key, project) = schema::decode_document(&bytes)?;

    let mut canvas = PatternCanvas::new(CanvasConfig::from_env()?);
    canvas.resize(viewport);
    canvas.draw_pattern(&project)?;
    let culled = canvas.tick().unwrap_or_default();

    let scene = canvas.scene();
    let layers = scene
        .layers()
        .map(|(kind, layer)| {
            let count = match layer {
                Layer::Container(container) => container.len(),
                Layer::Fillable(graphics) => graphics.primitives().len(),
            };
            (kind, count)
        })
        .collect();

    let summary = Summary {
        key: key.to_string(),
        width: project.pattern.properties.width,
        height: project.pattern.properties.height,
        palette: project.pattern.palette.len(),
        layers,
        indexed: scene.index_len(),
        special_models: scene.special_model_count(),
        visible: culled.visible,
        hidden: culled.hidden,
    };
    tracing::info!(%key, path = %path.display(), "pattern inspected");
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
