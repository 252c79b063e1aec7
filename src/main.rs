use anyhow::{Context, Result};
use clap::Parser;
use rasterpad::{Config, DrawingSurfaceController, export, script::Script};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("RASTERPAD_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "rasterpad")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Replay drawing gestures onto a pixel buffer and save it as PNG"
)]
struct Cli {
    /// Gesture script to replay (TOML list of [[step]] tables)
    #[arg(long, short = 's', value_name = "FILE")]
    script: PathBuf,

    /// PNG file to write (default: generated name in the export directory)
    #[arg(long, short = 'o', value_name = "PNG")]
    output: Option<PathBuf>,

    /// Draw on top of an existing image instead of a blank canvas
    #[arg(long, short = 'i', value_name = "IMAGE", conflicts_with_all = ["width", "height"])]
    input: Option<PathBuf>,

    /// Canvas width in pixels (overrides the config file)
    #[arg(long, value_name = "PX", value_parser = clap::value_parser!(u32).range(1..=16384))]
    width: Option<u32>,

    /// Canvas height in pixels (overrides the config file)
    #[arg(long, value_name = "PX", value_parser = clap::value_parser!(u32).range(1..=16384))]
    height: Option<u32>,

    /// Configuration file (default: ~/.config/rasterpad/config.toml)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(width) = cli.width {
        config.canvas.width = width;
    }
    if let Some(height) = cli.height {
        config.canvas.height = height;
    }

    let script = Script::load(&cli.script)
        .with_context(|| format!("Failed to load script {}", cli.script.display()))?;

    let mut controller = match &cli.input {
        Some(path) => {
            let base = export::load_png(path)
                .with_context(|| format!("Failed to open image {}", path.display()))?;
            DrawingSurfaceController::from_config_with_buffer(&config, base)
        }
        None => DrawingSurfaceController::from_config(&config),
    };

    script
        .apply(&mut controller)
        .context("Script replay failed")?;

    if controller.is_drawing() {
        log::warn!("Script ended in the middle of a gesture; keeping what is drawn");
        controller.gesture_end();
    }

    let drawing = controller.into_buffer();
    let path = match cli.output {
        Some(path) => {
            export::save_png(&drawing, &path)
                .with_context(|| format!("Failed to save {}", path.display()))?;
            path
        }
        None => export::save_to_directory(&drawing, &config.export)
            .context("Failed to save drawing")?,
    };

    println!("Saved drawing to {}", path.display());
    Ok(())
}
