mod host;
mod scene_file;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use lumen_assets::MeshLibrary;
use lumen_render::{GraphicsDevice, RecordingDevice};
use tracing_subscriber::EnvFilter;

use crate::host::{Viewer, run_frames};
use crate::scene_file::SceneFile;

#[derive(Parser)]
#[command(name = "lumen-cli", about = "Headless host for lumen scenes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Run a scene for a number of frames and print per-frame device stats
    Run {
        /// Scene description (YAML)
        #[arg(short, long)]
        scene: PathBuf,
        /// Number of frames to run
        #[arg(short, long, default_value = "60")]
        frames: u32,
        /// Seconds per frame passed to update
        #[arg(long, default_value = "0.01")]
        dt: f32,
        /// Orbit the camera even if the scene file does not ask for it
        #[arg(long)]
        orbit: bool,
        /// Viewport size as WIDTHxHEIGHT; overrides the camera aspect
        #[arg(long, value_parser = parse_viewport)]
        viewport: Option<(u32, u32)>,
    },
    /// Draw one frame of a scene and print every device call
    Trace {
        /// Scene description (YAML)
        #[arg(short, long)]
        scene: PathBuf,
    },
}

fn load(path: &Path) -> anyhow::Result<SceneFile> {
    SceneFile::load(path).with_context(|| format!("loading scene {}", path.display()))
}

fn parse_viewport(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let parse = |v: &str| v.trim().parse::<u32>().map_err(|e| format!("{v:?}: {e}"));
    Ok((parse(w)?, parse(h)?))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Info => {
            println!("lumen-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("math: {}", lumen_math::crate_info());
            println!("render: {}", lumen_render::crate_info());
            println!("assets: {}", lumen_assets::crate_info());
            println!("scene: {}", lumen_scene::crate_info());
        }
        Commands::Run {
            scene,
            frames,
            dt,
            orbit,
            viewport,
        } => {
            let mut file = load(&scene)?;
            file.orbit |= orbit;
            let mut viewer = Viewer::build(&file, &mut MeshLibrary::default())?;
            if let Some((width, height)) = viewport {
                viewer.resize(width, height);
            }

            println!("Running {} for {frames} frames (dt={dt})", scene.display());
            let stats = run_frames(&mut viewer, frames, dt);
            for (frame, s) in stats.iter().enumerate() {
                println!("frame {frame}: {s}");
            }
            let vertices: u64 = stats.iter().map(|s| s.vertices).sum();
            println!("Total: frames={}, vertices={vertices}", stats.len());
        }
        Commands::Trace { scene } => {
            let file = load(&scene)?;
            let viewer = Viewer::build(&file, &mut MeshLibrary::default())?;

            let mut device = RecordingDevice::new();
            device.set_depth_test(true);
            device.clear();
            viewer.draw(&mut device);
            for (i, call) in device.calls().iter().enumerate() {
                println!("{i:4}  {call}");
            }
            println!("{} calls, {} draws", device.calls().len(), device.draw_count());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_run_arguments() {
        let cli = Cli::try_parse_from([
            "lumen-cli", "-v", "run", "--scene", "a.yaml", "--frames", "3", "--viewport", "800x600",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Run {
                frames, viewport, orbit, ..
            } => {
                assert_eq!(frames, 3);
                assert_eq!(viewport, Some((800, 600)));
                assert!(!orbit);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn viewport_parsing() {
        assert_eq!(parse_viewport("1280x720"), Ok((1280, 720)));
        assert!(parse_viewport("1280").is_err());
        assert!(parse_viewport("ax2").is_err());
    }
}
