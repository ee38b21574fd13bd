//! Headless driver for the evergreen tree scene.
//!
//! Runs a scripted camera dolly (push in until the tree bursts, hold,
//! pull back out) against a [`TreeScene`] and logs what a renderer would
//! draw. Usage:
//!
//! ```text
//! evergreen [--realtime] [--options <FILE>] [--photos <DIR>]
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use evergreen::assets::discover_photos;
use evergreen::camera::{CameraProbe, OrbitCamera};
use evergreen::error::EvergreenError;
use evergreen::options::Options;
use evergreen::photo::PhotoAsset;
use evergreen::scene::{FrameInput, TreeScene};
use evergreen::util::easing::EasingFunction;
use evergreen::util::frame_timing::FrameTiming;
use glam::Vec2;

const SEED: u64 = 0x5eed;
const FPS: u32 = 60;
const PUSH_FRAMES: u32 = 240;
const HOLD_FRAMES: u32 = 120;
const PULL_FRAMES: u32 = 240;

#[derive(Debug, Parser)]
#[command(name = "evergreen")]
#[command(about = "Run the evergreen tree scene headless along a scripted camera dolly")]
#[command(version)]
struct Args {
    /// Pace frames to wall-clock time instead of a fixed step
    #[arg(long)]
    realtime: bool,

    /// Options preset (TOML)
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Directory of jpg/png photos to hang as cards
    #[arg(long, value_name = "DIR")]
    photos: Option<PathBuf>,
}

fn load_photos(dir: &Path) -> Result<Vec<PhotoAsset<PathBuf>>, EvergreenError> {
    Ok(discover_photos(dir)?
        .into_iter()
        .map(|path| PhotoAsset {
            texture: path,
            dimensions: None,
        })
        .collect())
}

/// Scripted orbit distance for `frame`: ease in, hold, ease back out.
fn dolly_distance(frame: u32, near: f32, far: f32) -> f32 {
    let ease = EasingFunction::SmoothStep;
    let t = if frame < PUSH_FRAMES {
        1.0 - ease.evaluate(frame as f32 / PUSH_FRAMES as f32)
    } else if frame < PUSH_FRAMES + HOLD_FRAMES {
        0.0
    } else {
        ease.evaluate((frame - PUSH_FRAMES - HOLD_FRAMES) as f32 / PULL_FRAMES as f32)
    };
    near + (far - near) * t
}

fn run(args: &Args) -> Result<(), EvergreenError> {
    let options = match &args.options {
        Some(path) => {
            log::info!("loading options from {}", path.display());
            Options::load(path)?
        }
        None => Options::default(),
    };

    let mut scene: TreeScene<PathBuf> = TreeScene::new(&options, SEED)?;
    if let Some(dir) = &args.photos {
        scene.attach_photos(load_photos(dir)?)?;
    }

    let mut orbit = OrbitCamera::new(&options.camera, options.tree.camera_target(), 16.0 / 9.0);
    let (near, far) = orbit.distance_range();
    let mut timing = FrameTiming::new(if args.realtime { FPS } else { 0 });
    let step = 1.0 / FPS as f32;

    for frame in 0..PUSH_FRAMES + HOLD_FRAMES + PULL_FRAMES {
        if args.realtime {
            while !timing.should_render() {
                std::thread::sleep(Duration::from_millis(1));
            }
        }
        let measured = timing.advance();
        let input = if args.realtime {
            measured
        } else {
            FrameInput::fixed(frame, step)
        };

        orbit.set_distance(dolly_distance(frame, near, far));
        orbit.rotate(Vec2::new(0.6, 0.0));
        let _ = orbit.update();

        let view = scene.tick(input, &orbit);
        if frame % FPS == 0 {
            let billboarded = view.photo_transforms.iter().filter(|t| t.billboarded).count();
            log::info!(
                "frame {frame:>4}  distance {:.2}  explosion {:.3}  target {:.2}",
                orbit.distance(),
                view.signal.explosion_factor(),
                view.signal.collapse_target(),
            );
            log::info!(
                "frame {frame:>4}  instances {:>5}  body {}  cards {billboarded}/{}",
                view.visible_instances(),
                if view.body_visible { "shown" } else { "hidden" },
                view.photos.len(),
            );
        }
    }

    log::info!("finished {} ticks at {:.0} fps", scene.frame(), timing.fps());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(&Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_arguments_are_independent() {
        let args = Args::try_parse_from([
            "evergreen",
            "--photos",
            "pics",
            "--options",
            "night.toml",
            "--realtime",
        ])
        .unwrap();
        assert!(args.realtime);
        assert_eq!(args.options, Some(PathBuf::from("night.toml")));
        assert_eq!(args.photos, Some(PathBuf::from("pics")));
    }

    #[test]
    fn no_arguments_runs_defaults() {
        let args = Args::try_parse_from(["evergreen"]).unwrap();
        assert!(!args.realtime);
        assert!(args.options.is_none());
        assert!(args.photos.is_none());
    }

    #[test]
    fn stray_arguments_are_rejected() {
        assert!(Args::try_parse_from(["evergreen", "night.toml"]).is_err());
        assert!(Args::try_parse_from(["evergreen", "--frobnicate"]).is_err());
        assert!(Args::try_parse_from(["evergreen", "--photos", "a", "--photos", "b"]).is_err());
    }

    #[test]
    fn dolly_pushes_holds_and_pulls() {
        assert!((dolly_distance(0, 3.8, 9.0) - 9.0).abs() < 1e-5);
        assert_eq!(dolly_distance(PUSH_FRAMES, 3.8, 9.0), 3.8);
        assert_eq!(dolly_distance(PUSH_FRAMES + HOLD_FRAMES - 1, 3.8, 9.0), 3.8);
        let end = dolly_distance(PUSH_FRAMES + HOLD_FRAMES + PULL_FRAMES - 1, 3.8, 9.0);
        assert!(end > 8.9);
    }
}
