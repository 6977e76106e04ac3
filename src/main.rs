use clap::Parser;
use gesture_mouse_lib::core::config::Config;
use gesture_mouse_lib::models::hand::FrameSize;
use gesture_mouse_lib::platform::input::{default_sink, DryRunSink, InputSink};
use gesture_mouse_lib::platform::landmarks::{LandmarkSource, PacedSource, ReplayOptions, ReplaySource};
use gesture_mouse_lib::models::input::ScreenBounds;
use gesture_mouse_lib::VirtualMouse;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Screen size reported by the dry-run backend when nothing else is known
const DRY_RUN_SCREEN: ScreenBounds = ScreenBounds {
    width: 1920,
    height: 1080,
};

/// Drive the mouse with hand gestures from recorded hand landmarks
#[derive(Parser, Debug)]
#[command(name = "gesture-mouse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON Lines file of detector output to replay
    #[arg(short, long)]
    replay: PathBuf,

    /// Config file path (defaults to ~/.gesture_mouse/config/settings.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log actions instead of moving the real mouse
    #[arg(long)]
    dry_run: bool,

    /// Flip landmarks horizontally before mapping (selfie view)
    #[arg(long)]
    mirror: bool,

    /// Landmarks are normalized to [0, 1] and need scaling to frame pixels
    #[arg(long)]
    normalized: bool,

    /// Sleep between frames to match the recorded timestamps
    #[arg(long)]
    realtime: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // RUST_LOG still overrides the level chosen here
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let fallback_screen = config.screen_override.unwrap_or(DRY_RUN_SCREEN);
    let sink: Box<dyn InputSink> = if cli.dry_run {
        Box::new(DryRunSink::new(fallback_screen))
    } else {
        default_sink(fallback_screen)
    };

    let mut virtual_mouse = VirtualMouse::new(&config, sink)?;

    let frame_size = FrameSize::new(config.frame_width, config.frame_height);
    let options = ReplayOptions {
        normalized: cli.normalized,
        mirror: cli.mirror,
    };
    let replay = ReplaySource::open(&cli.replay, frame_size, options)?;
    let mut source: Box<dyn LandmarkSource> = if cli.realtime {
        Box::new(PacedSource::new(replay))
    } else {
        Box::new(replay)
    };

    let stop = Arc::new(AtomicBool::new(false));
    let stop_handler = stop.clone();
    ctrlc::set_handler(move || {
        stop_handler.store(true, Ordering::SeqCst);
    })?;

    log::info!("Virtual Mouse started, press Ctrl+C to quit");
    let summary = virtual_mouse.run(&mut source, &stop)?;

    log::info!(
        "Virtual Mouse closed: {} frames, {} left clicks, {} right clicks, {} scrolls up, {} scrolls down{}",
        summary.frames,
        summary.left_clicks,
        summary.right_clicks,
        summary.scroll_ups,
        summary.scroll_downs,
        if summary.stopped_by_user { " (stopped by user)" } else { "" }
    );

    Ok(())
}
