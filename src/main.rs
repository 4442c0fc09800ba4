use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use quadrant::app::MainController;
use quadrant::config::{AppConfig, CONFIG_FILE, MismatchPolicy};
use quadrant::render::run_app;
use quadrant::util::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "quadrant", version, about = "Four-quadrant memory game")]
struct Args {
    /// Path to the JSON config file.
    #[arg(long, default_value = CONFIG_FILE, env = "QUADRANT_CONFIG")]
    config: PathBuf,

    /// Level the first round starts at.
    #[arg(long)]
    level: Option<u8>,

    /// Fixed RNG seed for reproducible sequences.
    #[arg(long)]
    seed: Option<u64>,

    /// End the round on a wrong press instead of ignoring it.
    #[arg(long)]
    strict: bool,

    /// Time allowed per input step, in milliseconds.
    #[arg(long)]
    input_window_ms: Option<u64>,

    /// Target frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Also write logs to a daily rolling file in this directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Write the effective config to `--config` and exit.
    #[arg(long)]
    write_default_config: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(level) = self.level {
            config.play.start_level = level;
        }
        if let Some(seed) = self.seed {
            config.play.seed = Some(seed);
        }
        if self.strict {
            config.play.mismatch_policy = MismatchPolicy::GameOver;
        }
        if let Some(ms) = self.input_window_ms {
            config.play.input_window_ms = Some(ms);
        }
        if let Some(fps) = self.fps {
            config.timing.fps = fps;
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = AppConfig::load_from(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config.display()))?;
    args.apply_overrides(&mut config);
    config.validate()?;

    if args.write_default_config {
        config.save_to(&args.config)?;
        info!(path = %args.config.display(), "config written");
        return Ok(());
    }

    info!(
        level = config.play.start_level,
        policy = ?config.play.mismatch_policy,
        fps = config.timing.fps,
        "quadrant starting"
    );
    let controller = MainController::new(&config)?;
    run_app(&config.window, controller)?;
    info!("quadrant stopped");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let _guard = match init_logging(args.log_dir.as_deref(), args.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
