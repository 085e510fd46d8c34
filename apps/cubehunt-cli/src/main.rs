mod play;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use cubehunt_kernel::{DeviceInfo, GameConfig, ImmersiveSupport};
use cubehunt_persist::{HighScoreKeeper, HighScoreStore, JsonFileStore};
use tracing_subscriber::EnvFilter;

use crate::play::{AutoAim, Driver, Host, PlayOptions};

#[derive(Parser)]
#[command(name = "cubehunt-cli", about = "Headless host for the Cube Hunt shooting gallery")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, device capabilities and the default config
    Info {
        /// User-agent string to classify
        #[arg(long, default_value = "")]
        user_agent: String,
        /// Report the immersive API as present
        #[arg(long)]
        webxr: bool,
    },
    /// Play one game on a simulated clock
    Play {
        /// JSON config file; defaults are used when absent
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory holding the high-score record
        #[arg(long, default_value = ".cubehunt")]
        data_dir: PathBuf,
        /// Placement seed (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,
        /// JSON list of `{ "at": secs, "event": {...} }` inputs; replaces auto-aim
        #[arg(long)]
        script: Option<PathBuf>,
        /// Simulated seconds to run for at most
        #[arg(short, long, default_value = "60")]
        duration: f64,
        /// Simulated frames per second
        #[arg(long, default_value = "60")]
        fps: u32,
        /// Auto-aim chance of aiming at a target, 0..=1
        #[arg(long, default_value = "0.8")]
        accuracy: f64,
        /// Auto-aim mean seconds between shots
        #[arg(long, default_value = "0.8")]
        reaction: f64,
        /// Immersive capability to pretend the device has
        #[arg(long, value_enum, default_value = "none")]
        immersive: ImmersiveArg,
        /// Backdrop texture; a missing file falls back to a solid color
        #[arg(long, default_value = "assets/sky.jpg")]
        backdrop: PathBuf,
        /// Environment model; a missing file leaves the scene without one
        #[arg(long, default_value = "assets/room.glb")]
        environment: PathBuf,
    },
    /// Inspect or reset the stored high score
    Highscore {
        #[command(subcommand)]
        action: HighscoreAction,
        /// Directory holding the high-score record
        #[arg(long, default_value = ".cubehunt", global = true)]
        data_dir: PathBuf,
    },
}

#[derive(Subcommand)]
enum HighscoreAction {
    Show,
    Reset,
}

#[derive(Clone, Copy, ValueEnum)]
enum ImmersiveArg {
    Vr,
    Ar,
    Inline,
    None,
}

impl From<ImmersiveArg> for ImmersiveSupport {
    fn from(arg: ImmersiveArg) -> Self {
        match arg {
            ImmersiveArg::Vr => ImmersiveSupport::ImmersiveVr,
            ImmersiveArg::Ar => ImmersiveSupport::ImmersiveAr,
            ImmersiveArg::Inline => ImmersiveSupport::InlineOnly,
            ImmersiveArg::None => ImmersiveSupport::Unavailable,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info { user_agent, webxr } => {
            println!("cubehunt-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("{}", DeviceInfo::from_user_agent(&user_agent, webxr));
            println!("default config:");
            println!("{}", serde_json::to_string_pretty(&GameConfig::default())?);
        }
        Commands::Play {
            config,
            data_dir,
            seed,
            script,
            duration,
            fps,
            accuracy,
            reaction,
            immersive,
            backdrop,
            environment,
        } => {
            let mut config = match config {
                Some(path) => GameConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => GameConfig::default(),
            };
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            config.validate()?;

            let mut driver = match script {
                Some(path) => Driver::script(play::load_script(&path)?),
                None => Driver::Auto(AutoAim::new(
                    config.seed.unwrap_or_default().wrapping_add(1),
                    accuracy,
                    reaction,
                )),
            };

            let (keeper, advisory) = HighScoreKeeper::open_dir(&data_dir);
            let mut host = Host::new(config, keeper, advisory);
            let opts = PlayOptions {
                duration_secs: duration,
                fps,
                immersive: immersive.into(),
                backdrop,
                environment,
            };
            let report = play::run(&mut host, &mut driver, &opts);

            for line in &report.log {
                println!("{line}");
            }
            print!("{}", report.frame);
            println!("{}", report.summary);
            println!("{}", report.status);
            if !report.persisted {
                println!("(high score {} was not saved)", report.high_score);
            }
        }
        Commands::Highscore { action, data_dir } => {
            let store = JsonFileStore::open(&data_dir)
                .with_context(|| format!("opening {}", data_dir.display()))?;
            match action {
                HighscoreAction::Show => {
                    let high_score = store
                        .load()
                        .with_context(|| format!("reading {}", store.describe()))?;
                    println!("High Score: {high_score}");
                }
                HighscoreAction::Reset => {
                    let described = store.describe();
                    let (mut keeper, advisory) = HighScoreKeeper::open(Box::new(store));
                    if keeper.is_degraded() {
                        anyhow::bail!("cannot read {described}: {}", advisory.unwrap_or_default());
                    }
                    if let Some(advisory) = keeper.reset() {
                        anyhow::bail!("resetting {described}: {advisory}");
                    }
                    println!("High score reset ({described})");
                }
            }
        }
    }

    Ok(())
}
