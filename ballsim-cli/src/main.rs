use ballsim_core::diagnostics::{format_histogram, format_summary};
use ballsim_core::{run_container_experiment, CollisionModel, SimConfig, World};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ballsim")]
#[command(about = "BallSim - bouncing balls in a box, counted and binned", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one simulation and print its statistics
    Run {
        /// JSON configuration file; flags below override its values
        #[arg(long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        overrides: Overrides,
        /// Number of ticks to simulate
        #[arg(long, default_value_t = 86_400)]
        ticks: u64,
        /// Print statistics as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run the default setup in square, wide and narrow containers
    Experiment {
        #[arg(long, default_value_t = 86_400)]
        ticks: u64,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(clap::Args)]
struct Overrides {
    /// Number of balls
    #[arg(long)]
    balls: Option<usize>,
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    #[arg(long)]
    seed: Option<u64>,
    /// Lower end of the per-axis speed range
    #[arg(long, allow_negative_numbers = true)]
    vmin: Option<f64>,
    /// Upper end of the per-axis speed range
    #[arg(long, allow_negative_numbers = true)]
    vmax: Option<f64>,
    /// Wall restitution (1.0 = perfectly elastic)
    #[arg(long)]
    elasticity: Option<f64>,
    /// Ball-ball velocity update
    #[arg(long, value_enum)]
    model: Option<ModelArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModelArg {
    Reference,
    Elastic,
}

impl From<ModelArg> for CollisionModel {
    fn from(m: ModelArg) -> Self {
        match m {
            ModelArg::Reference => CollisionModel::Reference,
            ModelArg::Elastic => CollisionModel::Elastic,
        }
    }
}

impl Overrides {
    fn apply(self, mut config: SimConfig) -> SimConfig {
        if let Some(n) = self.balls {
            config.num_balls = n;
        }
        if let Some(w) = self.width {
            config.width = w;
        }
        if let Some(h) = self.height {
            config.height = h;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(v) = self.vmin {
            config.velocity_range.0 = v;
        }
        if let Some(v) = self.vmax {
            config.velocity_range.1 = v;
        }
        if let Some(e) = self.elasticity {
            config.elasticity = e;
        }
        if let Some(m) = self.model {
            config.model = m.into();
        }
        config
    }
}

fn main() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            overrides,
            ticks,
            json,
        } => run(config, overrides, ticks, json),
        Commands::Experiment { ticks, seed } => experiment(ticks, seed),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(
    config_path: Option<PathBuf>,
    overrides: Overrides,
    ticks: u64,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let base = match config_path {
        Some(path) => SimConfig::load(&path)?,
        None => SimConfig::default(),
    };
    let config = overrides.apply(base);

    let mut world = World::from_config(&config)?;
    info!(
        "running {} balls in {}x{} for {ticks} ticks",
        world.particles().len(),
        world.width,
        world.height
    );
    world.run(ticks);
    let stats = world.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", format_summary(&stats));
        print!("{}", format_histogram(&stats));
    }
    Ok(())
}

fn experiment(ticks: u64, seed: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let base = SimConfig {
        seed,
        ..SimConfig::default()
    };
    info!("container shape experiment, {ticks} ticks per container");
    for ((width, height), stats) in run_container_experiment(&base, ticks)? {
        println!("{width}x{height} container: {}", format_summary(&stats));
    }
    Ok(())
}
