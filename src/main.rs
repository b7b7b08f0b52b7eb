//! instability - CLI entry point
//!
//! Stochastic spatial model of clonal evolution under genomic
//! instability.

use clap::{Parser, Subcommand};
use instability::{Config, World};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "instability")]
#[command(version)]
#[command(about = "Spatial model of clonal evolution under genomic instability")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Override the configured number of time steps
        #[arg(short, long)]
        steps: Option<u64>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory for recorded data
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            steps,
            seed,
            output,
            quiet,
        } => run_simulation(config, steps, seed, output, quiet),

        Commands::Init { output } => generate_config(output),
    }
}

fn run_simulation(
    config_path: PathBuf,
    steps: Option<u64>,
    seed: Option<u64>,
    output: PathBuf,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };

    if let Some(steps) = steps {
        config.run.time_steps = steps;
    }

    std::fs::create_dir_all(&output)?;

    let mut world = match seed {
        Some(s) => {
            println!("Using seed: {}", s);
            World::new_with_seed(config.clone(), s)?
        }
        None => World::new(config.clone())?,
    };

    println!("Starting simulation");
    println!("  Seed: {}", world.seed());
    println!(
        "  Grid: {}x{} ({} sites)",
        config.world.width,
        config.world.height,
        config.world.width * config.world.height
    );
    println!("  Initial population: {}", world.population());
    println!("  Time steps: {}", config.run.time_steps);
    println!();

    let stats_interval = config.logging.stats_interval;
    let start = Instant::now();

    let outcome = world.run_with_callback(|w| {
        if !quiet && w.update % stats_interval == 0 {
            println!("{}", w.stats.summary());
        }
    });

    let elapsed = start.elapsed();
    let steps_per_sec = world.update as f64 / elapsed.as_secs_f64();

    println!();
    println!("=== Simulation Complete ===");
    println!("Outcome: {}", outcome);
    println!("Updates: {}", world.update);
    println!("Time: {:.2}s ({:.1} steps/s)", elapsed.as_secs_f64(), steps_per_sec);
    println!("Final population: {}", world.population());
    if world.population() > 0 {
        println!(
            "Mean fitness: {:.3} (min {:.3}, max {:.3})",
            world.stats.fitness_mean, world.stats.fitness_min, world.stats.fitness_max
        );
        println!("Mean stability: {:.3}", world.stats.stability_mean);
    }

    let stats_path = output.join("stats_history.json");
    world.stats_history.save(stats_path.to_str().unwrap())?;
    println!("Stats history: {:?}", stats_path);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
