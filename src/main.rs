use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use antsomg_colony::{Colony, ReturnToStart};
use antsomg_core::config::AppConfig;

#[derive(Parser)]
#[command(name = "antsomg", version, about = "Pheromone-guided graph navigation")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "antsomg.toml", env = "ANTSOMG_CONFIG")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the colony until every ant returns to the start, then print the graphs
    Run {
        /// Override the configured random seed
        #[arg(long)]
        seed: Option<u64>,
        /// Override the configured cycle bound
        #[arg(long)]
        cycles: Option<usize>,
    },
    /// Print the initial topology of every configured graph
    Export,
    /// Show current configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("antsomg=info,warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(&cli.config)?;

    match cli.command.unwrap_or(Commands::Run {
        seed: None,
        cycles: None,
    }) {
        Commands::Config => {
            println!("{}", config.to_toml()?);
        }
        Commands::Export => {
            for graph in &config.graphs {
                print!("{}", graph.build()?.as_graphviz(&graph.name));
            }
        }
        Commands::Run { seed, cycles } => {
            if seed.is_some() {
                config.colony.seed = seed;
            }
            if let Some(cycles) = cycles {
                config.colony.max_cycles = cycles;
            }
            info!(
                graphs = config.graphs.len(),
                population = config.colony.population,
                "Starting colony"
            );
            let mut colony = Colony::from_config(&config, ReturnToStart)?;
            let report = colony.run()?;
            for (name, graph) in colony.graphs() {
                print!("{}", graph.as_graphviz(name));
            }
            println!("// {}", report);
        }
    }

    Ok(())
}
