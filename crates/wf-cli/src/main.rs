//! CLI frontend for the Wayfarer adventure engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::list::ListKind;

#[derive(Parser)]
#[command(
    name = "wf",
    about = "Wayfarer: play and inspect text adventures",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a world interactively
    Play {
        /// World file (default: the bundled sample)
        #[arg(short, long)]
        world: Option<PathBuf>,

        /// RNG seed for the lockpick minigame
        #[arg(long, default_value = "2212")]
        seed: u64,

        /// Guesses allowed in the lockpick minigame
        #[arg(long, default_value = "5")]
        tries: u32,

        /// Number of event log entries kept
        #[arg(long, default_value = "200")]
        log_capacity: usize,
    },

    /// Validate a world file
    Check {
        /// World file (default: the bundled sample)
        #[arg(short, long)]
        world: Option<PathBuf>,
    },

    /// List locations, objects, characters or rules
    List {
        /// What to list
        #[arg(value_enum)]
        kind: ListKind,

        /// World file (default: the bundled sample)
        #[arg(short, long)]
        world: Option<PathBuf>,
    },

    /// Show details of a location, object or character
    Show {
        /// Entity id
        id: String,

        /// World file (default: the bundled sample)
        #[arg(short, long)]
        world: Option<PathBuf>,
    },

    /// Print the bundled sample world as JSON
    Sample {
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "warn,wf=debug,wf_core=debug,wf_engine=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Play {
            world,
            seed,
            tries,
            log_capacity,
        } => commands::play::run(world.as_deref(), seed, tries, log_capacity),
        Commands::Check { world } => commands::check::run(world.as_deref()),
        Commands::List { kind, world } => commands::list::run(world.as_deref(), kind),
        Commands::Show { id, world } => commands::show::run(world.as_deref(), &id),
        Commands::Sample { output } => commands::sample::run(output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
