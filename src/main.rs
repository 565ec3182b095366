use std::sync::Arc;

use clap::{Parser, Subcommand};
use dispatch::config::Config;
use dispatch::engine::Engine;
use dispatch::error::Error;
use dispatch::places::PlaceRegistry;
use dispatch::server::serve;
use dispatch::simulation::Executor;
use dispatch::store::MemoryStore;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dispatch", about = "Nearest-driver ride dispatch service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API over the configured record files (default)
    Serve,
    /// Run a booking load test against in-memory stores
    Simulate {
        /// Number of booking requests to fire
        #[arg(default_value_t = 100)]
        bookings: usize,
        /// Drivers seeded before the run
        #[arg(long, default_value_t = 20)]
        drivers: usize,
        /// Riders seeded before the run
        #[arg(long, default_value_t = 10)]
        riders: usize,
        /// Concurrent booking workers
        #[arg(long, default_value_t = 8)]
        workers: usize,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run(cli.command.unwrap_or(Command::Serve)).await {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<(), Error> {
    let config = Config::from_env()?;

    match command {
        Command::Serve => {
            let engine = Engine::new(&config).await?;
            serve(Arc::new(engine), config.bind_addr).await
        }
        Command::Simulate {
            bookings,
            drivers,
            riders,
            workers,
        } => {
            // never touches the configured record files
            let engine = Arc::new(Engine::with_stores(
                PlaceRegistry::default(),
                Arc::new(MemoryStore::new()),
                Arc::new(MemoryStore::new()),
                Arc::new(MemoryStore::new()),
                &config,
            ));

            let mut executor = Executor::new(engine, workers);
            executor.seed_drivers(drivers).await?;
            executor.seed_riders(riders.max(1)).await?;
            let report = executor.run(bookings).await?;

            let report = serde_json::to_string_pretty(&report).map_err(|_| Error::unexpected_error())?;
            println!("{}", report);

            Ok(())
        }
    }
}
