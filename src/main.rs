use anyhow::Result;
use clap::{Parser, Subcommand};

/// larder - Household food management API
#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Pantry, recipes, meal plans and shopping lists", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Insert the default units and food categories
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = larder::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    larder::observability::init_observability(
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => larder::cli::serve(config, host, port).await,
        Commands::Migrate => larder::cli::migrate(config).await,
        Commands::Reset => larder::cli::reset(config).await,
        Commands::Seed => larder::cli::seed(config).await,
    }
}
