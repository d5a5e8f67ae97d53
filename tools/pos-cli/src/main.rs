//! POS CLI - Point of sale and inventory management from the terminal.
//!
//! Commands:
//! - `pos products` - List and maintain products
//! - `pos categories` - List and maintain categories
//! - `pos locations` - List and maintain locations
//! - `pos movements` - List and record stock movements
//! - `pos stock` - Show stock per location
//! - `pos sell` - Ring up a sale and submit the order
//! - `pos config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    CategoriesArgs, ConfigArgs, LocationsArgs, MovementsArgs, ProductsArgs, SellArgs, StockArgs,
};

/// POS CLI - Sell and manage inventory
#[derive(Parser)]
#[command(name = "pos")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List, create, update or delete products
    Products(ProductsArgs),

    /// List, create, update or delete categories
    Categories(CategoriesArgs),

    /// List, create, update or delete locations
    Locations(LocationsArgs),

    /// List or record stock movements
    Movements(MovementsArgs),

    /// Show available stock
    Stock(StockArgs),

    /// Ring up a sale and submit it as one order
    Sell(SellArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Categories(args) => commands::categories::run(args, &ctx).await,
        Commands::Locations(args) => commands::locations::run(args, &ctx).await,
        Commands::Movements(args) => commands::movements::run(args, &ctx).await,
        Commands::Stock(args) => commands::stock::run(args, &ctx).await,
        Commands::Sell(args) => commands::sell::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins; otherwise `--verbose` turns on debug for our crates.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "pos_cli=debug,pos_client=debug,pos_core=debug"
    } else {
        "warn"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
