//! Swag CLI - Command line storefront for the promotional products catalog.
//!
//! Commands:
//! - `swag catalog` - Browse and search the catalog
//! - `swag price` - Price a quantity against the volume tiers
//! - `swag cart` - Show and edit the cart
//! - `swag quote` - Compose a quote request for one product
//! - `swag checkout` - Compose the order mail for the cart
//! - `swag config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CartArgs, CatalogArgs, CheckoutArgs, ConfigArgs, PriceArgs, QuoteArgs};

/// Swag CLI - Browse the catalog, price volume orders and build quotes
#[derive(Parser)]
#[command(name = "swag")]
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
    /// Browse and search the catalog
    Catalog(CatalogArgs),

    /// Price a quantity of a product
    Price(PriceArgs),

    /// Show and edit the cart
    Cart(CartArgs),

    /// Compose a quote request for a product
    Quote(QuoteArgs),

    /// Compose the order mail for the cart
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Price(args) => commands::price::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Quote(args) => commands::quote::run(args, &ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
