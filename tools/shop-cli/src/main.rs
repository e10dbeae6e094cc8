//! Shop CLI - Browse the catalog and manage a persisted shopping cart.
//!
//! Commands:
//! - `shop catalog` - List and inspect products
//! - `shop cart` - Show and change the cart
//! - `shop checkout` - Place the order
//! - `shop config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

use commands::{CartArgs, CatalogArgs, CheckoutArgs, ConfigArgs};

/// Shop CLI - Browse products and manage your cart
#[derive(Parser)]
#[command(name = "shop")]
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
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog(CatalogArgs),

    /// Show and change the cart
    Cart(CartArgs),

    /// Place the order for the current cart
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Logging starts at the default level and picks up the configured one
    // once the config file is read.
    let log_filter = init_tracing(cli.verbose, DEFAULT_LOG_LEVEL);

    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = log_filter.reload(env_filter(cli.verbose, &ctx.config.logging.level)) {
        tracing::warn!(error = %e, "failed to apply configured log level");
    }

    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Level used until the config file is read.
const DEFAULT_LOG_LEVEL: &str = "warn";

type LogFilterHandle = reload::Handle<EnvFilter, Registry>;

fn init_tracing(verbose: bool, level: &str) -> LogFilterHandle {
    let (filter, handle) = reload::Layer::new(env_filter(verbose, level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
    handle
}

/// `RUST_LOG` wins, then `--verbose`, then the configured level.
fn env_filter(verbose: bool, level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_directive(verbose, level)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

fn fallback_directive(verbose: bool, level: &str) -> &str {
    if verbose {
        "debug"
    } else {
        level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_overrides_configured_level() {
        assert_eq!(fallback_directive(true, "warn"), "debug");
        assert_eq!(fallback_directive(false, "shop_commerce=debug"), "shop_commerce=debug");
    }

    #[test]
    fn test_filter_reloads_after_config() {
        let (layer, handle): (_, LogFilterHandle) =
            reload::Layer::new(EnvFilter::new(DEFAULT_LOG_LEVEL));

        handle.reload(EnvFilter::new("debug")).unwrap();
        assert_eq!(handle.with_current(|f| f.to_string()).unwrap(), "debug");
        drop(layer);
    }
}
