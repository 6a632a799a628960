//! Promo Quote CLI - Quoting and pricing catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # Quote 50 t-shirts with a front print at a catalog price of 20 €
//! pq-cli quote camisetas-personalizadas --price "20,00 €" --qty S=20 --qty M=30 --zone frontal
//!
//! # Show methods, zones and minimums for a category
//! pq-cli options gorras-personalizadas
//!
//! # Check a catalog document before deploying it
//! pq-cli catalog validate pricing.yaml
//!
//! # Print the active catalog as YAML
//! pq-cli catalog dump > pricing.yaml
//! ```
//!
//! # Commands
//!
//! - `quote` - Price a selection for a category
//! - `options` - Resolved pricing options for a category
//! - `catalog validate` - Validate a YAML catalog document
//! - `catalog dump` - Print the active catalog as YAML
//!
//! # Environment Variables
//!
//! - `PRICING_CATALOG_PATH` - YAML pricing catalog (default: built-in)
//! - `QUOTE_TAX_RATE` - Tax rate applied to quote totals (default: 0.21)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use promo_quote_core::pricing::PrintingMethodId;
use promo_quote_storefront::config::parse_tax_rate;
use promo_quote_storefront::state::load_catalog;
use rust_decimal::Decimal;

mod commands;

use commands::quote::{QuoteArgs, SizeQuantity};

#[derive(Parser)]
#[command(name = "pq-cli")]
#[command(author, version, about = "Promo Quote CLI tools")]
struct Cli {
    /// YAML pricing catalog replacing the built-in one
    #[arg(long, global = true, env = "PRICING_CATALOG_PATH")]
    catalog: Option<PathBuf>,

    /// Tax rate as a decimal fraction
    #[arg(
        long,
        global = true,
        env = "QUOTE_TAX_RATE",
        default_value = "0.21",
        value_parser = parse_tax_rate
    )]
    tax_rate: Decimal,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a selection for a category
    Quote {
        /// Category id (e.g. `camisetas-personalizadas`)
        category: String,

        /// Catalog price, as a number or a currency string ("1.234,56 €")
        #[arg(short, long)]
        price: String,

        /// Units, either `N` or `SIZE=N`; repeat for several sizes
        #[arg(short, long = "qty", required = true)]
        quantities: Vec<SizeQuantity>,

        /// Customization zone; repeat for several zones
        #[arg(short, long = "zone")]
        zones: Vec<String>,

        /// Printing method (`DTF`, `SERIGRAFIA_1_COLOR`, ...); first active method by default
        #[arg(short, long)]
        method: Option<PrintingMethodId>,

        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the resolved pricing options for a category
    Options {
        /// Category id
        category: String,

        /// Print the options as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect pricing catalog documents
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Validate a YAML catalog document
    Validate {
        /// Path to the document
        file: PathBuf,
    },
    /// Print the active catalog as YAML
    Dump,
}

fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so command output stays pipeable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Validate { file } => commands::catalog::validate(&file, &mut out)?,
            CatalogAction::Dump => {
                let catalog = load_catalog(cli.catalog.as_deref())?;
                commands::catalog::dump(&catalog, &mut out)?;
            }
        },
        Commands::Options { category, json } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            commands::quote::options(&catalog, &category, json, &mut out)?;
        }
        Commands::Quote {
            category,
            price,
            quantities,
            zones,
            method,
            json,
        } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let args = QuoteArgs {
                category,
                price,
                quantities,
                zones,
                method,
                tax_rate: cli.tax_rate,
                json,
            };
            commands::quote::quote(&catalog, &args, &mut out)?;
        }
    }
    Ok(())
}
