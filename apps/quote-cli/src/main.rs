//! # ToxQuote CLI
//!
//! Prices a quotation request against a catalog and prints the breakdown.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          quote-cli                                      │
//! │                                                                         │
//! │  args/env ──► catalog (file or sample) ──► pricing config ──► request  │
//! │                                                                 │       │
//! │                                          Quotation::summary() ◄─┘       │
//! │                                                 │                       │
//! │                                     text report / --json                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod args;
mod render;
mod request;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use toxquote_catalog::{sample_catalog, CatalogLoader, ConfigLoader};

use crate::args::{Command, RunArgs, USAGE};
use crate::request::QuotationRequest;

fn main() -> Result<()> {
    // Logs go to stderr so --json output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    match Command::parse(std::env::args().skip(1), |key| std::env::var(key).ok())? {
        Command::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        Command::Run(args) => run(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let catalog = match &args.catalog {
        Some(path) => CatalogLoader::from_path(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => {
            info!("No catalog given, using the built-in sample catalog");
            sample_catalog()?
        }
    };

    let config = ConfigLoader::load(args.config.clone()).context("Failed to load pricing config")?;
    info!(
        validation_unit_charge = config.surcharge.validation_unit_charge.won(),
        analysis_cycle_charge = config.surcharge.analysis_cycle_charge.won(),
        "Configuration loaded"
    );

    let request = QuotationRequest::from_path(&args.request)?;
    let quotation = request.build(&catalog)?;
    let summary = quotation.summary(&catalog, &config, &config.formulation);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render::render_text(&summary).context("Failed to render report")?);
    }

    Ok(())
}
