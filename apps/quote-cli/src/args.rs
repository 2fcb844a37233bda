//! Command line and environment settings.

use std::path::PathBuf;

use anyhow::{bail, Result};

/// Catalog file used when `--catalog` is absent.
pub const ENV_CATALOG: &str = "TOXQUOTE_CATALOG";

/// Pricing config file used when `--config` is absent.
pub const ENV_CONFIG: &str = "TOXQUOTE_CONFIG";

pub const USAGE: &str = "\
ToxQuote quotation calculator

Usage: quote-cli [OPTIONS] <REQUEST.json>

Options:
  -c, --catalog <PATH>   Catalog JSON (default: $TOXQUOTE_CATALOG, else built-in sample)
      --config <PATH>    Pricing config TOML (default: $TOXQUOTE_CONFIG, else platform config dir)
      --json             Print the summary as JSON
  -h, --help             Show this help message

Logging is controlled with RUST_LOG (default: warn).";

/// Parsed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Run(RunArgs),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    pub request: PathBuf,
    pub catalog: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
}

impl Command {
    /// Parses arguments (without the program name). Flags win over the
    /// environment.
    pub fn parse<I, F>(args: I, env: F) -> Result<Command>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let args: Vec<String> = args.into_iter().collect();

        let mut request = None;
        let mut catalog = env(ENV_CATALOG).map(PathBuf::from);
        let mut config = env(ENV_CONFIG).map(PathBuf::from);
        let mut json = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--catalog" | "-c" => {
                    i += 1;
                    catalog = Some(PathBuf::from(value_of(&args, i, "--catalog")?));
                }
                "--config" => {
                    i += 1;
                    config = Some(PathBuf::from(value_of(&args, i, "--config")?));
                }
                "--json" => json = true,
                "--help" | "-h" => return Ok(Command::Help),
                flag if flag.starts_with('-') => bail!("Unknown option: {}", flag),
                path => {
                    if request.is_some() {
                        bail!("Only one request file may be given");
                    }
                    request = Some(PathBuf::from(path));
                }
            }
            i += 1;
        }

        let Some(request) = request else {
            bail!("Missing request file\n\n{}", USAGE);
        };

        Ok(Command::Run(RunArgs {
            request,
            catalog,
            config,
            json,
        }))
    }
}

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    match args.get(i) {
        Some(value) => Ok(value.as_str()),
        None => bail!("{} needs a value", flag),
    }
}
