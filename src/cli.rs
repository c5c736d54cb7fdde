//! Command-line interface for font-catalog.
//!
//! Thin collaborator over [`Catalog`]: every subcommand goes through the same
//! three operations an application would use (resolve, search, availability).

use crate::activation::StylesheetActivator;
use crate::catalog::Catalog;
use crate::font::FontEntry;
use crate::logging;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use font_catalog_config::{Config, LogLevel};
use std::io::{self, Write};
use std::path::PathBuf;

/// font-catalog - look up fonts from the Google Fonts list and web-safe built-ins
#[derive(Parser, Debug)]
#[command(name = "font-catalog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API key for the remote font list (overrides config and FONT_CATALOG_API_KEY)
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Config file to use instead of ~/.config/font-catalog/config.yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a font's catalog entry as JSON
    Resolve {
        /// Family name (case and surrounding whitespace are ignored)
        name: String,
    },

    /// List fonts whose family starts with a prefix, alphabetically
    Search {
        /// Family prefix; omit to list the whole catalog
        #[arg(default_value = "")]
        prefix: String,

        /// Stop after this many results
        #[arg(short, long, value_name = "N")]
        limit: Option<usize>,
    },

    /// Report whether a font can be used for rendering
    Available {
        /// Family name
        name: String,

        /// Only check catalog membership; do not request the font stylesheet
        #[arg(long)]
        no_activate: bool,
    },
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::parse(value).ok_or_else(|| format!("unknown log level '{value}'"))
}

/// Parse arguments, run the subcommand, and return the process exit code.
pub fn process_cli() -> Result<i32> {
    let cli = Cli::parse();

    logging::init(logging::requested_level(cli.log_level).unwrap_or_default());

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from(path)?;
            config.apply_env_overrides();
            config
        }
        None => Config::load()?,
    };
    logging::apply_config_level(cli.log_level, config.log_level);

    if let Some(key) = &cli.api_key {
        config.api_key = Some(key.clone());
    }

    let catalog = Catalog::from_config(&config).context("Failed to set up font catalog")?;
    let mut stdout = io::stdout().lock();
    run(&cli.command, &catalog, &config, &mut stdout)
}

/// Run one subcommand against `catalog`, writing results to `out`.
pub fn run(
    command: &Commands,
    catalog: &Catalog,
    config: &Config,
    out: &mut dyn Write,
) -> Result<i32> {
    match command {
        Commands::Resolve { name } => match catalog.resolve_by_name(name)? {
            Some(entry) => {
                writeln!(out, "{}", serde_json::to_string_pretty(entry.as_ref())?)?;
                Ok(0)
            }
            None => {
                eprintln!("font-catalog: '{}' not found", name.trim());
                Ok(1)
            }
        },
        Commands::Search { prefix, limit } => {
            let matches = catalog.search_by_prefix(prefix)?;
            for entry in matches.take(limit.unwrap_or(usize::MAX)) {
                writeln!(out, "{}", describe(&entry))?;
            }
            Ok(0)
        }
        Commands::Available { name, no_activate } => {
            let available = if *no_activate {
                catalog.resolve_by_name(name)?.is_some()
            } else {
                let activator = StylesheetActivator::from_config(config)?;
                catalog.is_available(name, &activator)?
            };
            writeln!(out, "{available}")?;
            Ok(if available { 0 } else { 1 })
        }
    }
}

fn describe(entry: &FontEntry) -> String {
    if entry.category.is_empty() {
        entry.family.clone()
    } else {
        format!("{}\t{}", entry.family, entry.category)
    }
}
