// Copyright (c) 2025 Lanai Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Lanai - command line front end for Lanai Trie.
//!
//! Loads an entry file into a trie and answers one prefix query against it.
//! Results go to stdout, logs to stderr.

use clap::{Parser, Subcommand};
use lanai_trie_lib::config::{self, LanaiConfig, LogConfig, DEFAULT_CONFIG_PATH, ENV_PREFIX};
use lanai_trie_lib::error::{
    get_error_reporting, set_error_reporter, ErrorContext, LanaiError, LanaiResult,
    TracingErrorReporter,
};
use lanai_trie_lib::loader::load_entries;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for Lanai.
#[derive(Parser, Debug)]
#[clap(name = "lanai", version, author, about)]
struct Args {
    /// Path to configuration file (defaults to config/lanai.toml if present)
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// List every key starting with a prefix
    Complete {
        /// Entry file (.json, .toml or key=value lines)
        entries: PathBuf,
        /// Prefix to complete
        prefix: String,
    },

    /// Show the longest stored path and key matching a query
    BestMatch {
        /// Entry file (.json, .toml or key=value lines)
        entries: PathBuf,
        /// Query string
        query: String,
    },

    /// List the values of all keys on the path of a query
    PathValues {
        /// Entry file (.json, .toml or key=value lines)
        entries: PathBuf,
        /// Query string
        query: String,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system from the log section.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(log: &LogConfig) -> LanaiResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| LanaiError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Print `lines` capped by the query section, noting what was cut.
fn print_capped<T: std::fmt::Display>(config: &LanaiConfig, lines: Vec<T>) {
    let (shown, dropped) = config.query.cap(lines);
    for line in shown {
        println!("{line}");
    }
    if dropped > 0 {
        eprintln!("... {dropped} more (raise query.max_results to see them)");
    }
}

fn run(command: Command, config: &LanaiConfig) -> LanaiResult<()> {
    match command {
        Command::Complete { entries, prefix } => {
            let map = load_entries(&entries, &config.loader)?;
            print_capped(config, map.completions(&prefix));
        }
        Command::BestMatch { entries, query } => {
            let map = load_entries(&entries, &config.loader)?;
            let path = map.best_matching_path(&query);
            let value = map.value_for_best_matching_key(&query);
            println!("path:  {}", path.as_deref().unwrap_or("(none)"));
            println!("value: {}", value.as_deref().unwrap_or("(none)"));
        }
        Command::PathValues { entries, query } => {
            let map = load_entries(&entries, &config.loader)?;
            print_capped(config, map.values_on_path(&query));
        }
        Command::Validate => {
            println!("Configuration is valid");
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let default_config = LanaiConfig::default();

            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| LanaiError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
        }
    }
    Ok(())
}

/// Main entry point for the application.
fn main() {
    let args = <Args as clap::Parser>::parse();

    let config = match config::load_config(
        args.config.as_deref(),
        Path::new(DEFAULT_CONFIG_PATH),
        ENV_PREFIX,
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.log) {
        eprintln!("{e}");
        process::exit(1);
    }
    set_error_reporter(Arc::new(TracingErrorReporter));
    config::init_global_config(config.clone());

    if let Err(e) = run(args.command, &config) {
        get_error_reporting().report(ErrorContext::new(e, "lanai"));
        process::exit(1);
    }
}
