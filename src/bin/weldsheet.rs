//! weldsheet CLI Binary
//!
//! Command-line interface for cutlist drawing generation.

use clap::Parser;
use std::process;
use tracing::{error, info};
use weldsheet::cli::{Cli, RunContext};
use weldsheet::config::ConfigLoader;
use weldsheet::logging::{init_logging, LoggingConfig};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("weldsheet starting");

    let context = match RunContext::new(cli.workspace.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing session: {}", e);
            eprintln!("{}", weldsheet::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", weldsheet::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    if !cli.verbose {
        return LoggingConfig {
            level: "off".to_string(),
            ..LoggingConfig::default()
        };
    }

    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        ConfigLoader::load(&cli.workspace)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    };

    // CLI arguments win.
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    } else if config.file.is_relative() {
        config.file = cli.workspace.join(&config.file);
    }

    config
}
