// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Structr CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // -v wins over --log-level; RUST_LOG still applies on top of the default
    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    match cli.command {
        Commands::Version => {
            println!("{} {}", "Structr".bold().green(), structr::VERSION);
            Ok(())
        }

        Commands::Serve {
            base_path,
            port,
            schema,
            start_services,
        } => cli::handle_serve(base_path, port, schema, start_services),

        Commands::Eval {
            expression,
            base_path,
            schema,
            format,
        } => cli::handle_eval(base_path, schema, expression, format),

        Commands::EnumInfo {
            type_name,
            property,
            base_path,
            schema,
            format,
        } => cli::handle_enum_info(base_path, schema, type_name, property, format),
    }
}
