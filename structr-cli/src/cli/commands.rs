// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command line definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "structr")]
#[command(version)]
#[command(about = "Structr configuration console and expression evaluation", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<log::Level>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print version information
    Version,

    /// Serve the configuration console at /structr/config
    Serve {
        /// Instance directory holding structr.conf and the database
        #[arg(short = 'b', long, default_value = ".")]
        base_path: PathBuf,

        /// Port to listen on; defaults to application.http.port
        #[arg(short, long)]
        port: Option<u16>,

        /// JSON schema file with additional entity types
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Start all registered services before serving
        #[arg(long)]
        start_services: bool,
    },

    /// Evaluate a ${...} expression
    Eval {
        /// Expression, e.g. "${enum_info('Task', 'status')}"
        expression: String,

        #[arg(short = 'b', long, default_value = ".")]
        base_path: PathBuf,

        #[arg(short, long)]
        schema: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// List the symbols of an enum property
    EnumInfo {
        /// Entity type name
        type_name: String,

        /// Property name
        property: String,

        #[arg(short = 'b', long, default_value = ".")]
        base_path: PathBuf,

        #[arg(short, long)]
        schema: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
