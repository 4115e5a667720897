// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers

use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use super::commands::OutputFormat;
use super::output::ResultFormatter;
use super::server;
use structr::{SecurityContext, StructrInstance};

/// Handle the serve command
///
/// Opens the instance at `base_path` and serves the configuration console
/// until interrupted. Services are shut down when the instance drops.
pub fn handle_serve(
    base_path: PathBuf,
    port: Option<u16>,
    schema: Option<PathBuf>,
    start_services: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let instance = Arc::new(StructrInstance::open(&base_path, schema)?);

    if start_services {
        instance.start_services();
    }

    let addr = server::listen_address(&instance, port)?;

    if !instance.services().is_configured() {
        println!(
            "{}",
            "No structr.conf found, the console is open without login until settings are saved."
                .yellow()
        );
    }
    println!(
        "{}",
        format!("Configuration console at http://{}/structr/config", addr)
            .bold()
            .green()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(instance, addr))
}

/// Handle the eval command
pub fn handle_eval(
    base_path: PathBuf,
    schema: Option<PathBuf>,
    expression: String,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let instance = StructrInstance::open(&base_path, schema)?;

    match instance.evaluate(SecurityContext::super_user(), &expression) {
        Ok(value) => {
            print!("{}", ResultFormatter::format_value(&value, format));
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            Err(e.into())
        }
    }
}

/// Handle the enum-info command
pub fn handle_enum_info(
    base_path: PathBuf,
    schema: Option<PathBuf>,
    type_name: String,
    property: String,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let instance = StructrInstance::open(&base_path, schema)?;
    let info = instance.enum_info(&type_name, &property);
    print!("{}", ResultFormatter::format_enum_info(&info, format));
    Ok(())
}
