// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result formatting for CLI output

use super::commands::OutputFormat;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use structr::functions::EnumInfo;
use structr::Value;

pub struct ResultFormatter;

impl ResultFormatter {
    /// Format an expression result
    pub fn format_value(value: &Value, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::to_json(value),
            OutputFormat::Table => match value {
                Value::List(items) => Self::list_table("Value", items.iter().map(plain)),
                Value::Null => format!("{}\n", "null".yellow()),
                other => format!("{}\n", plain(other)),
            },
        }
    }

    /// Format an enum lookup; diagnostics are highlighted in table mode
    pub fn format_enum_info(info: &EnumInfo, format: OutputFormat) -> String {
        match (info.symbols(), format) {
            (_, OutputFormat::Json) => Self::to_json(&Value::from(info.clone())),
            (Some(symbols), OutputFormat::Table) => {
                Self::list_table("Symbol", symbols.iter().cloned())
            }
            (None, OutputFormat::Table) => format!("{}\n", info.to_string().yellow()),
        }
    }

    fn list_table(header: &str, rows: impl Iterator<Item = String>) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new("#").fg(Color::Green),
            Cell::new(header).fg(Color::Green),
        ]);

        let mut count = 0;
        for (i, row) in rows.enumerate() {
            table.add_row(vec![(i + 1).to_string(), row]);
            count += 1;
        }

        if count == 0 {
            return format!("{}\n", "No results found".yellow());
        }

        let mut output = table.to_string();
        output.push('\n');
        output.push_str(&format!("{} row(s)\n", count));
        output
    }

    fn to_json(value: &Value) -> String {
        let json = serde_json::Value::from(value.clone());
        match serde_json::to_string_pretty(&json) {
            Ok(text) => format!("{}\n", text),
            Err(e) => format!("{}\n", format!("JSON serialization failed: {}", e).red()),
        }
    }
}

fn plain(value: &Value) -> String {
    value.to_plain_string().unwrap_or_else(|| value.to_string())
}
