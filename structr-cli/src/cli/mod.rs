// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for Structr
//!
//! Serves the configuration console over HTTP and evaluates scripting
//! expressions against an instance's schema.

pub mod commands;
pub mod handlers;
pub mod output;
pub mod server;

pub use commands::{Cli, Commands};
pub use handlers::{handle_enum_info, handle_eval, handle_serve};
