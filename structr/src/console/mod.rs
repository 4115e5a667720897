// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Configuration console: settings editing, service control and login for
//! a running instance.

pub mod handler;
pub mod html;
pub mod session_store;

pub use handler::{ConfigConsole, ConsoleRequest, ConsoleResponse, CONFIG_URL};
pub use session_store::{InMemorySessionStore, SessionStore};
