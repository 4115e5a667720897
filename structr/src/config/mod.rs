// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Runtime configuration: settings, settings groups and the structr.conf file

pub mod error;
pub mod setting;
pub mod settings;

pub use error::{SettingsError, SettingsResult};
pub use setting::{Setting, SettingValue, SettingsGroup};
pub use settings::Settings;

/// Name of the configuration file inside the base directory
pub const CONFIG_FILE_NAME: &str = "structr.conf";
