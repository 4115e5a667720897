// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Settings error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Unknown settings group: {0}")]
    UnknownGroup(String),

    #[error("Setting already registered: {0}")]
    DuplicateSetting(String),

    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    #[error("Configuration file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unable to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type SettingsResult<T> = Result<T, SettingsError>;
