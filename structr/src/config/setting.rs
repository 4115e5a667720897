// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Individual settings and settings groups

use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed value of a setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingValue {
    String(String),
    Integer(i64),
    Boolean(bool),
}

impl SettingValue {
    /// Infer the type of a raw value: boolean, then integer, then string
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed {
            "true" => SettingValue::Boolean(true),
            "false" => SettingValue::Boolean(false),
            _ => trimmed
                .parse::<i64>()
                .map(SettingValue::Integer)
                .unwrap_or_else(|_| SettingValue::String(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            SettingValue::String(_) => "string",
            SettingValue::Integer(_) => "integer",
            SettingValue::Boolean(_) => "boolean",
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SettingValue::String(s) => write!(f, "{}", s),
            SettingValue::Integer(i) => write!(f, "{}", i),
            SettingValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::String(s.to_string())
    }
}

impl From<i64> for SettingValue {
    fn from(i: i64) -> Self {
        SettingValue::Integer(i)
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        SettingValue::Boolean(b)
    }
}

/// A configuration entry with a typed default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub group: String,
    value: SettingValue,
    default_value: SettingValue,
    /// Created at runtime from an unknown key rather than builtin
    dynamic: bool,
}

impl Setting {
    pub fn new(
        group: impl Into<String>,
        key: impl Into<String>,
        default_value: impl Into<SettingValue>,
    ) -> Self {
        let default_value = default_value.into();
        Self {
            key: key.into(),
            group: group.into(),
            value: default_value.clone(),
            default_value,
            dynamic: false,
        }
    }

    /// Runtime-created setting whose type is inferred from `raw`
    pub fn dynamic(group: impl Into<String>, key: impl Into<String>, raw: &str) -> Self {
        Self::dynamic_value(group, key, SettingValue::infer(raw))
    }

    /// Runtime-created setting holding an already typed value
    pub fn dynamic_value(
        group: impl Into<String>,
        key: impl Into<String>,
        value: SettingValue,
    ) -> Self {
        let mut setting = Self::new(group, key, value);
        setting.dynamic = true;
        setting
    }

    pub fn value(&self) -> &SettingValue {
        &self.value
    }

    pub fn default_value(&self) -> &SettingValue {
        &self.default_value
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    pub fn is_modified(&self) -> bool {
        self.value != self.default_value
    }

    pub fn set_value(&mut self, value: SettingValue) {
        self.value = value;
    }

    pub fn reset(&mut self) {
        self.value = self.default_value.clone();
    }

    /// Parse `raw` according to the type of the default value
    ///
    /// Returns false and keeps the current value when `raw` does not parse.
    pub fn from_string(&mut self, raw: &str) -> bool {
        let parsed = match &self.default_value {
            SettingValue::String(_) => Some(SettingValue::String(raw.to_string())),
            SettingValue::Integer(_) => raw.trim().parse().ok().map(SettingValue::Integer),
            SettingValue::Boolean(_) => raw.trim().parse().ok().map(SettingValue::Boolean),
        };

        match parsed {
            Some(value) => {
                self.value = value;
                true
            }
            None => {
                log::warn!(
                    "Cannot parse '{}' as {} for setting {}, keeping {}",
                    raw,
                    self.default_value.type_name(),
                    self.key,
                    self.value
                );
                false
            }
        }
    }
}

/// Named group of settings, rendered as one console tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsGroup {
    pub key: String,
    pub name: String,
    /// Setting keys in registration order
    pub settings: Vec<String>,
}

impl SettingsGroup {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            settings: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer() {
        assert_eq!(SettingValue::infer("true"), SettingValue::Boolean(true));
        assert_eq!(SettingValue::infer("42"), SettingValue::Integer(42));
        assert_eq!(SettingValue::infer("-7"), SettingValue::Integer(-7));
        assert_eq!(SettingValue::infer("hello"), SettingValue::from("hello"));
        assert_eq!(SettingValue::infer("True"), SettingValue::from("True"));
    }

    #[test]
    fn test_from_string_follows_default_type() {
        let mut port = Setting::new("server", "application.http.port", 8082i64);
        assert!(port.from_string("9000"));
        assert_eq!(port.value(), &SettingValue::Integer(9000));
        assert!(port.is_modified());

        assert!(!port.from_string("not a number"));
        assert_eq!(port.value(), &SettingValue::Integer(9000));

        port.reset();
        assert!(!port.is_modified());
    }

    #[test]
    fn test_dynamic_setting() {
        let setting = Setting::dynamic("misc", "feature.enabled", "false");
        assert!(setting.is_dynamic());
        assert_eq!(setting.value(), &SettingValue::Boolean(false));
    }
}
