// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Settings registry
//!
//! Holds every settings group and setting of a running instance and
//! persists them to a flat TOML table with quoted keys, e.g.
//! `"application.http.port" = 9090`. Only settings that differ from their
//! default and all dynamic settings are written.

use super::error::{SettingsError, SettingsResult};
use super::setting::{Setting, SettingValue, SettingsGroup};
use chrono::Utc;
use log::{debug, info, warn};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;

pub const GENERAL_GROUP: &str = "general";
pub const SERVER_GROUP: &str = "server";
pub const DATABASE_GROUP: &str = "database";
pub const SUPERUSER_GROUP: &str = "superuser";
pub const MISC_GROUP: &str = "misc";

pub const APPLICATION_TITLE: &str = "application.title";
pub const HTTP_PORT: &str = "application.http.port";
pub const HOST: &str = "application.host";
pub const DATABASE_DRIVER: &str = "database.driver";
pub const DATABASE_PATH: &str = "database.path";
pub const SUPERUSER_USERNAME: &str = "superuser.username";
pub const SUPERUSER_PASSWORD: &str = "superuser.password";

/// Suffix of the form field naming the group of a new setting
pub const GROUP_FIELD_SUFFIX: &str = "._settings_group";

#[derive(Default)]
struct SettingsInner {
    groups: Vec<SettingsGroup>,
    settings: HashMap<String, Setting>,
}

/// Thread-safe registry of settings groups and settings
pub struct Settings {
    inner: RwLock<SettingsInner>,
}

impl Settings {
    /// Registry with the builtin groups and settings
    pub fn new() -> Self {
        let settings = Self::empty();

        for (key, name) in [
            (GENERAL_GROUP, "General Settings"),
            (SERVER_GROUP, "Server Settings"),
            (DATABASE_GROUP, "Database Configuration"),
            (SUPERUSER_GROUP, "Superuser"),
            (MISC_GROUP, "Miscellaneous"),
        ] {
            settings.add_group(SettingsGroup::new(key, name));
        }

        let builtins = [
            Setting::new(GENERAL_GROUP, APPLICATION_TITLE, "Structr"),
            Setting::new(SERVER_GROUP, HTTP_PORT, 8082i64),
            Setting::new(SERVER_GROUP, HOST, "0.0.0.0"),
            Setting::new(DATABASE_GROUP, DATABASE_DRIVER, "sled"),
            Setting::new(DATABASE_GROUP, DATABASE_PATH, "db"),
            Setting::new(SUPERUSER_GROUP, SUPERUSER_USERNAME, "superadmin"),
            Setting::new(SUPERUSER_GROUP, SUPERUSER_PASSWORD, ""),
        ];
        for setting in builtins {
            if let Err(e) = settings.register(setting) {
                log::error!("Failed to register builtin setting: {}", e);
            }
        }

        settings
    }

    /// Registry without any group or setting
    pub fn empty() -> Self {
        Self {
            inner: RwLock::new(SettingsInner::default()),
        }
    }

    /// Add a group; an existing group with the same key is kept
    pub fn add_group(&self, group: SettingsGroup) {
        let mut inner = self.inner.write();
        if !inner.groups.iter().any(|g| g.key == group.key) {
            inner.groups.push(group);
        }
    }

    pub fn get_group(&self, key: &str) -> Option<SettingsGroup> {
        self.inner
            .read()
            .groups
            .iter()
            .find(|g| g.key == key)
            .cloned()
    }

    /// Groups in registration order
    pub fn groups(&self) -> Vec<SettingsGroup> {
        self.inner.read().groups.clone()
    }

    /// Settings of one group in registration order
    pub fn settings_in_group(&self, group_key: &str) -> Vec<Setting> {
        let inner = self.inner.read();
        inner
            .groups
            .iter()
            .find(|g| g.key == group_key)
            .map(|group| {
                group
                    .settings
                    .iter()
                    .filter_map(|key| inner.settings.get(key).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn get_setting(&self, key: &str) -> Option<Setting> {
        self.inner.read().settings.get(key).cloned()
    }

    pub fn get_value(&self, key: &str) -> Option<SettingValue> {
        self.inner
            .read()
            .settings
            .get(key)
            .map(|s| s.value().clone())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get_value(key).map(|v| v.to_string())
    }

    pub fn get_integer(&self, key: &str) -> Option<i64> {
        self.get_value(key).and_then(|v| v.as_integer())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get_value(key).and_then(|v| v.as_bool())
    }

    /// Register a setting in its group
    pub fn register(&self, setting: Setting) -> SettingsResult<()> {
        let mut inner = self.inner.write();

        if inner.settings.contains_key(&setting.key) {
            return Err(SettingsError::DuplicateSetting(setting.key));
        }

        let group = inner
            .groups
            .iter_mut()
            .find(|g| g.key == setting.group)
            .ok_or_else(|| SettingsError::UnknownGroup(setting.group.clone()))?;
        group.settings.push(setting.key.clone());

        debug!("Registered setting {} in group {}", setting.key, setting.group);
        inner.settings.insert(setting.key.clone(), setting);
        Ok(())
    }

    /// Remove a setting; returns whether it existed
    pub fn unregister(&self, key: &str) -> bool {
        let mut inner = self.inner.write();
        match inner.settings.remove(key) {
            Some(setting) => {
                if let Some(group) = inner.groups.iter_mut().find(|g| g.key == setting.group) {
                    group.settings.retain(|k| k != key);
                }
                true
            }
            None => false,
        }
    }

    /// Parse and store a raw value for an existing setting
    pub fn set_from_string(&self, key: &str, raw: &str) -> SettingsResult<bool> {
        let mut inner = self.inner.write();
        let setting = inner
            .settings
            .get_mut(key)
            .ok_or_else(|| SettingsError::UnknownSetting(key.to_string()))?;
        Ok(setting.from_string(raw))
    }

    pub fn set_value(&self, key: &str, value: SettingValue) -> SettingsResult<()> {
        let mut inner = self.inner.write();
        let setting = inner
            .settings
            .get_mut(key)
            .ok_or_else(|| SettingsError::UnknownSetting(key.to_string()))?;
        setting.set_value(value);
        Ok(())
    }

    /// Remove a dynamic setting or restore a builtin one to its default
    ///
    /// Returns false when the key is unknown.
    pub fn reset(&self, key: &str) -> bool {
        let dynamic = match self.inner.read().settings.get(key) {
            Some(setting) => setting.is_dynamic(),
            None => return false,
        };

        if dynamic {
            return self.unregister(key);
        }

        if let Some(setting) = self.inner.write().settings.get_mut(key) {
            setting.reset();
        }
        true
    }

    /// Create and register a dynamic setting for an unknown key
    ///
    /// The setting lands in `group_key` if that group exists, else in `misc`.
    pub fn create_setting_for_value(
        &self,
        group_key: Option<&str>,
        key: &str,
        raw: &str,
    ) -> SettingsResult<Setting> {
        self.create_dynamic(group_key, key, SettingValue::infer(raw))
    }

    fn create_dynamic(
        &self,
        group_key: Option<&str>,
        key: &str,
        value: SettingValue,
    ) -> SettingsResult<Setting> {
        let group = group_key
            .filter(|g| self.get_group(g).is_some())
            .unwrap_or(MISC_GROUP);

        if self.get_group(group).is_none() {
            self.add_group(SettingsGroup::new(MISC_GROUP, "Miscellaneous"));
        }

        let setting = Setting::dynamic_value(group, key, value);
        self.register(setting.clone())?;
        Ok(setting)
    }

    /// Load a configuration file on top of the current values
    ///
    /// Known keys are parsed against the type of their default. Unknown keys
    /// become dynamic settings in `misc` typed after the TOML value. Tables,
    /// arrays and datetimes are skipped. Returns the number of applied
    /// entries.
    pub fn load_configuration(&self, path: impl AsRef<Path>) -> SettingsResult<usize> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let table: toml::Table = toml::from_str(&text)?;
        let mut applied = 0;

        for (key, entry) in table {
            let value = match entry {
                toml::Value::String(s) => SettingValue::String(s),
                toml::Value::Integer(i) => SettingValue::Integer(i),
                toml::Value::Boolean(b) => SettingValue::Boolean(b),
                other => {
                    warn!(
                        "Ignoring {} value for {} in {}",
                        other.type_str(),
                        key,
                        path.display()
                    );
                    continue;
                }
            };

            if self.get_setting(&key).is_some() {
                self.set_from_string(&key, &value.to_string())?;
            } else {
                self.create_dynamic(None, &key, value)?;
            }
            applied += 1;
        }

        info!(
            "Loaded {} configuration entries from {}",
            applied,
            path.display()
        );
        Ok(applied)
    }

    /// Write modified and dynamic settings, sorted by key
    pub fn store_configuration(&self, path: impl AsRef<Path>) -> SettingsResult<()> {
        let path = path.as_ref();

        let table: toml::Table = self
            .inner
            .read()
            .settings
            .values()
            .filter(|s| s.is_dynamic() || s.is_modified())
            .map(|s| {
                let value = match s.value() {
                    SettingValue::String(v) => toml::Value::String(v.clone()),
                    SettingValue::Integer(i) => toml::Value::Integer(*i),
                    SettingValue::Boolean(b) => toml::Value::Boolean(*b),
                };
                (s.key.clone(), value)
            })
            .collect();

        let out = format!(
            "# structr.conf, written {}\n{}",
            Utc::now().to_rfc3339(),
            toml::to_string(&table)?
        );

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, out)?;

        info!(
            "Stored {} configuration entries to {}",
            table.len(),
            path.display()
        );
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}
