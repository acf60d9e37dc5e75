// SPDX-License-Identifier: MPL-2.0
//! This module handles the session configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use live_mount::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.notification_duration_ms = Some(8000);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

mod defaults;

pub use defaults::*;

use crate::behavior::BehaviorFlags;
use crate::domain::diagnostics::ActivityCapacity;
use crate::domain::ui::{DismissDuration, StaggerDelay, TickInterval};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "LiveMount";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tick_interval_ms: Option<u64>,
    #[serde(default)]
    pub notification_duration_ms: Option<u64>,
    #[serde(default)]
    pub stagger_delay_ms: Option<u64>,
    #[serde(default)]
    pub activity_capacity: Option<usize>,
    #[serde(default)]
    pub hover_effect: Option<bool>,
    #[serde(default)]
    pub pulse_animation: Option<bool>,
    #[serde(default)]
    pub widget_title: Option<String>,
    #[serde(default)]
    pub notification_title: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: Some(DEFAULT_TICK_INTERVAL_MS),
            notification_duration_ms: Some(DEFAULT_DISMISS_DURATION_MS),
            stagger_delay_ms: Some(DEFAULT_STAGGER_DELAY_MS),
            activity_capacity: Some(DEFAULT_ACTIVITY_CAPACITY),
            hover_effect: Some(DEFAULT_HOVER_EFFECT),
            pulse_animation: Some(DEFAULT_PULSE_ANIMATION),
            widget_title: None,
            notification_title: None,
        }
    }
}

impl Config {
    #[must_use]
    pub fn tick_interval(&self) -> TickInterval {
        self.tick_interval_ms
            .map(TickInterval::new)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn notification_duration(&self) -> DismissDuration {
        self.notification_duration_ms
            .map(DismissDuration::new)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn stagger_delay(&self) -> StaggerDelay {
        self.stagger_delay_ms
            .map(StaggerDelay::new)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn activity_capacity(&self) -> ActivityCapacity {
        self.activity_capacity
            .map(ActivityCapacity::new)
            .unwrap_or_default()
    }

    /// Behavior toggles pre-selected for new widgets.
    #[must_use]
    pub fn behavior_flags(&self) -> BehaviorFlags {
        let defaults = BehaviorFlags::default();
        BehaviorFlags {
            hover_effect: self.hover_effect.unwrap_or(defaults.hover_effect),
            pulse_animation: self.pulse_animation.unwrap_or(defaults.pulse_animation),
        }
    }

    #[must_use]
    pub fn widget_title(&self) -> &str {
        self.widget_title.as_deref().unwrap_or(DEFAULT_WIDGET_TITLE)
    }

    #[must_use]
    pub fn notification_title(&self) -> &str {
        self.notification_title
            .as_deref()
            .unwrap_or(DEFAULT_NOTIFICATION_TITLE)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads a configuration file. Unparseable content yields the defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring invalid settings file");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
