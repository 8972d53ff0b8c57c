//! Host settings
//!
//! Read once at start-up from an optional JSON file; every field falls back to
//! its default, so partial documents are fine.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{SIMULATE_INTERVAL_MS, SPAWN_INTERVAL_MS};
use crate::display::{DisplayScale, taskbar_offset};
use crate::error::SettingsError;

/// Raw taskbar measurements reported by the window layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskbarMetrics {
    /// Full screen height in device pixels
    pub screen_height_px: i32,
    /// Bottom edge of the work area in device pixels
    pub work_area_bottom_px: i32,
    /// Display scale at the time of measurement
    #[serde(default)]
    pub scale: DisplayScale,
}

/// Host settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Spawn tick period (ms)
    pub spawn_interval_ms: u64,
    /// Simulate tick period (ms)
    pub simulate_interval_ms: u64,
    /// Launch-point elevation in device-independent units
    pub vertical_offset: f64,
    /// When present, overrides `vertical_offset` with the taskbar height
    pub taskbar: Option<TaskbarMetrics>,
    /// RNG seed (random per run when absent)
    pub seed: Option<u64>,
    /// Drawable area for the headless host
    pub surface_width: f64,
    pub surface_height: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            simulate_interval_ms: SIMULATE_INTERVAL_MS,
            vertical_offset: 0.0,
            taskbar: None,
            seed: None,
            surface_width: 1920.0,
            surface_height: 1080.0,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from `path`
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults when the file is missing
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Ok(Self::default());
        };

        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("{} not found, using default settings", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.spawn_interval_ms == 0 || self.simulate_interval_ms == 0 {
            return Err(SettingsError::Invalid("tick intervals must be non-zero".into()));
        }
        let extent_ok = |v: f64| v.is_finite() && v > 0.0;
        if !extent_ok(self.surface_width) || !extent_ok(self.surface_height) {
            return Err(SettingsError::Invalid(format!(
                "surface size {}x{} must be positive",
                self.surface_width, self.surface_height
            )));
        }
        if !self.vertical_offset.is_finite() {
            return Err(SettingsError::Invalid("vertical offset must be finite".into()));
        }
        Ok(())
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    pub fn simulate_interval(&self) -> Duration {
        Duration::from_millis(self.simulate_interval_ms)
    }

    /// Vertical offset to hand to the simulation
    pub fn effective_vertical_offset(&self) -> f64 {
        match self.taskbar {
            Some(t) => taskbar_offset(t.screen_height_px, t.work_area_bottom_px, t.scale),
            None => self.vertical_offset,
        }
    }
}
