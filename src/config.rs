//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::sim::clock::{DEFAULT_TICK_HOURS, Playback, PlaybackSpeed, TimeOfDay};
use crate::sim::constants::ModelConstants;
use crate::sim::session::{CurrentSampleLookup, LookupBoundary, Session};
use crate::sim::sweep::{SweepRange, SweepVariable};
use crate::sim::types::{Location, SimulationInputs};

/// Top-level scenario configuration parsed from TOML.
///
/// Every table is optional and defaults to the `kuta` preset. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::kuta`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Model inputs.
    #[serde(default)]
    pub inputs: SimulationInputs,
    /// Fixed device and tariff constants.
    #[serde(default)]
    pub constants: ModelConstants,
    /// Time cursor settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Parameter sweep settings.
    #[serde(default)]
    pub sweep: SweepConfig,
    /// Cursor animation settings.
    #[serde(default)]
    pub playback: PlaybackConfig,
}

/// Time cursor settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Initial cursor position (hours).
    pub time_of_day: f64,
    /// Maximum distance between cursor and sample for a match (hours).
    pub lookup_tolerance_hours: f64,
    /// Whether a sample exactly at the tolerance matches.
    pub inclusive_boundary: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_of_day: TimeOfDay::NOON.hours(),
            lookup_tolerance_hours: 0.5,
            inclusive_boundary: false,
        }
    }
}

impl SessionConfig {
    /// Lookup policy for the session cursor.
    pub fn lookup(&self) -> CurrentSampleLookup {
        CurrentSampleLookup {
            tolerance_hours: self.lookup_tolerance_hours,
            boundary: if self.inclusive_boundary {
                LookupBoundary::Inclusive
            } else {
                LookupBoundary::Exclusive
            },
        }
    }
}

/// Parameter sweep settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// Input to vary.
    pub variable: SweepVariable,
    /// First value.
    pub start: f64,
    /// Last value (inclusive).
    pub end: f64,
    /// Increment; non-positive runs no iterations.
    pub step: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        let range = SweepRange::default();
        Self {
            variable: SweepVariable::default(),
            start: range.start,
            end: range.end,
            step: range.step,
        }
    }
}

impl SweepConfig {
    pub fn range(&self) -> SweepRange {
        SweepRange::new(self.start, self.end, self.step)
    }
}

/// Cursor animation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Tick cadence preset.
    pub speed: PlaybackSpeed,
    /// Hours advanced per tick.
    pub step_hours: f64,
    /// Number of ticks; `0` plays one full day.
    pub ticks: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: PlaybackSpeed::Fast,
            step_hours: DEFAULT_TICK_HOURS,
            ticks: 0,
        }
    }
}

impl PlaybackConfig {
    /// Builds the tick driver.
    pub fn playback(&self) -> Playback {
        if self.ticks == 0 {
            Playback::full_day(self.step_hours, self.speed)
        } else {
            Playback::new(self.ticks, self.step_hours, self.speed)
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"inputs.sand_temp_peak"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Tropical beach preset (the default start state).
    pub fn kuta() -> Self {
        Self::default()
    }

    /// Windy coastal preset: same device, faster nocturnal cooling.
    pub fn tanah_lot() -> Self {
        Self {
            inputs: SimulationInputs {
                location: Location::HighWind,
                ..SimulationInputs::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["kuta", "tanah_lot"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "kuta" => Ok(Self::kuta()),
            "tanah_lot" => Ok(Self::tanah_lot()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Builds a session from this scenario.
    pub fn session(&self) -> Session {
        let mut session = Session::new(
            self.inputs.clone(),
            self.constants.clone(),
            self.session.lookup(),
        );
        session.set_time_of_day(self.session.time_of_day);
        session
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. The engine accepts
    /// any input; this is a gate for user-supplied scenario files only.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let i = &self.inputs;

        for (field, value) in [
            ("inputs.sand_temp_peak", i.sand_temp_peak),
            ("inputs.seebeck_coefficient", i.seebeck_coefficient),
            ("inputs.conductivity", i.conductivity),
            ("inputs.system_cost", i.system_cost),
            ("inputs.discount_rate", i.discount_rate),
            ("constants.internal_resistance_ohm", self.constants.internal_resistance_ohm),
            ("constants.load_resistance_ohm", self.constants.load_resistance_ohm),
            ("constants.device_area_m2", self.constants.device_area_m2),
            ("constants.electricity_rate_per_kwh", self.constants.electricity_rate_per_kwh),
            ("constants.days_per_year", self.constants.days_per_year),
            ("session.time_of_day", self.session.time_of_day),
            ("session.lookup_tolerance_hours", self.session.lookup_tolerance_hours),
            ("sweep.start", self.sweep.start),
            ("sweep.end", self.sweep.end),
            ("sweep.step", self.sweep.step),
            ("playback.step_hours", self.playback.step_hours),
        ] {
            if !value.is_finite() {
                errors.push(ConfigError::new(field, "must be a finite number"));
            }
        }

        if !(50.0..=100.0).contains(&i.sand_temp_peak) {
            errors.push(ConfigError::new("inputs.sand_temp_peak", "must be in [50, 100] °C"));
        }
        if !(0.01..=0.1).contains(&i.seebeck_coefficient) {
            errors.push(ConfigError::new(
                "inputs.seebeck_coefficient",
                "must be in [0.01, 0.1] V/K",
            ));
        }
        if i.conductivity <= 0.0 {
            errors.push(ConfigError::new("inputs.conductivity", "must be > 0"));
        }
        if i.system_cost < 0.0 {
            errors.push(ConfigError::new("inputs.system_cost", "must be >= 0"));
        }
        if i.lifetime == 0 {
            errors.push(ConfigError::new("inputs.lifetime", "must be > 0"));
        }
        if i.module_count == 0 {
            errors.push(ConfigError::new("inputs.module_count", "must be > 0"));
        }

        let c = &self.constants;
        if c.internal_resistance_ohm <= 0.0 {
            errors.push(ConfigError::new("constants.internal_resistance_ohm", "must be > 0"));
        }
        if c.load_resistance_ohm <= 0.0 {
            errors.push(ConfigError::new("constants.load_resistance_ohm", "must be > 0"));
        }
        if c.device_area_m2 <= 0.0 {
            errors.push(ConfigError::new("constants.device_area_m2", "must be > 0"));
        }
        if c.electricity_rate_per_kwh < 0.0 {
            errors.push(ConfigError::new("constants.electricity_rate_per_kwh", "must be >= 0"));
        }
        if c.days_per_year <= 0.0 {
            errors.push(ConfigError::new("constants.days_per_year", "must be > 0"));
        }

        if self.session.lookup_tolerance_hours <= 0.0 {
            errors.push(ConfigError::new("session.lookup_tolerance_hours", "must be > 0"));
        }
        if self.playback.step_hours <= 0.0 {
            errors.push(ConfigError::new("playback.step_hours", "must be > 0"));
        }

        errors
    }
}
