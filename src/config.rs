//! System configuration parameters
//!
//! All tunable parameters for the haptics engine.  Values can be loaded from
//! JSON (e.g. a provisioning blob) and are validated before use: invalid
//! values are rejected, never clamped.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::timing::{LraFrequency, TickScale};
use crate::waveform::library;

/// Core haptics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HapticsConfig {
    // --- Timing ---
    /// Off-resonance drive frequency; its half-period is the non-resonant tick.
    pub drive_frequency: LraFrequency,
    /// Tick timer input clock (Hz).  The frequency table assumes 8 MHz.
    pub timer_clock_hz: u32,
    /// Resonant tick = multiplier × non-resonant tick.
    pub resonant_tick_multiplier: u32,

    // --- PWM ---
    /// PWM carrier frequency (Hz).
    pub pwm_frequency_hz: u32,

    // --- Playback ---
    /// Output gate state at boot.
    pub output_enabled_at_boot: bool,
    /// Library effect played once at boot, if any.
    pub startup_effect: Option<String>,
}

impl Default for HapticsConfig {
    fn default() -> Self {
        Self {
            // Timing
            drive_frequency: LraFrequency::Hz185,
            timer_clock_hz: 8_000_000,
            resonant_tick_multiplier: TickScale::REFERENCE_MULTIPLIER,

            // PWM: 255-count period on the 8 MHz clock
            pwm_frequency_hz: 31_372,

            // Playback
            output_enabled_at_boot: true,
            startup_effect: Some("erm_rampup".into()),
        }
    }
}

impl HapticsConfig {
    /// Tick scale derived from the drive frequency and multiplier.
    pub fn tick_scale(&self) -> TickScale {
        TickScale::from_base(
            self.drive_frequency.half_period(),
            self.resonant_tick_multiplier,
        )
    }

    /// Range-check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1_000_000..=80_000_000).contains(&self.timer_clock_hz) {
            return Err(ConfigError::ValidationFailed(
                "timer_clock_hz must be 1 MHz–80 MHz",
            ));
        }
        if !(1..=8).contains(&self.resonant_tick_multiplier) {
            return Err(ConfigError::ValidationFailed(
                "resonant_tick_multiplier must be 1–8",
            ));
        }
        if !(1_000..=100_000).contains(&self.pwm_frequency_hz) {
            return Err(ConfigError::ValidationFailed(
                "pwm_frequency_hz must be 1 kHz–100 kHz",
            ));
        }
        if let Some(name) = &self.startup_effect {
            if library::raw(name).is_none() {
                return Err(ConfigError::ValidationFailed(
                    "startup_effect must name a library effect",
                ));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON config.  Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Input was not valid JSON for [`HapticsConfig`].
    Parse,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::Parse => write!(f, "parse error"),
        }
    }
}

impl core::error::Error for ConfigError {}
