//! Unified error types for the haptics firmware.
//!
//! Every fallible path funnels into [`Error`] so the binary's setup code has
//! a single error type to report.  Playback itself never fails: hardware
//! writes are fire-and-forget and the only rejected input is a malformed
//! waveform, caught when the waveform is constructed.

use core::fmt;

use crate::config::ConfigError;
use crate::drivers::hw_init::HwInitError;
use crate::waveform::WaveformError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Waveform data violated the pair/range invariants.
    InvalidWaveform(WaveformError),
    /// Configuration is invalid or could not be parsed.
    Config(ConfigError),
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// A named library effect does not exist.
    UnknownEffect,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWaveform(e) => write!(f, "invalid waveform: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::UnknownEffect => write!(f, "unknown effect"),
        }
    }
}

impl core::error::Error for Error {}

impl From<WaveformError> for Error {
    fn from(e: WaveformError) -> Self {
        Self::InvalidWaveform(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
