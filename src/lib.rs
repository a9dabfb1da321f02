//! Haptic waveform playback firmware library.
//!
//! Exposes the playback engine, waveform model and adapters for integration
//! testing and for embedding in other firmware.  All ESP-IDF-specific code
//! is guarded by `#[cfg(all(target_os = "espidf", feature = "espidf"))]`
//! within each module; anything else gets the simulation backends.

#![deny(unused_must_use)]

pub mod app;
pub mod command_queue;
pub mod config;
pub mod gate;
pub mod interpreter;
pub mod mode_select;
pub mod pwm_session;
pub mod timing;
pub mod waveform;

mod error;
pub mod pins;

pub use error::{Error, Result};

// Hardware-facing modules; the actual ESP-IDF implementations are guarded
// by cfg attributes inside.
pub mod adapters;
pub mod drivers;
