//! Application core: playback orchestration, zero direct I/O.
//!
//! This module holds the engine that external collaborators call: gate
//! checks, mode routing, the PWM session, and waveform playback.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
