//! Inbound commands to the haptics engine.
//!
//! These represent actions requested by the outside world (button/mode
//! logic, a console, a game) that the
//! [`HapticsEngine`](super::service::HapticsEngine) interprets and acts upon.

use crate::timing::{LraFrequency, TickScale};
use crate::waveform::{DriveMode, Waveform};

/// Commands that external collaborators can send into the haptics core.
#[derive(Debug, Clone)]
pub enum HapticCommand {
    /// Play a waveform (blocks until it finishes).
    Play(Waveform),

    /// Play a named effect from the built-in library.
    PlayEffect(&'static str),

    /// Play a waveform with the non-resonant tick taken from a drive
    /// frequency; the previous tick scale is restored afterwards.
    PlayAtFrequency(Waveform, LraFrequency),

    /// Play a library effect at a chosen drive frequency.
    PlayEffectAt(&'static str, LraFrequency),

    /// Open or close the output gate.
    SetOutputEnabled(bool),

    /// Assert the amplifier-enable line.
    EnableAmplifier,

    /// Deassert the amplifier-enable line.
    DisableAmplifier,

    /// Route the actuator for `mode` and assert the amplifier so an
    /// external PWM source drives it.
    DirectDrive(DriveMode),

    /// Replace the tick scale.
    SetTickScale(TickScale),
}
