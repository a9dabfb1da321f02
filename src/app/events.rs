//! Outbound haptics events.
//!
//! The [`HapticsEngine`](super::service::HapticsEngine) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to serial, count them, forward them.

use crate::interpreter::PlaybackReport;
use crate::waveform::DriveMode;

/// Structured events emitted by the haptics core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HapticEvent {
    /// Gate was open; the waveform is about to play.
    PlaybackStarted { mode: DriveMode, steps: usize },

    /// The waveform ran to completion.
    PlaybackFinished(PlaybackReport),

    /// Gate was closed; the waveform was dropped without hardware writes.
    PlaybackSuppressed { mode: DriveMode },

    /// Output gate changed state.
    OutputGateChanged(bool),

    /// Amplifier asserted or deasserted outside a waveform.
    AmplifierForced(bool),

    /// Actuator routed for an external PWM source.
    DirectDrive(DriveMode),
}
