//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured haptics events to the
//! ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::info;

use crate::app::events::HapticEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`HapticEvent`] to the serial console.
pub struct LogEventSink {
    /// Tick clock used to print nominal playback durations.
    clock_hz: u32,
}

impl LogEventSink {
    pub fn new(clock_hz: u32) -> Self {
        Self { clock_hz }
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &HapticEvent) {
        match event {
            HapticEvent::PlaybackStarted { mode, steps } => {
                info!("PLAY  | start mode={} steps={}", mode, steps);
            }
            HapticEvent::PlaybackFinished(r) => {
                info!(
                    "PLAY  | done mode={} steps={} | ticks res={} nonres={} | ~{}ms",
                    r.mode,
                    r.steps,
                    r.resonant_ticks,
                    r.non_resonant_ticks,
                    r.nominal_duration(self.clock_hz).as_millis(),
                );
            }
            HapticEvent::PlaybackSuppressed { mode } => {
                info!("PLAY  | suppressed mode={} (gate closed)", mode);
            }
            HapticEvent::OutputGateChanged(open) => {
                info!("GATE  | {}", if *open { "open" } else { "closed" });
            }
            HapticEvent::AmplifierForced(on) => {
                info!("AMP   | forced {}", if *on { "on" } else { "off" });
            }
            HapticEvent::DirectDrive(mode) => {
                info!("DRIVE | external PWM, mode={}", mode);
            }
        }
    }
}
