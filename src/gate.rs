//! Output gate: the process-wide playback enable flag.
//!
//! The gate is read once when a playback request arrives.  Closing it while
//! a waveform is playing does not stop that waveform; it suppresses the next
//! request.  The flag is atomic so a button task or ISR can flip it while the
//! control task is blocked inside a tick delay.

use core::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug)]
pub struct OutputGate {
    enabled: AtomicBool,
}

impl OutputGate {
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    /// Open (`true`) or close the gate.  Returns the previous state.
    pub fn set_enabled(&self, enabled: bool) -> bool {
        self.enabled.swap(enabled, Ordering::AcqRel)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

impl Default for OutputGate {
    fn default() -> Self {
        Self::new(true)
    }
}
