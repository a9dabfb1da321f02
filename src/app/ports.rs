//! Port traits: the hexagonal boundary between playback logic and hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ HapticsEngine (domain)
//! ```
//!
//! Driven adapters (actuator lines, tick timer, event sinks) implement these
//! traits.  The [`HapticsEngine`](super::service::HapticsEngine) consumes
//! them via generics, so the domain core never touches hardware directly.
//!
//! Every port method is infallible: hardware writes are fire-and-forget.
//! Adapters over fallible HALs log the failure and carry on.

use crate::timing::TickLength;

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// State of the two mode-select lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeLines {
    /// Driver IC resonance-assist select (high = auto-resonance on).
    pub resonance_assist: bool,
    /// Supply path select (high = LRA supply, low = ERM supply).
    pub lra_supply: bool,
}

/// Write-side port: the domain calls this to drive the actuator.
pub trait ActuatorPort {
    /// Drive both mode-select lines.
    fn set_mode_lines(&mut self, lines: ModeLines);

    /// Assert (`true`) or deassert the amplifier-enable line.
    fn set_amplifier(&mut self, enabled: bool);

    /// Write the duty-cycle compare register (0–255 of a 255-count period).
    fn set_duty(&mut self, level: u8);

    /// Zero the duty counter and start the PWM timer with the given period.
    fn pwm_start(&mut self, period: u8);

    /// Halt the PWM timer and return it to its idle configuration.
    fn pwm_stop(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Tick timer port (the timing primitive)
// ───────────────────────────────────────────────────────────────

/// Blocking tick delay.
///
/// Implementations must not return before `ticks × tick` timer counts have
/// elapsed.  There is no cancellation.
pub trait TickTimer {
    fn delay_ticks(&mut self, ticks: u32, tick: TickLength);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`HapticEvent`](super::events::HapticEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::HapticEvent);
}
