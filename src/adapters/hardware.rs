//! Hardware adapter: bridges the real haptic driver to the port traits.
//!
//! Owns the [`ActuatorDriver`] and the tick timer configuration, exposing
//! them through [`ActuatorPort`] and [`TickTimer`].  On non-espidf targets
//! the underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, ModeLines, TickTimer};
use crate::drivers::actuator::{ActuatorDriver, ActuatorState};
use crate::drivers::hw_timer;
use crate::timing::TickLength;

/// Concrete adapter that combines the actuator and tick timer behind ports.
pub struct HardwareAdapter {
    actuator: ActuatorDriver,
    /// Tick timer input clock, used to turn tick counts into wall time.
    clock_hz: u32,
}

impl HardwareAdapter {
    pub fn new(actuator: ActuatorDriver, clock_hz: u32) -> Self {
        Self { actuator, clock_hz }
    }

    pub fn actuator_state(&self) -> ActuatorState {
        self.actuator.state()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_mode_lines(&mut self, lines: ModeLines) {
        self.actuator.set_mode_lines(lines);
    }

    fn set_amplifier(&mut self, enabled: bool) {
        self.actuator.set_amplifier(enabled);
    }

    fn set_duty(&mut self, level: u8) {
        self.actuator.set_duty(level);
    }

    fn pwm_start(&mut self, period: u8) {
        self.actuator.pwm_start(period);
    }

    fn pwm_stop(&mut self) {
        self.actuator.pwm_stop();
    }
}

// ── TickTimer implementation ──────────────────────────────────

impl TickTimer for HardwareAdapter {
    fn delay_ticks(&mut self, ticks: u32, tick: TickLength) {
        hw_timer::delay(tick.span(ticks, self.clock_hz));
    }
}
