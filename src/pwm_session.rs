//! PWM session lifecycle.
//!
//! ```text
//!   Idle ──start(gate open)──▶ Running ──stop(gate open)──▶ Idle
//!     ▲  start/stop(gate closed): no hardware writes        │
//!     └─────────────────────────────────────────────────────┘
//! ```
//!
//! Both transitions write the full register set every time, so repeating
//! either one leaves the hardware in the same state as calling it once.

use crate::app::ports::ActuatorPort;
use crate::pins::PWM_PERIOD;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
}

#[derive(Debug, Default)]
pub struct PwmSession {
    state: SessionState,
}

impl PwmSession {
    pub const fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    /// Zero the counter, start the 255-count period, assert the amplifier.
    /// No-op when `gate_open` is false.
    pub fn start(&mut self, gate_open: bool, hw: &mut impl ActuatorPort) {
        if !gate_open {
            return;
        }
        hw.pwm_start(PWM_PERIOD);
        hw.set_amplifier(true);
        self.state = SessionState::Running;
    }

    /// Deassert the amplifier, zero the duty register, halt the timer.
    /// No-op when `gate_open` is false.
    pub fn stop(&mut self, gate_open: bool, hw: &mut impl ActuatorPort) {
        if !gate_open {
            return;
        }
        hw.set_amplifier(false);
        hw.set_duty(0);
        hw.pwm_stop();
        self.state = SessionState::Idle;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }
}
