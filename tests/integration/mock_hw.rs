//! Mock hardware adapter for integration tests.
//!
//! Records every actuator and timer call so tests can assert on the full
//! command history without touching real GPIO/PWM registers.

use std::sync::Arc;

use hapticdrive::app::events::HapticEvent;
use hapticdrive::app::ports::{ActuatorPort, EventSink, ModeLines, TickTimer};
use hapticdrive::gate::OutputGate;
use hapticdrive::timing::TickLength;

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    ModeLines(ModeLines),
    Amp(bool),
    Duty(u8),
    PwmStart(u8),
    PwmStop,
    Delay { ticks: u32, tick: TickLength },
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    /// Close this gate once the given number of delays have elapsed,
    /// emulating a button task flipping it mid-playback.
    close_gate_after: Option<(usize, Arc<OutputGate>)>,
    delays: usize,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            close_gate_after: None,
            delays: 0,
        }
    }

    pub fn closing_gate_after(delays: usize, gate: Arc<OutputGate>) -> Self {
        Self {
            close_gate_after: Some((delays, gate)),
            ..Self::new()
        }
    }

    /// Duty writes interleaved with the delays that follow them.
    pub fn duty_holds(&self) -> Vec<(u8, u32)> {
        let mut out = Vec::new();
        let mut duty = None;
        for call in &self.calls {
            match *call {
                ActuatorCall::Duty(level) => duty = Some(level),
                ActuatorCall::Delay { ticks, .. } => {
                    if let Some(level) = duty.take() {
                        out.push((level, ticks));
                    }
                }
                _ => {}
            }
        }
        out
    }

    pub fn amp_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Amp(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn delay_count(&self) -> usize {
        self.delays
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl ActuatorPort for MockHardware {
    fn set_mode_lines(&mut self, lines: ModeLines) {
        self.calls.push(ActuatorCall::ModeLines(lines));
    }

    fn set_amplifier(&mut self, enabled: bool) {
        self.calls.push(ActuatorCall::Amp(enabled));
    }

    fn set_duty(&mut self, level: u8) {
        self.calls.push(ActuatorCall::Duty(level));
    }

    fn pwm_start(&mut self, period: u8) {
        self.calls.push(ActuatorCall::PwmStart(period));
    }

    fn pwm_stop(&mut self) {
        self.calls.push(ActuatorCall::PwmStop);
    }
}

impl TickTimer for MockHardware {
    fn delay_ticks(&mut self, ticks: u32, tick: TickLength) {
        self.calls.push(ActuatorCall::Delay { ticks, tick });
        self.delays += 1;
        if let Some((after, gate)) = &self.close_gate_after {
            if self.delays == *after {
                gate.set_enabled(false);
            }
        }
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<HapticEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &HapticEvent) {
        self.events.push(event.clone());
    }
}
