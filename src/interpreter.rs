//! Waveform interpreter: turns steps into duty/enable writes and delays.
//!
//! ```text
//!   Resonant      step ─▶ amp on + duty(a) | amp off ─▶ delay(hold × resonant)
//!   NonResonant   step ─▶ amp on | amp off ─▶ hold × [duty(a) ─ 1 tick ─ duty(255-a) ─ 1 tick]
//!   Continuous    step ─▶ duty(a) ─▶ delay(hold × resonant)
//! ```
//!
//! With auto-resonance the driver IC oscillates the actuator, so software only
//! supplies a level and a hold.  Without it the interpreter synthesizes the
//! drive cycle itself at single-tick granularity.
//!
//! This module runs the decode loop only; mode routing, the PWM session and
//! the output gate belong to [`HapticsEngine`](crate::app::service::HapticsEngine).

use core::time::Duration;

use crate::app::ports::{ActuatorPort, TickTimer};
use crate::timing::TickScale;
use crate::waveform::{DriveMode, Step, StepOp, Waveform};

/// What one playback did, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackReport {
    pub mode: DriveMode,
    pub steps: usize,
    /// Ticks spent at the resonant tick length.
    pub resonant_ticks: u32,
    /// Ticks spent at the non-resonant tick length.
    pub non_resonant_ticks: u32,
    pub scale: TickScale,
}

impl PlaybackReport {
    /// Sum of all requested delays at `clock_hz`.
    pub fn nominal_duration(&self, clock_hz: u32) -> Duration {
        self.scale.resonant.span(self.resonant_ticks, clock_hz)
            + self.scale.non_resonant.span(self.non_resonant_ticks, clock_hz)
    }
}

/// Play every step of `waveform` in order.  Blocks until the last delay
/// returns.
pub fn play(
    waveform: &Waveform,
    scale: &TickScale,
    hw: &mut (impl ActuatorPort + TickTimer),
) -> PlaybackReport {
    let mut report = PlaybackReport {
        mode: waveform.mode(),
        steps: waveform.len(),
        resonant_ticks: 0,
        non_resonant_ticks: 0,
        scale: *scale,
    };

    for &step in waveform.steps() {
        match waveform.mode() {
            DriveMode::ResonantDriven => {
                resonant_step(step, scale, hw);
                report.resonant_ticks += u32::from(step.hold);
            }
            DriveMode::NonResonantDriven => {
                non_resonant_step(step, scale, hw);
                report.non_resonant_ticks += 2 * u32::from(step.hold);
            }
            DriveMode::ContinuousDriven => {
                continuous_step(step, scale, hw);
                report.resonant_ticks += u32::from(step.hold);
            }
        }
    }
    report
}

fn resonant_step(step: Step, scale: &TickScale, hw: &mut (impl ActuatorPort + TickTimer)) {
    match step.op {
        // Duty register is left alone; the actuator coasts.
        StepOp::Brake => hw.set_amplifier(false),
        StepOp::Drive(level) => {
            hw.set_amplifier(true);
            hw.set_duty(level);
        }
    }
    hw.delay_ticks(u32::from(step.hold), scale.resonant);
}

fn non_resonant_step(step: Step, scale: &TickScale, hw: &mut (impl ActuatorPort + TickTimer)) {
    hw.set_amplifier(!step.op.is_brake());

    let high = step.amplitude();
    let low = u8::MAX - high;
    for _ in 0..step.hold {
        hw.set_duty(high);
        hw.delay_ticks(1, scale.non_resonant);
        hw.set_duty(low);
        hw.delay_ticks(1, scale.non_resonant);
    }
}

fn continuous_step(step: Step, scale: &TickScale, hw: &mut (impl ActuatorPort + TickTimer)) {
    hw.set_duty(step.amplitude());
    hw.delay_ticks(u32::from(step.hold), scale.resonant);
}
