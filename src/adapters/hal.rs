//! Generic `embedded-hal` adapter.
//!
//! Implements [`ActuatorPort`] and [`TickTimer`] over any board support crate
//! that provides `embedded-hal` 1.0 pins, a `SetDutyCycle` PWM channel and a
//! `DelayNs` delay.  Pin and PWM errors are logged and otherwise ignored:
//! the ports are fire-and-forget.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, OutputPin};
use embedded_hal::pwm::{Error as _, SetDutyCycle};
use log::warn;

use crate::app::ports::{ActuatorPort, ModeLines, TickTimer};
use crate::pins::PWM_PERIOD;
use crate::timing::TickLength;

/// Output pins driven by the adapter.
pub struct HalPins<AMP, MODE, LOAD> {
    pub amp_enable: AMP,
    pub mode_select: MODE,
    pub load_switch: LOAD,
}

pub struct HalAdapter<AMP, MODE, LOAD, PWM, D> {
    pins: HalPins<AMP, MODE, LOAD>,
    pwm: PWM,
    delay: D,
    clock_hz: u32,
}

impl<AMP, MODE, LOAD, PWM, D> HalAdapter<AMP, MODE, LOAD, PWM, D>
where
    AMP: OutputPin,
    MODE: OutputPin,
    LOAD: OutputPin,
    PWM: SetDutyCycle,
    D: DelayNs,
{
    pub fn new(pins: HalPins<AMP, MODE, LOAD>, pwm: PWM, delay: D, clock_hz: u32) -> Self {
        Self {
            pins,
            pwm,
            delay,
            clock_hz,
        }
    }

    /// Give the peripherals back.
    pub fn release(self) -> (HalPins<AMP, MODE, LOAD>, PWM, D) {
        (self.pins, self.pwm, self.delay)
    }

    fn write_duty(&mut self, level: u8) {
        if let Err(e) = self
            .pwm
            .set_duty_cycle_fraction(u16::from(level), u16::from(PWM_PERIOD))
        {
            warn!("hal: duty write failed: {:?}", e.kind());
        }
    }
}

fn drive<P: OutputPin>(pin: &mut P, high: bool, name: &str) {
    let result = if high { pin.set_high() } else { pin.set_low() };
    if let Err(e) = result {
        warn!("hal: {} write failed: {:?}", name, e.kind());
    }
}

impl<AMP, MODE, LOAD, PWM, D> ActuatorPort for HalAdapter<AMP, MODE, LOAD, PWM, D>
where
    AMP: OutputPin,
    MODE: OutputPin,
    LOAD: OutputPin,
    PWM: SetDutyCycle,
    D: DelayNs,
{
    fn set_mode_lines(&mut self, lines: ModeLines) {
        drive(&mut self.pins.mode_select, lines.resonance_assist, "mode select");
        drive(&mut self.pins.load_switch, lines.lra_supply, "load switch");
    }

    fn set_amplifier(&mut self, enabled: bool) {
        drive(&mut self.pins.amp_enable, enabled, "amp enable");
    }

    fn set_duty(&mut self, level: u8) {
        self.write_duty(level);
    }

    // `SetDutyCycle` has no run/halt control; an idle channel is held at 0%.
    fn pwm_start(&mut self, _period: u8) {
        self.write_duty(0);
    }

    fn pwm_stop(&mut self) {
        self.write_duty(0);
    }
}

impl<AMP, MODE, LOAD, PWM, D> TickTimer for HalAdapter<AMP, MODE, LOAD, PWM, D>
where
    AMP: OutputPin,
    MODE: OutputPin,
    LOAD: OutputPin,
    PWM: SetDutyCycle,
    D: DelayNs,
{
    fn delay_ticks(&mut self, ticks: u32, tick: TickLength) {
        let us = tick.span(ticks, self.clock_hz).as_micros();
        self.delay.delay_us(u32::try_from(us).unwrap_or(u32::MAX));
    }
}
