//! Haptic actuator driver (DRV2603-class driver IC + LRA/ERM load switch).
//!
//! Drives the PWM duty register, the amplifier-enable line and the two
//! mode-select lines.  This is the single owner of those registers; every
//! write goes through one `ActuatorDriver` instance.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real PWM and GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use log::warn;

use crate::app::ports::ModeLines;
use crate::drivers::hw_init;
use crate::pins;

/// Last values written to the actuator registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorState {
    pub lines: ModeLines,
    pub amplifier: bool,
    pub duty: u8,
    pub pwm_running: bool,
}

pub struct ActuatorDriver {
    state: ActuatorState,
}

impl Default for ActuatorDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ActuatorDriver {
    /// Mirrors the reset state set by `hw_init`: all outputs low, PWM paused.
    pub fn new() -> Self {
        Self {
            state: ActuatorState {
                lines: ModeLines {
                    resonance_assist: false,
                    lra_supply: false,
                },
                amplifier: false,
                duty: 0,
                pwm_running: false,
            },
        }
    }

    pub fn set_mode_lines(&mut self, lines: ModeLines) {
        hw_init::gpio_write(pins::MODE_SELECT_GPIO, lines.resonance_assist);
        hw_init::gpio_write(pins::LOAD_SWITCH_GPIO, lines.lra_supply);
        self.state.lines = lines;
    }

    pub fn set_amplifier(&mut self, enabled: bool) {
        hw_init::gpio_write(pins::AMP_ENABLE_GPIO, enabled);
        self.state.amplifier = enabled;
    }

    pub fn set_duty(&mut self, level: u8) {
        hw_init::ledc_set(hw_init::LEDC_CH_HAPTIC, level);
        self.state.duty = level;
    }

    pub fn pwm_start(&mut self, period: u8) {
        // LEDC period is fixed by the 8-bit resolution chosen at init.
        if period != pins::PWM_PERIOD {
            warn!("actuator: period {} unsupported, using {}", period, pins::PWM_PERIOD);
        }
        hw_init::ledc_start(hw_init::LEDC_CH_HAPTIC);
        self.state.duty = 0;
        self.state.pwm_running = true;
    }

    pub fn pwm_stop(&mut self) {
        hw_init::ledc_halt(hw_init::LEDC_CH_HAPTIC);
        self.state.pwm_running = false;
    }

    pub fn state(&self) -> ActuatorState {
        self.state
    }

    pub fn is_amplifier_on(&self) -> bool {
        self.state.amplifier
    }
}
