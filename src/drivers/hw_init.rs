//! One-shot hardware peripheral initialization and register helpers.
//!
//! Configures the selector/enable GPIOs and the LEDC PWM channel using raw
//! ESP-IDF sys calls.  Called once from `main()` before the first playback.

#[cfg(all(target_os = "espidf", feature = "espidf"))]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
    TimerCreateFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc) => write!(f, "LEDC timer/channel config failed (rc={})", rc),
            Self::TimerCreateFailed(rc) => write!(f, "tick timer create failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

#[cfg(all(target_os = "espidf", feature = "espidf"))]
use log::info;

#[cfg(all(target_os = "espidf", feature = "espidf"))]
use crate::pins;

/// Configure GPIO outputs and the PWM channel.  All outputs start low and
/// the PWM timer starts paused.
#[cfg(all(target_os = "espidf", feature = "espidf"))]
pub fn init_peripherals(pwm_freq_hz: u32) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before playback; single-threaded.
    unsafe {
        init_gpio_outputs()?;
        init_ledc(pwm_freq_hz)?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(all(target_os = "espidf", feature = "espidf")))]
pub fn init_peripherals(pwm_freq_hz: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped (pwm {} Hz)", pwm_freq_hz);
    Ok(())
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(all(target_os = "espidf", feature = "espidf"))]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = [
        pins::AMP_ENABLE_GPIO,
        pins::MODE_SELECT_GPIO,
        pins::LOAD_SWITCH_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured (amp, mode, load switch)");
    Ok(())
}

#[cfg(all(target_os = "espidf", feature = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Control task only.
    unsafe { gpio_set_level(pin, if high { 1 } else { 0 }); }
}

#[cfg(not(all(target_os = "espidf", feature = "espidf")))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── LEDC PWM ─────────────────────────────────────────────────

pub const LEDC_CH_HAPTIC: u32 = 0;

#[cfg(all(target_os = "espidf", feature = "espidf"))]
const LEDC_TIMER_HAPTIC: u32 = ledc_timer_t_LEDC_TIMER_0;

#[cfg(all(target_os = "espidf", feature = "espidf"))]
unsafe fn init_ledc(freq_hz: u32) -> Result<(), HwInitError> {
    let timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: LEDC_TIMER_HAPTIC,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_8_BIT,
        freq_hz,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    let ret = unsafe { ledc_channel_config(&ledc_channel_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        channel: LEDC_CH_HAPTIC,
        timer_sel: LEDC_TIMER_HAPTIC,
        gpio_num: pins::PWM_GPIO,
        duty: 0,
        hpoint: 0,
        ..Default::default()
    }) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    unsafe { ledc_timer_pause(ledc_mode_t_LEDC_LOW_SPEED_MODE, LEDC_TIMER_HAPTIC) };

    info!("hw_init: LEDC configured (haptic=CH0 @ {} Hz, 8-bit)", freq_hz);
    Ok(())
}

#[cfg(all(target_os = "espidf", feature = "espidf"))]
pub fn ledc_set(channel: u32, duty: u8) {
    // SAFETY: LEDC channel was configured in init_ledc(); duty register
    // writes are race-free since only the control task calls this function.
    unsafe {
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty as u32);
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
    }
}

#[cfg(not(all(target_os = "espidf", feature = "espidf")))]
pub fn ledc_set(_channel: u32, _duty: u8) {}

/// Zero the duty and counter, then run the PWM timer.
#[cfg(all(target_os = "espidf", feature = "espidf"))]
pub fn ledc_start(channel: u32) {
    ledc_set(channel, 0);
    // SAFETY: timer configured in init_ledc(); control task only.
    unsafe {
        ledc_timer_rst(ledc_mode_t_LEDC_LOW_SPEED_MODE, LEDC_TIMER_HAPTIC);
        ledc_timer_resume(ledc_mode_t_LEDC_LOW_SPEED_MODE, LEDC_TIMER_HAPTIC);
    }
}

#[cfg(not(all(target_os = "espidf", feature = "espidf")))]
pub fn ledc_start(_channel: u32) {}

/// Force the output low and pause the PWM timer.
#[cfg(all(target_os = "espidf", feature = "espidf"))]
pub fn ledc_halt(channel: u32) {
    // SAFETY: timer/channel configured in init_ledc(); control task only.
    unsafe {
        ledc_stop(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, 0);
        ledc_timer_pause(ledc_mode_t_LEDC_LOW_SPEED_MODE, LEDC_TIMER_HAPTIC);
    }
}

#[cfg(not(all(target_os = "espidf", feature = "espidf")))]
pub fn ledc_halt(_channel: u32) {}
