//! HapticDrive firmware entry point
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                  │
//! │                                                           │
//! │  HardwareAdapter              LogEventSink                │
//! │  (ActuatorPort + TickTimer)   (EventSink)                 │
//! │                                                           │
//! │  ────────────── Port Trait Boundary ──────────────        │
//! │                                                           │
//! │  ┌─────────────────────────────────────────────────┐      │
//! │  │          HapticsEngine (pure logic)             │      │
//! │  │  gate · mode select · PWM session · interpreter │      │
//! │  └─────────────────────────────────────────────────┘      │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine runs on the main task and drains `HapticCommand`s from the
//! command queue.  A console task reads serial lines and submits commands
//! through a `HapticRemote`, which also holds the shared output gate.
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use log::{info, warn};

use hapticdrive::adapters::console;
use hapticdrive::adapters::hardware::HardwareAdapter;
use hapticdrive::adapters::log_sink::LogEventSink;
use hapticdrive::app::service::HapticsEngine;
use hapticdrive::command_queue::{HapticRemote, COMMANDS};
use hapticdrive::config::HapticsConfig;
use hapticdrive::drivers::actuator::ActuatorDriver;
use hapticdrive::drivers::{hw_init, hw_timer};

/// Idle wait between queue drains.
const COMMAND_POLL: Duration = Duration::from_millis(10);

/// Console task stack.
const CONSOLE_STACK_BYTES: usize = 6 * 1024;

/// Optional build-time config override (JSON, see `HapticsConfig`).
const CONFIG_JSON: Option<&str> = option_env!("HAPTICDRIVE_CONFIG");

fn load_config() -> HapticsConfig {
    match CONFIG_JSON.map(HapticsConfig::from_json) {
        Some(Ok(cfg)) => {
            info!("Config loaded from build environment");
            cfg
        }
        Some(Err(e)) => {
            warn!("Build config rejected ({}), using defaults", e);
            HapticsConfig::default()
        }
        None => HapticsConfig::default(),
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  HapticDrive v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config();

    // ── 3. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals(config.pwm_frequency_hz) {
        // Peripheral init failure is critical: log and halt.
        log::error!("HAL init failed: {}, halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    hw_timer::init_tick_timer()?;

    // ── 4. Construct adapters + engine ────────────────────────
    let mut hw = HardwareAdapter::new(ActuatorDriver::new(), config.timer_clock_hz);
    let mut log_sink = LogEventSink::new(config.timer_clock_hz);

    let mut engine = HapticsEngine::new(&config);
    engine.init_haptics(config.drive_frequency);
    info!(
        "Haptics ready: drive {} Hz, gate {}",
        config.drive_frequency.hz(),
        if engine.is_output_enabled() { "open" } else { "closed" }
    );

    // ── 5. Startup effect ─────────────────────────────────────
    if let Some(name) = config.startup_effect.as_deref() {
        if let Err(e) = engine.play_effect(name, &mut hw, &mut log_sink) {
            warn!("Startup effect '{}' failed: {}", name, e);
        }
    }

    // ── 6. Command producers ──────────────────────────────────
    let remote = HapticRemote::new(engine.gate(), &COMMANDS);
    std::thread::Builder::new()
        .name("console".into())
        .stack_size(CONSOLE_STACK_BYTES)
        .spawn(move || console::run(std::io::stdin().lock(), &remote))?;

    info!("System ready. Waiting for commands.");

    // ── 7. Command loop ───────────────────────────────────────
    loop {
        COMMANDS.drain(|cmd| {
            if let Err(e) = engine.handle_command(cmd, &mut hw, &mut log_sink) {
                warn!("Command failed: {}", e);
            }
        });
        std::thread::sleep(COMMAND_POLL);
    }
}
