//! Drive mode controller.
//!
//! Two selector lines route the actuator:
//!
//! | Mode                 | Resonance assist | Supply |
//! |----------------------|------------------|--------|
//! | `ResonantDriven`     | on               | LRA    |
//! | `NonResonantDriven`  | off              | LRA    |
//! | `ContinuousDriven`   | off              | ERM    |
//!
//! The controller is stateless: every call rewrites both lines, and there is
//! nothing to tear down.

use crate::app::ports::{ActuatorPort, ModeLines};
use crate::waveform::DriveMode;

/// Selector line levels for a drive mode.
pub const fn lines_for(mode: DriveMode) -> ModeLines {
    match mode {
        DriveMode::ResonantDriven => ModeLines {
            resonance_assist: true,
            lra_supply: true,
        },
        DriveMode::NonResonantDriven => ModeLines {
            resonance_assist: false,
            lra_supply: true,
        },
        DriveMode::ContinuousDriven => ModeLines {
            resonance_assist: false,
            lra_supply: false,
        },
    }
}

/// Route the actuator hardware for `mode`.
pub fn set_hardware_mode(mode: DriveMode, hw: &mut impl ActuatorPort) {
    hw.set_mode_lines(lines_for(mode));
}

/// Route the actuator for a raw mode byte.  Unrecognized values select
/// [`DriveMode::ResonantDriven`].
pub fn set_hardware_mode_raw(raw: u8, hw: &mut impl ActuatorPort) -> DriveMode {
    let mode = DriveMode::from_raw(raw);
    set_hardware_mode(mode, hw);
    mode
}
