//! Reference effect library.
//!
//! Each effect is a flat `[amplitude, hold, ...]` table; one hold unit is one
//! tick (≈ 5 ms resonant tick in the reference configuration).  To add an
//! effect, define the data table, wrap it in a [`RawWaveform`] with its drive
//! mode, and list it in [`EFFECTS`].
//!
//! Non-resonant ("dumb") LRA effects emulate drive through the ERM path of
//! the driver, so their levels are scaled for 2 Vrms
//! ([`LRA_AUTO_OFF_MAX`]) rather than the resonant maximum.

use super::{DriveMode, RawWaveform, Waveform, WaveformError};

/// Maximum amplitude for auto-resonance-on effects.
pub const LRA_AUTO_ON_MAX: u8 = 0xF0;
/// Maximum amplitude for auto-resonance-off effects.
pub const LRA_AUTO_OFF_MAX: u8 = 0xD8;

const ON: DriveMode = DriveMode::ResonantDriven;
const OFF: DriveMode = DriveMode::NonResonantDriven;
const ERM: DriveMode = DriveMode::ContinuousDriven;

const M: u8 = LRA_AUTO_ON_MAX;
const D: u8 = LRA_AUTO_OFF_MAX;

// ── LRA standard effects ──────────────────────────────────────

pub const LRA_CLICK: RawWaveform = RawWaveform::new(ON, &[M, 0x05, 0x00, 0x07]);
pub const LRA_CLICK_NOBRAKE: RawWaveform = RawWaveform::new(ON, &[M, 0x0A, 0x80, 0x02]);
pub const LRA_DOUBLECLICK: RawWaveform =
    RawWaveform::new(ON, &[M, 0x08, 0x00, 0x09, M, 0x08, 0x00, 0x09]);
pub const LRA_DOUBLECLICK_NOBRAKE: RawWaveform =
    RawWaveform::new(ON, &[M, 0x0D, 0x80, 0x09, M, 0x0D, 0x80, 0x09]);
pub const LRA_ALERT: RawWaveform = RawWaveform::new(ON, &[M, 0x85]);
pub const LRA_RAMPUP: RawWaveform = RawWaveform::new(
    ON,
    &[
        0xFF, 0x02, 0x90, 0x15, 0xA0, 0x15, 0xB0, 0x10, 0xD0, 0x09, M, 0x05, 0x00, 0x03,
    ],
);
pub const LRA_RAMPDOWN: RawWaveform = RawWaveform::new(
    ON,
    &[
        M, 0x06, 0xD0, 0x09, 0xB0, 0x10, 0xA0, 0x15, 0x90, 0x15, 0x00, 0x08,
    ],
);

// ── LRA effects without auto-resonance ───────────────────────

pub const LRA_CLICK_DUMB: RawWaveform = RawWaveform::new(OFF, &[D, 0x0C, 0x1A, 0x09]);
pub const LRA_CLICK_NOBRAKE_DUMB: RawWaveform = RawWaveform::new(OFF, &[D, 0x0D, 0x80, 0x09]);
pub const LRA_DOUBLECLICK_DUMB: RawWaveform =
    RawWaveform::new(OFF, &[D, 0x0C, 0x1A, 0x09, D, 0x0C, 0x1A, 0x09]);
pub const LRA_DOUBLECLICK_NOBRAKE_DUMB: RawWaveform =
    RawWaveform::new(OFF, &[D, 0x0D, 0x80, 0x09, D, 0x0D, 0x80, 0x09]);
pub const LRA_ALERT_DUMB: RawWaveform = RawWaveform::new(OFF, &[D, 0x85]);

// ── ERM effects ───────────────────────────────────────────────

pub const ERM_CLICK: RawWaveform = RawWaveform::new(ERM, &[0xFF, 0x07, 0x00, 0x04]);
pub const ERM_BUMP: RawWaveform = RawWaveform::new(ERM, &[0xFF, 0x05, 0xB4, 0x07]);
pub const ERM_DOUBLECLICK: RawWaveform = RawWaveform::new(
    ERM,
    &[
        0xFF, 0x06, 0xB4, 0x03, 0x00, 0x04, 0x80, 0x0C, 0xFF, 0x07, 0xB4, 0x03, 0x00, 0x05,
    ],
);
pub const ERM_DOUBLEBUMP: RawWaveform = RawWaveform::new(
    ERM,
    &[0xFF, 0x05, 0xB4, 0x08, 0x80, 0x0C, 0xFF, 0x05, 0xB4, 0x08],
);
pub const ERM_ALERT: RawWaveform = RawWaveform::new(ERM, &[0xFF, 0x03, 0xB4, 0x60]);
pub const ERM_RAMPUP: RawWaveform = RawWaveform::new(
    ERM,
    &[
        0x90, 0x15, 0xA0, 0x15, 0xB0, 0x09, 0xC0, 0x05, 0xFF, 0x04, 0x00, 0x04,
    ],
);
pub const ERM_RAMPDOWN: RawWaveform = RawWaveform::new(
    ERM,
    &[
        0xFF, 0x04, 0xC0, 0x09, 0xB0, 0x10, 0xA0, 0x15, 0x90, 0x15, 0x00, 0x02,
    ],
);

// ── Subtle LRA effects ────────────────────────────────────────

pub const LRA_TICK: RawWaveform = RawWaveform::new(ON, &[0xFF, 0x02, 0x00, 0x02]);
pub const LRA_SOFTCLICK: RawWaveform = RawWaveform::new(ON, &[0xC0, 0x06, 0x00, 0x07]);
pub const LRA_SOFTBUMP: RawWaveform = RawWaveform::new(ON, &[0xC0, 0x05, 0xA0, 0x07]);
pub const LRA_SOFTALERT: RawWaveform = RawWaveform::new(ON, &[0xB0, 0x80]);

// ── Game feedback effects ─────────────────────────────────────

pub const LRA_RAMPUP_DOUBLECLICK: RawWaveform = RawWaveform::new(
    ON,
    &[
        M, 0x02, 0x90, 0x40, 0xA0, 0x40, 0xB0, 0x30, 0xD0, 0x20, 0x00, 0x09, M, 0x08, 0x00, 0x09,
        M, 0x09, 0x00, 0x09,
    ],
);
pub const LRA_THREECLICKS: RawWaveform = RawWaveform::new(
    ON,
    &[
        M, 0x02, 0x90, 0x0C, 0x00, 0x09, 0xD0, 0x0C, 0x00, 0x09, M, 0x0F, 0x00, 0x09, M, 0x0C,
        0x00, 0x09, M, 0x0C, 0x00, 0x09,
    ],
);

/// Every library effect, by name.
pub const EFFECTS: &[(&str, RawWaveform)] = &[
    ("lra_click", LRA_CLICK),
    ("lra_click_nobrake", LRA_CLICK_NOBRAKE),
    ("lra_doubleclick", LRA_DOUBLECLICK),
    ("lra_doubleclick_nobrake", LRA_DOUBLECLICK_NOBRAKE),
    ("lra_alert", LRA_ALERT),
    ("lra_rampup", LRA_RAMPUP),
    ("lra_rampdown", LRA_RAMPDOWN),
    ("lra_click_dumb", LRA_CLICK_DUMB),
    ("lra_click_nobrake_dumb", LRA_CLICK_NOBRAKE_DUMB),
    ("lra_doubleclick_dumb", LRA_DOUBLECLICK_DUMB),
    ("lra_doubleclick_nobrake_dumb", LRA_DOUBLECLICK_NOBRAKE_DUMB),
    ("lra_alert_dumb", LRA_ALERT_DUMB),
    ("erm_click", ERM_CLICK),
    ("erm_bump", ERM_BUMP),
    ("erm_doubleclick", ERM_DOUBLECLICK),
    ("erm_doublebump", ERM_DOUBLEBUMP),
    ("erm_alert", ERM_ALERT),
    ("erm_rampup", ERM_RAMPUP),
    ("erm_rampdown", ERM_RAMPDOWN),
    ("lra_tick", LRA_TICK),
    ("lra_softclick", LRA_SOFTCLICK),
    ("lra_softbump", LRA_SOFTBUMP),
    ("lra_softalert", LRA_SOFTALERT),
    ("lra_rampupdoubleclick", LRA_RAMPUP_DOUBLECLICK),
    ("lra_threeclicks", LRA_THREECLICKS),
];

/// Look up a library effect by name.
pub fn raw(name: &str) -> Option<RawWaveform> {
    EFFECTS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, raw)| raw)
}

/// The library's own `'static` copy of `name`, for commands that must
/// outlive the caller's buffer.
pub fn static_name(name: &str) -> Option<&'static str> {
    EFFECTS.iter().find(|(n, _)| *n == name).map(|&(n, _)| n)
}

/// Look up and decode a library effect.  `None` if the name is unknown.
pub fn effect(name: &str) -> Option<Result<Waveform, WaveformError>> {
    raw(name).map(|r| r.decode())
}
