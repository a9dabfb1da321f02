//! Waveform scripts: a drive mode plus ordered (amplitude, hold) steps.
//!
//! Waveforms are validated once, at construction, and immutable afterwards.
//! The brake sentinel (`0x80`) is resolved here rather than during playback:
//! each step is stored as a tagged [`StepOp`], so the interpreter never has
//! to re-check a magic value and a continuous-drive waveform can never
//! accidentally brake.
//!
//! ```text
//!   flat bytes:  [amp0, hold0, amp1, hold1, ...]
//!                    │     │
//!                    ▼     ▼
//!   Step { op: Drive(amp0) | Brake, hold: hold0 }
//! ```

pub mod library;

use core::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

/// Amplitude value that means "disable drive for this step" in modes with a
/// brake/disable state.
pub const BRAKE_SENTINEL: u8 = 0x80;

/// Maximum number of steps in one waveform (a one-byte length field holds at
/// most 127 complete pairs).
pub const MAX_STEPS: usize = 127;

// ───────────────────────────────────────────────────────────────
// Drive mode
// ───────────────────────────────────────────────────────────────

/// Actuator drive mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum DriveMode {
    /// LRA with the driver's auto-resonance tracking enabled.
    ResonantDriven = 0,
    /// LRA with auto-resonance off; software synthesizes the drive cycle.
    NonResonantDriven = 1,
    /// ERM (eccentric rotating mass) motor, duty sets speed directly.
    ContinuousDriven = 2,
}

impl DriveMode {
    /// Decode a raw mode byte, `None` if unrecognized.
    pub const fn try_from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::ResonantDriven),
            1 => Some(Self::NonResonantDriven),
            2 => Some(Self::ContinuousDriven),
            _ => None,
        }
    }

    /// Decode a raw mode byte, falling back to [`DriveMode::ResonantDriven`].
    pub fn from_raw(raw: u8) -> Self {
        Self::try_from_raw(raw).unwrap_or_else(|| {
            warn!("drive mode {} unrecognized, using ResonantDriven", raw);
            Self::ResonantDriven
        })
    }

    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Whether [`BRAKE_SENTINEL`] disables the amplifier in this mode.
    pub const fn has_brake(self) -> bool {
        matches!(self, Self::ResonantDriven | Self::NonResonantDriven)
    }
}

impl fmt::Display for DriveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResonantDriven => write!(f, "LRA auto-resonance on"),
            Self::NonResonantDriven => write!(f, "LRA auto-resonance off"),
            Self::ContinuousDriven => write!(f, "ERM"),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Steps
// ───────────────────────────────────────────────────────────────

/// What a step does to the actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOp {
    /// Amplifier enabled, duty register at the given level.
    Drive(u8),
    /// Amplifier disabled for the step; the actuator coasts or brakes.
    Brake,
}

impl StepOp {
    /// The amplitude byte this operation was decoded from.
    pub const fn level(self) -> u8 {
        match self {
            Self::Drive(level) => level,
            Self::Brake => BRAKE_SENTINEL,
        }
    }

    pub const fn is_brake(self) -> bool {
        matches!(self, Self::Brake)
    }
}

/// One (amplitude, hold) pair after mode-aware decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub op: StepOp,
    /// Hold duration in ticks.
    pub hold: u8,
}

impl Step {
    pub const fn decode(mode: DriveMode, amplitude: u8, hold: u8) -> Self {
        let op = if amplitude == BRAKE_SENTINEL && mode.has_brake() {
            StepOp::Brake
        } else {
            StepOp::Drive(amplitude)
        };
        Self { op, hold }
    }

    pub const fn amplitude(self) -> u8 {
        self.op.level()
    }
}

// ───────────────────────────────────────────────────────────────
// Waveform
// ───────────────────────────────────────────────────────────────

/// A validated, immutable waveform script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waveform {
    mode: DriveMode,
    steps: heapless::Vec<Step, MAX_STEPS>,
}

impl Waveform {
    /// Build from a flat `[amplitude, hold, ...]` buffer.
    pub fn from_bytes(mode: DriveMode, data: &[u8]) -> Result<Self, WaveformError> {
        if data.len() % 2 != 0 {
            return Err(WaveformError::OddLength { len: data.len() });
        }
        let count = data.len() / 2;
        if count > MAX_STEPS {
            return Err(WaveformError::TooManySteps { count });
        }
        let mut steps = heapless::Vec::new();
        for pair in data.chunks_exact(2) {
            // Capacity checked above.
            let _ = steps.push(Step::decode(mode, pair[0], pair[1]));
        }
        Ok(Self { mode, steps })
    }

    /// Build from `(amplitude, hold)` pairs.
    pub fn from_pairs(mode: DriveMode, pairs: &[(u8, u8)]) -> Result<Self, WaveformError> {
        if pairs.len() > MAX_STEPS {
            return Err(WaveformError::TooManySteps { count: pairs.len() });
        }
        let steps = pairs
            .iter()
            .map(|&(amplitude, hold)| Step::decode(mode, amplitude, hold))
            .collect();
        Ok(Self { mode, steps })
    }

    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of all step holds, in ticks of the mode's hold unit.
    pub fn total_hold(&self) -> u32 {
        self.steps.iter().map(|s| u32::from(s.hold)).sum()
    }

    /// Re-encode as a flat `[amplitude, hold, ...]` buffer.
    pub fn to_bytes(&self) -> heapless::Vec<u8, { MAX_STEPS * 2 }> {
        let mut out = heapless::Vec::new();
        for step in &self.steps {
            let _ = out.push(step.amplitude());
            let _ = out.push(step.hold);
        }
        out
    }
}

impl TryFrom<&WaveformSpec> for Waveform {
    type Error = WaveformError;

    fn try_from(spec: &WaveformSpec) -> Result<Self, Self::Error> {
        if spec.steps.len() > MAX_STEPS {
            return Err(WaveformError::TooManySteps {
                count: spec.steps.len(),
            });
        }
        let mut steps = heapless::Vec::new();
        for (index, &[amplitude, hold]) in spec.steps.iter().enumerate() {
            let amplitude = u8::try_from(amplitude).map_err(|_| WaveformError::ValueOutOfRange {
                index: index * 2,
                value: amplitude,
            })?;
            let hold = u8::try_from(hold).map_err(|_| WaveformError::ValueOutOfRange {
                index: index * 2 + 1,
                value: hold,
            })?;
            let _ = steps.push(Step::decode(spec.mode, amplitude, hold));
        }
        Ok(Self {
            mode: spec.mode,
            steps,
        })
    }
}

/// Data-file form of a waveform, e.g. `{"mode":"continuous_driven","steps":[[255,7],[0,4]]}`.
///
/// Fields are wider than a byte so out-of-range values survive
/// deserialization and are rejected by [`Waveform::try_from`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveformSpec {
    pub mode: DriveMode,
    pub steps: Vec<[u32; 2]>,
}

impl From<&Waveform> for WaveformSpec {
    fn from(w: &Waveform) -> Self {
        Self {
            mode: w.mode,
            steps: w
                .steps
                .iter()
                .map(|s| [u32::from(s.amplitude()), u32::from(s.hold)])
                .collect(),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Compile-time tables
// ───────────────────────────────────────────────────────────────

/// A waveform as stored in a constant table: raw mode byte plus flat data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawWaveform {
    pub mode: u8,
    pub data: &'static [u8],
}

impl RawWaveform {
    pub const fn new(mode: DriveMode, data: &'static [u8]) -> Self {
        Self {
            mode: mode.raw(),
            data,
        }
    }

    pub fn decode(&self) -> Result<Waveform, WaveformError> {
        Waveform::from_bytes(DriveMode::from_raw(self.mode), self.data)
    }
}

impl TryFrom<RawWaveform> for Waveform {
    type Error = WaveformError;

    fn try_from(raw: RawWaveform) -> Result<Self, Self::Error> {
        raw.decode()
    }
}

// ───────────────────────────────────────────────────────────────
// Errors
// ───────────────────────────────────────────────────────────────

/// Reasons a waveform is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveformError {
    /// Flat buffer does not hold whole (amplitude, hold) pairs.
    OddLength { len: usize },
    /// More than [`MAX_STEPS`] steps.
    TooManySteps { count: usize },
    /// A field does not fit in a byte; `index` is its flat-buffer position.
    ValueOutOfRange { index: usize, value: u32 },
}

impl fmt::Display for WaveformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OddLength { len } => write!(f, "odd data length {len}"),
            Self::TooManySteps { count } => {
                write!(f, "{count} steps exceeds maximum of {MAX_STEPS}")
            }
            Self::ValueOutOfRange { index, value } => {
                write!(f, "value {value} at byte {index} does not fit 0-255")
            }
        }
    }
}

impl core::error::Error for WaveformError {}
