//! Tick lengths and the per-mode tick scale.
//!
//! A tick is expressed in counts of the tick timer's input clock, the same
//! unit the reference board loads into its compare register.  Converting to
//! wall-clock time needs the clock rate, which adapters take from
//! [`HapticsConfig::timer_clock_hz`](crate::config::HapticsConfig).
//!
//! | Tick          | Used by                               | Reference length |
//! |---------------|---------------------------------------|------------------|
//! | resonant      | resonant + continuous holds           | 43 242 counts ≈ 5.4 ms |
//! | non-resonant  | each half of a synthesized drive cycle | 21 621 counts ≈ 2.7 ms |

use core::time::Duration;

use serde::{Deserialize, Serialize};

/// Length of one tick, in timer clock counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TickLength(pub u32);

impl TickLength {
    pub const fn counts(self) -> u32 {
        self.0
    }

    /// Wall-clock length of `ticks` ticks at `clock_hz`.
    pub fn span(self, ticks: u32, clock_hz: u32) -> Duration {
        if clock_hz == 0 {
            return Duration::ZERO;
        }
        let counts = u64::from(self.0) * u64::from(ticks);
        let nanos = u128::from(counts) * 1_000_000_000 / u128::from(clock_hz);
        Duration::from_nanos(nanos as u64)
    }

    /// Wall-clock length of a single tick at `clock_hz`.
    pub fn as_duration(self, clock_hz: u32) -> Duration {
        self.span(1, clock_hz)
    }
}

/// The two tick lengths the interpreter chooses between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickScale {
    /// Hold unit for resonance-assisted and continuous drive.
    pub resonant: TickLength,
    /// Half-period of the synthesized drive in non-resonant mode.
    pub non_resonant: TickLength,
}

impl TickScale {
    /// Reference relationship: resonant = 2 × non-resonant.
    pub const REFERENCE_MULTIPLIER: u32 = 2;

    pub const fn new(resonant: TickLength, non_resonant: TickLength) -> Self {
        Self {
            resonant,
            non_resonant,
        }
    }

    /// Derive both ticks from the non-resonant base tick.
    pub const fn from_base(non_resonant: TickLength, multiplier: u32) -> Self {
        Self {
            resonant: TickLength(non_resonant.0.saturating_mul(multiplier)),
            non_resonant,
        }
    }

    /// Same resonant tick, different non-resonant tick.
    pub const fn with_non_resonant(self, non_resonant: TickLength) -> Self {
        Self {
            resonant: self.resonant,
            non_resonant,
        }
    }
}

impl Default for TickScale {
    fn default() -> Self {
        Self::from_base(
            LraFrequency::default().half_period(),
            Self::REFERENCE_MULTIPLIER,
        )
    }
}

/// Off-resonance drive frequencies supported by the tick table.
///
/// Each entry maps to the half-period of the drive frequency in counts of the
/// 8 MHz reference timer clock.  Selecting the actuator's resonant frequency
/// here is what makes non-resonant (software-synthesized) drive effective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LraFrequency {
    Hz145,
    Hz150,
    Hz155,
    Hz160,
    Hz165,
    Hz170,
    Hz175,
    Hz180,
    #[default]
    Hz185,
    Hz190,
    Hz195,
    Hz200,
    Hz205,
    Hz210,
    Hz215,
    Hz220,
}

impl LraFrequency {
    pub const ALL: [Self; 16] = [
        Self::Hz145,
        Self::Hz150,
        Self::Hz155,
        Self::Hz160,
        Self::Hz165,
        Self::Hz170,
        Self::Hz175,
        Self::Hz180,
        Self::Hz185,
        Self::Hz190,
        Self::Hz195,
        Self::Hz200,
        Self::Hz205,
        Self::Hz210,
        Self::Hz215,
        Self::Hz220,
    ];

    pub const fn hz(self) -> u32 {
        match self {
            Self::Hz145 => 145,
            Self::Hz150 => 150,
            Self::Hz155 => 155,
            Self::Hz160 => 160,
            Self::Hz165 => 165,
            Self::Hz170 => 170,
            Self::Hz175 => 175,
            Self::Hz180 => 180,
            Self::Hz185 => 185,
            Self::Hz190 => 190,
            Self::Hz195 => 195,
            Self::Hz200 => 200,
            Self::Hz205 => 205,
            Self::Hz210 => 210,
            Self::Hz215 => 215,
            Self::Hz220 => 220,
        }
    }

    /// Half-period in 8 MHz timer counts (the non-resonant tick).
    pub const fn half_period(self) -> TickLength {
        TickLength(match self {
            Self::Hz145 => 27_586,
            Self::Hz150 => 26_667,
            Self::Hz155 => 25_806,
            Self::Hz160 => 25_000,
            Self::Hz165 => 24_242,
            Self::Hz170 => 23_529,
            Self::Hz175 => 22_857,
            Self::Hz180 => 22_222,
            Self::Hz185 => 21_621,
            Self::Hz190 => 21_052,
            Self::Hz195 => 20_513,
            Self::Hz200 => 20_000,
            Self::Hz205 => 19_512,
            Self::Hz210 => 19_048,
            Self::Hz215 => 18_605,
            Self::Hz220 => 18_182,
        })
    }

    /// Exact table entry for `hz`, if there is one.
    pub fn from_hz(hz: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.hz() == hz)
    }

    /// Nearest table entry to an arbitrary frequency.
    pub fn nearest(hz: u32) -> Self {
        Self::ALL
            .iter()
            .copied()
            .min_by_key(|f| f.hz().abs_diff(hz))
            .unwrap_or_default()
    }
}
