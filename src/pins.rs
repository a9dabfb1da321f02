//! GPIO / peripheral pin assignments for the haptics board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Haptic driver IC (DRV2603-class single-ended PWM input)
// ---------------------------------------------------------------------------

/// LEDC PWM output into the driver's PWM input.
pub const PWM_GPIO: i32 = 4;
/// Digital output: driver enable (amplifier on, active HIGH).
pub const AMP_ENABLE_GPIO: i32 = 5;
/// Digital output: HIGH = LRA auto-resonance mode, LOW = ERM (open-loop) mode.
pub const MODE_SELECT_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Actuator load switch
// ---------------------------------------------------------------------------

/// Digital output: HIGH = LRA supply path, LOW = ERM supply path.
pub const LOAD_SWITCH_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// Duty period in counts.  Amplitude bytes map 1:1 onto this range.
pub const PWM_PERIOD: u8 = 255;
/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
