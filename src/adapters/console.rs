//! Line-oriented serial console that feeds [`HapticRemote`].
//!
//! | Line                              | Command                          |
//! |-----------------------------------|----------------------------------|
//! | `play <effect>`                   | `PlayEffect`                     |
//! | `play <effect> <hz>`              | `PlayEffectAt` (table frequency) |
//! | `wave <mode> <a> <h> [<a> <h>..]` | `Play`                           |
//! | `gate on` / `gate off`            | `SetOutputEnabled`               |
//! | `amp on` / `amp off`              | `EnableAmplifier` / `DisableAmplifier` |
//! | `drive <mode>`                    | `DirectDrive`                    |
//!
//! `<mode>` is `resonant`, `nonresonant` or `erm`.

use core::fmt;
use std::io::BufRead;

use log::{info, warn};

use crate::app::commands::HapticCommand;
use crate::command_queue::HapticRemote;
use crate::timing::LraFrequency;
use crate::waveform::{library, DriveMode, Waveform, WaveformError, MAX_STEPS};

/// Why a console line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    UnknownVerb,
    MissingArgument,
    BadArgument,
    UnknownEffect,
    /// Frequency is not one of the drive table entries.
    BadFrequency(u32),
    Waveform(WaveformError),
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownVerb => write!(f, "unknown command"),
            Self::MissingArgument => write!(f, "missing argument"),
            Self::BadArgument => write!(f, "bad argument"),
            Self::UnknownEffect => write!(f, "unknown effect"),
            Self::BadFrequency(hz) => write!(f, "{} Hz is not a table frequency (145-220, step 5)", hz),
            Self::Waveform(e) => write!(f, "invalid waveform: {}", e),
        }
    }
}

impl From<WaveformError> for ConsoleError {
    fn from(e: WaveformError) -> Self {
        Self::Waveform(e)
    }
}

fn parse_mode(word: &str) -> Result<DriveMode, ConsoleError> {
    match word {
        "resonant" => Ok(DriveMode::ResonantDriven),
        "nonresonant" => Ok(DriveMode::NonResonantDriven),
        "erm" => Ok(DriveMode::ContinuousDriven),
        _ => Err(ConsoleError::BadArgument),
    }
}

fn parse_switch(word: Option<&str>) -> Result<bool, ConsoleError> {
    match word {
        Some("on") => Ok(true),
        Some("off") => Ok(false),
        Some(_) => Err(ConsoleError::BadArgument),
        None => Err(ConsoleError::MissingArgument),
    }
}

/// Parse one console line into a command.
pub fn parse_command(line: &str) -> Result<HapticCommand, ConsoleError> {
    let mut words = line.split_whitespace();
    match words.next() {
        Some("play") => {
            let name = words.next().ok_or(ConsoleError::MissingArgument)?;
            let name = library::static_name(name).ok_or(ConsoleError::UnknownEffect)?;
            match words.next() {
                None => Ok(HapticCommand::PlayEffect(name)),
                Some(hz) => {
                    let hz: u32 = hz.parse().map_err(|_| ConsoleError::BadArgument)?;
                    let freq = LraFrequency::from_hz(hz).ok_or(ConsoleError::BadFrequency(hz))?;
                    Ok(HapticCommand::PlayEffectAt(name, freq))
                }
            }
        }
        Some("wave") => {
            let mode = parse_mode(words.next().ok_or(ConsoleError::MissingArgument)?)?;
            let mut data: heapless::Vec<u8, { MAX_STEPS * 2 }> = heapless::Vec::new();
            for word in words {
                let byte: u8 = word.parse().map_err(|_| ConsoleError::BadArgument)?;
                data.push(byte).map_err(|_| WaveformError::TooManySteps {
                    count: MAX_STEPS + 1,
                })?;
            }
            Ok(HapticCommand::Play(Waveform::from_bytes(mode, &data)?))
        }
        Some("gate") => Ok(HapticCommand::SetOutputEnabled(parse_switch(words.next())?)),
        Some("amp") => Ok(if parse_switch(words.next())? {
            HapticCommand::EnableAmplifier
        } else {
            HapticCommand::DisableAmplifier
        }),
        Some("drive") => Ok(HapticCommand::DirectDrive(parse_mode(
            words.next().ok_or(ConsoleError::MissingArgument)?,
        )?)),
        _ => Err(ConsoleError::UnknownVerb),
    }
}

/// Read lines from `input` until it ends, submitting each parsed command.
pub fn run(input: impl BufRead, remote: &HapticRemote) {
    info!("console: ready");
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("console: read failed ({}), stopping", e);
                return;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_command(line) {
            Ok(cmd) => {
                if !remote.submit(cmd) {
                    warn!("console: busy, '{}' dropped", line);
                }
            }
            Err(e) => warn!("console: '{}': {}", line, e),
        }
    }
    info!("console: input closed");
}
