//! Fuzz target: `Waveform::from_bytes`
//!
//! The first byte is taken as a raw mode selector and the rest as flat
//! (amplitude, hold) data.  Decoding must never panic and accepted
//! waveforms must re-encode to the input.
//!
//! cargo fuzz run fuzz_waveform_decode

#![no_main]

use hapticdrive::waveform::{DriveMode, MAX_STEPS, Waveform, WaveformError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&raw_mode, body)) = data.split_first() else {
        return;
    };
    let mode = DriveMode::from_raw(raw_mode);

    match Waveform::from_bytes(mode, body) {
        Ok(w) => {
            assert_eq!(w.len() * 2, body.len());
            assert!(w.len() <= MAX_STEPS);
            assert_eq!(w.to_bytes().as_slice(), body);
        }
        Err(WaveformError::OddLength { len }) => assert_eq!(len % 2, 1),
        Err(WaveformError::TooManySteps { count }) => assert!(count > MAX_STEPS),
        Err(e) => panic!("unexpected decode error: {e}"),
    }
});
