//! Fuzz target: JSON `WaveformSpec` → `Waveform`
//!
//! Arbitrary text is parsed as a waveform data file.  Parsing and
//! conversion may fail but must never panic.
//!
//! cargo fuzz run fuzz_waveform_spec

#![no_main]

use hapticdrive::waveform::{Waveform, WaveformSpec};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(spec) = serde_json::from_slice::<WaveformSpec>(data) else {
        return;
    };
    if let Ok(w) = Waveform::try_from(&spec) {
        assert_eq!(w.len(), spec.steps.len());
        assert_eq!(WaveformSpec::from(&w).steps, spec.steps);
    }
});
