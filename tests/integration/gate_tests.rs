//! Integration tests: output gate behaviour around playback.

use std::sync::Arc;

use hapticdrive::app::events::HapticEvent;
use hapticdrive::app::service::{HapticsEngine, Playback};
use hapticdrive::config::HapticsConfig;
use hapticdrive::gate::OutputGate;
use hapticdrive::waveform::{DriveMode, Waveform, library};

use crate::mock_hw::{ActuatorCall, MockHardware, RecordingSink};

fn click() -> Waveform {
    library::effect("lra_click").unwrap().unwrap()
}

#[test]
fn closed_gate_writes_nothing() {
    let mut engine = HapticsEngine::new(&HapticsConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    engine.set_output_enabled(false, &mut sink);
    let out = engine.send_waveform(&click(), &mut hw, &mut sink);

    assert_eq!(out, Playback::Suppressed);
    assert!(hw.calls.is_empty());
    assert_eq!(engine.stats().suppressed, 1);
    assert_eq!(
        sink.events,
        vec![
            HapticEvent::OutputGateChanged(false),
            HapticEvent::PlaybackSuppressed {
                mode: DriveMode::ResonantDriven,
            },
        ]
    );
}

#[test]
fn reopened_gate_behaves_as_never_closed() {
    let w = click();

    let mut baseline_hw = MockHardware::new();
    HapticsEngine::new(&HapticsConfig::default()).send_waveform(
        &w,
        &mut baseline_hw,
        &mut RecordingSink::default(),
    );

    let mut engine = HapticsEngine::new(&HapticsConfig::default());
    let mut sink = RecordingSink::default();
    engine.set_output_enabled(false, &mut sink);
    engine.send_waveform(&w, &mut MockHardware::new(), &mut sink);
    engine.set_output_enabled(true, &mut sink);

    let mut hw = MockHardware::new();
    engine.send_waveform(&w, &mut hw, &mut sink);

    assert_eq!(hw.calls, baseline_hw.calls);
}

#[test]
fn closing_gate_mid_waveform_does_not_cut_playback() {
    let engine_config = HapticsConfig::default();
    let mut engine = HapticsEngine::new(&engine_config);
    let w = Waveform::from_pairs(
        DriveMode::ContinuousDriven,
        &[(0xFF, 2), (0xB4, 2), (0x00, 2)],
    )
    .unwrap();

    // Gate closes after the first hold, from "another task".
    let mut hw = MockHardware::closing_gate_after(1, engine.gate());
    let mut sink = RecordingSink::default();
    let out = engine.send_waveform(&w, &mut hw, &mut sink);

    assert!(matches!(out, Playback::Played(_)));
    assert_eq!(hw.duty_holds(), vec![(0xFF, 2), (0xB4, 2), (0x00, 2)]);
    // Session opened with the gate open is always closed.
    assert_eq!(
        hw.calls[hw.calls.len() - 3..],
        [ActuatorCall::Amp(false), ActuatorCall::Duty(0), ActuatorCall::PwmStop]
    );
    assert!(!engine.is_output_enabled());

    // The next request sees the closed gate.
    let mut hw2 = MockHardware::new();
    assert_eq!(engine.send_waveform(&w, &mut hw2, &mut sink), Playback::Suppressed);
    assert!(hw2.calls.is_empty());
}

#[test]
fn gate_handle_from_other_thread_suppresses_next_playback() {
    let mut engine = HapticsEngine::new(&HapticsConfig::default());
    let gate: Arc<OutputGate> = engine.gate();

    std::thread::spawn(move || {
        gate.set_enabled(false);
    })
    .join()
    .unwrap();

    let mut hw = MockHardware::new();
    let out = engine.send_waveform(&click(), &mut hw, &mut RecordingSink::default());
    assert_eq!(out, Playback::Suppressed);
}

#[test]
fn redundant_gate_writes_emit_no_event() {
    let engine = HapticsEngine::new(&HapticsConfig::default());
    let mut sink = RecordingSink::default();
    engine.set_output_enabled(true, &mut sink);
    assert!(sink.events.is_empty());
}

#[test]
fn gate_does_not_block_direct_amplifier_control() {
    let engine = HapticsEngine::new(&HapticsConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();
    engine.set_output_enabled(false, &mut sink);

    engine.enable_amplifier(&mut hw, &mut sink);
    assert!(hw.amp_on());
    engine.disable_amplifier(&mut hw, &mut sink);
    assert!(!hw.amp_on());
}
