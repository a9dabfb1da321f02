//! Integration tests: HapticCommand dispatch and direct drive.

use hapticdrive::adapters::console::parse_command;
use hapticdrive::app::commands::HapticCommand;
use hapticdrive::app::events::HapticEvent;
use hapticdrive::app::ports::ModeLines;
use hapticdrive::app::service::HapticsEngine;
use hapticdrive::command_queue::{CommandQueue, HapticRemote};
use hapticdrive::config::HapticsConfig;
use hapticdrive::mode_select::lines_for;
use hapticdrive::timing::{LraFrequency, TickLength, TickScale};
use hapticdrive::waveform::{DriveMode, Waveform};

use crate::mock_hw::{ActuatorCall, MockHardware, RecordingSink};

fn engine() -> HapticsEngine {
    HapticsEngine::new(&HapticsConfig::default())
}

#[test]
fn direct_drive_routes_and_enables() {
    let e = engine();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    e.direct_drive(DriveMode::NonResonantDriven, &mut hw, &mut sink);

    assert_eq!(
        hw.calls,
        vec![
            ActuatorCall::ModeLines(ModeLines {
                resonance_assist: false,
                lra_supply: true,
            }),
            ActuatorCall::Amp(true),
        ]
    );
    assert_eq!(sink.events, vec![HapticEvent::DirectDrive(DriveMode::NonResonantDriven)]);

    e.release(&mut hw, &mut sink);
    assert!(!hw.amp_on());
}

#[test]
fn command_play_and_effect() {
    let mut e = engine();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    let w = Waveform::from_pairs(DriveMode::ContinuousDriven, &[(10, 1)]).unwrap();
    e.handle_command(HapticCommand::Play(w), &mut hw, &mut sink).unwrap();
    e.handle_command(HapticCommand::PlayEffect("erm_bump"), &mut hw, &mut sink)
        .unwrap();

    assert_eq!(e.stats().played, 2);
}

#[test]
fn command_unknown_effect_propagates_error() {
    let mut e = engine();
    let result = e.handle_command(
        HapticCommand::PlayEffect("missing"),
        &mut MockHardware::new(),
        &mut RecordingSink::default(),
    );
    assert!(result.is_err());
}

#[test]
fn command_gate_and_amplifier() {
    let mut e = engine();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    e.handle_command(HapticCommand::SetOutputEnabled(false), &mut hw, &mut sink)
        .unwrap();
    assert!(!e.is_output_enabled());

    e.handle_command(HapticCommand::EnableAmplifier, &mut hw, &mut sink)
        .unwrap();
    assert!(hw.amp_on());
    e.handle_command(HapticCommand::DisableAmplifier, &mut hw, &mut sink)
        .unwrap();
    assert!(!hw.amp_on());

    assert_eq!(
        sink.events,
        vec![
            HapticEvent::OutputGateChanged(false),
            HapticEvent::AmplifierForced(true),
            HapticEvent::AmplifierForced(false),
        ]
    );
}

#[test]
fn command_direct_drive_and_tick_scale() {
    let mut e = engine();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    e.handle_command(
        HapticCommand::DirectDrive(DriveMode::ContinuousDriven),
        &mut hw,
        &mut sink,
    )
    .unwrap();
    assert_eq!(
        hw.calls[0],
        ActuatorCall::ModeLines(lines_for(DriveMode::ContinuousDriven))
    );

    let scale = TickScale::new(TickLength(10), TickLength(5));
    e.handle_command(HapticCommand::SetTickScale(scale), &mut hw, &mut sink)
        .unwrap();
    assert_eq!(e.tick_scale(), scale);
}

#[test]
fn command_play_at_frequency_restores_scale() {
    let mut e = engine();
    let before = e.tick_scale();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    let w = Waveform::from_pairs(DriveMode::NonResonantDriven, &[(200, 1)]).unwrap();
    e.handle_command(
        HapticCommand::PlayAtFrequency(w, LraFrequency::Hz210),
        &mut hw,
        &mut sink,
    )
    .unwrap();
    e.handle_command(
        HapticCommand::PlayEffectAt("lra_click_dumb", LraFrequency::Hz160),
        &mut hw,
        &mut sink,
    )
    .unwrap();

    let nr: Vec<TickLength> = hw
        .calls
        .iter()
        .filter_map(|c| match *c {
            ActuatorCall::Delay { tick, .. } => Some(tick),
            _ => None,
        })
        .collect();
    assert_eq!(nr[..2], [LraFrequency::Hz210.half_period(); 2]);
    assert!(nr[2..].iter().all(|t| *t == LraFrequency::Hz160.half_period()));
    assert_eq!(e.tick_scale(), before);
    assert_eq!(e.stats().played, 2);
}

// ── Queue → engine ────────────────────────────────────────────

#[test]
fn queued_commands_reach_engine() {
    static QUEUE: CommandQueue = CommandQueue::new();
    let mut e = engine();
    let remote = HapticRemote::new(e.gate(), &QUEUE);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    for line in ["play erm_click", "wave erm 90 2", "amp on"] {
        assert!(remote.submit(parse_command(line).unwrap()));
    }
    QUEUE.drain(|cmd| e.handle_command(cmd, &mut hw, &mut sink).unwrap());

    assert_eq!(e.stats().played, 2);
    assert!(hw.amp_on());
    assert!(QUEUE.pop().is_none());
}

#[test]
fn remote_gate_is_the_engine_gate() {
    static QUEUE: CommandQueue = CommandQueue::new();
    let mut e = engine();
    let remote = HapticRemote::new(e.gate(), &QUEUE);

    remote.submit(HapticCommand::SetOutputEnabled(false));
    assert!(!e.is_output_enabled());

    remote.submit(HapticCommand::PlayEffect("erm_click"));
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();
    QUEUE.drain(|cmd| e.handle_command(cmd, &mut hw, &mut sink).unwrap());

    assert!(hw.calls.is_empty());
    assert_eq!(e.stats().suppressed, 1);
}
