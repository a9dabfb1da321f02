//! Integration tests: HapticsEngine → mode select → PWM session → interpreter.

use hapticdrive::app::events::HapticEvent;
use hapticdrive::app::ports::ModeLines;
use hapticdrive::app::service::{HapticsEngine, Playback};
use hapticdrive::config::HapticsConfig;
use hapticdrive::timing::{LraFrequency, TickLength, TickScale};
use hapticdrive::waveform::{DriveMode, Waveform, library};

use crate::mock_hw::{ActuatorCall, MockHardware, RecordingSink};

use crate::mock_hw::ActuatorCall::{Amp, Duty, PwmStart, PwmStop};

const RES: TickLength = TickLength(43_242);
const NON_RES: TickLength = TickLength(21_621);

fn engine() -> HapticsEngine {
    HapticsEngine::new(&HapticsConfig::default())
}

fn delay(ticks: u32, tick: TickLength) -> ActuatorCall {
    ActuatorCall::Delay { ticks, tick }
}

const SESSION_STOP: [ActuatorCall; 3] = [Amp(false), Duty(0), PwmStop];

// ── Reference scenarios ───────────────────────────────────────

#[test]
fn resonant_click_then_brake() {
    let w = Waveform::from_pairs(DriveMode::ResonantDriven, &[(240, 5), (0x80, 7)]).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    let out = engine().send_waveform(&w, &mut hw, &mut sink);

    let mut expected = vec![
        ActuatorCall::ModeLines(ModeLines {
            resonance_assist: true,
            lra_supply: true,
        }),
        PwmStart(255),
        Amp(true),
        Amp(true),
        Duty(240),
        delay(5, RES),
        Amp(false),
        delay(7, RES),
    ];
    expected.extend(SESSION_STOP);
    assert_eq!(hw.calls, expected);
    assert!(matches!(out, Playback::Played(r) if r.resonant_ticks == 12));
}

#[test]
fn non_resonant_synthesizes_drive_cycle() {
    let w = Waveform::from_pairs(DriveMode::NonResonantDriven, &[(216, 12), (128, 2)]).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    engine().send_waveform(&w, &mut hw, &mut sink);

    let mut expected = vec![
        ActuatorCall::ModeLines(ModeLines {
            resonance_assist: false,
            lra_supply: true,
        }),
        PwmStart(255),
        Amp(true),
        Amp(true),
    ];
    for _ in 0..12 {
        expected.extend([Duty(216), delay(1, NON_RES), Duty(39), delay(1, NON_RES)]);
    }
    expected.push(Amp(false));
    for _ in 0..2 {
        expected.extend([Duty(128), delay(1, NON_RES), Duty(127), delay(1, NON_RES)]);
    }
    expected.extend(SESSION_STOP);
    assert_eq!(hw.calls, expected);
}

#[test]
fn continuous_emits_steps_verbatim() {
    let pairs = [(0xFF, 6), (0xB4, 3), (0x00, 4), (0x80, 12)];
    let w = Waveform::from_pairs(DriveMode::ContinuousDriven, &pairs).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    engine().send_waveform(&w, &mut hw, &mut sink);

    let holds: Vec<(u8, u32)> = pairs.iter().map(|&(a, d)| (a, u32::from(d))).collect();
    assert_eq!(hw.duty_holds(), holds);
    assert_eq!(
        hw.calls[0],
        ActuatorCall::ModeLines(ModeLines {
            resonance_assist: false,
            lra_supply: false,
        })
    );
    assert!(
        hw.calls
            .iter()
            .filter(|c| matches!(c, ActuatorCall::Delay { .. }))
            .all(|c| matches!(c, ActuatorCall::Delay { tick, .. } if *tick == RES))
    );
}

// ── Session pairing ───────────────────────────────────────────

#[test]
fn empty_waveform_still_opens_and_closes_session() {
    let w = Waveform::from_bytes(DriveMode::ResonantDriven, &[]).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();
    let mut e = engine();

    e.send_waveform(&w, &mut hw, &mut sink);

    assert_eq!(hw.calls.len(), 1 + 2 + 3);
    assert!(!hw.amp_on());
    assert!(!e.is_session_running());
}

#[test]
fn session_ends_with_amplifier_off() {
    let w = library::effect("lra_alert").unwrap().unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    engine().send_waveform(&w, &mut hw, &mut sink);

    assert_eq!(hw.calls[hw.calls.len() - 3..], SESSION_STOP);
}

// ── Tick scale ────────────────────────────────────────────────

#[test]
fn custom_tick_scale_is_used() {
    let scale = TickScale::new(TickLength(1_000), TickLength(250));
    let w = Waveform::from_pairs(DriveMode::NonResonantDriven, &[(200, 1)]).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();
    let mut e = engine();
    e.set_tick_scale(scale);

    e.send_waveform(&w, &mut hw, &mut sink);

    assert!(hw.calls.contains(&delay(1, TickLength(250))));
}

#[test]
fn init_haptics_doubles_base_tick() {
    let mut e = engine();
    e.init_haptics(LraFrequency::Hz200);
    assert_eq!(e.tick_scale().non_resonant, TickLength(20_000));
    assert_eq!(e.tick_scale().resonant, TickLength(40_000));
}

// ── Drive frequency override ──────────────────────────────────

#[test]
fn play_at_frequency_overrides_non_resonant_tick_only() {
    let w = Waveform::from_pairs(DriveMode::NonResonantDriven, &[(216, 2)]).unwrap();
    let mut e = engine();
    let before = e.tick_scale();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    let out = e.send_waveform_at(&w, LraFrequency::Hz155, &mut hw, &mut sink);

    let Playback::Played(report) = out else {
        panic!("expected playback, got {out:?}");
    };
    let tick = LraFrequency::Hz155.half_period();
    assert_eq!(report.scale.non_resonant, tick);
    assert_eq!(report.scale.resonant, RES);
    let delays: Vec<_> = hw
        .calls
        .iter()
        .filter_map(|c| match *c {
            ActuatorCall::Delay { ticks, tick } => Some((ticks, tick)),
            _ => None,
        })
        .collect();
    assert_eq!(delays, vec![(1, tick); 4]);
    assert_eq!(e.tick_scale(), before);
}

#[test]
fn play_at_frequency_restores_scale_when_suppressed() {
    let w = Waveform::from_pairs(DriveMode::NonResonantDriven, &[(216, 2)]).unwrap();
    let mut e = engine();
    e.set_tick_scale(TickScale::new(TickLength(900), TickLength(300)));
    let mut sink = RecordingSink::default();
    e.set_output_enabled(false, &mut sink);
    let mut hw = MockHardware::new();

    let out = e.send_waveform_at(&w, LraFrequency::Hz220, &mut hw, &mut sink);

    assert_eq!(out, Playback::Suppressed);
    assert!(hw.calls.is_empty());
    assert_eq!(e.tick_scale(), TickScale::new(TickLength(900), TickLength(300)));
}

#[test]
fn resonant_effect_at_frequency_keeps_resonant_holds() {
    let mut e = engine();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    e.play_effect_at("lra_click", LraFrequency::Hz145, &mut hw, &mut sink)
        .unwrap();

    assert_eq!(hw.duty_holds(), vec![(0xF0, 5), (0x00, 7)]);
    assert!(hw
        .calls
        .iter()
        .all(|c| !matches!(c, ActuatorCall::Delay { tick, .. } if *tick != RES)));
    assert_eq!(e.tick_scale().non_resonant, NON_RES);
}

// ── Library + events ──────────────────────────────────────────

#[test]
fn every_library_effect_plays() {
    let mut e = engine();
    for (name, _) in library::EFFECTS {
        let mut hw = MockHardware::new();
        let mut sink = RecordingSink::default();
        let out = e.play_effect(name, &mut hw, &mut sink).unwrap();
        assert!(matches!(out, Playback::Played(_)), "{name}");
        assert!(!hw.amp_on(), "{name} left amplifier on");
    }
    assert_eq!(e.stats().played as usize, library::EFFECTS.len());
}

#[test]
fn unknown_effect_is_an_error() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();
    let err = engine().play_effect("no_such_effect", &mut hw, &mut sink);
    assert_eq!(err, Err(hapticdrive::Error::UnknownEffect));
    assert!(hw.calls.is_empty());
}

#[test]
fn playback_emits_start_and_finish() {
    let w = library::effect("erm_click").unwrap().unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    let out = engine().send_waveform(&w, &mut hw, &mut sink);

    let Playback::Played(report) = out else {
        panic!("expected playback");
    };
    assert_eq!(
        sink.events,
        vec![
            HapticEvent::PlaybackStarted {
                mode: DriveMode::ContinuousDriven,
                steps: 2,
            },
            HapticEvent::PlaybackFinished(report),
        ]
    );
    assert_eq!(report.resonant_ticks, 7 + 4);
}
