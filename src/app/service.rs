//! Haptics engine: the hexagonal core.
//!
//! [`HapticsEngine`] owns the output gate, the tick scale and the PWM
//! session.  It exposes a hardware-agnostic API; all I/O flows through port
//! traits injected at call sites, making the engine testable with mock
//! adapters.
//!
//! ```text
//!                 ┌──────────────────────────┐ ──▶ EventSink
//!  ActuatorPort ◀─│      HapticsEngine        │
//!    TickTimer  ◀─│ gate · mode · session ·   │
//!                 │ interpreter               │
//!                 └──────────────────────────┘
//! ```
//!
//! Playback is fully blocking and not reentrant: the engine is `&mut self`
//! for every hardware-touching call, so at most one waveform is in flight
//! per engine.  Only the gate is shared (see [`HapticsEngine::gate`]).

use std::sync::Arc;

use log::{debug, info, warn};

use crate::config::HapticsConfig;
use crate::error::{Error, Result};
use crate::gate::OutputGate;
use crate::interpreter::{self, PlaybackReport};
use crate::mode_select;
use crate::pwm_session::PwmSession;
use crate::timing::{LraFrequency, TickScale};
use crate::waveform::{library, DriveMode, Waveform};

use super::commands::HapticCommand;
use super::events::HapticEvent;
use super::ports::{ActuatorPort, EventSink, TickTimer};

/// Outcome of a playback request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Played(PlaybackReport),
    /// Gate was closed at entry; nothing was written.
    Suppressed,
}

/// Cumulative playback counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackStats {
    pub played: u32,
    pub suppressed: u32,
    pub last: Option<PlaybackReport>,
}

// ───────────────────────────────────────────────────────────────
// HapticsEngine
// ───────────────────────────────────────────────────────────────

pub struct HapticsEngine {
    gate: Arc<OutputGate>,
    scale: TickScale,
    multiplier: u32,
    session: PwmSession,
    stats: PlaybackStats,
}

impl HapticsEngine {
    /// Construct the engine from a validated configuration.
    pub fn new(config: &HapticsConfig) -> Self {
        Self {
            gate: Arc::new(OutputGate::new(config.output_enabled_at_boot)),
            scale: config.tick_scale(),
            multiplier: config.resonant_tick_multiplier,
            session: PwmSession::new(),
            stats: PlaybackStats::default(),
        }
    }

    // ── Timing ────────────────────────────────────────────────

    /// Derive the tick scale from the drive frequency: its half-period is
    /// the non-resonant tick and the resonant tick is the configured
    /// multiple of that.
    pub fn init_haptics(&mut self, frequency: LraFrequency) {
        self.scale = TickScale::from_base(frequency.half_period(), self.multiplier);
        info!(
            "haptics: ticks resonant={} non_resonant={} counts",
            self.scale.resonant.counts(),
            self.scale.non_resonant.counts()
        );
    }

    pub fn set_tick_scale(&mut self, scale: TickScale) {
        self.scale = scale;
    }

    pub fn tick_scale(&self) -> TickScale {
        self.scale
    }

    // ── Playback ──────────────────────────────────────────────

    /// Play `waveform` to completion.
    ///
    /// The gate is sampled once here.  If it is closed nothing is written to
    /// `hw`; if it is open the waveform runs to the end even if the gate is
    /// closed meanwhile, and the session is always stopped.
    pub fn send_waveform(
        &mut self,
        waveform: &Waveform,
        hw: &mut (impl ActuatorPort + TickTimer),
        sink: &mut impl EventSink,
    ) -> Playback {
        let gate_open = self.gate.is_enabled();
        if !gate_open {
            self.stats.suppressed += 1;
            debug!("haptics: gate closed, dropping {} waveform", waveform.mode());
            sink.emit(&HapticEvent::PlaybackSuppressed {
                mode: waveform.mode(),
            });
            return Playback::Suppressed;
        }

        sink.emit(&HapticEvent::PlaybackStarted {
            mode: waveform.mode(),
            steps: waveform.len(),
        });

        mode_select::set_hardware_mode(waveform.mode(), hw);
        self.session.start(gate_open, hw);
        let report = interpreter::play(waveform, &self.scale, hw);
        self.session.stop(gate_open, hw);

        self.stats.played += 1;
        self.stats.last = Some(report);
        debug!(
            "haptics: played {} steps ({} resonant + {} non-resonant ticks)",
            report.steps, report.resonant_ticks, report.non_resonant_ticks
        );
        sink.emit(&HapticEvent::PlaybackFinished(report));
        Playback::Played(report)
    }

    /// Play `waveform` with the non-resonant tick set to the half-period of
    /// `frequency`.  The resonant tick is untouched and the previous scale is
    /// restored afterwards.
    pub fn send_waveform_at(
        &mut self,
        waveform: &Waveform,
        frequency: LraFrequency,
        hw: &mut (impl ActuatorPort + TickTimer),
        sink: &mut impl EventSink,
    ) -> Playback {
        let saved = self.scale;
        self.scale = saved.with_non_resonant(frequency.half_period());
        debug!("haptics: drive override {} Hz", frequency.hz());
        let outcome = self.send_waveform(waveform, hw, sink);
        self.scale = saved;
        outcome
    }

    /// Play a named library effect.
    pub fn play_effect(
        &mut self,
        name: &str,
        hw: &mut (impl ActuatorPort + TickTimer),
        sink: &mut impl EventSink,
    ) -> Result<Playback> {
        let Some(effect) = library::effect(name) else {
            warn!("haptics: unknown effect '{}'", name);
            return Err(Error::UnknownEffect);
        };
        let waveform = effect?;
        Ok(self.send_waveform(&waveform, hw, sink))
    }

    /// Play a named library effect at a chosen drive frequency.  See
    /// [`send_waveform_at`](Self::send_waveform_at).
    pub fn play_effect_at(
        &mut self,
        name: &str,
        frequency: LraFrequency,
        hw: &mut (impl ActuatorPort + TickTimer),
        sink: &mut impl EventSink,
    ) -> Result<Playback> {
        let Some(effect) = library::effect(name) else {
            warn!("haptics: unknown effect '{}'", name);
            return Err(Error::UnknownEffect);
        };
        let waveform = effect?;
        Ok(self.send_waveform_at(&waveform, frequency, hw, sink))
    }

    // ── Output gate ───────────────────────────────────────────

    pub fn set_output_enabled(&self, enabled: bool, sink: &mut impl EventSink) {
        let was = self.gate.set_enabled(enabled);
        if was != enabled {
            sink.emit(&HapticEvent::OutputGateChanged(enabled));
        }
    }

    pub fn is_output_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    /// Shared handle to the gate, for a button task or ISR that must flip
    /// it while playback blocks this engine.
    pub fn gate(&self) -> Arc<OutputGate> {
        Arc::clone(&self.gate)
    }

    // ── Direct hardware control ───────────────────────────────

    pub fn enable_amplifier(&self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.set_amplifier(true);
        sink.emit(&HapticEvent::AmplifierForced(true));
    }

    pub fn disable_amplifier(&self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.set_amplifier(false);
        sink.emit(&HapticEvent::AmplifierForced(false));
    }

    /// Route the selector lines for `mode` without playing anything.
    pub fn set_hardware_mode(&self, mode: DriveMode, hw: &mut impl ActuatorPort) {
        mode_select::set_hardware_mode(mode, hw);
    }

    /// Route for `mode` and assert the amplifier so an external PWM source
    /// drives the actuator.  Undo with [`release`](Self::release).
    pub fn direct_drive(
        &self,
        mode: DriveMode,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        mode_select::set_hardware_mode(mode, hw);
        hw.set_amplifier(true);
        info!("haptics: direct drive ({})", mode);
        sink.emit(&HapticEvent::DirectDrive(mode));
    }

    /// End direct drive.
    pub fn release(&self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.disable_amplifier(hw, sink);
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command.
    pub fn handle_command(
        &mut self,
        cmd: HapticCommand,
        hw: &mut (impl ActuatorPort + TickTimer),
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match cmd {
            HapticCommand::Play(waveform) => {
                self.send_waveform(&waveform, hw, sink);
            }
            HapticCommand::PlayEffect(name) => {
                self.play_effect(name, hw, sink)?;
            }
            HapticCommand::PlayAtFrequency(waveform, frequency) => {
                self.send_waveform_at(&waveform, frequency, hw, sink);
            }
            HapticCommand::PlayEffectAt(name, frequency) => {
                self.play_effect_at(name, frequency, hw, sink)?;
            }
            HapticCommand::SetOutputEnabled(enabled) => self.set_output_enabled(enabled, sink),
            HapticCommand::EnableAmplifier => self.enable_amplifier(hw, sink),
            HapticCommand::DisableAmplifier => self.disable_amplifier(hw, sink),
            HapticCommand::DirectDrive(mode) => self.direct_drive(mode, hw, sink),
            HapticCommand::SetTickScale(scale) => self.set_tick_scale(scale),
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn stats(&self) -> PlaybackStats {
        self.stats
    }

    /// Whether a PWM session is open.  Only true while `send_waveform` runs.
    pub fn is_session_running(&self) -> bool {
        self.session.is_running()
    }
}
