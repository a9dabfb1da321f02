//! Command queue between input tasks and the playback task.
//!
//! ```text
//! ┌─────────────┐  submit   ┌───────────────┐  drain   ┌──────────────┐
//! │ Console     │──────────▶│ CommandQueue  │─────────▶│ Main loop    │
//! │ Button task │           │ (lock-free)   │          │ HapticsEngine│
//! └─────────────┘           └───────────────┘          └──────────────┘
//!        │                                                    ▲
//!        └──────────── OutputGate (shared Arc) ───────────────┘
//! ```
//!
//! Playback blocks the main loop, so queued commands wait for the current
//! waveform to finish.  Gate changes bypass the queue and flip the shared
//! [`OutputGate`] directly, which is what lets a button close the gate while
//! a long waveform is still playing.

use std::sync::Arc;

use heapless::mpmc::MpMcQueue;
use log::{info, warn};

use crate::app::commands::HapticCommand;
use crate::gate::OutputGate;

/// Maximum number of pending commands.  Must be a power of 2.
pub const COMMAND_QUEUE_CAP: usize = 8;

/// Fixed-capacity multi-producer queue of [`HapticCommand`]s.
pub struct CommandQueue {
    inner: MpMcQueue<HapticCommand, COMMAND_QUEUE_CAP>,
}

impl CommandQueue {
    pub const fn new() -> Self {
        Self {
            inner: MpMcQueue::new(),
        }
    }

    /// Enqueue a command.  Returns `false` if the queue is full (command
    /// dropped).
    pub fn push(&self, cmd: HapticCommand) -> bool {
        match self.inner.enqueue(cmd) {
            Ok(()) => true,
            Err(_) => {
                warn!("command queue full, dropping command");
                false
            }
        }
    }

    pub fn pop(&self) -> Option<HapticCommand> {
        self.inner.dequeue()
    }

    /// Hand every pending command to `handler`, oldest first.
    pub fn drain(&self, mut handler: impl FnMut(HapticCommand)) {
        while let Some(cmd) = self.pop() {
            handler(cmd);
        }
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// The firmware's command queue, drained by the main loop.
pub static COMMANDS: CommandQueue = CommandQueue::new();

// ── Producer handle ───────────────────────────────────────────

/// Producer side handed to input tasks.
#[derive(Clone)]
pub struct HapticRemote {
    gate: Arc<OutputGate>,
    queue: &'static CommandQueue,
}

impl HapticRemote {
    /// `gate` should come from [`HapticsEngine::gate`](crate::app::service::HapticsEngine::gate).
    pub fn new(gate: Arc<OutputGate>, queue: &'static CommandQueue) -> Self {
        Self { gate, queue }
    }

    /// Submit a command.  `SetOutputEnabled` is applied to the gate at once;
    /// everything else is queued.  Returns `false` if the command was
    /// dropped.
    pub fn submit(&self, cmd: HapticCommand) -> bool {
        match cmd {
            HapticCommand::SetOutputEnabled(enabled) => {
                if self.gate.set_enabled(enabled) != enabled {
                    info!("GATE  | {} (remote)", if enabled { "open" } else { "closed" });
                }
                true
            }
            other => self.queue.push(other),
        }
    }

    pub fn is_output_enabled(&self) -> bool {
        self.gate.is_enabled()
    }
}
