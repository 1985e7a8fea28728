//! Shared mutable context threaded through every FSM handler.
//!
//! `InteractionContext` is the single struct that state handlers read from
//! and write to: the latest distances, the presence thresholds and the
//! outputs of the transition that just happened.  The service
//! drains the outputs after each tick and forwards them to the host link
//! and the movement director.

use heapless::Vec;

use crate::app::events::HostEvent;
use crate::config::SculptureConfig;
use crate::movement::MovementState;

// ---------------------------------------------------------------------------
// Range snapshot (read-only to state handlers; written by the service)
// ---------------------------------------------------------------------------

/// Effective distances from one sampling tick.  A sensor that heard no
/// echo reads `f32::INFINITY` here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSnapshot {
    pub approach_cm: f32,
    pub interaction_cm: f32,
}

impl Default for RangeSnapshot {
    fn default() -> Self {
        Self {
            approach_cm: f32::INFINITY,
            interaction_cm: f32::INFINITY,
        }
    }
}

// ---------------------------------------------------------------------------
// Transition outputs (written by entry/exit actions; drained by the service)
// ---------------------------------------------------------------------------

/// Side effects requested by a transition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionOutputs {
    /// Events for the host, in emission order.
    pub events: Vec<HostEvent, 2>,
    /// Movement state the director should switch to.
    pub movement_request: Option<MovementState>,
}

impl TransitionOutputs {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.movement_request.is_none()
    }
}

// ---------------------------------------------------------------------------
// InteractionContext
// ---------------------------------------------------------------------------

pub struct InteractionContext {
    // -- Sensor data --
    pub ranges: RangeSnapshot,

    // -- Thresholds (inclusive on the "present" side) --
    pub approach_threshold_cm: f32,
    pub interaction_threshold_cm: f32,

    // -- Outputs --
    outputs: TransitionOutputs,
}

impl InteractionContext {
    pub fn new(config: &SculptureConfig) -> Self {
        Self {
            ranges: RangeSnapshot::default(),
            approach_threshold_cm: config.approach_threshold_cm,
            interaction_threshold_cm: config.interaction_threshold_cm,
            outputs: TransitionOutputs::default(),
        }
    }

    /// Someone is within the approach bound.
    pub fn approach_detected(&self) -> bool {
        self.ranges.approach_cm <= self.approach_threshold_cm
    }

    /// Someone is within the interaction bound.
    pub fn interaction_detected(&self) -> bool {
        self.ranges.interaction_cm <= self.interaction_threshold_cm
    }

    /// Queue an event for the host.  One transition queues exactly one
    /// event, so the buffer never overflows between drains.
    pub fn emit(&mut self, event: HostEvent) {
        if self.outputs.events.push(event).is_err() {
            log::warn!("FSM: event outbox full, dropping {:?}", event);
        }
    }

    pub fn request_movement(&mut self, state: MovementState) {
        self.outputs.movement_request = Some(state);
    }

    /// Take everything queued since the last drain.
    pub fn take_outputs(&mut self) -> TransitionOutputs {
        core::mem::take(&mut self.outputs)
    }
}
