//! Movement director — owns the active animation mode.
//!
//! ```text
//!  Interaction FSM ──(Idle / Listen)──┐
//!                                     ▼
//!                           MovementDirector::set ──▶ parameters() ──▶ LeafAnimator
//!                                     ▲
//!  Host link ──(any host-settable)────┘
//! ```
//!
//! `set` is the single mutation point.  There is no transition guard: the
//! last caller wins, so a host command can cut a reaction short and the
//! interaction FSM can overwrite a reaction when the visitor leaves.
//! Parameter switches are abrupt; the next animator step simply uses the
//! new speed factor and the phase carries on from where it was.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::{
    IDLE_MOVEMENT, LISTEN_MOVEMENT, MovementParameters, REACTING_NEGATIVE_MOVEMENT,
    REACTING_NEUTRAL_MOVEMENT, REACTING_POSITIVE_MOVEMENT,
};

// ---------------------------------------------------------------------------
// Movement state
// ---------------------------------------------------------------------------

/// Behavioural animation modes.
/// Must stay in sync with [`MOVEMENT_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MovementState {
    Idle = 0,
    Listen = 1,
    ReactingPositive = 2,
    ReactingNegative = 3,
    ReactingNeutral = 4,
}

impl MovementState {
    pub const COUNT: usize = 5;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Idle,
        Self::Listen,
        Self::ReactingPositive,
        Self::ReactingNegative,
        Self::ReactingNeutral,
    ];

    /// Convert an ordinal back to a state.  Unknown ordinals resolve to
    /// `Idle`, matching the parameter-lookup fallback.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::Listen,
            2 => Self::ReactingPositive,
            3 => Self::ReactingNegative,
            4 => Self::ReactingNeutral,
            _ => Self::Idle,
        }
    }

    /// Upper-case name used on the host wire (`set_state:<NAME>`).
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Listen => "LISTEN",
            Self::ReactingPositive => "REACTING_POSITIVE",
            Self::ReactingNegative => "REACTING_NEGATIVE",
            Self::ReactingNeutral => "REACTING_NEUTRAL",
        }
    }

    /// Whether the host may select this state.  `Listen` belongs to the
    /// interaction path only.
    pub fn host_settable(self) -> bool {
        !matches!(self, Self::Listen)
    }
}

// ---------------------------------------------------------------------------
// Parameter lookup
// ---------------------------------------------------------------------------

/// Parameter sets indexed by `MovementState as usize`.
pub const MOVEMENT_TABLE: [MovementParameters; MovementState::COUNT] = [
    IDLE_MOVEMENT,
    LISTEN_MOVEMENT,
    REACTING_POSITIVE_MOVEMENT,
    REACTING_NEGATIVE_MOVEMENT,
    REACTING_NEUTRAL_MOVEMENT,
];

/// Pure, total lookup from state to its immutable parameter set.
pub fn parameters_for(state: MovementState) -> MovementParameters {
    MOVEMENT_TABLE
        .get(state as usize)
        .copied()
        .unwrap_or(IDLE_MOVEMENT)
}

// ---------------------------------------------------------------------------
// Director
// ---------------------------------------------------------------------------

/// Who asked for a movement change.  Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementSource {
    Interaction,
    Host,
}

pub struct MovementDirector {
    state: MovementState,
}

impl Default for MovementDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl MovementDirector {
    pub fn new() -> Self {
        Self {
            state: MovementState::Idle,
        }
    }

    /// Unconditionally overwrite the active movement state.
    pub fn set(&mut self, state: MovementState, source: MovementSource) {
        if state == self.state {
            debug!("MOVE | {:?} re-requested ({:?})", state, source);
            return;
        }
        info!("MOVE | {:?} -> {:?} ({:?})", self.state, state, source);
        self.state = state;
    }

    pub fn state(&self) -> MovementState {
        self.state
    }

    /// Parameters of the active state.
    pub fn parameters(&self) -> MovementParameters {
        parameters_for(self.state)
    }
}
