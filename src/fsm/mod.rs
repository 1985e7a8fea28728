//! Function-pointer finite state machine for visitor presence.
//!
//! Classic embedded FSM pattern:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  StateTable                                                   │
//! │  ┌─────────────┬───────────┬──────────┬───────────────────┐   │
//! │  │ StateId     │ on_enter  │ on_exit  │ on_update         │   │
//! │  ├─────────────┼───────────┼──────────┼───────────────────┤   │
//! │  │ NoUser      │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │   │
//! │  │ Approaching │ -         │ -        │ fn(ctx)->Option<> │   │
//! │  │ Interacting │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │   │
//! │  └─────────────┴───────────┴──────────┴───────────────────┘   │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each rate-limited sampling tick the engine calls `on_update` for the
//! **current** state with fresh distances in the context.  If it returns
//! `Some(next)`, the engine runs `on_exit` for the current state, then
//! `on_enter` for the next, and updates the current pointer.  At most one
//! transition happens per tick.
//!
//! Entry and exit actions describe arrival from or departure to a
//! neighbouring state, so `start` does not run the boot state's `on_enter`.

pub mod context;
pub mod states;

use context::InteractionContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Inferred visitor engagement.
/// Discriminants double as row indices in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InteractionState {
    NoUser = 0,
    Approaching = 1,
    Interacting = 2,
}

impl InteractionState {
    /// Number of rows in the state table.
    pub const COUNT: usize = 3;

    /// Convert an index back to a state.  Panics on out-of-range in debug
    /// builds; returns `NoUser` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::NoUser,
            1 => Self::Approaching,
            2 => Self::Interacting,
            _ => {
                debug_assert!(false, "no interaction state at index {idx}");
                Self::NoUser
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Handler signatures
// ---------------------------------------------------------------------------

/// Entry or exit side effect.
pub type StateActionFn = fn(&mut InteractionContext);

/// Presence check run once per sampling tick.
/// `Some(next)` requests a move to a neighbour; `None` stays put.
pub type StateUpdateFn = fn(&InteractionContext) -> Option<InteractionState>;

// ---------------------------------------------------------------------------
// Table rows
// ---------------------------------------------------------------------------

/// One row of the state table.
pub struct StateDescriptor {
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// Table-driven presence machine.
pub struct Fsm {
    /// Fixed-size table indexed by `InteractionState as usize`.
    table: [StateDescriptor; InteractionState::COUNT],
    /// Row of the active state.
    current: usize,
}

impl Fsm {
    pub fn new(table: [StateDescriptor; InteractionState::COUNT], initial: InteractionState) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Announce the boot state.  Call once before the first `tick()`.
    pub fn start(&mut self) {
        info!("FSM: boot state {}", self.table[self.current].name);
    }

    /// Advance the FSM by one sampling tick.
    ///
    /// Returns the state left behind if a transition happened.
    pub fn tick(&mut self, ctx: &mut InteractionContext) -> Option<InteractionState> {
        let next = (self.table[self.current].on_update)(ctx)?;
        let from = self.current_state();
        if next == from {
            return None;
        }
        self.transition(next, ctx);
        Some(from)
    }

    pub fn current_state(&self) -> InteractionState {
        InteractionState::from_index(self.current)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: InteractionState, ctx: &mut InteractionContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
