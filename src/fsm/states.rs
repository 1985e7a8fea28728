//! Concrete state handler functions and table builder.
//!
//! ```text
//!  NO_USER ──[approach ≤ A]──▶ APPROACHING ──[interaction ≤ I]──▶ INTERACTING
//!     ▲                           │     ▲                               │
//!     └────────[approach > A]─────┘     └───────[interaction > I]───────┘
//! ```
//!
//! Entering a state needs the tighter bound to be met; leaving it only
//! needs the looser one to fail.  In `Approaching` the interaction check
//! runs first, so a visitor close to the sculpture is never dropped to
//! `NoUser` by a momentary miss on the approach sensor.
//!
//! Edge side effects live in entry/exit actions:
//!
//! | Edge                       | Event                    | Movement |
//! |----------------------------|--------------------------|----------|
//! | NoUser → Approaching       | `user_approach_start`    | Listen   |
//! | Approaching → Interacting  | `user_interaction_start` | —        |
//! | Interacting → Approaching  | `user_interaction_end`   | —        |
//! | Approaching → NoUser       | `user_approach_end`      | Idle     |

use super::context::InteractionContext;
use super::{InteractionState, StateDescriptor};
use crate::app::events::HostEvent;
use crate::movement::MovementState;
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; InteractionState::COUNT] {
    [
        // Index 0 — NoUser
        StateDescriptor {
            name: "NoUser",
            on_enter: Some(no_user_enter),
            on_exit: Some(no_user_exit),
            on_update: no_user_update,
        },
        // Index 1 — Approaching
        StateDescriptor {
            name: "Approaching",
            on_enter: None,
            on_exit: None,
            on_update: approaching_update,
        },
        // Index 2 — Interacting
        StateDescriptor {
            name: "Interacting",
            on_enter: Some(interacting_enter),
            on_exit: Some(interacting_exit),
            on_update: interacting_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  NO_USER state — nobody near the sculpture
// ═══════════════════════════════════════════════════════════════════════════

fn no_user_enter(ctx: &mut InteractionContext) {
    ctx.emit(HostEvent::UserApproachEnd);
    ctx.request_movement(MovementState::Idle);
    info!(
        "NO_USER: visitor left (approach {:.1} cm > {:.1} cm)",
        ctx.ranges.approach_cm, ctx.approach_threshold_cm
    );
}

fn no_user_exit(ctx: &mut InteractionContext) {
    ctx.emit(HostEvent::UserApproachStart);
    ctx.request_movement(MovementState::Listen);
    info!(
        "NO_USER: visitor approaching at {:.1} cm",
        ctx.ranges.approach_cm
    );
}

fn no_user_update(ctx: &InteractionContext) -> Option<InteractionState> {
    if ctx.approach_detected() {
        return Some(InteractionState::Approaching);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  APPROACHING state — visitor in range, not yet engaged
// ═══════════════════════════════════════════════════════════════════════════

fn approaching_update(ctx: &InteractionContext) -> Option<InteractionState> {
    if ctx.interaction_detected() {
        return Some(InteractionState::Interacting);
    }
    if !ctx.approach_detected() {
        return Some(InteractionState::NoUser);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  INTERACTING state — visitor engaged at close range
// ═══════════════════════════════════════════════════════════════════════════

fn interacting_enter(ctx: &mut InteractionContext) {
    ctx.emit(HostEvent::UserInteractionStart);
    info!(
        "INTERACTING: visitor engaged at {:.1} cm",
        ctx.ranges.interaction_cm
    );
}

fn interacting_exit(ctx: &mut InteractionContext) {
    ctx.emit(HostEvent::UserInteractionEnd);
    info!(
        "INTERACTING: visitor stepped back to {:.1} cm",
        ctx.ranges.interaction_cm
    );
}

fn interacting_update(ctx: &InteractionContext) -> Option<InteractionState> {
    if !ctx.interaction_detected() {
        return Some(InteractionState::Approaching);
    }
    None
}
