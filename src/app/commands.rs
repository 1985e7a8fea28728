//! Inbound commands from the host.
//!
//! The host speaks a closed vocabulary of newline-terminated ASCII lines:
//!
//! | Line                           | Command                                   |
//! |--------------------------------|-------------------------------------------|
//! | `set_state:IDLE`               | `SetMovement(Idle)`                       |
//! | `set_state:REACTING_POSITIVE`  | `SetMovement(ReactingPositive)`           |
//! | `set_state:REACTING_NEGATIVE`  | `SetMovement(ReactingNegative)`           |
//! | `set_state:REACTING_NEUTRAL`   | `SetMovement(ReactingNeutral)`            |
//!
//! Anything else, including `set_state:LISTEN`, parses to `None` and is
//! dropped by the caller without a reply.

use crate::movement::MovementState;

const SET_STATE_PREFIX: &str = "set_state:";

/// Commands the host can send into the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Select a movement state, overriding whatever is active.
    SetMovement(MovementState),
}

impl HostCommand {
    /// Parse one line (without its terminator).  Matching is exact and
    /// case-sensitive.
    pub fn parse(line: &str) -> Option<Self> {
        let name = line.strip_prefix(SET_STATE_PREFIX)?;
        MovementState::ALL
            .into_iter()
            .filter(|s| s.host_settable())
            .find(|s| s.wire_name() == name)
            .map(Self::SetMovement)
    }
}
