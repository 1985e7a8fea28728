//! Outbound events to the host.
//!
//! The [`SculptureService`](super::service::SculptureService) emits these
//! through the [`EventSink`](super::ports::EventSink) port whenever the
//! interaction state changes.  They report state, never errors.

/// Visitor-presence edges reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    UserApproachStart,
    UserApproachEnd,
    UserInteractionStart,
    UserInteractionEnd,
}

impl HostEvent {
    /// Exact wire text, without the line terminator.
    pub fn as_line(self) -> &'static str {
        match self {
            Self::UserApproachStart => "event:user_approach_start",
            Self::UserApproachEnd => "event:user_approach_end",
            Self::UserInteractionStart => "event:user_interaction_start",
            Self::UserInteractionEnd => "event:user_interaction_end",
        }
    }
}
