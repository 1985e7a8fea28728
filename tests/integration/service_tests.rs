//! Integration tests for the SculptureService → FSM → director pipeline.
//!
//! These run on the host (x86_64) and drive whole loop passes against the
//! mock adapters, checking what reaches the servos and the host.

use crate::mock_hw::{Call, Journal, MockHardware, MockLink};

use sculpture::app::events::HostEvent;
use sculpture::app::service::SculptureService;
use sculpture::config::{self, SculptureConfig};
use sculpture::fsm::InteractionState;
use sculpture::movement::MovementState;
use sculpture::sensors::SensorId;

const FAR_CM: f32 = 200.0;

struct Rig {
    app: SculptureService,
    hw: MockHardware,
    link: MockLink,
    journal: Journal,
    now_ms: u64,
}

impl Rig {
    fn new() -> Self {
        let journal = Journal::default();
        let mut hw = MockHardware::new(journal.clone());
        let link = MockLink::new(journal.clone());
        let mut app = SculptureService::new(SculptureConfig::default());
        app.start(&mut hw);
        journal.clear();
        Self {
            app,
            hw,
            link,
            journal,
            now_ms: 0,
        }
    }

    /// One pass with the sampling timer due.
    fn pass(&mut self) {
        self.now_ms += u64::from(config::SAMPLE_INTERVAL_MS);
        self.app.tick(self.now_ms, &mut self.hw, &mut self.link);
    }

    fn pass_with(&mut self, approach_cm: f32, interaction_cm: f32) -> Vec<HostEvent> {
        self.journal.clear();
        self.hw.set_ranges(approach_cm, interaction_cm);
        self.pass();
        self.journal.events()
    }

    /// Walk the rig into `Approaching`.
    fn approach(&mut self) {
        self.pass_with(25.0, FAR_CM);
        assert_eq!(self.app.interaction_state(), InteractionState::Approaching);
    }

    /// Walk the rig into `Interacting`.
    fn engage(&mut self) {
        self.approach();
        self.pass_with(25.0, 8.0);
        assert_eq!(self.app.interaction_state(), InteractionState::Interacting);
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_positions_every_leaf_once() {
    let journal = Journal::default();
    let mut hw = MockHardware::new(journal.clone());
    let mut app = SculptureService::new(SculptureConfig::default());
    app.start(&mut hw);

    let calls = journal.take();
    assert_eq!(calls.len(), config::NUM_LEAVES);
    // Leaf 0 starts at phase 0: sin = 0 → 90° → 1166 µs.
    assert_eq!(
        calls[0],
        Call::Drive {
            channel: 0,
            pulse_width_us: 1166
        }
    );
    assert_eq!(app.interaction_state(), InteractionState::NoUser);
    assert_eq!(app.movement_state(), MovementState::Idle);
}

// ── Visitor scenarios ─────────────────────────────────────────

#[test]
fn approach_crossing_threshold_emits_start_and_listens() {
    let mut rig = Rig::new();

    assert!(rig.pass_with(35.0, FAR_CM).is_empty());
    assert_eq!(rig.app.interaction_state(), InteractionState::NoUser);

    let events = rig.pass_with(25.0, FAR_CM);
    assert_eq!(events, [HostEvent::UserApproachStart]);
    assert_eq!(rig.app.interaction_state(), InteractionState::Approaching);
    assert_eq!(rig.app.movement_state(), MovementState::Listen);
}

#[test]
fn interaction_leaves_movement_unchanged() {
    let mut rig = Rig::new();
    rig.approach();

    let events = rig.pass_with(25.0, 8.0);
    assert_eq!(events, [HostEvent::UserInteractionStart]);
    assert_eq!(rig.app.interaction_state(), InteractionState::Interacting);
    assert_eq!(rig.app.movement_state(), MovementState::Listen);
}

#[test]
fn host_reaction_overrides_immediately() {
    let mut rig = Rig::new();
    rig.engage();

    rig.link.send("set_state:REACTING_POSITIVE");
    let events = rig.pass_with(25.0, 8.0);

    assert!(events.is_empty());
    assert_eq!(rig.app.movement_state(), MovementState::ReactingPositive);
    assert_eq!(rig.app.parameters().speed_factor, 2.0);
    assert_eq!(rig.app.interaction_state(), InteractionState::Interacting);
}

#[test]
fn bogus_command_changes_nothing() {
    let mut rig = Rig::new();
    rig.engage();

    rig.link.send("set_state:BOGUS");
    let events = rig.pass_with(25.0, 8.0);

    assert!(events.is_empty());
    assert_eq!(rig.app.movement_state(), MovementState::Listen);
    assert_eq!(rig.app.interaction_state(), InteractionState::Interacting);
    assert_eq!(rig.app.lines_ignored(), 1);
    assert_eq!(rig.app.commands_applied(), 0);
}

// ── Full visit ────────────────────────────────────────────────

#[test]
fn full_visit_reports_every_edge_in_order() {
    let mut rig = Rig::new();
    let mut events = Vec::new();

    for (approach, interaction) in [
        (FAR_CM, FAR_CM),
        (28.0, FAR_CM),
        (20.0, 9.0),
        (20.0, 12.0),
        (40.0, FAR_CM),
    ] {
        events.extend(rig.pass_with(approach, interaction));
    }

    assert_eq!(
        events,
        [
            HostEvent::UserApproachStart,
            HostEvent::UserInteractionStart,
            HostEvent::UserInteractionEnd,
            HostEvent::UserApproachEnd,
        ]
    );
    assert_eq!(rig.app.interaction_state(), InteractionState::NoUser);
    assert_eq!(rig.app.movement_state(), MovementState::Idle);
}

#[test]
fn visitor_leaving_returns_to_idle_over_host_reaction() {
    let mut rig = Rig::new();
    rig.approach();
    rig.link.send("set_state:REACTING_NEUTRAL");
    rig.pass_with(25.0, FAR_CM);
    assert_eq!(rig.app.movement_state(), MovementState::ReactingNeutral);

    let events = rig.pass_with(FAR_CM, FAR_CM);
    assert_eq!(events, [HostEvent::UserApproachEnd]);
    assert_eq!(rig.app.movement_state(), MovementState::Idle);
}

// ── Hysteresis and degenerate readings ────────────────────────

#[test]
fn reading_exactly_on_threshold_keeps_visitor() {
    let mut rig = Rig::new();
    rig.approach();
    for _ in 0..5 {
        assert!(rig.pass_with(config::APPROACH_THRESHOLD_CM, FAR_CM).is_empty());
        assert_eq!(rig.app.interaction_state(), InteractionState::Approaching);
    }
    assert_eq!(
        rig.pass_with(config::APPROACH_THRESHOLD_CM + 0.1, FAR_CM),
        [HostEvent::UserApproachEnd]
    );
}

#[test]
fn missing_echo_reads_as_far() {
    let mut rig = Rig::new();
    assert!(rig.pass_with(0.0, 0.0).is_empty());
    assert_eq!(rig.app.interaction_state(), InteractionState::NoUser);

    rig.approach();
    assert_eq!(rig.pass_with(0.0, 0.0), [HostEvent::UserApproachEnd]);
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn repeated_command_is_idempotent() {
    let mut rig = Rig::new();
    rig.link.send("set_state:IDLE");
    rig.link.send("set_state:IDLE");

    assert!(rig.pass_with(FAR_CM, FAR_CM).is_empty());
    let after_first = rig.app.movement_state();
    assert!(rig.pass_with(FAR_CM, FAR_CM).is_empty());

    assert_eq!(after_first, MovementState::Idle);
    assert_eq!(rig.app.movement_state(), MovementState::Idle);
    assert_eq!(rig.app.commands_applied(), 2);
}

#[test]
fn listen_is_not_host_settable() {
    let mut rig = Rig::new();
    rig.link.send("set_state:LISTEN");
    rig.pass_with(FAR_CM, FAR_CM);
    assert_eq!(rig.app.movement_state(), MovementState::Idle);
    assert_eq!(rig.app.lines_ignored(), 1);
}

#[test]
fn one_command_per_pass() {
    let mut rig = Rig::new();
    rig.link.send("set_state:REACTING_NEGATIVE");
    rig.link.send("set_state:REACTING_POSITIVE");

    rig.pass_with(FAR_CM, FAR_CM);
    assert_eq!(rig.app.movement_state(), MovementState::ReactingNegative);
    rig.pass_with(FAR_CM, FAR_CM);
    assert_eq!(rig.app.movement_state(), MovementState::ReactingPositive);
}

// ── Scheduling contract ───────────────────────────────────────

#[test]
fn pass_runs_animate_then_sample_then_poll() {
    let mut rig = Rig::new();
    rig.journal.clear();
    rig.pass();

    let calls = rig.journal.take();
    let (drives, rest) = calls.split_at(config::NUM_LEAVES);

    let channels: Vec<u8> = drives
        .iter()
        .map(|c| match c {
            Call::Drive { channel, .. } => *channel,
            other => panic!("expected a servo write first, got {other:?}"),
        })
        .collect();
    let configured: Vec<u8> = config::LEAVES.iter().map(|l| l.channel).collect();
    assert_eq!(channels, configured);

    assert_eq!(
        rest,
        [
            Call::Sample(SensorId::Approach),
            Call::Sample(SensorId::Interaction),
            Call::PollLine,
        ]
    );
}

#[test]
fn sampling_is_rate_limited_but_animation_is_not() {
    let mut rig = Rig::new();
    rig.pass();
    rig.journal.clear();

    // Half an interval later: animate and poll only.
    rig.now_ms += u64::from(config::SAMPLE_INTERVAL_MS / 2);
    rig.app.tick(rig.now_ms, &mut rig.hw, &mut rig.link);

    let calls = rig.journal.take();
    assert!(!calls.iter().any(|c| matches!(c, Call::Sample(_))));
    assert_eq!(
        calls.iter().filter(|c| matches!(c, Call::Drive { .. })).count(),
        config::NUM_LEAVES
    );
    assert_eq!(calls.last(), Some(&Call::PollLine));
    assert_eq!(rig.app.passes(), 2);
}

#[test]
fn command_in_same_pass_as_transition_wins() {
    let mut rig = Rig::new();
    rig.link.send("set_state:REACTING_NEGATIVE");

    let events = rig.pass_with(25.0, FAR_CM);

    assert_eq!(events, [HostEvent::UserApproachStart]);
    assert_eq!(rig.app.movement_state(), MovementState::ReactingNegative);
}

// ── Animation speed follows movement state ────────────────────

#[test]
fn listen_halves_leaf_speed() {
    let mut rig = Rig::new();
    rig.approach();

    let before = rig.app.phases()[0];
    rig.pass_with(25.0, FAR_CM);
    let advanced = rig.app.phases()[0] - before;

    let expected = config::LEAVES[0].speed * config::LISTEN_MOVEMENT.speed_factor;
    assert!((advanced - expected).abs() < 1e-6, "advanced {advanced}, expected {expected}");
}
