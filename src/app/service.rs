//! Application service — the hexagonal core.
//!
//! [`SculptureService`] owns every piece of mutable loop state: leaf
//! phases, the presence FSM, the movement director and the software
//! timers.  All I/O flows through port traits passed in at call sites,
//! so the whole loop runs against the mocks in `tests/`.
//!
//! ```text
//!  RangingPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                  │       SculptureService       │
//!    ServoPort ◀── │ Animator · FSM · Director    │ ◀── CommandSource
//!                  └──────────────────────────────┘
//! ```
//!
//! One [`tick`](SculptureService::tick) is one loop pass: animate, then
//! sample (rate-limited), then poll for a host command.

use log::{debug, info};

use crate::animation::{LeafAnimator, ServoCalibration};
use crate::config::{MovementParameters, NUM_LEAVES, SculptureConfig};
use crate::fsm::context::{InteractionContext, RangeSnapshot};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, InteractionState};
use crate::movement::{MovementDirector, MovementSource, MovementState};
use crate::scheduler::{Concern, LoopSchedule, PassPlan};
use crate::sensors::SensorId;

use super::commands::HostCommand;
use super::ports::{CommandSource, EventSink, RangingPort, ServoPort};

// ───────────────────────────────────────────────────────────────
// SculptureService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct SculptureService {
    config: SculptureConfig,
    fsm: Fsm,
    ctx: InteractionContext,
    director: MovementDirector,
    animator: LeafAnimator<NUM_LEAVES>,
    schedule: LoopSchedule,
    passes: u64,
    commands_applied: u32,
    lines_ignored: u32,
}

impl SculptureService {
    /// Construct the service from configuration.  Starts in `NoUser` /
    /// `Idle` with every leaf at its phase offset.
    ///
    /// Does **not** touch hardware — call [`start`](Self::start) next.
    pub fn new(config: SculptureConfig) -> Self {
        let ctx = InteractionContext::new(&config);
        let fsm = Fsm::new(build_state_table(), InteractionState::NoUser);
        let animator = LeafAnimator::new(config.leaves, ServoCalibration::from_config(&config));
        let schedule = LoopSchedule::from_config(&config);

        Self {
            config,
            fsm,
            ctx,
            director: MovementDirector::new(),
            animator,
            schedule,
            passes: 0,
            commands_applied: 0,
            lines_ignored: 0,
        }
    }

    /// Start the FSM and drive every leaf to its initial position.
    pub fn start(&mut self, servos: &mut impl ServoPort) {
        self.fsm.start();
        self.animator.write_positions(servos);
        info!(
            "Service started: {} leaves, state {:?}/{:?}",
            NUM_LEAVES,
            self.fsm.current_state(),
            self.director.state()
        );
    }

    /// Run one loop pass at `now_ms`.  Returns which concerns ran.
    pub fn tick<H, L>(&mut self, now_ms: u64, hw: &mut H, link: &mut L) -> PassPlan
    where
        H: RangingPort + ServoPort,
        L: CommandSource + EventSink,
    {
        let plan = self.schedule.plan(now_ms);
        for concern in plan.iter() {
            match concern {
                Concern::Animate => self.animate(hw),
                Concern::Sample => {
                    self.sample(hw, link);
                }
                Concern::PollCommand => {
                    self.poll_command(link);
                }
            }
        }
        self.passes = self.passes.wrapping_add(1);
        plan
    }

    /// Position every leaf, then advance its phase at the active speed.
    pub fn animate(&mut self, servos: &mut impl ServoPort) {
        let params = self.director.parameters();
        self.animator.step(&params, servos);
    }

    /// Read both rangers and advance the presence FSM.  Edge events go
    /// out before any movement change they request.
    ///
    /// Returns the state left behind if a transition happened.
    pub fn sample(
        &mut self,
        ranging: &mut impl RangingPort,
        events: &mut impl EventSink,
    ) -> Option<InteractionState> {
        let approach = ranging.sample(SensorId::Approach);
        let interaction = ranging.sample(SensorId::Interaction);
        debug!(
            "RANGE | approach={:.1}cm interaction={:.1}cm",
            approach.cm(),
            interaction.cm()
        );

        self.ctx.ranges = RangeSnapshot {
            approach_cm: approach.effective_cm(),
            interaction_cm: interaction.effective_cm(),
        };
        let left = self.fsm.tick(&mut self.ctx);

        let outputs = self.ctx.take_outputs();
        for event in outputs.events {
            events.emit(event);
        }
        if let Some(state) = outputs.movement_request {
            self.director.set(state, MovementSource::Interaction);
        }
        left
    }

    /// Take at most one line from the host and apply it if recognised.
    pub fn poll_command(&mut self, source: &mut impl CommandSource) -> Option<HostCommand> {
        let line = source.poll_line()?;
        let Some(cmd) = HostCommand::parse(&line) else {
            self.lines_ignored = self.lines_ignored.wrapping_add(1);
            debug!("LINK | ignored line {:?}", line.as_str());
            return None;
        };
        self.handle_command(cmd);
        Some(cmd)
    }

    /// Apply a parsed host command.
    pub fn handle_command(&mut self, cmd: HostCommand) {
        self.commands_applied = self.commands_applied.wrapping_add(1);
        match cmd {
            HostCommand::SetMovement(state) => self.director.set(state, MovementSource::Host),
        }
    }

    // ── Queries ──────────────────────────────────────────────────

    pub fn interaction_state(&self) -> InteractionState {
        self.fsm.current_state()
    }

    pub fn movement_state(&self) -> MovementState {
        self.director.state()
    }

    /// Parameters of the active movement state.
    pub fn parameters(&self) -> MovementParameters {
        self.director.parameters()
    }

    /// Current phase of every leaf, in config order.
    pub fn phases(&self) -> [f32; NUM_LEAVES] {
        self.animator.phases()
    }

    /// Loop passes since construction.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Host commands applied since construction.
    pub fn commands_applied(&self) -> u32 {
        self.commands_applied
    }

    /// Host lines dropped as unrecognised since construction.
    pub fn lines_ignored(&self) -> u32 {
        self.lines_ignored
    }

    pub fn config(&self) -> &SculptureConfig {
        &self.config
    }
}
