//! Cooperative software timers for the single-threaded control loop.
//!
//! Three concerns share one thread.  Each has its own [`IntervalTimer`];
//! a concern whose interval has not elapsed is skipped for that pass.
//!
//! ```text
//! ┌───────────────────────── one loop pass ─────────────────────────┐
//! │                                                                 │
//! │   Animate ──────────▶ Sample ──────────▶ PollCommand            │
//! │   (every pass)        (rate-limited)     (every pass)           │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The order is fixed by [`Concern::ORDER`].  A command read in the same
//! pass as a presence transition is applied after that transition, so
//! the host always has the last word.

use crate::config::SculptureConfig;

// ═══════════════════════════════════════════════════════════════
//  Interval timer
// ═══════════════════════════════════════════════════════════════

/// Fires when at least `interval_ms` have elapsed since it last fired.
/// An interval of 0 fires on every poll.
#[derive(Debug, Clone, Copy)]
pub struct IntervalTimer {
    interval_ms: u32,
    last_fired_ms: u64,
}

impl IntervalTimer {
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_fired_ms: 0,
        }
    }

    /// Check the timer and re-arm it if due.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms.wrapping_sub(self.last_fired_ms) >= u64::from(self.interval_ms) {
            self.last_fired_ms = now_ms;
            true
        } else {
            false
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

// ═══════════════════════════════════════════════════════════════
//  Loop schedule
// ═══════════════════════════════════════════════════════════════

/// The periodic concerns of one loop pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Concern {
    Animate = 0,
    Sample = 1,
    PollCommand = 2,
}

impl Concern {
    pub const COUNT: usize = 3;

    /// Execution order within a pass.
    pub const ORDER: [Self; Self::COUNT] = [Self::Animate, Self::Sample, Self::PollCommand];
}

/// Which concerns are due this pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassPlan {
    due: [bool; Concern::COUNT],
}

impl PassPlan {
    pub fn is_due(&self, concern: Concern) -> bool {
        self.due[concern as usize]
    }

    /// Due concerns in execution order.
    pub fn iter(&self) -> impl Iterator<Item = Concern> + '_ {
        Concern::ORDER.into_iter().filter(|c| self.is_due(*c))
    }
}

/// One timer per concern.
#[derive(Debug, Clone)]
pub struct LoopSchedule {
    timers: [IntervalTimer; Concern::COUNT],
}

impl LoopSchedule {
    pub fn new(animation_ms: u32, sample_ms: u32, command_poll_ms: u32) -> Self {
        Self {
            timers: [
                IntervalTimer::new(animation_ms),
                IntervalTimer::new(sample_ms),
                IntervalTimer::new(command_poll_ms),
            ],
        }
    }

    pub fn from_config(config: &SculptureConfig) -> Self {
        Self::new(
            config.animation_interval_ms,
            config.sample_interval_ms,
            config.command_poll_interval_ms,
        )
    }

    /// Poll every timer once and report what is due at `now_ms`.
    pub fn plan(&mut self, now_ms: u64) -> PassPlan {
        let mut plan = PassPlan::default();
        for concern in Concern::ORDER {
            plan.due[concern as usize] = self.timers[concern as usize].poll(now_ms);
        }
        plan
    }
}
