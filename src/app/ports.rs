//! Port traits — the hexagonal boundary between control logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SculptureService (domain)
//! ```
//!
//! Driven adapters (rangers, servo bus, host link, clock) implement these
//! traits.  The [`SculptureService`](super::service::SculptureService)
//! consumes them via generics, so the control loop never touches hardware
//! directly and runs unchanged against the mocks in `tests/`.
//!
//! None of the ports report errors to the domain.  Failures are logged by
//! the adapter and collapse into a degenerate reading or a dropped write.

use super::events::HostEvent;
use crate::link::codec::LineBuf;
use crate::sensors::{DistanceReading, SensorId};

// ───────────────────────────────────────────────────────────────
// Ranging port (driven adapter: ultrasonic sensors → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one blocking ranging measurement per call.
pub trait RangingPort {
    /// Trigger `sensor` and return its distance.  A missing echo comes back
    /// as a degenerate reading, never as an error.
    fn sample(&mut self, sensor: SensorId) -> DistanceReading;
}

// ───────────────────────────────────────────────────────────────
// Servo port (driven adapter: domain → PWM bus)
// ───────────────────────────────────────────────────────────────

/// Write-side port: forward an already-computed pulse width.
pub trait ServoPort {
    /// Drive `channel` with a `pulse_width_us` microsecond pulse.
    /// No clamping — the caller owns the mechanical limits.
    fn drive(&mut self, channel: u8, pulse_width_us: u16);
}

// ───────────────────────────────────────────────────────────────
// Host link ports (driven adapter: domain ↔ serial)
// ───────────────────────────────────────────────────────────────

/// Outbound events to the host.  Fire-and-forget.
pub trait EventSink {
    fn emit(&mut self, event: HostEvent);
}

/// Inbound command lines from the host.
pub trait CommandSource {
    /// Return one complete line if available, without blocking.
    /// The terminating newline is not included.
    fn poll_line(&mut self) -> Option<LineBuf>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time since boot.
pub trait ClockPort {
    /// Microseconds since boot.
    fn now_us(&self) -> u64;

    /// Milliseconds since boot.
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}
