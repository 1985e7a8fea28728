//! Sculpture configuration parameters.
//!
//! Everything here is fixed at build time: leaf geometry, sensor
//! thresholds, loop intervals and servo calibration.  [`SculptureConfig`]
//! gathers the scalar values into one serialisable struct that the
//! service is built from and that `main` logs once at boot.
//!
//! The `const` block at the bottom rejects inconsistent constants at
//! compile time; nothing is re-checked at runtime.

use core::f32::consts::TAU;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Leaves
// ---------------------------------------------------------------------------

/// Number of servo-driven leaves on the sculpture.
pub const NUM_LEAVES: usize = 3;

/// Static description of one leaf.  Declared once, fixed for the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeafConfig {
    /// PCA9685 output channel (0–15).
    pub channel: u8,
    /// Lower end of the mechanically safe range (degrees).
    pub min_angle: f32,
    /// Upper end of the mechanically safe range (degrees).
    pub max_angle: f32,
    /// Baseline angular speed of the phase accumulator (radians per tick).
    pub speed: f32,
    /// Initial phase (radians).
    pub phase_offset: f32,
}

pub const LEAVES: [LeafConfig; NUM_LEAVES] = [
    LeafConfig { channel: 0, min_angle: 45.0, max_angle: 135.0, speed: 0.010, phase_offset: 0.0 },
    LeafConfig { channel: 1, min_angle: 50.0, max_angle: 130.0, speed: 0.012, phase_offset: 2.1 },
    LeafConfig { channel: 2, min_angle: 40.0, max_angle: 140.0, speed: 0.0085, phase_offset: 4.2 },
];

// ---------------------------------------------------------------------------
// Movement sets
// ---------------------------------------------------------------------------

/// Animation parameters for one movement state.
///
/// Only `speed_factor` feeds the leaf animator; `amplitude` and
/// `center_angle` are carried for the motion designers but the angle
/// mapping uses each leaf's safe range instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementParameters {
    /// Width of the movement (degrees).
    pub amplitude: f32,
    /// Midpoint of the movement (degrees).
    pub center_angle: f32,
    /// Multiplier on each leaf's baseline speed.
    pub speed_factor: f32,
}

pub const IDLE_MOVEMENT: MovementParameters =
    MovementParameters { amplitude: 25.0, center_angle: 90.0, speed_factor: 1.0 };
pub const LISTEN_MOVEMENT: MovementParameters =
    MovementParameters { amplitude: 3.0, center_angle: 20.0, speed_factor: 0.5 };
pub const REACTING_POSITIVE_MOVEMENT: MovementParameters =
    MovementParameters { amplitude: 35.0, center_angle: 90.0, speed_factor: 2.0 };
pub const REACTING_NEGATIVE_MOVEMENT: MovementParameters =
    MovementParameters { amplitude: 10.0, center_angle: 60.0, speed_factor: 0.3 };
pub const REACTING_NEUTRAL_MOVEMENT: MovementParameters =
    MovementParameters { amplitude: 20.0, center_angle: 90.0, speed_factor: 0.8 };

// ---------------------------------------------------------------------------
// Servo calibration
// ---------------------------------------------------------------------------

pub const PULSEWIDTH_MIN_US: u16 = 500;
pub const PULSEWIDTH_MAX_US: u16 = 2500;
/// Full mechanical travel of the leaf servos (degrees).
pub const SERVO_MAX_ANGLE: f32 = 270.0;
/// PWM refresh frequency, set once at startup.
pub const SERVO_FREQUENCY_HZ: u32 = 50;

// ---------------------------------------------------------------------------
// Presence sensing
// ---------------------------------------------------------------------------

/// A visitor at or inside this distance on the approach sensor is present.
pub const APPROACH_THRESHOLD_CM: f32 = 30.0;
/// A visitor at or inside this distance on the interaction sensor is engaged.
pub const INTERACTION_THRESHOLD_CM: f32 = 10.0;

/// Trigger pin held LOW before the pulse (µs).
pub const ULTRASONIC_CLEAR_PULSE_US: u32 = 2;
/// Trigger pulse width (µs).
pub const ULTRASONIC_TRIGGER_PULSE_US: u32 = 10;
/// Speed of sound at room temperature (cm/µs).
pub const SPEED_OF_SOUND_CM_PER_US: f32 = 0.0343;
/// Longest echo wait before the reading is declared degenerate (≈5 m).
pub const ECHO_TIMEOUT_US: u32 = 30_000;

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Minimum spacing between two sensor sampling passes.
pub const SAMPLE_INTERVAL_MS: u32 = 100;
/// Animation runs every loop pass.
pub const ANIMATION_INTERVAL_MS: u32 = 0;
/// Host commands are polled every loop pass.
pub const COMMAND_POLL_INTERVAL_MS: u32 = 0;
/// One-time settle delay after the leaves are first positioned.
pub const STARTUP_SETTLE_MS: u32 = 500;

// ---------------------------------------------------------------------------
// Host link
// ---------------------------------------------------------------------------

pub const SERIAL_BAUD: u32 = 9600;

// ---------------------------------------------------------------------------
// Aggregated view
// ---------------------------------------------------------------------------

/// Core sculpture configuration, built from the constants above.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SculptureConfig {
    // --- Leaves ---
    pub leaves: [LeafConfig; NUM_LEAVES],

    // --- Servo calibration ---
    pub pulse_width_min_us: u16,
    pub pulse_width_max_us: u16,
    pub servo_max_angle: f32,
    pub servo_frequency_hz: u32,

    // --- Presence thresholds ---
    pub approach_threshold_cm: f32,
    pub interaction_threshold_cm: f32,

    // --- Timing ---
    pub sample_interval_ms: u32,
    pub animation_interval_ms: u32,
    pub command_poll_interval_ms: u32,
    pub startup_settle_ms: u32,

    // --- Host link ---
    pub serial_baud: u32,
}

impl Default for SculptureConfig {
    fn default() -> Self {
        Self {
            leaves: LEAVES,

            pulse_width_min_us: PULSEWIDTH_MIN_US,
            pulse_width_max_us: PULSEWIDTH_MAX_US,
            servo_max_angle: SERVO_MAX_ANGLE,
            servo_frequency_hz: SERVO_FREQUENCY_HZ,

            approach_threshold_cm: APPROACH_THRESHOLD_CM,
            interaction_threshold_cm: INTERACTION_THRESHOLD_CM,

            sample_interval_ms: SAMPLE_INTERVAL_MS,
            animation_interval_ms: ANIMATION_INTERVAL_MS,
            command_poll_interval_ms: COMMAND_POLL_INTERVAL_MS,
            startup_settle_ms: STARTUP_SETTLE_MS,

            serial_baud: SERIAL_BAUD,
        }
    }
}

// ---------------------------------------------------------------------------
// Build-time contract
// ---------------------------------------------------------------------------

const _: () = {
    assert!(NUM_LEAVES >= 1, "at least one leaf is required");
    assert!(PULSEWIDTH_MIN_US < PULSEWIDTH_MAX_US, "pulse-width bounds inverted");
    assert!(SERVO_MAX_ANGLE > 0.0, "servo travel must be positive");
    assert!(
        APPROACH_THRESHOLD_CM > INTERACTION_THRESHOLD_CM,
        "interaction threshold must be tighter than approach threshold"
    );

    let mut i = 0;
    while i < NUM_LEAVES {
        let leaf = &LEAVES[i];
        assert!(leaf.min_angle < leaf.max_angle, "leaf angle range is empty");
        assert!(leaf.min_angle >= 0.0, "leaf angle below servo travel");
        assert!(leaf.max_angle <= SERVO_MAX_ANGLE, "leaf angle beyond servo travel");
        assert!(leaf.speed >= 0.0 && leaf.speed < TAU, "leaf speed must be in [0, 2π)");
        assert!(leaf.phase_offset >= 0.0 && leaf.phase_offset < TAU, "phase offset must be in [0, 2π)");
        assert!(leaf.channel < 16, "PCA9685 has 16 channels");
        i += 1;
    }
};
