//! Leaf animator — per-leaf sine oscillators driving the servos.
//!
//! Each leaf owns a phase accumulator.  Every step the phase is turned
//! into a servo position and then advanced:
//!
//! ```text
//!  phase ──sin──▶ [-1, 1] ──map──▶ [min_angle, max_angle]
//!        ──map──▶ [0, SERVO_MAX_ANGLE] → [PULSEWIDTH_MIN, PULSEWIDTH_MAX] µs
//!        ──▶ ServoPort::drive(channel, µs)
//!  phase += speed × speed_factor   (wrapped once at 2π)
//! ```
//!
//! The active movement parameters only scale the angular speed; the
//! angular extent is always the leaf's static safe range.  Because the
//! phase itself is never reset, switching movement state mid-cycle keeps
//! the trajectory continuous.

use core::f32::consts::TAU;

use crate::app::ports::ServoPort;
use crate::config::{LeafConfig, MovementParameters, SculptureConfig};

/// Re-map `x` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// Returns the output bound exactly when `x` sits on an input bound.
/// `in_min == in_max` is a configuration error and yields NaN/∞.
pub fn map_float(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    if x == in_min {
        return out_min;
    }
    if x == in_max {
        return out_max;
    }
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

// ---------------------------------------------------------------------------
// Calibration
// ---------------------------------------------------------------------------

/// Angle → pulse-width calibration shared by every leaf servo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServoCalibration {
    pub pulse_min_us: u16,
    pub pulse_max_us: u16,
    pub max_angle: f32,
}

impl ServoCalibration {
    pub fn from_config(config: &SculptureConfig) -> Self {
        Self {
            pulse_min_us: config.pulse_width_min_us,
            pulse_max_us: config.pulse_width_max_us,
            max_angle: config.servo_max_angle,
        }
    }

    /// Pulse width for `angle` degrees, truncated to whole microseconds.
    pub fn pulse_width_us(&self, angle: f32) -> u16 {
        map_float(
            angle,
            0.0,
            self.max_angle,
            f32::from(self.pulse_min_us),
            f32::from(self.pulse_max_us),
        ) as u16
    }
}

// ---------------------------------------------------------------------------
// Per-leaf runtime
// ---------------------------------------------------------------------------

/// Mutable oscillator state of one leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafRuntime {
    /// Phase in radians, kept in `[0, 2π)`.
    phase: f32,
}

impl LeafRuntime {
    fn from_config(leaf: &LeafConfig) -> Self {
        Self {
            phase: leaf.phase_offset,
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    fn advance(&mut self, delta: f32) {
        self.phase += delta;
        if self.phase >= TAU {
            self.phase -= TAU;
        }
    }
}

/// Servo angle for a leaf at a given phase.
pub fn leaf_angle(leaf: &LeafConfig, phase: f32) -> f32 {
    map_float(phase.sin(), -1.0, 1.0, leaf.min_angle, leaf.max_angle)
}

// ---------------------------------------------------------------------------
// Animator
// ---------------------------------------------------------------------------

/// Drives `N` leaves.  Config and runtime arrays are indexed identically.
pub struct LeafAnimator<const N: usize> {
    leaves: [LeafConfig; N],
    runtime: [LeafRuntime; N],
    calibration: ServoCalibration,
}

impl<const N: usize> LeafAnimator<N> {
    pub fn new(leaves: [LeafConfig; N], calibration: ServoCalibration) -> Self {
        let runtime = leaves.map(|leaf| LeafRuntime::from_config(&leaf));
        Self {
            leaves,
            runtime,
            calibration,
        }
    }

    /// Write every leaf's current position without advancing any phase.
    /// Used once at startup so the servos settle before the loop begins.
    pub fn write_positions(&self, servos: &mut impl ServoPort) {
        for (leaf, rt) in self.leaves.iter().zip(self.runtime.iter()) {
            servos.drive(leaf.channel, self.pulse_width_for(leaf, rt.phase));
        }
    }

    /// One animation step: position every leaf, then advance its phase
    /// by its baseline speed scaled by the active `speed_factor`.
    pub fn step(&mut self, params: &MovementParameters, servos: &mut impl ServoPort) {
        for (leaf, rt) in self.leaves.iter().zip(self.runtime.iter_mut()) {
            let pulse_us = self.calibration.pulse_width_us(leaf_angle(leaf, rt.phase));
            servos.drive(leaf.channel, pulse_us);
            rt.advance(leaf.speed * params.speed_factor);
        }
    }

    /// Current phase of every leaf.
    pub fn phases(&self) -> [f32; N] {
        self.runtime.map(|rt| rt.phase())
    }

    fn pulse_width_for(&self, leaf: &LeafConfig, phase: f32) -> u16 {
        self.calibration.pulse_width_us(leaf_angle(leaf, phase))
    }
}
